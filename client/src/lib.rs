//! Quizboard Client Library
//!
//! This library is the playable core of a trivia board game: it fetches
//! categories and clues from a jservice-style trivia API, assembles a 6x5
//! board with dense row-major clue ids, and advances each clue's reveal
//! state (question, then answer) as clicks come in. Rendering is left to
//! the caller, which listens on the event channel and routes clicks back
//! by clue id.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use quizboard_client::{GameEvent, QuizBoard};
//!
//! #[tokio::main]
//! async fn main() -> quizboard_client::Result<()> {
//!     let game = QuizBoard::connect("https://jservice.io/")?;
//!     let mut events = game.subscribe_to_events().await;
//!
//!     // Fetch, sample, and id-assign a fresh board
//!     game.start_game().await?;
//!
//!     while let Ok(event) = events.try_recv() {
//!         if let GameEvent::BoardReady { categories } = event {
//!             println!("{} categories loaded", categories.len());
//!         }
//!     }
//!
//!     // First click shows the question, second the answer, a third
//!     // click is ignored
//!     game.click(0).await?;
//!     game.click(0).await?;
//!
//!     game.teardown().await;
//!     Ok(())
//! }
//! ```
//!
//! For tests or non-HTTP backends, implement [`TriviaSource`] and build
//! the game with [`QuizBoard::with_source`].

mod api;
mod board;
mod error;
mod game;

pub use api::{DEFAULT_TIMEOUT, TriviaApi, TriviaSource};
pub use board::ClueBank;
pub use error::{GameError, Result};
pub use game::{GameEvent, GameSession, QuizBoard, Reveal};

// Re-export common types for convenience
pub use quizboard_common::{models::*, wire::*};
