use quizboard_common::models::{Category, Clue, RevealState};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::{RwLock, mpsc};
use tracing::{debug, info, warn};

use crate::api::{TriviaApi, TriviaSource};
use crate::board::{ClueBank, build_clue_bank, fetch_category_ids, load_category, select_clues};
use crate::{GameError, Result};

/// Events emitted by the game for renderers to react to
#[derive(Debug, Clone)]
pub enum GameEvent {
    /// Setup has begun; a renderer would show its loading view now
    SetupStarted,
    /// A fresh board was assembled and is ready to draw
    BoardReady { categories: Vec<Category> },
    /// A click advanced a clue; `text` is what the cell should display now
    ClueRevealed {
        id: u32,
        text: String,
        showing: RevealState,
    },
    /// Setup failed and no board is shown ("failed to load game")
    SetupFailed { reason: String },
}

/// What a click produced: the text to display and the state the clue
/// moved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reveal {
    pub id: u32,
    pub text: String,
    pub showing: RevealState,
}

/// One game's worth of state: the assembled categories and the clue bank
/// mapping ids back into them. Rebuilt from scratch on every start.
#[derive(Debug, Clone)]
pub struct GameSession {
    categories: Vec<Category>,
    bank: ClueBank,
}

impl GameSession {
    /// Run the full assembly pipeline: pick distinct category ids, load
    /// each category in chosen order, sample its clues, then assign ids
    /// and build the bank.
    pub(crate) async fn assemble<S: TriviaSource>(
        source: &S,
        rng: &mut (impl Rng + Send),
    ) -> Result<Self> {
        let ids = fetch_category_ids(source, rng).await?;

        let mut categories = Vec::with_capacity(ids.len());
        for id in ids {
            let mut category = load_category(source, id).await?;
            debug!(
                "Loaded category {} ({}) with {} clues",
                id,
                category.title,
                category.clues.len()
            );
            select_clues(&mut category, rng)?;
            categories.push(category);
        }

        let bank = build_clue_bank(&mut categories)?;
        Ok(Self { categories, bank })
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn bank(&self) -> &ClueBank {
        &self.bank
    }

    /// Look up a clue by its bank id.
    pub fn clue(&self, id: u32) -> Option<&Clue> {
        let address = self.bank.address(id)?;
        self.categories.get(address.column)?.clues.get(address.row)
    }

    /// Advance the clue's reveal state. Returns `None` for a click on an
    /// already-answered clue; an unresolvable id means the board and the
    /// bank are out of sync.
    pub fn advance(&mut self, id: u32) -> Result<Option<Reveal>> {
        let address = self.bank.address(id).ok_or(GameError::UnknownClueId(id))?;
        let clue = self
            .categories
            .get_mut(address.column)
            .and_then(|category| category.clues.get_mut(address.row))
            .ok_or(GameError::UnknownClueId(id))?;

        match clue.advance() {
            Some(text) => {
                let text = text.to_string();
                Ok(Some(Reveal {
                    id,
                    text,
                    showing: clue.showing,
                }))
            }
            None => Ok(None),
        }
    }
}

/// High-level game handle that owns the session and talks to renderers
/// through an event channel
pub struct QuizBoard<S = TriviaApi> {
    source: S,
    session: RwLock<Option<GameSession>>,
    event_sender: RwLock<Option<mpsc::UnboundedSender<GameEvent>>>,
}

impl QuizBoard<TriviaApi> {
    /// Create a game backed by the HTTP API at the specified base URL.
    pub fn connect(base_url: &str) -> Result<Self> {
        Ok(Self::with_source(TriviaApi::new(base_url)?))
    }
}

impl<S: TriviaSource> QuizBoard<S> {
    /// Create a game backed by any trivia source.
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            session: RwLock::new(None),
            event_sender: RwLock::new(None),
        }
    }

    /// Subscribe to game events. Returns a receiver for game events.
    pub async fn subscribe_to_events(&self) -> mpsc::UnboundedReceiver<GameEvent> {
        let (sender, receiver) = mpsc::unbounded_channel();
        let mut event_sender = self.event_sender.write().await;
        *event_sender = Some(sender);
        receiver
    }

    async fn emit(&self, event: GameEvent) {
        if let Some(ref sender) = *self.event_sender.read().await {
            let _ = sender.send(event);
        }
    }

    /// Set up a fresh game: fetch category ids, load and sample each
    /// category, assign clue ids, and install the new session. Any earlier
    /// session is discarded first, so a failed setup leaves the pre-game
    /// view rather than a partial board. Restart is the same call.
    pub async fn start_game(&self) -> Result<()> {
        info!("Starting new game");

        self.session.write().await.take();
        self.emit(GameEvent::SetupStarted).await;

        let mut rng = StdRng::from_os_rng();
        match GameSession::assemble(&self.source, &mut rng).await {
            Ok(session) => {
                let categories = session.categories().to_vec();
                info!(
                    "Board ready: {} categories, {} clues banked",
                    categories.len(),
                    session.bank().len()
                );
                *self.session.write().await = Some(session);
                self.emit(GameEvent::BoardReady { categories }).await;
                Ok(())
            }
            Err(e) => {
                warn!("Game setup failed: {}", e);
                self.emit(GameEvent::SetupFailed {
                    reason: e.to_string(),
                })
                .await;
                Err(e)
            }
        }
    }

    /// Handle a click on the cell with the given clue id.
    pub async fn click(&self, id: u32) -> Result<Option<Reveal>> {
        debug!("Click on clue {}", id);

        let reveal = {
            let mut session = self.session.write().await;
            let session = session.as_mut().ok_or(GameError::NoGame)?;
            session.advance(id)?
        };

        if let Some(ref reveal) = reveal {
            self.emit(GameEvent::ClueRevealed {
                id: reveal.id,
                text: reveal.text.clone(),
                showing: reveal.showing,
            })
            .await;
        }

        Ok(reveal)
    }

    /// Snapshot of the current board, if a game is in progress.
    pub async fn board(&self) -> Option<Vec<Category>> {
        self.session
            .read()
            .await
            .as_ref()
            .map(|session| session.categories().to_vec())
    }

    /// Snapshot of a single clue by id.
    pub async fn clue(&self, id: u32) -> Option<Clue> {
        self.session
            .read()
            .await
            .as_ref()
            .and_then(|session| session.clue(id).cloned())
    }

    /// Check whether a board is currently assembled.
    pub async fn is_playing(&self) -> bool {
        self.session.read().await.is_some()
    }

    /// Drop the session and return to the pre-game view.
    pub async fn teardown(&self) {
        self.session.write().await.take();
        *self.event_sender.write().await = None;
        info!("Game torn down");
    }
}
