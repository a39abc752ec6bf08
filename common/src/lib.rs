//! Shared types for the quizboard trivia game: the board data model used by
//! the client core and renderers, and the wire format of the remote trivia API.

pub mod models;
pub mod wire;
