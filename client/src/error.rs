use thiserror::Error;

/// Everything that can go wrong assembling or playing a board.
///
/// Variants fall into three groups: network failures (`Http`, `Status`,
/// `BadUrl`), validation failures while assembling the board
/// (`CategoryIdsExhausted`, `CluePicksExhausted`, `TooFewClues`,
/// `MalformedResponse`), and consistency failures that indicate the board
/// and the clue bank disagree (`UnknownClueId`).
#[derive(Error, Debug)]
pub enum GameError {
    #[error("request to trivia API failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("trivia API returned status {status}")]
    Status { status: reqwest::StatusCode },

    #[error("invalid API URL: {0}")]
    BadUrl(#[from] url::ParseError),

    #[error("could not assemble game: no set of distinct categories after {attempts} requests")]
    CategoryIdsExhausted { attempts: usize },

    #[error("could not assemble game: category {title:?} ran out of usable clues")]
    CluePicksExhausted { title: String },

    #[error("category {title:?} has only {count} clues, not enough to fill a column")]
    TooFewClues { title: String, count: usize },

    #[error("malformed API response: {reason}")]
    MalformedResponse { reason: String },

    #[error("clue id {0} is not in the clue bank")]
    UnknownClueId(u32),

    #[error("no game in progress, call start_game() first")]
    NoGame,
}

pub type Result<T> = std::result::Result<T, GameError>;
