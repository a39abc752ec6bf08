use serde::{Deserialize, Serialize};

/// Number of categories on a board.
pub const NUM_CATEGORIES: usize = 6;
/// Number of displayed clues per category.
pub const CLUES_PER_CATEGORY: usize = 5;
/// Valid random-offset range of the remote category listing.
pub const CATEGORY_OFFSET_RANGE: u64 = 18_000;

/// Reveal progression of a single clue. Only ever advances forward.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum RevealState {
    #[serde(rename = "unrevealed")]
    Unrevealed,
    #[serde(rename = "question")]
    QuestionShown,
    #[serde(rename = "answer")]
    AnswerShown,
}

/// A single question/answer pair on the board.
///
/// The `id` is assigned by the clue bank builder once the board is final;
/// before that it is 0 and meaningless.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Clue {
    pub question: String,
    pub answer: String,
    pub showing: RevealState,
    pub id: u32,
}

impl Clue {
    pub fn new(question: String, answer: String) -> Self {
        Self {
            question,
            answer,
            showing: RevealState::Unrevealed,
            id: 0,
        }
    }

    /// Advance the reveal state and return the text that should now be
    /// displayed. Returns `None` once the answer is already shown.
    pub fn advance(&mut self) -> Option<&str> {
        match self.showing {
            RevealState::Unrevealed => {
                self.showing = RevealState::QuestionShown;
                Some(&self.question)
            }
            RevealState::QuestionShown => {
                self.showing = RevealState::AnswerShown;
                Some(&self.answer)
            }
            RevealState::AnswerShown => None,
        }
    }

    /// Point value shown on the cell, derived from the clue's board row.
    pub fn points(&self) -> u32 {
        (self.id / NUM_CATEGORIES as u32 + 1) * 100
    }
}

/// A named column of clues on the board.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Category {
    pub title: String,
    pub clues: Vec<Clue>,
}

/// Board position a clue id resolves to: `column` indexes the category,
/// `row` indexes into its clue list.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct BoardAddress {
    pub column: usize,
    pub row: usize,
}
