use std::collections::{HashMap, HashSet};

use quizboard_common::models::{
    BoardAddress, CATEGORY_OFFSET_RANGE, CLUES_PER_CATEGORY, Category, Clue, NUM_CATEGORIES,
};
use rand::Rng;
use tracing::{debug, warn};

use crate::api::TriviaSource;
use crate::{GameError, Result};

/// Total category requests allowed before giving up on finding
/// `NUM_CATEGORIES` distinct ids.
pub(crate) const MAX_ID_ATTEMPTS: usize = NUM_CATEGORIES * 10;

/// Id-to-position lookup table for the finished board, rebuilt per game.
#[derive(Debug, Clone)]
pub struct ClueBank {
    slots: HashMap<u32, BoardAddress>,
}

impl ClueBank {
    /// Resolve a clue id to its board position.
    pub fn address(&self, id: u32) -> Option<BoardAddress> {
        self.slots.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Collect `NUM_CATEGORIES` distinct category ids by sampling random
/// offsets, keeping insertion order so the board layout is stable.
/// Duplicate hits retry up to `MAX_ID_ATTEMPTS` total requests.
pub(crate) async fn fetch_category_ids<S: TriviaSource>(
    source: &S,
    rng: &mut (impl Rng + Send),
) -> Result<Vec<u64>> {
    let mut ids = Vec::with_capacity(NUM_CATEGORIES);
    let mut seen = HashSet::with_capacity(NUM_CATEGORIES);
    let mut attempts = 0;

    while ids.len() < NUM_CATEGORIES {
        if attempts == MAX_ID_ATTEMPTS {
            warn!(
                "Only {} distinct categories after {} requests, giving up",
                ids.len(),
                attempts
            );
            return Err(GameError::CategoryIdsExhausted { attempts });
        }
        attempts += 1;

        let offset = rng.random_range(0..CATEGORY_OFFSET_RANGE);
        let summary = source.category_at_offset(offset).await?;

        if seen.insert(summary.id) {
            debug!("Picked category {} ({})", summary.id, summary.title);
            ids.push(summary.id);
        } else {
            debug!("Duplicate category {}, retrying", summary.id);
        }
    }

    Ok(ids)
}

/// Fetch one category and normalize its clues to question/answer pairs,
/// dropping the source-only fields. Null text becomes the empty string so
/// the selector's empty check covers both malformed shapes.
pub(crate) async fn load_category<S: TriviaSource>(source: &S, id: u64) -> Result<Category> {
    let response = source.category_by_id(id).await?;

    let clues = response
        .clues
        .into_iter()
        .map(|clue| {
            Clue::new(
                clue.question.unwrap_or_default(),
                clue.answer.unwrap_or_default(),
            )
        })
        .collect();

    Ok(Category {
        title: response.title,
        clues,
    })
}

/// Reduce an oversized clue list to `CLUES_PER_CATEGORY` distinct clues
/// picked uniformly at random, skipping clues with an empty question or
/// answer. A category with exactly `CLUES_PER_CATEGORY` clues is left as
/// is; fewer is an error since the board builder needs a full column.
pub(crate) fn select_clues(category: &mut Category, rng: &mut impl Rng) -> Result<()> {
    let total = category.clues.len();

    if total < CLUES_PER_CATEGORY {
        return Err(GameError::TooFewClues {
            title: category.title.clone(),
            count: total,
        });
    }
    if total == CLUES_PER_CATEGORY {
        return Ok(());
    }

    let max_attempts = total * 10;
    let mut chosen = HashSet::new();
    let mut picked = Vec::with_capacity(CLUES_PER_CATEGORY);
    let mut attempts = 0;

    while picked.len() < CLUES_PER_CATEGORY {
        if attempts == max_attempts {
            warn!(
                "Category {} has too few usable clues, giving up",
                category.title
            );
            return Err(GameError::CluePicksExhausted {
                title: category.title.clone(),
            });
        }
        attempts += 1;

        let index = rng.random_range(0..total);
        let clue = &category.clues[index];
        if clue.question.is_empty() || clue.answer.is_empty() {
            continue;
        }
        if chosen.insert(index) {
            picked.push(index);
        }
    }

    category.clues = picked
        .into_iter()
        .map(|index| category.clues[index].clone())
        .collect();

    Ok(())
}

/// Assign dense row-major ids (row 0 across all categories, then row 1,
/// ...) starting at 0, writing each id into its clue, and build the
/// id-to-position bank. Deterministic for identical input ordering.
pub(crate) fn build_clue_bank(categories: &mut [Category]) -> Result<ClueBank> {
    for category in categories.iter() {
        if category.clues.len() != CLUES_PER_CATEGORY {
            return Err(GameError::TooFewClues {
                title: category.title.clone(),
                count: category.clues.len(),
            });
        }
    }

    let mut slots = HashMap::with_capacity(categories.len() * CLUES_PER_CATEGORY);
    let mut id: u32 = 0;

    for row in 0..CLUES_PER_CATEGORY {
        for (column, category) in categories.iter_mut().enumerate() {
            category.clues[row].id = id;
            slots.insert(id, BoardAddress { column, row });
            id += 1;
        }
    }

    Ok(ClueBank { slots })
}

#[cfg(test)]
mod tests {
    use quizboard_common::wire::{CategoryResponse, CategorySummary, ClueResponse};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    /// In-memory source: offset N maps onto the listing modulo its length.
    struct FakeSource {
        listing: Vec<CategorySummary>,
    }

    impl FakeSource {
        fn with_ids(ids: &[u64]) -> Self {
            let listing = ids
                .iter()
                .map(|&id| CategorySummary {
                    id,
                    title: format!("category {id}"),
                })
                .collect();
            Self { listing }
        }
    }

    impl TriviaSource for FakeSource {
        async fn category_at_offset(&self, offset: u64) -> Result<CategorySummary> {
            let index = offset as usize % self.listing.len();
            Ok(self.listing[index].clone())
        }

        async fn category_by_id(&self, id: u64) -> Result<CategoryResponse> {
            Ok(CategoryResponse {
                id,
                title: format!("category {id}"),
                clues: (0..8)
                    .map(|i| ClueResponse {
                        question: Some(format!("question {i}")),
                        answer: Some(format!("answer {i}")),
                    })
                    .collect(),
            })
        }
    }

    fn category(title: &str, clues: Vec<Clue>) -> Category {
        Category {
            title: title.to_string(),
            clues,
        }
    }

    fn clue(question: &str, answer: &str) -> Clue {
        Clue::new(question.to_string(), answer.to_string())
    }

    fn well_formed_clues(count: usize) -> Vec<Clue> {
        (0..count)
            .map(|i| clue(&format!("q{i}"), &format!("a{i}")))
            .collect()
    }

    #[tokio::test]
    async fn fetches_six_distinct_ids_in_insertion_order() {
        let source = FakeSource::with_ids(&[10, 20, 30, 40, 50, 60, 70, 80]);
        let mut rng = StdRng::seed_from_u64(7);

        let ids = fetch_category_ids(&source, &mut rng).await.unwrap();

        assert_eq!(ids.len(), NUM_CATEGORIES);
        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), NUM_CATEGORIES);
    }

    #[tokio::test]
    async fn gives_up_when_the_source_repeats_one_id() {
        let source = FakeSource::with_ids(&[42]);
        let mut rng = StdRng::seed_from_u64(7);

        let err = fetch_category_ids(&source, &mut rng).await.unwrap_err();

        assert!(matches!(
            err,
            GameError::CategoryIdsExhausted {
                attempts: MAX_ID_ATTEMPTS
            }
        ));
    }

    #[tokio::test]
    async fn load_normalizes_missing_text_to_empty_strings() {
        struct NullSource;

        impl TriviaSource for NullSource {
            async fn category_at_offset(&self, _offset: u64) -> Result<CategorySummary> {
                unreachable!("not used in this test")
            }

            async fn category_by_id(&self, id: u64) -> Result<CategoryResponse> {
                Ok(CategoryResponse {
                    id,
                    title: "sparse".to_string(),
                    clues: vec![
                        ClueResponse {
                            question: Some("q".to_string()),
                            answer: None,
                        },
                        ClueResponse {
                            question: None,
                            answer: None,
                        },
                    ],
                })
            }
        }

        let category = load_category(&NullSource, 1).await.unwrap();

        assert_eq!(category.title, "sparse");
        assert_eq!(category.clues[0].question, "q");
        assert_eq!(category.clues[0].answer, "");
        assert_eq!(category.clues[1].question, "");
        assert!(
            category
                .clues
                .iter()
                .all(|c| c.showing == quizboard_common::models::RevealState::Unrevealed)
        );
    }

    #[test]
    fn selects_five_distinct_well_formed_clues() {
        let mut cat = category("math", well_formed_clues(9));
        let mut rng = StdRng::seed_from_u64(3);

        select_clues(&mut cat, &mut rng).unwrap();

        assert_eq!(cat.clues.len(), CLUES_PER_CATEGORY);
        let questions: HashSet<_> = cat.clues.iter().map(|c| c.question.clone()).collect();
        assert_eq!(questions.len(), CLUES_PER_CATEGORY);
    }

    #[test]
    fn never_selects_a_malformed_clue() {
        // 5 usable clues among 8; every one of them must be picked.
        let mut clues = well_formed_clues(5);
        clues.push(clue("", "orphan answer"));
        clues.push(clue("orphan question", ""));
        clues.push(clue("", ""));
        let mut cat = category("gaps", clues);
        let mut rng = StdRng::seed_from_u64(11);

        select_clues(&mut cat, &mut rng).unwrap();

        assert_eq!(cat.clues.len(), CLUES_PER_CATEGORY);
        assert!(
            cat.clues
                .iter()
                .all(|c| !c.question.is_empty() && !c.answer.is_empty())
        );
    }

    #[test]
    fn errors_instead_of_hanging_when_all_clues_are_malformed() {
        let clues = (0..8).map(|_| clue("", "")).collect();
        let mut cat = category("hopeless", clues);
        let mut rng = StdRng::seed_from_u64(5);

        let err = select_clues(&mut cat, &mut rng).unwrap_err();
        assert!(matches!(err, GameError::CluePicksExhausted { title } if title == "hopeless"));
    }

    #[test]
    fn fails_fast_on_a_short_category() {
        let mut cat = category("short", well_formed_clues(3));
        let mut rng = StdRng::seed_from_u64(5);

        let err = select_clues(&mut cat, &mut rng).unwrap_err();
        assert!(matches!(err, GameError::TooFewClues { count: 3, .. }));
    }

    #[test]
    fn leaves_an_exact_size_category_untouched() {
        let mut cat = category("exact", well_formed_clues(CLUES_PER_CATEGORY));
        let before: Vec<String> = cat.clues.iter().map(|c| c.question.clone()).collect();
        let mut rng = StdRng::seed_from_u64(5);

        select_clues(&mut cat, &mut rng).unwrap();

        let after: Vec<String> = cat.clues.iter().map(|c| c.question.clone()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn bank_ids_are_dense_and_row_major() {
        let mut categories: Vec<Category> = (0..NUM_CATEGORIES)
            .map(|i| category(&format!("c{i}"), well_formed_clues(CLUES_PER_CATEGORY)))
            .collect();

        let bank = build_clue_bank(&mut categories).unwrap();

        assert_eq!(bank.len(), NUM_CATEGORIES * CLUES_PER_CATEGORY);
        for row in 0..CLUES_PER_CATEGORY {
            for (column, cat) in categories.iter().enumerate() {
                let expected = (row * NUM_CATEGORIES + column) as u32;
                assert_eq!(cat.clues[row].id, expected);
                assert_eq!(bank.address(expected), Some(BoardAddress { column, row }));
            }
        }
        // Dense: every id in [0, 30) resolves, nothing else does.
        assert!(bank.address(30).is_none());
    }

    #[test]
    fn bank_refuses_a_ragged_board() {
        let mut categories = vec![
            category("full", well_formed_clues(CLUES_PER_CATEGORY)),
            category("ragged", well_formed_clues(4)),
        ];

        let err = build_clue_bank(&mut categories).unwrap_err();
        assert!(matches!(err, GameError::TooFewClues { count: 4, .. }));
    }
}
