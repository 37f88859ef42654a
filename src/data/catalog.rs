//! Read-only, block-partitioned question bank.
//!
//! Questions are stored in category blocks of equal size, in category order.
//! Block boundaries decide when the game pauses for a category transition.

use std::collections::HashSet;

use crate::error::CatalogError;
use crate::models::{Category, Question, OPTION_COUNT};

/// Questions per category in the reference bank.
pub const DEFAULT_BLOCK_SIZE: usize = 10;

const BUILTIN_QUESTIONS: &str = include_str!("../../questions.json");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionCatalog {
    categories: Vec<Category>,
    block_size: usize,
    questions: Vec<Question>,
}

impl QuestionCatalog {
    /// Build a catalog, checking that every block holds exactly `block_size`
    /// questions of its category.
    pub fn new(
        categories: Vec<Category>,
        block_size: usize,
        questions: Vec<Question>,
    ) -> Result<Self, CatalogError> {
        if categories.is_empty() {
            return Err(CatalogError::NoCategories);
        }
        if block_size == 0 {
            return Err(CatalogError::EmptyBlocks);
        }

        let mut seen_categories = HashSet::new();
        for category in &categories {
            if !seen_categories.insert(category) {
                return Err(CatalogError::DuplicateCategory(category.to_string()));
            }
        }

        let expected = categories.len() * block_size;
        if questions.len() != expected {
            return Err(CatalogError::WrongQuestionCount {
                expected,
                found: questions.len(),
                categories: categories.len(),
                block_size,
            });
        }

        let mut seen_ids = HashSet::new();
        for (index, question) in questions.iter().enumerate() {
            let expected_category = &categories[index / block_size];
            if &question.category != expected_category {
                return Err(CatalogError::OutOfBlock {
                    id: question.id,
                    index,
                    found: question.category.to_string(),
                    expected: expected_category.to_string(),
                });
            }
            if !seen_ids.insert(question.id) {
                return Err(CatalogError::DuplicateId(question.id));
            }
            if question.answer >= OPTION_COUNT {
                return Err(CatalogError::InvalidAnswer {
                    id: question.id,
                    answer: question.answer,
                });
            }
        }

        Ok(Self {
            categories,
            block_size,
            questions,
        })
    }

    /// The bundled 40-question bank.
    pub fn builtin() -> Result<Self, CatalogError> {
        super::parse_questions(BUILTIN_QUESTIONS)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Distinct categories in catalog order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// Number of category blocks.
    pub fn block_count(&self) -> usize {
        self.categories.len()
    }

    /// Which block a global question index falls in.
    pub fn block_of(&self, index: usize) -> usize {
        index / self.block_size
    }

    pub fn category_at(&self, index: usize) -> Option<&Category> {
        self.questions.get(index).map(|q| &q.category)
    }

    pub fn category_of(&self, question_id: u32) -> Option<&Category> {
        self.questions
            .iter()
            .find(|q| q.id == question_id)
            .map(|q| &q.category)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn question(id: u32, category: &str, answer: usize) -> Question {
        Question {
            id,
            category: Category::from(category),
            text: format!("Question {}", id),
            options: [
                "first".to_string(),
                "second".to_string(),
                "third".to_string(),
                "fourth".to_string(),
            ],
            answer,
            explanation: format!("Because {}", answer),
        }
    }

    /// `names.len()` categories of `block_size` questions, ids from 1.
    pub(crate) fn catalog(names: &[&str], block_size: usize) -> QuestionCatalog {
        let questions = names
            .iter()
            .enumerate()
            .flat_map(|(block, name)| {
                (0..block_size).map(move |offset| {
                    let id = (block * block_size + offset + 1) as u32;
                    question(id, name, offset % OPTION_COUNT)
                })
            })
            .collect();
        let categories = names.iter().map(|n| Category::from(*n)).collect();
        QuestionCatalog::new(categories, block_size, questions).unwrap()
    }

    #[test]
    fn test_builtin_catalog_shape() {
        let catalog = QuestionCatalog::builtin().unwrap();
        assert_eq!(catalog.len(), 40);
        assert_eq!(catalog.block_size(), DEFAULT_BLOCK_SIZE);
        assert_eq!(catalog.categories().len(), 4);
    }

    #[test]
    fn test_block_lookup() {
        let catalog = catalog(&["Alpha", "Beta"], 2);
        assert_eq!(catalog.block_count(), 2);
        assert_eq!(catalog.block_of(1), 0);
        assert_eq!(catalog.block_of(2), 1);
        assert_eq!(catalog.category_at(3).unwrap().as_str(), "Beta");
        assert_eq!(catalog.category_at(4), None);
        assert_eq!(catalog.category_of(1).unwrap().as_str(), "Alpha");
        assert_eq!(catalog.category_of(99), None);
    }

    #[test]
    fn test_rejects_question_outside_its_block() {
        let questions = vec![
            question(1, "Alpha", 0),
            question(2, "Beta", 0),
            question(3, "Alpha", 0),
            question(4, "Beta", 0),
        ];
        let result = QuestionCatalog::new(vec!["Alpha".into(), "Beta".into()], 2, questions);
        assert!(matches!(result, Err(CatalogError::OutOfBlock { index: 1, .. })));
    }

    #[test]
    fn test_rejects_wrong_count() {
        let questions = vec![question(1, "Alpha", 0)];
        let result = QuestionCatalog::new(vec!["Alpha".into()], 2, questions);
        assert!(matches!(result, Err(CatalogError::WrongQuestionCount { expected: 2, found: 1, .. })));
    }

    #[test]
    fn test_rejects_duplicate_ids_and_bad_answers() {
        let dup = vec![question(1, "Alpha", 0), question(1, "Alpha", 0)];
        assert!(matches!(
            QuestionCatalog::new(vec!["Alpha".into()], 2, dup),
            Err(CatalogError::DuplicateId(1))
        ));

        let bad = vec![question(1, "Alpha", 4)];
        assert!(matches!(
            QuestionCatalog::new(vec!["Alpha".into()], 1, bad),
            Err(CatalogError::InvalidAnswer { id: 1, answer: 4 })
        ));
    }

    #[test]
    fn test_rejects_empty_and_duplicate_categories() {
        assert!(matches!(
            QuestionCatalog::new(Vec::new(), 10, Vec::new()),
            Err(CatalogError::NoCategories)
        ));
        assert!(matches!(
            QuestionCatalog::new(vec!["Alpha".into()], 0, Vec::new()),
            Err(CatalogError::EmptyBlocks)
        ));
        assert!(matches!(
            QuestionCatalog::new(vec!["Alpha".into(), "Alpha".into()], 1, Vec::new()),
            Err(CatalogError::DuplicateCategory(_))
        ));
    }
}
