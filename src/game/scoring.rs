//! Points, accuracy and per-category aggregation. Everything here is pure.

use std::collections::HashMap;

use crate::data::QuestionCatalog;
use crate::models::{AnswerRecord, CategoryScore};

/// Seconds on the clock at the start of every question.
pub const MAX_TIME: u32 = 20;
pub const BASE_SCORE: u32 = 100;
pub const TIME_BONUS_PER_SECOND: u32 = 5;
pub const MAX_SCORE_PER_QUESTION: u32 = BASE_SCORE + MAX_TIME * TIME_BONUS_PER_SECOND;

/// Points for one answer: nothing when wrong, otherwise the base plus a bonus
/// for every second left.
pub fn calculate_score(correct: bool, time_remaining: u32) -> u32 {
    if !correct {
        return 0;
    }
    BASE_SCORE + time_remaining.min(MAX_TIME) * TIME_BONUS_PER_SECOND
}

/// Best possible session total for a catalog of `question_count` questions.
pub fn max_total_score(question_count: usize) -> u32 {
    question_count as u32 * MAX_SCORE_PER_QUESTION
}

/// Percentage of correct answers, rounded half up (12.5 becomes 13).
pub fn accuracy(correct: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((correct * 200 + total) / (total * 2)) as u32
}

/// Recompute the per-category breakdown from the answer history.
///
/// Returns one entry per catalog category, in catalog order, including
/// categories with no answers yet.
pub fn category_scores(catalog: &QuestionCatalog, answers: &[AnswerRecord]) -> Vec<CategoryScore> {
    let block_of_id: HashMap<u32, usize> = catalog
        .questions()
        .iter()
        .enumerate()
        .map(|(index, q)| (q.id, catalog.block_of(index)))
        .collect();

    let mut scores: Vec<CategoryScore> = catalog
        .categories()
        .iter()
        .map(|category| CategoryScore {
            category: category.clone(),
            correct: 0,
            total: 0,
            score: 0,
        })
        .collect();

    for answer in answers {
        let Some(entry) = block_of_id
            .get(&answer.question_id)
            .and_then(|block| scores.get_mut(*block))
        else {
            continue;
        };
        entry.total += 1;
        entry.score += answer.score;
        if answer.correct {
            entry.correct += 1;
        }
    }

    scores
}
