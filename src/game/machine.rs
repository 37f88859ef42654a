//! The game state machine exposed to the presentation layer.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::data::QuestionCatalog;
use crate::models::{Category, CategoryScore, PlayerResult, Question};

use super::scoring::{self, accuracy, category_scores};
use super::state::{reduce, Action, Phase, Session};

/// Owns the current [`Session`] and replaces it wholesale on every intent.
///
/// Intents never fail. One that is not valid right now leaves the snapshot
/// untouched.
#[derive(Debug, Clone)]
pub struct GameMachine {
    catalog: Arc<QuestionCatalog>,
    state: Session,
}

impl GameMachine {
    pub fn new(catalog: Arc<QuestionCatalog>) -> Self {
        Self {
            catalog,
            state: Session::default(),
        }
    }

    pub fn snapshot(&self) -> &Session {
        &self.state
    }

    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn start(&mut self, nickname: &str) {
        let before = self.state.phase;
        self.dispatch(Action::Start {
            nickname: nickname.to_string(),
            session_id: Uuid::new_v4(),
        });
        if before == Phase::NotStarted && self.state.phase == Phase::Playing {
            tracing::info!(
                session = %self.state.session_id,
                nickname = %self.state.nickname,
                "session started"
            );
        }
    }

    pub fn submit_answer(&mut self, selected: usize) {
        self.dispatch(Action::Answer {
            selected: Some(selected),
        });
    }

    /// One second of the question clock. Runs out into an automatic timeout.
    pub fn tick(&mut self) {
        self.dispatch(Action::Tick);
    }

    /// Move past an answered question.
    pub fn advance(&mut self) {
        let before = self.state.phase;
        self.dispatch(Action::Advance { at: Utc::now() });
        if before == Phase::Playing && self.state.phase == Phase::Result {
            tracing::info!(
                session = %self.state.session_id,
                score = self.state.score,
                "session finished"
            );
        }
    }

    pub fn continue_to_next_category(&mut self) {
        self.dispatch(Action::ContinueCategory);
    }

    pub fn restart(&mut self) {
        self.dispatch(Action::Restart);
    }

    pub fn show_ranking(&mut self) {
        self.dispatch(Action::ShowRanking);
    }

    /// Leave the ranking screen: back to the result if a game was played,
    /// otherwise back to the start.
    pub fn show_result(&mut self) {
        self.dispatch(Action::ShowResult);
    }

    fn dispatch(&mut self, action: Action) {
        let label = format!("{:?}", action);
        let next = reduce(&self.catalog, &self.state, action);
        if next == self.state {
            tracing::debug!(phase = ?self.state.phase, action = %label, "intent ignored");
            return;
        }
        self.state = next;

        if self.state.phase == Phase::Playing && !self.state.answered && self.state.timer == 0 {
            tracing::debug!(question = self.state.question_index, "time is up");
            self.state = reduce(&self.catalog, &self.state, Action::Answer { selected: None });
        }
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.catalog.get(self.state.question_index)
    }

    pub fn current_category(&self) -> Option<&Category> {
        self.catalog.category_at(self.state.question_index)
    }

    /// Position of the active question inside its category block.
    pub fn category_question_index(&self) -> usize {
        self.state.question_index % self.catalog.block_size()
    }

    pub fn question_index(&self) -> usize {
        self.state.question_index
    }

    pub fn total_questions(&self) -> usize {
        self.catalog.len()
    }

    pub fn max_total_score(&self) -> u32 {
        scoring::max_total_score(self.catalog.len())
    }

    pub fn category_scores(&self) -> Vec<CategoryScore> {
        category_scores(&self.catalog, &self.state.answers)
    }

    /// Score of the block the active index sits in. On the transition screen
    /// this is the category just finished.
    pub fn completed_category_score(&self) -> Option<CategoryScore> {
        let block = self.catalog.block_of(self.state.question_index);
        self.category_scores().into_iter().nth(block)
    }

    pub fn next_category(&self) -> Option<&Category> {
        let next = self.catalog.block_of(self.state.question_index) + 1;
        if next >= self.catalog.block_count() {
            return None;
        }
        self.catalog.categories().get(next)
    }

    /// Summary of the finished session, or `None` until the session reaches
    /// its result. Repeated calls return identical values.
    pub fn finalize_result(&self) -> Option<PlayerResult> {
        let date = self.state.completed_at?;
        let correct_count = self.state.answers.iter().filter(|a| a.correct).count();
        let total_questions = self.catalog.len();

        Some(PlayerResult {
            session_id: self.state.session_id,
            nickname: self.state.nickname.clone(),
            score: self.state.score,
            correct_count,
            total_questions,
            accuracy: accuracy(correct_count, total_questions),
            date,
            category_scores: self.category_scores(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::catalog::tests::catalog;
    use crate::game::scoring::MAX_TIME;

    fn machine(names: &[&str], block_size: usize) -> GameMachine {
        GameMachine::new(Arc::new(catalog(names, block_size)))
    }

    fn correct_option(machine: &GameMachine) -> usize {
        machine.current_question().unwrap().answer
    }

    #[test]
    fn test_nickname_scenarios() {
        let mut game = machine(&["Alpha"], 2);
        game.start("A");
        assert_eq!(game.phase(), Phase::NotStarted);
        game.start("Al");
        assert_eq!(game.phase(), Phase::Playing);
        assert_eq!(game.snapshot().nickname, "Al");
    }

    #[test]
    fn test_timer_running_out_submits_timeout() {
        let mut game = machine(&["Alpha"], 2);
        game.start("Alice");
        for _ in 0..MAX_TIME {
            game.tick();
        }
        let state = game.snapshot();
        assert!(state.answered);
        assert_eq!(state.timer, 0);
        assert_eq!(state.answers.len(), 1);
        assert_eq!(state.answers[0].selected, None);
        assert_eq!(state.answers[0].score, 0);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_answer_after_timeout_is_ignored() {
        let mut game = machine(&["Alpha"], 2);
        game.start("Alice");
        for _ in 0..MAX_TIME {
            game.tick();
        }
        let before = game.snapshot().clone();
        let option = correct_option(&game);
        game.submit_answer(option);
        assert_eq!(game.snapshot(), &before);
    }

    #[test]
    fn test_double_submit_keeps_history_and_score() {
        let mut game = machine(&["Alpha"], 2);
        game.start("Alice");
        let option = correct_option(&game);
        game.submit_answer(option);
        let (len, score) = (game.snapshot().answers.len(), game.snapshot().score);
        game.submit_answer(option);
        assert_eq!(game.snapshot().answers.len(), len);
        assert_eq!(game.snapshot().score, score);
    }

    #[test]
    fn test_two_category_walkthrough() {
        let mut game = machine(&["Alpha", "Beta"], 2);
        game.start("Alice");
        assert_eq!(game.current_category().unwrap().as_str(), "Alpha");

        for _ in 0..2 {
            let option = correct_option(&game);
            game.submit_answer(option);
            game.advance();
        }
        assert_eq!(game.phase(), Phase::CategoryTransition);
        let completed = game.completed_category_score().unwrap();
        assert_eq!(completed.category.as_str(), "Alpha");
        assert_eq!((completed.correct, completed.total), (2, 2));
        assert_eq!(game.next_category().unwrap().as_str(), "Beta");

        game.continue_to_next_category();
        assert_eq!(game.phase(), Phase::Playing);
        assert_eq!(game.question_index(), 2);
        assert_eq!(game.category_question_index(), 0);
        assert_eq!(game.snapshot().timer, MAX_TIME);
        assert_eq!(game.current_category().unwrap().as_str(), "Beta");
        assert_eq!(game.next_category(), None);
    }

    #[test]
    fn test_finalize_result() {
        let mut game = machine(&["Alpha", "Beta"], 1);
        assert_eq!(game.finalize_result(), None);

        game.start("Alice");
        let option = correct_option(&game);
        game.submit_answer(option);
        game.advance();
        game.continue_to_next_category();
        game.submit_answer((correct_option(&game) + 1) % 4);
        assert_eq!(game.finalize_result(), None);
        game.advance();

        assert_eq!(game.phase(), Phase::Result);
        let first = game.finalize_result().unwrap();
        let second = game.finalize_result().unwrap();
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
        assert_eq!(first.nickname, "Alice");
        assert_eq!(first.score, 200);
        assert_eq!(first.correct_count, 1);
        assert_eq!(first.total_questions, 2);
        assert_eq!(first.accuracy, 50);
        assert_eq!(first.category_scores.len(), 2);
    }

    #[test]
    fn test_restart_clears_result() {
        let mut game = machine(&["Alpha"], 1);
        game.start("Alice");
        game.submit_answer(0);
        game.advance();
        assert!(game.finalize_result().is_some());
        game.restart();
        assert_eq!(game.snapshot(), &Session::default());
        assert_eq!(game.finalize_result(), None);
    }

    #[test]
    fn test_question_projections_absent_when_exhausted() {
        let mut game = machine(&["Alpha"], 1);
        game.start("Alice");
        game.submit_answer(0);
        game.advance();
        // Result keeps the last index, which is still in range.
        assert!(game.current_question().is_some());

        let catalog = game.catalog().clone();
        let beyond = GameMachine {
            catalog: Arc::new(catalog),
            state: Session {
                question_index: 5,
                ..Session::default()
            },
        };
        assert_eq!(beyond.current_question(), None);
        assert_eq!(beyond.current_category(), None);
        assert_eq!(beyond.completed_category_score(), None);
        assert_eq!(beyond.next_category(), None);
    }
}
