//! Session host: feeds key presses and timer events into the game machine,
//! keeps the timers in step with the snapshot and submits finished results.

use std::sync::Arc;

use crossterm::event::KeyCode;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::config::TimerConfig;
use crate::data::QuestionCatalog;
use crate::game::{
    validate_nickname, GameMachine, Phase, SessionTimers, TimerEvent, NICKNAME_MAX_LENGTH,
};
use crate::models::OPTION_COUNT;
use crate::ranking::{Leaderboard, RankingStore};

pub struct App {
    machine: GameMachine,
    timers: SessionTimers,
    store: Box<dyn RankingStore>,
    rankings: Leaderboard,
    /// Session whose result has already gone to the store.
    submitted: Option<Uuid>,
    name_input: String,
    highlighted: usize,
    countdown: u32,
    result_scroll: usize,
    pub should_quit: bool,
}

impl App {
    pub fn new(
        catalog: Arc<QuestionCatalog>,
        store: Box<dyn RankingStore>,
        timers: TimerConfig,
    ) -> (Self, mpsc::UnboundedReceiver<TimerEvent>) {
        let (timers, rx) = SessionTimers::new(timers);
        let rankings = Leaderboard::from_results(store.capacity(), store.list_results());
        let app = Self {
            machine: GameMachine::new(catalog),
            timers,
            store,
            rankings,
            submitted: None,
            name_input: String::new(),
            highlighted: 0,
            countdown: 0,
            result_scroll: 0,
            should_quit: false,
        };
        (app, rx)
    }

    pub fn machine(&self) -> &GameMachine {
        &self.machine
    }

    pub fn phase(&self) -> Phase {
        self.machine.phase()
    }

    pub fn name_input(&self) -> &str {
        &self.name_input
    }

    /// Validation hint for the nickname being typed, if it would be rejected.
    pub fn name_hint(&self) -> Option<&'static str> {
        if self.name_input.trim().is_empty() {
            return None;
        }
        validate_nickname(&self.name_input).err()
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    pub fn countdown(&self) -> u32 {
        self.countdown
    }

    pub fn result_scroll(&self) -> usize {
        self.result_scroll
    }

    pub fn rankings(&self) -> &Leaderboard {
        &self.rankings
    }

    /// Rank of the current session on the board, if any.
    pub fn current_rank(&self) -> Option<usize> {
        self.rankings.position_of(self.machine.snapshot().session_id)
    }

    pub fn handle_key(&mut self, key: KeyCode) {
        let before = self.mark();
        match self.phase() {
            Phase::NotStarted => self.handle_start_input(key),
            Phase::Playing => self.handle_quiz_input(key),
            Phase::CategoryTransition => self.handle_transition_input(key),
            Phase::Result => self.handle_result_input(key),
            Phase::Ranking => self.handle_ranking_input(key),
        }
        self.settle(before);
    }

    pub fn handle_timer(&mut self, event: TimerEvent) {
        if !self.timers.accept(&event) {
            tracing::debug!(?event, "dropped stale timer event");
            return;
        }
        let before = self.mark();
        match event {
            TimerEvent::Tick { .. } => self.machine.tick(),
            TimerEvent::Advance { .. } => self.machine.advance(),
            TimerEvent::Countdown { remaining: 0, .. } => self.machine.continue_to_next_category(),
            TimerEvent::Countdown { remaining, .. } => self.countdown = remaining,
        }
        self.settle(before);
    }

    fn handle_start_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Enter => {
                let name = self.name_input.clone();
                self.machine.start(&name);
            }
            KeyCode::Tab => self.machine.show_ranking(),
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Backspace => {
                self.name_input.pop();
            }
            KeyCode::Char(c) => {
                if self.name_input.chars().count() < NICKNAME_MAX_LENGTH {
                    self.name_input.push(c);
                }
            }
            _ => {}
        }
    }

    fn handle_quiz_input(&mut self, key: KeyCode) {
        if self.machine.snapshot().answered {
            if matches!(key, KeyCode::Char('q') | KeyCode::Char('Q')) {
                self.should_quit = true;
            }
            return;
        }
        match key {
            KeyCode::Up | KeyCode::Char('k') => {
                self.highlighted = (self.highlighted + OPTION_COUNT - 1) % OPTION_COUNT;
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.highlighted = (self.highlighted + 1) % OPTION_COUNT;
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.machine.submit_answer(self.highlighted),
            KeyCode::Char(c @ '1'..='4') => {
                let index = c as usize - '1' as usize;
                self.highlighted = index;
                self.machine.submit_answer(index);
            }
            KeyCode::Esc => self.machine.restart(),
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_transition_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Enter | KeyCode::Char(' ') => self.machine.continue_to_next_category(),
            KeyCode::Esc => self.machine.restart(),
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_result_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Down | KeyCode::Char('j') => {
                let max_scroll = self.machine.snapshot().answers.len().saturating_sub(1);
                self.result_scroll = (self.result_scroll + 1).min(max_scroll);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.result_scroll = self.result_scroll.saturating_sub(1);
            }
            KeyCode::Tab | KeyCode::Char('l') => self.machine.show_ranking(),
            KeyCode::Char('r') | KeyCode::Char('R') => self.machine.restart(),
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_ranking_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Tab | KeyCode::Char('b') => {
                self.machine.show_result()
            }
            KeyCode::Char('r') | KeyCode::Char('R') => self.machine.restart(),
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            _ => {}
        }
    }

    fn mark(&self) -> (Phase, Uuid, usize) {
        let state = self.machine.snapshot();
        (state.phase, state.session_id, state.question_index)
    }

    fn settle(&mut self, before: (Phase, Uuid, usize)) {
        self.timers.sync(self.machine.snapshot());

        let (phase, session_id, question_index) = self.mark();
        if (phase, session_id, question_index) == before {
            return;
        }

        if (session_id, question_index) != (before.1, before.2) {
            self.highlighted = 0;
        }

        match phase {
            Phase::Playing if before.0 == Phase::NotStarted => {
                self.name_input.clear();
            }
            Phase::CategoryTransition if before.0 != Phase::CategoryTransition => {
                self.countdown = self.timers.countdown_steps();
            }
            Phase::Result if before.0 == Phase::Playing => {
                self.result_scroll = 0;
                self.submit_result();
            }
            _ => {}
        }
    }

    fn submit_result(&mut self) {
        let Some(result) = self.machine.finalize_result() else {
            return;
        };
        if self.submitted == Some(result.session_id) {
            return;
        }
        self.submitted = Some(result.session_id);

        tracing::info!(
            session = %result.session_id,
            nickname = %result.nickname,
            score = result.score,
            "submitting result"
        );
        let results = match self.store.add_result(result) {
            Ok(results) => results,
            Err(e) => {
                tracing::warn!(error = %e, "failed to persist rankings");
                self.store.list_results()
            }
        };
        self.rankings = Leaderboard::from_results(self.store.capacity(), results);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::catalog::tests::catalog;
    use crate::game::TimerKind;
    use crate::ranking::MemoryStore;

    fn app(names: &[&str], block_size: usize) -> (App, mpsc::UnboundedReceiver<TimerEvent>) {
        App::new(
            Arc::new(catalog(names, block_size)),
            Box::new(MemoryStore::new(10)),
            TimerConfig::default(),
        )
    }

    fn type_name(app: &mut App, name: &str) {
        for c in name.chars() {
            app.handle_key(KeyCode::Char(c));
        }
    }

    async fn pump_until(app: &mut App, rx: &mut mpsc::UnboundedReceiver<TimerEvent>, phase: Phase) {
        while app.phase() != phase {
            let event = rx.recv().await.unwrap();
            app.handle_timer(event);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_short_nickname_shows_hint() {
        let (mut app, _rx) = app(&["Alpha"], 1);
        type_name(&mut app, "A");
        assert!(app.name_hint().is_some());
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.phase(), Phase::NotStarted);

        type_name(&mut app, "l");
        assert_eq!(app.name_hint(), None);
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.phase(), Phase::Playing);
    }

    #[tokio::test(start_paused = true)]
    async fn test_name_input_is_capped() {
        let (mut app, _rx) = app(&["Alpha"], 1);
        type_name(&mut app, "abcdefghijklmnop");
        assert_eq!(app.name_input(), "abcdefghij");
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_session_submits_once() {
        let (mut app, mut rx) = app(&["Alpha", "Beta"], 1);
        type_name(&mut app, "Alice");
        app.handle_key(KeyCode::Enter);

        // Question 1 (answer 0), then wait out the transition countdown.
        app.handle_key(KeyCode::Char('1'));
        pump_until(&mut app, &mut rx, Phase::CategoryTransition).await;
        assert_eq!(app.countdown(), 3);
        pump_until(&mut app, &mut rx, Phase::Playing).await;
        assert_eq!(app.machine().question_index(), 1);

        // Let question 2 time out.
        pump_until(&mut app, &mut rx, Phase::Result).await;
        let result = app.machine().finalize_result().unwrap();
        assert_eq!(result.correct_count, 1);
        assert!(result.score >= 100);
        assert_eq!(app.rankings().len(), 1);
        assert_eq!(app.rankings().capacity(), 10);
        assert_eq!(app.current_rank(), Some(0));

        app.handle_key(KeyCode::Tab);
        assert_eq!(app.phase(), Phase::Ranking);
        app.handle_key(KeyCode::Esc);
        assert_eq!(app.phase(), Phase::Result);
        assert_eq!(app.rankings().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_step_countdown_continues() {
        let (mut app, mut rx) = App::new(
            Arc::new(catalog(&["Alpha", "Beta"], 1)),
            Box::new(MemoryStore::new(10)),
            TimerConfig {
                countdown_steps: 0,
                ..TimerConfig::default()
            },
        );
        type_name(&mut app, "Alice");
        app.handle_key(KeyCode::Enter);
        app.handle_key(KeyCode::Char('1'));
        pump_until(&mut app, &mut rx, Phase::CategoryTransition).await;
        assert_eq!(app.countdown(), 1);

        tokio::time::sleep(std::time::Duration::from_secs(60)).await;
        while let Ok(event) = rx.try_recv() {
            app.handle_timer(event);
        }
        assert_eq!(app.phase(), Phase::Playing);
        assert_eq!(app.machine().question_index(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_continue_skips_countdown() {
        let (mut app, mut rx) = app(&["Alpha", "Beta"], 1);
        type_name(&mut app, "Alice");
        app.handle_key(KeyCode::Enter);
        app.handle_key(KeyCode::Enter);
        assert!(app.machine().snapshot().answered);

        pump_until(&mut app, &mut rx, Phase::CategoryTransition).await;
        assert!(app.timers.is_armed(TimerKind::Countdown));

        app.handle_key(KeyCode::Enter);
        assert_eq!(app.phase(), Phase::Playing);
        assert_eq!(app.machine().question_index(), 1);
        assert!(!app.timers.is_armed(TimerKind::Countdown));
        assert!(app.timers.is_armed(TimerKind::Tick));
    }

    #[tokio::test(start_paused = true)]
    async fn test_ranking_from_start_and_back() {
        let (mut app, _rx) = app(&["Alpha"], 1);
        app.handle_key(KeyCode::Tab);
        assert_eq!(app.phase(), Phase::Ranking);
        app.handle_key(KeyCode::Esc);
        assert_eq!(app.phase(), Phase::NotStarted);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_mid_game_stops_timers() {
        let (mut app, _rx) = app(&["Alpha"], 2);
        type_name(&mut app, "Alice");
        app.handle_key(KeyCode::Enter);
        assert!(app.timers.is_armed(TimerKind::Tick));
        app.handle_key(KeyCode::Esc);
        assert_eq!(app.phase(), Phase::NotStarted);
        assert_eq!(app.name_input(), "");
        assert!(!app.timers.is_armed(TimerKind::Tick));
        assert!(!app.timers.is_armed(TimerKind::Advance));
    }
}
