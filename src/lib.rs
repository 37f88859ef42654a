//! # trivia-rush
//!
//! A timed, single-player trivia quiz for the terminal.
//!
//! Questions come in category blocks. Each one runs on a 20 second clock and
//! a correct answer earns 100 points plus 5 for every second left. Finished
//! sessions go onto a top-10 leaderboard.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use trivia_rush::{Quiz, QuizConfig, QuizError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), QuizError> {
//!     let quiz = Quiz::from_config(QuizConfig::default())?;
//!     quiz.run().await
//! }
//! ```
//!
//! The state machine can also be driven without a terminal:
//!
//! ```rust
//! use std::sync::Arc;
//! use trivia_rush::{GameMachine, Phase, QuestionCatalog};
//!
//! let catalog = Arc::new(QuestionCatalog::builtin().unwrap());
//! let mut game = GameMachine::new(catalog);
//! game.start("Ada");
//! assert_eq!(game.phase(), Phase::Playing);
//! ```

mod app;
pub mod config;
pub mod data;
mod error;
pub mod game;
pub mod logging;
pub mod models;
pub mod ranking;
pub mod terminal;
mod ui;

use std::sync::Arc;

use crossterm::event::{Event, EventStream, KeyEventKind};
use futures_util::StreamExt;
use tokio::sync::mpsc;

pub use app::App;
pub use config::{QuizConfig, TimerConfig};
pub use data::{load_questions_from_json, QuestionCatalog};
pub use error::{CatalogError, QuizError, StoreError};
pub use game::{GameMachine, Phase, Session};
pub use models::{AnswerRecord, Category, CategoryScore, PlayerResult, Question};
pub use ranking::{JsonFileStore, Leaderboard, MemoryStore, RankingStore};

/// A quiz instance that can be run in the terminal.
pub struct Quiz {
    catalog: Arc<QuestionCatalog>,
    config: QuizConfig,
}

impl Quiz {
    pub fn new(catalog: QuestionCatalog, config: QuizConfig) -> Self {
        Self {
            catalog: Arc::new(catalog),
            config,
        }
    }

    /// Load the question bank named in `config`, or the built-in one.
    pub fn from_config(config: QuizConfig) -> Result<Self, QuizError> {
        let catalog = match &config.questions_path {
            Some(path) => load_questions_from_json(path)?,
            None => QuestionCatalog::builtin()?,
        };
        Ok(Self::new(catalog, config))
    }

    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    /// Run the quiz in the terminal.
    ///
    /// This will take over the terminal, display the quiz UI, and return
    /// when the user quits.
    pub async fn run(self) -> Result<(), QuizError> {
        let store = self.open_store()?;
        let (mut app, timer_rx) = App::new(self.catalog, store, self.config.timers);

        let mut guard = terminal::TerminalGuard::enter()?;
        run_event_loop(guard.terminal(), &mut app, timer_rx).await
    }

    fn open_store(&self) -> Result<Box<dyn RankingStore>, QuizError> {
        let store: Box<dyn RankingStore> = match &self.config.rankings_path {
            Some(path) => Box::new(JsonFileStore::open(path, self.config.max_rankings)?),
            None => Box::new(MemoryStore::new(self.config.max_rankings)),
        };
        Ok(store)
    }
}

/// Single dispatch point: key presses and timer events are handled one at a
/// time, in arrival order.
async fn run_event_loop(
    terminal: &mut terminal::AppTerminal,
    app: &mut App,
    mut timer_rx: mpsc::UnboundedReceiver<game::TimerEvent>,
) -> Result<(), QuizError> {
    let mut events = EventStream::new();

    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        tokio::select! {
            maybe_event = events.next() => match maybe_event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key.code);
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => break,
            },
            Some(event) = timer_rx.recv() => app.handle_timer(event),
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
