//! Session snapshot and the pure transition function.
//!
//! `reduce` never mutates its input and never fails: an action that is not
//! valid in the current phase yields an identical copy of the snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::data::QuestionCatalog;
use crate::models::{AnswerRecord, OPTION_COUNT};

use super::scoring::{calculate_score, MAX_TIME};

pub const NICKNAME_MIN_LENGTH: usize = 2;
pub const NICKNAME_MAX_LENGTH: usize = 10;

/// Top-level screen the session is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    NotStarted,
    Playing,
    CategoryTransition,
    Result,
    Ranking,
}

/// Complete state of one session at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub phase: Phase,
    /// Nil until a game is started.
    pub session_id: Uuid,
    pub nickname: String,
    /// 0-based position across the whole catalog.
    pub question_index: usize,
    pub score: u32,
    pub answers: Vec<AnswerRecord>,
    /// Seconds left for the active question.
    pub timer: u32,
    pub answered: bool,
    /// Option picked for the active question; `None` before answering or on timeout.
    pub selected: Option<usize>,
    /// Set once, when the last question is advanced past.
    pub completed_at: Option<DateTime<Utc>>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            phase: Phase::NotStarted,
            session_id: Uuid::nil(),
            nickname: String::new(),
            question_index: 0,
            score: 0,
            answers: Vec::new(),
            timer: MAX_TIME,
            answered: false,
            selected: None,
            completed_at: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Start { nickname: String, session_id: Uuid },
    Tick,
    /// `selected: None` records a timeout.
    Answer { selected: Option<usize> },
    Advance { at: DateTime<Utc> },
    ContinueCategory,
    ShowRanking,
    ShowResult,
    Restart,
}

/// Validates a nickname according to the rules.
///
/// Returns the trimmed name if valid, or `Err` with a hint for the player.
pub fn validate_nickname(nickname: &str) -> Result<&str, &'static str> {
    let trimmed = nickname.trim();
    let length = trimmed.chars().count();

    if length < NICKNAME_MIN_LENGTH {
        return Err("Nickname must be at least 2 characters");
    }

    if length > NICKNAME_MAX_LENGTH {
        return Err("Nickname must be at most 10 characters");
    }

    Ok(trimmed)
}

/// Compute the successor of `state` under `action`.
pub fn reduce(catalog: &QuestionCatalog, state: &Session, action: Action) -> Session {
    match action {
        Action::Start {
            nickname,
            session_id,
        } => {
            if state.phase != Phase::NotStarted {
                return state.clone();
            }
            match validate_nickname(&nickname) {
                Ok(trimmed) => Session {
                    phase: Phase::Playing,
                    session_id,
                    nickname: trimmed.to_string(),
                    ..Session::default()
                },
                Err(_) => state.clone(),
            }
        }

        Action::Tick => {
            if state.phase != Phase::Playing || state.answered || state.timer == 0 {
                return state.clone();
            }
            Session {
                timer: state.timer - 1,
                ..state.clone()
            }
        }

        Action::Answer { selected } => {
            if state.phase != Phase::Playing || state.answered {
                return state.clone();
            }
            if selected.is_some_and(|index| index >= OPTION_COUNT) {
                return state.clone();
            }
            let Some(question) = catalog.get(state.question_index) else {
                return state.clone();
            };

            let correct = question.is_correct(selected);
            let gained = calculate_score(correct, state.timer);
            let mut answers = state.answers.clone();
            answers.push(AnswerRecord {
                question_id: question.id,
                selected,
                correct,
                score: gained,
                time_remaining: state.timer,
            });

            Session {
                answered: true,
                selected,
                score: state.score + gained,
                answers,
                ..state.clone()
            }
        }

        Action::Advance { at } => {
            if state.phase != Phase::Playing || !state.answered {
                return state.clone();
            }
            let next_index = state.question_index + 1;
            if next_index >= catalog.len() {
                return Session {
                    phase: Phase::Result,
                    completed_at: Some(at),
                    ..state.clone()
                };
            }
            if catalog.block_of(next_index) != catalog.block_of(state.question_index) {
                // Stay on the last question of the finished block until the
                // player continues.
                return Session {
                    phase: Phase::CategoryTransition,
                    ..state.clone()
                };
            }
            next_question(state, next_index)
        }

        Action::ContinueCategory => {
            let next_index = state.question_index + 1;
            if state.phase != Phase::CategoryTransition || next_index >= catalog.len() {
                return state.clone();
            }
            Session {
                phase: Phase::Playing,
                ..next_question(state, next_index)
            }
        }

        Action::ShowRanking => match state.phase {
            Phase::NotStarted | Phase::Result => Session {
                phase: Phase::Ranking,
                ..state.clone()
            },
            _ => state.clone(),
        },

        Action::ShowResult => {
            if state.phase != Phase::Ranking {
                return state.clone();
            }
            if state.answers.is_empty() {
                Session::default()
            } else {
                Session {
                    phase: Phase::Result,
                    ..state.clone()
                }
            }
        }

        Action::Restart => Session::default(),
    }
}

fn next_question(state: &Session, next_index: usize) -> Session {
    Session {
        question_index: next_index,
        timer: MAX_TIME,
        answered: false,
        selected: None,
        ..state.clone()
    }
}
