//! Session progress, timing and scoring.

mod machine;
pub mod scoring;
mod state;
mod timers;

pub use machine::GameMachine;
pub use state::{
    reduce, validate_nickname, Action, Phase, Session, NICKNAME_MAX_LENGTH, NICKNAME_MIN_LENGTH,
};
pub use timers::{SessionTimers, TimerEvent, TimerKind};
