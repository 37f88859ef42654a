mod question;
mod record;

pub use question::{Category, Question, OPTION_COUNT};
pub use record::{AnswerRecord, CategoryScore, PlayerResult};
