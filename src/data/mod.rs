pub(crate) mod catalog;
mod loader;

pub use catalog::{QuestionCatalog, DEFAULT_BLOCK_SIZE};
pub use loader::{load_questions_from_json, parse_questions};
