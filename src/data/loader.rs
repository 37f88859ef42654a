use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::CatalogError;
use crate::models::{Category, Question};

use super::catalog::{QuestionCatalog, DEFAULT_BLOCK_SIZE};

/// On-disk shape of a question bank.
#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default = "default_block_size")]
    block_size: usize,
    categories: Vec<Category>,
    questions: Vec<Question>,
}

fn default_block_size() -> usize {
    DEFAULT_BLOCK_SIZE
}

/// Read and validate a question bank from a JSON file.
pub fn load_questions_from_json<P: AsRef<Path>>(path: P) -> Result<QuestionCatalog, CatalogError> {
    let path = path.as_ref();
    let json_content = fs::read_to_string(path).map_err(|source| CatalogError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let catalog = parse_questions(&json_content)?;
    tracing::info!(
        path = %path.display(),
        questions = catalog.len(),
        categories = catalog.categories().len(),
        "loaded question bank"
    );
    Ok(catalog)
}

/// Validate a question bank held in memory.
pub fn parse_questions(json_content: &str) -> Result<QuestionCatalog, CatalogError> {
    let file: CatalogFile = serde_json::from_str(json_content)?;
    QuestionCatalog::new(file.categories, file.block_size, file.questions)
}
