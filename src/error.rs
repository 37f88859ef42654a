use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Problems with a question bank.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse question bank: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("question bank has no categories")]
    NoCategories,

    #[error("block size must be at least 1")]
    EmptyBlocks,

    #[error("category {0} is listed more than once")]
    DuplicateCategory(String),

    #[error("expected {expected} questions ({categories} categories x {block_size}), found {found}")]
    WrongQuestionCount {
        expected: usize,
        found: usize,
        categories: usize,
        block_size: usize,
    },

    #[error("question {id} at position {index} belongs to {found}, expected {expected}")]
    OutOfBlock {
        id: u32,
        index: usize,
        found: String,
        expected: String,
    },

    #[error("question id {0} is used more than once")]
    DuplicateId(u32),

    #[error("question {id} has answer index {answer}, must be below 4")]
    InvalidAnswer { id: u32, answer: usize },
}

/// Leaderboard persistence failures. Never fatal to a running session.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("rankings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("rankings file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode rankings for {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Error type for quiz operations.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("failed to load questions: {0}")]
    Catalog(#[from] CatalogError),

    #[error("failed to open rankings: {0}")]
    Store(#[from] StoreError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to set up logging: {0}")]
    Logging(String),
}
