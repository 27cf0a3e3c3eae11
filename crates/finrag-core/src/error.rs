use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("corpus is empty")]
    EmptyCorpus,

    #[error("malformed corpus: {0}")]
    MalformedCorpus(String),

    #[error("lexical index not built yet; call build_index first")]
    IndexNotReady,

    #[error("top_k must be at least 1, got {0}")]
    InvalidTopK(usize),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
