use thiserror::Error;

/// Errors that abort a run before any output is produced
#[derive(Debug, Error)]
pub enum OptimizeError {
    /// The blueprint has no pages at all
    #[error("blueprint contains no pages")]
    EmptyPageList,

    /// A page descriptor has an empty or whitespace-only id
    #[error("page at position {index} has a blank id")]
    BlankPageId { index: usize },

    /// Two page descriptors share an id
    #[error("duplicate page id: {id}")]
    DuplicatePageId { id: String },

    /// The blueprint base URL cannot be parsed as an absolute URL
    #[error("invalid base URL {url}: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// A configured forbidden-title pattern is not a valid regex
    #[error("invalid title pattern: {0}")]
    InvalidRulePattern(#[from] regex::Error),

    /// Reading or decoding configuration or input failed
    #[error("config error: {0}")]
    Config(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A per-page task panicked or was cancelled
    #[error("page worker failed: {0}")]
    Worker(String),
}

impl From<serde_json::Error> for OptimizeError {
    fn from(error: serde_json::Error) -> Self {
        OptimizeError::Config(Box::new(error))
    }
}

impl From<std::io::Error> for OptimizeError {
    fn from(error: std::io::Error) -> Self {
        OptimizeError::Config(Box::new(error))
    }
}
