use thiserror::Error;

/// A dish draft that failed one of the menu's input constraints.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Dish name must not be empty")]
    EmptyName,
    #[error("Dish description must not be empty")]
    EmptyDescription,
    #[error("A course must be selected")]
    MissingCourse,
    #[error("Price is not a number: {0}")]
    InvalidPrice(String),
    #[error("Price must be a positive number")]
    NonPositivePrice,
}

/// Failure reported by a key-value store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to serialize '{key}': {reason}")]
    Serialization { key: String, reason: String },
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid dish: {0}")]
    Validation(#[from] ValidationError),
    #[error("No dish at position {index} (menu has {len})")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Persistence failed: {0}")]
    Persistence(#[from] StoreError),
    /// The menu change was saved but its history entry was not.
    #[error("'{action}' was saved but not recorded in history: {source}")]
    HistoryNotRecorded {
        action: String,
        #[source]
        source: Box<DomainError>,
    },
}

pub type DomainResult<T> = Result<T, DomainError>;
