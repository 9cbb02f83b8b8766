use thiserror::Error;

#[derive(Error, Debug)]
pub enum CriteriaError {
    #[error("Attribute '{0}' has no operators")]
    NoOperators(String),

    #[error("Duplicate attribute: {0}")]
    DuplicateAttribute(String),

    #[error("Duplicate operator '{operator}' on attribute '{attribute}'")]
    DuplicateOperator { attribute: String, operator: String },

    #[error("Duplicate option '{option}' for operator '{operator}' on attribute '{attribute}'")]
    DuplicateOption {
        attribute: String,
        operator: String,
        option: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] confique::Error),
}

pub type Result<T> = std::result::Result<T, CriteriaError>;
