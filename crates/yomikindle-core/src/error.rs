#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Unexpected content value: {0}")]
    UnexpectedValue(String),

    #[error("Invalid image: {0}")]
    Image(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("\"{rule}\" invalid rule for term {term}")]
    InvalidInflectionRule { term: String, rule: String },
}
