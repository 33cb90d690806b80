use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenerateError {
    #[error(
        "password length {length} is too short for {required} required character classes"
    )]
    InsufficientLength { length: usize, required: usize },

    #[error("entropy source unavailable: {0}")]
    Entropy(String),
}
