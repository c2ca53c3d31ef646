/// Errors that stop the game from starting or running. Gameplay endings
/// (walls, self bites, a full board) are not errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    #[error("Invalid value {value:?} for {key}: expected an integer")]
    NotANumber { key: &'static str, value: String },

    #[error("{key} must be between {min} and {max}, got {value}")]
    OutOfRange {
        key: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
