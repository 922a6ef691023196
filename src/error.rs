use thiserror::Error;

#[derive(Error, Debug)]
pub enum VizError {
    #[error("Invalid rank: {0}")]
    InvalidRank(char),

    #[error("Invalid suit: {0}")]
    InvalidSuit(char),

    #[error("Invalid card notation: {0}")]
    InvalidCardNotation(String),

    #[error("Invalid board notation: {0}")]
    InvalidBoardNotation(String),

    #[error("Hand must be exactly 2 cards")]
    InvalidHandSize,

    #[error("Board cannot exceed 5 cards")]
    InvalidBoardSize,

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type VizResult<T> = Result<T, VizError>;
