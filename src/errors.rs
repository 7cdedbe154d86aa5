use std::fmt;

/// Custom error types for orchestrator-facing operations.
///
/// Engine move selection deliberately returns `Option` rather than `Result`:
/// the absence of a legal move is a terminal position, not a fault.
#[derive(Debug, Clone)]
pub enum EngineError {
    /// A SAN string that does not describe a legal move in the current position
    InvalidMove(String),
    /// A FEN string or board state the rules engine rejected
    InvalidPosition(String),
    /// A move was submitted after the game already reached a terminal state
    GameOver(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidMove(msg) => write!(f, "Invalid move: {}", msg),
            EngineError::InvalidPosition(msg) => write!(f, "Invalid position: {}", msg),
            EngineError::GameOver(msg) => write!(f, "Game is over: {}", msg),
        }
    }
}

impl std::error::Error for EngineError {}

// Convenience type alias
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = EngineError::InvalidMove("Qxz9".to_string());
        assert_eq!(error.to_string(), "Invalid move: Qxz9");

        let error = EngineError::GameOver("checkmate".to_string());
        assert_eq!(error.to_string(), "Game is over: checkmate");
    }
}
