//! Error types reported to the host application
//!
//! Every rejection is returned to the caller; the simulation never aborts.

/// Simulation errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimError {
    /// Row count, risk tier or canvas size outside the supported set
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Layout changes must wait until every ball has been removed
    #[error("cannot reconfigure while {live} ball(s) are on the board")]
    ConfigurationWhileActive { live: usize },

    /// Bets must be positive
    #[error("invalid bet amount {0}: must be positive")]
    InvalidBet(i64),
}

/// Settings persistence errors
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("settings I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = SimError::ConfigurationWhileActive { live: 3 };
        assert_eq!(
            err.to_string(),
            "cannot reconfigure while 3 ball(s) are on the board"
        );
        assert_eq!(
            SimError::InvalidBet(0).to_string(),
            "invalid bet amount 0: must be positive"
        );
    }
}
