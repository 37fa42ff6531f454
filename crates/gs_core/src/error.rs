use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("inventory item without weapon_class for player {player} in round {round_num}")]
    MissingWeaponClass { round_num: u32, player: String },

    #[error("polygon needs at least 3 vertices, got {vertices}")]
    DegeneratePolygon { vertices: usize },

    #[error("invalid z range: min {min} is greater than max {max}")]
    InvalidZRange { min: f64, max: f64 },

    #[error("min_players must be at least 1, got {value}")]
    InvalidMinPlayers { value: usize },

    #[error("no density samples for team {team} on side {side} in {area}")]
    EmptyDensitySample {
        team: String,
        side: String,
        area: String,
    },

    #[error("schema version mismatch: found {found}, expected {expected}")]
    SchemaVersionMismatch { found: u8, expected: u8 },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AnalysisError {
    /// Configuration errors are caller mistakes fixable before retrying;
    /// data-integrity errors mean the dataset itself is bad.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            AnalysisError::DegeneratePolygon { .. }
                | AnalysisError::InvalidZRange { .. }
                | AnalysisError::InvalidMinPlayers { .. }
        )
    }

    pub fn is_data_integrity(&self) -> bool {
        matches!(self, AnalysisError::MissingWeaponClass { .. })
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
