// Library interface for RecoveryRS modules
// This allows integration tests and benches to access the core functionality

pub mod config;
pub mod error;
pub mod export;
pub mod import;
pub mod logging;
pub mod models;
pub mod muscles;
pub mod progress;
pub mod recovery;

// Re-export commonly used types for convenience
pub use models::*;
pub use muscles::Muscle;
pub use recovery::{
    MuscleStatus, Recommendation, RecoveryEstimator, RecoveryReport, RecoveryStatus,
};
pub use progress::ExerciseProgress;
pub use error::{RecoveryRsError, Result};
pub use logging::{LogConfig, LogFormat, LogLevel};
