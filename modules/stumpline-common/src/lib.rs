pub mod config;
pub mod error;
pub mod types;

pub use config::{load_input, CollectorInput, EnvConfig};
pub use error::CollectorError;
pub use types::{CandidateElection, CollectedTweet};
