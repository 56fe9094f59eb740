pub mod config;
pub mod reward;
pub mod terms;

pub use config::RewardConfig;
pub use reward::{BatchContext, ItemContext, ParsedOutput, RewardEngine, Scorer, parse_output};
