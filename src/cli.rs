use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use sv_reward::terms::DEFAULT_TOP_K;

#[derive(Parser, Debug)]
#[command(
    name = "sv-reward",
    version,
    about = "Reward scoring for two-line transcript summaries"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Prepare(PrepareArgs),
    Score(ScoreArgs),
    Check(CheckArgs),
    Config(ConfigArgs),
}

#[derive(Args, Debug, Clone)]
pub struct PrepareArgs {
    #[arg(long)]
    pub in_jsonl: PathBuf,

    #[arg(long)]
    pub out_jsonl: PathBuf,

    /// 0 = no limit
    #[arg(long, default_value_t = 0)]
    pub limit: usize,

    #[arg(long, default_value_t = DEFAULT_TOP_K)]
    pub top_k: usize,
}

#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    #[arg(long)]
    pub dataset: PathBuf,

    #[arg(long)]
    pub completions: PathBuf,

    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long, default_value = "reports/score_report.json")]
    pub report_path: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    #[arg(long, conflicts_with = "candidate_file")]
    pub candidate: Option<String>,

    #[arg(long)]
    pub candidate_file: Option<PathBuf>,

    #[arg(long)]
    pub evidence_file: Option<PathBuf>,

    #[arg(long = "term")]
    pub terms: Vec<String>,

    #[arg(long, default_value_t = 800.0)]
    pub target_chars: f64,

    #[arg(long, default_value_t = 0.0)]
    pub duration_seconds: f64,

    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[arg(long, default_value = "reward_config.json")]
    pub out: PathBuf,
}
