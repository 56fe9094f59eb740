use anyhow::Result;
use tracing::info;

use sv_reward::RewardConfig;

use crate::cli::ConfigArgs;
use crate::util::write_json_pretty;

pub fn run(args: ConfigArgs) -> Result<()> {
    let config = RewardConfig::default();
    config.validate()?;

    write_json_pretty(&args.out, &config)?;
    info!(path = %args.out.display(), "wrote default reward config");

    Ok(())
}
