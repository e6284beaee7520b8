use clap::Parser;
use dotenv::dotenv;
use scripts::{cli::Cli, config::EnvConfig, errors::ScriptError, tx::env::setup_env};

#[tokio::main]
async fn main() -> Result<(), ScriptError> {
    // Load .env file
    dotenv().ok();

    let Cli {
        override_nonce,
        artifacts_dir,
        output,
        command,
    } = Cli::parse();

    tracing_subscriber::fmt().pretty().init();

    // Build our signing environment
    let config = EnvConfig::from_env()?;
    let env = setup_env(config, override_nonce).await?;

    command.run(&env, &artifacts_dir, &output).await
}
