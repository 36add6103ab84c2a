use clap::Parser;
use deploy_scripts::{cli::Cli, config::DeployConfig, errors::ScriptError};

#[tokio::main]
async fn main() -> Result<(), ScriptError> {
    let Cli { global, command } = Cli::parse();

    tracing_subscriber::fmt().pretty().init();

    let config = DeployConfig::load(global.config.as_deref())?;

    command.run(&global, &config).await
}
