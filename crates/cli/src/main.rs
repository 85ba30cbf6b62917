use clap::Parser;
use tracing_subscriber::EnvFilter;

use sw_cli::cli::{Cli, Command, ConfigCommand};
use sw_cli::context::CliContext;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_cli_tracing();

    match &cli.command {
        Command::Site(cmd) => {
            let ctx = CliContext::load(&cli)?;
            sw_cli::cli::site::run(&ctx, cmd).await
        }
        Command::Collection(cmd) => {
            let ctx = CliContext::load(&cli)?;
            sw_cli::cli::collection::run(&ctx, cmd).await
        }
        Command::Computer(cmd) => {
            let ctx = CliContext::load(&cli)?;
            sw_cli::cli::computer::run(&ctx, cmd).await
        }
        Command::Package(cmd) => {
            let ctx = CliContext::load(&cli)?;
            sw_cli::cli::package::run(&ctx, cmd).await
        }
        Command::Program(cmd) => {
            let ctx = CliContext::load(&cli)?;
            sw_cli::cli::program::run(&ctx, cmd).await
        }
        Command::Advert(cmd) => {
            let ctx = CliContext::load(&cli)?;
            sw_cli::cli::advert::run(&ctx, cmd).await
        }
        Command::Schedule(cmd) => {
            let ctx = CliContext::load(&cli)?;
            sw_cli::cli::schedule::run(&ctx, cmd).await
        }
        Command::Folder(cmd) => {
            let ctx = CliContext::load(&cli)?;
            sw_cli::cli::folder::run(&ctx, cmd).await
        }
        Command::Client(cmd) => {
            let ctx = CliContext::load(&cli)?;
            sw_cli::cli::client::run(&ctx, cmd).await
        }
        Command::Config(ConfigCommand::Validate) => {
            let ctx = CliContext::load(&cli)?;
            let valid = sw_cli::cli::config::validate(&ctx.config, &ctx.config_path);
            if !valid {
                std::process::exit(1);
            }
            Ok(())
        }
        Command::Config(ConfigCommand::Show) => {
            let ctx = CliContext::load(&cli)?;
            sw_cli::cli::config::show(&ctx.config);
            Ok(())
        }
        Command::Config(ConfigCommand::SetSecret) => {
            let ctx = CliContext::load(&cli)?;
            sw_cli::cli::config::set_secret(&ctx.config)
        }
        Command::Config(ConfigCommand::GetSecret) => {
            let ctx = CliContext::load(&cli)?;
            sw_cli::cli::config::get_secret(&ctx.config)
        }
        Command::Doctor => {
            let ctx = CliContext::load(&cli)?;
            let passed = sw_cli::cli::doctor::run(&ctx).await?;
            if !passed {
                std::process::exit(1);
            }
            Ok(())
        }
        Command::Version => {
            println!("sitewrench {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// Initialize compact stderr-only tracing for CLI one-shot commands.
///
/// Defaults to `warn` level so diagnostic output does not pollute stdout.
fn init_cli_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
