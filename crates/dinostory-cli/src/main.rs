//! CLI entry point.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use dinostory_cli::{Cli, CliError, Commands, bootstrap, handlers};

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init()
        .ok();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Serve {
            port,
            functions_path,
            allow_origin,
            upstream_timeout_secs,
        } => {
            handlers::serve::execute(port, &functions_path, allow_origin, upstream_timeout_secs)
                .await?;
        }
        Commands::Story(args) => {
            // `story` never starts playback, so nothing is exported.
            let mut ctx = bootstrap(&args.client_config(), PathBuf::from("."), cli.verbose)?;
            handlers::story::execute(&mut ctx, &args).await?;
        }
        Commands::Read { story, out } => {
            let mut ctx = bootstrap(&story.client_config(), out, cli.verbose)?;
            handlers::read::execute(&mut ctx, &story).await?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err:#}");
        let code = err.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
        std::process::exit(code);
    }
}
