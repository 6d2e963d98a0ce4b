use anyhow::Result;
use clap::{Parser, Subcommand};

/// gym-site - Marketing site backend and contact form mailer
#[derive(Parser)]
#[command(name = "gym-site")]
#[command(about = "Serves the gym marketing site and its contact form endpoint", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Validate configuration and print it with secrets redacted
    CheckConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration; a bad config stops the process before anything binds
    let config = gym_site::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    gym_site::observability::init_observability(
        "gym-site",
        env!("CARGO_PKG_VERSION"),
        &config.logging,
        config.app.environment,
    )?;

    match cli.command {
        Commands::Serve { host, port } => gym_site::server::serve(config, host, port).await,
        Commands::CheckConfig => {
            println!("{config:#?}");
            Ok(())
        }
    }
}
