//! DSC tree CLI Application

mod cli;

use clap::Parser as _;
use cli::{Cli, Commands};
use dsc_sdk::commands::{build_dsc_tree, tree_proof, tree_schema, verify_tree};
use dsc_sdk::common::BuildConfig;

fn init_tracing() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .with_target(false)
        .try_init()
        .map_err(|e| eyre::eyre!("Failed to initialize tracing: {:?}", e))?;

    Ok(())
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> eyre::Result<()> {
    // Load .env file (fails silently if not found)
    let _ = dotenvy::dotenv();

    init_tracing()?;

    let cli = Cli::parse();

    let res = match cli.command {
        Commands::Build { args } => match BuildConfig::try_from(args) {
            Ok(config) => build_dsc_tree(config).await.map(|_| ()),
            Err(e) => Err(e),
        },
        Commands::Proof { args } => tree_proof(args.tree, args.index, args.out)
            .await
            .map(|_| ()),
        Commands::Verify { args } => verify_tree(args.tree).await.map(|_| ()),
        Commands::Schema => tree_schema(),
    };

    if let Err(e) = res {
        tracing::error!("Error: {:?}", e);
        std::process::exit(1);
    }

    Ok(())
}
