use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use sandwatch_cli::{collect_records, load_config, scan_files};
use sandwatch_core::store::{store_batch, JsonLinesStore};
use sandwatch_detector::BlockScanner;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "sandwatch", version, about = "Detecção de sandwich attacks em blocos Solana")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Varre dumps de blocos e emite os sandwiches encontrados
    Scan(ScanArgs),
}

#[derive(Args)]
struct ScanArgs {
    /// Configuração do scanner em JSON
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Acrescenta os registros em um arquivo JSON-lines em vez do stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// JSON indentado no stdout
    #[arg(long)]
    pretty: bool,

    /// Arquivos com a resposta de `getBlock`
    #[arg(required = true, value_name = "BLOCK_FILE")]
    blocks: Vec<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // logs no stderr; o stdout fica reservado para os registros
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Scan(args) => scan(args).await,
    }
}

async fn scan(args: ScanArgs) -> Result<()> {
    let config = load_config(args.config.as_deref()).await?;
    let scanner = Arc::new(BlockScanner::new(config));

    info!("varrendo {} bloco(s)", args.blocks.len());
    let scans = scan_files(scanner, &args.blocks).await;
    let records = collect_records(&scans);

    match args.output {
        Some(path) => {
            let store = JsonLinesStore::open(&path).await?;
            let summary = store_batch(&store, &records).await;
            info!(
                "{}/{} sandwiches gravados em {}",
                summary.stored,
                summary.total,
                store.path().display()
            );
        }
        None => {
            let json = if args.pretty {
                serde_json::to_string_pretty(&records)?
            } else {
                serde_json::to_string(&records)?
            };
            println!("{}", json);
        }
    }
    Ok(())
}
