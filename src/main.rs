use std::path::PathBuf;
use clap::Parser;
use tmx_loader::{load_map_with, AssetManager, FileProtocol, LoaderConfig};

/// Loads a Tiled map and prints the scene graph built from it.
#[derive(Parser, Debug)]
#[command(name = "tmx_loader", version)]
struct Args {
    #[arg(value_name = "MAP", help = "Map file to load")]
    map: String,

    #[arg(long, value_name = "FILE", help = "YAML file with loader options")]
    config: Option<PathBuf>,

    #[arg(long, value_name = "DIR", help = "Directory that relative paths are read from")]
    root: Option<String>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    #[cfg(feature = "profile")]
    let _guard = start_profiling()?;

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => LoaderConfig::load(path)?,
        None => LoaderConfig::default(),
    };
    let mut builder = AssetManager::builder().default_protocol(FileProtocol);
    if let Some(root) = args.root {
        builder = builder.path_prefix(root);
    }
    let manager = builder.build();
    let graph = load_map_with(&manager, &args.map, &config)?;
    print!("{graph}");
    Ok(())
}

/// Records spans to a chrome trace file until the guard is dropped.
#[cfg(feature = "profile")]
fn start_profiling() -> anyhow::Result<tracing_chrome::FlushGuard> {
    use tracing_subscriber::prelude::*;
    let (chrome_layer, guard) = tracing_chrome::ChromeLayerBuilder::new().build();
    tracing::subscriber::set_global_default(tracing_subscriber::registry().with(chrome_layer))?;
    Ok(guard)
}
