use anyhow::Context;
use bytes::Bytes;
use clap::{Parser, Subcommand};
use pixelstore::config::Config;
use pixelstore::error::ImageError;
use pixelstore::pipeline::{parse_dimension, TransformEngine, TransformOutput};
use pixelstore::storage::KeyStrategy;
use std::path::{Path, PathBuf};

/// Pixelstore - store images and derive rotated/resized artifacts
#[derive(Parser, Debug)]
#[command(name = "pixelstore")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file (defaults apply when absent)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Store an image file and print its key
    Upload {
        /// Image file to store
        file: PathBuf,

        /// Store under this key instead of a random one
        #[arg(long)]
        key: Option<String>,
    },

    /// Re-encode a stored image
    Fetch {
        key: String,

        /// Output format token (defaults to the stored format)
        #[arg(short, long)]
        format: Option<String>,

        /// Write the encoded bytes here
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Rotate a stored image and store the artifact
    Rotate {
        key: String,

        /// Angle in degrees, kept verbatim in the artifact key
        #[arg(allow_hyphen_values = true)]
        angle: String,

        #[arg(short, long)]
        format: Option<String>,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Resize a stored image and store the artifact
    Resize {
        key: String,

        /// Target width (0 keeps the aspect ratio)
        width: String,

        /// Target height (0 keeps the aspect ratio)
        height: String,

        #[arg(short, long)]
        format: Option<String>,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate the configuration and exit
    CheckConfig,
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => Config::from_file(path)
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => Config::default(),
    };
    config
        .validate()
        .map_err(anyhow::Error::msg)
        .context("Invalid configuration")?;
    Ok(config)
}

fn emit(output: &TransformOutput, path: Option<&Path>) -> anyhow::Result<()> {
    if let Some(path) = path {
        std::fs::write(path, &output.data)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }
    match &output.key {
        Some(key) => println!("{}", key),
        None if path.is_none() => println!(
            "{} bytes ({}), use --output to save",
            output.data.len(),
            output.content_type
        ),
        None => {}
    }
    Ok(())
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;

    if let Err(e) = pixelstore::logging::init_subscriber(&config.logging) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let config_file = args
        .config
        .as_ref()
        .map_or_else(|| "<defaults>".to_string(), |p| p.display().to_string());
    tracing::info!(
        config_file = %config_file,
        storage_backend = ?config.storage.backend,
        storage_root = %config.storage.root,
        max_width = config.transform.max_width,
        max_height = config.transform.max_height,
        "Configuration loaded successfully"
    );

    if let Command::CheckConfig = args.command {
        println!("Configuration OK");
        return Ok(());
    }

    let engine = TransformEngine::from_config(&config)?;
    tracing::debug!(formats = ?engine.registry().formats(), "Codec registry ready");

    match args.command {
        Command::Upload { file, key } => {
            let data = std::fs::read(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let strategy = key.map_or(KeyStrategy::Random, KeyStrategy::Explicit);
            let key = engine.upload(Bytes::from(data), &strategy)?;
            println!("{}", key);
        }
        Command::Fetch {
            key,
            format,
            output,
        } => {
            let out = engine.fetch(&key, format.as_deref())?;
            emit(&out, output.as_deref())?;
        }
        Command::Rotate {
            key,
            angle,
            format,
            output,
        } => {
            let out = engine.rotate(&key, &angle, format.as_deref())?;
            emit(&out, output.as_deref())?;
        }
        Command::Resize {
            key,
            width,
            height,
            format,
            output,
        } => {
            let width = parse_dimension(&width)?;
            let height = parse_dimension(&height)?;
            let out = engine.resize(&key, width, height, format.as_deref())?;
            emit(&out, output.as_deref())?;
        }
        Command::CheckConfig => {}
    }

    Ok(())
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        match e.downcast_ref::<ImageError>() {
            Some(image_err) => eprintln!("Error ({}): {}", image_err.to_http_status(), image_err),
            None => eprintln!("Error: {:#}", e),
        }
        std::process::exit(1);
    }
}
