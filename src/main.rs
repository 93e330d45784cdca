// rasm - generate one image from a description (Arabic or English)

use clap::Parser;
use rasm::{
    logger::{LogLevel, LoggerConfig},
    AspectRatio, Config, GenerationOrchestrator, GenerationSession, GenerationState, Style,
};
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Rewrite a description with a text model, then render it with an image model", long_about = None)]
struct Args {
    /// Description of the image to generate
    #[arg(required = true, num_args = 1..)]
    prompt: Vec<String>,

    /// Visual style, e.g. "Cinematic", "3D Render", "OilPainting"
    #[arg(short, long, default_value = "None")]
    style: Style,

    /// Aspect ratio: 1:1, 3:4, 9:16, 4:3 or 16:9
    #[arg(short, long, default_value = "1:1")]
    ratio: AspectRatio,

    /// Output file (defaults to generated.<ext> based on the returned image type)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Also append log lines to this file
    #[arg(long)]
    log_file: Option<String>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn prompt(&self) -> String {
        self.prompt.join(" ")
    }

    fn logger_config(&self) -> LoggerConfig {
        let level = if self.verbose {
            LogLevel::Debug
        } else {
            LogLevel::Info
        };
        let config = LoggerConfig::development().with_level(level);
        match &self.log_file {
            Some(path) => config.with_file_output(path),
            None => config,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let dotenv_loaded = dotenv::dotenv().is_ok();

    rasm::logger::init_with_config(args.logger_config())?;

    if dotenv_loaded {
        log::info!("✅ .env file loaded successfully");
    } else {
        log::warn!("⚠️  No .env file found, using system environment variables");
    }

    let config = Config::from_env();
    rasm::logger::log_config_info(&config);

    let orchestrator = GenerationOrchestrator::from_config(&config).await;
    let session = GenerationSession::new(orchestrator);

    log::info!(
        "🎨 Generating \"{}\" ({}, {})",
        args.prompt(),
        args.style.option().label,
        args.ratio.option().label
    );
    let task = session.submit(args.prompt(), args.style, args.ratio)?;
    task.await?;

    match session.snapshot().state {
        GenerationState::Success(image) => {
            let path = args
                .out
                .unwrap_or_else(|| PathBuf::from(format!("generated.{}", image.extension())));
            fs::write(&path, image.bytes())?;
            log::info!("🖼️  Saved {} bytes to {}", image.len(), path.display());
            Ok(())
        }
        GenerationState::Error(message) => {
            log::error!("❌ {}", message);
            Err(message.into())
        }
        state => Err(format!("Unexpected state after generation: {:?}", state).into()),
    }
}
