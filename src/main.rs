use std::sync::Arc;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use owo_colors::OwoColorize;
use tracing::Level;

use vadsplit::cli::{Cli, ClassifierBackend, Commands};
use vadsplit::config::Config;
use vadsplit::decode::{Decoder, FfmpegDecoder};
use vadsplit::segmenter::Engine;
use vadsplit::transport;
use vadsplit::vad::{ClassifierFactory, EnergyClassifierFactory, WebRtcClassifierFactory};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve { ref listen }) => {
            setup_tracing(cli.verbose);
            let config = load_config(&cli)?;
            let listen = listen.clone().unwrap_or(config.server.listen.clone());
            let engine = Arc::new(build_engine(&cli, &config)?);
            let decoder: Arc<dyn Decoder> = Arc::new(FfmpegDecoder::new(
                config.decoder.ffmpeg_path.clone(),
                config.engine.sample_rate,
            ));
            vadsplit::server::serve(&listen, engine, decoder).await?;
        }
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(shell, &mut Cli::command(), "vadsplit", &mut std::io::stdout());
        }
        None => {
            let Some(file) = cli.file.clone() else {
                Cli::command().print_help()?;
                std::process::exit(2);
            };
            run_file_command(&cli, &file).await?;
        }
    }

    Ok(())
}

/// Segment a single file and print the JSON result to stdout.
async fn run_file_command(cli: &Cli, file: &std::path::Path) -> Result<()> {
    let config = load_config(cli)?;
    let engine = build_engine(cli, &config)?;
    let decoder = FfmpegDecoder::new(
        config.decoder.ffmpeg_path.clone(),
        config.engine.sample_rate,
    );

    let input = tokio::fs::read(file).await?;
    let pcm = match decoder.decode(input).await {
        Ok(pcm) => pcm,
        Err(e) => {
            eprintln!("{}", format!("Error: {}", e).red());
            std::process::exit(1);
        }
    };

    let segments = match engine.segment(pcm) {
        Ok(segments) => segments,
        Err(e) => {
            eprintln!("{}", format!("Error: {}", e).red());
            std::process::exit(1);
        }
    };

    if let Some(ref dir) = cli.out_dir {
        std::fs::create_dir_all(dir)?;
        for (index, segment) in segments.iter().enumerate() {
            let name = format!("segment-{:03}-{:.2}s.wav", index, segment.start);
            vadsplit::wav::write_wav(&dir.join(name), &segment.data, config.engine.sample_rate)?;
        }
    }

    let encoded = transport::encode_segments(&segments);
    let json = if cli.pretty {
        serde_json::to_string_pretty(&encoded)?
    } else {
        serde_json::to_string(&encoded)?
    };
    println!("{}", json);

    if !cli.quiet {
        let speech_secs: f64 = segments.iter().map(|s| s.duration()).sum();
        eprintln!(
            "{} segment(s), {:.2}s of speech",
            segments.len(),
            speech_secs
        );
        if cli.verbose > 0 {
            for segment in &segments {
                eprintln!(
                    "  {:>8.2}s - {:>8.2}s  ({:.2}s, aggressiveness {})",
                    segment.start,
                    segment.end,
                    segment.duration(),
                    segment.aggressiveness
                );
            }
        }
    }

    Ok(())
}

/// Load configuration from file or use defaults.
///
/// Priority order:
/// 1. Custom config path from CLI (--config)
/// 2. Default config path (~/.config/vadsplit/config.toml)
/// 3. Built-in defaults with environment variable overrides
fn load_config(cli: &Cli) -> Result<Config> {
    let config = if let Some(ref path) = cli.config {
        Config::load(path)?
    } else {
        Config::load_or_default(&Config::default_path())?
    };

    Ok(config.with_env_overrides())
}

/// Build the engine from config plus CLI overrides.
fn build_engine(cli: &Cli, config: &Config) -> Result<Engine> {
    let mut engine_config = config.engine.clone();
    if let Some(max) = cli.max_duration {
        engine_config.max_segment_secs = max;
    }
    if let Some(min) = cli.min_duration {
        engine_config.min_segment_secs = min;
    }

    let factory: Arc<dyn ClassifierFactory> = match cli.classifier {
        ClassifierBackend::Webrtc => Arc::new(WebRtcClassifierFactory::new(
            engine_config.sample_rate,
        )),
        ClassifierBackend::Energy => Arc::new(EnergyClassifierFactory::new()),
    };

    Ok(Engine::new(engine_config, factory)?)
}

fn setup_tracing(verbose: u8) {
    let max_level = if verbose > 0 {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_max_level(max_level)
        .try_init();
}
