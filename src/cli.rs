//! Command-line interface for vadsplit
//!
//! Provides argument parsing using clap derive macros.

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

/// Speech segment extraction using recursive voice activity detection
#[derive(Parser, Debug)]
#[command(
    name = "vadsplit",
    version,
    about = "Speech segment extraction using recursive voice activity detection"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Audio file to segment (any container/codec ffmpeg understands)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Suppress the summary line on stderr
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose output (-v: per-segment log, -vv: debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Write each accepted segment as a WAV file into this directory
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Classifier backend
    #[arg(long, value_name = "BACKEND", value_enum, default_value = "webrtc")]
    pub classifier: ClassifierBackend,

    /// Maximum accepted segment duration (e.g. 15s, 1m30s)
    #[arg(long, value_name = "DURATION", value_parser = parse_secs)]
    pub max_duration: Option<f64>,

    /// Minimum accepted segment duration (e.g. 2s)
    #[arg(long, value_name = "DURATION", value_parser = parse_secs)]
    pub min_duration: Option<f64>,
}

/// Selectable classifier backends
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierBackend {
    /// WebRTC voice activity detector
    Webrtc,
    /// RMS energy threshold
    Energy,
}

/// Parse a duration string into seconds.
///
/// Supports bare numbers (seconds) and any format accepted by `humantime`:
/// single-unit (`15s`, `2m`) and compound (`1m30s`).
fn parse_secs(s: &str) -> Result<f64, String> {
    let s = s.trim();
    // Bare number → seconds
    if let Ok(secs) = s.parse::<f64>() {
        return Ok(secs);
    }
    humantime::parse_duration(s)
        .map(|d| d.as_secs_f64())
        .map_err(|e| e.to_string())
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP upload endpoint
    Serve {
        /// Listen address (default: 127.0.0.1:8009)
        #[arg(long, value_name = "ADDR")]
        listen: Option<String>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_name = "SHELL")]
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_file_mode() {
        let cli = Cli::try_parse_from(["vadsplit", "input.mp4"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.file.unwrap().to_str().unwrap(), "input.mp4");
        assert_eq!(cli.classifier, ClassifierBackend::Webrtc);
    }

    #[test]
    fn parses_serve_mode() {
        let cli = Cli::try_parse_from(["vadsplit", "serve", "--listen", "0.0.0.0:9000"]).unwrap();
        match cli.command {
            Some(Commands::Serve { listen }) => {
                assert_eq!(listen.as_deref(), Some("0.0.0.0:9000"));
            }
            _ => panic!("expected serve command"),
        }
    }

    #[test]
    fn parses_classifier_backend() {
        let cli = Cli::try_parse_from(["vadsplit", "--classifier", "energy", "a.wav"]).unwrap();
        assert_eq!(cli.classifier, ClassifierBackend::Energy);
    }

    #[test]
    fn parse_secs_accepts_bare_numbers() {
        assert_eq!(parse_secs("15").unwrap(), 15.0);
        assert_eq!(parse_secs("2.5").unwrap(), 2.5);
    }

    #[test]
    fn parse_secs_accepts_humantime() {
        assert_eq!(parse_secs("15s").unwrap(), 15.0);
        assert_eq!(parse_secs("1m30s").unwrap(), 90.0);
    }

    #[test]
    fn parse_secs_rejects_garbage() {
        assert!(parse_secs("soon").is_err());
    }

    #[test]
    fn duration_overrides_parse() {
        let cli = Cli::try_parse_from([
            "vadsplit",
            "--max-duration",
            "10s",
            "--min-duration",
            "1",
            "a.wav",
        ])
        .unwrap();
        assert_eq!(cli.max_duration, Some(10.0));
        assert_eq!(cli.min_duration, Some(1.0));
    }
}
