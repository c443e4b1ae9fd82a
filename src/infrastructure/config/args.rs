//! Command-line arguments.

use super::app_config::LogLevel;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Global flags and the subcommand to run.
#[derive(Debug, Parser)]
#[command(
    name = "lazy-gallery",
    version,
    about = "Terminal client for a lazy-loading image gallery",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH", global = true)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    /// Image server base URL.
    #[arg(long, value_name = "URL", env = "GALLERY_SERVER_URL", global = true)]
    pub server_url: Option<String>,

    /// Per-request timeout in seconds.
    #[arg(long, value_name = "SECS", global = true)]
    pub timeout_secs: Option<u64>,

    /// Total attempts per request, including the first.
    #[arg(long, value_name = "N", global = true)]
    pub max_attempts: Option<u32>,

    /// Subcommand; `browse` when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl CliArgs {
    /// Subcommand to run, `browse` when none was given.
    #[must_use]
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Browse)
    }
}

/// What to do after loading the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Browse the gallery in the terminal.
    Browse,

    /// Load the gallery once and write the resulting HTML.
    Export {
        /// Scroll offset of the viewport before writing.
        #[arg(long, default_value_t = 0)]
        offset: u32,

        /// Output file. Writes to stdout when omitted.
        #[arg(short, long, value_name = "PATH")]
        out: Option<PathBuf>,
    },

    /// Submit a rating by control id, e.g. `abc-star-4`, then reload.
    Rate {
        /// Star option control id.
        control_id: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_browse() {
        let args = CliArgs::parse_from(["lazy-gallery"]);
        assert_eq!(args.command(), Command::Browse);
    }

    #[test]
    fn test_export_args() {
        let args = CliArgs::parse_from([
            "lazy-gallery",
            "export",
            "--offset",
            "40",
            "-o",
            "out.html",
        ]);
        assert_eq!(
            args.command(),
            Command::Export {
                offset: 40,
                out: Some(PathBuf::from("out.html")),
            }
        );
    }

    #[test]
    fn test_rate_with_global_flag_after_subcommand() {
        let args = CliArgs::parse_from([
            "lazy-gallery",
            "rate",
            "a-star-5",
            "--server-url",
            "http://localhost:4000",
        ]);
        assert_eq!(
            args.command(),
            Command::Rate {
                control_id: "a-star-5".to_string()
            }
        );
        assert_eq!(args.server_url.as_deref(), Some("http://localhost:4000"));
    }
}
