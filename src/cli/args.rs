//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use crate::redirect::Preset;

/// Legacy docs/blog redirect CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: redirect.toml, searched upward from cwd)
    #[arg(short = 'C', long, global = true, default_value = "redirect.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Start from an embedded redirect table (overrides `preset` in the config file)
    #[arg(short = 'P', long, global = true)]
    pub preset: Option<Preset>,

    /// Enable verbose output for debugging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Resolve legacy paths to their destination
    #[command(visible_alias = "r")]
    Resolve {
        #[command(flatten)]
        args: ResolveArgs,
    },

    /// Validate the redirect table
    #[command(visible_alias = "c")]
    Check,

    /// Serve redirects over HTTP
    #[command(visible_alias = "s")]
    Serve {
        /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
        #[arg(short, long)]
        interface: Option<std::net::IpAddr>,

        /// Port number to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Redirect status code (301, 302, 307 or 308)
        #[arg(short, long)]
        status: Option<u16>,

        /// Serve paths that are not redirected from this directory
        #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
        root: Option<PathBuf>,

        /// Reload redirect tables when the config file changes
        #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
        watch: Option<bool>,
    },

    /// Generate static deployments of the redirect table
    #[command(visible_alias = "e")]
    Emit {
        #[command(subcommand)]
        target: EmitCommand,
    },

    /// List embedded redirect tables
    Presets,
}

/// `emit` subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum EmitCommand {
    /// Client-side redirect script for the legacy site
    Script {
        /// Write to file instead of stdout
        #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
        output: Option<PathBuf>,
    },

    /// Static HTML redirect pages, one per legacy path
    Pages {
        /// Legacy paths. Use `-` to read paths from stdin (one per line).
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<String>,

        /// Output directory
        #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
        output: PathBuf,
    },
}

/// Resolve command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct ResolveArgs {
    /// Legacy paths to resolve. Use `-` to read paths from stdin (one per line).
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<String>,

    /// Print one JSON object per path
    #[arg(short, long)]
    pub json: bool,

    /// Show which rule produced each destination
    #[arg(short, long)]
    pub explain: bool,
}

#[allow(unused)]
impl Cli {
    pub const fn is_resolve(&self) -> bool {
        matches!(self.command, Commands::Resolve { .. })
    }
    pub const fn is_check(&self) -> bool {
        matches!(self.command, Commands::Check)
    }
    pub const fn is_serve(&self) -> bool {
        matches!(self.command, Commands::Serve { .. })
    }
    pub const fn is_emit(&self) -> bool {
        matches!(self.command, Commands::Emit { .. })
    }

    /// Whether the command builds a redirect table.
    pub const fn needs_table(&self) -> bool {
        !matches!(self.command, Commands::Presets)
    }
}
