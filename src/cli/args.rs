//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Live HTML/CSS/JS playground
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true, disable_version_flag = true)]
pub struct Cli {
    /// Print version (`-V` is verbose)
    #[arg(short = 'v', long, action = clap::ArgAction::Version)]
    version: Option<bool>,

    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: sandpen.toml)
    #[arg(short = 'C', long, global = true, default_value = "sandpen.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Workspace directory holding the buffer files (default: config file's directory, or cwd)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub workspace: Option<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Write the starter project into the workspace
    #[command(visible_alias = "i")]
    Init {
        /// Overwrite existing buffer files
        #[arg(short, long)]
        force: bool,
    },

    /// Serve the live preview and relay its console
    #[command(visible_alias = "s")]
    Serve {
        /// Open a shared link (or bare `#p=` token) instead of the saved project
        #[arg(long, value_name = "LINK")]
        share: Option<String>,

        /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
        #[arg(short, long)]
        interface: Option<std::net::IpAddr>,

        /// Port number to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Re-render automatically after edits
        #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
        auto_run: Option<bool>,
    },

    /// Write the composed preview document
    #[command(visible_alias = "c")]
    Compose {
        /// Output file (default: stdout)
        #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
        output: Option<PathBuf>,
    },

    /// Print a share link for the workspace buffers
    Share {
        /// Base location of the link (default: the local server address)
        #[arg(short, long, value_hint = clap::ValueHint::Url)]
        base: Option<String>,
    },

    /// Decode a shared link into the workspace buffers
    #[command(visible_alias = "o")]
    Open {
        /// Shared link or bare `#p=` token
        link: String,
    },
}

impl Cli {
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Commands::Init { .. })
    }
}
