//! CLI argument definitions and parsing.
//!
//! Defines the command-line interface structure using clap:
//! - `Cli` - Main CLI entry point
//! - `Commands` - Available subcommands
//! - `GenerateArgs` - Flags of the `generate` subcommand

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use sdkgen_core::{LayoutOverrides, SdkOverrides};
use std::path::PathBuf;

/// Dropbox Go SDK generator.
///
/// Renders the hand-written SDK files, runs `stone` over the API
/// specification, and formats the result.
#[derive(Parser, Debug)]
#[command(name = "sdkgen")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging (debug level)
    #[arg(long, global = true)]
    pub verbose: bool,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate the Go SDK.
    ///
    /// Every flag is optional. Values come from the flag, then the config
    /// file, then the built-in default.
    ///
    /// # Examples
    ///
    /// ```bash
    /// # Defaults, run from the repository root
    /// sdkgen generate
    ///
    /// # Different package and SDK version
    /// sdkgen generate -p dropbox -s 6.1.0
    ///
    /// # Checkout elsewhere, custom templates
    /// sdkgen generate --root ../dropbox-sdk-go --templates ./templates
    /// ```
    Generate(GenerateArgs),

    /// Generate shell completions.
    ///
    /// Generates completion scripts for various shells that can be
    /// sourced or saved to enable tab completion for this CLI.
    Completions {
        /// Target shell for completion generation
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Flags of `sdkgen generate`.
#[derive(Args, Debug, Default, Clone, PartialEq, Eq)]
pub struct GenerateArgs {
    /// Go package name of the SDK root (default: dropbox)
    #[arg(short = 'p', long)]
    pub package: Option<String>,

    /// Numeric API version (default: 2)
    #[arg(short = 'v', long = "api-version")]
    pub api_version: Option<u32>,

    /// Default network domain (default: dropboxapi.com)
    #[arg(short = 'd', long = "domain")]
    pub domain: Option<String>,

    /// API host identifier (default: api)
    #[arg(short = 'a', long = "host-api")]
    pub host_api: Option<String>,

    /// Content host identifier (default: content)
    #[arg(short = 'c', long = "host-content")]
    pub host_content: Option<String>,

    /// Notify host identifier (default: notify)
    #[arg(short = 'n', long = "host-notify")]
    pub host_notify: Option<String>,

    /// SDK version string (default: 6.0.3)
    #[arg(short = 's', long = "sdk-version")]
    pub sdk_version: Option<String>,

    /// Repository root (default: current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// TOML config file with [sdk] and [layout] tables
    #[arg(long, env = "SDKGEN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory with template overrides (default: built-in templates)
    #[arg(long)]
    pub templates: Option<PathBuf>,

    /// Spec compiler executable (default: stone)
    #[arg(long)]
    pub stone: Option<String>,

    /// Formatter executable (default: goimports)
    #[arg(long)]
    pub formatter: Option<String>,
}

impl GenerateArgs {
    /// Parameter values given on the command line.
    #[must_use]
    pub fn sdk_overrides(&self) -> SdkOverrides {
        SdkOverrides {
            package: self.package.clone(),
            api_version: self.api_version,
            default_domain: self.domain.clone(),
            host_api: self.host_api.clone(),
            host_content: self.host_content.clone(),
            host_notify: self.host_notify.clone(),
            sdk_version: self.sdk_version.clone(),
        }
    }

    /// Layout values given on the command line.
    #[must_use]
    pub fn layout_overrides(&self) -> LayoutOverrides {
        LayoutOverrides {
            templates_dir: self.templates.clone(),
            stone: self.stone.clone(),
            formatter: self.formatter.clone(),
            ..LayoutOverrides::default()
        }
    }
}
