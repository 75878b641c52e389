use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;

/// Log level options for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    Off,
    /// Error messages only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    Info,
    /// Debug messages, including coerced data
    Debug,
    /// Trace-level messages
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

#[derive(Parser)]
#[command(name = "pagecraft")]
#[command(about = "pagecraft - copy, merge, translate and resolve page-builder documents")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Set log level (off, error, warn, info, debug, trace)
    /// If not specified, uses the config file value
    #[arg(short = 'l', long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Enable verbose logging (shortcut for --log-level=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (TOML, YAML or JSON)
    #[arg(short = 'C', long, global = true, env = "PAGECRAFT_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Component manifest and document shared by most commands.
#[derive(clap::Args, Debug, Clone)]
pub struct DocumentArgs {
    /// Component manifest (JSON)
    #[arg(short, long)]
    pub manifest: PathBuf,

    /// Page document (JSON)
    #[arg(short, long)]
    pub document: PathBuf,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check a manifest, and optionally a document against it
    Validate {
        /// Component manifest (JSON)
        #[arg(short, long)]
        manifest: PathBuf,

        /// Page document (JSON)
        #[arg(short, long)]
        document: Option<PathBuf>,
    },

    /// Rewrite a document with legacy inline elements hoisted
    Normalize {
        /// Page document (JSON)
        document: PathBuf,
    },

    /// Duplicate an element and its subtree inside a document
    Copy {
        #[command(flatten)]
        input: DocumentArgs,

        /// Key of the element to duplicate
        #[arg(short, long)]
        element: String,

        /// Explicit replacement, as `namespace:old=new` (e.g. `file:a=b`)
        #[arg(long = "seed", value_name = "NS:OLD=NEW")]
        seeds: Vec<String>,
    },

    /// Merge an incoming document over a base document
    Merge {
        /// Component manifest (JSON)
        #[arg(short, long)]
        manifest: PathBuf,

        /// Base document (JSON)
        #[arg(long)]
        base: PathBuf,

        /// Incoming document (JSON)
        #[arg(long)]
        incoming: PathBuf,
    },

    /// Extract translatable text from a document
    Extract {
        #[command(flatten)]
        input: DocumentArgs,

        /// Device that dynamic options are evaluated for (defaults to the base)
        #[arg(long)]
        device: Option<String>,
    },

    /// Apply translated text to a document
    ApplyTranslations {
        #[command(flatten)]
        input: DocumentArgs,

        /// Translations as produced by `extract` (JSON)
        #[arg(short, long)]
        translations: PathBuf,

        /// Device that dynamic options are evaluated for (defaults to the base)
        #[arg(long)]
        device: Option<String>,
    },

    /// Resolve the props of one element for a device
    Resolve {
        #[command(flatten)]
        input: DocumentArgs,

        /// Key of the element to resolve (defaults to the root)
        #[arg(short, long)]
        element: Option<String>,

        /// Device to resolve for (defaults to the base)
        #[arg(long)]
        device: Option<String>,

        /// Theme palette (JSON)
        #[arg(long)]
        theme: Option<PathBuf>,

        /// Pages, files and element ids (JSON)
        #[arg(long)]
        resources: Option<PathBuf>,
    },
}
