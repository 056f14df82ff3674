use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::CONFIG_FILE_NAME;
use crate::pull::Category;
use crate::store::PROJECT_FILE_NAME;

#[derive(Parser)]
#[command(
    name = "baasync",
    version,
    about = "Pull backend-as-a-service project resources into a local project file"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file
    #[arg(long, global = true, default_value = CONFIG_FILE_NAME)]
    pub config: PathBuf,

    /// Path to the local project file
    #[arg(long, global = true, default_value = PROJECT_FILE_NAME)]
    pub project_file: PathBuf,

    /// API endpoint (overrides the config file)
    #[arg(long, global = true, env = "BAASYNC_ENDPOINT")]
    pub endpoint: Option<String>,

    /// API key with read scopes for every pulled resource
    #[arg(long, global = true, env = "BAASYNC_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Diagnostic log level (written to stderr)
    #[arg(long, global = true, value_enum, default_value = "off")]
    pub log_level: LogLevel,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create baasync.toml and an empty project file
    Init {
        /// Project ID the project file is bound to
        #[arg(long)]
        project_id: String,

        /// Human-readable project name
        #[arg(long)]
        project_name: Option<String>,
    },

    /// Pull remote resources into the project file
    Pull {
        /// Resource to pull; prompts when omitted
        resource: Option<PullResource>,

        /// Pull every remote item without prompting
        #[arg(long)]
        all: bool,

        /// Database IDs to pull collections from (repeatable)
        #[arg(long = "id", value_name = "DATABASE_ID")]
        ids: Vec<String>,

        /// Skip downloading function code
        #[arg(long)]
        no_code: bool,
    },

    /// List remote resources
    List {
        /// Resource type to list
        resource: ListResource,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
pub enum PullResource {
    All,
    Project,
    #[value(alias = "function")]
    Functions,
    #[value(alias = "collection")]
    Collections,
    #[value(alias = "bucket")]
    Buckets,
    #[value(alias = "team")]
    Teams,
    #[value(alias = "topic")]
    Topics,
}

impl PullResource {
    /// `None` stands for every category.
    pub fn category(self) -> Option<Category> {
        match self {
            PullResource::All => None,
            PullResource::Project => Some(Category::Project),
            PullResource::Functions => Some(Category::Functions),
            PullResource::Collections => Some(Category::Collections),
            PullResource::Buckets => Some(Category::Buckets),
            PullResource::Teams => Some(Category::Teams),
            PullResource::Topics => Some(Category::Topics),
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
pub enum ListResource {
    Functions,
    Databases,
    Buckets,
    Teams,
    Topics,
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_filter(self) -> Option<&'static str> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some("error"),
            LogLevel::Warn => Some("warn"),
            LogLevel::Info => Some("info"),
            LogLevel::Debug => Some("debug"),
            LogLevel::Trace => Some("trace"),
        }
    }
}
