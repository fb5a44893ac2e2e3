//! Clap derive structures for the `poolguard` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// poolguard -- pool maintenance tracker
#[derive(Debug, Parser)]
#[command(
    name = "poolguard",
    version,
    about = "Track pool water readings, chemical stock and maintenance tasks",
    long_about = "Record pH and chlorine readings, compute chemical doses, keep the \
        chemical stock and the recurring task list in sync with a hosted table \
        store, and ask a language model for a treatment plan.\n\n\
        Without a configured store (or with --offline) every command runs against \
        a built-in sample dataset.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config file to use instead of the platform default
    #[arg(long = "config", env = "POOLGUARD_CONFIG", global = true)]
    pub config_file: Option<PathBuf>,

    /// Table store URL (overrides config)
    #[arg(long, env = "POOLGUARD_STORE_URL", global = true)]
    pub store_url: Option<String>,

    /// Use the built-in sample data, never contact the store
    #[arg(long, env = "POOLGUARD_OFFLINE", global = true)]
    pub offline: bool,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "POOLGUARD_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Request timeout in seconds (overrides config)
    #[arg(long, env = "POOLGUARD_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Domain value enums ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum WaterArg {
    Clear,
    Cloudy,
    Green,
    Algae,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum UnitArg {
    /// Kilograms
    Kg,
    /// Litres
    #[value(alias = "l")]
    Litres,
    /// Plain count
    Units,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FrequencyArg {
    Daily,
    Weekly,
    Biweekly,
    Monthly,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CategoryArg {
    Cleaning,
    Mechanical,
    Chemical,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum EditModeArg {
    /// Toggles take effect
    Normal,
    /// The list is being rearranged; toggles are ignored
    Configuring,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the current reading, optionally recording a new one
    #[command(alias = "st")]
    Status(StatusArgs),

    /// Compute chemical doses for a pH reading
    Dose(DoseArgs),

    /// Show recent readings and the pH trend
    History,

    /// Manage the chemical stock
    #[command(alias = "inv")]
    Stock(StockArgs),

    /// Manage recurring maintenance tasks
    #[command(alias = "t")]
    Tasks(TasksArgs),

    /// Show the maintenance log
    Log,

    /// Ask the advisor for a treatment plan
    Advice,

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Status / Dose ────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct StatusArgs {
    /// Record a new pH reading (6.5-8.5)
    #[arg(long, allow_hyphen_values = true)]
    pub ph: Option<f64>,

    /// Record a new free chlorine reading in ppm (0-5)
    #[arg(long, allow_hyphen_values = true)]
    pub chlorine: Option<f64>,

    /// Record the observed water state
    #[arg(long, short = 'w')]
    pub water: Option<WaterArg>,
}

#[derive(Debug, Args)]
pub struct DoseArgs {
    /// pH to dose from (defaults to the current reading)
    #[arg(long)]
    pub ph: Option<f64>,

    /// pH to aim for (defaults to the configured target)
    #[arg(long)]
    pub target: Option<f64>,
}

// ── Stock ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct StockArgs {
    #[command(subcommand)]
    pub command: StockCommand,
}

#[derive(Debug, Subcommand)]
pub enum StockCommand {
    /// List every stock item
    #[command(alias = "ls")]
    List,

    /// List items below their target quantity
    Shortages,

    /// Change an item's quantity by a signed amount
    Adjust {
        /// Item id or name
        item: String,

        /// Amount to add (negative to consume)
        #[arg(allow_hyphen_values = true)]
        delta: f64,
    },

    /// Change an item's target quantity by a signed amount
    Target {
        /// Item id or name
        item: String,

        /// Amount to add (negative to lower)
        #[arg(allow_hyphen_values = true)]
        delta: f64,
    },

    /// Add a new stock item
    Add {
        /// Item name
        name: String,

        /// Quantity on hand
        #[arg(long, default_value = "0")]
        quantity: f64,

        /// Quantity to keep in stock
        #[arg(long, default_value = "0")]
        target: f64,

        /// Unit the item is counted in
        #[arg(long, default_value = "units")]
        unit: UnitArg,
    },

    /// Remove a stock item
    #[command(alias = "rm")]
    Remove {
        /// Item id or name
        item: String,
    },
}

// ── Tasks ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct TasksArgs {
    #[command(subcommand)]
    pub command: TasksCommand,
}

#[derive(Debug, Subcommand)]
pub enum TasksCommand {
    /// List tasks
    #[command(alias = "ls")]
    List {
        /// Only show tasks not yet done
        #[arg(long)]
        pending: bool,
    },

    /// Add a task to the top of the list
    Add {
        /// What needs doing
        description: String,

        #[arg(long, short = 'f', default_value = "weekly")]
        frequency: FrequencyArg,

        #[arg(long, short = 'c', default_value = "cleaning")]
        category: CategoryArg,
    },

    /// Flip a task between done and not done
    Toggle {
        /// Task id
        id: String,

        /// List mode to toggle under
        #[arg(long, default_value = "normal")]
        edit_mode: EditModeArg,
    },

    /// Remove a task
    #[command(alias = "rm")]
    Remove {
        /// Task id
        id: String,
    },
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// Print the config file path
    Path,

    /// Set a configuration value
    Set {
        /// Config key (dot-separated, e.g. "pool.location")
        key: String,

        /// Value to set
        value: String,
    },

    /// Store a secret in the system keyring
    SetKey {
        /// Which secret to store
        target: SecretTarget,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SecretTarget {
    /// Table store anon key
    Store,
    /// Advisory API key
    Advisory,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
