use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for jobsheet
#[derive(Parser)]
#[command(
    name = "jobsheet",
    version = env!("CARGO_PKG_VERSION"),
    about = "Job detail cache and timesheet wage/bill recalculation",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Override configuration file path
    #[arg(global = true, long = "config")]
    pub config: Option<String>,

    /// Tracing filter for diagnostics on stderr (e.g. "debug", "jobsheet::cache=debug")
    #[arg(global = true, long = "log-level", default_value = "warn")]
    pub log_level: String,

    /// Run in test mode (no config file written)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration file and the database
    Init,

    /// Inspect the configuration file
    Config {
        #[arg(long = "print", help = "Print the effective configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check the configuration file for missing fields")]
        check: bool,
    },

    /// Store and read job details (reads go through the job cache)
    Job {
        #[command(subcommand)]
        action: JobAction,
    },

    /// Recalculate wage and bill for a file of timesheet rows
    Recalc {
        /// JSON file holding an array of raw timesheet rows
        file: String,

        /// Staff id used as the last wage-rate fallback (overrides current_staff)
        #[arg(long = "staff")]
        staff: Option<String>,

        #[arg(long, value_enum, default_value = "table")]
        format: ExportFormat,

        /// Write the output to a file instead of stdout
        #[arg(long, value_name = "FILE")]
        out: Option<String>,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}

#[derive(Subcommand)]
pub enum JobAction {
    /// Store (or replace) a job detail from a JSON file
    Add {
        id: String,

        #[arg(long, value_name = "FILE")]
        file: String,
    },

    /// Merge fields from a JSON file into a stored job
    Patch {
        id: String,

        #[arg(long, value_name = "FILE")]
        file: String,
    },

    /// Show one or more jobs; repeated ids are served from the cache
    Show {
        #[arg(required = true)]
        ids: Vec<String>,

        /// Cache freshness window in milliseconds (default from config)
        #[arg(long = "ttl-ms")]
        ttl_ms: Option<i64>,
    },

    /// List stored job ids
    List,
}
