use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for labpresence
/// CLI application to track lab presence and attendance with SQLite
#[derive(Parser)]
#[command(
    name = "labpresence",
    version = env!("CARGO_PKG_VERSION"),
    about = "Track who is in the lab: check-in/check-out ledger, live presence status and end-of-day reminder sweep over SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or check)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database and presence-ledger consistency")]
        check: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Register a new member profile
    Register {
        /// External user identifier (as supplied by the identity provider)
        user_id: String,

        /// Display name
        name: String,

        #[arg(long = "email", help = "Email address for checkout reminders")]
        email: Option<String>,

        #[arg(long = "lab", help = "Lab / team name used for roster grouping")]
        lab: Option<String>,
    },

    /// Check in: transition to IN_LAB and open a ledger entry
    In {
        user_id: String,

        #[arg(long = "comment", help = "Optional comment stored on the entry")]
        comment: Option<String>,
    },

    /// Check out: transition to OFF_CAMPUS and close the open entry
    Out {
        user_id: String,

        #[arg(long = "comment", help = "Optional comment stored on the entry")]
        comment: Option<String>,
    },

    /// Move to ON_CAMPUS (closes the open entry if checked in)
    Campus {
        user_id: String,

        #[arg(long = "comment", help = "Optional comment stored on the entry")]
        comment: Option<String>,
    },

    /// Show a member's current presence and open entry
    Status { user_id: String },

    /// Show a member's attendance history, most recent first
    History {
        user_id: String,

        #[arg(long = "limit", help = "Show at most N entries")]
        limit: Option<usize>,
    },

    /// List member profiles, checked-in first
    Roster {
        #[arg(long = "lab", help = "Filter by lab / team name")]
        lab: Option<String>,

        #[arg(
            long = "status",
            help = "Filter by presence bucket: in-lab, on-campus, off-campus"
        )]
        status: Option<String>,
    },

    /// Force-checkout everyone still IN_LAB and send reminders
    Sweep {
        #[arg(long = "batch-size", help = "Profiles processed concurrently per batch")]
        batch_size: Option<usize>,
    },

    /// Export a member's attendance history
    Export {
        user_id: String,

        #[arg(long, value_enum, help = "Output format")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        out: String,
    },
}
