use crate::config::Config;
use crate::core::export::ExportFormat;
use crate::errors::{AppError, AppResult};
use crate::sheet::layout::Tab;
use crate::utils::date::{parse_date, today};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Command-line interface definition for dayboard
/// Daily routine checklist and sleep log kept in a local workbook
#[derive(Parser)]
#[command(
    name = "dayboard",
    version = env!("CARGO_PKG_VERSION"),
    about = "A daily routine tracker: checklist steps with derived target times, meals and sleep log in a SQLite workbook",
    long_about = None
)]
pub struct Cli {
    /// Override workbook path (useful for tests or a custom workbook)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Override session file path
    #[arg(global = true, long = "session")]
    pub session: Option<String>,

    /// Work on another day than today (YYYY-MM-DD)
    #[arg(global = true, long = "date")]
    pub date: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// The `--date` override, or today at the configured offset.
    pub fn day(&self, cfg: &Config) -> AppResult<NaiveDate> {
        match &self.date {
            Some(d) => parse_date(d).ok_or_else(|| AppError::InvalidDate(d.clone())),
            None => Ok(today(cfg.offset())),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the workbook and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields to the configuration file")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the workbook database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show row counts and date ranges per tab")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,

        #[arg(long = "tail", value_name = "N", help = "Only the last N rows")]
        tail: Option<usize>,
    },

    /// Show today's board: steps, targets, meals and diary
    Status,

    /// Mark a step done
    Done {
        /// Step id (e.g. morning_walk) or number (1-9)
        step: String,

        #[arg(long = "at", value_name = "HH:MM", help = "Completion time (default: now)")]
        at: Option<String>,
    },

    /// Skip a step (skipping the workout also skips the pre-workout)
    Skip {
        /// Step id or number
        step: String,
    },

    /// Put a done or skipped step back to pending
    Undo {
        /// Step id or number
        step: String,
    },

    /// Set the day's anchors and notes
    Set {
        #[arg(long = "wake", value_name = "HH:MM")]
        wake: Option<String>,

        #[arg(long = "workout-time", value_name = "HH:MM")]
        workout_time: Option<String>,

        #[arg(long = "bed", value_name = "HH:MM")]
        bed: Option<String>,

        #[arg(long = "workout", help = "Workout label, or 'none' for a rest day")]
        workout: Option<String>,

        #[arg(long = "sleep-score")]
        sleep_score: Option<u32>,

        #[arg(long = "feeling")]
        feeling: Option<String>,

        #[arg(long = "diary")]
        diary: Option<String>,
    },

    /// Record what was eaten
    Meals {
        #[arg(long = "breakfast")]
        breakfast: Option<String>,

        #[arg(long = "lunch")]
        lunch: Option<String>,

        #[arg(long = "dinner")]
        dinner: Option<String>,

        #[arg(long = "sync", help = "Write the meals row to the workbook")]
        sync: bool,
    },

    /// Write the day's routine and meals rows to the workbook
    Sync,

    /// List rows of a workbook tab
    List {
        #[arg(long, value_enum, default_value = "routine")]
        tab: Tab,

        #[arg(long, short, help = "Filter by year/month/day or a custom range")]
        period: Option<String>,
    },

    /// Import sleep data from tracker screenshots
    Sleep {
        #[command(subcommand)]
        action: SleepCommand,
    },

    /// Create a backup copy of the workbook
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,
    },

    /// Export a workbook tab
    Export {
        #[arg(long, value_enum, default_value = "routine")]
        tab: Tab,

        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        range: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum SleepCommand {
    /// Extract a sleep record from screenshots and keep it pending
    Analyze {
        /// png / jpg / jpeg files
        #[arg(required = true)]
        files: Vec<String>,

        #[arg(long, help = "Append the record right away")]
        save: bool,

        #[arg(long = "allow-missing", help = "Write blank cells for fields the model did not report")]
        allow_missing: bool,
    },

    /// Append the pending record to the sleep log
    Save,

    /// Show the pending record
    Show,

    /// Drop the pending record
    Discard,
}
