use crate::source::SourceFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for flightlog
/// CLI application to import pilot logbooks into SQLite
#[derive(Parser)]
#[command(
    name = "flightlog",
    version = env!("CARGO_PKG_VERSION"),
    about = "Import a pilot's flight log from a spreadsheet into SQLite, creating the airports it references",
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

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/vim/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Import flights from a spreadsheet (.csv, .xlsx, .xls, .ods)
    Import {
        /// Spreadsheet to read; the first row must be the header
        file: String,

        #[arg(
            long = "format",
            value_enum,
            help = "Column layout of the sheet (default: config source_format)"
        )]
        format: Option<SourceFormat>,

        #[arg(long = "sheet", help = "Worksheet name (workbooks only; default: first sheet)")]
        sheet: Option<String>,

        #[arg(
            long = "batch-size",
            help = "Flights per committed batch (1-1000, default: config batch_size)"
        )]
        batch_size: Option<usize>,

        #[arg(
            long = "reference",
            help = "Airport reference file (YAML or JSON) instead of the built-in table"
        )]
        reference: Option<String>,

        #[arg(long = "replace", help = "Delete existing flights and airports first")]
        replace: bool,

        #[arg(
            long = "keep-airports",
            requires = "replace",
            help = "With --replace, keep the existing airports"
        )]
        keep_airports: bool,
    },

    /// Fill in airport names and coordinates from reference data
    Coords {
        #[arg(
            long = "reference",
            help = "Airport reference file (YAML or JSON) instead of the built-in table"
        )]
        reference: Option<String>,

        #[arg(long = "missing-only", help = "Only update airports without coordinates")]
        missing_only: bool,
    },

    /// Print or manage the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}
