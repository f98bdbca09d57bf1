//! gradebook CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use gradebook_core::{SortKey, SortOrder};

mod commands;

#[derive(Parser)]
#[command(
    name = "gradebook",
    version,
    about = "Student score records, grade statistics and reports"
)]
struct Cli {
    /// Roster data file (defaults to `data_file` from the config)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter config and a sample roster
    Init,

    /// Read `id name score...` rows from stdin and replace the roster
    Input {
        /// Number of courses per student
        #[arg(long)]
        courses: usize,
    },

    /// Print the roster with cached totals and averages
    List,

    /// Recompute every student's total and average, then save
    Recompute,

    /// Print per-course totals and averages
    Stats,

    /// Print the grade distribution of every course
    Grades,

    /// Print the roster in sorted order
    Sort {
        /// Sort key: total, id, name
        #[arg(long, default_value = "total")]
        by: SortKey,

        /// Sort order: asc, desc
        #[arg(long, default_value = "asc")]
        order: SortOrder,

        /// Save the new order back to the data file
        #[arg(long)]
        write: bool,
    },

    /// Find a student by id or name (exit code 1 if not found)
    Find {
        /// Student id
        #[arg(long, conflicts_with = "name", required_unless_present = "name")]
        id: Option<i64>,

        /// Exact student name
        #[arg(long)]
        name: Option<String>,
    },

    /// Write a report snapshot
    Report {
        /// Output format: json, html, markdown (or md)
        #[arg(long, default_value = "html")]
        format: String,

        /// Output file
        #[arg(long)]
        output: PathBuf,
    },

    /// Interactive command loop
    Shell,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gradebook=warn".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = commands::Workspace::open(cli.data, cli.config.as_deref()).and_then(|ws| {
        match cli.command {
            Commands::Init => commands::init::execute(&ws),
            Commands::Input { courses } => commands::input::execute(&ws, courses),
            Commands::List => commands::list::execute(&ws),
            Commands::Recompute => commands::recompute::execute(&ws),
            Commands::Stats => commands::stats::execute(&ws),
            Commands::Grades => commands::grades::execute(&ws),
            Commands::Sort { by, order, write } => commands::sort::execute(&ws, by, order, write),
            Commands::Find { id, name } => commands::find::execute(&ws, id, name),
            Commands::Report { format, output } => {
                commands::report::execute(&ws, &format, &output)
            }
            Commands::Shell => commands::shell::execute(&ws),
        }
    });

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
