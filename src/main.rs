mod commands;
mod notifier;
mod render;
mod utils;

use anyhow::Result;
use chrono::{Duration, Local};
use clap::{Parser, Subcommand};
use scheduler_core::EntryType;
use scheduler_core::config::SchedulerConfig;
use scheduler_core::date_range::DateRange;
use scheduler_core::entry::parse_date;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "scheduler")]
#[command(about = "Mark when you're available and find dates that work for everyone")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show everyone's entries
    Entries {
        /// First day to show (YYYY-MM-DD). Defaults to this month's calendar page
        #[arg(long)]
        from: Option<String>,

        /// Day after the last one to show (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },
    /// Mark your availability for a day or a range of days
    Mark {
        /// First day (YYYY-MM-DD)
        from: String,

        /// Day after the last one (YYYY-MM-DD). Only `from` is marked if omitted
        to: Option<String>,

        /// Who to mark for (defaults to the name set with `whoami`)
        #[arg(short, long)]
        name: Option<String>,

        /// maybe, no, ifneedbe or yes (defaults to the status set with `whoami`)
        #[arg(short = 't', long = "type")]
        kind: Option<EntryType>,
    },
    /// Delete an entry
    Delete {
        /// Day of the entry (YYYY-MM-DD)
        date: String,

        /// Whose entry (defaults to the name set with `whoami`)
        #[arg(short, long)]
        name: Option<String>,

        /// Don't ask for confirmation
        #[arg(short, long)]
        force: bool,
    },
    /// Find dates where the required people are available
    Search {
        /// People who must be available (comma separated)
        #[arg(short, long, value_delimiter = ',')]
        required: Vec<String>,

        /// People who would be nice to have (comma separated)
        #[arg(short, long, value_delimiter = ',')]
        wanted: Vec<String>,

        /// Include days in the past
        #[arg(long)]
        allow_past: bool,
    },
    /// Show or change which names are shown
    Filter {
        #[command(subcommand)]
        action: Option<FilterAction>,
    },
    /// List known participants
    People,
    /// Show or set who you are and your default status
    Whoami {
        /// Your name. Unknown names are added as a new participant
        name: Option<String>,

        /// Default status for `mark`
        #[arg(short = 't', long = "type")]
        kind: Option<EntryType>,
    },
    /// Create a default config file
    Config,
}

#[derive(Subcommand)]
enum FilterAction {
    /// Show the current filter
    Show,
    /// Only show these names (or hide them with --blacklist)
    Set {
        #[arg(required = true)]
        names: Vec<String>,

        /// Hide the given names instead of showing only them
        #[arg(short, long)]
        blacklist: bool,
    },
    /// Show everyone again
    Reset,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let today = Local::now().date_naive();

    if let Commands::Config = cli.command {
        return commands::config::run();
    }

    let config = SchedulerConfig::load()?;
    let allow_past = match &cli.command {
        Commands::Search { allow_past, .. } => *allow_past || config.allow_past,
        _ => config.allow_past,
    };
    let mut session = commands::open_session(&config, allow_past).await?;

    match cli.command {
        Commands::Entries { from, to } => {
            let range = DateRange::from_args(from.as_deref(), to.as_deref(), today)?;
            commands::entries::run(&mut session, range, today).await
        }
        Commands::Mark { from, to, name, kind } => {
            let start = parse_date(&from)?;
            let range = match to {
                Some(to) => DateRange::new(start, parse_date(&to)?)?,
                None => DateRange::new(start, start + Duration::days(1))?,
            };
            commands::mark::run(&mut session, range, name, kind, today).await
        }
        Commands::Delete { date, name, force } => {
            commands::delete::run(&mut session, parse_date(&date)?, name, force).await
        }
        Commands::Search { required, wanted, .. } => {
            commands::search::run(&mut session, required, wanted).await
        }
        Commands::Filter { action } => match action.unwrap_or(FilterAction::Show) {
            FilterAction::Show => commands::filter::show(&session),
            FilterAction::Set { names, blacklist } => {
                commands::filter::set(&mut session, names, blacklist).await
            }
            FilterAction::Reset => commands::filter::reset(&mut session).await,
        },
        Commands::People => commands::people::run(&session),
        Commands::Whoami { name, kind } => commands::whoami::run(&mut session, name, kind).await,
        Commands::Config => commands::config::run(),
    }
}

/// Log to stderr, `warn` and above unless RUST_LOG says otherwise.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
