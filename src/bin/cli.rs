//! collegedesk CLI
//!
//! Local entry point for browsing, filtering and summarizing the dashboard
//! collections.

use std::io;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use collegedesk::{
    engine::{FilterState, SortOrder},
    error::{AppError, Result},
    models::Config,
    pipeline::{self, Entity, ListRequest},
    session::Session,
    storage::{DatasetStorage, LocalStorage},
};

/// collegedesk - College Administration Dashboard
#[derive(Parser, Debug)]
#[command(
    name = "collegedesk",
    version,
    about = "Filter, search and summarize college records"
)]
struct Cli {
    /// Path to the data directory containing config.toml and the JSON collections
    #[arg(short, long, default_value = "data")]
    data_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List students
    Students {
        #[arg(long)]
        department: Option<String>,
        #[arg(long)]
        year: Option<u8>,
        #[arg(long)]
        section: Option<String>,
        /// Current or Alumni
        #[arg(long)]
        status: Option<String>,
        /// Match students taking part in any of these activities (repeatable)
        #[arg(long = "activity")]
        activities: Vec<String>,
        #[command(flatten)]
        list: ListArgs,
    },

    /// List faculty
    Faculty {
        #[arg(long)]
        department: Option<String>,
        #[arg(long)]
        qualification: Option<String>,
        #[arg(long)]
        designation: Option<String>,
        /// Active or Inactive
        #[arg(long)]
        status: Option<String>,
        #[command(flatten)]
        list: ListArgs,
    },

    /// List news and events
    News {
        /// News or Event
        #[arg(long = "type")]
        kind: Option<String>,
        /// Published or Upcoming
        #[arg(long)]
        status: Option<String>,
        /// Match any of these categories (repeatable)
        #[arg(long = "category")]
        categories: Vec<String>,
        #[command(flatten)]
        list: ListArgs,
    },

    /// List timetable slots
    Timetable {
        /// Match any of these days (repeatable)
        #[arg(long = "day")]
        days: Vec<String>,
        /// Faculty id, e.g. FAC-CSE-01
        #[arg(long)]
        faculty: Option<String>,
        /// Section id, e.g. CSE-3A
        #[arg(long)]
        section: Option<String>,
        #[arg(long)]
        room: Option<String>,
        #[command(flatten)]
        list: ListArgs,
    },

    /// List rooms
    Rooms {
        /// Match any of these room types (repeatable)
        #[arg(long = "type")]
        kinds: Vec<String>,
        /// Available, Occupied or Maintenance
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        building: Option<String>,
        #[command(flatten)]
        list: ListArgs,
    },

    /// Count records of a collection per value of one field
    Summary {
        /// students, faculty, news, timetable or rooms
        entity: Entity,
        /// Field to group by, e.g. department
        #[arg(long)]
        by: String,
        #[arg(long)]
        json: bool,
    },

    /// Show the dashboard overview cards
    Overview {
        #[arg(long)]
        json: bool,
    },

    /// Search every collection for records containing all terms
    Search {
        #[arg(required = true)]
        terms: Vec<String>,
    },

    /// Show the weekly timetable grid and teaching load
    Week {
        /// Section id, e.g. CSE-3A
        #[arg(long)]
        section: Option<String>,
        /// Faculty id, e.g. FAC-CSE-01
        #[arg(long)]
        faculty: Option<String>,
        #[arg(long)]
        room: Option<String>,
    },

    /// Report timetable clashes
    Conflicts {
        #[arg(long)]
        json: bool,
    },

    /// Validate configuration and check the dataset
    Validate,

    /// Show data directory and record counts
    Info,
}

/// Options shared by every listing command.
#[derive(Args, Debug)]
struct ListArgs {
    /// Case-insensitive text search over names and ids
    #[arg(short, long)]
    query: Option<String>,

    /// Exact match on any field, FIELD=VALUE (repeatable)
    #[arg(long = "where", value_name = "FIELD=VALUE", value_parser = parse_pair)]
    filters: Vec<(String, String)>,

    /// Match any of several values of a field, FIELD=VALUE (repeatable)
    #[arg(long = "any", value_name = "FIELD=VALUE", value_parser = parse_pair)]
    any_of: Vec<(String, String)>,

    /// Field to sort by
    #[arg(long)]
    sort: Option<String>,

    /// Sort descending
    #[arg(long, requires = "sort")]
    desc: bool,

    /// 1-based page number
    #[arg(long, default_value_t = 1)]
    page: usize,

    /// Print the listing as JSON
    #[arg(long)]
    json: bool,
}

impl ListArgs {
    /// Combine the generic options with a command's own flags.
    fn into_request(
        self,
        values: Vec<(&str, Option<String>)>,
        selections: Vec<(&str, Vec<String>)>,
    ) -> ListRequest {
        let mut state = FilterState::new().with_query(self.query.unwrap_or_default());

        let values = values
            .into_iter()
            .filter_map(|(field, value)| value.map(|v| (field.to_string(), v)));
        for (field, value) in values.chain(self.filters) {
            state.set_value(field, value);
        }

        let selections = selections.into_iter().filter(|(_, values)| !values.is_empty());
        for (field, values) in selections {
            state = state.with_any_of(field, values);
        }
        for (field, value) in self.any_of {
            state = state.with_any_of(field, [value]);
        }

        let sort = self.sort.map(|field| {
            if self.desc {
                SortOrder::descending(field)
            } else {
                SortOrder::ascending(field)
            }
        });

        ListRequest {
            state,
            sort,
            page: self.page,
            json: self.json,
        }
    }
}

fn parse_pair(s: &str) -> std::result::Result<(String, String), String> {
    let (field, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{s}'"))?;
    let field = field.trim();
    if field.is_empty() {
        return Err(format!("missing field name in '{s}'"));
    }
    Ok((field.to_string(), value.trim().to_string()))
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if !cli.data_dir.is_dir() {
        log::error!("Data directory {} not found", cli.data_dir.display());
        return Err(AppError::config("Data directory not found"));
    }

    // Load configuration
    let config_path = cli.data_dir.join("config.toml");
    let config = Config::load_or_default(&config_path);
    log::debug!("Loaded configuration from {}", config_path.display());

    let storage = LocalStorage::with_files(&cli.data_dir, config.data.clone());
    let dataset = storage.load_dataset()?;
    let session = Session::from_config(&config.session);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Students {
            department,
            year,
            section,
            status,
            activities,
            list,
        } => {
            let request = list.into_request(
                vec![
                    ("department", department),
                    ("year", year.map(|y| y.to_string())),
                    ("section", section),
                    ("status", status),
                ],
                vec![("activities", activities)],
            );
            pipeline::run_list(&dataset, Entity::Students, &request, &config.display, &mut out)?;
        }

        Command::Faculty {
            department,
            qualification,
            designation,
            status,
            list,
        } => {
            let request = list.into_request(
                vec![
                    ("department", department),
                    ("qualification", qualification),
                    ("designation", designation),
                    ("status", status),
                ],
                Vec::new(),
            );
            pipeline::run_list(&dataset, Entity::Faculty, &request, &config.display, &mut out)?;
        }

        Command::News {
            kind,
            status,
            categories,
            list,
        } => {
            let request = list.into_request(
                vec![("type", kind), ("status", status)],
                vec![("category", categories)],
            );
            pipeline::run_list(&dataset, Entity::News, &request, &config.display, &mut out)?;
        }

        Command::Timetable {
            days,
            faculty,
            section,
            room,
            list,
        } => {
            let request = list.into_request(
                vec![
                    ("facultyId", faculty),
                    ("sectionId", section),
                    ("roomId", room),
                ],
                vec![("day", days)],
            );
            pipeline::run_list(&dataset, Entity::Timetable, &request, &config.display, &mut out)?;
        }

        Command::Rooms {
            kinds,
            status,
            building,
            list,
        } => {
            let request = list.into_request(
                vec![("status", status), ("building", building)],
                vec![("type", kinds)],
            );
            pipeline::run_list(&dataset, Entity::Rooms, &request, &config.display, &mut out)?;
        }

        Command::Summary { entity, by, json } => {
            pipeline::run_summary(&dataset, entity, &by, json, &mut out)?;
        }

        Command::Overview { json } => {
            let today = chrono::Local::now().date_naive();
            pipeline::run_overview(&dataset, &session, today, json, &mut out)?;
        }

        Command::Search { terms } => {
            pipeline::run_search(&dataset, &terms.join(" "), &config.display, &mut out)?;
        }

        Command::Week {
            section,
            faculty,
            room,
        } => {
            let mut state = FilterState::new();
            let values = [("sectionId", section), ("facultyId", faculty), ("roomId", room)];
            for (field, value) in values {
                if let Some(value) = value {
                    state.set_value(field, value);
                }
            }
            pipeline::run_week(&dataset, &state, &config.display, &mut out)?;
        }

        Command::Conflicts { json } => {
            pipeline::run_conflicts(&dataset, json, &mut out)?;
        }

        Command::Validate => {
            let report = pipeline::run_validate(&config, &dataset)?;
            if report.is_clean() {
                log::info!("All validations passed!");
            } else {
                log::warn!("Validation finished with warnings");
            }
        }

        Command::Info => {
            pipeline::run_info(&storage, &dataset, &session);
        }
    }

    let summary = session.end();
    log::debug!(
        "Session for {} lasted {} ms",
        summary.operator.name,
        summary.duration().num_milliseconds()
    );

    Ok(())
}
