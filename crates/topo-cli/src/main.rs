use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use topo_archive::ArchiveCodec;
use topo_cli::commands::{self, OutputFormat, TaskChecks};
use topo_cli::{session_file, DashboardConfig};
use topo_model::{QuadrantId, SessionState};
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("topo")
        .version(topo_cli::VERSION)
        .about("Topographic survey progress tracker")
        .arg_required_else_help(true)
        .arg(
            Arg::new("archive")
                .long("archive")
                .short('a')
                .global(true)
                .default_value("survey.zip")
                .value_parser(value_parser!(PathBuf))
                .help("Session archive to read and update"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML file with goals and archive options"),
        )
        .arg(
            Arg::new("force")
                .long("force")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Save even when some quadrants could not be read; their stored entries are replaced"),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON lines on stderr"),
        )
        .subcommand(
            Command::new("summary")
                .about("Print progress for every quadrant and the project")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
        .subcommand(
            Command::new("add-road")
                .about("Append a surveyed road segment")
                .arg(quadrant_arg())
                .arg(
                    Arg::new("label")
                        .long("label")
                        .required(true)
                        .help("Road or segment name"),
                )
                .arg(
                    Arg::new("meters")
                        .long("meters")
                        .required(true)
                        .value_parser(value_parser!(f64))
                        .help("Surveyed length in meters"),
                ),
        )
        .subcommand(
            Command::new("add-interference")
                .about("Append an interference to a task quadrant (Q2, Q3)")
                .arg(quadrant_arg())
                .arg(
                    Arg::new("description")
                        .long("description")
                        .required(true)
                        .help("Interference identifier"),
                )
                .arg(
                    Arg::new("localization")
                        .long("localization")
                        .action(ArgAction::SetTrue)
                        .help("Localization done"),
                )
                .arg(
                    Arg::new("geo-radar")
                        .long("geo-radar")
                        .action(ArgAction::SetTrue)
                        .help("Geo-radar scan done"),
                )
                .arg(
                    Arg::new("survey")
                        .long("survey")
                        .action(ArgAction::SetTrue)
                        .help("Survey done"),
                ),
        )
        .subcommand(
            Command::new("set-goal")
                .about("Change a goal and print the adjusted report")
                .arg(
                    Arg::new("goal")
                        .required(true)
                        .help("overall-length, overall-interferences, qN-length or qN-interferences"),
                )
                .arg(
                    Arg::new("value")
                        .required(true)
                        .value_parser(value_parser!(f64))
                        .help("New target value"),
                ),
        )
}

fn quadrant_arg() -> Arg {
    Arg::new("quadrant")
        .long("quadrant")
        .short('q')
        .required(true)
        .value_parser(value_parser!(QuadrantId))
        .help("Quadrant number (1-4)")
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.with_target(false).init();
    }
}

fn required<'a, T: Clone + Send + Sync + 'static>(args: &'a ArgMatches, id: &str) -> anyhow::Result<&'a T> {
    args.get_one::<T>(id)
        .with_context(|| format!("missing argument '{id}'"))
}

fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("log-json"));

    let archive_path: PathBuf = required::<PathBuf>(&matches, "archive")?.clone();
    let config_path = matches.get_one::<PathBuf>("config").cloned();

    let mut config = DashboardConfig::load_or_default(config_path.as_deref())
        .context("failed to load config")?;
    let codec = ArchiveCodec::with_options(config.archive);

    let force = matches.get_flag("force");

    // Import warnings are logged by the codec
    let mut session = session_file::open(&archive_path, &codec, SessionState::with_goals(config.goals))?;

    match matches.subcommand() {
        Some(("summary", args)) => {
            let format = if args.get_flag("json") {
                OutputFormat::Json
            } else {
                OutputFormat::Text
            };
            println!("{}", commands::summary(&session.state, format)?);
        }
        Some(("add-road", args)) => {
            let quadrant = *required::<QuadrantId>(args, "quadrant")?;
            let label = required::<String>(args, "label")?;
            let meters = *required::<f64>(args, "meters")?;

            if commands::add_road(&mut session.state, quadrant, label, meters) {
                session.save(&archive_path, &codec, force)?;
                println!("Added {label} ({meters} m) to {quadrant}");
            } else {
                println!("Nothing added: label is empty");
            }
        }
        Some(("add-interference", args)) => {
            let quadrant = *required::<QuadrantId>(args, "quadrant")?;
            let description = required::<String>(args, "description")?;
            let checks = TaskChecks {
                localization: args.get_flag("localization"),
                geo_radar: args.get_flag("geo-radar"),
                survey: args.get_flag("survey"),
            };

            if commands::add_interference(&mut session.state, quadrant, description, checks)? {
                session.save(&archive_path, &codec, force)?;
                println!("Added interference {description} to {quadrant}");
            } else {
                println!("Nothing added: description is empty");
            }
        }
        Some(("set-goal", args)) => {
            let goal = required::<String>(args, "goal")?;
            let value = *required::<f64>(args, "value")?;

            commands::set_goal(&mut config, &mut session.state, goal, value)?;
            if let Some(path) = &config_path {
                config.save(path).context("failed to save config")?;
            }
            println!("{}", commands::summary(&session.state, OutputFormat::Text)?);
        }
        _ => {}
    }

    Ok(())
}
