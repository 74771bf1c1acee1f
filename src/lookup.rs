use clap::{Parser, Subcommand};
use color_eyre::eyre::{eyre, Result};
use dotenv::dotenv;
use kairo_api::config::parse_log_level;
use kairo_client::{
    render, search::FacultySearch, search::StudentSearch, ClientConfig, HttpTimetableSource,
    SearchOutcome, SearchState,
};
use kairo_core::{
    models::student::FacultyLegend,
    projector::{self, TimetableView, ViewMode},
};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "kairo-lookup")]
#[command(about = "Look up a timetable from the Kairo API", long_about = None)]
#[command(version)]
struct Cli {
    #[arg(
        long,
        value_parser = ["error", "warn", "info", "debug", "trace"],
        default_value = "warn",
        global = true
    )]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a student's timetable by enrollment number
    Student {
        enrollment_number: String,

        #[arg(long, value_parser = ["week", "day"], default_value = "week")]
        view: String,
    },

    /// Show a faculty member's schedule and workload
    Faculty {
        faculty_code: String,

        #[arg(long, value_parser = ["week", "day"], default_value = "week")]
        view: String,
    },
}

fn settle<T>(
    outcome: SearchOutcome,
    state: SearchState<T>,
    query: &str,
) -> Result<std::sync::Arc<T>> {
    match (outcome, state) {
        (SearchOutcome::Loaded, SearchState::Loaded { data, .. }) => Ok(data),
        (_, SearchState::Failed { error, .. }) => Err(eyre!("{}", error)),
        (SearchOutcome::Blank, _) => Err(eyre!("Nothing to look up for '{}'", query)),
        (outcome, _) => Err(eyre!("Search did not complete: {:?}", outcome)),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    let cli = Cli::parse();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(parse_log_level(&cli.log_level))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = ClientConfig::from_env()?;
    let source = HttpTimetableSource::new(&config)?;

    match cli.command {
        Commands::Student {
            enrollment_number,
            view,
        } => {
            let mode: ViewMode = view.parse()?;
            let search = StudentSearch::new(config.search_policy);
            let outcome = search.search_student(&source, &enrollment_number).await;
            let timetable = settle(outcome, search.state().await, &enrollment_number)?;

            print!("{}", render::render_student_header(&timetable.student));
            let projected = projector::project(Some(timetable.as_ref()), mode);
            print!("{}", render::render_view(&projected));
        }
        Commands::Faculty { faculty_code, view } => {
            let mode: ViewMode = view.parse()?;
            let search = FacultySearch::new(config.search_policy);
            let outcome = search.search_faculty(&source, &faculty_code).await;
            let schedule = settle(outcome, search.state().await, &faculty_code)?;

            let legend = FacultyLegend::new();
            match mode {
                ViewMode::Week => {
                    let week = projector::project_week_view(&schedule.schedule, &legend);
                    print!("{}", render::render_faculty(&schedule, &week));
                }
                ViewMode::Day => {
                    let day = projector::project_day_view(&schedule.schedule, &legend);
                    print!("{}", render::render_view(&TimetableView::Day(day)));
                }
            }
        }
    }

    Ok(())
}
