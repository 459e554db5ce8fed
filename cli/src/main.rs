use anyhow::bail;
use clap::Parser;
use placement_core::{
    paginate, AdminOverview, ApiClient, ClientConfig, ListState, PageState, PlacementQuery,
    StudentQuery, STUDENTS_PER_PAGE,
};
use tracing::{debug, warn};

mod cli;
mod render;

use cli::{Cli, Commands, PlacementsArgs, StudentsArgs};

fn main() {
    if let Err(error) = run() {
        eprintln!("placement-dashboard: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let api = ApiClient::with_config(ClientConfig::new(&cli.api_url));
    debug!(base_url = api.client().base_url(), "client configured");

    let output = match &cli.command {
        Commands::Students(args) => students(&api, args)?,
        Commands::Student { id } => student(&api, *id)?,
        Commands::Placements(args) => placements(&api, args)?,
        Commands::Stats => stats(&api)?,
        Commands::Admin => admin(&api)?,
    };
    print!("{output}");
    Ok(())
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("PLACEMENT_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

/// Unwrap a loaded page or turn the failure into the command's error.
fn loaded<T>(page: &str, state: PageState<T>) -> anyhow::Result<T> {
    match state {
        PageState::Loaded(data) => Ok(data),
        PageState::Failed { message } => bail!("loading {page} failed: {message} (run again to retry)"),
        PageState::Loading => bail!("{page} did not finish loading"),
    }
}

fn students(api: &ApiClient, args: &StudentsArgs) -> anyhow::Result<String> {
    let roster = loaded(
        "students",
        PageState::load("students", || api.list_students(&StudentQuery::default())),
    )?;

    let state = ListState::new(args.search.as_str(), args.filter);
    let total_pages = paginate(&roster, &state, STUDENTS_PER_PAGE).total_pages;
    let state = state.go_to_page(args.page, total_pages);
    if state.page() != args.page {
        warn!(requested = args.page, total_pages, "page out of range, showing page 1");
    }

    Ok(render::students_page(&paginate(&roster, &state, STUDENTS_PER_PAGE))?)
}

fn student(api: &ApiClient, id: u64) -> anyhow::Result<String> {
    let (profile, placements) = loaded(
        "student",
        PageState::load("student", || {
            let profile = api.get_student(id)?;
            let placements = api.list_student_placements(id)?;
            Ok::<_, placement_core::ApiError>((profile, placements))
        }),
    )?;
    Ok(render::student_profile(&profile, &placements)?)
}

fn placements(api: &ApiClient, args: &PlacementsArgs) -> anyhow::Result<String> {
    let query = PlacementQuery {
        company: args.company.clone(),
        status: args.status,
    };
    let placements = loaded(
        "placements",
        PageState::load("placements", || api.list_placements(&query)),
    )?;
    Ok(render::placements_table(&placements)?)
}

fn stats(api: &ApiClient) -> anyhow::Result<String> {
    let stats = loaded("stats", PageState::load("stats", || api.get_stats()))?;
    if !stats.placed_within_total()
        || !stats.placement_rate_consistent(placement_core::stats::RATE_TOLERANCE)
    {
        warn!(
            placed = stats.placed_count,
            total = stats.total_students,
            reported = stats.placement_rate,
            expected = stats.expected_placement_rate(),
            "placement rate disagrees with counts"
        );
    }
    Ok(render::stats(&stats)?)
}

fn admin(api: &ApiClient) -> anyhow::Result<String> {
    let (stats, placements, students) = loaded(
        "admin",
        PageState::load("admin", || {
            let stats = api.get_stats()?;
            let placements = api.list_placements(&PlacementQuery::default())?;
            let students = api.list_students(&StudentQuery::default())?;
            Ok::<_, placement_core::ApiError>((stats, placements, students))
        }),
    )?;
    let overview = AdminOverview::from_stats(&stats).with_recent_placements(&placements, &students);
    Ok(render::admin(&overview)?)
}
