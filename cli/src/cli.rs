use clap::{Args, Parser, Subcommand};
use placement_core::config::{API_URL_ENV, DEFAULT_API_URL};
use placement_core::{PlacementStatus, StudentFilter};

/// Text dashboard for the student placement service.
#[derive(Clone, Debug, Parser)]
#[command(name = "placement-dashboard", version)]
pub struct Cli {
    /// Base URL of the placement service.
    #[arg(long, global = true, env = API_URL_ENV, default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Log debug output.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Paginated student list.
    Students(StudentsArgs),
    /// One student's profile and placements.
    Student {
        id: u64,
    },
    /// Placement records.
    Placements(PlacementsArgs),
    /// Aggregate statistics.
    Stats,
    /// Admin overview.
    Admin,
}

#[derive(Clone, Debug, Args)]
pub struct StudentsArgs {
    /// Match name, email or skill.
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// all, placed, available or top.
    #[arg(short, long, default_value = "all")]
    pub filter: StudentFilter,

    /// 1-based page number.
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,
}

#[derive(Clone, Debug, Args)]
pub struct PlacementsArgs {
    #[arg(long)]
    pub company: Option<String>,

    /// applied, interview, offered, joined or rejected.
    #[arg(long)]
    pub status: Option<PlacementStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn students_defaults() {
        let cli = Cli::parse_from(["placement-dashboard", "students"]);
        let Commands::Students(args) = cli.command else {
            panic!("expected students command");
        };
        assert_eq!(args.search, "");
        assert_eq!(args.filter, StudentFilter::All);
        assert_eq!(args.page, 1);
    }

    #[test]
    fn placements_status_is_parsed() {
        let cli = Cli::parse_from([
            "placement-dashboard",
            "--api-url",
            "http://127.0.0.1:9000",
            "placements",
            "--status",
            "offered",
        ]);
        assert_eq!(cli.api_url, "http://127.0.0.1:9000");
        let Commands::Placements(args) = cli.command else {
            panic!("expected placements command");
        };
        assert_eq!(args.status, Some(PlacementStatus::Offered));
    }

    #[test]
    fn unknown_filter_is_rejected() {
        let result = Cli::try_parse_from(["placement-dashboard", "students", "--filter", "alumni"]);
        assert!(result.is_err());
    }
}
