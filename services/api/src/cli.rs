use crate::reports::run_leads_command;
use crate::server;
use clap::{Args, Parser, Subcommand};
use lead_pulse::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Lead Pulse",
    about = "Serve and print lead acquisition reports from a lead sheet export",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print a report computed from a lead sheet CSV
    Leads {
        #[command(subcommand)]
        command: LeadsCommand,
    },
}

#[derive(Subcommand, Debug)]
pub(crate) enum LeadsCommand {
    /// List every cleaned lead in the sheet
    Overview(SheetArgs),
    /// Totals, CPL and CPA with a per-source breakdown
    Performance(SheetArgs),
    /// Lead counts by source and state plus the duplicate count
    Quality(SheetArgs),
    /// Funnel conversion rates and net pull-through
    Conversion(SheetArgs),
    /// Cost totals and cost by state
    Cost(SheetArgs),
    /// List leads sharing state, zip code and first name
    Duplicates(SheetArgs),
    /// Compare uniform and inverse-CPA budget allocations
    Allocate(AllocateArgs),
    /// Forecast monthly cost for the coming months
    Forecast(ForecastArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct SheetArgs {
    /// Lead sheet CSV export (defaults to APP_LEADS_CSV)
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct AllocateArgs {
    #[command(flatten)]
    pub(crate) sheet: SheetArgs,
    /// Total budget to distribute across sources
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) budget: f64,
}

#[derive(Args, Debug)]
pub(crate) struct ForecastArgs {
    #[command(flatten)]
    pub(crate) sheet: SheetArgs,
    /// Number of months to forecast (defaults to APP_FORECAST_PERIODS)
    #[arg(long)]
    pub(crate) periods: Option<usize>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Leads { command } => run_leads_command(command),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_allocate_with_negative_budget() {
        let cli = Cli::try_parse_from([
            "lead-pulse",
            "leads",
            "allocate",
            "--csv",
            "leads.csv",
            "--budget",
            "-20",
        ])
        .expect("arguments parse");

        match cli.command {
            Some(Command::Leads {
                command: LeadsCommand::Allocate(args),
            }) => {
                assert_eq!(args.budget, -20.0);
                assert_eq!(args.sheet.csv, Some(PathBuf::from("leads.csv")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_overview_without_explicit_sheet() {
        let cli =
            Cli::try_parse_from(["lead-pulse", "leads", "overview"]).expect("arguments parse");

        match cli.command {
            Some(Command::Leads {
                command: LeadsCommand::Overview(args),
            }) => assert!(args.csv.is_none()),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn defaults_to_serve() {
        let cli = Cli::try_parse_from(["lead-pulse"]).expect("no arguments parse");
        assert!(cli.command.is_none());
    }
}
