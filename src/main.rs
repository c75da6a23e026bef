use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use groupflow::io::{load_request, write_reports};
use groupflow::validation::validate_input;
use groupflow::{CostTable, PlacementConfig, PlacementEngine};

/// Place users into groups from CSV submissions.
#[derive(Debug, Parser)]
#[command(name = "groupflow", version, about)]
struct Cli {
    /// Directory holding groups.csv and users.csv.
    #[arg(short, long, default_value = "input")]
    input: PathBuf,

    /// Directory the reports are written to.
    #[arg(short, long, default_value = "output")]
    output: PathBuf,

    /// Ranked choices per user per module.
    #[arg(short = 'k', long, default_value_t = 4)]
    choices: usize,

    /// Rank costs, most preferred first (comma separated).
    #[arg(
        long,
        value_delimiter = ',',
        allow_hyphen_values = true,
        default_values_t = [-100i64, -50, -20, -10, 5, 10]
    )]
    rank_costs: Vec<i64>,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("placement run failed: {e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> groupflow::Result<()> {
    let config = PlacementConfig::default()
        .with_choices_per_module(cli.choices)
        .with_cost_table(CostTable::new(cli.rank_costs.clone(), -1));

    let request = load_request(&cli.input, &config)?;
    tracing::info!(
        users = request.users.len(),
        modules = request.groups.len(),
        "input loaded"
    );

    if let Err(errors) = validate_input(&request.groups, &request.users) {
        for error in &errors {
            tracing::error!("{}", error.message);
        }
        return Err(groupflow::PlacementError::InvalidRecord {
            message: format!("{} validation errors in input", errors.len()),
        });
    }

    let outcome = PlacementEngine::with_config(config).place(&request)?;

    println!("Total cost: {}", outcome.kpi.total_cost);
    println!("(Maybe impossible) perfect cost: {}", outcome.kpi.perfect_cost);
    println!(
        "Top choices: {:.1}% of {} placements",
        outcome.kpi.top_choice_rate * 100.0,
        outcome.kpi.placement_count
    );
    println!("Finished in {} ms", outcome.kpi.elapsed_ms);

    write_reports(&cli.output, &request, &outcome.roster)?;
    Ok(())
}

fn init_logger(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("groupflow=debug,info"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("groupflow=info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
