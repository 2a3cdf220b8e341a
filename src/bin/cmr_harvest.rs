use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cmr_harvester::app::Harvester;
use cmr_harvester::cmr::CmrHttpClient;
use cmr_harvester::config::Settings;
use cmr_harvester::error::HarvestError;

#[derive(Parser)]
#[command(name = "cmr-harvest")]
#[command(about = "Harvest per-collection download link lists from the CMR catalog")]
#[command(version, author)]
struct Cli;

fn main() -> ExitCode {
    if let Err(report) = run() {
        eprintln!("{report:?}");
        if let Some(err) = report.downcast_ref::<HarvestError>() {
            return ExitCode::from(map_exit_code(err));
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn map_exit_code(error: &HarvestError) -> u8 {
    match error {
        HarvestError::Search { .. }
        | HarvestError::CatalogHttp(_)
        | HarvestError::CatalogStatus { .. } => 3,
        _ => 1,
    }
}

fn run() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let _cli = Cli::parse();

    let settings = Settings::default();
    let catalog = CmrHttpClient::new(settings.clone())?;
    let harvester = Harvester::new(catalog, settings);
    harvester.run()?;
    Ok(())
}
