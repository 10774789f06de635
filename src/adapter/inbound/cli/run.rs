//! Handler for stage flags and client flows.

use std::path::PathBuf;

use tracing::info;

use crate::adapter::inbound::cli::command::{selected_environment, Cli};
use crate::adapter::inbound::cli::output;
use crate::application::client::{deploy_series1, lift_and_shift, Series1Plan};
use crate::application::{Orchestrator, RunPlan, RunReport, RunRequest};
use crate::domain::environment::ensure_supported;
use crate::domain::Client;
use crate::error::{Error, Result};
use crate::infrastructure::bootstrap::build_context;
use crate::infrastructure::config::collection::load_collections;
use crate::infrastructure::config::environment::resolve_environment;
use crate::infrastructure::config::settings::Config;

/// Execute a run selected by top-level flags.
pub async fn execute(cli: &Cli, config: &Config) -> Result<()> {
    let request = RunRequest {
        deploy: cli.deploy.clone(),
        coordinate: cli.coordinate.clone(),
        marketplace: cli.marketplace.clone(),
    };

    if cli.client.is_none() && request.is_empty() {
        output::note("Nothing to do. Pass --deploy, --coordinate, --marketplace or --client.");
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    let (client, tier) = selected_environment(cli.client, cli.client_env);

    if client == Client::Benfica {
        ensure_supported(client, tier)?;
        if !request.marketplace.is_empty() {
            return Err(Error::Validation(
                "--marketplace cannot be combined with --client benfica".into(),
            ));
        }
        return benfica(config);
    }

    let collections = load_collections(&collections_path(cli, config))?;
    let environment = resolve_environment(client, tier, config)?;
    output::field("Client", client);
    output::field("Environment", tier);
    output::field("Network", config.network_name());
    if environment.read_only {
        output::warning("Registry is read only");
    }

    // Everything below needs the network, so resolve plans first.
    let plan = RunPlan::resolve(&request, &collections, config.marketplace.contract)?;
    let series1 = match cli.client {
        Some(Client::Euroleague) => Some(Series1Plan::resolve(&collections, &environment)?),
        _ => None,
    };

    let ctx = build_context(config, environment, collections).await?;

    if let Some(series1) = series1 {
        output::stage(1, "Euroleague Series 1");
        let report = deploy_series1(&ctx, &series1).await?;
        output::success(&format!("Moments at {}", output::highlight(report.moments.address)));
        if let Some(reels) = &report.reels {
            output::success(&format!("Reels at {}", output::highlight(reels.address)));
        }
        for case in &report.cases {
            output::success(&format!("{} at {}", case.name, output::highlight(case.address)));
        }
        print_links(report.links.applied, report.links.already_set);
        if request.marketplace.is_empty() {
            return Ok(());
        }
    }

    output::stage(2, "Contracts");
    let report = Orchestrator::new(&ctx).run(&plan).await?;
    print_report(&report);
    info!(
        component = "cli",
        method = "run",
        deployed = report.deployed.len(),
        "Run finished"
    );
    Ok(())
}

fn collections_path(cli: &Cli, config: &Config) -> PathBuf {
    cli.collections
        .clone()
        .unwrap_or_else(|| config.collections_path())
}

fn benfica(config: &Config) -> Result<()> {
    output::stage(1, "Benfica lift and shift");
    let report = lift_and_shift(&config.benfica.data_dir)?;
    output::field("Packs", report.packs);
    output::field("Orders", report.order_details);
    output::field("Completed", report.completed);
    output::field("Joined", report.orders.len());
    output::success("Lift and shift complete");
    Ok(())
}

fn print_report(report: &RunReport) {
    output::field("Rehydrated", report.rehydrated);
    for handle in &report.deployed {
        output::success(&format!(
            "Deployed {} at {}",
            handle.name,
            output::highlight(handle.address)
        ));
    }
    print_links(
        report.coordinated.applied + report.allowed.applied,
        report.coordinated.already_set + report.allowed.already_set,
    );
}

fn print_links(applied: usize, already_set: usize) {
    output::field("Applied", applied);
    output::field("Already set", already_set);
}
