use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use log::{error, info, warn};

use autosign_app::application::services::check_in_executor::CheckInExecutor;
use autosign_app::application::services::report;
use autosign_app::cli::Cli;
use autosign_app::config::AppConfig;
use autosign_domain::balance_history::BalanceSnapshotStore;
use autosign_domain::check_in::{CheckInPolicy, Provider};
use autosign_infrastructure::http::waf_bypass::check_available_browser;
use autosign_infrastructure::http::{HttpClient, WafBypassService};
use autosign_infrastructure::logging;
use autosign_infrastructure::notification::create_sender;
use autosign_infrastructure::persistence::JsonFileSnapshotStore;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    if let Err(e) = logging::init_logger() {
        eprintln!("Failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    let cli = Cli::parse();

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// One full batch pass. Returns whether at least one account succeeded.
async fn run(cli: Cli) -> anyhow::Result<bool> {
    info!("Multi-account auto check-in started");

    let config = AppConfig::from_env()?;
    info!("Found {} account configuration(s)", config.accounts.len());

    let provider = Provider::anyrouter();
    CheckInPolicy::validate_provider(&provider)?;

    match check_available_browser() {
        Some(path) => info!("Using browser at {}", path),
        None => warn!("No Chromium-based browser found; WAF cookie harvests will fail"),
    }

    let harvester = Arc::new(WafBypassService::new(cli.headless));
    let gateway = Arc::new(HttpClient::new()?);
    let executor = CheckInExecutor::new(harvester, gateway, provider);

    let store = JsonFileSnapshotStore::new(
        cli.history_file
            .unwrap_or_else(JsonFileSnapshotStore::default_path),
    );
    let previous = store.load().await;

    let batch = executor.execute_batch(&config.accounts).await;

    let run_report = report::evaluate_run(&batch, &previous);

    if let Err(e) = store.save(&run_report.snapshot).await {
        warn!("Failed to persist balance history: {}", e);
    }

    if run_report.should_notify {
        if cli.dry_run {
            info!(
                "Dry run, skipping notification delivery:\n{}",
                run_report.message.content
            );
        } else {
            let sender = create_sender(config.webhook_url.clone());
            if let Err(e) = sender.send(&run_report.message).await {
                warn!("Failed to deliver notification: {}", e);
            }
        }
    } else {
        info!("All accounts succeeded with unchanged balances, skipping notification");
    }

    info!(
        "Check-in finished: {}/{} accounts succeeded",
        batch.success_count, batch.total
    );

    Ok(batch.any_success())
}
