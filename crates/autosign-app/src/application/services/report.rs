use chrono::Local;

use autosign_domain::balance_history::BalanceSnapshot;
use autosign_domain::notification::NotificationMessage;

use super::check_in_executor::BatchCheckInResult;

/// Outcome of the notify-gating pass over one batch.
pub struct RunReport {
    /// Snapshot to persist: this run's successful profile observations.
    pub snapshot: BalanceSnapshot,
    /// Whether the outcome is worth a human's attention.
    pub should_notify: bool,
    /// Consolidated report, composed whether or not it gets delivered.
    pub message: NotificationMessage,
}

/// Rebuild the balance snapshot from this run's successful profile fetches
/// and decide whether to notify: any failed check-in, or any balance moved
/// by more than the epsilon, triggers the single consolidated notification.
/// First-seen balances are recorded silently.
pub fn evaluate_run(batch: &BatchCheckInResult, previous: &BalanceSnapshot) -> RunReport {
    let mut snapshot = BalanceSnapshot::new();
    let mut should_notify = false;

    for (index, result) in batch.results.iter().enumerate() {
        if !result.success {
            should_notify = true;
        }

        if let Some(info) = &result.user_info {
            let key = BalanceSnapshot::account_key(index);
            if previous.quota_changed(&key, info.quota) {
                should_notify = true;
            }
            snapshot.record(key, info.quota);
        }
    }

    RunReport {
        message: compose_report(batch),
        snapshot,
        should_notify,
    }
}

/// Compose the consolidated report: timestamp, one block per account,
/// summary statistics.
fn compose_report(batch: &BatchCheckInResult) -> NotificationMessage {
    let mut account_lines = Vec::with_capacity(batch.results.len());
    for result in &batch.results {
        let status = if result.success { "[SUCCESS]" } else { "[FAIL]" };
        let mut line = format!("{} {}", status, result.account_name);

        if !result.success && !result.message.is_empty() {
            line.push_str(&format!(": {}", result.message));
        }
        if let Some(info) = &result.user_info {
            line.push_str(&format!(
                "\nCurrent balance: ${:.2}, Used: ${:.2}",
                info.quota, info.used_quota
            ));
        }
        account_lines.push(line);
    }

    let mut summary = vec![
        "Check-in result statistics:".to_string(),
        format!("Success: {}/{}", batch.success_count, batch.total),
        format!("Failed: {}/{}", batch.failed_count, batch.total),
    ];
    summary.push(if batch.success_count == batch.total {
        "All accounts checked in successfully".to_string()
    } else if batch.success_count > 0 {
        "Some accounts checked in successfully".to_string()
    } else {
        "All account check-ins failed".to_string()
    });

    let time_info = format!("Execution time: {}", Local::now().format("%Y-%m-%d %H:%M:%S"));

    let content = format!(
        "{}\n\n{}\n\n{}",
        time_info,
        account_lines.join("\n"),
        summary.join("\n")
    );

    NotificationMessage::new("Check-in Results", content)
}
