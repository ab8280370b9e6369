//! End-to-end flow over the orchestrator with mocked browser and API
//! capabilities: validation short-circuits, WAF failure handling, notify
//! gating and summary composition.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use mockall::mock;

use autosign_app::application::services::check_in_executor::CheckInExecutor;
use autosign_app::application::services::report;
use autosign_domain::account::{AccountConfig, CookieInput};
use autosign_domain::balance_history::BalanceSnapshot;
use autosign_domain::check_in::{
    CheckInGateway, CheckInOutcome, Provider, UserInfo, WafCookieHarvester,
};
use autosign_domain::shared::DomainError;

mock! {
    Harvester {}

    #[async_trait]
    impl WafCookieHarvester for Harvester {
        async fn harvest(
            &self,
            login_url: &str,
            account_name: &str,
        ) -> Result<HashMap<String, String>, DomainError>;
    }
}

mock! {
    Gateway {}

    #[async_trait]
    impl CheckInGateway for Gateway {
        async fn fetch_user_info(
            &self,
            provider: &Provider,
            cookies: &HashMap<String, String>,
            api_user: &str,
        ) -> Result<UserInfo, DomainError>;

        async fn check_in(
            &self,
            provider: &Provider,
            cookies: &HashMap<String, String>,
            api_user: &str,
        ) -> Result<CheckInOutcome, DomainError>;
    }
}

fn account(api_user: &str) -> AccountConfig {
    AccountConfig {
        cookies: CookieInput::Raw("session=abc123".to_string()),
        api_user: api_user.to_string(),
    }
}

fn full_waf_set() -> HashMap<String, String> {
    let mut cookies = HashMap::new();
    cookies.insert("acw_tc".to_string(), "tc".to_string());
    cookies.insert("cdn_sec_tc".to_string(), "sec".to_string());
    cookies.insert("acw_sc__v2".to_string(), "v2".to_string());
    cookies
}

#[tokio::test]
async fn invalid_account_fails_without_any_network_call() {
    let mut harvester = MockHarvester::new();
    harvester.expect_harvest().times(0);
    let mut gateway = MockGateway::new();
    gateway.expect_fetch_user_info().times(0);
    gateway.expect_check_in().times(0);

    let executor = CheckInExecutor::new(
        Arc::new(harvester),
        Arc::new(gateway),
        Provider::anyrouter(),
    );

    let accounts = vec![account(""), account("   ")];
    let batch = executor.execute_batch(&accounts).await;

    assert_eq!(batch.total, 2);
    assert_eq!(batch.success_count, 0);
    assert!(!batch.any_success());
}

#[tokio::test]
async fn unparsable_cookie_string_fails_without_any_network_call() {
    let mut harvester = MockHarvester::new();
    harvester.expect_harvest().times(0);
    let mut gateway = MockGateway::new();
    gateway.expect_fetch_user_info().times(0);
    gateway.expect_check_in().times(0);

    let executor = CheckInExecutor::new(
        Arc::new(harvester),
        Arc::new(gateway),
        Provider::anyrouter(),
    );

    let accounts = vec![AccountConfig {
        cookies: CookieInput::Raw("no cookie pairs here".to_string()),
        api_user: "1001".to_string(),
    }];
    let batch = executor.execute_batch(&accounts).await;

    assert!(!batch.results[0].success);
}

#[tokio::test]
async fn waf_failure_short_circuits_account_before_api_calls() {
    let mut harvester = MockHarvester::new();
    harvester
        .expect_harvest()
        .times(1)
        .returning(|_, _| Err(DomainError::WafAcquisition("missing acw_sc__v2".to_string())));
    let mut gateway = MockGateway::new();
    gateway.expect_fetch_user_info().times(0);
    gateway.expect_check_in().times(0);

    let executor = CheckInExecutor::new(
        Arc::new(harvester),
        Arc::new(gateway),
        Provider::anyrouter(),
    );

    let batch = executor.execute_batch(&[account("1001")]).await;

    assert!(!batch.results[0].success);
    assert!(batch.results[0].message.contains("acw_sc__v2"));
    assert!(batch.results[0].user_info.is_none());
}

#[tokio::test]
async fn merged_jar_carries_user_and_waf_cookies() {
    let mut harvester = MockHarvester::new();
    harvester
        .expect_harvest()
        .returning(|_, _| Ok(full_waf_set()));

    let mut gateway = MockGateway::new();
    gateway
        .expect_fetch_user_info()
        .withf(|_, cookies, api_user| {
            cookies.get("session").map(String::as_str) == Some("abc123")
                && cookies.get("acw_sc__v2").map(String::as_str) == Some("v2")
                && api_user == "1001"
        })
        .times(1)
        .returning(|_, _, _| {
            Ok(UserInfo {
                quota: 10.0,
                used_quota: 2.5,
            })
        });
    gateway
        .expect_check_in()
        .withf(|_, cookies, _| cookies.contains_key("acw_tc"))
        .times(1)
        .returning(|_, _, _| {
            Ok(CheckInOutcome {
                success: true,
                message: "Check-in successful".to_string(),
            })
        });

    let executor = CheckInExecutor::new(
        Arc::new(harvester),
        Arc::new(gateway),
        Provider::anyrouter(),
    );

    let batch = executor.execute_batch(&[account("1001")]).await;

    assert!(batch.results[0].success);
    assert_eq!(batch.results[0].user_info.as_ref().unwrap().quota, 10.0);
}

#[tokio::test]
async fn profile_fetch_failure_is_not_fatal() {
    let mut harvester = MockHarvester::new();
    harvester
        .expect_harvest()
        .returning(|_, _| Ok(full_waf_set()));

    let mut gateway = MockGateway::new();
    gateway
        .expect_fetch_user_info()
        .returning(|_, _, _| Err(DomainError::Api("user info request returned HTTP 401".to_string())));
    gateway.expect_check_in().times(1).returning(|_, _, _| {
        Ok(CheckInOutcome {
            success: true,
            message: "Check-in successful".to_string(),
        })
    });

    let executor = CheckInExecutor::new(
        Arc::new(harvester),
        Arc::new(gateway),
        Provider::anyrouter(),
    );

    let batch = executor.execute_batch(&[account("1001")]).await;

    assert!(batch.results[0].success);
    assert!(batch.results[0].user_info.is_none());
}

#[tokio::test]
async fn network_fault_becomes_truncated_failure_message() {
    let mut harvester = MockHarvester::new();
    harvester
        .expect_harvest()
        .returning(|_, _| Ok(full_waf_set()));

    let long_fault = "x".repeat(120);
    let mut gateway = MockGateway::new();
    gateway.expect_fetch_user_info().returning(|_, _, _| {
        Ok(UserInfo {
            quota: 1.0,
            used_quota: 0.0,
        })
    });
    gateway
        .expect_check_in()
        .returning(move |_, _, _| Err(DomainError::Network(long_fault.clone())));

    let executor = CheckInExecutor::new(
        Arc::new(harvester),
        Arc::new(gateway),
        Provider::anyrouter(),
    );

    let batch = executor.execute_batch(&[account("1001")]).await;

    assert!(!batch.results[0].success);
    assert_eq!(batch.results[0].message.len(), 53);
    assert!(batch.results[0].message.ends_with("..."));
}

/// Two accounts: the first succeeds with an unchanged balance, the second
/// fails its WAF harvest. The run stays viable, and the failure alone gates
/// the notification in.
#[tokio::test]
async fn mixed_batch_notifies_and_reports_both_accounts() {
    let mut harvester = MockHarvester::new();
    harvester.expect_harvest().times(2).returning(|_, name| {
        if name == "Account 1" {
            Ok(full_waf_set())
        } else {
            Err(DomainError::WafAcquisition(
                "missing WAF cookies after two rounds: [\"acw_sc__v2\"]".to_string(),
            ))
        }
    });

    let mut gateway = MockGateway::new();
    gateway.expect_fetch_user_info().times(1).returning(|_, _, _| {
        Ok(UserInfo {
            quota: 10.0,
            used_quota: 2.5,
        })
    });
    gateway.expect_check_in().times(1).returning(|_, _, _| {
        Ok(CheckInOutcome {
            success: true,
            message: "Check-in successful".to_string(),
        })
    });

    let executor = CheckInExecutor::new(
        Arc::new(harvester),
        Arc::new(gateway),
        Provider::anyrouter(),
    );

    let accounts = vec![account("1001"), account("1002")];
    let batch = executor.execute_batch(&accounts).await;

    assert_eq!(batch.success_count, 1);
    assert!(batch.any_success());

    let mut previous = BalanceSnapshot::new();
    previous.record("account_1", 10.0);

    let run_report = report::evaluate_run(&batch, &previous);
    assert!(run_report.should_notify);
    assert_eq!(run_report.snapshot.get("account_1"), Some(10.0));
    assert_eq!(run_report.snapshot.get("account_2"), None);

    let content = &run_report.message.content;
    assert!(content.contains("[SUCCESS] Account 1"));
    assert!(content.contains("[FAIL] Account 2"));
    assert!(content.contains("Success: 1/2"));
}
