mod common;

use common::{Call, FakeApi};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{self, Instant};
use unich_airdrop::{
    shutdown, Account, AccountDriver, AirdropConfig, CycleOutcome, LoopExit, ProxyAgent,
};

fn driver(api: Arc<FakeApi>) -> AccountDriver<Arc<FakeApi>> {
    let config = AirdropConfig::builder()
        .referral_code("TESTREF")
        .build()
        .unwrap();
    let account = Account {
        index: 0,
        token: "token-a".into(),
        proxy: ProxyAgent::Direct,
    };
    AccountDriver::new(account, api, &config)
}

#[tokio::test(start_paused = true)]
async fn active_mining_is_not_restarted() {
    let api = Arc::new(FakeApi {
        mining: Some(true),
        ..FakeApi::default()
    });

    let outcome = driver(api.clone()).run_cycle().await;

    assert_eq!(outcome, CycleOutcome::Completed { claims_attempted: 0 });
    assert_eq!(api.count(&Call::StartMining), 0);
}

#[tokio::test(start_paused = true)]
async fn inactive_mining_is_started_exactly_once() {
    let api = Arc::new(FakeApi {
        mining: Some(false),
        ..FakeApi::default()
    });

    driver(api.clone()).run_cycle().await;

    assert_eq!(api.count(&Call::StartMining), 1);
}

#[tokio::test(start_paused = true)]
async fn unknown_mining_status_starts_mining() {
    let api = Arc::new(FakeApi {
        mining: None,
        ..FakeApi::default()
    });

    driver(api.clone()).run_cycle().await;

    assert_eq!(api.count(&Call::StartMining), 1);
}

#[tokio::test(start_paused = true)]
async fn referral_code_is_only_submitted_when_not_referred() {
    let referred = Arc::new(FakeApi::default());
    driver(referred.clone()).run_cycle().await;
    assert!(!referred
        .calls()
        .iter()
        .any(|c| matches!(c, Call::AddReferral(_))));

    let fresh = Arc::new(FakeApi {
        referred: Some(false),
        ..FakeApi::default()
    });
    driver(fresh.clone()).run_cycle().await;
    assert_eq!(fresh.count(&Call::AddReferral("TESTREF".into())), 1);

    let unknown = Arc::new(FakeApi {
        referred: None,
        ..FakeApi::default()
    });
    driver(unknown.clone()).run_cycle().await;
    assert_eq!(unknown.count(&Call::AddReferral("TESTREF".into())), 1);
}

#[tokio::test(start_paused = true)]
async fn workflow_runs_in_order() {
    let api = Arc::new(FakeApi {
        referred: Some(false),
        mining: Some(false),
        tasks: Some(vec![("1", true), ("2", false)]),
        ..FakeApi::default()
    });

    let outcome = driver(api.clone()).run_cycle().await;

    assert_eq!(outcome, CycleOutcome::Completed { claims_attempted: 1 });
    assert_eq!(
        api.calls(),
        vec![
            Call::ReferralInfo,
            Call::AddReferral("TESTREF".into()),
            Call::RecentMining,
            Call::StartMining,
            Call::SocialTasks,
            Call::Claim("2".into()),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn claims_are_sequential_and_spaced_by_a_second() {
    let api = Arc::new(FakeApi {
        tasks: Some(vec![("a", false), ("b", true), ("c", false), ("d", false)]),
        ..FakeApi::default()
    });

    let started = Instant::now();
    let outcome = driver(api.clone()).run_cycle().await;

    assert_eq!(outcome, CycleOutcome::Completed { claims_attempted: 3 });
    let claims = api.claim_times();
    let ids: Vec<_> = claims.iter().map(|(id, _)| id.as_str()).collect();
    assert_eq!(ids, vec!["a", "c", "d"]);

    assert!(claims[0].1 - started >= Duration::from_secs(1));
    for pair in claims.windows(2) {
        assert!(pair[1].1 - pair[0].1 >= Duration::from_secs(1));
    }
}

#[tokio::test(start_paused = true)]
async fn failed_claims_do_not_stop_the_cycle() {
    let api = Arc::new(FakeApi {
        tasks: Some(vec![("x", false), ("y", false)]),
        fail_claims: true,
        ..FakeApi::default()
    });

    let outcome = driver(api.clone()).run_cycle().await;

    assert_eq!(outcome, CycleOutcome::Completed { claims_attempted: 2 });
    assert_eq!(api.claim_times().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn social_list_failure_ends_the_loop() {
    let api = Arc::new(FakeApi {
        tasks: None,
        ..FakeApi::default()
    });
    let (_trigger, shutdown) = shutdown::channel();

    let exit = driver(api.clone()).run(shutdown).await;

    assert_eq!(exit, LoopExit::Aborted);
    assert_eq!(api.count(&Call::SocialTasks), 1);
}

#[tokio::test(start_paused = true)]
async fn cycles_repeat_every_interval_until_shutdown() {
    let api = Arc::new(FakeApi::default());
    let (trigger, shutdown) = shutdown::channel();
    let driver = driver(api.clone());

    let stopper = async {
        time::sleep(Duration::from_secs(2 * 86_400 + 60)).await;
        trigger.trigger();
    };
    let (exit, _) = tokio::join!(driver.run(shutdown), stopper);

    assert_eq!(exit, LoopExit::Shutdown);
    assert_eq!(api.count(&Call::SocialTasks), 3);
}

#[tokio::test(start_paused = true)]
async fn shutdown_interrupts_pending_claim_delay() {
    let api = Arc::new(FakeApi {
        tasks: Some(vec![("1", false), ("2", false), ("3", false)]),
        ..FakeApi::default()
    });
    let (trigger, shutdown) = shutdown::channel();
    let driver = driver(api.clone());

    let stopper = async {
        time::sleep(Duration::from_millis(1500)).await;
        trigger.trigger();
    };
    let (exit, _) = tokio::join!(driver.run(shutdown), stopper);

    assert_eq!(exit, LoopExit::Shutdown);
    assert_eq!(api.claim_times().len(), 1);
}

#[tokio::test]
async fn already_triggered_shutdown_runs_nothing() {
    let api = Arc::new(FakeApi::default());
    let (trigger, shutdown) = shutdown::channel();
    trigger.trigger();

    let exit = driver(api.clone()).run(shutdown).await;

    assert_eq!(exit, LoopExit::Shutdown);
    assert!(api.calls().is_empty());
}
