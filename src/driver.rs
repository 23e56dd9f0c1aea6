//! Per-account mining and task loop.

use crate::api::AirdropApi;
use crate::config::AirdropConfig;
use crate::proxy::ProxyAgent;
use crate::shutdown::Shutdown;

use log::{debug, error, info, warn};
use std::time::Duration;
use tokio::time;

/// One token together with the proxy it is routed through.
#[derive(Debug, Clone)]
pub struct Account {
    /// Position in the token file, starting at 0.
    pub index: usize,
    pub token: String,
    pub proxy: ProxyAgent,
}

impl Account {
    /// 1-based number used in log lines.
    pub fn number(&self) -> usize {
        self.index + 1
    }
}

/// Result of a single pass over the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Every step ran. `claims_attempted` counts the claim requests sent.
    Completed { claims_attempted: usize },
    /// The social task list could not be fetched; the account stops for good.
    Aborted,
}

/// Why an account loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    Shutdown,
    Aborted,
}

/// Drives the referral, mining and social task workflow for one account.
pub struct AccountDriver<A> {
    account: Account,
    api: A,
    referral_code: String,
    claim_delay: Duration,
    cycle_interval: Duration,
}

impl<A: AirdropApi> AccountDriver<A> {
    pub fn new(account: Account, api: A, config: &AirdropConfig) -> Self {
        Self {
            account,
            api,
            referral_code: config.referral_code.clone(),
            claim_delay: config.claim_delay,
            cycle_interval: config.cycle_interval,
        }
    }

    /// Run cycles until shutdown or until a cycle aborts.
    ///
    /// Shutdown is raced against every request and every sleep, so a pending
    /// call or a long wait is dropped as soon as the signal fires.
    pub async fn run(&self, mut shutdown: Shutdown) -> LoopExit {
        let n = self.account.number();

        loop {
            if shutdown.is_triggered() {
                return LoopExit::Shutdown;
            }

            let outcome = tokio::select! {
                outcome = self.run_cycle() => outcome,
                _ = shutdown.cancelled() => {
                    info!("Account {} | Shutdown requested, stopping", n);
                    return LoopExit::Shutdown;
                }
            };

            if outcome == CycleOutcome::Aborted {
                warn!("Account {} | Social tasks unavailable, account loop stopped", n);
                return LoopExit::Aborted;
            }

            warn!(
                "Completed account {}. Waiting {} before checking again...",
                n,
                describe(self.cycle_interval)
            );

            tokio::select! {
                _ = time::sleep(self.cycle_interval) => {}
                _ = shutdown.cancelled() => {
                    info!("Account {} | Shutdown requested, stopping", n);
                    return LoopExit::Shutdown;
                }
            }
        }
    }

    /// Run the workflow once: referral, mining, then social task claims.
    pub async fn run_cycle(&self) -> CycleOutcome {
        let n = self.account.number();

        self.ensure_referral().await;

        let status = match self.api.recent_mining().await {
            Ok(status) => Some(status),
            Err(e) => {
                error!("Account {} | Error fetching recent mining data: {}", n, e);
                None
            }
        };
        let is_mining = status.as_ref().is_some_and(|s| s.is_mining);
        let balance = status
            .as_ref()
            .and_then(|s| s.balance.as_ref())
            .map_or_else(|| "unknown".to_string(), |b| b.to_string());

        info!("Processing Account {} with proxy: {}", n, self.account.proxy);
        info!("Account {} | Mining : {} | Total Points : {}", n, is_mining, balance);

        if is_mining {
            info!("Account {} | Mining already started.", n);
        } else {
            match self.api.start_mining().await {
                Ok(response) => info!("Account {} | Mining started successfully: {}", n, response),
                Err(e) => error!("Account {} | Error starting mining: {}", n, e),
            }
        }

        let tasks = match self.api.social_tasks().await {
            Ok(tasks) => tasks,
            Err(e) => {
                error!("Account {} | Error fetching social list by user: {}", n, e);
                return CycleOutcome::Aborted;
            }
        };

        let unclaimed = tasks.unclaimed_ids();
        info!("Account {} | Found {} Unclaimed tasks", n, unclaimed.len());

        for task_id in &unclaimed {
            time::sleep(self.claim_delay).await;

            info!("Account {} | Trying to complete task ID: {}", n, task_id);
            match self.api.claim_social_reward(task_id).await {
                Ok(response) => info!("Account {} | Claim successful: {}", n, response),
                Err(e) => error!("Account {} | Error claiming reward {}: {}", n, task_id, e),
            }
        }

        CycleOutcome::Completed {
            claims_attempted: unclaimed.len(),
        }
    }

    /// Submit the referral code unless the account is known to be referred.
    async fn ensure_referral(&self) {
        let n = self.account.number();

        let referred = match self.api.referral_info().await {
            Ok(info) => info.referred,
            Err(e) => {
                warn!("Account {} | Error fetching referral info: {}", n, e);
                false
            }
        };
        if referred {
            debug!("Account {} | Already referred", n);
            return;
        }

        match self.api.add_referral(&self.referral_code).await {
            Ok(response) => debug!("Account {} | Referral submitted: {}", n, response),
            Err(e) => warn!("Account {} | Error adding referral: {}", n, e),
        }
    }
}

fn describe(interval: Duration) -> String {
    let secs = interval.as_secs();
    if secs > 0 && secs % 3600 == 0 && interval.subsec_nanos() == 0 {
        format!("{} hours", secs / 3600)
    } else {
        format!("{:?}", interval)
    }
}
