#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Mutex;
use tokio::time::Instant;
use unich_airdrop::{AirdropApi, AirdropError, MiningStatus, ReferralInfo, SocialTask, SocialTaskList};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ReferralInfo,
    AddReferral(String),
    RecentMining,
    StartMining,
    SocialTasks,
    Claim(String),
}

/// Scripted `AirdropApi`. A `None` field makes that read fail.
pub struct FakeApi {
    pub referred: Option<bool>,
    pub mining: Option<bool>,
    pub tasks: Option<Vec<(&'static str, bool)>>,
    pub fail_claims: bool,
    pub calls: Mutex<Vec<(Call, Instant)>>,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            referred: Some(true),
            mining: Some(true),
            tasks: Some(Vec::new()),
            fail_claims: false,
            calls: Mutex::new(Vec::new()),
        }
    }
}

fn unavailable() -> AirdropError {
    AirdropError::Status {
        status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
        body: "upstream down".into(),
    }
}

impl FakeApi {
    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push((call, Instant::now()));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().iter().map(|(c, _)| c.clone()).collect()
    }

    pub fn count(&self, wanted: &Call) -> usize {
        self.calls().iter().filter(|c| *c == wanted).count()
    }

    pub fn claim_times(&self) -> Vec<(String, Instant)> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter_map(|(c, at)| match c {
                Call::Claim(id) => Some((id.clone(), *at)),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl AirdropApi for FakeApi {
    async fn start_mining(&self) -> Result<Value, AirdropError> {
        self.record(Call::StartMining);
        Ok(json!({ "code": "OK" }))
    }

    async fn social_tasks(&self) -> Result<SocialTaskList, AirdropError> {
        self.record(Call::SocialTasks);
        let tasks = self.tasks.as_ref().ok_or_else(unavailable)?;
        Ok(SocialTaskList {
            items: tasks
                .iter()
                .map(|(id, claimed)| SocialTask {
                    id: id.to_string(),
                    claimed: *claimed,
                })
                .collect(),
        })
    }

    async fn recent_mining(&self) -> Result<MiningStatus, AirdropError> {
        self.record(Call::RecentMining);
        let is_mining = self.mining.ok_or_else(unavailable)?;
        Ok(MiningStatus {
            is_mining,
            balance: Some(json!(42)),
        })
    }

    async fn referral_info(&self) -> Result<ReferralInfo, AirdropError> {
        self.record(Call::ReferralInfo);
        let referred = self.referred.ok_or_else(unavailable)?;
        Ok(ReferralInfo { referred })
    }

    async fn add_referral(&self, code: &str) -> Result<Value, AirdropError> {
        self.record(Call::AddReferral(code.to_string()));
        Ok(json!({ "code": "OK" }))
    }

    async fn claim_social_reward(&self, task_id: &str) -> Result<Value, AirdropError> {
        self.record(Call::Claim(task_id.to_string()));
        if self.fail_claims {
            return Err(unavailable());
        }
        Ok(json!({ "code": "OK" }))
    }
}
