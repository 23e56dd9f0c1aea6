//! Client for the Unich airdrop user API.

use crate::config::AirdropConfig;
use crate::error::AirdropError;
use crate::middleware::BearerAuthMiddleware;
use crate::proxy::ProxyAgent;

use async_trait::async_trait;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{json, Value};
use std::sync::Arc;
use url::Url;

/// Every response wraps its payload in a `data` field.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: Option<T>,
}

/// Referral state of the account.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ReferralInfo {
    #[serde(default, deserialize_with = "null_as_false")]
    pub referred: bool,
}

/// Mining session state and accumulated points.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MiningStatus {
    #[serde(rename = "isMining", default, deserialize_with = "null_as_false")]
    pub is_mining: bool,
    /// Total points, passed through as the API reports them.
    #[serde(rename = "mUn", default)]
    pub balance: Option<Value>,
}

/// A social task and whether its reward was already claimed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SocialTask {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_false")]
    pub claimed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SocialTaskList {
    #[serde(default)]
    pub items: Vec<SocialTask>,
}

impl SocialTaskList {
    /// Ids of the tasks whose reward is still open, in listing order.
    ///
    /// Tasks without an id cannot be claimed and are skipped.
    pub fn unclaimed_ids(&self) -> Vec<String> {
        self.items
            .iter()
            .filter(|task| !task.claimed && !task.id.is_empty())
            .map(|task| task.id.clone())
            .collect()
    }
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Option::<RawId>::deserialize(deserializer)? {
        Some(RawId::Text(id)) => id,
        Some(RawId::Number(id)) => id.to_string(),
        None => String::new(),
    })
}

/// Flags the API sometimes sends as `null`; treat that like `false`.
fn null_as_false<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

/// The airdrop operations one account can perform.
///
/// Each call is a single authenticated round trip. Nothing is retried.
#[async_trait]
pub trait AirdropApi: Send + Sync {
    /// POST `mining/start`.
    async fn start_mining(&self) -> Result<Value, AirdropError>;

    /// GET `social/list-by-user`.
    async fn social_tasks(&self) -> Result<SocialTaskList, AirdropError>;

    /// GET `mining/recent`.
    async fn recent_mining(&self) -> Result<MiningStatus, AirdropError>;

    /// GET `ref`.
    async fn referral_info(&self) -> Result<ReferralInfo, AirdropError>;

    /// POST `ref/refer-sign-up` with `{"code": code}`.
    async fn add_referral(&self, code: &str) -> Result<Value, AirdropError>;

    /// POST `social/claim/{task_id}` with `{"evidence": task_id}`.
    async fn claim_social_reward(&self, task_id: &str) -> Result<Value, AirdropError>;
}

#[async_trait]
impl<T: AirdropApi + ?Sized> AirdropApi for Arc<T> {
    async fn start_mining(&self) -> Result<Value, AirdropError> {
        (**self).start_mining().await
    }

    async fn social_tasks(&self) -> Result<SocialTaskList, AirdropError> {
        (**self).social_tasks().await
    }

    async fn recent_mining(&self) -> Result<MiningStatus, AirdropError> {
        (**self).recent_mining().await
    }

    async fn referral_info(&self) -> Result<ReferralInfo, AirdropError> {
        (**self).referral_info().await
    }

    async fn add_referral(&self, code: &str) -> Result<Value, AirdropError> {
        (**self).add_referral(code).await
    }

    async fn claim_social_reward(&self, task_id: &str) -> Result<Value, AirdropError> {
        (**self).claim_social_reward(task_id).await
    }
}

/// reqwest-backed `AirdropApi` bound to one token and one proxy.
#[derive(Clone)]
pub struct UnichClient {
    http: ClientWithMiddleware,
    config: Arc<AirdropConfig>,
}

impl UnichClient {
    /// Build a client that sends `token` through `agent`.
    pub fn new(
        config: Arc<AirdropConfig>,
        token: &str,
        agent: &ProxyAgent,
    ) -> Result<Self, AirdropError> {
        let mut builder = reqwest::Client::builder();
        builder = match agent.to_reqwest_proxy()? {
            Some(proxy) => builder.proxy(proxy),
            // ignore HTTP(S)_PROXY from the environment as well
            None => builder.no_proxy(),
        };
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(AirdropError::Client)?;

        let http = ClientBuilder::new(client)
            .with(BearerAuthMiddleware::new(token)?)
            .build();

        Ok(Self { http, config })
    }

    async fn get_data<T: DeserializeOwned>(&self, path: &'static str) -> Result<T, AirdropError> {
        let url = self.config.endpoint(path)?;
        let response = self.http.get(url).send().await?;
        let envelope: Envelope<T> = serde_json::from_str(&read_body(response).await?)?;
        envelope.data.ok_or(AirdropError::MissingData(path))
    }

    async fn post_json(&self, url: Url, payload: &Value) -> Result<Value, AirdropError> {
        let response = self.http.post(url).json(payload).send().await?;
        let body = read_body(response).await?;
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }
}

/// Body text of a successful response, or the status and body of a failed one.
async fn read_body(response: reqwest::Response) -> Result<String, AirdropError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(AirdropError::Status { status, body });
    }
    Ok(body)
}

#[async_trait]
impl AirdropApi for UnichClient {
    async fn start_mining(&self) -> Result<Value, AirdropError> {
        self.post_json(self.config.endpoint("mining/start")?, &json!({})).await
    }

    async fn social_tasks(&self) -> Result<SocialTaskList, AirdropError> {
        self.get_data("social/list-by-user").await
    }

    async fn recent_mining(&self) -> Result<MiningStatus, AirdropError> {
        self.get_data("mining/recent").await
    }

    async fn referral_info(&self) -> Result<ReferralInfo, AirdropError> {
        self.get_data("ref").await
    }

    async fn add_referral(&self, code: &str) -> Result<Value, AirdropError> {
        self.post_json(
            self.config.endpoint("ref/refer-sign-up")?,
            &json!({ "code": code }),
        )
        .await
    }

    async fn claim_social_reward(&self, task_id: &str) -> Result<Value, AirdropError> {
        self.post_json(
            self.config.endpoint_with_id("social/claim", task_id)?,
            &json!({ "evidence": task_id }),
        )
        .await
    }
}
