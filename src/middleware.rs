//! Middleware that authenticates every request with a bearer token.

use crate::error::AirdropError;
use async_trait::async_trait;
use log::debug;
use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest_middleware::{Middleware, Next, Result};

/// Adds `Authorization: Bearer <token>` and a JSON content type to requests.
#[derive(Clone)]
pub struct BearerAuthMiddleware {
    authorization: HeaderValue,
}

impl BearerAuthMiddleware {
    /// Create the middleware for one account token.
    pub fn new(token: &str) -> std::result::Result<Self, AirdropError> {
        let mut authorization = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| AirdropError::InvalidToken)?;
        authorization.set_sensitive(true);
        Ok(Self { authorization })
    }
}

#[async_trait]
impl Middleware for BearerAuthMiddleware {
    async fn handle(
        &self,
        mut req: reqwest::Request,
        extensions: &mut http::Extensions,
        next: Next<'_>,
    ) -> Result<reqwest::Response> {
        let headers = req.headers_mut();
        headers.insert(AUTHORIZATION, self.authorization.clone());
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let method = req.method().clone();
        let url = req.url().clone();
        let response = next.run(req, extensions).await?;
        debug!("{} {} -> {}", method, url.path(), response.status());
        Ok(response)
    }
}
