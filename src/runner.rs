//! Launches one account loop per token and waits for all of them.

use crate::api::AirdropApi;
use crate::config::AirdropConfig;
use crate::driver::{Account, AccountDriver, LoopExit};
use crate::error::AirdropError;
use crate::proxy::{assign_proxy, ProxyAgent};
use crate::shutdown::Shutdown;
use crate::utils::read_lines;

use futures::future;
use log::{error, info, warn};
use std::sync::Arc;

/// Load tokens and proxies and pair them up.
///
/// Tokens are required. A missing or unreadable proxy file only means every
/// account connects directly.
pub async fn load_accounts(config: &AirdropConfig) -> Result<Vec<Account>, AirdropError> {
    let tokens = read_lines(&config.tokens_file).await?;
    if tokens.is_empty() {
        return Err(AirdropError::NoTokens(config.tokens_file.clone()));
    }

    let proxies = match read_lines(&config.proxy_file).await {
        Ok(proxies) => proxies,
        Err(e) => {
            warn!("{}, running without proxies", e);
            Vec::new()
        }
    };
    info!("Loaded {} tokens and {} proxies", tokens.len(), proxies.len());

    Ok(tokens
        .into_iter()
        .enumerate()
        .map(|(index, token)| Account {
            index,
            proxy: ProxyAgent::from_uri(assign_proxy(&proxies, index)),
            token,
        })
        .collect())
}

/// Runs every account from the configured token file concurrently.
pub struct Runner {
    config: Arc<AirdropConfig>,
}

impl Runner {
    pub fn new(config: AirdropConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> Arc<AirdropConfig> {
        Arc::clone(&self.config)
    }

    /// Start one loop per account and wait until all of them end.
    ///
    /// `connect` builds the API client for an account; accounts whose client
    /// cannot be built are logged and skipped. Returns the number of loops
    /// that were started, 0 when no tokens could be loaded.
    pub async fn run<A, F>(&self, connect: F, shutdown: Shutdown) -> usize
    where
        A: AirdropApi,
        F: Fn(&Account) -> Result<A, AirdropError>,
    {
        let accounts = match load_accounts(&self.config).await {
            Ok(accounts) => accounts,
            Err(e) => {
                error!("{}", e);
                return 0;
            }
        };

        let mut drivers = Vec::with_capacity(accounts.len());
        for account in accounts {
            match connect(&account) {
                Ok(api) => drivers.push(AccountDriver::new(account, api, &self.config)),
                Err(e) => error!("Account {} | Failed to set up client: {}", account.number(), e),
            }
        }

        let launched = drivers.len();
        info!("Starting {} account loops", launched);

        let exits = future::join_all(drivers.iter().map(|driver| driver.run(shutdown.clone()))).await;
        let aborted = exits.iter().filter(|exit| **exit == LoopExit::Aborted).count();
        info!("All account loops ended ({} aborted)", aborted);

        launched
    }
}
