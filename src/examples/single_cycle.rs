//! Run one workflow cycle for a single token and exit.
//!
//! UNICH_TOKEN=... UNICH_PROXY=socks5://127.0.0.1:1080 cargo run --example single_cycle

use std::sync::Arc;
use unich_airdrop::{Account, AccountDriver, AirdropConfig, ProxyAgent, UnichClient};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();

    let token = std::env::var("UNICH_TOKEN")?;
    let proxy = std::env::var("UNICH_PROXY").ok();

    let config = Arc::new(AirdropConfig::builder().build()?);
    let account = Account {
        index: 0,
        proxy: ProxyAgent::from_uri(proxy.as_deref()),
        token,
    };
    println!("Running one cycle with proxy: {}", account.proxy);

    let client = UnichClient::new(Arc::clone(&config), &account.token, &account.proxy)?;
    let driver = AccountDriver::new(account, client, &config);
    let outcome = driver.run_cycle().await;

    println!("Outcome: {:?}", outcome);
    Ok(())
}
