//! # unich-airdrop
//!
//! A multi-account client for the Unich airdrop API.
//!
//! Every account runs its own loop: apply the referral code if missing, start
//! mining when it is not active, claim the open social tasks one by one, then
//! wait a day. Accounts can be routed through HTTP or SOCKS proxies.

pub mod api;
pub mod banner;
pub mod config;
pub mod driver;
pub mod error;
pub mod middleware;
pub mod proxy;
pub mod runner;
pub mod shutdown;
mod utils;

pub use api::{AirdropApi, MiningStatus, ReferralInfo, SocialTask, SocialTaskList, UnichClient};
pub use config::{AirdropConfig, AirdropConfigBuilder};
pub use driver::{Account, AccountDriver, CycleOutcome, LoopExit};
pub use error::AirdropError;
pub use middleware::BearerAuthMiddleware;
pub use proxy::{assign_proxy, ProxyAgent};
pub use runner::{load_accounts, Runner};
pub use shutdown::{Shutdown, ShutdownTrigger};
pub use utils::{parse_lines, read_lines};
