use clap::Parser;
use log::warn;
use std::path::PathBuf;
use std::time::Duration;
use unich_airdrop::banner::print_banner;
use unich_airdrop::config::{DEFAULT_BASE_URL, DEFAULT_REFERRAL_CODE};
use unich_airdrop::{shutdown, AirdropConfig, Runner, UnichClient};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// File with one bearer token per line
    #[arg(long, env = "UNICH_TOKENS", default_value = "tokens.txt")]
    tokens: PathBuf,

    /// File with one proxy URI per line (http://, socks4://, socks5://)
    #[arg(long, env = "UNICH_PROXIES", default_value = "proxy.txt")]
    proxies: PathBuf,

    /// Referral code applied to accounts that have none
    #[arg(long, env = "UNICH_REF_CODE", default_value = DEFAULT_REFERRAL_CODE)]
    ref_code: String,

    #[arg(long, env = "UNICH_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Per-request timeout in seconds; requests are unbounded when omitted
    #[arg(long, env = "UNICH_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut builder = AirdropConfig::builder()
        .base_url(args.base_url)
        .referral_code(args.ref_code)
        .tokens_file(args.tokens)
        .proxy_file(args.proxies);
    if let Some(secs) = args.timeout_secs {
        builder = builder.request_timeout(Duration::from_secs(secs));
    }
    let config = builder.build()?;

    print_banner();

    let (trigger, shutdown) = shutdown::channel();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Received Ctrl-C, stopping account loops");
            trigger.trigger();
        }
    });

    let runner = Runner::new(config);
    let config = runner.config();
    runner
        .run(
            |account| UnichClient::new(config.clone(), &account.token, &account.proxy),
            shutdown,
        )
        .await;

    Ok(())
}
