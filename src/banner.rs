//! Startup banner.

use log::info;

pub const BANNER: &str = r#"
  _   _       _      _          _    _         _
 | | | |_ __ (_) ___| |__      / \  (_)_ __ __| |_ __ ___  _ __
 | | | | '_ \| |/ __| '_ \    / _ \ | | '__/ _` | '__/ _ \| '_ \
 | |_| | | | | | (__| | | |  / ___ \| | | | (_| | | | (_) | |_) |
  \___/|_| |_|_|\___|_| |_| /_/   \_\_|_|  \__,_|_|  \___/| .__/
                                                           |_|
"#;

/// Log the banner and crate version once at startup.
pub fn print_banner() {
    for line in BANNER.lines().filter(|line| !line.is_empty()) {
        info!("{}", line);
    }
    info!("unich-airdrop v{}", env!("CARGO_PKG_VERSION"));
}
