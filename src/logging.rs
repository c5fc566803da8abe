//! 診断ログ（tracing）の初期化
//!
//! 利用者向けの進捗表示は `println!`、内部イベントは `tracing` に出す。

use tracing_subscriber::EnvFilter;

/// `RUST_LOG` が無ければ warn、`--verbose` 指定時は debug
pub fn init(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // 二重初期化（テストなど）は無視する
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
