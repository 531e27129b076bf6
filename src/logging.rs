//! Logging Module
//!
//! コマンドラインツール向けのログ出力設定。
//!
//! ライブラリ本体は`tracing`のイベントを発行するだけで、
//! サブスクライバーの登録はバイナリ側で行います。

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 標準エラー出力へのサブスクライバーを登録する
///
/// `RUST_LOG`が設定されていればそれに従い、未設定の場合は
/// `verbose`に応じて`debug`または`info`を使用します。
/// 2回目以降の呼び出しは無視されます。
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
