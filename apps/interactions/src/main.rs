//! # Kasa Interactions サーバー
//!
//! Discord の Interactions Endpoint URL として登録する API サーバー。
//!
//! ## 役割
//!
//! - **署名検証**: Discord からのリクエストを Ed25519 署名で検証する
//! - **Ping 応答**: エンドポイント登録時の疎通確認に Pong を返す
//! - **傘の要否**: スラッシュコマンドに今日の降水確率から傘の要否を返す
//!
//! ```text
//! ┌──────────────┐  POST /   ┌──────────────┐   GET    ┌──────────────┐
//! │   Discord    │──────────→│ Interactions │─────────→│ 天気予報 API │
//! └──────────────┘           └──────────────┘          └──────────────┘
//! ```
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `INTERACTIONS_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `INTERACTIONS_PORT` | No | ポート番号（デフォルト: `3000`） |
//! | `DISCORD_PUBLIC_KEY` | **Yes** | Discord アプリケーションの公開鍵（16 進） |
//! | `LOG_FORMAT` | No | `json` または `pretty`（デフォルト: `pretty`） |
//! | `RUST_LOG` | No | ログフィルタ（デフォルト: `info,kasa=debug`） |
//!
//! ## 起動方法
//!
//! ```bash
//! DISCORD_PUBLIC_KEY=... cargo run -p kasa-interactions
//! ```

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context as _;
use kasa_infra::{
    Ed25519SignatureVerifier,
    SignatureVerifier,
    TsukumijimaWeatherClient,
    WeatherForecastClient,
};
use kasa_interactions::{
    app::build_app,
    config::InteractionsConfig,
    handler::InteractionState,
    usecase::UmbrellaAdvisoryUseCaseImpl,
};
use kasa_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

/// Interactions サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    // トレーシング初期化
    init_tracing(TracingConfig::from_env("interactions"));
    let _tracing_guard = tracing::info_span!("app", service = "interactions").entered();

    // 設定読み込み
    let config = InteractionsConfig::from_env().context("設定の読み込みに失敗しました")?;

    tracing::info!(
        "Interactions サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    // 依存コンポーネントを初期化
    let verifier: Arc<dyn SignatureVerifier> = Arc::new(
        Ed25519SignatureVerifier::from_hex(&config.discord_public_key)
            .context("DISCORD_PUBLIC_KEY を公開鍵として読み込めません")?,
    );
    let weather_client: Arc<dyn WeatherForecastClient> = Arc::new(TsukumijimaWeatherClient::new());
    let advisory = UmbrellaAdvisoryUseCaseImpl::new(weather_client);
    let state = Arc::new(InteractionState {
        verifier,
        advisory: Arc::new(advisory),
    });

    let app = build_app(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("アドレスのパースに失敗しました")?;

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Interactions サーバーが起動しました: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
