/*
 * Responsibility
 * - Config 読み込み → 依存生成 (PgPool / AuthService) → Router 組み立て
 * - Middleware の適用 (認証 / CORS / HTTP plumbing)
 * - axum::serve() で起動
 */
use std::{panic, process, sync::Arc};

use anyhow::Result;
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{api, config::Config, middleware, services::auth::AuthService, state::AppState};

fn init_tracing() {
    // RUST_LOG があればそれを優先。
    // ex: RUST_LOG=info,people_api=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    // default hook は fallback として残す (stderr に location/payload が出る)
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // stderr は起動方法によっては見えないので、tracing にも必ず出す
        tracing::error!(?info, "panic");

        // development では即 abort して気付けるようにする。
        // production では default hook に任せてプロセスは生かす。
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    let abort_on_panic = !config.app_env.is_production();
    init_panic_hook(abort_on_panic);

    tracing::info!(
        "starting people api in {:?} mode on {} (auth {})",
        config.app_env,
        config.addr,
        if config.auth.is_some() {
            "enabled"
        } else {
            "disabled"
        },
    );

    let state = build_state(&config).await?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn build_state(config: &Config) -> Result<AppState> {
    let db = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await?;

    let auth = config.auth.as_ref().map(|a| {
        Arc::new(AuthService::new(
            &a.jwt_secret,
            &a.issuer,
            &a.audience,
            a.leeway_seconds,
        ))
    });

    Ok(AppState::new(db, auth))
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    // route_layer の gate は routes() 側で掛かる。ここは全 route 共通の layer のみ。
    let router = api::routes(&state);
    let router = middleware::auth::access::apply(router, state.clone());

    let router = router.with_state(state);

    let router = middleware::cors::apply(router, config);
    middleware::http::apply(router)
}
