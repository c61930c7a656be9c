/*
 * Responsibility
 * - ブラウザ向け CORS ポリシー
 *   - development: どの origin からでも叩ける (credentials なし)
 *   - production: Config の allowlist に完全一致した origin のみ
 * - allowlist が空なら何も許可しない (誤って全開放するよりは安全側)
 */
use axum::Router;
use axum::http::{HeaderName, HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::Config;

pub fn apply(router: Router, config: &Config) -> Router {
    let origin = if config.app_env.is_production() {
        let allowed = config
            .cors_allowed_origins
            .iter()
            .filter_map(|o| HeaderValue::from_str(o).ok());

        AllowOrigin::list(allowed)
    } else {
        AllowOrigin::from(Any)
    };

    // 注意: wildcard origin と allow_credentials(true) は組み合わせない
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static("x-request-id"),
        ])
        .max_age(std::time::Duration::from_secs(60 * 10));

    router.layer(cors)
}
