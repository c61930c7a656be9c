//! 認証必須 route のための gate。
//!
//! - access middleware が AuthCtx を入れているかだけを見る
//! - 入っていなければ 401 (固定メッセージ) で打ち切る
//! - token 検証そのものは access middleware の責務

use axum::{
    Router,
    body::Body,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::api::extractors::AuthCtx;
use crate::error::AppError;
use crate::state::AppState;

/// 認証必須にしたい route 群へ gate を適用する。
///
/// route_layer なので、この Router に登録済みの route だけに掛かる
/// (マッチしないリクエストは 404 のまま)。
pub fn apply(router: Router<AppState>) -> Router<AppState> {
    router.route_layer(middleware::from_fn(require_identity))
}

async fn require_identity(req: Request<Body>, next: Next) -> Result<Response, AppError> {
    if req.extensions().get::<AuthCtx>().is_none() {
        return Err(AppError::Unauthorized);
    }

    Ok(next.run(req).await)
}
