//! Authorization ヘッダの ID token 検証 → AuthCtx を extensions に入れる
//!
//! - ヘッダが無いリクエストはそのまま通す (gate の無い route は匿名のままでよい)
//! - `Bearer ` prefix は素朴に strip する (付いていなければそのまま verifier に渡して弾かせる)
//! - 検証に失敗したリクエストは 400 で打ち切り、handler には到達させない

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::api::extractors::AuthCtx;
use crate::error::AppError;
use crate::state::AppState;

/// 認証 middleware をルーター全体に適用する。
///
/// 例：
/// ```ignore
/// let router = api::routes(&state);
/// let router = middleware::auth::access::apply(router, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let Some(auth) = state.auth.as_ref() else {
        // basic variant: 認証レイヤなし。ヘッダが付いていても検証しない。
        return Ok(next.run(req).await);
    };

    let Some(header) = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
    else {
        // 匿名アクセスはここでは拒否しない。route ごとの gate が判断する。
        return Ok(next.run(req).await);
    };

    let token = header.strip_prefix("Bearer ").unwrap_or(header);

    let identity = match auth.verify_identity(token) {
        Ok(identity) => identity,
        Err(err) => {
            tracing::warn!(
                error = ?err,
                "id token verification failed"
            );
            return Err(AppError::bad_request("INVALID_TOKEN", err.to_string()));
        }
    };

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(AuthCtx::new(identity.uid));

    Ok(next.run(req).await)
}
