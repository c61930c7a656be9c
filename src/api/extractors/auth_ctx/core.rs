use std::convert::Infallible;

use axum::extract::OptionalFromRequestParts;
use axum::http::request::Parts;

use super::AuthCtx;

/// Handler で `Option<AuthCtx>` として受け取るための extractor
/// middleware が insert 済みなら Some、匿名リクエストなら None
/// 「必須」の強制は gate (route_layer) 側の責務
impl<S> OptionalFromRequestParts<S> for AuthCtx
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(parts.extensions.get::<AuthCtx>().cloned())
    }
}
