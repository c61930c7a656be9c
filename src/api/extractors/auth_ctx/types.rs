/*
 * Responsibility
 * - Handler から見える「認証済みコンテキスト」の型
 * - middleware が検証して request extensions に格納し、handler はこの型だけを受け取る
 *
 * Notes
 * - ID token の検証ロジックは middleware/services 側の責務
 * - ここは「型（契約）」として固定化する
 */

/// 認証済みのリクエストに付与されるコンテキスト
///
/// - `uid` は identity provider の subject identifier (不透明な文字列)
/// - 所有者スコープ (list の絞り込み・create の uid 注入) はこの値だけを使う
#[derive(Debug, Clone)]
pub struct AuthCtx {
    pub uid: String,
}

impl AuthCtx {
    pub fn new(uid: String) -> Self {
        Self { uid }
    }
}
