/*
 * Responsibility
 * - GET / (welcome テキスト、疎通用)
 * - store には触らない
 */
pub async fn root() -> &'static str {
    "welcome to the people api"
}
