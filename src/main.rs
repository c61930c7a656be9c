/*
 * Responsibility
 * - tokio runtime の起動と app::run() の呼び出しのみ
 * - モジュールツリーは lib.rs 側 (tests からも使うため)
 */
use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    people_api::app::run().await
}
