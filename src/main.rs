use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    forum_api::app::run().await
}
