#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tunewalk::runtime::run().await
}
