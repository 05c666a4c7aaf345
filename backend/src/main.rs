#[tokio::main]
async fn main() -> anyhow::Result<()> {
    restaurant_server::start_server().await
}
