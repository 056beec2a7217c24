#[tokio::main]
async fn main() -> eyre::Result<()> {
    agritrack::run().await
}
