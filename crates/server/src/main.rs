#[tokio::main]
async fn main() -> anyhow::Result<()> {
    studymate_server::start().await
}
