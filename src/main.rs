use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    wordpyramid::cli::run_cli().await
}
