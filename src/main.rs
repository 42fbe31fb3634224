use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    anagrams::cli::run_cli().await
}
