use clap::Parser;
use setup_guide_tui::Cli;
use setup_guide_tui::run_main;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_main(cli).await?;
    Ok(())
}
