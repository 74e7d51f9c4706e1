use anyhow::Result;
use clap::Parser;

use stitchlog::web::{self, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    web::run(cli).await
}
