// src/bin/integration_demo.rs
use anyhow::{Context, Result};
use redis_excel::{config, demo};
use std::sync::Arc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = config::start().context("loading configuration")?;

    println!("🚀 Redis + Excel Integration Tutorial");
    demo::integration::run_integration(Arc::clone(&config)).await;
    demo::integration::run_performance(config).await;
    println!("\n✅ Integration demo completed!");
    Ok(())
}
