// src/bin/redis_demo.rs
use anyhow::{Context, Result};
use redis_excel::{config, demo};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = config::start().context("loading configuration")?;

    println!("🚀 Redis Tutorial");
    demo::cache::run_basic_operations(&config).await;
    demo::cache::run_caching_pattern(&config).await;
    println!("\n✅ Redis demo completed!");
    Ok(())
}
