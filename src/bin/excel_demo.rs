// src/bin/excel_demo.rs
use anyhow::{Context, Result};
use redis_excel::{config, demo};

fn main() -> Result<()> {
    let config = config::start().context("loading configuration")?;

    println!("🚀 Excel Tutorial");
    demo::spreadsheet::run_excel_operations(&config);
    demo::spreadsheet::run_multiple_sheets(&config);
    println!("\n✅ Excel demo completed!");
    println!("📁 Check the '{}' directory for generated files", config.data_dir.display());
    Ok(())
}
