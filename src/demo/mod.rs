//! Console walkthroughs. Every demo prints what it does, prints failures
//! instead of returning them, and hands control back to the caller.

pub mod cache;
pub mod integration;
pub mod spreadsheet;

use crate::error::DemoError;
use std::fmt::Display;

/// Prints a ✅/❌ line for `result` and passes the value through.
pub(crate) fn report<T, D: Display>(result: Result<T, DemoError>, ok: impl FnOnce(&T) -> D) -> Option<T> {
    match result {
        Ok(value) => {
            println!("✅ {}", ok(&value));
            Some(value)
        }
        Err(e) => {
            print_error(&e);
            None
        }
    }
}

pub(crate) fn print_error(err: &DemoError) {
    println!("❌ {}", err);
    if err.is_connection() {
        println!("💡 Make sure the Redis server is running and the REDIS_* settings are correct.");
    }
}

pub fn show_help() {
    crate::utils::print_banner("❓ Help & Setup Instructions", 35);
    println!("📋 Prerequisites:");
    println!("  • A Rust toolchain (cargo)");
    println!("  • A Redis server (default 127.0.0.1:6379)");
    println!("\n🔧 Setup Steps:");
    println!("  1. Start Redis:");
    println!("     • Docker: docker run -d -p 6379:6379 redis:alpine");
    println!("     • Or a local install: redis-server");
    println!("  2. Optionally put REDIS_HOST, REDIS_PORT, REDIS_DB, REDIS_USERNAME,");
    println!("     REDIS_PASSWORD (or a single REDIS_URL) and DATA_DIR in a .env file");
    println!("  3. Run one of:");
    println!("     • cargo run --bin redis-excel        (this menu)");
    println!("     • cargo run --bin excel-demo");
    println!("     • cargo run --bin redis-demo");
    println!("     • cargo run --bin integration-demo");
    println!("\n📁 Project Structure:");
    println!("  • src/cache.rs - Redis client wrapper");
    println!("  • src/spreadsheet.rs - Excel/CSV reading, writing and analysis");
    println!("  • src/integration.rs - Spreadsheet caching and the task queue");
    println!("  • data/ - Sample data files (created on first run)");
    println!("\n💡 Tips:");
    println!("  • The Excel demo works without Redis");
    println!("  • The Redis demo needs a running Redis server");
    println!("  • The integration demo needs both");
    println!("  • LOG_LEVEL=debug shows every cache hit and miss on stderr");
}
