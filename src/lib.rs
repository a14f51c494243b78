pub mod cache;
pub mod config;
pub mod demo;
pub mod error;
pub mod integration; // Spreadsheets cached in Redis
pub mod spreadsheet;
pub mod table;
pub mod utils;

pub use cache::RedisClient;
pub use config::Config;
pub use error::{DemoError, Result};
pub use integration::SheetCache;
pub use spreadsheet::SpreadsheetProcessor;
pub use table::{Table, Value};
