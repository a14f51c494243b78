// src/integration.rs
//! Spreadsheets cached in Redis: load-through caching of worksheets,
//! cached results of a few fixed processing operations, a Redis list used as
//! a FIFO task queue, and key statistics.

use crate::cache::RedisClient;
use crate::config::Config;
use crate::error::{DemoError, Result};
use crate::spreadsheet::SpreadsheetProcessor;
use crate::table::{Agg, Table, Value};
use crate::utils::timing::Timer;
use chrono::{Local, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

pub const EXCEL_DATA_PREFIX: &str = "excel_data";
pub const PROCESSED_PREFIX: &str = "processed";
pub const QUEUE_KEY: &str = "excel_processing_queue";

/// What gets stored under `excel_data:<file>:<sheet>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedTable {
    pub data: Vec<Map<String, JsonValue>>,
    pub columns: Vec<String>,
    pub cached_at: String,
    pub row_count: usize,
}

impl CachedTable {
    pub fn from_table(table: &Table) -> Self {
        Self {
            data: table.to_records(),
            columns: table.columns().to_vec(),
            cached_at: Utc::now().to_rfc3339(),
            row_count: table.shape().0,
        }
    }

    pub fn to_table(&self) -> Table {
        Table::from_records(&self.columns, &self.data)
    }
}

/// What gets stored under `processed:<operation>:<YYYYMMDD>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedResult {
    pub data: Vec<Map<String, JsonValue>>,
    pub columns: Vec<String>,
    pub operation: String,
    pub processed_at: String,
    pub row_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Cache,
    File,
}

#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub table: Table,
    pub source: LoadSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    DepartmentSummary,
    AgeGroups,
    HighPerformers,
}

impl Operation {
    pub const ALL: [Operation; 3] = [
        Operation::DepartmentSummary,
        Operation::AgeGroups,
        Operation::HighPerformers,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::DepartmentSummary => "department_summary",
            Operation::AgeGroups => "age_groups",
            Operation::HighPerformers => "high_performers",
        }
    }

    pub fn apply(&self, table: &Table) -> Result<Table> {
        match self {
            Operation::DepartmentSummary => department_summary(table),
            Operation::AgeGroups => age_groups(table),
            Operation::HighPerformers => high_performers(table),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = DemoError;

    fn from_str(s: &str) -> Result<Self> {
        Operation::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| DemoError::UnknownOperation(s.to_string()))
    }
}

fn department_summary(table: &Table) -> Result<Table> {
    table.require_columns(&["Department", "Salary", "Age"])?;
    table.group_by(
        "Department",
        &[
            ("Salary", Agg::Mean, "Avg Salary"),
            ("Salary", Agg::Count, "Count"),
            ("Salary", Agg::Sum, "Total Salary"),
            ("Age", Agg::Mean, "Avg Age"),
        ],
    )
}

/// Right-closed age bins.
const AGE_BINS: [(f64, f64, &str); 4] = [
    (0.0, 25.0, "<25"),
    (25.0, 35.0, "25-35"),
    (35.0, 50.0, "35-50"),
    (50.0, 100.0, "50+"),
];

fn age_groups(table: &Table) -> Result<Table> {
    table.require_columns(&["Age"])?;
    let ages: Vec<f64> = table
        .column("Age")
        .unwrap_or_default()
        .into_iter()
        .filter_map(Value::as_f64)
        .collect();

    let mut counts: Vec<(usize, &str, i64)> = AGE_BINS
        .iter()
        .enumerate()
        .map(|(order, (low, high, label))| {
            let n = ages.iter().filter(|a| **a > *low && **a <= *high).count();
            (order, *label, n as i64)
        })
        .collect();
    counts.sort_by(|a, b| b.2.cmp(&a.2).then(a.0.cmp(&b.0)));

    let mut out = Table::new(["Age Group", "Count"]);
    for (_, label, n) in counts {
        out.push_row(vec![Value::from(label), Value::Int(n)])?;
    }
    Ok(out)
}

fn high_performers(table: &Table) -> Result<Table> {
    table.require_columns(&["Salary"])?;
    let Some(threshold) = table.quantile("Salary", 0.75)? else {
        return Ok(table.head(0));
    };
    debug!("High performer salary threshold: {}", threshold);
    Ok(table.filter(|r| r.number("Salary").is_some_and(|s| s >= threshold)))
}

/// A queued processing request, stored as JSON in the queue list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub file: String,
    pub operation: String,
}

#[derive(Debug, Clone)]
pub enum TaskStatus {
    Completed { rows: usize, source: LoadSource },
    FileMissing(String),
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct TaskOutcome {
    pub task: Task,
    pub status: TaskStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub key: String,
    pub row_count: usize,
    pub cached_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub excel_data: usize,
    pub processed: usize,
    pub other: usize,
    pub total: usize,
    /// At most the first five spreadsheet caches.
    pub excel_entries: Vec<CacheEntry>,
}

impl CacheStats {
    /// Buckets keys by prefix. `excel_entries` is left for the caller to fill.
    pub fn classify<S: AsRef<str>>(keys: &[S]) -> Self {
        let mut stats = CacheStats {
            total: keys.len(),
            ..Default::default()
        };
        for key in keys {
            let key = key.as_ref();
            if key.starts_with("excel_data:") {
                stats.excel_data += 1;
            } else if key.starts_with("processed:") {
                stats.processed += 1;
            } else {
                stats.other += 1;
            }
        }
        stats
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PerformanceReport {
    pub cold: Duration,
    pub warm: Duration,
    /// `None` when the warm load was too fast to measure.
    pub speedup: Option<f64>,
}

impl PerformanceReport {
    pub fn new(cold: Duration, warm: Duration) -> Self {
        let speedup = (!warm.is_zero()).then(|| cold.as_secs_f64() / warm.as_secs_f64());
        Self { cold, warm, speedup }
    }
}

/// Redis + spreadsheet processor pair used by the combined demos.
#[derive(Debug, Clone)]
pub struct SheetCache {
    client: RedisClient,
    processor: SpreadsheetProcessor,
    config: Arc<Config>,
}

impl SheetCache {
    pub async fn connect(config: Arc<Config>) -> Result<Self> {
        let client = RedisClient::connect(&config).await?;
        let processor = SpreadsheetProcessor::new(&config)?;
        info!("Redis-Excel integration initialized");
        Ok(Self::new(client, processor, config))
    }

    pub fn new(client: RedisClient, processor: SpreadsheetProcessor, config: Arc<Config>) -> Self {
        Self {
            client,
            processor,
            config,
        }
    }

    pub fn client(&self) -> &RedisClient {
        &self.client
    }

    pub fn processor(&self) -> &SpreadsheetProcessor {
        &self.processor
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn cache_key(path: &Path, sheet: &str) -> String {
        let file = path
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        RedisClient::generate_key(EXCEL_DATA_PREFIX, &[file.as_str(), sheet])
    }

    pub fn processed_key(op: Operation) -> String {
        let day = Local::now().format("%Y%m%d").to_string();
        RedisClient::generate_key(PROCESSED_PREFIX, &[op.as_str(), day.as_str()])
    }

    /// Returns the cached copy when present, otherwise reads the sheet and
    /// caches it for `ttl_secs`.
    pub async fn cache_table(&self, path: &Path, sheet: &str, ttl_secs: u64) -> Result<LoadOutcome> {
        let key = Self::cache_key(path, sheet);
        if let Some(cached) = self.client.get_json::<CachedTable>(&key).await? {
            debug!("Data already cached for {}", path.display());
            return Ok(LoadOutcome {
                table: cached.to_table(),
                source: LoadSource::Cache,
            });
        }

        let table = self.processor.read_sheet(path, sheet)?;
        if table.is_empty() {
            return Err(DemoError::EmptySheet(format!("{} [{}]", path.display(), sheet)));
        }
        self.client
            .set_json(&key, &CachedTable::from_table(&table), Some(ttl_secs))
            .await?;
        info!("Cached {} rows under {} for {}s", table.shape().0, key, ttl_secs);
        Ok(LoadOutcome {
            table,
            source: LoadSource::File,
        })
    }

    pub async fn get_cached(&self, path: &Path, sheet: &str) -> Result<Option<CachedTable>> {
        self.client.get_json(&Self::cache_key(path, sheet)).await
    }

    /// Cache first, file second.
    pub async fn smart_load(&self, path: &Path, sheet: &str, ttl_secs: u64) -> Result<LoadOutcome> {
        if let Some(cached) = self.get_cached(path, sheet).await? {
            debug!("Retrieved {} rows from cache (cached at {})", cached.row_count, cached.cached_at);
            return Ok(LoadOutcome {
                table: cached.to_table(),
                source: LoadSource::Cache,
            });
        }
        debug!("Cache miss for {}, loading from file", path.display());
        self.cache_table(path, sheet, ttl_secs).await
    }

    /// Runs `op` and stores the result for the configured processed TTL.
    pub async fn process_and_cache(&self, table: &Table, op: Operation) -> Result<Table> {
        let result = op.apply(table)?;
        let record = ProcessedResult {
            data: result.to_records(),
            columns: result.columns().to_vec(),
            operation: op.as_str().to_string(),
            processed_at: Utc::now().to_rfc3339(),
            row_count: result.shape().0,
        };
        let key = Self::processed_key(op);
        self.client
            .set_json(&key, &record, Some(self.config.processed_ttl_secs))
            .await?;
        info!("Cached processing result {} under {}", op, key);
        Ok(result)
    }

    pub async fn get_processed(&self, op: Operation) -> Result<Option<ProcessedResult>> {
        self.client.get_json(&Self::processed_key(op)).await
    }

    pub async fn enqueue(&self, task: &Task) -> Result<usize> {
        let payload = serde_json::to_string(task)?;
        self.client.push_list(QUEUE_KEY, &payload).await
    }

    /// Oldest task first. A payload that is not a task is an error; it has
    /// already been removed from the queue.
    pub async fn dequeue(&self) -> Result<Option<Task>> {
        match self.client.pop_list_tail(QUEUE_KEY).await? {
            Some(payload) => Ok(Some(serde_json::from_str(&payload)?)),
            None => Ok(None),
        }
    }

    pub async fn queue_len(&self) -> Result<usize> {
        self.client.list_len(QUEUE_KEY).await
    }

    /// Drains the queue. Per-task failures are recorded in the outcome and the
    /// loop moves on; only cache errors while popping stop it.
    pub async fn run_queue(&self) -> Result<Vec<TaskOutcome>> {
        let mut outcomes = Vec::new();
        loop {
            let task = match self.dequeue().await {
                Ok(Some(task)) => task,
                Ok(None) => break,
                Err(DemoError::Json(e)) => {
                    warn!("Dropping malformed queue entry: {}", e);
                    continue;
                }
                Err(e) => return Err(e),
            };
            let status = self.run_task(&task).await;
            outcomes.push(TaskOutcome { task, status });
        }
        Ok(outcomes)
    }

    async fn run_task(&self, task: &Task) -> TaskStatus {
        let path = self.processor.data_path(&task.file);
        if !path.exists() {
            return TaskStatus::FileMissing(path.display().to_string());
        }
        let op = match task.operation.parse::<Operation>() {
            Ok(op) => op,
            Err(e) => return TaskStatus::Failed(e.to_string()),
        };
        let sheet = self.processor.default_sheet().to_string();
        let loaded = match self
            .smart_load(&path, &sheet, self.config.redis_default_ttl_secs)
            .await
        {
            Ok(loaded) => loaded,
            Err(e) => return TaskStatus::Failed(e.to_string()),
        };
        match self.process_and_cache(&loaded.table, op).await {
            Ok(result) => TaskStatus::Completed {
                rows: result.shape().0,
                source: loaded.source,
            },
            Err(e) => TaskStatus::Failed(e.to_string()),
        }
    }

    pub async fn analytics(&self) -> Result<CacheStats> {
        let keys = self.client.keys("*").await?;
        let mut stats = CacheStats::classify(&keys);
        for key in keys.iter().filter(|k| k.starts_with("excel_data:")).take(5) {
            if let Ok(Some(cached)) = self.client.get_json::<CachedTable>(key).await {
                stats.excel_entries.push(CacheEntry {
                    key: key.clone(),
                    row_count: cached.row_count,
                    cached_at: cached.cached_at,
                });
            }
        }
        Ok(stats)
    }

    /// Clears the sheet's cache entry, then times a cold and a warm load.
    pub async fn compare_performance(&self, path: &Path) -> Result<PerformanceReport> {
        let sheet = self.processor.default_sheet().to_string();
        let ttl = self.config.redis_default_ttl_secs;

        let mut timer = Timer::start("performance comparison");
        self.client.delete(&Self::cache_key(path, &sheet)).await?;
        timer.checkpoint("cache cleared");
        self.smart_load(path, &sheet, ttl).await?;
        timer.checkpoint("cold load");
        self.smart_load(path, &sheet, ttl).await?;
        timer.checkpoint("warm load");

        let cold = timer.lap("cold load").unwrap_or_default();
        let warm = timer.lap("warm load").unwrap_or_default();
        timer.finish();
        Ok(PerformanceReport::new(cold, warm))
    }
}
