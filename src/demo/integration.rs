// src/demo/integration.rs
use super::{print_error, report};
use crate::config::Config;
use crate::integration::{LoadOutcome, LoadSource, Operation, SheetCache, Task, TaskStatus};
use crate::utils::print_banner;
use std::sync::Arc;

async fn connect(config: Arc<Config>) -> Option<SheetCache> {
    match SheetCache::connect(config).await {
        Ok(cache) => Some(cache),
        Err(e) => {
            println!("❌ Could not start the integration demo");
            print_error(&e);
            None
        }
    }
}

fn describe_load(outcome: &LoadOutcome) -> String {
    let from = match outcome.source {
        LoadSource::Cache => "cache",
        LoadSource::File => "file (now cached)",
    };
    format!("Loaded {} rows from {}", outcome.table.shape().0, from)
}

pub async fn run_integration(config: Arc<Config>) {
    print_banner("🔗 Redis + Excel Integration Demo", 40);
    let Some(cache) = connect(config).await else {
        return;
    };
    let processor = cache.processor();
    let Some(sample) = report(processor.create_sample_data(), |p| {
        format!("Created sample Excel file: {}", p.display())
    }) else {
        return;
    };
    let sheet = processor.default_sheet().to_string();
    let ttl = cache.config().redis_default_ttl_secs;

    println!("\n📦 Smart loading (first load reads the file):");
    let Some(first) = report(cache.smart_load(&sample, &sheet, ttl).await, describe_load) else {
        return;
    };
    println!("\n📦 Smart loading again (should come from cache):");
    report(cache.smart_load(&sample, &sheet, ttl).await, describe_load);

    println!("\n⚙️ Processing and caching results:");
    for op in Operation::ALL {
        if let Some(result) = report(cache.process_and_cache(&first.table, op).await, |t| {
            format!("{}: {} rows cached for {}s", op, t.shape().0, cache.config().processed_ttl_secs)
        }) {
            println!("{}", result);
        }
    }
    for op in Operation::ALL {
        match cache.get_processed(op).await {
            Ok(Some(found)) => println!(
                "💨 {} available from cache ({} rows, processed at {})",
                found.operation, found.row_count, found.processed_at
            ),
            Ok(None) => println!("❓ {} not cached", op),
            Err(e) => print_error(&e),
        }
    }

    println!("\n📬 Task queue:");
    let file = crate::config::settings::SAMPLE_FILE_NAME;
    for op in Operation::ALL {
        let task = Task {
            file: file.to_string(),
            operation: op.as_str().to_string(),
        };
        report(cache.enqueue(&task).await, |len| {
            format!("Queued {} on {} (queue length {})", task.operation, task.file, len)
        });
    }
    match cache.run_queue().await {
        Ok(outcomes) => {
            for outcome in outcomes {
                let task = &outcome.task;
                match outcome.status {
                    TaskStatus::Completed { rows, source } => println!(
                        "✅ Processed {} on {}: {} rows (data from {})",
                        task.operation,
                        task.file,
                        rows,
                        if source == LoadSource::Cache { "cache" } else { "file" }
                    ),
                    TaskStatus::FileMissing(path) => println!("❌ File not found: {}", path),
                    TaskStatus::Failed(reason) => {
                        println!("❌ Task {} on {} failed: {}", task.operation, task.file, reason)
                    }
                }
            }
        }
        Err(e) => print_error(&e),
    }

    println!("\n📈 Cache analytics:");
    match cache.analytics().await {
        Ok(stats) => {
            println!("🔑 Total keys: {}", stats.total);
            println!("📊 Excel data caches: {}", stats.excel_data);
            println!("⚙️ Processed results: {}", stats.processed);
            println!("📦 Other keys: {}", stats.other);
            for entry in &stats.excel_entries {
                println!("  • {}: {} rows, cached at {}", entry.key, entry.row_count, entry.cached_at);
            }
        }
        Err(e) => print_error(&e),
    }
}

pub async fn run_performance(config: Arc<Config>) {
    print_banner("⚡ Performance Comparison", 30);
    let Some(cache) = connect(config).await else {
        return;
    };
    let Some(sample) = report(cache.processor().create_sample_data(), |p| {
        format!("Created sample Excel file: {}", p.display())
    }) else {
        return;
    };

    match cache.compare_performance(&sample).await {
        Ok(perf) => {
            println!("📁 Load from file: {:.3} seconds", perf.cold.as_secs_f64());
            println!("💨 Load from cache: {:.3} seconds", perf.warm.as_secs_f64());
            match perf.speedup {
                Some(x) => println!("🚀 Cache is {:.1}x faster", x),
                None => println!("🚀 Cache load was too fast to measure"),
            }
        }
        Err(e) => print_error(&e),
    }
}
