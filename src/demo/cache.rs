// src/demo/cache.rs
use super::{print_error, report};
use crate::cache::RedisClient;
use crate::config::Config;
use crate::error::Result;
use crate::utils::print_banner;
use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEMO_KEYS: [&str; 6] = ["greeting", "temp_key", "user:1", "todo_list", "tags", "product:1"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub age: u32,
    pub email: String,
    pub skills: Vec<String>,
}

async fn connect(config: &Config) -> Option<RedisClient> {
    match RedisClient::connect(config).await {
        Ok(client) => {
            println!("✅ Connected to Redis at {}", client.endpoint());
            Some(client)
        }
        Err(e) => {
            println!("❌ Failed to connect to Redis at {}", config.endpoint());
            print_error(&e);
            None
        }
    }
}

pub async fn run_basic_operations(config: &Config) {
    print_banner("🔗 Redis Basic Operations Demo", 40);
    let Some(client) = connect(config).await else {
        return;
    };

    println!("\n📝 String Operations:");
    report(client.set_string("greeting", "Hello Redis!", None).await, |_| {
        "Stored: greeting = Hello Redis!"
    });
    show_string(&client, "greeting").await;
    if report(client.set_string("temp_key", "This will expire", Some(10)).await, |_| {
        "Stored: temp_key = This will expire"
    })
    .is_some()
    {
        if let Ok(Some(ttl)) = client.ttl("temp_key").await {
            println!("   (expires in {} seconds)", ttl);
        }
    }
    show_string(&client, "temp_key").await;

    println!("\n📦 JSON Operations:");
    let user = UserProfile {
        name: "John Doe".to_string(),
        age: 30,
        email: "john@example.com".to_string(),
        skills: vec!["Rust".to_string(), "Redis".to_string(), "Excel".to_string()],
    };
    report(client.set_json("user:1", &user, None).await, |_| format!("Stored JSON: user:1 = {:?}", user));
    match client.get_json::<UserProfile>("user:1").await {
        Ok(Some(found)) => println!("✅ Retrieved JSON: user:1 = {:?}", found),
        Ok(None) => println!("❌ Key not found: user:1"),
        Err(e) => print_error(&e),
    }

    println!("\n📋 List Operations:");
    for task in ["Task 1", "Task 2", "Task 3"] {
        report(client.push_list("todo_list", task).await, |_| format!("Added to list todo_list: {}", task));
    }
    report(client.list_range("todo_list", 0, -1).await, |items| format!("List todo_list: {:?}", items));

    println!("\n🏷️ Set Operations:");
    for tag in ["rust", "redis", "excel", "rust"] {
        report(client.add_to_set("tags", tag).await, |added| {
            if *added {
                format!("Added to set tags: {}", tag)
            } else {
                format!("Already in set tags: {}", tag)
            }
        });
    }
    report(client.set_members("tags").await, |members| format!("Set tags: {:?}", members));

    println!("\n🏠 Hash Operations:");
    for (field, value) in [("name", "Laptop"), ("price", "999.99"), ("category", "Electronics")] {
        report(client.set_hash("product:1", field, value).await, |_| {
            format!("Set hash product:1[{}] = {}", field, value)
        });
    }
    report(client.get_hash_all("product:1").await, |all| format!("Hash product:1: {:?}", all));
    report(client.get_hash_field("product:1", "name").await, |name| {
        format!("Hash product:1[name] = {}", name.as_deref().unwrap_or("<none>"))
    });

    println!("\n🔑 Key Management:");
    report(client.keys("*").await, |keys| {
        format!("Found {} keys matching '*': {:?}", keys.len(), keys)
    });
    for key in ["greeting", "missing_key"] {
        report(client.exists(key).await, |found| format!("Key {} exists: {}", key, found));
    }

    println!("\n🧹 Cleanup:");
    for key in DEMO_KEYS {
        match client.delete(key).await {
            Ok(true) => println!("✅ Deleted key: {}", key),
            Ok(false) => println!("❌ Key not found: {}", key),
            Err(e) => print_error(&e),
        }
    }
}

async fn show_string(client: &RedisClient, key: &str) {
    match client.get_string(key).await {
        Ok(Some(value)) => println!("✅ Retrieved: {} = {}", key, value),
        Ok(None) => println!("❌ Key not found: {}", key),
        Err(e) => print_error(&e),
    }
}

/// The function being cached: `n² + n + 1`.
pub fn expensive_computation(n: i64) -> i64 {
    n * n + n + 1
}

/// Where a `cached_computation` answer came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    Hit(i64),
    Computed(i64),
}

impl Lookup {
    pub fn value(&self) -> i64 {
        match self {
            Lookup::Hit(v) | Lookup::Computed(v) => *v,
        }
    }
}

/// Cache-aside: `computation:<n>` is returned when present, otherwise the
/// result is computed after `delay` and stored for `ttl_secs`. A cached value
/// that is not an integer is treated as a miss and overwritten.
pub async fn cached_computation(client: &RedisClient, n: i64, delay: Duration, ttl_secs: u64) -> Result<Lookup> {
    let n_str = n.to_string();
    let key = RedisClient::generate_key("computation", &[n_str.as_str()]);
    if let Some(cached) = client.get_string(&key).await? {
        match cached.parse::<i64>() {
            Ok(value) => return Ok(Lookup::Hit(value)),
            Err(_) => debug!("Ignoring non-numeric cache entry {} = {}", key, cached),
        }
    }
    tokio::time::sleep(delay).await;
    let result = expensive_computation(n);
    client.set_string(&key, &result.to_string(), Some(ttl_secs)).await?;
    Ok(Lookup::Computed(result))
}

pub async fn run_caching_pattern(config: &Config) {
    print_banner("💾 Caching Pattern Demo", 30);
    let Some(client) = connect(config).await else {
        return;
    };

    for n in [5, 3, 5, 3, 7] {
        println!("\n📊 Getting result for {}:", n);
        match cached_computation(&client, n, Duration::from_secs(2), 60).await {
            Ok(lookup) => {
                match lookup {
                    Lookup::Hit(_) => println!("💨 Cache hit!"),
                    Lookup::Computed(_) => println!("💾 Cache miss - computed after a simulated 2s delay"),
                }
                println!("Result: {}", lookup.value());
            }
            Err(e) => print_error(&e),
        }
    }
}
