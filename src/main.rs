// src/main.rs
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use redis_excel::{
    config::{self, Config},
    demo,
    utils::{print_banner, rule},
};
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

#[derive(Parser)]
#[command(name = "redis-excel")]
#[command(author, version, about = "Redis caching and Excel processing walkthroughs")]
#[command(disable_help_subcommand = true)]
struct Cli {
    /// Run one demo and exit instead of showing the menu
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Commands {
    /// Excel operations and multiple sheets
    Excel,
    /// Redis basic operations and the caching pattern
    Redis,
    /// Redis + Excel integration and the task queue
    Integration,
    /// Cold vs warm load timing
    Performance,
    /// Setup instructions
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    Run(Commands),
    Exit,
}

impl MenuChoice {
    fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::Run(Commands::Excel)),
            "2" => Some(MenuChoice::Run(Commands::Redis)),
            "3" => Some(MenuChoice::Run(Commands::Integration)),
            "4" => Some(MenuChoice::Run(Commands::Performance)),
            "5" => Some(MenuChoice::Run(Commands::Help)),
            "0" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

fn show_menu() {
    print_banner("🚀 Redis + Excel Tutorial Project", 50);
    println!("Choose an option:");
    println!("1. 📊 Excel Operations Demo");
    println!("2. 🔗 Redis Operations Demo");
    println!("3. 🔄 Redis + Excel Integration Demo");
    println!("4. ⚡ Performance Comparison");
    println!("5. ❓ Help & Setup Instructions");
    println!("0. 🚪 Exit");
    println!("{}", rule(50));
}

async fn run(command: Commands, config: &Arc<Config>) {
    match command {
        Commands::Excel => {
            demo::spreadsheet::run_excel_operations(config);
            demo::spreadsheet::run_multiple_sheets(config);
        }
        Commands::Redis => {
            demo::cache::run_basic_operations(config).await;
            demo::cache::run_caching_pattern(config).await;
        }
        Commands::Integration => demo::integration::run_integration(Arc::clone(config)).await,
        Commands::Performance => demo::integration::run_performance(Arc::clone(config)).await,
        Commands::Help => demo::show_help(),
    }
}

/// Prints `text` without a newline and reads one line. `None` on end of input.
async fn prompt(lines: &mut Lines<BufReader<Stdin>>, text: &str) -> Result<Option<String>> {
    print!("{}", text);
    std::io::stdout().flush().context("flushing stdout")?;
    lines.next_line().await.context("reading stdin")
}

async fn interactive(config: Arc<Config>) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        show_menu();
        let Some(input) = prompt(&mut lines, "Enter your choice (0-5): ").await? else {
            println!("\n👋 Goodbye!");
            return Ok(());
        };
        match MenuChoice::parse(&input) {
            Some(MenuChoice::Exit) => {
                println!("👋 Goodbye!");
                return Ok(());
            }
            Some(MenuChoice::Run(command)) => run(command, &config).await,
            None => println!("❌ Invalid choice. Please enter 0-5."),
        }
        if prompt(&mut lines, "\nPress Enter to continue...").await?.is_none() {
            return Ok(());
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = config::start().context("loading configuration")?;
    info!("Starting with Redis at {}", config.redacted_url());

    match cli.command {
        Some(command) => run(command, &config).await,
        None => interactive(config).await?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_choices() {
        assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::Run(Commands::Excel)));
        assert_eq!(MenuChoice::parse(" 4\n"), Some(MenuChoice::Run(Commands::Performance)));
        assert_eq!(MenuChoice::parse("0"), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("6"), None);
        assert_eq!(MenuChoice::parse("excel"), None);
        assert_eq!(MenuChoice::parse(""), None);
    }

    #[test]
    fn subcommands_parse() {
        let cli = Cli::try_parse_from(["redis-excel", "integration"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Integration));
        let cli = Cli::try_parse_from(["redis-excel"]).unwrap();
        assert_eq!(cli.command, None);
    }
}
