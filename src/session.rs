use std::io::Write;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

use crate::cleaner::{self, ParseError};
use crate::db::{Db, TOTAL_PARAMS_REMOVED};
use crate::logging::Timer;
use crate::models::CleanResult;

/// Interactive loop: one trimmed line of input per turn, either a command
/// or a candidate URL. Counter failures are logged and never end the
/// session.
pub async fn run_session(db: Db) -> Result<()> {
    println!("Paste a URL to strip its tracking parameters.");
    println!("Commands: help, stats, quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    prompt()?;
    while let Some(line) = lines.next_line().await? {
        let input = line.trim();

        match input {
            "" => println!("Enter a URL to clean."),
            "quit" | "exit" => break,
            "help" => print_help(),
            "stats" => match db.get_counter(TOTAL_PARAMS_REMOVED).await {
                Ok(total) => println!("Total tracking parameters removed: {}", total),
                Err(e) => warn!(error = %e, "Failed to read removal counter"),
            },
            url => handle_url(&db, url).await,
        }
        prompt()?;
    }

    Ok(())
}

/// One-shot mode for URLs passed on the command line.
pub async fn clean_batch(db: &Db, urls: &[String], json: bool) -> Result<()> {
    for raw in urls {
        let input = raw.trim();
        if input.is_empty() {
            continue;
        }

        let _timer = Timer::new("clean_url");
        match cleaner::clean(input) {
            Ok(result) => {
                if json {
                    println!("{}", serde_json::to_string(&result)?);
                } else {
                    print_result(&result);
                }
                if let Err(e) = db
                    .increment_counter(TOTAL_PARAMS_REMOVED, result.removed_count as i64)
                    .await
                {
                    warn!(error = %e, "Failed to update removal counter");
                }
            }
            Err(ParseError::InvalidFormat) => eprintln!("Invalid URL format: {}", input),
        }
    }

    Ok(())
}

async fn handle_url(db: &Db, input: &str) {
    let _timer = Timer::new("clean_url");
    match cleaner::clean(input) {
        Ok(result) => {
            print_result(&result);
            match add_to_total(db, &result).await {
                Ok(total) => println!("Total tracking parameters removed: {}", total),
                Err(e) => warn!(error = %e, "Failed to update removal counter"),
            }
        }
        Err(ParseError::InvalidFormat) => println!("Invalid URL format"),
    }
}

async fn add_to_total(db: &Db, result: &CleanResult) -> Result<i64> {
    db.increment_counter(TOTAL_PARAMS_REMOVED, result.removed_count as i64)
        .await?;
    db.get_counter(TOTAL_PARAMS_REMOVED).await
}

fn print_result(result: &CleanResult) {
    println!("Original: {}", result.original);
    println!("Cleaned:  {}", result.cleaned);
    if result.removed_count == 0 {
        println!("No tracking parameters found");
    } else {
        println!("Removed {} tracking parameter(s)", result.removed_count);
    }
}

fn print_help() {
    println!("Paste any URL to remove known tracking parameters from it.");
    println!("  stats       show the running total of removed parameters");
    println!("  quit, exit  leave the session");
}

fn prompt() -> Result<()> {
    print!("> ");
    std::io::stdout().flush()?;
    Ok(())
}
