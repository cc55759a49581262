//! Interactive study loop over a packaged deck.
//!
//! Lists the package's categories, lets the user pick one by number, draws
//! a random problem from it, and reveals the answer on request.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use apkg_core::DeckArchive;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Package filename used when no path is given on the command line.
const DEFAULT_ARCHIVE: &str = "MCAT_Milesdown.apkg";

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_ARCHIVE));
    if !path.is_file() {
        anyhow::bail!(
            "archive not found: {} (pass the path to an .apkg file)",
            path.display()
        );
    }

    let archive = DeckArchive::new(&path);
    let mut rng = rand::rng();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        let categories = archive.categories();
        println!("\nAvailable categories:");
        for (i, category) in categories.iter().enumerate() {
            println!("{}. {}", i + 1, category);
        }

        print!("\nSelect a category (number) or 'q' to quit: ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else { break };
        let input = line?;
        let input = input.trim();
        if input.eq_ignore_ascii_case("q") {
            break;
        }
        let Ok(selection) = input.parse::<usize>() else {
            println!("Please enter a valid number.");
            continue;
        };
        if selection == 0 || selection > categories.len() {
            println!(
                "Invalid selection. Please enter a number between 1 and {}.",
                categories.len()
            );
            continue;
        }
        let category = &categories[selection - 1];
        println!("\nSelected category: {category}");

        match archive.choose_problem(category, &mut rng) {
            Ok(Some(problem)) => {
                println!("\nQuestion: {}", problem.question);
                print!("Press Enter to reveal the answer...");
                io::stdout().flush()?;
                let _ = lines.next();
                println!("Answer: {}", problem.answer);
            }
            Ok(None) => println!("No problems found in category: {category}"),
            Err(err) => {
                tracing::error!(error = %err, "failed to draw a problem");
                println!("Could not read the archive: {err}");
            }
        }
    }

    Ok(())
}
