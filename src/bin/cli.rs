//! Interactive terminal front end for the news question-answering pipeline.

use std::error::Error;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use colored::Colorize;
use composer::{Composer, ProfileAnswerModel};
use llm_service::service_profiles::LlmServiceProfiles;
use news_retriever::embed::llm::ProfileEmbedder;
use news_retriever::{AnswerMode, IndicatifProgress, Retriever, RetrieverConfig};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv()?;

    // Keep the terminal quiet by default; the chat itself is the output.
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("warn"))?;
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();

    let profiles = Arc::new(LlmServiceProfiles::from_env()?);
    let embedder = Arc::new(ProfileEmbedder::new(profiles.clone()));
    let composer = Composer::new(Arc::new(ProfileAnswerModel::new(profiles.clone())));

    println!("{}", "Financial News Chatbot (CLI)".green().bold());
    println!("You can ask about company news, stock updates, etc.");
    println!("Type 'exit' or 'quit' to leave.\n");

    let cfg = RetrieverConfig::from_env()?;
    let progress = IndicatifProgress::new();
    let retriever = Retriever::open(cfg, embedder, &progress).await?;

    let mode = pick_mode()?;
    println!("\nMode selected: {}\n", mode.to_string().cyan());

    let stdin = io::stdin();
    loop {
        print!("{} ", "You:".blue().bold());
        io::stdout().flush()?;

        let Some(line) = read_line(&stdin)? else {
            break;
        };
        let query = line.trim();

        if query.eq_ignore_ascii_case("exit") || query.eq_ignore_ascii_case("quit") {
            println!("Goodbye!");
            break;
        }
        if query.is_empty() {
            println!("Query cannot be empty.\n");
            continue;
        }

        let documents = retriever.retrieve(query, retriever.top_k(), mode).await?;
        if documents.is_empty() {
            println!("{} Sorry, I couldn't find relevant news.\n", "Bot:".yellow());
            continue;
        }

        let answer = composer.generate(query, &documents, mode).await?;
        println!(
            "\n{} {answer}\n",
            format!("Bot ({mode}):").yellow().bold()
        );

        println!("{}", "Sources:".bold());
        for (idx, doc) in documents.iter().enumerate() {
            println!("[{}] {} - {}", idx + 1, doc.title, doc.link);
        }
        println!("{}", "-".repeat(60));
    }

    Ok(())
}

/// Asks for the response mode once at startup; anything but "2" is concise.
fn pick_mode() -> Result<AnswerMode, io::Error> {
    println!("Choose response mode:");
    println!("1: Concise");
    println!("2: Detailed");
    print!("Enter 1 or 2 (default 1): ");
    io::stdout().flush()?;

    let stdin = io::stdin();
    let choice = read_line(&stdin)?.unwrap_or_default();
    Ok(match choice.trim() {
        "2" => AnswerMode::Detailed,
        _ => AnswerMode::Concise,
    })
}

/// Reads one line from stdin; `None` on end of input.
fn read_line(stdin: &io::Stdin) -> Result<Option<String>, io::Error> {
    let mut line = String::new();
    let n = stdin.lock().read_line(&mut line)?;
    Ok((n > 0).then_some(line))
}
