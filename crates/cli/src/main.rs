mod config;
mod error;

use std::io::{self, BufRead, Write};

use clap::{Parser, Subcommand};
use runtime::{llm, Session};
use tracing_subscriber::EnvFilter;

use config::Config;
use error::Result;

#[derive(Parser)]
#[command(name = "poyraz")]
#[command(about = "Doğal dilde hava durumu soruları için LLM destekli asistan", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive question loop
    Chat,
    /// Ask a single question and exit
    Ask {
        /// The question, e.g. "İstanbul'da 2025-08-29 tarihinde hava nasıl?"
        question: String,
    },
    /// List the tools advertised by the server
    Tools,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Hata: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Chat) | None => cmd_chat().await,
        Some(Commands::Ask { question }) => cmd_ask(&question).await,
        Some(Commands::Tools) => cmd_tools().await,
    }
}

/// Build the session from configuration: completion client plus spawned
/// tool server. A missing API key is fatal here, before anything runs.
async fn connect() -> Result<Session> {
    let config = Config::resolve()?;

    let mut client = llm::Client::new(config.api_key()?);
    if let Some(base_url) = &config.llm.base_url {
        client = client.with_base_url(base_url);
    }
    if let Some(model) = &config.llm.model {
        client = client.with_model(model);
    }

    let server = mcp::ServerConfig::new(config.server_command())
        .with_args(config.server.args.iter().cloned());

    let session = Session::connect(client, server).await?;
    Ok(session)
}

async fn cmd_chat() -> Result<()> {
    println!("poyraz v{}", env!("CARGO_PKG_VERSION"));

    let session = connect().await?;

    let tools = session.tools().await;
    let names: Vec<_> = tools.iter().map(|t| t.name.as_str()).collect();
    println!("Mevcut araçlar: {}", names.join(", "));
    println!("Hava durumu hakkında soru sorun (çıkmak için \"quit\" yazın).\n");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            // EOF
            break;
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input == "quit" || input == "exit" {
            break;
        }

        // Per-question failures are reported and the loop keeps going;
        // only initialization failures are fatal.
        match session.ask(input).await {
            Ok(answer) => {
                println!("\n{answer}\n");
            }
            Err(e) => {
                eprintln!("Hata: {e}\n");
            }
        }
    }

    session.shutdown().await?;
    println!("\nGörüşürüz!");
    Ok(())
}

async fn cmd_ask(question: &str) -> Result<()> {
    let session = connect().await?;

    let outcome = session.ask(question).await;
    session.shutdown().await?;

    let answer = outcome?;
    println!("{answer}");
    Ok(())
}

async fn cmd_tools() -> Result<()> {
    let session = connect().await?;

    let tools = session.tools().await;
    session.shutdown().await?;

    if tools.is_empty() {
        println!("Sunucu hiç araç sunmuyor.");
        return Ok(());
    }

    for tool in tools {
        let title = tool.title.as_deref().unwrap_or("-");
        let description = tool.description.as_deref().unwrap_or("-");
        println!("{:<24}  {:<40}  {description}", tool.name, title);
    }

    Ok(())
}
