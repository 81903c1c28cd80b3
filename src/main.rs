use std::io::Write;
use std::sync::Arc;

use docent::chain::ConversationalChain;
use docent::cli::{Cli, Commands, ConfigAction};
use docent::config::Config;
use docent::document::PdfLoader;
use docent::embedding::FastEmbedProvider;
use docent::error::{DocentError, Result};
use docent::llm::HostedProvider;
use docent::retrieval::{CrossEncoderReranker, IndexBuilder};
use docent::session::ChatSession;

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = if verbose { "docent=debug" } else { "docent=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    fmt().with_env_filter(filter).with_target(false).init();
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Chat {
            sources,
            chunk_size,
        } => cmd_chat(cli.config, sources, chunk_size).await,
        Commands::Ask {
            question,
            sources,
            chunk_size,
        } => cmd_ask(cli.config, &question, sources, chunk_size).await,
        Commands::Config { action } => cmd_config(cli.config, action),
    }
}

async fn cmd_chat(
    config_path: Option<std::path::PathBuf>,
    sources: Vec<String>,
    chunk_size: Option<usize>,
) -> Result<()> {
    let config = load_config(config_path, chunk_size)?;
    let mut session = build_session(&config, &sources).await?;

    println!("Chat ready. Type your question, or 'exit' to quit.");

    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush().map_err(|e| DocentError::Io {
            source: e,
            context: "Failed to flush stdout".to_string(),
        })?;

        let mut line = String::new();
        let read = stdin.read_line(&mut line).map_err(|e| DocentError::Io {
            source: e,
            context: "Failed to read query".to_string(),
        })?;
        if read == 0 {
            break; // EOF
        }

        let query = line.trim();
        if query == "exit" || query == "quit" {
            break;
        }

        match session.ask(query).await {
            Ok(answer) => {
                println!("\n{}\n", answer.text);
                print_sources(&answer.sources);
            }
            Err(DocentError::EmptyQuery) => {
                println!("Please enter a non-empty query");
            }
            Err(e) => {
                eprintln!("Error: {}", e);
            }
        }
    }

    Ok(())
}

async fn cmd_ask(
    config_path: Option<std::path::PathBuf>,
    question: &str,
    sources: Vec<String>,
    chunk_size: Option<usize>,
) -> Result<()> {
    let config = load_config(config_path, chunk_size)?;
    let mut session = build_session(&config, &sources).await?;

    let answer = session.ask(question).await?;

    println!("{}", answer.text);
    print_sources(&answer.sources);

    Ok(())
}

fn cmd_config(config_path: Option<std::path::PathBuf>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = load_config(config_path, None)?;
            let content = toml::to_string_pretty(&config)?;
            println!("{}", content);
        }
        ConfigAction::Init { force } => {
            let path = match config_path {
                Some(path) => path,
                None => Config::default_path()?,
            };

            if path.exists() && !force {
                println!("Configuration file already exists at: {}", path.display());
                println!("Use --force to overwrite");
                return Ok(());
            }

            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| DocentError::Io {
                    source: e,
                    context: format!("Failed to create config directory: {:?}", parent),
                })?;
            }

            let config = Config::default();
            config.save(&path)?;

            println!("✓ Configuration initialized at: {}", path.display());
        }
        ConfigAction::Validate { file } => {
            let path = match file.or(config_path) {
                Some(path) => path,
                None => Config::default_path()?,
            };
            Config::load(&path)?;
            println!("✓ Configuration is valid");
        }
    }

    Ok(())
}

/// Wire real collaborators, build the index, and return a ready session
async fn build_session(config: &Config, sources: &[String]) -> Result<ChatSession> {
    let loader = Arc::new(PdfLoader::new());
    let provider = Arc::new(
        FastEmbedProvider::new(&config.embedding.model)
            .map_err(|e| DocentError::IndexingFailure(e.to_string()))?,
    );
    let reranker = Arc::new(
        CrossEncoderReranker::new(&config.retrieval.reranker_model)
            .map_err(|e| DocentError::IndexingFailure(e.to_string()))?,
    );
    let llm = Arc::new(
        HostedProvider::from_config(&config.llm)
            .map_err(|e| DocentError::Config(e.to_string()))?,
    );

    println!("Indexing {} document(s)...", sources.len());

    let builder = IndexBuilder::new(loader, provider, reranker, config.clone());
    let pipeline = builder.build(sources).await?;

    println!("✓ Indexed {} chunks", pipeline.chunk_count());

    let chain = ConversationalChain::new(Arc::new(pipeline), llm);
    let mut session = ChatSession::new();
    session.attach(chain);

    Ok(session)
}

fn print_sources(sources: &[docent::document::DocumentChunk]) {
    if sources.is_empty() {
        return;
    }

    println!("Sources:");
    for chunk in sources {
        let preview: String = chunk.text.chars().take(80).collect();
        println!("  [{}] {}: {}...", chunk.id, chunk.source, preview.trim());
    }
    println!();
}

fn load_config(
    config_path: Option<std::path::PathBuf>,
    chunk_size: Option<usize>,
) -> Result<Config> {
    let path = match &config_path {
        Some(path) => path.clone(),
        None => Config::default_path()?,
    };

    let mut config = if path.exists() {
        Config::load(&path)?
    } else {
        if config_path.is_some() {
            return Err(DocentError::ConfigNotFound { path });
        }
        tracing::debug!("Config file not found, using defaults");
        Config::default()
    };

    if let Some(chunk_size) = chunk_size {
        if chunk_size <= config.document.chunk_overlap {
            return Err(DocentError::Config(format!(
                "chunk size ({}) must exceed the configured overlap ({})",
                chunk_size, config.document.chunk_overlap
            )));
        }
        config.document.chunk_size = chunk_size;
    }

    Ok(config)
}
