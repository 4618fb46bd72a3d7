//! CLI subcommand handlers.

use crate::Commands;
use crate::ConfigAction;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use versus_core::aspect::parse_aspect_arg;
use versus_core::gateway::{GatewayState, run_gateway};
use versus_core::ratings::{convert_ratings, write_rows};
use versus_core::{
    Aspect, Comparison, ComparisonResult, Corpus, RequestContext, VersusConfig, load_config,
};

/// Handle a CLI subcommand.
pub async fn handle_command(command: Commands, workspace: &Path) -> anyhow::Result<()> {
    match command {
        Commands::Compare {
            object_a,
            object_b,
            corpus,
            aspects,
            pretty,
        } => {
            let config = workspace_config(workspace)?;
            let result = run_compare(&config, corpus, &object_a, &object_b, &aspects)?;
            let json = if pretty {
                serde_json::to_string_pretty(&result)?
            } else {
                serde_json::to_string(&result)?
            };
            println!("{json}");
            Ok(())
        }
        Commands::Ratings { input, output } => handle_ratings(&input, output.as_deref()),
        Commands::Serve { port, host, corpus } => {
            let mut config = workspace_config(workspace)?;
            if let Some(port) = port {
                config.gateway.port = port;
            }
            if let Some(host) = host {
                config.gateway.host = host;
            }
            if corpus.is_some() {
                config.gateway.corpus = corpus;
            }
            handle_serve(config).await
        }
        Commands::Config { action } => handle_config(action, workspace),
    }
}

fn workspace_config(workspace: &Path) -> anyhow::Result<VersusConfig> {
    let config = load_config(Some(workspace), None)
        .map_err(|e| anyhow::anyhow!("Configuration error: {}", e))?;
    config.validate()?;
    Ok(config)
}

fn resolve_corpus(config: &VersusConfig, corpus: Option<PathBuf>) -> anyhow::Result<Corpus> {
    let Some(path) = corpus.or_else(|| config.gateway.corpus.clone()) else {
        anyhow::bail!("No corpus given; pass --corpus or set gateway.corpus in config");
    };
    Ok(Corpus::load(&path, &config.lexicon)?)
}

/// Load the corpus and compare the two objects once.
fn run_compare(
    config: &VersusConfig,
    corpus: Option<PathBuf>,
    object_a: &str,
    object_b: &str,
    aspects: &[String],
) -> anyhow::Result<ComparisonResult> {
    let corpus = resolve_corpus(config, corpus)?;
    let aspects = aspects
        .iter()
        .map(String::as_str)
        .map(parse_aspect_arg)
        .collect::<Result<Vec<Aspect>, _>>()?;
    let engine = Comparison::from_config(config)?;

    let mut ctx = RequestContext::new();
    let result = engine.compare(
        &mut ctx,
        &corpus,
        &object_a.trim().to_lowercase(),
        &object_b.trim().to_lowercase(),
        &aspects,
    )?;
    Ok(result)
}

fn handle_ratings(input: &Path, output: Option<&Path>) -> anyhow::Result<()> {
    let file = std::fs::File::open(input)
        .map_err(|e| anyhow::anyhow!("Cannot open {}: {}", input.display(), e))?;
    let rows = convert_ratings(BufReader::new(file))?;

    match output {
        Some(path) => {
            write_rows(std::fs::File::create(path)?, &rows)?;
            eprintln!("Wrote {} rows to {}", rows.len(), path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            write_rows(&mut lock, &rows)?;
            lock.flush()?;
        }
    }
    Ok(())
}

async fn handle_serve(config: VersusConfig) -> anyhow::Result<()> {
    let corpus = resolve_corpus(&config, None)?;
    let engine = Comparison::from_config(&config)?;
    let state = Arc::new(GatewayState {
        engine,
        provider: Arc::new(corpus),
    });
    println!("Serving comparisons on http://{}", config.gateway.address());
    run_gateway(&config.gateway, state).await?;
    Ok(())
}

fn handle_config(action: ConfigAction, workspace: &Path) -> anyhow::Result<()> {
    match action {
        ConfigAction::Init => {
            let config_dir = workspace.join(".versus");
            std::fs::create_dir_all(&config_dir)?;

            let config_path = config_dir.join("config.toml");
            if config_path.exists() {
                println!(
                    "Configuration file already exists at: {}",
                    config_path.display()
                );
                return Ok(());
            }

            let toml_str = toml::to_string_pretty(&VersusConfig::default())?;
            std::fs::write(&config_path, &toml_str)?;
            println!(
                "Created default configuration at: {}",
                config_path.display()
            );
            Ok(())
        }
        ConfigAction::Show => {
            let config = load_config(Some(workspace), None)
                .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
            println!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
    }
}
