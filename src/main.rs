use clap::Parser;
use legalrag::cli::commands::{Cli, Commands};
use legalrag::config::Settings;
use legalrag::infrastructure::text::references::extract_legal_references;
use legalrag::LegalRag;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let settings = match Settings::from_env() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error loading settings: {e}");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.log_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let result = run_command(&settings, cli.command).await;
    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_command(settings: &Settings, cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    // Citation listing needs no store.
    if let Commands::Refs { file } = &cmd {
        let text = tokio::fs::read_to_string(file).await?;
        for r in extract_legal_references(&text) {
            println!("{r}");
        }
        return Ok(());
    }

    let mut rag = LegalRag::new(settings)?;

    match cmd {
        Commands::Ingest {
            file,
            source,
            page,
            no_save,
        } => {
            let added = rag.ingest_file(&file, source.as_deref(), page).await?;
            if !no_save && !rag.save() {
                return Err("Failed to save store".into());
            }
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "file": file.display().to_string(),
                    "chunks_added": added,
                    "document_count": rag.stats().document_count,
                }))?
            );
        }
        Commands::Search { query, limit } => {
            let hits = rag.search(&query, limit).await?;
            println!("{}", serde_json::to_string_pretty(&hits)?);
        }
        Commands::Context { query, limit } => {
            let context = rag.context(&query, limit).await?;
            println!("{context}");
        }
        Commands::Stats => {
            println!("{}", serde_json::to_string_pretty(&rag.stats())?);
        }
        Commands::Clear { no_save } => {
            if !rag.clear() {
                return Err("Failed to clear store".into());
            }
            if !no_save && !rag.save() {
                return Err("Failed to save store".into());
            }
            println!("Store cleared");
        }
        Commands::Refs { .. } => {}
    }
    Ok(())
}
