//! RAG server binary
//!
//! Run with: cargo run -p notebook-rag --bin notebook-rag-server [config.toml]

use notebook_rag::{config::RagConfig, server::RagServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "notebook_rag=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration, optionally from a TOML file given as the first
    // argument
    let config = match std::env::args().nth(1) {
        Some(path) => RagConfig::load(path)?,
        None => RagConfig::load_or_default("notebook-rag.toml")?,
    };

    tracing::info!("Configuration loaded");
    tracing::info!("  - Embedding model: {}", config.llm.embed_model);
    tracing::info!("  - Embedding dimensions: {}", config.embeddings.dimensions);
    tracing::info!("  - LLM model: {}", config.llm.generate_model);
    tracing::info!(
        "  - Chunking: {} chars, {} overlap",
        config.chunking.chunk_size,
        config.chunking.chunk_overlap
    );
    tracing::info!("  - Vector index: {}", config.index.base_url);

    // Check Ollama availability
    tracing::info!("Checking Ollama at {}...", config.llm.base_url);
    let client = reqwest::Client::new();
    match client
        .get(format!("{}/api/tags", config.llm.base_url))
        .send()
        .await
    {
        Ok(resp) if resp.status().is_success() => {
            tracing::info!("Ollama is running");
        }
        _ => {
            tracing::warn!("Ollama not available at {}", config.llm.base_url);
            tracing::warn!("Start it with `ollama serve`, then pull the models:");
            tracing::warn!(
                "  ollama pull {} && ollama pull {}",
                config.llm.embed_model,
                config.llm.generate_model
            );
        }
    }

    // Create and start the server
    let server = RagServer::new(config)?;

    tracing::info!("Endpoints:");
    tracing::info!("  POST   /upload                          - Ingest a PDF");
    tracing::info!("  POST   /chat                            - Ask a question");
    tracing::info!("  POST   /chat-stream                     - Ask a question (SSE)");
    tracing::info!("  DELETE /documents                       - Wipe the index");
    tracing::info!("  DELETE /documents/notebooks/:notebookId - Delete a notebook");
    tracing::info!("  DELETE /documents/sources/:sourceId     - Delete a source");

    server.start().await?;

    Ok(())
}
