use std::sync::{Arc, Mutex};

use tracing_subscriber::EnvFilter;

use tableside::config::AppConfig;
use tableside::services::ai::gemini::GeminiProvider;
use tableside::services::ai::groq::GroqProvider;
use tableside::services::ai::ollama::OllamaProvider;
use tableside::services::ai::{LlmAssistant, LlmProvider};
use tableside::state::AppState;
use tableside::store::DashboardStore;

fn build_provider(config: &AppConfig) -> anyhow::Result<Box<dyn LlmProvider>> {
    let provider: Box<dyn LlmProvider> = match config.llm_provider.as_str() {
        "gemini" => {
            anyhow::ensure!(
                !config.gemini_api_key.is_empty(),
                "GEMINI_API_KEY (or API_KEY) must be set when LLM_PROVIDER=gemini"
            );
            tracing::info!("using Gemini LLM provider (model: {})", config.gemini_model);
            Box::new(GeminiProvider::new(
                config.gemini_api_key.clone(),
                config.gemini_model.clone(),
                config.gemini_base_url.clone(),
                config.llm_timeout,
            ))
        }
        "groq" => {
            anyhow::ensure!(
                !config.groq_api_key.is_empty(),
                "GROQ_API_KEY must be set when LLM_PROVIDER=groq"
            );
            tracing::info!("using Groq LLM provider (model: {})", config.groq_model);
            Box::new(GroqProvider::new(
                config.groq_api_key.clone(),
                config.groq_model.clone(),
                config.groq_base_url.clone(),
                config.llm_timeout,
            ))
        }
        "ollama" => {
            tracing::info!("using Ollama LLM provider (url: {})", config.ollama_url);
            Box::new(OllamaProvider::new(
                config.ollama_url.clone(),
                config.ollama_model.clone(),
                config.llm_timeout,
            ))
        }
        other => {
            anyhow::bail!("unknown LLM_PROVIDER `{other}` (expected gemini, groq or ollama)")
        }
    };
    Ok(provider)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();
    let llm = build_provider(&config)?;

    let state = Arc::new(AppState {
        assistant: Box::new(LlmAssistant::new(llm, config.restaurant_name.clone())),
        store: Mutex::new(DashboardStore::seeded()),
        config: config.clone(),
    });

    let app = tableside::router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting {} dashboard API on {addr}", config.restaurant_name);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
