use std::error::Error;
use std::sync::Arc;

use api::core::app_state::AppState;
use composer::{Composer, ProfileAnswerModel};
use llm_service::service_profiles::LlmServiceProfiles;
use news_retriever::embed::llm::ProfileEmbedder;
use news_retriever::{NoopProgress, Retriever, RetrieverConfig};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load environment variables from .env file.
    // Fails if .env file not found, not readable or invalid.
    dotenvy::dotenv()?;

    let filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();

    let profiles = Arc::new(LlmServiceProfiles::from_env()?);

    let cfg = RetrieverConfig::from_env()?;
    let embedder = Arc::new(ProfileEmbedder::new(profiles.clone()));
    let retriever = Arc::new(Retriever::open(cfg, embedder, &NoopProgress).await?);

    let composer = Arc::new(Composer::new(Arc::new(ProfileAnswerModel::new(
        profiles.clone(),
    ))));

    tracing::info!(documents = retriever.len(), "components ready, starting server");

    api::start(AppState::new(retriever, composer, profiles)).await?;

    Ok(())
}
