use std::sync::Arc;

use composer::Composer;
use llm_service::service_profiles::LlmServiceProfiles;
use news_retriever::Retriever;

/// Shared state for all HTTP handlers.
///
/// Every component is constructed once at startup and injected here; handlers
/// only read. The retriever's corpus/index and the composer's model backend
/// are immutable for the process lifetime.
#[derive(Clone)]
pub struct AppState {
    /// Corpus + embedding index, ready to answer queries.
    pub retriever: Arc<Retriever>,
    /// Prompt builder over the generation profile.
    pub composer: Arc<Composer>,
    /// Shared LLM profiles, used by the health endpoint.
    pub profiles: Arc<LlmServiceProfiles>,
}

impl AppState {
    pub fn new(
        retriever: Arc<Retriever>,
        composer: Arc<Composer>,
        profiles: Arc<LlmServiceProfiles>,
    ) -> Self {
        Self {
            retriever,
            composer,
            profiles,
        }
    }
}
