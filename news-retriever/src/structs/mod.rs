pub mod record;
pub mod retriever_config;
