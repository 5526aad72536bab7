/// Backend used for model inference.
///
/// Distinguishes between a local Ollama runtime and the OpenAI REST API.
/// Adding further providers (Anthropic, Mistral, ...) means extending this
/// enum and the matching service module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    /// Local Ollama runtime for on-device inference.
    Ollama,
    /// OpenAI REST API.
    OpenAI,
}
