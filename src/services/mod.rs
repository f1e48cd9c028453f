pub mod generation;

pub use generation::{ChatCompletionTransport, ChatRequest, GenerationFault, TextGenerationBackend};
