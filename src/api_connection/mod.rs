pub mod connection;
pub mod endpoints;

pub use connection::{ApiConnectionError, CompletionBackend, Provider};
pub use endpoints::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, CompletionProviderKind};
