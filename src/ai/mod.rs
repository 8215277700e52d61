pub mod client;
pub mod gemini;
pub mod parse;
pub mod prompts;
pub mod traits;

pub use client::AiClient;
pub use gemini::GeminiClient;
pub use traits::{AiError, ContentPart, GenerativeModel};
