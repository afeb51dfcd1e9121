//! Assistant relay: forwards code to an external AI backend and hands the
//! answer back. Never touches stored snippets.

pub mod disabled;
pub mod http;
pub mod service;
pub mod task;

pub use disabled::DisabledAssistant;
pub use http::HttpAssistant;
pub use service::AssistService;
pub use task::{AssistOutput, AssistRequest, AssistTask};
