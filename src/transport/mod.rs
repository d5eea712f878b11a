pub mod http;
pub mod provider;
pub mod types;

pub use http::HttpTransport;
pub use provider::{AssistantTransport, TransportError};
pub use types::{AssistantReply, AssistantRequest, ContextMessage, RequestContext};
