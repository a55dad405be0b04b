pub mod conversation;
pub mod errors;
pub mod events;

pub use conversation::{Conversation, CreateConversationRequest, CreateConversationResponse};
pub use errors::AppError;
pub use events::{ProgressSnapshot, StreamEvent};
