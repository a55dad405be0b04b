pub mod canned;
pub mod decoder;
pub mod upstream;

pub use decoder::LineDecoder;
pub use upstream::{ModelUpstream, ReplyStream, UpstreamError};
