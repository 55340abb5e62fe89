//! API Layer
//!
//! Endpoint definitions, the transport seam and the JSON fetcher.

mod endpoint;
mod transport;
mod mock;
mod fetcher;

pub use endpoint::Endpoint;
pub use transport::{HttpTransport, RawResponse, Transport};
pub use mock::{MockReply, MockTransport};
pub use fetcher::{decode_for, Fetcher};
