// poolguard-api: Async Rust clients for the PoolGuard table store and advisory API

pub mod advisory;
pub mod error;
pub mod store;
pub mod transport;

pub use advisory::AdvisoryClient;
pub use error::Error;
pub use store::TableClient;
pub use transport::{TlsMode, TransportConfig};
