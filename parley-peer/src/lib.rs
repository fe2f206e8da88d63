pub mod channel;
pub mod client;
pub mod config;
pub mod error;
pub mod session;
pub mod signaling;
pub mod transport;

pub use channel::*;
pub use client::*;
pub use config::*;
pub use error::*;
pub use session::*;
pub use signaling::*;
pub use transport::*;
