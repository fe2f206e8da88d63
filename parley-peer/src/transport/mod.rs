mod peer_link;
mod peer_observer;
mod rtc_channel;
mod rtc_connector;
mod transport_config;
mod transport_error;

pub use peer_link::*;
pub use peer_observer::*;
pub use rtc_channel::*;
pub use rtc_connector::*;
pub use transport_config::*;
pub use transport_error::*;
