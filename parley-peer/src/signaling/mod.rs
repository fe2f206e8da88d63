mod signal_dispatcher;
mod signaling_client;
mod signaling_output;

pub use signal_dispatcher::*;
pub use signaling_client::*;
pub use signaling_output::*;
