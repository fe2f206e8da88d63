mod candidate_filter;
mod session_controller;
mod session_observer;
mod session_registry;

pub use candidate_filter::*;
pub use session_controller::*;
pub use session_observer::*;
pub use session_registry::*;
