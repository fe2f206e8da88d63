mod channel_handler;
mod reception_counter;

pub use channel_handler::*;
pub use reception_counter::*;
