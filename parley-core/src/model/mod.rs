mod description;
mod payload;
mod signaling;
mod state;
mod token;

pub use description::{IceCandidate, SdpRole, SessionDescription};
pub use payload::{Payload, PayloadKind};
pub use signaling::{RemoteSignal, SignalEnvelope, SignalKind};
pub use state::{GatheringState, PeerState};
pub use token::Token;
