use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of a session description in the offer/answer exchange.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Hash, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum SdpRole {
    Offer,
    Answer,
}

impl SdpRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            SdpRole::Offer => "offer",
            SdpRole::Answer => "answer",
        }
    }
}

impl fmt::Display for SdpRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SessionDescription {
    pub role: SdpRole,
    pub sdp: String,
}

impl SessionDescription {
    pub fn offer(sdp: impl Into<String>) -> Self {
        Self {
            role: SdpRole::Offer,
            sdp: sdp.into(),
        }
    }

    pub fn answer(sdp: impl Into<String>) -> Self {
        Self {
            role: SdpRole::Answer,
            sdp: sdp.into(),
        }
    }
}

/// One trickled ICE candidate together with the media section it belongs to.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct IceCandidate {
    pub candidate: String,
    pub mid: String,
}

impl IceCandidate {
    pub fn new(candidate: impl Into<String>, mid: impl Into<String>) -> Self {
        Self {
            candidate: candidate.into(),
            mid: mid.into(),
        }
    }
}
