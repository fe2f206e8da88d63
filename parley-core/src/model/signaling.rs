use crate::error::{CodecError, EnvelopeError};
use crate::model::description::{IceCandidate, SdpRole, SessionDescription};
use crate::model::token::Token;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Hash, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum SignalKind {
    Offer,
    Answer,
    Candidate,
}

impl SignalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalKind::Offer => "offer",
            SignalKind::Answer => "answer",
            SignalKind::Candidate => "candidate",
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<SdpRole> for SignalKind {
    fn from(role: SdpRole) -> Self {
        match role {
            SdpRole::Offer => SignalKind::Offer,
            SdpRole::Answer => SignalKind::Answer,
        }
    }
}

/// Message exchanged over the signaling channel.
///
/// Only `token` and `type` are required to decode. Whether the remaining
/// fields are present is checked by [`SignalEnvelope::into_remote`], so an
/// envelope from a newer peer with extra keys still decodes.
#[derive(Debug, Serialize, Deserialize, Clone, Eq, PartialEq)]
pub struct SignalEnvelope {
    pub token: Token,
    #[serde(rename = "type")]
    pub kind: SignalKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mid: Option<String>,
}

/// What a remote envelope asks us to apply to a peer connection.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum RemoteSignal {
    Description(SessionDescription),
    Candidate(IceCandidate),
}

impl SignalEnvelope {
    pub fn description(token: Token, description: &SessionDescription) -> Self {
        Self {
            token,
            kind: description.role.into(),
            description: Some(description.sdp.clone()),
            candidate: None,
            mid: None,
        }
    }

    pub fn candidate(token: Token, candidate: &IceCandidate) -> Self {
        Self {
            token,
            kind: SignalKind::Candidate,
            description: None,
            candidate: Some(candidate.candidate.clone()),
            mid: Some(candidate.mid.clone()),
        }
    }

    pub fn decode(raw: &str) -> Result<Self, CodecError> {
        serde_json::from_str(raw).map_err(CodecError::Decode)
    }

    pub fn encode(&self) -> Result<String, CodecError> {
        serde_json::to_string(self).map_err(CodecError::Encode)
    }

    pub fn into_remote(self) -> Result<RemoteSignal, EnvelopeError> {
        match self.kind {
            SignalKind::Offer | SignalKind::Answer => {
                let role = if self.kind == SignalKind::Offer {
                    SdpRole::Offer
                } else {
                    SdpRole::Answer
                };
                let sdp = self
                    .description
                    .ok_or(EnvelopeError::MissingDescription(self.kind.as_str()))?;
                Ok(RemoteSignal::Description(SessionDescription { role, sdp }))
            }
            SignalKind::Candidate => {
                let candidate = self.candidate.ok_or(EnvelopeError::MissingCandidate)?;
                let mid = self.mid.ok_or(EnvelopeError::MissingMid)?;
                Ok(RemoteSignal::Candidate(IceCandidate { candidate, mid }))
            }
        }
    }
}
