use crate::transport::rtc_channel::RtcChannel;
use crate::transport::transport_config::TransportConfig;
use crate::transport::{DataLink, PeerConnector, PeerLink, PeerObserver, TransportError};
use async_trait::async_trait;
use parley_core::{GatheringState, IceCandidate, PeerState, SdpRole, SessionDescription};
use std::sync::Arc;
use tracing::{debug, warn};
use webrtc::api::interceptor_registry::register_default_interceptors;
use webrtc::api::media_engine::MediaEngine;
use webrtc::api::{API, APIBuilder};
use webrtc::data_channel::RTCDataChannel;
use webrtc::ice_transport::ice_candidate::{RTCIceCandidate, RTCIceCandidateInit};
use webrtc::ice_transport::ice_gatherer_state::RTCIceGathererState;
use webrtc::ice_transport::ice_server::RTCIceServer;
use webrtc::interceptor::registry::Registry;
use webrtc::peer_connection::RTCPeerConnection;
use webrtc::peer_connection::configuration::RTCConfiguration;
use webrtc::peer_connection::peer_connection_state::RTCPeerConnectionState;
use webrtc::peer_connection::sdp::session_description::RTCSessionDescription;

/// [`PeerConnector`] backed by webrtc-rs.
pub struct RtcConnector {
    api: API,
    rtc_config: RTCConfiguration,
}

impl RtcConnector {
    pub fn new(config: &TransportConfig) -> Result<Self, TransportError> {
        // Codecs are registered even though only data channels are used.
        let mut media_engine = MediaEngine::default();
        media_engine.register_default_codecs()?;
        let registry = register_default_interceptors(Registry::new(), &mut media_engine)?;

        let api = APIBuilder::new()
            .with_media_engine(media_engine)
            .with_interceptor_registry(registry)
            .build();

        if let Some(proxy) = &config.proxy {
            warn!(
                "Proxy server {} configured, but webrtc-rs has no HTTP proxy transport; connecting directly",
                proxy
            );
        }

        let ice_servers = if config.ice_servers.is_empty() {
            vec![]
        } else {
            vec![RTCIceServer {
                urls: config.ice_servers.clone(),
                ..Default::default()
            }]
        };

        Ok(Self {
            api,
            rtc_config: RTCConfiguration {
                ice_servers,
                ..Default::default()
            },
        })
    }
}

#[async_trait]
impl PeerConnector for RtcConnector {
    async fn connect(
        &self,
        observer: Arc<dyn PeerObserver>,
    ) -> Result<Arc<dyn PeerLink>, TransportError> {
        let peer_connection = Arc::new(
            self.api
                .new_peer_connection(self.rtc_config.clone())
                .await?,
        );

        let state_observer = observer.clone();
        peer_connection.on_peer_connection_state_change(Box::new(
            move |s: RTCPeerConnectionState| {
                let observer = state_observer.clone();
                Box::pin(async move {
                    if let Some(state) = peer_state(s) {
                        observer.on_state_change(state).await;
                    }
                })
            },
        ));

        let gathering_observer = observer.clone();
        peer_connection.on_ice_gathering_state_change(Box::new(
            move |s: RTCIceGathererState| {
                let observer = gathering_observer.clone();
                Box::pin(async move {
                    if let Some(state) = gathering_state(s) {
                        observer.on_gathering_state_change(state).await;
                    }
                })
            },
        ));

        // Trickle ICE: each local candidate goes out as soon as it is found.
        let ice_observer = observer.clone();
        peer_connection.on_ice_candidate(Box::new(move |c: Option<RTCIceCandidate>| {
            let observer = ice_observer.clone();
            Box::pin(async move {
                let Some(candidate) = c else { return };
                match candidate.to_json() {
                    Ok(init) => {
                        let mid = init.sdp_mid.unwrap_or_default();
                        observer
                            .on_local_candidate(IceCandidate::new(init.candidate, mid))
                            .await;
                    }
                    Err(e) => warn!("Failed to serialize local ICE candidate: {}", e),
                }
            })
        }));

        let dc_observer = observer.clone();
        peer_connection.on_data_channel(Box::new(move |dc: Arc<RTCDataChannel>| {
            let observer = dc_observer.clone();
            Box::pin(async move {
                debug!("Remote opened DataChannel '{}'", dc.label());
                let channel: Arc<dyn DataLink> = Arc::new(RtcChannel::new(dc));
                observer.on_data_channel(channel).await;
            })
        }));

        Ok(Arc::new(RtcLink {
            peer_connection,
            observer,
        }))
    }
}

pub struct RtcLink {
    peer_connection: Arc<RTCPeerConnection>,
    observer: Arc<dyn PeerObserver>,
}

impl RtcLink {
    /// Create the local offer or answer, apply it and publish it.
    async fn negotiate(&self, role: SdpRole) -> Result<(), TransportError> {
        let local = match role {
            SdpRole::Offer => self.peer_connection.create_offer(None).await?,
            SdpRole::Answer => self.peer_connection.create_answer(None).await?,
        };
        self.peer_connection
            .set_local_description(local.clone())
            .await?;

        self.observer
            .on_local_description(SessionDescription {
                role,
                sdp: local.sdp,
            })
            .await;
        Ok(())
    }
}

#[async_trait]
impl PeerLink for RtcLink {
    async fn set_remote_description(
        &self,
        description: SessionDescription,
    ) -> Result<(), TransportError> {
        let remote = match description.role {
            SdpRole::Offer => RTCSessionDescription::offer(description.sdp)?,
            SdpRole::Answer => RTCSessionDescription::answer(description.sdp)?,
        };
        self.peer_connection.set_remote_description(remote).await?;

        if description.role == SdpRole::Offer {
            self.negotiate(SdpRole::Answer).await?;
        }
        Ok(())
    }

    async fn add_remote_candidate(&self, candidate: IceCandidate) -> Result<(), TransportError> {
        let init = RTCIceCandidateInit {
            candidate: candidate.candidate,
            sdp_mid: Some(candidate.mid),
            ..Default::default()
        };
        self.peer_connection.add_ice_candidate(init).await?;
        Ok(())
    }

    async fn create_data_channel(&self, label: &str) -> Result<Arc<dyn DataLink>, TransportError> {
        let dc = self.peer_connection.create_data_channel(label, None).await?;

        if self.peer_connection.local_description().await.is_none() {
            self.negotiate(SdpRole::Offer).await?;
        }
        Ok(Arc::new(RtcChannel::new(dc)))
    }

    async fn close(&self) -> Result<(), TransportError> {
        self.peer_connection.close().await?;
        Ok(())
    }
}

fn peer_state(state: RTCPeerConnectionState) -> Option<PeerState> {
    match state {
        RTCPeerConnectionState::New => Some(PeerState::New),
        RTCPeerConnectionState::Connecting => Some(PeerState::Connecting),
        RTCPeerConnectionState::Connected => Some(PeerState::Connected),
        RTCPeerConnectionState::Disconnected => Some(PeerState::Disconnected),
        RTCPeerConnectionState::Failed => Some(PeerState::Failed),
        RTCPeerConnectionState::Closed => Some(PeerState::Closed),
        RTCPeerConnectionState::Unspecified => None,
    }
}

fn gathering_state(state: RTCIceGathererState) -> Option<GatheringState> {
    match state {
        RTCIceGathererState::New => Some(GatheringState::New),
        RTCIceGathererState::Gathering => Some(GatheringState::InProgress),
        RTCIceGathererState::Complete => Some(GatheringState::Complete),
        _ => None,
    }
}
