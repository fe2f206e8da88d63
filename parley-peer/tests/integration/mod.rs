pub mod channel_tests;

use parley_core::{SignalEnvelope, Token};
use parley_peer::{ClientConfig, PeerClient, SignalingOutput};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::Level;

use crate::utils::{MockConnector, MockSignalingOutput};

pub const LOCAL_TOKEN: &str = "AB12";
pub const REMOTE_TOKEN: &str = "XY34";

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_test_writer()
        .try_init();
}

pub fn test_config() -> ClientConfig {
    ClientConfig {
        local_token: Token::from(LOCAL_TOKEN),
        ..Default::default()
    }
}

pub struct TestPeer {
    pub client: PeerClient,
    pub connector: Arc<MockConnector>,
    pub signaling: Arc<MockSignalingOutput>,
    pub signal_rx: mpsc::UnboundedReceiver<SignalEnvelope>,
}

pub fn create_test_peer(config: ClientConfig) -> TestPeer {
    let connector = MockConnector::new();
    let (signaling, signal_rx) = MockSignalingOutput::new();
    let signaling = Arc::new(signaling);

    let output: Arc<dyn SignalingOutput> = signaling.clone();
    let client = PeerClient::new(&config, connector.clone(), Arc::downgrade(&output));

    TestPeer {
        client,
        connector,
        signaling,
        signal_rx,
    }
}
