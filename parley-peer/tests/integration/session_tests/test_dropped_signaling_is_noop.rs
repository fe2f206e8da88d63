use parley_core::{PeerState, Token};

use crate::integration::{REMOTE_TOKEN, create_test_peer, init_tracing, test_config};
use crate::utils::offer_json;

#[tokio::test]
async fn test_dropped_signaling_is_noop() {
    init_tracing();

    let mut peer = create_test_peer(test_config());
    peer.client
        .dispatcher()
        .dispatch(&offer_json(REMOTE_TOKEN, "sdp"))
        .await;
    let link = peer.connector.last_link();

    // Drain the answer, then lose the socket.
    assert!(peer.signal_rx.recv().await.is_some());
    drop(peer.signaling);

    link.emit_state(PeerState::Connecting).await;
    link.emit_candidate("candidate:1 1 udp 2130706431 10.0.0.2 50000 typ host")
        .await;

    assert!(peer.signal_rx.recv().await.is_none());
    assert!(peer.client.registry().contains(&Token::from(REMOTE_TOKEN)));
}
