use parley_core::{Payload, SignalKind, Token};

use crate::integration::{REMOTE_TOKEN, create_test_peer, init_tracing, test_config};

#[tokio::test]
async fn test_shutdown_silences_late_events() {
    init_tracing();

    let peer = create_test_peer(test_config());
    let remote = Token::from(REMOTE_TOKEN);
    let handle = peer.client.offer(&remote).await.expect("offer failed");

    let link = peer.connector.last_link();
    let channel = link.channels().pop().unwrap();
    let before = peer.signaling.envelopes().await.len();

    peer.client.shutdown().await;
    assert!(peer.client.registry().is_empty());
    assert!(peer.client.registry().resolve(&handle).is_none());
    assert!(link.is_closed());
    assert!(channel.is_closed());

    // Callbacks firing after teardown are dropped.
    link.emit_candidate("candidate:late").await;
    let remote_channel = link.open_remote_channel("late").await;
    channel.deliver(Payload::from("still there?")).await;

    let envelopes = peer.signaling.envelopes().await;
    assert_eq!(envelopes.len(), before);
    assert!(envelopes.iter().all(|e| e.kind == SignalKind::Offer));
    assert!(remote_channel.sent().is_empty());
    assert!(channel.sent().is_empty());
    assert!(peer.client.registry().is_empty());
}
