use parley_core::{SignalKind, Token};

use crate::integration::{REMOTE_TOKEN, create_test_peer, init_tracing, test_config};
use crate::utils::{MOCK_OFFER_SDP, answer_json, wait_for_signal};

#[tokio::test]
async fn test_offer_publishes_local_offer() {
    init_tracing();

    let mut peer = create_test_peer(test_config());
    let remote = Token::from(REMOTE_TOKEN);

    let handle = peer.client.offer(&remote).await.expect("offer failed");
    assert_eq!(handle.token(), &remote);

    let offer = wait_for_signal(&mut peer.signal_rx, SignalKind::Offer, 1000)
        .await
        .expect("no offer was forwarded");
    assert_eq!(offer.token, remote);
    assert_eq!(offer.description.as_deref(), Some(MOCK_OFFER_SDP));

    let session = peer.client.registry().resolve(&handle).unwrap();
    assert_eq!(session.channel().map(|c| c.label()).as_deref(), Some("test"));

    // The remote answer lands on the same connection.
    let outcome = peer
        .client
        .dispatcher()
        .dispatch(&answer_json(REMOTE_TOKEN, "remote-answer"))
        .await;
    assert!(outcome.is_applied());
    assert_eq!(peer.connector.connect_count(), 1);
    assert_eq!(peer.connector.last_link().remote_descriptions().len(), 1);
}
