use parley_core::Token;
use parley_peer::PeerError;

use crate::integration::{LOCAL_TOKEN, REMOTE_TOKEN, create_test_peer, init_tracing, test_config};

#[tokio::test]
async fn test_offer_rejects_self_and_active_tokens() {
    init_tracing();

    let peer = create_test_peer(test_config());

    let result = peer.client.offer(&Token::from(LOCAL_TOKEN)).await;
    assert!(matches!(result, Err(PeerError::SelfTarget(_))));
    assert!(peer.client.registry().is_empty());

    let remote = Token::from(REMOTE_TOKEN);
    peer.client.offer(&remote).await.expect("first offer failed");
    let result = peer.client.offer(&remote).await;
    assert!(matches!(result, Err(PeerError::SessionActive(t)) if t == remote));

    assert_eq!(peer.connector.connect_count(), 1);
    assert_eq!(peer.connector.last_link().channels().len(), 1);
}
