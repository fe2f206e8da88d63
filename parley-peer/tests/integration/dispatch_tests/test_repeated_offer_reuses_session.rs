use parley_core::Token;
use parley_peer::DispatchOutcome;

use crate::integration::{REMOTE_TOKEN, create_test_peer, init_tracing, test_config};
use crate::utils::offer_json;

#[tokio::test]
async fn test_repeated_offer_reuses_session() {
    init_tracing();

    let peer = create_test_peer(test_config());
    let dispatcher = peer.client.dispatcher();

    let first = dispatcher.dispatch(&offer_json(REMOTE_TOKEN, "one")).await;
    let second = dispatcher.dispatch(&offer_json(REMOTE_TOKEN, "two")).await;

    assert!(matches!(first, DispatchOutcome::Applied { created: true, .. }));
    assert!(matches!(second, DispatchOutcome::Applied { created: false, .. }));
    assert_eq!(peer.connector.connect_count(), 1);
    assert_eq!(peer.client.registry().tokens(), vec![Token::from(REMOTE_TOKEN)]);
    assert_eq!(peer.connector.last_link().remote_descriptions().len(), 2);
}
