use parley_core::IceCandidate;
use parley_peer::DispatchOutcome;

use crate::integration::{REMOTE_TOKEN, create_test_peer, init_tracing, test_config};
use crate::utils::{candidate_json, offer_json};

#[tokio::test]
async fn test_candidate_applies_to_existing_session() {
    init_tracing();

    let peer = create_test_peer(test_config());
    let dispatcher = peer.client.dispatcher();

    dispatcher.dispatch(&offer_json(REMOTE_TOKEN, "sdp")).await;
    let outcome = dispatcher
        .dispatch(&candidate_json(
            REMOTE_TOKEN,
            "candidate:1 1 udp 2130706431 10.0.0.2 50000 typ host",
            "0",
        ))
        .await;
    assert!(matches!(
        outcome,
        DispatchOutcome::Applied { created: false, .. }
    ));

    let link = peer.connector.last_link();
    assert_eq!(
        link.remote_candidates(),
        vec![IceCandidate::new(
            "candidate:1 1 udp 2130706431 10.0.0.2 50000 typ host",
            "0"
        )]
    );
}
