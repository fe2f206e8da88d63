use parley_core::SignalKind;
use parley_peer::{Discard, DispatchOutcome};

use crate::integration::{create_test_peer, init_tracing, test_config};
use crate::utils::{answer_json, candidate_json};

#[tokio::test]
async fn test_unknown_token_is_discarded() {
    init_tracing();

    let peer = create_test_peer(test_config());
    let dispatcher = peer.client.dispatcher();

    let outcome = dispatcher.dispatch(&answer_json("QQ11", "sdp")).await;
    assert!(matches!(
        outcome,
        DispatchOutcome::Discarded(Discard::UnknownToken {
            kind: SignalKind::Answer,
            ..
        })
    ));

    let outcome = dispatcher
        .dispatch(&candidate_json("QQ11", "candidate:1", "0"))
        .await;
    assert!(matches!(
        outcome,
        DispatchOutcome::Discarded(Discard::UnknownToken {
            kind: SignalKind::Candidate,
            ..
        })
    ));

    assert!(peer.client.registry().is_empty());
    assert_eq!(peer.connector.connect_count(), 0);
}
