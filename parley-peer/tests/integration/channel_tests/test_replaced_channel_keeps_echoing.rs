use parley_core::{Payload, Token};
use parley_peer::{ChannelSettings, ClientConfig};
use std::sync::Arc;

use crate::integration::{REMOTE_TOKEN, create_test_peer, init_tracing, test_config};
use crate::utils::offer_json;

#[tokio::test]
async fn test_replaced_channel_keeps_echoing() {
    init_tracing();

    let config = ClientConfig {
        channel: ChannelSettings {
            echo: true,
            binary_greeting: None,
        },
        ..test_config()
    };
    let peer = create_test_peer(config);
    peer.client
        .dispatcher()
        .dispatch(&offer_json(REMOTE_TOKEN, "sdp"))
        .await;

    let link = peer.connector.last_link();
    let first = link.open_remote_channel("first").await;
    first.open().await;
    let second = link.open_remote_channel("second").await;
    second.open().await;

    let session = peer
        .client
        .registry()
        .session(&Token::from(REMOTE_TOKEN))
        .unwrap();
    assert_eq!(session.channel().unwrap().label(), "second");
    drop(session);

    // The registry no longer holds the first channel; only its handler does.
    let handler = first.observer();
    let sent = first.sent_log();
    let weak = Arc::downgrade(&first);
    drop(first);
    assert!(weak.upgrade().is_some());

    handler.on_message(Payload::from("still open")).await;
    assert_eq!(
        *sent.lock().unwrap(),
        vec![
            Payload::from("Hello from peer with AB12"),
            Payload::from("still open"),
        ]
    );
}
