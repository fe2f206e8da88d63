use parley_core::{Payload, Token};
use parley_peer::{ChannelSettings, ClientConfig};
use std::sync::Arc;

use crate::integration::{REMOTE_TOKEN, create_test_peer, init_tracing, test_config};
use crate::utils::offer_json;

#[tokio::test]
async fn test_echo_after_teardown_is_noop() {
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

    let channel = peer
        .connector
        .last_link()
        .open_remote_channel("test")
        .await;
    channel.open().await;

    let handler = channel.observer();
    let sent = channel.sent_log();
    let weak = Arc::downgrade(&channel);

    peer.client.shutdown().await;
    drop(channel);
    assert!(weak.upgrade().is_none(), "channel outlived its session");
    assert!(
        !peer
            .client
            .registry()
            .contains(&Token::from(REMOTE_TOKEN))
    );

    // A message racing the teardown is counted but cannot be echoed.
    handler.on_message(Payload::from("late")).await;
    assert_eq!(
        *sent.lock().unwrap(),
        vec![Payload::from("Hello from peer with AB12")]
    );
    assert_eq!(peer.client.counter().count(), 1);
}
