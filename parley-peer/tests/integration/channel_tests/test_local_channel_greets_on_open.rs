use bytes::Bytes;
use parley_core::{Payload, Token};
use parley_peer::{ChannelSettings, ClientConfig};

use crate::integration::{REMOTE_TOKEN, create_test_peer, init_tracing, test_config};

#[tokio::test]
async fn test_local_channel_greets_on_open() {
    init_tracing();

    let config = ClientConfig {
        channel: ChannelSettings {
            echo: false,
            binary_greeting: Some(16),
        },
        channel_label: "chat".into(),
        ..test_config()
    };
    let peer = create_test_peer(config);
    peer.client
        .offer(&Token::from(REMOTE_TOKEN))
        .await
        .expect("offer failed");

    let channel = peer.connector.last_link().channels().pop().unwrap();
    assert!(channel.sent().is_empty(), "nothing is sent before open");

    channel.open().await;
    assert_eq!(
        channel.sent(),
        vec![
            Payload::from("Hello from AB12"),
            Payload::Binary(Bytes::from(vec![0u8; 16])),
        ]
    );
}
