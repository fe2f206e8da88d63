use crate::transport::{ChannelObserver, DataLink, TransportError};
use async_trait::async_trait;
use parley_core::Payload;
use std::sync::Arc;
use webrtc::data_channel::RTCDataChannel;
use webrtc::data_channel::data_channel_message::DataChannelMessage;

/// [`DataLink`] over a webrtc-rs data channel.
pub struct RtcChannel {
    data_channel: Arc<RTCDataChannel>,
}

impl RtcChannel {
    pub fn new(data_channel: Arc<RTCDataChannel>) -> Self {
        Self { data_channel }
    }
}

#[async_trait]
impl DataLink for RtcChannel {
    fn label(&self) -> String {
        self.data_channel.label().to_owned()
    }

    async fn send(&self, payload: Payload) -> Result<(), TransportError> {
        match payload {
            Payload::Text(text) => self.data_channel.send_text(text).await?,
            Payload::Binary(data) => self.data_channel.send(&data).await?,
        };
        Ok(())
    }

    fn observe(&self, observer: Arc<dyn ChannelObserver>) {
        let open_observer = observer.clone();
        self.data_channel.on_open(Box::new(move || {
            Box::pin(async move {
                open_observer.on_open().await;
            })
        }));

        let close_observer = observer.clone();
        self.data_channel.on_close(Box::new(move || {
            let observer = close_observer.clone();
            Box::pin(async move {
                observer.on_closed().await;
            })
        }));

        let error_observer = observer.clone();
        self.data_channel.on_error(Box::new(move |e: webrtc::Error| {
            let observer = error_observer.clone();
            Box::pin(async move {
                observer.on_error(e.to_string()).await;
            })
        }));

        self.data_channel
            .on_message(Box::new(move |msg: DataChannelMessage| {
                let observer = observer.clone();
                Box::pin(async move {
                    let payload = if msg.is_string {
                        Payload::Text(String::from_utf8_lossy(&msg.data).into_owned())
                    } else {
                        Payload::Binary(msg.data)
                    };
                    observer.on_message(payload).await;
                })
            }));
    }

    async fn close(&self) -> Result<(), TransportError> {
        self.data_channel.close().await?;
        Ok(())
    }
}
