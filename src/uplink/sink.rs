//! Trait abstraction for uplink transmission to enable testing

use async_trait::async_trait;
use std::io;

/// Trait for uplink frame transmission
///
/// The radio stack (join, MAC, duty-cycle handling) lives behind this
/// boundary; the node core only hands over a port number and the encoded
/// payload bytes.
#[async_trait]
pub trait UplinkSink: Send {
    /// Transmit one encoded payload on the given port
    async fn send(&mut self, port: u8, payload: &[u8]) -> io::Result<()>;
}

#[cfg(test)]
pub mod mocks {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Mock uplink sink for testing
    #[derive(Clone)]
    pub struct MockUplink {
        pub sent_frames: Arc<Mutex<Vec<(u8, Vec<u8>)>>>,
        pub send_error: Arc<Mutex<Option<io::ErrorKind>>>,
    }

    impl MockUplink {
        pub fn new() -> Self {
            Self {
                sent_frames: Arc::new(Mutex::new(Vec::new())),
                send_error: Arc::new(Mutex::new(None)),
            }
        }

        pub fn get_sent_frames(&self) -> Vec<(u8, Vec<u8>)> {
            self.sent_frames.lock().unwrap().clone()
        }

        pub fn set_send_error(&self, error: io::ErrorKind) {
            *self.send_error.lock().unwrap() = Some(error);
        }
    }

    #[async_trait]
    impl UplinkSink for MockUplink {
        async fn send(&mut self, port: u8, payload: &[u8]) -> io::Result<()> {
            if let Some(error) = *self.send_error.lock().unwrap() {
                return Err(io::Error::new(error, "Mock send error"));
            }
            self.sent_frames
                .lock()
                .unwrap()
                .push((port, payload.to_vec()));
            Ok(())
        }
    }
}
