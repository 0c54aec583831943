use async_trait::async_trait;
use herald_directory::ContactRecord;
use tokio::sync::mpsc;

use crate::error::TransportError;

/// Lifecycle events emitted by a transport after [`Transport::connect`].
///
/// The core acts only on `Ready` (gates job arming); the rest is logged.
#[derive(Debug, Clone)]
pub enum TransportEvent {
    /// Initial sync complete — jobs may be armed.
    Ready,
    /// The remote side pushed its contact list. Records carry
    /// `ContactOrigin::Remote`; the directory itself stays immutable.
    ContactsReceived(Vec<ContactRecord>),
    /// The connection closed after being established.
    Closed { reason: String },
}

/// Delivery acknowledgement for one send.
#[derive(Debug, Clone)]
pub struct SendReceipt {
    /// Transport-assigned message id.
    pub message_id: String,
    /// Delivery status as reported by the transport (e.g. "accepted").
    pub status: String,
}

/// Minimal capability interface the core consumes.
///
/// Implementations must be `Send + Sync` so a connected transport can be
/// shared across concurrently-firing job timers.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Stable lowercase identifier for this transport (e.g. `"whatsapp"`).
    fn name(&self) -> &str;

    /// Establish the connection and return the lifecycle event stream.
    ///
    /// `TransportEvent::Ready` arrives on the stream once the initial sync
    /// has completed; a connection that cannot be established at all fails
    /// here instead.
    async fn connect(&mut self) -> Result<mpsc::Receiver<TransportEvent>, TransportError>;

    /// Deliver one text message to `address`.
    ///
    /// Intentionally `&self` so concurrent job dispatches can share the
    /// connected transport without a mutable borrow.
    async fn send(&self, address: &str, text: &str) -> Result<SendReceipt, TransportError>;
}
