//! `herald-transport` — the messaging transport capability seam.
//!
//! The core never talks to a messaging service directly; it consumes the
//! [`Transport`] trait: connect once (yielding a lifecycle event stream),
//! then send individual messages. Only [`TransportEvent::Ready`] and a
//! connect failure are acted on — everything else is logged by the caller.
//!
//! The production implementation is [`whatsapp::WhatsAppTransport`], built
//! on the WhatsApp Business Cloud API over reqwest.

pub mod error;
pub mod transport;
pub mod whatsapp;

pub use error::{Result, TransportError};
pub use transport::{SendReceipt, Transport, TransportEvent};
pub use whatsapp::WhatsAppTransport;
