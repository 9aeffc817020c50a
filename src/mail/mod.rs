//! Message assembly and SMTP delivery.

pub mod delivery;
pub mod message;

pub use delivery::{DeliveryAgent, DeliveryReport, deliver_over_smtp, install_crypto_provider};
pub use message::{AssembledMessage, OutgoingMessage, compose_from};
