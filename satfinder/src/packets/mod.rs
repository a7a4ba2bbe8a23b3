//! Wire types of the dish WebSocket protocol.
//!
//! Every frame is a flat JSON object whose `action` field is the
//! discriminator. Outbound frames are [`Command`]s; inbound frames decode into
//! a [`DevicePayload`] routed by [`InboundAction`].

mod command;
mod payload;
mod value;

pub use command::*;
pub use payload::*;
pub use value::{format_reading, FieldValue};
