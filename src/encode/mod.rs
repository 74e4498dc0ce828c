//! Encoding sinks.
//!
//! Sinks consume synthesized frames in sequence order.

pub(crate) mod gif_sink;
pub(crate) mod sink;
