// Application layer: transports wrapping the report engine.

#[cfg(feature = "cli")]
pub mod server;
