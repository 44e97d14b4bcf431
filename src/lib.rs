//! DeauthOxide library components
//!
//! Frame construction, sequence control and the transmit loop, exposed for
//! the binary and for testing.

pub mod attack;
pub mod cli;
pub mod error;
pub mod frame;
pub mod mac;
pub mod rawsocks;
pub mod sequence;
pub mod status;

pub use error::{DeauthError, Result};
