use std::io;

use crate::frame::Direction;

#[derive(thiserror::Error, Debug)]
pub enum DeauthError {
    /// A MAC address string was not six colon separated hex pairs.
    #[error("Invalid MAC address: {}", .0)]
    InvalidAddress(String),
    #[error("Invalid interface name: {:?}", .0)]
    InvalidInterface(String),
    /// One or more required options were not supplied.
    /// Carries the long names of the absent options.
    #[error("Missing arguments: {}", .0.join(", "))]
    MissingArguments(Vec<&'static str>),
    /// The raw socket could not be resolved, created or bound.
    #[error("Failed to open raw channel: {}", .0)]
    ChannelError(String),
    #[error("Failed to transmit {} frame: {}", .direction, .source)]
    TransmitError {
        direction: Direction,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, DeauthError>;
