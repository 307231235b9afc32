//! Connection lifecycle states and the events listeners receive.

use std::io;
use std::sync::Arc;

use artemis_shared::Version;
use thiserror::Error;

use crate::error::{FrameError, ParseError};

/// Where the client is in its lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ConnectionState {
    /// No socket.
    #[default]
    Idle,
    /// Socket being opened.
    Connecting,
    /// Socket open. Tasks may or may not be running.
    Connected,
    /// Teardown in progress.
    Disconnecting,
}

/// Why a connection ended.
#[derive(Error, Debug, Clone)]
pub enum DisconnectCause {
    /// The caller stopped the client.
    #[error("disconnected locally")]
    LocalDisconnect,

    /// The server closed the stream.
    #[error("server closed the connection")]
    RemoteDisconnect,

    /// The server sent bytes that could not be decoded.
    #[error("packet parse error: {0}")]
    PacketParseError(#[from] ParseError),

    /// The socket failed.
    #[error("i/o error: {0}")]
    IoError(Arc<io::Error>),

    /// The server's version is outside the supported range.
    #[error("unsupported server version {0}")]
    UnsupportedVersion(Version),

    /// Anything else.
    #[error("{0}")]
    UnknownError(String),
}

impl From<io::Error> for DisconnectCause {
    fn from(error: io::Error) -> Self {
        Self::IoError(Arc::new(error))
    }
}

impl From<FrameError> for DisconnectCause {
    fn from(error: FrameError) -> Self {
        match error {
            FrameError::Closed => Self::RemoteDisconnect,
            FrameError::Io(e) => e.into(),
            FrameError::Parse(e) => e.into(),
        }
    }
}

/// Lifecycle notifications, delivered in order on the dispatcher task.
///
/// `Disconnected` is the exception: it is delivered on whichever thread ran
/// the teardown, after every other task has been stopped.
#[derive(Debug, Clone)]
pub enum ConnectionEvent {
    /// The socket is open.
    Connected,
    /// No liveness packet within the heartbeat timeout.
    HeartbeatLost,
    /// A liveness packet arrived after `HeartbeatLost`.
    HeartbeatRegained,
    /// The connection ended. Sent exactly once per connection.
    Disconnected {
        /// What ended it.
        cause: DisconnectCause,
    },
}

impl ConnectionEvent {
    /// Returns the cause for `Disconnected`.
    #[must_use]
    pub const fn disconnect_cause(&self) -> Option<&DisconnectCause> {
        match self {
            Self::Disconnected { cause } => Some(cause),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cause_display() {
        let cause = DisconnectCause::UnsupportedVersion(Version::new(2, 1, 0));
        assert_eq!(cause.to_string(), "unsupported server version 2.1.0");

        let cause: DisconnectCause = ParseError::UnknownObjectType(40).into();
        assert!(matches!(cause, DisconnectCause::PacketParseError(_)));
    }

    #[test]
    fn test_frame_error_mapping() {
        assert!(matches!(
            DisconnectCause::from(FrameError::Closed),
            DisconnectCause::RemoteDisconnect
        ));
        let io = io::Error::new(io::ErrorKind::ConnectionReset, "reset");
        assert!(matches!(
            DisconnectCause::from(FrameError::Io(io)),
            DisconnectCause::IoError(_)
        ));
        assert!(matches!(
            DisconnectCause::from(FrameError::Parse(ParseError::InvalidMagic(0))),
            DisconnectCause::PacketParseError(ParseError::InvalidMagic(0))
        ));
    }

    #[test]
    fn test_disconnect_cause_accessor() {
        assert!(ConnectionEvent::Connected.disconnect_cause().is_none());
        let event = ConnectionEvent::Disconnected {
            cause: DisconnectCause::RemoteDisconnect,
        };
        assert!(matches!(
            event.disconnect_cause(),
            Some(DisconnectCause::RemoteDisconnect)
        ));
    }
}
