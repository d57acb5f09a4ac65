//! The table of packet layouts the codec understands, and their dispatch.

use core::fmt;

use thiserror::Error;

use crate::{
    Decode,
    scalar::ScalarError,
    status::{self, StatusNotify},
};

/// Error type for decoding and encoding packets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PacketError {
    /// Buffer ends before the layout does; nothing was decoded.
    #[error("packet too short: expected at least {expected_at_least} byte(s), found {found}")]
    TooShort { expected_at_least: usize, found: usize },
    /// Caller-supplied encode buffer cannot hold the layout.
    #[error("encode buffer too small: expected {expected} byte(s), found {found}")]
    EncodeBufferTooSmall { expected: usize, found: usize },
    /// A field refused to convert.
    #[error(transparent)]
    Scalar(#[from] ScalarError),
}

/// Every packet layout the codec understands.
///
/// The transport resolves a characteristic to one of these and hands the
/// payload to [`PacketKind::decode`]. Adding a layout means adding a variant
/// and its module; nothing here is registered at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PacketKind {
    /// Periodic status push: temperatures, battery, flag byte.
    StatusNotify,
}

impl PacketKind {
    /// Every kind, for transports that enumerate characteristics up front.
    pub const ALL: &'static [PacketKind] = &[PacketKind::StatusNotify];

    /// Diagnostic label used in logs.
    pub const fn name(&self) -> &'static str {
        match self {
            PacketKind::StatusNotify => "status-notify",
        }
    }

    /// Smallest buffer this layout decodes from.
    pub const fn min_len(&self) -> usize {
        match self {
            PacketKind::StatusNotify => status::MIN_LEN,
        }
    }

    /// Fixed payload that asks the device to emit this packet, for layouts
    /// that define one.
    pub fn request(&self) -> Option<&'static [u8]> {
        match self {
            PacketKind::StatusNotify => Some(&StatusNotify::REQUEST),
        }
    }

    /// Decodes `data` as this kind of packet.
    pub fn decode(&self, data: &[u8]) -> Result<Packet, PacketError> {
        log::trace!("decoding {} byte(s) as {}", data.len(), self.name());
        match self {
            PacketKind::StatusNotify => StatusNotify::decode(data).map(Packet::StatusNotify),
        }
    }
}

impl fmt::Display for PacketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A decoded packet, tagged by its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Packet {
    StatusNotify(StatusNotify),
}

impl Packet {
    /// The kind this packet decoded as.
    pub const fn kind(&self) -> PacketKind {
        match self {
            Packet::StatusNotify(_) => PacketKind::StatusNotify,
        }
    }
}
