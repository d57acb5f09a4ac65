//! Wire codec for a dual-probe BLE cooking-thermometer hub.
//!
//! The hub pushes fixed-layout status notifications (two ambient sensors, two
//! food probes, battery, a packed flag byte) and accepts small fixed request
//! payloads. This crate only converts between those byte buffers and typed
//! records; discovering the device, routing characteristics and shipping the
//! bytes is the transport's job. All multi-byte fields are big-endian.

#![cfg_attr(not(test), no_std)]

pub mod packet;
pub mod scalar;
pub mod status;

/// Writes a value into its wire form.
pub trait Encode {
    type Error;

    /// Encodes `self` into the front of `buffer`, returning the number of
    /// bytes written.
    fn encode(&self, buffer: &mut [u8]) -> Result<usize, Self::Error>;
}

/// Reads a value out of its wire form.
pub trait Decode<'a>
where
    Self: Sized,
{
    type Error;

    fn decode(data: &'a [u8]) -> Result<Self, Self::Error>;
}

pub use packet::{Packet, PacketError, PacketKind};
pub use scalar::{FieldBytes, MaybeKnown, ScalarError};
pub use status::{StatusNotify, TemperatureUnit};
