//! Status notification the hub pushes while connected.
//!
//! Fixed layout, offsets in bytes, multi-byte fields big-endian:
//!
//! | offset | width | field      |
//! |--------|-------|------------|
//! | 0      | 1     | flags      |
//! | 1      | 1     | (reserved) |
//! | 2      | 2     | ambient_a  |
//! | 4      | 2     | ambient_b  |
//! | 6      | 2     | probe_p1   |
//! | 8      | 2     | probe_p2   |
//! | 10     | 1     | battery    |
//!
//! Longer buffers decode fine; bytes past the table are ignored.

use core::fmt;

use crate::{Decode, Encode, packet::PacketError, scalar};

/// Smallest buffer that carries the whole table.
pub const MIN_LEN: usize = 11;

const FLAGS_OFFSET: usize = 0;
const AMBIENT_A_OFFSET: usize = 2;
const AMBIENT_B_OFFSET: usize = 4;
const PROBE_P1_OFFSET: usize = 6;
const PROBE_P2_OFFSET: usize = 8;
const BATTERY_OFFSET: usize = 10;

/// Bit assignments of the flag byte at offset 0.
pub mod flags {
    /// Set while probe P1 is plugged in.
    pub const PROBE_P1_CONNECTED: u8 = 1 << 2;
    /// Set while probe P2 is plugged in.
    pub const PROBE_P2_CONNECTED: u8 = 1 << 3;
    /// Set when the hub displays Celsius, clear for Fahrenheit.
    pub const UNIT_CELSIUS: u8 = 1 << 4;
    /// Set while eco mode is active.
    pub const ECO_MODE: u8 = 1 << 7;
    /// Bits with no assigned meaning; kept clear on encode.
    pub const RESERVED: u8 = !(PROBE_P1_CONNECTED | PROBE_P2_CONNECTED | UNIT_CELSIUS | ECO_MODE);
}

/// Unit the hub displays temperatures in. The wire readings themselves are
/// raw sensor counts either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    /// Single-letter label, as printed on the hub's display.
    pub const fn letter(&self) -> char {
        match self {
            TemperatureUnit::Celsius => 'C',
            TemperatureUnit::Fahrenheit => 'F',
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// One decoded status notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusNotify {
    /// Battery level, raw device units.
    pub battery: u8,
    /// First ambient sensor reading, raw counts.
    pub ambient_a: u16,
    /// Second ambient sensor reading, raw counts.
    pub ambient_b: u16,
    /// Probe P1 reading, raw counts. Meaningful only while P1 is connected.
    pub probe_p1: u16,
    /// Probe P2 reading, raw counts. Meaningful only while P2 is connected.
    pub probe_p2: u16,
    pub probe_p1_connected: bool,
    pub probe_p2_connected: bool,
    pub eco_mode: bool,
    pub temperature_unit: TemperatureUnit,
}

impl StatusNotify {
    /// Control payload that asks the hub to push a status notification.
    /// Protocol-defined constant, written to the control point verbatim.
    pub const REQUEST: [u8; 2] = [0x53, 0x00];

    fn flag_byte(&self) -> u8 {
        let mut flag = 0;
        if self.probe_p1_connected {
            flag |= flags::PROBE_P1_CONNECTED;
        }
        if self.probe_p2_connected {
            flag |= flags::PROBE_P2_CONNECTED;
        }
        if self.temperature_unit == TemperatureUnit::Celsius {
            flag |= flags::UNIT_CELSIUS;
        }
        if self.eco_mode {
            flag |= flags::ECO_MODE;
        }
        flag
    }

    /// The notification's wire form. Reserved bits and the pad byte are
    /// zero.
    pub fn bytes(&self) -> [u8; MIN_LEN] {
        let mut data = [0; MIN_LEN];
        data[FLAGS_OFFSET] = self.flag_byte();
        data[AMBIENT_A_OFFSET..AMBIENT_A_OFFSET + 2].copy_from_slice(&self.ambient_a.to_be_bytes());
        data[AMBIENT_B_OFFSET..AMBIENT_B_OFFSET + 2].copy_from_slice(&self.ambient_b.to_be_bytes());
        data[PROBE_P1_OFFSET..PROBE_P1_OFFSET + 2].copy_from_slice(&self.probe_p1.to_be_bytes());
        data[PROBE_P2_OFFSET..PROBE_P2_OFFSET + 2].copy_from_slice(&self.probe_p2.to_be_bytes());
        data[BATTERY_OFFSET] = self.battery;
        data
    }
}

impl Decode<'_> for StatusNotify {
    type Error = PacketError;

    fn decode(data: &[u8]) -> Result<Self, PacketError> {
        if data.len() < MIN_LEN {
            return Err(PacketError::TooShort { expected_at_least: MIN_LEN, found: data.len() });
        }
        let flag = data[FLAGS_OFFSET];
        let unit = if flag & flags::UNIT_CELSIUS != 0 {
            TemperatureUnit::Celsius
        } else {
            TemperatureUnit::Fahrenheit
        };
        Ok(StatusNotify {
            battery: data[BATTERY_OFFSET],
            ambient_a: scalar::decode_unsigned(&data[AMBIENT_A_OFFSET..AMBIENT_A_OFFSET + 2])? as u16,
            ambient_b: scalar::decode_unsigned(&data[AMBIENT_B_OFFSET..AMBIENT_B_OFFSET + 2])? as u16,
            probe_p1: scalar::decode_unsigned(&data[PROBE_P1_OFFSET..PROBE_P1_OFFSET + 2])? as u16,
            probe_p2: scalar::decode_unsigned(&data[PROBE_P2_OFFSET..PROBE_P2_OFFSET + 2])? as u16,
            probe_p1_connected: flag & flags::PROBE_P1_CONNECTED != 0,
            probe_p2_connected: flag & flags::PROBE_P2_CONNECTED != 0,
            eco_mode: flag & flags::ECO_MODE != 0,
            temperature_unit: unit,
        })
    }
}

impl Encode for StatusNotify {
    type Error = PacketError;

    fn encode(&self, buffer: &mut [u8]) -> Result<usize, PacketError> {
        if buffer.len() < MIN_LEN {
            return Err(PacketError::EncodeBufferTooSmall {
                expected: MIN_LEN,
                found: buffer.len(),
            });
        }
        buffer[..MIN_LEN].copy_from_slice(&self.bytes());
        Ok(MIN_LEN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Flags 0x94: eco on, Celsius, P1 connected, P2 not.
    const NOTIFY: [u8; MIN_LEN] = [
        0x94, 0x00, 0x00, 0x58, 0x7C, 0x7C, 0x00, 0x1A, 0x00, 0x1A, 0x58,
    ];

    fn reference_record() -> StatusNotify {
        StatusNotify {
            battery: 88,
            ambient_a: 88,
            ambient_b: 31868,
            probe_p1: 26,
            probe_p2: 26,
            probe_p1_connected: true,
            probe_p2_connected: false,
            eco_mode: true,
            temperature_unit: TemperatureUnit::Celsius,
        }
    }

    #[test]
    fn decodes_a_reference_notification() {
        assert_eq!(StatusNotify::decode(&NOTIFY), Ok(reference_record()));
    }

    #[test]
    fn rejects_short_buffers_and_ignores_trailing_bytes() {
        assert_eq!(
            StatusNotify::decode(&NOTIFY[..MIN_LEN - 1]),
            Err(PacketError::TooShort { expected_at_least: MIN_LEN, found: MIN_LEN - 1 })
        );
        assert_eq!(
            StatusNotify::decode(&[]),
            Err(PacketError::TooShort { expected_at_least: MIN_LEN, found: 0 })
        );

        let mut padded = [0u8; MIN_LEN + 4];
        padded[..MIN_LEN].copy_from_slice(&NOTIFY);
        padded[MIN_LEN..].fill(0xEE);
        assert_eq!(StatusNotify::decode(&padded), Ok(reference_record()));
    }

    #[test]
    fn flag_bits_decode_independently() {
        for bit in 0..8 {
            let mut data = [0u8; MIN_LEN];
            data[0] = 1 << bit;
            let record = StatusNotify::decode(&data).unwrap();
            assert_eq!(record.probe_p1_connected, bit == 2, "bit {bit}");
            assert_eq!(record.probe_p2_connected, bit == 3, "bit {bit}");
            assert_eq!(record.eco_mode, bit == 7, "bit {bit}");
            let expected_unit = if bit == 4 {
                TemperatureUnit::Celsius
            } else {
                TemperatureUnit::Fahrenheit
            };
            assert_eq!(record.temperature_unit, expected_unit, "bit {bit}");
            assert_eq!((record.ambient_a, record.battery), (0, 0), "bit {bit}");
        }
    }

    #[test]
    fn reserved_pad_byte_is_ignored() {
        let mut data = [0u8; MIN_LEN];
        data[1] = 0xAB;
        assert_eq!(StatusNotify::decode(&data), StatusNotify::decode(&[0u8; MIN_LEN]));
    }

    #[test]
    fn encode_round_trips_and_keeps_reserved_bits_clear() {
        let record = reference_record();
        let wire = record.bytes();
        assert_eq!(wire, NOTIFY);
        assert_eq!(wire[0] & flags::RESERVED, 0);
        assert_eq!(wire[1], 0);
        assert_eq!(StatusNotify::decode(&wire), Ok(record));
    }

    #[test]
    fn encode_needs_a_full_buffer() {
        let record = reference_record();
        let mut short = [0u8; MIN_LEN - 1];
        assert_eq!(
            record.encode(&mut short),
            Err(PacketError::EncodeBufferTooSmall { expected: MIN_LEN, found: MIN_LEN - 1 })
        );

        let mut roomy = [0u8; MIN_LEN + 2];
        assert_eq!(record.encode(&mut roomy), Ok(MIN_LEN));
        assert_eq!(&roomy[..MIN_LEN], &NOTIFY);
        assert_eq!(&roomy[MIN_LEN..], &[0, 0]);
    }

    #[test]
    fn unit_prints_its_display_letter() {
        assert_eq!(TemperatureUnit::Celsius.letter(), 'C');
        assert_eq!(TemperatureUnit::Fahrenheit.to_string(), "F");
        assert_eq!(TemperatureUnit::default(), TemperatureUnit::Celsius);
    }
}
