//! Conversions between big-endian byte spans and semantic scalar values.
//!
//! Every helper is a pure function over its arguments: no I/O, no state kept
//! between calls. Fields are unsigned and 1..=8 bytes wide. "Nullable" fields
//! reserve one sentinel value (all bits set, by convention) to mean "no
//! reading"; keeping real readings off the sentinel is a contract of the
//! field's design, not something these functions police.

use thiserror::Error;

/// Widest integer field any layout may declare, in bytes.
pub const MAX_FIELD_WIDTH: usize = 8;

/// Encoded field bytes. Fields are at most [`MAX_FIELD_WIDTH`] wide, so this
/// never allocates.
pub type FieldBytes = heapless::Vec<u8, MAX_FIELD_WIDTH>;

/// Error type for scalar conversions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScalarError {
    /// Span or width outside the supported 1..=8 bytes.
    #[error("field spans {found} byte(s), supported widths are 1..={max}", max = MAX_FIELD_WIDTH)]
    MalformedInput { found: usize },
    /// Value cannot be written as a `width`-byte unsigned integer.
    #[error("value {value} does not fit in {width} unsigned byte(s)")]
    EncodeRange { value: i128, width: usize },
}

/// Enum field value that survives firmware this crate does not know about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MaybeKnown<E> {
    /// The wire value matched a declared constant.
    Known(E),
    /// The raw wire value; no declared constant matches it.
    Unknown(u64),
}

impl<E> MaybeKnown<E> {
    /// The declared constant, if the wire value matched one.
    pub fn known(self) -> Option<E> {
        match self {
            MaybeKnown::Known(value) => Some(value),
            MaybeKnown::Unknown(_) => None,
        }
    }
}

/// Conventional "no reading" sentinel for a `width`-byte field: all bits set.
/// This is also the largest value the width can carry.
pub const fn null_value(width: usize) -> u64 {
    if width >= MAX_FIELD_WIDTH {
        u64::MAX
    } else {
        (1u64 << (width * 8)) - 1
    }
}

/// Reads a big-endian unsigned integer spanning all of `data`.
pub fn decode_unsigned(data: &[u8]) -> Result<u64, ScalarError> {
    if data.is_empty() || data.len() > MAX_FIELD_WIDTH {
        return Err(ScalarError::MalformedInput { found: data.len() });
    }
    let mut value = 0u64;
    for &byte in data {
        value = (value << 8) | u64::from(byte);
    }
    Ok(value)
}

/// Reads a big-endian unsigned integer, mapping the field's sentinel to
/// `None`.
pub fn decode_nullable(data: &[u8], null: u64) -> Result<Option<u64>, ScalarError> {
    let value = decode_unsigned(data)?;
    Ok((value != null).then_some(value))
}

/// Reads a nullable enum field.
///
/// A present value matching one of `E`'s constants comes back as
/// [`MaybeKnown::Known`]; any other present value passes through as
/// [`MaybeKnown::Unknown`] rather than failing, so packets from newer
/// firmware keep decoding.
pub fn decode_nullable_enum<E>(data: &[u8], null: u64) -> Result<Option<MaybeKnown<E>>, ScalarError>
where
    E: TryFrom<u64>,
{
    Ok(decode_nullable(data, null)?.map(|raw| match E::try_from(raw) {
        Ok(value) => MaybeKnown::Known(value),
        Err(_) => {
            log::debug!("enum field value {raw:#x} matches no declared constant");
            MaybeKnown::Unknown(raw)
        }
    }))
}

/// Reads a nullable scaled field: the wire carries `value * scale` as an
/// integer, so a present value is divided back down. `scale` is a fixed
/// positive constant from the field's layout.
pub fn decode_nullable_scaled(
    data: &[u8],
    scale: f64,
    null: u64,
) -> Result<Option<f64>, ScalarError> {
    Ok(decode_nullable(data, null)?.map(|raw| raw as f64 / scale))
}

/// Writes `value` big-endian over `width` bytes, or the field's sentinel for
/// `None`.
pub fn encode_nullable(
    value: Option<u64>,
    width: usize,
    null: u64,
) -> Result<FieldBytes, ScalarError> {
    if width == 0 || width > MAX_FIELD_WIDTH {
        return Err(ScalarError::MalformedInput { found: width });
    }
    let raw = value.unwrap_or(null);
    if raw > null_value(width) {
        return Err(ScalarError::EncodeRange { value: raw as i128, width });
    }
    let mut out = FieldBytes::new();
    // Cannot overflow: width was checked against the buffer's capacity.
    let _ = out.extend_from_slice(&raw.to_be_bytes()[MAX_FIELD_WIDTH - width..]);
    Ok(out)
}

/// Writes a nullable scaled field: a present `value` is multiplied by
/// `scale`, rounded to the nearest integer (ties to even), and written
/// big-endian over `width` bytes.
pub fn encode_nullable_scaled(
    value: Option<f64>,
    width: usize,
    scale: f64,
    null: u64,
) -> Result<FieldBytes, ScalarError> {
    if width == 0 || width > MAX_FIELD_WIDTH {
        return Err(ScalarError::MalformedInput { found: width });
    }
    let raw = match value {
        None => None,
        Some(v) => {
            let scaled = libm::roundeven(v * scale);
            // The negated comparison also rejects NaN.
            if !(scaled >= 0.0) || scaled >= (1u128 << (width * 8)) as f64 {
                return Err(ScalarError::EncodeRange { value: scaled as i128, width });
            }
            Some(scaled as u64)
        }
    };
    encode_nullable(raw, width, null)
}
