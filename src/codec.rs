//! Little-endian wire codec for the stake pool program.
//!
//! Account data and instruction parameters are laid out by the on-chain
//! program as fixed-order field sequences: fixed-width little-endian
//! integers, 32-byte keys, single-byte tags, and u32-count-prefixed
//! repetitions. This module is the client-side engine for that format.
//!
//! Every serializable type implements [`Codec`]. A codec knows its fixed
//! byte span when it has one ([`Codec::SPAN`]), encodes into a caller
//! buffer, decodes from one, and can report how many bytes an encoded value
//! occupies without materializing it ([`Codec::span_at`]) so that an
//! enclosing record can step over variable-length fields. Records compose
//! field codecs through the [`Reader`]/[`Writer`] cursors, which advance by
//! each field's actual span and attach the field name to tag-domain errors.
//!
//! Decoding a buffer and re-encoding the result reproduces the original
//! bytes exactly, with one documented exception on [`FutureEpoch`].
//!
//! Everything here is pure and synchronous: no shared state, no I/O, and
//! nothing to lock. Schema information lives in the types themselves.

use solana_program::pubkey::{Pubkey, PUBKEY_BYTES};

use crate::error::CodecError;

/// A serializable unit of the wire format.
pub trait Codec: Sized {
    /// Encoded byte length, when it is the same for every value of the type.
    /// `None` means the span depends on content and must be computed with
    /// [`Codec::span_at`] or [`Codec::value_span`].
    const SPAN: Option<usize>;

    /// Writes the value at `buf[offset..]`, returning the number of bytes
    /// written.
    fn encode(&self, buf: &mut [u8], offset: usize) -> Result<usize, CodecError>;

    /// Reads a value from `buf[offset..]`, returning it together with the
    /// number of bytes consumed.
    fn decode_at(buf: &[u8], offset: usize) -> Result<(Self, usize), CodecError>;

    /// Number of bytes the encoded value at `buf[offset..]` occupies,
    /// without materializing it.
    fn span_at(buf: &[u8], offset: usize) -> Result<usize, CodecError> {
        match Self::SPAN {
            Some(span) => Ok(span),
            None => Self::decode_at(buf, offset).map(|(_, consumed)| consumed),
        }
    }

    /// Number of bytes this particular value occupies when encoded.
    fn value_span(&self) -> usize;

    /// Encodes into a freshly allocated, exactly sized buffer.
    fn to_bytes(&self) -> Result<Vec<u8>, CodecError> {
        let mut buf = vec![0u8; self.value_span()];
        self.encode(&mut buf, 0)?;
        Ok(buf)
    }
}

/// Declared integer widths must fit the 16-byte backing store; anything
/// else is a usage error, rejected before any buffer access.
fn check_width(width: usize) -> Result<(), CodecError> {
    if width == 0 || width > 16 {
        return Err(CodecError::SizeMismatch {
            field: "",
            expected: 16,
            actual: width,
        });
    }
    Ok(())
}

/// Fails with [`CodecError::BufferTooShort`] unless `buf[offset..]` holds at
/// least `needed` bytes.
pub(crate) fn ensure_len(buf: &[u8], offset: usize, needed: usize) -> Result<(), CodecError> {
    let available = buf.len().saturating_sub(offset);
    if available < needed {
        return Err(CodecError::BufferTooShort {
            offset,
            needed,
            available,
        });
    }
    Ok(())
}

/// Writes `value` as `width` little-endian bytes at `buf[offset..]`.
///
/// The backing type is deliberately wider than any field in the format so a
/// 64-bit field can never be silently truncated; a magnitude that does not
/// fit the declared width fails with [`CodecError::NumericOverflow`].
/// Supported widths are 1 through 16 bytes.
pub fn write_uint_le(
    buf: &mut [u8],
    offset: usize,
    value: u128,
    width: usize,
) -> Result<usize, CodecError> {
    check_width(width)?;
    if width < 16 && value >> (8 * width as u32) != 0 {
        return Err(CodecError::NumericOverflow { field: "", width });
    }
    ensure_len(buf, offset, width)?;
    buf[offset..offset + width].copy_from_slice(&value.to_le_bytes()[..width]);
    Ok(width)
}

/// Reads `width` little-endian bytes at `buf[offset..]` as an unsigned
/// magnitude.
pub fn read_uint_le(buf: &[u8], offset: usize, width: usize) -> Result<u128, CodecError> {
    check_width(width)?;
    ensure_len(buf, offset, width)?;
    let mut bytes = [0u8; 16];
    bytes[..width].copy_from_slice(&buf[offset..offset + width]);
    Ok(u128::from_le_bytes(bytes))
}

/// Writes `value` as `width` little-endian bytes in two's-complement over
/// `8 * width` bits. Values outside the representable range fail with
/// [`CodecError::NumericOverflow`].
pub fn write_int_le(
    buf: &mut [u8],
    offset: usize,
    value: i128,
    width: usize,
) -> Result<usize, CodecError> {
    check_width(width)?;
    if width < 16 {
        let bits = 8 * width as u32;
        let min = -(1i128 << (bits - 1));
        let max = (1i128 << (bits - 1)) - 1;
        if value < min || value > max {
            return Err(CodecError::NumericOverflow { field: "", width });
        }
    }
    ensure_len(buf, offset, width)?;
    buf[offset..offset + width].copy_from_slice(&value.to_le_bytes()[..width]);
    Ok(width)
}

/// Reads `width` little-endian bytes at `buf[offset..]` as a
/// two's-complement signed value: a set high bit yields
/// `magnitude - 2^(8 * width)`.
pub fn read_int_le(buf: &[u8], offset: usize, width: usize) -> Result<i128, CodecError> {
    check_width(width)?;
    ensure_len(buf, offset, width)?;
    let negative = buf[offset + width - 1] & 0x80 != 0;
    let mut bytes = if negative { [0xFFu8; 16] } else { [0u8; 16] };
    bytes[..width].copy_from_slice(&buf[offset..offset + width]);
    Ok(i128::from_le_bytes(bytes))
}

/// Copies a runtime-sized byte slice into a fixed `width` window. The source
/// length must equal `width` exactly.
pub fn write_blob(
    buf: &mut [u8],
    offset: usize,
    src: &[u8],
    width: usize,
) -> Result<usize, CodecError> {
    if src.len() != width {
        return Err(CodecError::SizeMismatch {
            field: "",
            expected: width,
            actual: src.len(),
        });
    }
    ensure_len(buf, offset, width)?;
    buf[offset..offset + width].copy_from_slice(src);
    Ok(width)
}

macro_rules! impl_codec_for_int {
    ($($ty:ty),*) => {
        $(
            impl Codec for $ty {
                const SPAN: Option<usize> = Some(std::mem::size_of::<$ty>());

                fn encode(&self, buf: &mut [u8], offset: usize) -> Result<usize, CodecError> {
                    const WIDTH: usize = std::mem::size_of::<$ty>();
                    ensure_len(buf, offset, WIDTH)?;
                    buf[offset..offset + WIDTH].copy_from_slice(&self.to_le_bytes());
                    Ok(WIDTH)
                }

                fn decode_at(buf: &[u8], offset: usize) -> Result<(Self, usize), CodecError> {
                    const WIDTH: usize = std::mem::size_of::<$ty>();
                    ensure_len(buf, offset, WIDTH)?;
                    let mut bytes = [0u8; WIDTH];
                    bytes.copy_from_slice(&buf[offset..offset + WIDTH]);
                    Ok((<$ty>::from_le_bytes(bytes), WIDTH))
                }

                fn value_span(&self) -> usize {
                    std::mem::size_of::<$ty>()
                }
            }
        )*
    };
}

impl_codec_for_int!(u8, u16, u32, i8, i16, i32);

macro_rules! impl_codec_for_wide_uint {
    ($($ty:ty),*) => {
        $(
            impl Codec for $ty {
                const SPAN: Option<usize> = Some(std::mem::size_of::<$ty>());

                fn encode(&self, buf: &mut [u8], offset: usize) -> Result<usize, CodecError> {
                    write_uint_le(buf, offset, *self as u128, std::mem::size_of::<$ty>())
                }

                fn decode_at(buf: &[u8], offset: usize) -> Result<(Self, usize), CodecError> {
                    const WIDTH: usize = std::mem::size_of::<$ty>();
                    let value = read_uint_le(buf, offset, WIDTH)?;
                    Ok((value as $ty, WIDTH))
                }

                fn value_span(&self) -> usize {
                    std::mem::size_of::<$ty>()
                }
            }
        )*
    };
}

macro_rules! impl_codec_for_wide_int {
    ($($ty:ty),*) => {
        $(
            impl Codec for $ty {
                const SPAN: Option<usize> = Some(std::mem::size_of::<$ty>());

                fn encode(&self, buf: &mut [u8], offset: usize) -> Result<usize, CodecError> {
                    write_int_le(buf, offset, *self as i128, std::mem::size_of::<$ty>())
                }

                fn decode_at(buf: &[u8], offset: usize) -> Result<(Self, usize), CodecError> {
                    const WIDTH: usize = std::mem::size_of::<$ty>();
                    let value = read_int_le(buf, offset, WIDTH)?;
                    Ok((value as $ty, WIDTH))
                }

                fn value_span(&self) -> usize {
                    std::mem::size_of::<$ty>()
                }
            }
        )*
    };
}

impl_codec_for_wide_uint!(u64, u128);
impl_codec_for_wide_int!(i64, i128);

impl Codec for bool {
    const SPAN: Option<usize> = Some(1);

    fn encode(&self, buf: &mut [u8], offset: usize) -> Result<usize, CodecError> {
        ensure_len(buf, offset, 1)?;
        buf[offset] = u8::from(*self);
        Ok(1)
    }

    fn decode_at(buf: &[u8], offset: usize) -> Result<(Self, usize), CodecError> {
        ensure_len(buf, offset, 1)?;
        match buf[offset] {
            0 => Ok((false, 1)),
            1 => Ok((true, 1)),
            value => Err(CodecError::InvalidBoolean { field: "", value }),
        }
    }

    fn value_span(&self) -> usize {
        1
    }
}

impl<const N: usize> Codec for [u8; N] {
    const SPAN: Option<usize> = Some(N);

    fn encode(&self, buf: &mut [u8], offset: usize) -> Result<usize, CodecError> {
        write_blob(buf, offset, self, N)
    }

    fn decode_at(buf: &[u8], offset: usize) -> Result<(Self, usize), CodecError> {
        ensure_len(buf, offset, N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(&buf[offset..offset + N]);
        Ok((out, N))
    }

    fn value_span(&self) -> usize {
        N
    }
}

impl Codec for Pubkey {
    const SPAN: Option<usize> = Some(PUBKEY_BYTES);

    fn encode(&self, buf: &mut [u8], offset: usize) -> Result<usize, CodecError> {
        write_blob(buf, offset, self.as_ref(), PUBKEY_BYTES)
    }

    fn decode_at(buf: &[u8], offset: usize) -> Result<(Self, usize), CodecError> {
        let (bytes, consumed) = <[u8; PUBKEY_BYTES]>::decode_at(buf, offset)?;
        Ok((Pubkey::new_from_array(bytes), consumed))
    }

    fn value_span(&self) -> usize {
        PUBKEY_BYTES
    }
}

impl Codec for String {
    const SPAN: Option<usize> = None;

    fn encode(&self, buf: &mut [u8], offset: usize) -> Result<usize, CodecError> {
        let bytes = self.as_bytes();
        let len = u32::try_from(bytes.len())
            .map_err(|_| CodecError::NumericOverflow { field: "", width: 4 })?;
        let mut consumed = len.encode(buf, offset)?;
        ensure_len(buf, offset + consumed, bytes.len())?;
        buf[offset + consumed..offset + consumed + bytes.len()].copy_from_slice(bytes);
        consumed += bytes.len();
        Ok(consumed)
    }

    fn decode_at(buf: &[u8], offset: usize) -> Result<(Self, usize), CodecError> {
        let (len, prefix) = u32::decode_at(buf, offset)?;
        let len = len as usize;
        ensure_len(buf, offset + prefix, len)?;
        let value = std::str::from_utf8(&buf[offset + prefix..offset + prefix + len])
            .map_err(|_| CodecError::InvalidUtf8 { field: "" })?
            .to_owned();
        Ok((value, prefix + len))
    }

    fn span_at(buf: &[u8], offset: usize) -> Result<usize, CodecError> {
        let (len, prefix) = u32::decode_at(buf, offset)?;
        ensure_len(buf, offset + prefix, len as usize)?;
        Ok(prefix + len as usize)
    }

    fn value_span(&self) -> usize {
        4 + self.len()
    }
}

impl<T: Codec> Codec for Vec<T> {
    const SPAN: Option<usize> = None;

    fn encode(&self, buf: &mut [u8], offset: usize) -> Result<usize, CodecError> {
        let count = u32::try_from(self.len())
            .map_err(|_| CodecError::NumericOverflow { field: "", width: 4 })?;
        let mut pos = offset + count.encode(buf, offset)?;
        for item in self {
            pos += item.encode(buf, pos)?;
        }
        Ok(pos - offset)
    }

    fn decode_at(buf: &[u8], offset: usize) -> Result<(Self, usize), CodecError> {
        let (count, prefix) = u32::decode_at(buf, offset)?;
        let mut pos = offset + prefix;
        // Sized by what actually decodes, not by the untrusted count.
        let mut items = Vec::new();
        for _ in 0..count {
            let (item, consumed) = T::decode_at(buf, pos)?;
            items.push(item);
            pos += consumed;
        }
        Ok((items, pos - offset))
    }

    fn span_at(buf: &[u8], offset: usize) -> Result<usize, CodecError> {
        let (count, prefix) = u32::decode_at(buf, offset)?;
        let mut pos = offset + prefix;
        match T::SPAN {
            Some(span) => {
                let total = (count as usize).checked_mul(span).unwrap_or(usize::MAX);
                ensure_len(buf, pos, total)?;
                pos += total;
            }
            None => {
                for _ in 0..count {
                    pos += T::span_at(buf, pos)?;
                }
            }
        }
        Ok(pos - offset)
    }

    fn value_span(&self) -> usize {
        4 + self.iter().map(Codec::value_span).sum::<usize>()
    }
}

impl<T: Codec> Codec for Option<T> {
    const SPAN: Option<usize> = None;

    fn encode(&self, buf: &mut [u8], offset: usize) -> Result<usize, CodecError> {
        ensure_len(buf, offset, 1)?;
        match self {
            None => {
                buf[offset] = 0;
                Ok(1)
            }
            Some(value) => {
                buf[offset] = 1;
                Ok(1 + value.encode(buf, offset + 1)?)
            }
        }
    }

    fn decode_at(buf: &[u8], offset: usize) -> Result<(Self, usize), CodecError> {
        ensure_len(buf, offset, 1)?;
        match buf[offset] {
            0 => Ok((None, 1)),
            1 => {
                let (value, consumed) = T::decode_at(buf, offset + 1)?;
                Ok((Some(value), 1 + consumed))
            }
            value => Err(CodecError::InvalidOptionDiscriminant { field: "", value }),
        }
    }

    fn span_at(buf: &[u8], offset: usize) -> Result<usize, CodecError> {
        ensure_len(buf, offset, 1)?;
        match buf[offset] {
            0 => Ok(1),
            1 => Ok(1 + T::span_at(buf, offset + 1)?),
            value => Err(CodecError::InvalidOptionDiscriminant { field: "", value }),
        }
    }

    fn value_span(&self) -> usize {
        1 + self.as_ref().map_or(0, Codec::value_span)
    }
}

/// A value that may be scheduled to take effect at an upcoming epoch.
///
/// On the wire this is a three-state tag: `0` = no value, `1` = value set
/// and already active, `2` = value set and activating at a future epoch.
/// Both set states decode to [`FutureEpoch::Some`]; which epoch the change
/// lands in is the on-chain program's concern, not the reader's.
///
/// Caveat: the encoder always writes tag `2`. A record read with tag `1`
/// decodes fine but re-encodes as `2`; producing the already-active tag is
/// not supported by this codec.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FutureEpoch<T> {
    /// No change scheduled.
    #[default]
    None,
    /// A value is set.
    Some(T),
}

impl<T> FutureEpoch<T> {
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    pub fn is_some(&self) -> bool {
        matches!(self, Self::Some(_))
    }

    /// Borrows the scheduled value as a plain `Option`.
    pub fn as_option(&self) -> Option<&T> {
        match self {
            Self::None => None,
            Self::Some(value) => Some(value),
        }
    }
}

impl<T> From<Option<T>> for FutureEpoch<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            None => Self::None,
            Some(value) => Self::Some(value),
        }
    }
}

impl<T: Codec> Codec for FutureEpoch<T> {
    const SPAN: Option<usize> = None;

    fn encode(&self, buf: &mut [u8], offset: usize) -> Result<usize, CodecError> {
        ensure_len(buf, offset, 1)?;
        match self {
            Self::None => {
                buf[offset] = 0;
                Ok(1)
            }
            Self::Some(value) => {
                buf[offset] = 2;
                Ok(1 + value.encode(buf, offset + 1)?)
            }
        }
    }

    fn decode_at(buf: &[u8], offset: usize) -> Result<(Self, usize), CodecError> {
        ensure_len(buf, offset, 1)?;
        match buf[offset] {
            0 => Ok((Self::None, 1)),
            1 | 2 => {
                let (value, consumed) = T::decode_at(buf, offset + 1)?;
                Ok((Self::Some(value), 1 + consumed))
            }
            value => Err(CodecError::InvalidFutureEpochDiscriminant { field: "", value }),
        }
    }

    fn span_at(buf: &[u8], offset: usize) -> Result<usize, CodecError> {
        ensure_len(buf, offset, 1)?;
        match buf[offset] {
            0 => Ok(1),
            1 | 2 => Ok(1 + T::span_at(buf, offset + 1)?),
            value => Err(CodecError::InvalidFutureEpochDiscriminant { field: "", value }),
        }
    }

    fn value_span(&self) -> usize {
        1 + self.as_option().map_or(0, Codec::value_span)
    }
}

/// Sequential field reader over an account or instruction buffer.
///
/// Advances by each field's actual consumed span, so variable-width fields
/// (options, vectors, strings) position the following fields correctly.
pub struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self::with_offset(buf, 0)
    }

    pub fn with_offset(buf: &'a [u8], offset: usize) -> Self {
        Self { buf, pos: offset }
    }

    /// Decodes the next field, attaching `name` to any tag-domain error.
    pub fn read<T: Codec>(&mut self, name: &'static str) -> Result<T, CodecError> {
        let (value, consumed) =
            T::decode_at(self.buf, self.pos).map_err(|e| e.named(name))?;
        self.pos += consumed;
        Ok(value)
    }

    /// Steps over the next field without materializing it.
    pub fn skip<T: Codec>(&mut self, name: &'static str) -> Result<(), CodecError> {
        let consumed = T::span_at(self.buf, self.pos).map_err(|e| e.named(name))?;
        self.pos += consumed;
        Ok(())
    }

    pub fn position(&self) -> usize {
        self.pos
    }
}

/// Sequential field writer, the counterpart of [`Reader`].
pub struct Writer<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> Writer<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self::with_offset(buf, 0)
    }

    pub fn with_offset(buf: &'a mut [u8], offset: usize) -> Self {
        Self { buf, pos: offset }
    }

    pub fn write<T: Codec>(&mut self, name: &'static str, value: &T) -> Result<(), CodecError> {
        let written = value.encode(self.buf, self.pos).map_err(|e| e.named(name))?;
        self.pos += written;
        Ok(())
    }

    pub fn position(&self) -> usize {
        self.pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn bool_domain() {
        assert_eq!(bool::decode_at(&[0], 0), Ok((false, 1)));
        assert_eq!(bool::decode_at(&[1], 0), Ok((true, 1)));
        assert_eq!(
            bool::decode_at(&[2], 0),
            Err(CodecError::InvalidBoolean { field: "", value: 2 })
        );
        assert_eq!(
            bool::decode_at(&[0xFF], 0),
            Err(CodecError::InvalidBoolean {
                field: "",
                value: 0xFF
            })
        );
    }

    #[test]
    fn ints_are_little_endian() {
        let mut buf = [0u8; 8];
        0x0102_0304u32.encode(&mut buf, 2).unwrap();
        assert_eq!(buf, [0, 0, 4, 3, 2, 1, 0, 0]);
        assert_eq!(u32::decode_at(&buf, 2), Ok((0x0102_0304, 4)));
    }

    #[test]
    fn signed_minus_one_is_all_ones() {
        let bytes = (-1i64).to_bytes().unwrap();
        assert_eq!(bytes, vec![0xFF; 8]);
        assert_eq!(i64::decode_at(&bytes, 0), Ok((-1, 8)));
        assert_eq!(u64::decode_at(&bytes, 0), Ok((u64::MAX, 8)));
    }

    #[test]
    fn wide_uint_rejects_overflow() {
        let mut buf = [0u8; 8];
        assert_eq!(
            write_uint_le(&mut buf, 0, 1 << 16, 2),
            Err(CodecError::NumericOverflow { field: "", width: 2 })
        );
        assert_eq!(write_uint_le(&mut buf, 0, u16::MAX as u128, 2), Ok(2));
        assert_eq!(read_uint_le(&buf, 0, 2), Ok(u16::MAX as u128));
    }

    #[test]
    fn wide_int_sign_extends() {
        let mut buf = [0u8; 4];
        write_int_le(&mut buf, 0, -2, 4).unwrap();
        assert_eq!(buf, [0xFE, 0xFF, 0xFF, 0xFF]);
        assert_eq!(read_int_le(&buf, 0, 4), Ok(-2));
        assert_eq!(read_uint_le(&buf, 0, 4), Ok(u32::MAX as u128 - 1));

        assert_eq!(
            write_int_le(&mut buf, 0, i128::from(i32::MAX) + 1, 4),
            Err(CodecError::NumericOverflow { field: "", width: 4 })
        );
        assert_eq!(
            write_int_le(&mut buf, 0, i128::from(i32::MIN) - 1, 4),
            Err(CodecError::NumericOverflow { field: "", width: 4 })
        );
    }

    #[test]
    fn u128_codec_carries_past_native_width() {
        let value = u128::from(u64::MAX) + 17;
        let bytes = value.to_bytes().unwrap();
        assert_eq!(bytes.len(), 16);
        assert_eq!(u128::decode_at(&bytes, 0), Ok((value, 16)));
    }

    #[test]
    fn blob_rejects_wrong_source_length() {
        let mut buf = [0u8; 32];
        assert_eq!(
            write_blob(&mut buf, 0, &[1, 2, 3], 32),
            Err(CodecError::SizeMismatch {
                field: "",
                expected: 32,
                actual: 3
            })
        );
    }

    #[test]
    fn short_buffer_reports_offsets() {
        assert_eq!(
            u64::decode_at(&[0u8; 4], 0),
            Err(CodecError::BufferTooShort {
                offset: 0,
                needed: 8,
                available: 4
            })
        );
        let mut buf = [0u8; 4];
        assert_eq!(
            0u64.encode(&mut buf, 2),
            Err(CodecError::BufferTooShort {
                offset: 2,
                needed: 8,
                available: 2
            })
        );
    }

    #[test]
    fn option_round_trip_and_domain() {
        let none: Option<u64> = None;
        let bytes = none.to_bytes().unwrap();
        assert_eq!(bytes, vec![0]);
        assert_eq!(Option::<u64>::decode_at(&bytes, 0), Ok((None, 1)));

        let some = Some(0xABu64);
        let bytes = some.to_bytes().unwrap();
        assert_eq!(bytes[0], 1);
        assert_eq!(Option::<u64>::decode_at(&bytes, 0), Ok((some, 9)));

        let mut bad = bytes;
        bad[0] = 2;
        assert_eq!(
            Option::<u64>::decode_at(&bad, 0),
            Err(CodecError::InvalidOptionDiscriminant { field: "", value: 2 })
        );
    }

    #[test]
    fn future_epoch_reads_both_set_tags_and_writes_two() {
        let mut active = vec![1u8];
        active.extend_from_slice(&5u64.to_le_bytes());
        let mut scheduled = vec![2u8];
        scheduled.extend_from_slice(&5u64.to_le_bytes());

        let (from_active, _) = FutureEpoch::<u64>::decode_at(&active, 0).unwrap();
        let (from_scheduled, _) = FutureEpoch::<u64>::decode_at(&scheduled, 0).unwrap();
        assert_eq!(from_active, FutureEpoch::Some(5));
        assert_eq!(from_active, from_scheduled);

        // Re-encoding the tag-1 reading yields tag 2.
        assert_eq!(from_active.to_bytes().unwrap(), scheduled);

        assert_eq!(
            FutureEpoch::<u64>::decode_at(&[3], 0),
            Err(CodecError::InvalidFutureEpochDiscriminant { field: "", value: 3 })
        );
        assert_eq!(FutureEpoch::<u64>::None.to_bytes().unwrap(), vec![0]);
    }

    #[test]
    fn vector_empty_and_ordered() {
        let empty: Vec<u16> = vec![];
        let bytes = empty.to_bytes().unwrap();
        assert_eq!(bytes, vec![0, 0, 0, 0]);
        assert_eq!(Vec::<u16>::decode_at(&bytes, 0), Ok((vec![], 4)));

        let items = vec![10u16, 20, 30];
        let bytes = items.to_bytes().unwrap();
        assert_eq!(bytes.len(), 4 + 3 * 2);
        let (decoded, consumed) = Vec::<u16>::decode_at(&bytes, 0).unwrap();
        assert_eq!(decoded, items);
        assert_eq!(consumed, bytes.len());
        assert_eq!(Vec::<u16>::span_at(&bytes, 0), Ok(4 + 3 * 2));
    }

    #[test]
    fn vector_span_scans_variable_elements() {
        let items = vec![Some(1u8), None, Some(3u8)];
        let bytes = items.to_bytes().unwrap();
        assert_eq!(bytes.len(), 4 + 2 + 1 + 2);
        assert_eq!(Vec::<Option<u8>>::span_at(&bytes, 0), Ok(bytes.len()));
    }

    #[test]
    fn vector_count_larger_than_buffer_fails() {
        let mut bytes = vec![0xFF, 0xFF, 0xFF, 0xFF];
        bytes.extend_from_slice(&[0; 8]);
        assert!(matches!(
            Vec::<u64>::decode_at(&bytes, 0),
            Err(CodecError::BufferTooShort { .. })
        ));
        assert!(matches!(
            Vec::<u64>::span_at(&bytes, 0),
            Err(CodecError::BufferTooShort { .. })
        ));
    }

    #[test]
    fn string_round_trip_and_utf8_domain() {
        let value = "stake pool".to_string();
        let bytes = value.to_bytes().unwrap();
        assert_eq!(&bytes[..4], &10u32.to_le_bytes());
        assert_eq!(String::decode_at(&bytes, 0), Ok((value, 14)));

        let bad = [1u8, 0, 0, 0, 0xC0];
        assert_eq!(
            String::decode_at(&bad, 0),
            Err(CodecError::InvalidUtf8 { field: "" })
        );
    }

    #[test]
    fn reader_names_nested_errors() {
        let mut r = Reader::new(&[9u8]);
        assert_eq!(
            r.read::<Option<u64>>("sol_deposit_authority"),
            Err(CodecError::InvalidOptionDiscriminant {
                field: "sol_deposit_authority",
                value: 9
            })
        );
    }

    #[test]
    fn reader_skip_advances_by_actual_span() {
        let mut bytes = vec![1u8];
        bytes.extend_from_slice(&7u64.to_le_bytes());
        bytes.push(0xAA);
        let mut r = Reader::new(&bytes);
        r.skip::<Option<u64>>("next_epoch_fee").unwrap();
        assert_eq!(r.position(), 9);
        assert_eq!(r.read::<u8>("tail"), Ok(0xAA));
    }

    proptest! {
        #[test]
        fn uint_round_trips_when_it_fits(value: u128, width in 1usize..=16) {
            let mut buf = [0u8; 16];
            let fits = width == 16 || value >> (8 * width as u32) == 0;
            match write_uint_le(&mut buf, 0, value, width) {
                Ok(written) => {
                    prop_assert!(fits);
                    prop_assert_eq!(written, width);
                    prop_assert_eq!(read_uint_le(&buf, 0, width).unwrap(), value);
                }
                Err(CodecError::NumericOverflow { .. }) => prop_assert!(!fits),
                Err(other) => prop_assert!(false, "unexpected error: {other}"),
            }
        }

        #[test]
        fn int_round_trips_when_it_fits(value: i128, width in 1usize..=16) {
            let mut buf = [0u8; 16];
            let fits = if width == 16 {
                true
            } else {
                let bits = 8 * width as u32;
                value >= -(1i128 << (bits - 1)) && value < (1i128 << (bits - 1))
            };
            match write_int_le(&mut buf, 0, value, width) {
                Ok(_) => {
                    prop_assert!(fits);
                    prop_assert_eq!(read_int_le(&buf, 0, width).unwrap(), value);
                }
                Err(CodecError::NumericOverflow { .. }) => prop_assert!(!fits),
                Err(other) => prop_assert!(false, "unexpected error: {other}"),
            }
        }
    }
}
