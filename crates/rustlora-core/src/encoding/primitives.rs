use crate::encoding::{
    reader::Reader,
    tag::{AppTag, Tag},
    writer::Writer,
};
use crate::{DecodeError, EncodeError};

pub fn u32_len(len: usize) -> Result<u32, EncodeError> {
    u32::try_from(len).map_err(|_| EncodeError::ValueOutOfRange)
}

/// Minimal big-endian representation of `value`, at least one byte long.
fn unsigned_bytes(value: u64) -> ([u8; 8], usize) {
    let significant_bits = 64 - value.leading_zeros() as usize;
    let len = significant_bits.div_ceil(8).max(1);
    (value.to_be_bytes(), len)
}

/// Minimal two's-complement representation of `value`, at least one byte long.
fn signed_bytes(value: i64) -> ([u8; 8], usize) {
    let len = (1..8)
        .find(|&n| {
            let half = 1i64 << (n * 8 - 1);
            (-half..half).contains(&value)
        })
        .unwrap_or(8);
    (value.to_be_bytes(), len)
}

pub fn encode_unsigned(w: &mut Writer, value: u64) -> usize {
    let (bytes, len) = unsigned_bytes(value);
    w.write_all(&bytes[8 - len..]);
    len
}

pub fn decode_unsigned(r: &mut Reader<'_>, len: usize) -> Result<u64, DecodeError> {
    if len == 0 || len > 8 {
        return Err(DecodeError::InvalidLength);
    }
    let mut value = 0u64;
    for _ in 0..len {
        value = (value << 8) | r.read_u8()? as u64;
    }
    Ok(value)
}

pub fn encode_signed(w: &mut Writer, value: i64) -> usize {
    let (bytes, len) = signed_bytes(value);
    w.write_all(&bytes[8 - len..]);
    len
}

pub fn decode_signed(r: &mut Reader<'_>, len: usize) -> Result<i64, DecodeError> {
    if len == 0 || len > 8 {
        return Err(DecodeError::InvalidLength);
    }

    let bytes = r.read_exact(len)?;
    let fill = if (bytes[0] & 0x80) != 0 { 0xFF } else { 0x00 };
    let mut out = [fill; 8];
    out[8 - len..].copy_from_slice(bytes);
    Ok(i64::from_be_bytes(out))
}

/// Decodes an unsigned value and narrows it to the field's width.
pub fn decode_unsigned_as<T: TryFrom<u64>>(r: &mut Reader<'_>, len: usize) -> Result<T, DecodeError> {
    T::try_from(decode_unsigned(r, len)?).map_err(|_| DecodeError::InvalidValue)
}

/// Decodes a signed value and narrows it to the field's width.
pub fn decode_signed_as<T: TryFrom<i64>>(r: &mut Reader<'_>, len: usize) -> Result<T, DecodeError> {
    T::try_from(decode_signed(r, len)?).map_err(|_| DecodeError::InvalidValue)
}

pub fn decode_boolean(r: &mut Reader<'_>, len: usize) -> Result<bool, DecodeError> {
    if len != 1 {
        return Err(DecodeError::InvalidLength);
    }
    match r.read_u8()? {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(DecodeError::InvalidValue),
    }
}

pub fn decode_double(r: &mut Reader<'_>, len: usize) -> Result<f64, DecodeError> {
    if len != 8 {
        return Err(DecodeError::InvalidLength);
    }
    Ok(f64::from_bits(u64::from_be_bytes(r.read_array::<8>()?)))
}

pub fn decode_octet_string<'a>(r: &mut Reader<'a>, len: usize) -> Result<&'a [u8], DecodeError> {
    r.read_exact(len)
}

pub fn decode_character_string<'a>(r: &mut Reader<'a>, len: usize) -> Result<&'a str, DecodeError> {
    let raw = r.read_exact(len)?;
    core::str::from_utf8(raw).map_err(|_| DecodeError::InvalidValue)
}

pub fn encode_ctx_unsigned(w: &mut Writer, tag_num: u8, value: u64) {
    let (bytes, len) = unsigned_bytes(value);
    Tag::Context {
        tag_num,
        len: len as u32,
    }
    .encode(w);
    w.write_all(&bytes[8 - len..]);
}

pub fn encode_ctx_signed(w: &mut Writer, tag_num: u8, value: i64) {
    let (bytes, len) = signed_bytes(value);
    Tag::Context {
        tag_num,
        len: len as u32,
    }
    .encode(w);
    w.write_all(&bytes[8 - len..]);
}

pub fn encode_ctx_boolean(w: &mut Writer, tag_num: u8, value: bool) {
    Tag::Context { tag_num, len: 1 }.encode(w);
    w.write_u8(value as u8);
}

pub fn encode_ctx_double(w: &mut Writer, tag_num: u8, value: f64) {
    Tag::Context { tag_num, len: 8 }.encode(w);
    w.write_all(&value.to_bits().to_be_bytes());
}

pub fn encode_ctx_octet_string(
    w: &mut Writer,
    tag_num: u8,
    value: &[u8],
) -> Result<(), EncodeError> {
    Tag::Context {
        tag_num,
        len: u32_len(value.len())?,
    }
    .encode(w);
    w.write_all(value);
    Ok(())
}

pub fn encode_ctx_character_string(
    w: &mut Writer,
    tag_num: u8,
    value: &str,
) -> Result<(), EncodeError> {
    encode_ctx_octet_string(w, tag_num, value.as_bytes())
}

pub fn encode_app_octet_string(w: &mut Writer, value: &[u8]) -> Result<(), EncodeError> {
    Tag::Application {
        tag: AppTag::OctetString,
        len: u32_len(value.len())?,
    }
    .encode(w);
    w.write_all(value);
    Ok(())
}

pub fn encode_app_character_string(w: &mut Writer, value: &str) -> Result<(), EncodeError> {
    Tag::Application {
        tag: AppTag::CharacterString,
        len: u32_len(value.len())?,
    }
    .encode(w);
    w.write_all(value.as_bytes());
    Ok(())
}

pub fn decode_app_octet_string<'a>(r: &mut Reader<'a>) -> Result<&'a [u8], DecodeError> {
    match Tag::decode(r)? {
        Tag::Application {
            tag: AppTag::OctetString,
            len,
        } => decode_octet_string(r, len as usize),
        _ => Err(DecodeError::InvalidTag),
    }
}

pub fn decode_app_character_string<'a>(r: &mut Reader<'a>) -> Result<&'a str, DecodeError> {
    match Tag::decode(r)? {
        Tag::Application {
            tag: AppTag::CharacterString,
            len,
        } => decode_character_string(r, len as usize),
        _ => Err(DecodeError::InvalidTag),
    }
}

pub fn encode_opening_tag(w: &mut Writer, tag_num: u8) {
    Tag::Opening { tag_num }.encode(w);
}

pub fn encode_closing_tag(w: &mut Writer, tag_num: u8) {
    Tag::Closing { tag_num }.encode(w);
}

/// Consumes the value that follows `tag` without interpreting it. Constructed
/// values are skipped up to their balancing closing tag.
pub fn skip_value(r: &mut Reader<'_>, tag: Tag) -> Result<(), DecodeError> {
    match tag {
        Tag::Application { len, .. } | Tag::Context { len, .. } => {
            r.read_exact(len as usize)?;
            Ok(())
        }
        Tag::Opening { .. } => {
            let mut depth = 1usize;
            while depth > 0 {
                match Tag::decode(r)? {
                    Tag::Opening { .. } => depth += 1,
                    Tag::Closing { .. } => depth -= 1,
                    Tag::Application { len, .. } | Tag::Context { len, .. } => {
                        r.read_exact(len as usize)?;
                    }
                }
            }
            Ok(())
        }
        Tag::Closing { .. } => Err(DecodeError::InvalidTag),
    }
}
