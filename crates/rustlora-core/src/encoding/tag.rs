use crate::encoding::{reader::Reader, writer::Writer};
use crate::DecodeError;

/// Application tag numbers. Only the envelope header uses application tags;
/// notification fields are always context tagged.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppTag {
    Null = 0,
    Boolean = 1,
    Unsigned = 2,
    Signed = 3,
    Double = 5,
    OctetString = 6,
    CharacterString = 7,
}

impl AppTag {
    pub fn from_u8(value: u8) -> Result<Self, DecodeError> {
        match value {
            0 => Ok(Self::Null),
            1 => Ok(Self::Boolean),
            2 => Ok(Self::Unsigned),
            3 => Ok(Self::Signed),
            5 => Ok(Self::Double),
            6 => Ok(Self::OctetString),
            7 => Ok(Self::CharacterString),
            _ => Err(DecodeError::InvalidTag),
        }
    }
}

/// One tag header.
///
/// Layout of the first byte: tag number in the high nibble (`0xF` means the
/// number follows in the next byte), class in bit 3 (set for context tags),
/// length code in the low three bits. Length codes 0..=4 are literal, 5 means
/// an extended length follows, 6 and 7 mark opening and closing tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Application { tag: AppTag, len: u32 },
    Context { tag_num: u8, len: u32 },
    Opening { tag_num: u8 },
    Closing { tag_num: u8 },
}

impl Tag {
    pub fn encode(self, w: &mut Writer) {
        match self {
            Tag::Application { tag, len } => encode_with_meta(w, tag as u8, false, len),
            Tag::Context { tag_num, len } => encode_with_meta(w, tag_num, true, len),
            Tag::Opening { tag_num } => encode_open_close(w, tag_num, true),
            Tag::Closing { tag_num } => encode_open_close(w, tag_num, false),
        }
    }

    pub fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let first = r.read_u8()?;
        let class_context = (first & 0b0000_1000) != 0;

        let mut tag_num = (first >> 4) & 0x0f;
        if tag_num == 0x0f {
            tag_num = r.read_u8()?;
        }

        let len_val = first & 0x07;

        if class_context && len_val == 6 {
            return Ok(Tag::Opening { tag_num });
        }
        if class_context && len_val == 7 {
            return Ok(Tag::Closing { tag_num });
        }

        let len = decode_len(r, len_val)?;
        if class_context {
            Ok(Tag::Context { tag_num, len })
        } else {
            Ok(Tag::Application {
                tag: AppTag::from_u8(tag_num)?,
                len,
            })
        }
    }
}

fn first_byte(tag_num: u8, is_context: bool, len_code: u8) -> u8 {
    let mut first = if tag_num <= 14 { tag_num << 4 } else { 0xF0 };
    if is_context {
        first |= 0b0000_1000;
    }
    first | len_code
}

fn encode_with_meta(w: &mut Writer, tag_num: u8, is_context: bool, len: u32) {
    let len_code = if len <= 4 { len as u8 } else { 5 };
    w.write_u8(first_byte(tag_num, is_context, len_code));

    if tag_num > 14 {
        w.write_u8(tag_num);
    }

    if len_code == 5 {
        if len <= 253 {
            w.write_u8(len as u8);
        } else if len <= 65535 {
            w.write_u8(254);
            w.write_be_u16(len as u16);
        } else {
            w.write_u8(255);
            w.write_be_u32(len);
        }
    }
}

fn encode_open_close(w: &mut Writer, tag_num: u8, opening: bool) {
    w.write_u8(first_byte(tag_num, true, if opening { 6 } else { 7 }));
    if tag_num > 14 {
        w.write_u8(tag_num);
    }
}

fn decode_len(r: &mut Reader<'_>, len_code: u8) -> Result<u32, DecodeError> {
    match len_code {
        0..=4 => Ok(len_code as u32),
        5 => {
            let v = r.read_u8()?;
            if v <= 253 {
                Ok(v as u32)
            } else if v == 254 {
                Ok(r.read_be_u16()? as u32)
            } else {
                r.read_be_u32()
            }
        }
        _ => Err(DecodeError::InvalidLength),
    }
}

#[cfg(test)]
mod tests {
    use super::{AppTag, Tag};
    use crate::encoding::{reader::Reader, writer::Writer};
    use crate::DecodeError;

    fn roundtrip(tag: Tag) -> Tag {
        let mut w = Writer::new();
        tag.encode(&mut w);
        let mut r = Reader::new(w.as_written());
        let got = Tag::decode(&mut r).unwrap();
        assert!(r.is_empty());
        got
    }

    #[test]
    fn roundtrip_application_tag() {
        let tag = Tag::Application {
            tag: AppTag::CharacterString,
            len: 16,
        };
        assert_eq!(roundtrip(tag), tag);
    }

    #[test]
    fn roundtrip_extended() {
        let tag = Tag::Context {
            tag_num: 30,
            len: 300,
        };
        assert_eq!(roundtrip(tag), tag);
        let tag = Tag::Context {
            tag_num: 3,
            len: 70_000,
        };
        assert_eq!(roundtrip(tag), tag);
    }

    #[test]
    fn roundtrip_open_close() {
        assert_eq!(
            roundtrip(Tag::Opening { tag_num: 4 }),
            Tag::Opening { tag_num: 4 }
        );
        assert_eq!(
            roundtrip(Tag::Closing { tag_num: 20 }),
            Tag::Closing { tag_num: 20 }
        );
    }

    #[test]
    fn header_byte_layout() {
        let mut w = Writer::new();
        Tag::Context { tag_num: 3, len: 8 }.encode(&mut w);
        Tag::Opening { tag_num: 5 }.encode(&mut w);
        assert_eq!(w.as_written(), &[0x3D, 0x08, 0x5E]);
    }

    #[test]
    fn application_open_close_codes_are_invalid() {
        let mut r = Reader::new(&[0x26]);
        assert_eq!(Tag::decode(&mut r).unwrap_err(), DecodeError::InvalidLength);
    }

    #[test]
    fn unknown_application_tag_is_invalid() {
        let mut r = Reader::new(&[0x41]);
        assert_eq!(Tag::decode(&mut r).unwrap_err(), DecodeError::InvalidTag);
    }
}
