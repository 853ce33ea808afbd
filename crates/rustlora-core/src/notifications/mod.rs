//! Notification records and their durable field codecs.
//!
//! Every record encodes as a flat run of context-tagged fields. Tags 0 to 3
//! are shared by all device notifications (application ID, application name,
//! device name, device EUI); the remaining tag numbers are per record.

pub mod ack;
pub mod data_down;
pub mod data_up;
pub mod error;
pub mod join;
pub mod status;

pub use ack::AckNotification;
pub use data_down::DataDownPayload;
pub use data_up::{DataUpPayload, Location, RxInfo, TxInfo};
pub use error::ErrorNotification;
pub use join::JoinNotification;
pub use status::StatusNotification;

use crate::encoding::{
    primitives::{
        decode_character_string, decode_unsigned, encode_ctx_character_string,
        encode_ctx_octet_string, encode_ctx_unsigned, skip_value,
    },
    reader::Reader,
    tag::Tag,
    writer::Writer,
};
use crate::types::{ApplicationId, DevAddr, Eui64};
use crate::{DecodeError, EncodeError};

/// Walks the fields of one record, handing each tag to `on_field`.
///
/// With `enclosing` set the walk stops at the matching closing tag, otherwise
/// it runs to the end of the input. Fields the callback does not claim (it
/// returns `Ok(false)`) are skipped so that newer producers can add fields.
pub(crate) fn decode_fields<'a, F>(
    r: &mut Reader<'a>,
    enclosing: Option<u8>,
    mut on_field: F,
) -> Result<(), DecodeError>
where
    F: FnMut(Tag, &mut Reader<'a>) -> Result<bool, DecodeError>,
{
    loop {
        if enclosing.is_none() && r.is_empty() {
            return Ok(());
        }
        let tag = Tag::decode(r)?;
        if let Tag::Closing { tag_num } = tag {
            return if Some(tag_num) == enclosing {
                Ok(())
            } else {
                Err(DecodeError::InvalidTag)
            };
        }
        if !on_field(tag, r)? {
            log::trace!("skipping unknown field {tag:?}");
            skip_value(r, tag)?;
        }
    }
}

/// Stores a decoded field, rejecting a second occurrence of the same tag.
pub(crate) fn set_once<T>(slot: &mut Option<T>, value: T, tag_num: u8) -> Result<(), DecodeError> {
    if slot.is_some() {
        return Err(DecodeError::DuplicateField(tag_num));
    }
    *slot = Some(value);
    Ok(())
}

pub(crate) fn required<T>(slot: Option<T>, name: &'static str) -> Result<T, DecodeError> {
    slot.ok_or(DecodeError::MissingField(name))
}

pub(crate) fn decode_eui(r: &mut Reader<'_>, len: usize) -> Result<Eui64, DecodeError> {
    if len != Eui64::LEN {
        return Err(DecodeError::InvalidLength);
    }
    Ok(Eui64::new(r.read_array()?))
}

pub(crate) fn decode_dev_addr(r: &mut Reader<'_>, len: usize) -> Result<DevAddr, DecodeError> {
    if len != DevAddr::LEN {
        return Err(DecodeError::InvalidLength);
    }
    Ok(DevAddr::new(r.read_array()?))
}

pub(crate) fn decode_string(r: &mut Reader<'_>, len: usize) -> Result<String, DecodeError> {
    decode_character_string(r, len).map(str::to_owned)
}

/// Fields every device notification starts with.
pub(crate) struct DeviceFields<'a> {
    pub application_id: ApplicationId,
    pub application_name: &'a str,
    pub device_name: &'a str,
    pub dev_eui: Eui64,
}

impl DeviceFields<'_> {
    pub(crate) fn encode(&self, w: &mut Writer) -> Result<(), EncodeError> {
        encode_ctx_unsigned(w, 0, self.application_id.get());
        encode_ctx_character_string(w, 1, self.application_name)?;
        encode_ctx_character_string(w, 2, self.device_name)?;
        encode_ctx_octet_string(w, 3, self.dev_eui.as_bytes())
    }
}

/// Collects the shared device fields while a record is being walked.
#[derive(Default)]
pub(crate) struct DeviceFieldsDecoder {
    application_id: Option<ApplicationId>,
    application_name: Option<String>,
    device_name: Option<String>,
    dev_eui: Option<Eui64>,
}

pub(crate) struct DecodedDeviceFields {
    pub application_id: ApplicationId,
    pub application_name: String,
    pub device_name: String,
    pub dev_eui: Eui64,
}

impl DeviceFieldsDecoder {
    /// Claims `tag` if it is one of the shared fields.
    pub(crate) fn accept(&mut self, tag: Tag, r: &mut Reader<'_>) -> Result<bool, DecodeError> {
        let Tag::Context { tag_num, len } = tag else {
            return Ok(false);
        };
        let len = len as usize;
        match tag_num {
            0 => set_once(
                &mut self.application_id,
                ApplicationId::new(decode_unsigned(r, len)?),
                tag_num,
            )?,
            1 => set_once(&mut self.application_name, decode_string(r, len)?, tag_num)?,
            2 => set_once(&mut self.device_name, decode_string(r, len)?, tag_num)?,
            3 => set_once(&mut self.dev_eui, decode_eui(r, len)?, tag_num)?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    pub(crate) fn finish(self) -> Result<DecodedDeviceFields, DecodeError> {
        Ok(DecodedDeviceFields {
            application_id: required(self.application_id, "applicationID")?,
            application_name: required(self.application_name, "applicationName")?,
            device_name: required(self.device_name, "deviceName")?,
            dev_eui: required(self.dev_eui, "devEUI")?,
        })
    }
}
