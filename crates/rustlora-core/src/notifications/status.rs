use serde::{Deserialize, Serialize};

use super::{decode_fields, required, set_once, DeviceFields, DeviceFieldsDecoder};
use crate::encoding::{
    primitives::{decode_signed_as, encode_ctx_signed},
    reader::Reader,
    tag::Tag,
    writer::Writer,
};
use crate::types::{ApplicationId, Eui64};
use crate::{DecodeError, EncodeError};

/// Device battery and link margin as reported in a DevStatusAns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusNotification {
    #[serde(rename = "applicationID")]
    pub application_id: ApplicationId,
    pub application_name: String,
    pub device_name: String,
    #[serde(rename = "devEUI")]
    pub dev_eui: Eui64,
    pub battery: i32,
    pub margin: i32,
}

impl StatusNotification {
    pub fn encode(&self, w: &mut Writer) -> Result<(), EncodeError> {
        DeviceFields {
            application_id: self.application_id,
            application_name: &self.application_name,
            device_name: &self.device_name,
            dev_eui: self.dev_eui,
        }
        .encode(w)?;
        encode_ctx_signed(w, 4, self.battery as i64);
        encode_ctx_signed(w, 5, self.margin as i64);
        Ok(())
    }

    pub fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let mut device = DeviceFieldsDecoder::default();
        let mut battery = None;
        let mut margin = None;
        decode_fields(r, None, |tag, r| {
            if device.accept(tag, r)? {
                return Ok(true);
            }
            match tag {
                Tag::Context { tag_num: 4, len } => {
                    set_once(&mut battery, decode_signed_as::<i32>(r, len as usize)?, 4)?
                }
                Tag::Context { tag_num: 5, len } => {
                    set_once(&mut margin, decode_signed_as::<i32>(r, len as usize)?, 5)?
                }
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        let device = device.finish()?;

        Ok(Self {
            application_id: device.application_id,
            application_name: device.application_name,
            device_name: device.device_name,
            dev_eui: device.dev_eui,
            battery: required(battery, "battery")?,
            margin: required(margin, "margin")?,
        })
    }
}
