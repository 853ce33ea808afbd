use serde::{Deserialize, Serialize};

use super::{
    decode_fields, decode_string, required, set_once, DeviceFields, DeviceFieldsDecoder,
};
use crate::encoding::{
    primitives::{decode_unsigned_as, encode_ctx_character_string, encode_ctx_unsigned},
    reader::Reader,
    tag::Tag,
    writer::Writer,
};
use crate::types::{ApplicationId, Eui64};
use crate::{DecodeError, EncodeError};

/// Reports a failure concerning one device, for example a downlink that could
/// not be scheduled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorNotification {
    #[serde(rename = "applicationID")]
    pub application_id: ApplicationId,
    pub application_name: String,
    pub device_name: String,
    #[serde(rename = "devEUI")]
    pub dev_eui: Eui64,
    #[serde(rename = "type")]
    pub error_type: String,
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub f_cnt: Option<u32>,
}

impl ErrorNotification {
    pub fn encode(&self, w: &mut Writer) -> Result<(), EncodeError> {
        DeviceFields {
            application_id: self.application_id,
            application_name: &self.application_name,
            device_name: &self.device_name,
            dev_eui: self.dev_eui,
        }
        .encode(w)?;
        encode_ctx_character_string(w, 4, &self.error_type)?;
        encode_ctx_character_string(w, 5, &self.error)?;
        if let Some(f_cnt) = self.f_cnt {
            encode_ctx_unsigned(w, 6, f_cnt as u64);
        }
        Ok(())
    }

    pub fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let mut device = DeviceFieldsDecoder::default();
        let mut error_type = None;
        let mut error = None;
        let mut f_cnt = None;
        decode_fields(r, None, |tag, r| {
            if device.accept(tag, r)? {
                return Ok(true);
            }
            let Tag::Context { tag_num, len } = tag else {
                return Ok(false);
            };
            let len = len as usize;
            match tag_num {
                4 => set_once(&mut error_type, decode_string(r, len)?, tag_num)?,
                5 => set_once(&mut error, decode_string(r, len)?, tag_num)?,
                6 => set_once(&mut f_cnt, decode_unsigned_as::<u32>(r, len)?, tag_num)?,
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
            error_type: required(error_type, "type")?,
            error: required(error, "error")?,
            f_cnt,
        })
    }
}
