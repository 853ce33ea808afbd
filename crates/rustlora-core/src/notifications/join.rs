use serde::{Deserialize, Serialize};

use super::{decode_dev_addr, decode_fields, required, set_once, DeviceFields, DeviceFieldsDecoder};
use crate::encoding::{primitives::encode_ctx_octet_string, reader::Reader, tag::Tag, writer::Writer};
use crate::types::{ApplicationId, DevAddr, Eui64};
use crate::{DecodeError, EncodeError};

/// Sent once a device has completed an over-the-air join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinNotification {
    #[serde(rename = "applicationID")]
    pub application_id: ApplicationId,
    pub application_name: String,
    pub device_name: String,
    #[serde(rename = "devEUI")]
    pub dev_eui: Eui64,
    pub dev_addr: DevAddr,
}

impl JoinNotification {
    pub fn encode(&self, w: &mut Writer) -> Result<(), EncodeError> {
        DeviceFields {
            application_id: self.application_id,
            application_name: &self.application_name,
            device_name: &self.device_name,
            dev_eui: self.dev_eui,
        }
        .encode(w)?;
        encode_ctx_octet_string(w, 4, self.dev_addr.as_bytes())
    }

    pub fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let mut device = DeviceFieldsDecoder::default();
        let mut dev_addr = None;
        decode_fields(r, None, |tag, r| {
            if device.accept(tag, r)? {
                return Ok(true);
            }
            match tag {
                Tag::Context { tag_num: 4, len } => {
                    set_once(&mut dev_addr, decode_dev_addr(r, len as usize)?, 4)?
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
            dev_addr: required(dev_addr, "devAddr")?,
        })
    }
}
