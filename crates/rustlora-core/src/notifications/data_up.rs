use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    decode_eui, decode_fields, decode_string, required, set_once, DeviceFields,
    DeviceFieldsDecoder,
};
use crate::encoding::{
    primitives::{
        decode_boolean, decode_double, decode_octet_string, decode_signed, decode_signed_as,
        decode_unsigned_as, encode_closing_tag, encode_ctx_boolean, encode_ctx_character_string,
        encode_ctx_double, encode_ctx_octet_string, encode_ctx_signed, encode_ctx_unsigned,
        encode_opening_tag,
    },
    reader::Reader,
    tag::Tag,
    writer::Writer,
};
use crate::types::{ApplicationId, Eui64, Object};
use crate::{DecodeError, EncodeError};

/// Gateway position.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
}

impl Location {
    fn encode_block(&self, w: &mut Writer, tag_num: u8) {
        encode_opening_tag(w, tag_num);
        encode_ctx_double(w, 0, self.latitude);
        encode_ctx_double(w, 1, self.longitude);
        encode_ctx_double(w, 2, self.altitude);
        encode_closing_tag(w, tag_num);
    }

    fn decode_block(r: &mut Reader<'_>, tag_num: u8) -> Result<Self, DecodeError> {
        let mut coords = [None; 3];
        decode_fields(r, Some(tag_num), |tag, r| match tag {
            Tag::Context { tag_num, len } if tag_num <= 2 => {
                set_once(
                    &mut coords[tag_num as usize],
                    decode_double(r, len as usize)?,
                    tag_num,
                )?;
                Ok(true)
            }
            _ => Ok(false),
        })?;
        let [latitude, longitude, altitude] = coords;
        Ok(Self {
            latitude: required(latitude, "latitude")?,
            longitude: required(longitude, "longitude")?,
            altitude: required(altitude, "altitude")?,
        })
    }
}

/// One gateway's reception of an uplink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RxInfo {
    #[serde(rename = "gatewayID")]
    pub gateway_id: Eui64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<Utc>>,
    pub rssi: i32,
    #[serde(rename = "loRaSNR")]
    pub lora_snr: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl RxInfo {
    fn encode_block(&self, w: &mut Writer, tag_num: u8) -> Result<(), EncodeError> {
        encode_opening_tag(w, tag_num);
        encode_ctx_octet_string(w, 0, self.gateway_id.as_bytes())?;
        encode_ctx_character_string(w, 1, &self.name)?;
        if let Some(time) = self.time {
            encode_opening_tag(w, 2);
            encode_ctx_signed(w, 0, time.timestamp());
            encode_ctx_unsigned(w, 1, time.timestamp_subsec_nanos() as u64);
            encode_closing_tag(w, 2);
        }
        encode_ctx_signed(w, 3, self.rssi as i64);
        encode_ctx_double(w, 4, self.lora_snr);
        if let Some(location) = &self.location {
            location.encode_block(w, 5);
        }
        encode_closing_tag(w, tag_num);
        Ok(())
    }

    fn decode_block(r: &mut Reader<'_>, tag_num: u8) -> Result<Self, DecodeError> {
        let mut gateway_id = None;
        let mut name = None;
        let mut time = None;
        let mut rssi = None;
        let mut lora_snr = None;
        let mut location = None;
        decode_fields(r, Some(tag_num), |tag, r| {
            match tag {
                Tag::Context { tag_num: 0, len } => {
                    set_once(&mut gateway_id, decode_eui(r, len as usize)?, 0)?
                }
                Tag::Context { tag_num: 1, len } => {
                    set_once(&mut name, decode_string(r, len as usize)?, 1)?
                }
                Tag::Opening { tag_num: 2 } => set_once(&mut time, decode_time_block(r, 2)?, 2)?,
                Tag::Context { tag_num: 3, len } => {
                    set_once(&mut rssi, decode_signed_as::<i32>(r, len as usize)?, 3)?
                }
                Tag::Context { tag_num: 4, len } => {
                    set_once(&mut lora_snr, decode_double(r, len as usize)?, 4)?
                }
                Tag::Opening { tag_num: 5 } => {
                    set_once(&mut location, Location::decode_block(r, 5)?, 5)?
                }
                _ => return Ok(false),
            }
            Ok(true)
        })?;

        Ok(Self {
            gateway_id: required(gateway_id, "gatewayID")?,
            name: required(name, "name")?,
            time,
            rssi: required(rssi, "rssi")?,
            lora_snr: required(lora_snr, "loRaSNR")?,
            location,
        })
    }
}

fn decode_time_block(r: &mut Reader<'_>, tag_num: u8) -> Result<DateTime<Utc>, DecodeError> {
    let mut secs = None;
    let mut nanos = None;
    decode_fields(r, Some(tag_num), |tag, r| {
        match tag {
            Tag::Context { tag_num: 0, len } => set_once(&mut secs, decode_signed(r, len as usize)?, 0)?,
            Tag::Context { tag_num: 1, len } => {
                set_once(&mut nanos, decode_unsigned_as::<u32>(r, len as usize)?, 1)?
            }
            _ => return Ok(false),
        }
        Ok(true)
    })?;
    DateTime::from_timestamp(required(secs, "time.seconds")?, required(nanos, "time.nanos")?)
        .ok_or(DecodeError::InvalidValue)
}

/// Transmission parameters the device used for an uplink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TxInfo {
    pub frequency: u32,
    pub dr: u8,
}

impl TxInfo {
    fn encode_block(&self, w: &mut Writer, tag_num: u8) {
        encode_opening_tag(w, tag_num);
        encode_ctx_unsigned(w, 0, self.frequency as u64);
        encode_ctx_unsigned(w, 1, self.dr as u64);
        encode_closing_tag(w, tag_num);
    }

    fn decode_block(r: &mut Reader<'_>, tag_num: u8) -> Result<Self, DecodeError> {
        let mut frequency = None;
        let mut dr = None;
        decode_fields(r, Some(tag_num), |tag, r| {
            match tag {
                Tag::Context { tag_num: 0, len } => {
                    set_once(&mut frequency, decode_unsigned_as::<u32>(r, len as usize)?, 0)?
                }
                Tag::Context { tag_num: 1, len } => {
                    set_once(&mut dr, decode_unsigned_as::<u8>(r, len as usize)?, 1)?
                }
                _ => return Ok(false),
            }
            Ok(true)
        })?;
        Ok(Self {
            frequency: required(frequency, "frequency")?,
            dr: required(dr, "dr")?,
        })
    }
}

/// An uplink frame as delivered to the application.
///
/// `rx_info` lists every gateway that reported the frame, in the order the
/// reports arrived. An empty list is left out of both encodings and a missing
/// list decodes as empty, so "no gateway reported" and "not populated" are
/// the same value.
///
/// `object` holds whatever the application's payload decoder produced. It is
/// `None` when no decoder is configured or decoding failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataUpPayload {
    #[serde(rename = "applicationID")]
    pub application_id: ApplicationId,
    pub application_name: String,
    pub device_name: String,
    #[serde(rename = "devEUI")]
    pub dev_eui: Eui64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rx_info: Vec<RxInfo>,
    pub tx_info: TxInfo,
    pub adr: bool,
    pub f_cnt: u32,
    pub f_port: u8,
    #[serde(with = "crate::types::base64_bytes")]
    pub data: Vec<u8>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::types::present_object::deserialize"
    )]
    pub object: Option<Object>,
}

impl DataUpPayload {
    pub fn encode(&self, w: &mut Writer) -> Result<(), EncodeError> {
        DeviceFields {
            application_id: self.application_id,
            application_name: &self.application_name,
            device_name: &self.device_name,
            dev_eui: self.dev_eui,
        }
        .encode(w)?;
        if !self.rx_info.is_empty() {
            encode_opening_tag(w, 4);
            for rx in &self.rx_info {
                rx.encode_block(w, 0)?;
            }
            encode_closing_tag(w, 4);
        }
        self.tx_info.encode_block(w, 5);
        encode_ctx_boolean(w, 6, self.adr);
        encode_ctx_unsigned(w, 7, self.f_cnt as u64);
        encode_ctx_unsigned(w, 8, self.f_port as u64);
        encode_ctx_octet_string(w, 9, &self.data)?;
        if let Some(object) = &self.object {
            encode_ctx_character_string(w, 10, object.as_json())?;
        }
        Ok(())
    }

    pub fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let mut device = DeviceFieldsDecoder::default();
        let mut rx_info = None;
        let mut tx_info = None;
        let mut adr = None;
        let mut f_cnt = None;
        let mut f_port = None;
        let mut data = None;
        let mut object = None;
        decode_fields(r, None, |tag, r| {
            if device.accept(tag, r)? {
                return Ok(true);
            }
            match tag {
                Tag::Opening { tag_num: 4 } => {
                    set_once(&mut rx_info, decode_rx_info_list(r, 4)?, 4)?
                }
                Tag::Opening { tag_num: 5 } => {
                    set_once(&mut tx_info, TxInfo::decode_block(r, 5)?, 5)?
                }
                Tag::Context { tag_num: 6, len } => {
                    set_once(&mut adr, decode_boolean(r, len as usize)?, 6)?
                }
                Tag::Context { tag_num: 7, len } => {
                    set_once(&mut f_cnt, decode_unsigned_as::<u32>(r, len as usize)?, 7)?
                }
                Tag::Context { tag_num: 8, len } => {
                    set_once(&mut f_port, decode_unsigned_as::<u8>(r, len as usize)?, 8)?
                }
                Tag::Context { tag_num: 9, len } => {
                    set_once(&mut data, decode_octet_string(r, len as usize)?.to_vec(), 9)?
                }
                Tag::Context { tag_num: 10, len } => {
                    set_once(&mut object, decode_object(r, len as usize)?, 10)?
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
            rx_info: rx_info.unwrap_or_default(),
            tx_info: required(tx_info, "txInfo")?,
            adr: required(adr, "adr")?,
            f_cnt: required(f_cnt, "fCnt")?,
            f_port: required(f_port, "fPort")?,
            data: required(data, "data")?,
            object,
        })
    }
}

fn decode_rx_info_list(r: &mut Reader<'_>, tag_num: u8) -> Result<Vec<RxInfo>, DecodeError> {
    let mut list = Vec::new();
    decode_fields(r, Some(tag_num), |tag, r| match tag {
        Tag::Opening { tag_num: 0 } => {
            list.push(RxInfo::decode_block(r, 0)?);
            Ok(true)
        }
        _ => Ok(false),
    })?;
    Ok(list)
}

/// The object blob is stored as the decoder's JSON text; it is only checked
/// to be a complete JSON value, never parsed into a structure.
fn decode_object(r: &mut Reader<'_>, len: usize) -> Result<Object, DecodeError> {
    let text = decode_string(r, len)?;
    Object::from_json(text).map_err(|_| DecodeError::InvalidValue)
}
