//! External JSON rendering for integrations.

use serde::{de::DeserializeOwned, Serialize};

use crate::notifications::{
    AckNotification, DataDownPayload, DataUpPayload, ErrorNotification, JoinNotification,
    StatusNotification,
};
use crate::JsonError;

/// A record that can cross the external JSON boundary.
pub trait ExternalJson: Serialize + DeserializeOwned {
    /// Rejects values JSON cannot carry faithfully. Non-finite floats would
    /// otherwise be written as `null` and fail to parse back.
    fn check_finite(&self) -> Result<(), JsonError> {
        Ok(())
    }
}

fn finite(value: f64, field: &'static str) -> Result<(), JsonError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(JsonError::NonFinite { field })
    }
}

impl ExternalJson for DataUpPayload {
    fn check_finite(&self) -> Result<(), JsonError> {
        for rx in &self.rx_info {
            finite(rx.lora_snr, "rxInfo.loRaSNR")?;
            if let Some(location) = &rx.location {
                finite(location.latitude, "rxInfo.location.latitude")?;
                finite(location.longitude, "rxInfo.location.longitude")?;
                finite(location.altitude, "rxInfo.location.altitude")?;
            }
        }
        Ok(())
    }
}

impl ExternalJson for DataDownPayload {}
impl ExternalJson for JoinNotification {}
impl ExternalJson for AckNotification {}
impl ExternalJson for ErrorNotification {}
impl ExternalJson for StatusNotification {}

pub fn encode_external<T: ExternalJson>(value: &T) -> Result<String, JsonError> {
    value.check_finite()?;
    Ok(serde_json::to_string(value)?)
}

pub fn encode_external_pretty<T: ExternalJson>(value: &T) -> Result<String, JsonError> {
    value.check_finite()?;
    Ok(serde_json::to_string_pretty(value)?)
}

/// Parses an external JSON document. Any `object` member is captured as raw
/// text, so the document must be given as text rather than a parsed value.
pub fn decode_external<T: ExternalJson>(doc: &str) -> Result<T, JsonError> {
    Ok(serde_json::from_str(doc)?)
}

#[cfg(test)]
mod tests {
    use super::{decode_external, encode_external};
    use crate::notifications::{DataUpPayload, Location, RxInfo, TxInfo};
    use crate::types::{ApplicationId, Eui64};
    use crate::JsonError;

    fn uplink(snr: f64, latitude: f64) -> DataUpPayload {
        DataUpPayload {
            application_id: ApplicationId::new(1),
            application_name: "a".into(),
            device_name: "d".into(),
            dev_eui: Eui64::default(),
            rx_info: vec![RxInfo {
                gateway_id: Eui64::default(),
                name: "gw".into(),
                time: None,
                rssi: -50,
                lora_snr: snr,
                location: Some(Location {
                    latitude,
                    longitude: 0.0,
                    altitude: 0.0,
                }),
            }],
            tx_info: TxInfo::default(),
            adr: false,
            f_cnt: 0,
            f_port: 1,
            data: vec![],
            object: None,
        }
    }

    #[test]
    fn non_finite_values_are_rejected() {
        assert!(matches!(
            encode_external(&uplink(f64::NAN, 0.0)),
            Err(JsonError::NonFinite {
                field: "rxInfo.loRaSNR"
            })
        ));
        assert!(matches!(
            encode_external(&uplink(1.0, f64::INFINITY)),
            Err(JsonError::NonFinite {
                field: "rxInfo.location.latitude"
            })
        ));
    }

    #[test]
    fn finite_uplink_roundtrip() {
        let up = uplink(9.5, 51.5);
        let doc = encode_external(&up).unwrap();
        assert_eq!(decode_external::<DataUpPayload>(&doc).unwrap(), up);
    }

    #[test]
    fn syntax_errors_surface() {
        assert!(matches!(
            decode_external::<DataUpPayload>("{"),
            Err(JsonError::Json(_))
        ));
    }
}
