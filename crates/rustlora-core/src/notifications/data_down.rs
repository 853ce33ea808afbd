use serde::{Deserialize, Serialize};

use crate::types::{ApplicationId, Eui64, Object};

/// A downlink request submitted by an application.
///
/// Only ever travels as JSON; it is handed straight to the scheduler and has
/// no durable encoding. `object` is kept as the submitted JSON text so it can
/// be passed to the application's payload encoder untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataDownPayload {
    #[serde(rename = "applicationID")]
    pub application_id: ApplicationId,
    #[serde(rename = "devEUI")]
    pub dev_eui: Eui64,
    pub reference: String,
    pub confirmed: bool,
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
