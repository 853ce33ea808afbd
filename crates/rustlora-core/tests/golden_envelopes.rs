use rustlora_core::notifications::{
    DataUpPayload, JoinNotification, StatusNotification, TxInfo,
};
use rustlora_core::types::{ApplicationId, DevAddr, Eui64, Object};
use rustlora_core::{decode_durable, CodecError, DecodeError, Notification};

#[test]
fn join_envelope_matches_fixture() {
    let join = Notification::Join(JoinNotification {
        application_id: ApplicationId::new(1),
        application_name: "app".into(),
        device_name: "node".into(),
        dev_eui: Eui64::new([1, 2, 3, 4, 5, 6, 7, 8]),
        dev_addr: DevAddr::new([1, 2, 3, 4]),
    });

    let mut expected = vec![0x01, 0x75, 0x10];
    expected.extend_from_slice(b"JoinNotification");
    expected.extend_from_slice(&[
        0x65, 0x1A, 0x09, 0x01, 0x1B, b'a', b'p', b'p', 0x2C, b'n', b'o', b'd', b'e', 0x3D,
        0x08, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x4C, 0x01, 0x02, 0x03, 0x04,
    ]);

    assert_eq!(join.encode_durable().unwrap(), expected);
}

#[test]
fn status_envelope_with_max_application_id() {
    let status = Notification::Status(StatusNotification {
        application_id: ApplicationId::new(9_223_372_036_854_775_807),
        application_name: String::new(),
        device_name: String::new(),
        dev_eui: Eui64::default(),
        battery: 0,
        margin: 0,
    });

    let mut expected = vec![0x01, 0x75, 0x12];
    expected.extend_from_slice(b"StatusNotification");
    expected.extend_from_slice(&[
        0x65, 0x1A, 0x0D, 0x08, 0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x18, 0x28,
        0x3D, 0x08, 0, 0, 0, 0, 0, 0, 0, 0, 0x49, 0x00, 0x59, 0x00,
    ]);

    let bytes = status.encode_durable().unwrap();
    assert_eq!(bytes, expected);
    assert_eq!(decode_durable(&bytes).unwrap(), status);
}

#[test]
fn data_up_envelope_carries_object_text() {
    let up = Notification::DataUp(DataUpPayload {
        application_id: ApplicationId::new(1),
        application_name: "a".into(),
        device_name: "d".into(),
        dev_eui: Eui64::new([1; 8]),
        rx_info: vec![],
        tx_info: TxInfo {
            frequency: 868_100_000,
            dr: 5,
        },
        adr: false,
        f_cnt: 1,
        f_port: 2,
        data: vec![0xAB],
        object: Some(Object::from_json(r#"{"t":1}"#).unwrap()),
    });

    let bytes = up.encode_durable().unwrap();
    assert!(bytes.ends_with(&[0xAD, 0x07, b'{', b'"', b't', b'"', b':', b'1', b'}']));
    assert_eq!(decode_durable(&bytes).unwrap(), up);
}

#[test]
fn unknown_kind_fails_with_unregistered_kind() {
    let mut bytes = vec![0x01, 0x75, 0x0E];
    bytes.extend_from_slice(b"UnknownKind123");
    bytes.extend_from_slice(&[0x65, 0x00]);

    assert_eq!(
        decode_durable(&bytes).unwrap_err(),
        CodecError::UnregisteredKind("UnknownKind123".into())
    );
}

#[test]
fn data_down_is_not_a_durable_kind() {
    let mut bytes = vec![0x01, 0x75, 0x0F];
    bytes.extend_from_slice(b"DataDownPayload");
    bytes.extend_from_slice(&[0x65, 0x00]);

    assert!(matches!(
        decode_durable(&bytes),
        Err(CodecError::UnregisteredKind(kind)) if kind == "DataDownPayload"
    ));
}

#[test]
fn empty_input_is_malformed() {
    assert_eq!(
        decode_durable(&[]).unwrap_err(),
        CodecError::MalformedEnvelope(DecodeError::UnexpectedEof)
    );
}
