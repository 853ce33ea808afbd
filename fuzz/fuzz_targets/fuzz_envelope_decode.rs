#![no_main]

use libfuzzer_sys::fuzz_target;
use rustlora_core::{decode_durable, encode_durable};

fuzz_target!(|data: &[u8]| {
    if let Ok(notification) = decode_durable(data) {
        // Floats may be NaN, so compare canonical bytes rather than values.
        let bytes = encode_durable(&notification).expect("decoded notification must re-encode");
        let again = decode_durable(&bytes).expect("re-encoded envelope must decode");
        assert_eq!(encode_durable(&again).expect("second encode"), bytes);
    }
});
