#![no_main]

use libfuzzer_sys::fuzz_target;
use rustlora_core::{Notification, NotificationKind};

fuzz_target!(|data: &[u8]| {
    let Some((&selector, rest)) = data.split_first() else {
        return;
    };
    let Ok(doc) = std::str::from_utf8(rest) else {
        return;
    };
    let kind = NotificationKind::ALL[selector as usize % NotificationKind::ALL.len()];
    let _ = Notification::decode_external(kind, doc);
});
