use rustlora_core::{decode_durable, encode_durable, NotificationKind};
use std::fs;
use std::path::{Path, PathBuf};

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../..")
        .canonicalize()
        .expect("workspace root should be resolvable")
}

fn parse_hex_fixture(path: &Path) -> Vec<u8> {
    let content = fs::read_to_string(path).expect("fixture must be readable");
    let mut out = Vec::new();
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        for token in trimmed.split_whitespace() {
            let byte = u8::from_str_radix(token, 16)
                .unwrap_or_else(|_| panic!("invalid hex token '{token}' in {}", path.display()));
            out.push(byte);
        }
    }
    out
}

#[test]
fn golden_corpus_fixtures_decode_and_reencode() {
    let fixture_dir = workspace_root().join("fixtures/golden");
    let mut fixture_files = fs::read_dir(&fixture_dir)
        .expect("fixtures directory should exist")
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "hex"))
        .collect::<Vec<_>>();
    fixture_files.sort();
    assert!(
        !fixture_files.is_empty(),
        "expected at least one corpus fixture in {}",
        fixture_dir.display()
    );

    let mut kinds_seen = Vec::new();
    for fixture in fixture_files {
        let bytes = parse_hex_fixture(&fixture);
        let notification = decode_durable(&bytes).unwrap_or_else(|e| {
            panic!("fixture {} failed to decode: {e}", fixture.display())
        });
        let reencoded = encode_durable(&notification)
            .unwrap_or_else(|e| panic!("fixture {} failed to encode: {e}", fixture.display()));
        assert_eq!(
            reencoded,
            bytes,
            "fixture {} is not in canonical form",
            fixture.display()
        );
        notification
            .encode_external()
            .unwrap_or_else(|e| panic!("fixture {} has no JSON form: {e}", fixture.display()));
        kinds_seen.push(notification.kind());
    }

    for kind in [
        NotificationKind::DataUp,
        NotificationKind::Join,
        NotificationKind::Ack,
        NotificationKind::Status,
    ] {
        assert!(kinds_seen.contains(&kind), "no fixture for {kind}");
    }
}
