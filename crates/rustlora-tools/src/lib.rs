use clap::ValueEnum;
use rustlora_core::NotificationKind;
use std::io::{self, Read};
use std::path::Path;

/// CLI-friendly enum for selecting a notification kind.
///
/// Maps human-readable names to [`NotificationKind`] variants for use with clap argument parsing.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KindArg {
    DataUp,
    Join,
    Ack,
    Error,
    Status,
}

impl KindArg {
    /// Convert to the core [`NotificationKind`] representation.
    pub const fn into_kind(self) -> NotificationKind {
        match self {
            Self::DataUp => NotificationKind::DataUp,
            Self::Join => NotificationKind::Join,
            Self::Ack => NotificationKind::Ack,
            Self::Error => NotificationKind::Error,
            Self::Status => NotificationKind::Status,
        }
    }
}

/// Reads the whole input from `path`, or from stdin when no path is given.
pub fn read_input(path: Option<&Path>) -> io::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

/// Parses hex text in the fixture layout: whitespace between bytes is
/// ignored, as is anything after a `#` on a line.
pub fn parse_hex(text: &str) -> Result<Vec<u8>, hex::FromHexError> {
    let digits: String = text
        .lines()
        .map(|line| line.split('#').next().unwrap_or_default())
        .flat_map(|line| line.split_whitespace())
        .collect();
    hex::decode(digits)
}

/// Formats bytes as lowercase hex, sixteen bytes per line.
pub fn format_hex(bytes: &[u8]) -> String {
    bytes
        .chunks(16)
        .map(|chunk| {
            chunk
                .iter()
                .map(|b| format!("{b:02x}"))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::{format_hex, parse_hex, KindArg};
    use rustlora_core::NotificationKind;

    #[test]
    fn parse_hex_skips_comments_and_spacing() {
        let text = "# header\n01 75\n  0a0B # trailing\n";
        assert_eq!(parse_hex(text).unwrap(), vec![0x01, 0x75, 0x0A, 0x0B]);
    }

    #[test]
    fn parse_hex_rejects_odd_digits() {
        assert!(parse_hex("01 7").is_err());
    }

    #[test]
    fn format_hex_wraps_lines() {
        let bytes: Vec<u8> = (0..18).collect();
        let text = format_hex(&bytes);
        assert_eq!(text.lines().count(), 2);
        assert_eq!(parse_hex(&text).unwrap(), bytes);
    }

    #[test]
    fn kind_args_cover_every_kind() {
        let kinds = [
            KindArg::DataUp,
            KindArg::Join,
            KindArg::Ack,
            KindArg::Error,
            KindArg::Status,
        ]
        .map(KindArg::into_kind);
        assert_eq!(kinds, NotificationKind::ALL);
    }
}
