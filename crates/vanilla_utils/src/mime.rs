//! Content sniffing by leading-byte signatures.

/// MIME type returned when no signature matches.
pub const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// Known signatures as uppercase hex prefixes, consulted in order; the first match wins.
///
/// `52494646` (`RIFF`) is shared by WebP, AVI and WAV containers. It is listed for all three in
/// that order, so RIFF input always sniffs as `image/webp`.
pub const SIGNATURES: &[(&str, &str)] = &[
    ("89504E47", "image/png"),
    ("47494638", "image/gif"),
    ("FFD8FF", "image/jpeg"),
    ("25504446", "application/pdf"),
    ("504B0304", "application/zip"),
    ("504B34", "application/vnd.openxmlformats-officedocument"),
    ("49492A00", "image/tiff"),
    ("4D4D002A", "image/tiff"),
    ("377ABCAF271C", "application/7z"),
    ("1F8B08", "application/gzip"),
    ("52494646", "image/webp"),
    ("52494646", "video/x-msvideo"),
    ("52494646", "audio/wav"),
    ("494433", "audio/mpeg"),
    ("4F676753", "audio/ogg"),
    ("664C6143", "audio/flac"),
    ("1A45DFA3", "video/webm"),
    ("00000100", "image/x-icon"),
    ("424D", "image/bmp"),
];

fn longest_signature_bytes() -> usize {
    SIGNATURES
        .iter()
        .map(|(prefix, _)| prefix.len().div_ceil(2))
        .max()
        .unwrap_or(0)
}

/// Guesses a MIME type from the first bytes of a file.
///
/// Returns [`FALLBACK_MIME_TYPE`] when nothing in [`SIGNATURES`] matches.
pub fn guess_mime_type(bytes: &[u8]) -> &'static str {
    let head = &bytes[..bytes.len().min(longest_signature_bytes())];
    let head_hex = hex::encode_upper(head);
    SIGNATURES
        .iter()
        .find(|(prefix, _)| head_hex.starts_with(prefix))
        .map(|(_, mime)| *mime)
        .unwrap_or(FALLBACK_MIME_TYPE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sniffs_common_signatures() {
        assert_eq!(guess_mime_type(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A]), "image/png");
        assert_eq!(guess_mime_type(b"GIF89a"), "image/gif");
        assert_eq!(guess_mime_type(&[0xFF, 0xD8, 0xFF, 0xE0]), "image/jpeg");
        assert_eq!(guess_mime_type(b"%PDF-1.7"), "application/pdf");
        assert_eq!(guess_mime_type(&[0x50, 0x4B, 0x03, 0x04, 0x14]), "application/zip");
        assert_eq!(guess_mime_type(&[0x1F, 0x8B, 0x08, 0x00]), "application/gzip");
        assert_eq!(guess_mime_type(b"BM\x00\x00"), "image/bmp");
        assert_eq!(
            guess_mime_type(&[0x37, 0x7A, 0xBC, 0xAF, 0x27, 0x1C, 0x00]),
            "application/7z"
        );
    }

    #[test]
    fn riff_prefix_resolves_to_first_table_entry() {
        assert_eq!(guess_mime_type(b"RIFF\x24\x00\x00\x00WAVEfmt "), "image/webp");
        assert_eq!(guess_mime_type(b"RIFF\x00\x00\x00\x00AVI "), "image/webp");
    }

    #[test]
    fn unknown_short_and_empty_input_fall_back() {
        assert_eq!(guess_mime_type(&[]), FALLBACK_MIME_TYPE);
        assert_eq!(guess_mime_type(&[0x89, 0x50]), FALLBACK_MIME_TYPE);
        assert_eq!(guess_mime_type(b"hello world"), FALLBACK_MIME_TYPE);
    }
}
