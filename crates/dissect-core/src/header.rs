//! Binary plist magic header validation.

/// Magic prefix of a version-zero binary plist stream.
pub const BPLIST_MAGIC: [u8; 8] = *b"bplist00";

/// Outcome of checking a buffer's first 8 bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderVerdict {
    /// Header equals `bplist00`.
    Valid([u8; 8]),
    /// Eight bytes were present but are not the magic.
    Mismatch([u8; 8]),
    /// Fewer than 8 bytes available; holds whatever was there.
    Truncated(Vec<u8>),
}

impl HeaderVerdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, HeaderVerdict::Valid(_))
    }

    /// The bytes that were read from the head of the buffer (at most 8).
    pub fn magic_bytes(&self) -> &[u8] {
        match self {
            HeaderVerdict::Valid(b) | HeaderVerdict::Mismatch(b) => b.as_slice(),
            HeaderVerdict::Truncated(b) => b.as_slice(),
        }
    }

    /// Report lines for this verdict.
    pub fn render(&self) -> Vec<String> {
        let first = match self {
            HeaderVerdict::Valid(b) => {
                format!("[+] BPLIST has been found -> {}", String::from_utf8_lossy(b))
            }
            HeaderVerdict::Mismatch(b) => {
                format!("[!] BPLIST header mismatch -> {}", String::from_utf8_lossy(b))
            }
            HeaderVerdict::Truncated(b) => {
                format!("[!] BPLIST header truncated ({} of {} bytes)", b.len(), BPLIST_MAGIC.len())
            }
        };
        let marker = if self.is_valid() { "[+]" } else { "[!]" };

        vec![
            first,
            format!("{} Magic bytes           -> [{}]", marker, decimal_bytes(self.magic_bytes())),
        ]
    }
}

fn decimal_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| b.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Check the first 8 bytes of `data` against [`BPLIST_MAGIC`].
///
/// Never panics; a buffer shorter than the magic is reported as truncated.
pub fn validate(data: &[u8]) -> HeaderVerdict {
    let head: [u8; 8] = match data.get(..BPLIST_MAGIC.len()) {
        Some(bytes) => bytes.try_into().unwrap_or_default(),
        None => return HeaderVerdict::Truncated(data.to_vec()),
    };

    if head == BPLIST_MAGIC {
        HeaderVerdict::Valid(head)
    } else {
        HeaderVerdict::Mismatch(head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod validation {
        use super::*;

        #[test]
        fn valid_header_with_trailing_data() {
            let mut data = b"bplist00".to_vec();
            data.extend([0u8; 10]);
            let verdict = validate(&data);
            assert!(verdict.is_valid());
            assert_eq!(verdict.magic_bytes(), b"bplist00");
        }

        #[test]
        fn exactly_eight_bytes_is_enough() {
            assert!(validate(b"bplist00").is_valid());
        }

        #[test]
        fn other_version_is_mismatch() {
            let verdict = validate(b"bplist01\x00\x00");
            assert_eq!(verdict, HeaderVerdict::Mismatch(*b"bplist01"));
            assert!(!verdict.is_valid());
        }

        #[test]
        fn xml_plist_is_mismatch() {
            assert!(!validate(b"<?xml version=\"1.0\"?>").is_valid());
        }

        #[test]
        fn short_buffer_is_truncated() {
            let verdict = validate(&[0u8; 4]);
            assert_eq!(verdict, HeaderVerdict::Truncated(vec![0; 4]));
            assert!(!verdict.is_valid());
        }

        #[test]
        fn seven_magic_bytes_are_truncated() {
            assert_eq!(validate(b"bplist0"), HeaderVerdict::Truncated(b"bplist0".to_vec()));
        }

        #[test]
        fn empty_buffer_is_truncated() {
            assert_eq!(validate(&[]).magic_bytes(), &[] as &[u8]);
        }

        #[test]
        fn byte_order_is_preserved() {
            // reversed magic must not validate
            assert!(!validate(b"00tsilpb").is_valid());
        }
    }

    mod rendering {
        use super::*;

        #[test]
        fn valid_lines() {
            let lines = validate(b"bplist00rest").render();
            assert_eq!(lines[0], "[+] BPLIST has been found -> bplist00");
            assert_eq!(
                lines[1],
                "[+] Magic bytes           -> [98 112 108 105 115 116 48 48]"
            );
        }

        #[test]
        fn truncated_lines() {
            let lines = validate(b"bp").render();
            assert_eq!(lines[0], "[!] BPLIST header truncated (2 of 8 bytes)");
            assert_eq!(lines[1], "[!] Magic bytes           -> [98 112]");
        }

        #[test]
        fn mismatch_lines() {
            let lines = validate(b"HTTP/1.1 200").render();
            assert_eq!(lines[0], "[!] BPLIST header mismatch -> HTTP/1.1");
        }
    }
}
