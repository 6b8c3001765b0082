//! Declared media types of the bodies the dissector understands.

use std::fmt;

/// Content type served by the DAAP login endpoint.
pub const DMAP_TAGGED: &str = "application/x-dmap-tagged";

/// Content type served by the AirPlay `/info` endpoint.
pub const BINARY_PLIST: &str = "application/x-apple-binary-plist";

/// A recognized response body format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    DmapTagged,
    BinaryPlist,
}

impl ContentType {
    /// Match an exact content-type label.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            DMAP_TAGGED => Some(Self::DmapTagged),
            BINARY_PLIST => Some(Self::BinaryPlist),
            _ => None,
        }
    }

    /// Match a raw `Content-Type` header value.
    ///
    /// Parameters after `;` are dropped and the media type is compared
    /// case-insensitively.
    pub fn from_header(value: &str) -> Option<Self> {
        let essence = value.split(';').next().unwrap_or("").trim();
        [Self::DmapTagged, Self::BinaryPlist]
            .into_iter()
            .find(|ct| ct.label().eq_ignore_ascii_case(essence))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::DmapTagged => DMAP_TAGGED,
            Self::BinaryPlist => BINARY_PLIST,
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
