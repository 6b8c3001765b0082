//! DMAP tag codes and their report messages.
//!
//! DMAP (the wire format behind DAAP/DACP) prefixes every field with a 4-byte
//! ASCII code. Only a handful of those codes matter for dissecting a login
//! response; each one maps to exactly one message template.

use std::fmt;

/// Raw 4-byte DMAP code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TagCode(pub [u8; 4]);

impl TagCode {
    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl fmt::Display for TagCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}

/// Severity marker printed at the start of a report line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
}

impl Severity {
    pub fn marker(&self) -> &'static str {
        match self {
            Severity::Info => "[+]",
            Severity::Warning => "[!]",
        }
    }
}

/// DMAP tags the dissector looks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DmapTag {
    /// `mstt` - dmap.status
    Status,
    /// `merr` - server error code
    Error,
    /// `mers` - server media message
    MediaMessage,
    /// `mlog` - dmap.loginresponse
    LoginResponse,
    /// `mlid` - dmap.sessionid handed out on login
    LoginAttemptId,
}

impl DmapTag {
    /// All known tags in report priority order.
    pub const ALL: [DmapTag; 5] = [
        DmapTag::Status,
        DmapTag::Error,
        DmapTag::MediaMessage,
        DmapTag::LoginResponse,
        DmapTag::LoginAttemptId,
    ];

    pub const fn code(&self) -> TagCode {
        match self {
            DmapTag::Status => TagCode(*b"mstt"),
            DmapTag::Error => TagCode(*b"merr"),
            DmapTag::MediaMessage => TagCode(*b"mers"),
            DmapTag::LoginResponse => TagCode(*b"mlog"),
            DmapTag::LoginAttemptId => TagCode(*b"mlid"),
        }
    }

    /// Convert from raw code.
    pub fn from_code(code: TagCode) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| tag.code() == code)
    }

    pub fn descriptor(&self) -> &'static TagDescriptor {
        &CATALOG[*self as usize]
    }
}

/// A tag's report template.
#[derive(Debug, PartialEq, Eq)]
pub struct TagDescriptor {
    pub tag: DmapTag,
    pub severity: Severity,
    /// Text before and after the offset slot.
    template: (&'static str, &'static str),
}

impl TagDescriptor {
    /// Render the message with the discovered byte offset.
    pub fn render(&self, offset: usize) -> String {
        format!(
            "{}: {}{}{}",
            self.severity.marker(),
            self.template.0,
            offset,
            self.template.1
        )
    }
}

/// Indexed by `DmapTag` discriminant.
static CATALOG: [TagDescriptor; 5] = [
    TagDescriptor {
        tag: DmapTag::Status,
        severity: Severity::Info,
        template: ("Found server status code at index [IDX=", "]"),
    },
    TagDescriptor {
        tag: DmapTag::Error,
        severity: Severity::Warning,
        template: ("Found DAAP server error code at index [IDX=", "]"),
    },
    TagDescriptor {
        tag: DmapTag::MediaMessage,
        severity: Severity::Warning,
        template: ("Found DAAP server media message at index[IDX=", "]"),
    },
    TagDescriptor {
        tag: DmapTag::LoginResponse,
        severity: Severity::Warning,
        template: ("Found DAAP server login response message at index[IDX=", "]"),
    },
    TagDescriptor {
        tag: DmapTag::LoginAttemptId,
        severity: Severity::Warning,
        template: ("Found DAAP server login attempt ID at index[IDX=", "]"),
    },
];

/// Look up the descriptor for a raw code.
pub fn describe(code: TagCode) -> Option<&'static TagDescriptor> {
    DmapTag::from_code(code).map(|tag| tag.descriptor())
}
