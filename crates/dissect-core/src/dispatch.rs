//! Content-type driven dispatch to a dissection strategy.
//!
//! The set of strategies is closed: a DMAP-tagged body gets a tag scan, a
//! binary plist body gets a magic header check. Labels outside that set are
//! ignored without a diagnostic; callers that care can check
//! [`FormatDispatcher::is_recognized`] first.

use crate::content_type::ContentType;
use crate::header::{self, HeaderVerdict};
use crate::scanner;
use crate::tag::DmapTag;

/// How a body of a given content type is dissected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Validate the binary plist magic header.
    HeaderCheck,
    /// Locate the known DMAP tags.
    TagScan,
}

impl Strategy {
    pub fn for_content_type(content_type: ContentType) -> Self {
        match content_type {
            ContentType::BinaryPlist => Strategy::HeaderCheck,
            ContentType::DmapTagged => Strategy::TagScan,
        }
    }
}

/// A known tag located in a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagHit {
    pub tag: DmapTag,
    pub offset: usize,
}

impl TagHit {
    pub fn render(&self) -> String {
        self.tag.descriptor().render(self.offset)
    }
}

/// Result of one dissection pass over one body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dissection {
    /// Tags found, in priority order. Absent tags are simply not listed.
    Tagged(Vec<TagHit>),
    BinaryPlist(HeaderVerdict),
}

impl Dissection {
    pub fn content_type(&self) -> ContentType {
        match self {
            Dissection::Tagged(_) => ContentType::DmapTagged,
            Dissection::BinaryPlist(_) => ContentType::BinaryPlist,
        }
    }

    /// Human-readable report lines.
    pub fn lines(&self) -> Vec<String> {
        match self {
            Dissection::Tagged(hits) => hits.iter().map(TagHit::render).collect(),
            Dissection::BinaryPlist(verdict) => verdict.render(),
        }
    }

    pub fn hits(&self) -> &[TagHit] {
        match self {
            Dissection::Tagged(hits) => hits,
            Dissection::BinaryPlist(_) => &[],
        }
    }

    pub fn verdict(&self) -> Option<&HeaderVerdict> {
        match self {
            Dissection::BinaryPlist(verdict) => Some(verdict),
            Dissection::Tagged(_) => None,
        }
    }
}

/// Selects and runs the strategy for a body's declared content type.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatDispatcher {
    all_offsets: bool,
}

impl FormatDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report every occurrence of each tag instead of only the first.
    pub fn all_offsets(mut self, enabled: bool) -> Self {
        self.all_offsets = enabled;
        self
    }

    pub fn is_recognized(label: &str) -> bool {
        ContentType::from_label(label).is_some()
    }

    /// Dissect a body by its content-type label. Unknown labels yield `None`.
    pub fn dissect_label(&self, label: &str, data: &[u8]) -> Option<Dissection> {
        let content_type = ContentType::from_label(label)?;
        Some(self.dissect(content_type, data))
    }

    /// Dissect a body of a known content type.
    pub fn dissect(&self, content_type: ContentType, data: &[u8]) -> Dissection {
        let strategy = Strategy::for_content_type(content_type);
        tracing::debug!(?strategy, body_len = data.len(), "Dissecting {}", content_type);

        match strategy {
            Strategy::HeaderCheck => Dissection::BinaryPlist(header::validate(data)),
            Strategy::TagScan => Dissection::Tagged(self.scan_tags(data)),
        }
    }

    fn scan_tags(&self, data: &[u8]) -> Vec<TagHit> {
        let mut hits = Vec::new();

        for tag in DmapTag::ALL {
            let code = tag.code();
            if self.all_offsets {
                hits.extend(
                    scanner::find_all(data, code.as_bytes()).map(|offset| TagHit { tag, offset }),
                );
            } else if let Some(offset) = scanner::find(data, code.as_bytes()) {
                tracing::trace!(tag = %code, offset, "Tag found");
                hits.push(TagHit { tag, offset });
            }
        }

        tracing::trace!(hits = hits.len(), "Tag scan complete");
        hits
    }
}
