//! HTTP/1.x response parsing.

use std::collections::HashMap;

use dissect_core::{HttpError, Result};

/// Parsed HTTP response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status_code: u16,
    pub status_text: String,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Parse the status line and headers (everything before the blank line).
    ///
    /// The returned response has an empty body; the connection fills it in
    /// according to the framing headers.
    pub fn parse_head(data: &[u8]) -> Result<Self> {
        let header_str = std::str::from_utf8(data)
            .map_err(|_| HttpError::InvalidResponse("invalid UTF-8 in headers".to_string()))?;

        let mut lines = header_str.lines();

        let status_line = lines
            .next()
            .ok_or_else(|| HttpError::InvalidResponse("missing status line".to_string()))?;

        let (status_code, status_text) = parse_status_line(status_line)?;

        let mut headers = HashMap::new();
        for line in lines {
            if let Some((key, value)) = line.split_once(':') {
                headers.insert(key.trim().to_string(), value.trim().to_string());
            }
        }

        Ok(Self {
            status_code,
            status_text,
            headers,
            body: Vec::new(),
        })
    }

    /// Get header value (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn content_length(&self) -> Option<usize> {
        self.header("Content-Length").and_then(|v| v.parse().ok())
    }

    /// Raw `Content-Type` header.
    pub fn content_type_header(&self) -> Option<&str> {
        self.header("Content-Type")
    }

    pub fn is_chunked(&self) -> bool {
        self.header("Transfer-Encoding")
            .map(|v| {
                v.split(',')
                    .any(|coding| coding.trim().eq_ignore_ascii_case("chunked"))
            })
            .unwrap_or(false)
    }
}

/// Parse status line: "HTTP/1.1 200 OK"
fn parse_status_line(line: &str) -> Result<(u16, String)> {
    let parts: Vec<&str> = line.splitn(3, ' ').collect();

    if parts.len() < 2 {
        return Err(HttpError::InvalidResponse(format!("malformed status line: {}", line)).into());
    }

    if !parts[0].starts_with("HTTP/") {
        return Err(
            HttpError::InvalidResponse(format!("not an HTTP response: {}", parts[0])).into(),
        );
    }

    let code = parts[1]
        .parse()
        .map_err(|_| HttpError::InvalidResponse(format!("invalid status code: {}", parts[1])))?;

    // Status text is optional
    let text = parts.get(2).unwrap_or(&"").to_string();

    Ok((code, text))
}

/// Decode a `Transfer-Encoding: chunked` body.
///
/// Chunk extensions and trailers are ignored. A body that ends before the
/// terminating zero-size chunk is an error.
pub fn decode_chunked(data: &[u8]) -> std::result::Result<Vec<u8>, HttpError> {
    let mut body = Vec::new();
    let mut pos = 0;

    loop {
        let line_end = data[pos..]
            .windows(2)
            .position(|w| w == b"\r\n")
            .map(|i| pos + i)
            .ok_or_else(|| HttpError::InvalidChunk("missing chunk size line".to_string()))?;

        let size_line = std::str::from_utf8(&data[pos..line_end])
            .map_err(|_| HttpError::InvalidChunk("non-ASCII chunk size".to_string()))?;
        let size_hex = size_line.split(';').next().unwrap_or("").trim();
        let size = usize::from_str_radix(size_hex, 16)
            .map_err(|_| HttpError::InvalidChunk(format!("bad chunk size: {:?}", size_hex)))?;

        pos = line_end + 2;
        if size == 0 {
            return Ok(body);
        }

        let chunk_end = pos
            .checked_add(size)
            .filter(|&end| end <= data.len())
            .ok_or(HttpError::TruncatedBody {
                expected: size,
                actual: data.len() - pos,
            })?;
        body.extend_from_slice(&data[pos..chunk_end]);

        if data.get(chunk_end..chunk_end + 2) != Some(b"\r\n".as_slice()) {
            return Err(HttpError::InvalidChunk("chunk not followed by CRLF".to_string()));
        }
        pos = chunk_end + 2;
    }
}
