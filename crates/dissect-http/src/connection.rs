//! Plain HTTP connection over tokio TCP.

use async_trait::async_trait;
use dissect_core::error::{Error, HttpError, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::config::FetchConfig;
use crate::traits::HttpTransport;
use crate::{HttpRequest, HttpResponse, HttpUrl};

/// Upper bound on the status line plus headers.
const MAX_HEAD_LEN: usize = 64 * 1024;

/// One-shot HTTP/1.1 client: a fresh connection per request, closed after
/// the response.
#[derive(Debug, Clone, Default)]
pub struct HttpConnection {
    config: FetchConfig,
}

impl HttpConnection {
    pub fn new(config: FetchConfig) -> Self {
        Self { config }
    }

    /// GET `url`, bounded by the configured timeout.
    pub async fn get(&self, url: &HttpUrl) -> Result<HttpResponse> {
        timeout(self.config.timeout, self.exchange(url))
            .await
            .map_err(|_| Error::Timeout)?
    }

    async fn exchange(&self, url: &HttpUrl) -> Result<HttpResponse> {
        let stream = TcpStream::connect((url.host.as_str(), url.port))
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::ConnectionRefused => HttpError::ConnectionRefused.into(),
                _ => Error::Connection(e),
            })?;

        let request = HttpRequest::get(url).header("User-Agent", self.config.user_agent.as_str());
        tracing::debug!("HTTP -> GET {} (user-agent={})", url, self.config.user_agent);

        let mut reader = BufReader::new(stream);
        reader.get_mut().write_all(&request.serialize()).await?;
        reader.get_mut().flush().await?;

        let head = read_head(&mut reader).await?;
        let mut response = HttpResponse::parse_head(&head)?;
        response.body = read_body(&mut reader, &response, self.config.max_body_len).await?;

        tracing::debug!(
            "HTTP <- {} {} (content-type={:?}, body_len={})",
            response.status_code,
            response.status_text,
            response.content_type_header(),
            response.body.len()
        );

        Ok(response)
    }
}

/// Read the status line and headers, without the terminating blank line.
///
/// At most `MAX_HEAD_LEN` bytes are consumed, so a peer that never sends a
/// line ending cannot grow the buffer without bound.
async fn read_head<R: AsyncBufRead + Unpin>(reader: &mut R) -> Result<Vec<u8>> {
    let mut limited = (&mut *reader).take(MAX_HEAD_LEN as u64 + 1);
    let mut head = Vec::new();

    loop {
        let line_start = head.len();
        let n = limited.read_until(b'\n', &mut head).await?;
        if n == 0 {
            let reason = if head.len() > MAX_HEAD_LEN {
                "headers too large"
            } else {
                "connection closed before end of headers"
            };
            return Err(HttpError::InvalidResponse(reason.to_string()).into());
        }

        let line = &head[line_start..];
        if line == b"\r\n" || line == b"\n" {
            head.truncate(line_start);
            return Ok(head);
        }
    }
}

/// Read the body according to the response framing.
///
/// A `Content-Length` body must arrive in full; a short read is an error
/// rather than a silently truncated buffer.
async fn read_body<R: AsyncBufRead + Unpin>(
    reader: &mut R,
    head: &HttpResponse,
    limit: usize,
) -> Result<Vec<u8>> {
    if head.is_chunked() {
        let raw = read_to_eof(reader, limit).await?;
        return Ok(crate::response::decode_chunked(&raw)?);
    }

    match head.content_length() {
        Some(len) if len > limit => Err(HttpError::BodyTooLarge { limit }.into()),
        Some(len) => {
            let mut body = Vec::with_capacity(len);
            (&mut *reader).take(len as u64).read_to_end(&mut body).await?;
            if body.len() < len {
                return Err(HttpError::TruncatedBody {
                    expected: len,
                    actual: body.len(),
                }
                .into());
            }
            Ok(body)
        }
        None => read_to_eof(reader, limit).await,
    }
}

async fn read_to_eof<R: AsyncBufRead + Unpin>(reader: &mut R, limit: usize) -> Result<Vec<u8>> {
    let mut body = Vec::new();
    (&mut *reader)
        .take(limit as u64 + 1)
        .read_to_end(&mut body)
        .await?;
    if body.len() > limit {
        return Err(HttpError::BodyTooLarge { limit }.into());
    }
    Ok(body)
}

#[async_trait]
impl HttpTransport for HttpConnection {
    async fn get(&self, url: HttpUrl) -> Result<HttpResponse> {
        HttpConnection::get(self, &url).await
    }

    fn user_agent(&self) -> String {
        self.config.user_agent.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::net::TcpListener;

    /// Serve one canned response and hand back the request that was received.
    async fn serve_once(response: Vec<u8>) -> (HttpUrl, tokio::task::JoinHandle<Vec<u8>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.ends_with(b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            socket.write_all(&response).await.unwrap();
            socket.shutdown().await.unwrap();
            request
        });

        (HttpUrl::new("127.0.0.1", port, "/login?attempt=1"), handle)
    }

    #[tokio::test]
    async fn fetches_content_length_body() {
        let mut canned = b"HTTP/1.1 200 OK\r\n\
            Content-Type: application/x-dmap-tagged\r\n\
            Content-Length: 8\r\n\r\n"
            .to_vec();
        canned.extend_from_slice(b"XXmsttYY");
        let (url, server) = serve_once(canned).await;

        let response = HttpConnection::default().get(&url).await.unwrap();
        assert_eq!(response.status_code, 200);
        assert_eq!(response.body, b"XXmsttYY");

        let request = String::from_utf8(server.await.unwrap()).unwrap();
        assert!(request.starts_with("GET /login?attempt=1 HTTP/1.1\r\n"));
        assert!(request.contains("Connection: close\r\n"));
        assert!(request.contains("User-Agent: appletv-dissect/"));
    }

    #[tokio::test]
    async fn fetches_body_until_close() {
        let (url, _server) = serve_once(b"HTTP/1.0 200 OK\r\n\r\nbplist00\x00\x01".to_vec()).await;
        let response = HttpConnection::default().get(&url).await.unwrap();
        assert_eq!(response.body, b"bplist00\x00\x01");
    }

    #[tokio::test]
    async fn fetches_chunked_body() {
        let (url, _server) = serve_once(
            b"HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\n\r\n4\r\nmlog\r\n0\r\n\r\n".to_vec(),
        )
        .await;
        let response = HttpConnection::default().get(&url).await.unwrap();
        assert_eq!(response.body, b"mlog");
    }

    #[tokio::test]
    async fn short_body_is_truncation_error() {
        let (url, _server) =
            serve_once(b"HTTP/1.1 200 OK\r\nContent-Length: 50\r\n\r\nmstt".to_vec()).await;
        let result = HttpConnection::default().get(&url).await;
        assert!(matches!(
            result,
            Err(Error::Http(HttpError::TruncatedBody { expected: 50, actual: 4 }))
        ));
    }

    #[tokio::test]
    async fn oversized_body_is_rejected() {
        let (url, _server) =
            serve_once(b"HTTP/1.1 200 OK\r\nContent-Length: 4096\r\n\r\n".to_vec()).await;
        let connection = HttpConnection::new(FetchConfig::new().max_body_len(1024));
        let result = connection.get(&url).await;
        assert!(matches!(result, Err(Error::Http(HttpError::BodyTooLarge { limit: 1024 }))));
    }

    #[tokio::test]
    async fn unterminated_header_line_is_bounded() {
        let mut canned = b"HTTP/1.1 200 OK\r\nX-Filler: ".to_vec();
        canned.extend(std::iter::repeat(b'a').take(MAX_HEAD_LEN + 1024));
        let (url, _server) = serve_once(canned).await;

        let result = HttpConnection::default().get(&url).await;
        match result {
            Err(Error::Http(HttpError::InvalidResponse(reason))) => {
                assert_eq!(reason, "headers too large")
            }
            other => panic!("expected oversized head error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn headers_without_blank_line_are_invalid() {
        let (url, _server) = serve_once(b"HTTP/1.1 200 OK\r\nServer: x\r\n".to_vec()).await;
        let result = HttpConnection::default().get(&url).await;
        assert!(matches!(result, Err(Error::Http(HttpError::InvalidResponse(_)))));
    }

    #[test]
    fn transport_reports_configured_user_agent() {
        let connection = HttpConnection::new(FetchConfig::new().user_agent("iTunes/12.12"));
        assert_eq!(HttpTransport::user_agent(&connection), "iTunes/12.12");
    }

    #[tokio::test]
    async fn silent_server_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let _server = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
            drop(socket);
        });

        let connection =
            HttpConnection::new(FetchConfig::new().timeout(Duration::from_millis(100)));
        let result = connection.get(&HttpUrl::new("127.0.0.1", port, "/info")).await;
        assert!(matches!(result, Err(Error::Timeout)));
    }

    #[tokio::test]
    async fn closed_port_is_an_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let result = HttpConnection::default()
            .get(&HttpUrl::new("127.0.0.1", port, "/info"))
            .await;
        assert!(result.is_err());
    }
}
