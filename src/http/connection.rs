use std::sync::Arc;

use anyhow::Context;
use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, info};

use crate::config::Limits;
use crate::http::parser::{
    ParseError, declared_content_length, find_headers_end, parse_http_request,
};
use crate::http::request::Request;
use crate::http::writer::ResponseWriter;
use crate::router::Router;

const READ_CHUNK: usize = 1024;

/// Serves a single request on one client stream.
pub struct Connection<S = TcpStream> {
    stream: S,
    buffer: BytesMut,
    router: Arc<Router>,
    limits: Limits,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, router: Arc<Router>, limits: Limits) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(READ_CHUNK),
            router,
            limits,
            state: ConnectionState::Reading,
        }
    }

    /// Drives the connection through read, dispatch and write, then closes.
    ///
    /// A request that cannot be read or parsed ends the connection with an
    /// error and no response.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => {
                    if let Some(req) = self.read_request().await? {
                        self.state = ConnectionState::Processing(req);
                    }
                }

                ConnectionState::Processing(req) => {
                    debug!(
                        method = %req.method,
                        path = %req.path,
                        version = %req.version,
                        headers = req.headers.len(),
                        body = req.body.len(),
                        "Parsed request"
                    );

                    let response = self.router.dispatch(&req).await;
                    info!(
                        method = %req.method,
                        path = %req.path,
                        status = response.status.as_u16(),
                        "Request handled"
                    );

                    self.state = ConnectionState::Writing(ResponseWriter::new(response));
                }

                ConnectionState::Writing(writer) => {
                    let sent = writer.write_to(&mut self.stream).await?;
                    debug!(bytes = sent, "Response written");

                    if let Err(e) = self.stream.shutdown().await {
                        debug!(error = %e, "Shutdown after response failed");
                    }
                }

                ConnectionState::Closed => break,
            }
        }

        Ok(())
    }

    /// Reads until the header block and the declared body are buffered, then
    /// parses them.
    ///
    /// Returns `Ok(None)` if the client closed without sending anything. EOF
    /// in the middle of the headers or body is tolerated and whatever arrived
    /// is parsed.
    pub async fn read_request(&mut self) -> anyhow::Result<Option<Request>> {
        let limits = self.limits;

        let body_start = loop {
            if let Some(end) = find_headers_end(&self.buffer) {
                if end > limits.max_header_bytes {
                    return Err(ParseError::HeadersTooLarge { limit: limits.max_header_bytes }.into());
                }
                break Some(end);
            }

            if self.buffer.len() > limits.max_header_bytes {
                return Err(ParseError::HeadersTooLarge { limit: limits.max_header_bytes }.into());
            }

            if self.fill().await? == 0 {
                if self.buffer.is_empty() {
                    return Ok(None);
                }
                break None;
            }
        };

        if let Some(start) = body_start {
            let declared = declared_content_length(&self.buffer[..start]).unwrap_or(0);
            if declared > limits.max_body_bytes {
                return Err(ParseError::BodyTooLarge {
                    declared,
                    limit: limits.max_body_bytes,
                }
                .into());
            }

            let wanted = start + declared;
            while self.buffer.len() < wanted {
                if self.fill().await? == 0 {
                    break;
                }
            }
        }

        let request = parse_http_request(&self.buffer)?;
        self.buffer.clear();
        Ok(Some(request))
    }

    async fn fill(&mut self) -> anyhow::Result<usize> {
        self.buffer.reserve(READ_CHUNK);
        let n = timeout(self.limits.read_timeout(), self.stream.read_buf(&mut self.buffer))
            .await
            .context("timed out reading request")??;
        Ok(n)
    }
}
