use tokio::io::{AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::http::response::{Body, Response};

const HTTP_VERSION: &str = "HTTP/1.1";

fn serialize_head(resp: &Response) -> Vec<u8> {
    let mut buf = Vec::new();

    // Status line
    let status_line = format!(
        "{} {} {}\r\n",
        HTTP_VERSION,
        resp.status.as_u16(),
        resp.status.reason_phrase()
    );
    buf.extend_from_slice(status_line.as_bytes());

    // Headers
    for (k, v) in resp.headers.iter() {
        buf.extend_from_slice(k.as_bytes());
        buf.extend_from_slice(b": ");
        buf.extend_from_slice(v.as_bytes());
        buf.extend_from_slice(b"\r\n");
    }

    // Header/body separator
    buf.extend_from_slice(b"\r\n");

    buf
}

/// Writes one response: the serialized head, then the body.
pub struct ResponseWriter {
    head: Vec<u8>,
    body: Body,
}

impl ResponseWriter {
    pub fn new(response: Response) -> Self {
        Self {
            head: serialize_head(&response),
            body: response.body,
        }
    }

    /// Writes the response and returns the number of body bytes sent.
    ///
    /// File bodies are copied straight from disk. If the file yields fewer
    /// bytes than Content-Length promised, an error is returned so the
    /// caller drops the connection instead of leaving a short body.
    pub async fn write_to<W>(self, stream: &mut W) -> anyhow::Result<u64>
    where
        W: AsyncWrite + Unpin,
    {
        stream.write_all(&self.head).await?;

        let sent = match self.body {
            Body::Bytes(bytes) => {
                stream.write_all(&bytes).await?;
                bytes.len() as u64
            }
            Body::File { file, len } => {
                let copied = tokio::io::copy(&mut file.take(len), stream).await?;
                if copied != len {
                    anyhow::bail!("file ended after {} of {} bytes", copied, len);
                }
                copied
            }
        };

        stream.flush().await?;
        Ok(sent)
    }
}
