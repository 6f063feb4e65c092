use tracing::{debug, error, info, warn};

use crate::files::{FileError, FileStore};
use crate::http::encoding;
use crate::http::response::{Response, ResponseBuilder, StatusCode};

const USER_AGENT_PREFIX: &str = "User-Agent: ";

/// Health check: 200 with an empty body.
pub fn root() -> Response {
    Response::ok(Vec::new())
}

/// Echoes `message` back, gzip-compressed when the client accepts it.
pub fn echo<'a>(message: &str, accept_encoding: impl IntoIterator<Item = &'a str>) -> Response {
    let coding = encoding::negotiate(accept_encoding);

    let body = match coding.encode(message.as_bytes()) {
        Ok(body) => body,
        Err(e) => {
            error!(error = %e, "Failed to encode echo body");
            return Response::internal_error();
        }
    };

    let mut builder = ResponseBuilder::new(StatusCode::Ok);
    if let Some(value) = coding.header_value() {
        builder = builder.header("Content-Encoding", value);
    }

    builder
        .header("Content-Type", "text/plain")
        .body(body)
        .build()
}

/// Reflects the User-Agent value.
///
/// Also accepts a whole `User-Agent: ...\r\n` header line and strips it
/// down to the value.
pub fn user_agent(value: &str) -> Response {
    let value = value.strip_prefix(USER_AGENT_PREFIX).unwrap_or(value);
    let value = value.strip_suffix("\r\n").unwrap_or(value);

    Response::text(value)
}

/// Streams a file from the store, or 404s.
pub async fn get_file(files: &FileStore, name: &str) -> Response {
    match files.open(name).await {
        Ok((file, len)) => {
            debug!(file = name, bytes = len, "Serving file");
            ResponseBuilder::new(StatusCode::Ok)
                .header("Content-Type", "application/octet-stream")
                .file(file, len)
                .build()
        }
        Err(FileError::Io(e)) => {
            warn!(file = name, error = %e, "Failed to open file");
            Response::not_found()
        }
        Err(e) => {
            debug!(file = name, error = %e, "File not served");
            Response::not_found()
        }
    }
}

/// Writes `contents` to a file in the store.
///
/// 201 only once the bytes are on disk; a failed write is a 500.
pub async fn post_file(files: &FileStore, name: &str, contents: &[u8]) -> Response {
    match files.write(name, contents).await {
        Ok(path) => {
            info!(file = %path.display(), bytes = contents.len(), "File created");
            Response::created()
        }
        Err(FileError::Io(e)) => {
            error!(file = name, error = %e, "Failed to write file");
            Response::internal_error()
        }
        Err(e) => {
            warn!(file = name, error = %e, "Rejected file write");
            Response::not_found()
        }
    }
}
