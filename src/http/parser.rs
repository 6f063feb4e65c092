use thiserror::Error;

use crate::http::headers::Headers;
use crate::http::request::{Method, Request};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed request line")]
    MalformedRequestLine,
    #[error("header block exceeds {limit} bytes")]
    HeadersTooLarge { limit: usize },
    #[error("declared body of {declared} bytes exceeds {limit} bytes")]
    BodyTooLarge { declared: usize, limit: usize },
}

/// Parses a buffered request.
///
/// The parser is permissive past the request line: header lines without a
/// colon are dropped, and a missing blank line simply ends the header block
/// at the end of input. Everything after the blank line becomes the body,
/// untrimmed; cutting it to `Content-Length` is left to the caller.
pub fn parse_http_request(buf: &[u8]) -> Result<Request, ParseError> {
    let mut lines = Lines::new(buf);

    // Request line
    let request_line = lines.next().ok_or(ParseError::MalformedRequestLine)?;
    let request_line = String::from_utf8_lossy(request_line);
    let mut parts = request_line.split_whitespace();

    let (Some(method), Some(path), Some(version)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(ParseError::MalformedRequestLine);
    };

    // Headers
    let mut headers = Headers::new();
    for line in lines.by_ref() {
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = split_header(line) {
            headers.append(name, value);
        }
    }

    // Body
    let body = buf[lines.offset()..].to_vec();

    Ok(Request {
        method: Method::from_token(method),
        path: path.to_string(),
        version: version.to_string(),
        headers,
        body,
    })
}

/// Returns the offset just past the blank line that ends the header block.
///
/// Both `\r\n\r\n` and bare `\n\n` terminate the block.
pub fn find_headers_end(buf: &[u8]) -> Option<usize> {
    let crlf = buf.windows(3).position(|w| w == b"\n\r\n").map(|i| i + 3);
    let lf = buf.windows(2).position(|w| w == b"\n\n").map(|i| i + 2);

    match (crlf, lf) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

/// Scans a header block for a valid Content-Length without building a
/// full request.
pub fn declared_content_length(head: &[u8]) -> Option<usize> {
    Lines::new(head)
        .skip(1)
        .take_while(|line| !line.is_empty())
        .filter_map(split_header)
        .find(|(name, _)| name.eq_ignore_ascii_case("Content-Length"))
        .and_then(|(_, value)| value.parse().ok())
}

fn split_header(line: &[u8]) -> Option<(String, String)> {
    let line = String::from_utf8_lossy(line);
    let (key, value) = line.split_once(':')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key.to_string(), value.trim().to_string()))
}

/// Iterates over `\n`-separated lines, stripping one trailing `\r`.
struct Lines<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Lines<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Offset of the first byte not yet yielded.
    fn offset(&self) -> usize {
        self.pos
    }
}

impl<'a> Iterator for Lines<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.buf.len() {
            return None;
        }

        let rest = &self.buf[self.pos..];
        let line = match rest.iter().position(|&b| b == b'\n') {
            Some(i) => {
                self.pos += i + 1;
                &rest[..i]
            }
            None => {
                self.pos = self.buf.len();
                rest
            }
        };

        Some(line.strip_suffix(b"\r").unwrap_or(line))
    }
}
