//! Content-coding negotiation and gzip encoding.

use std::io::{self, Write};

use flate2::Compression;
use flate2::write::GzEncoder;

/// Codings the server can apply to a response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentCoding {
    Gzip,
    Identity,
}

impl ContentCoding {
    /// Value for the Content-Encoding header, if one should be sent.
    pub fn header_value(&self) -> Option<&'static str> {
        match self {
            ContentCoding::Gzip => Some("gzip"),
            ContentCoding::Identity => None,
        }
    }

    pub fn encode(&self, body: &[u8]) -> io::Result<Vec<u8>> {
        match self {
            ContentCoding::Gzip => gzip(body),
            ContentCoding::Identity => Ok(body.to_vec()),
        }
    }
}

/// Picks a coding from every Accept-Encoding value the client sent.
///
/// Each value is a comma-separated list of `coding[;q=weight]` entries.
/// gzip is chosen when it is listed with a non-zero weight, or when `*` is
/// listed with a non-zero weight and gzip was not excluded with `q=0`.
/// A weight that does not parse as a number counts as `q=0`.
pub fn negotiate<'a>(accept_encoding: impl IntoIterator<Item = &'a str>) -> ContentCoding {
    let mut gzip = None;
    let mut wildcard = None;

    for entry in accept_encoding.into_iter().flat_map(|v| v.split(',')) {
        let mut params = entry.split(';');
        let coding = params.next().unwrap_or("").trim();
        let q = params
            .filter_map(|p| p.split_once('='))
            .find(|(k, _)| k.trim().eq_ignore_ascii_case("q"))
            .map(|(_, v)| v.trim().parse::<f32>().unwrap_or(0.0))
            .unwrap_or(1.0);

        if coding.eq_ignore_ascii_case("gzip") || coding.eq_ignore_ascii_case("x-gzip") {
            gzip = Some(q);
        } else if coding == "*" {
            wildcard = Some(q);
        }
    }

    match (gzip, wildcard) {
        (Some(q), _) if q > 0.0 => ContentCoding::Gzip,
        (None, Some(q)) if q > 0.0 => ContentCoding::Gzip,
        _ => ContentCoding::Identity,
    }
}

fn gzip(body: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(body)?;
    encoder.finish()
}
