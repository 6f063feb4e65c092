use harbor::http::headers::Headers;
use harbor::http::request::{Method, Request, RequestBuilder};

fn request_with(headers: Headers, body: &[u8]) -> Request {
    Request {
        method: Method::POST,
        path: "/files/x".to_string(),
        version: "HTTP/1.1".to_string(),
        headers,
        body: body.to_vec(),
    }
}

#[test]
fn test_request_header_retrieval_case_insensitive() {
    let headers: Headers = [("Host", "example.com"), ("Content-Type", "text/plain")]
        .into_iter()
        .collect();
    let req = request_with(headers, b"");

    assert_eq!(req.header("host"), Some("example.com"));
    assert_eq!(req.header("CONTENT-TYPE"), Some("text/plain"));
    assert_eq!(req.header("Missing"), None);
}

#[test]
fn test_request_header_values_in_arrival_order() {
    let headers: Headers = [("X-A", "1"), ("Other", "z"), ("x-a", "2"), ("X-A", "3")]
        .into_iter()
        .collect();
    let req = request_with(headers, b"");

    let values: Vec<_> = req.headers.get_all("x-A").collect();
    assert_eq!(values, vec!["1", "2", "3"]);
}

#[test]
fn test_request_content_length_parsing() {
    let req = request_with([("Content-Length", "42")].into_iter().collect(), b"");
    assert_eq!(req.content_length(), Some(42));
}

#[test]
fn test_request_content_length_missing() {
    let req = request_with(Headers::new(), b"");
    assert_eq!(req.content_length(), None);
}

#[test]
fn test_request_content_length_invalid() {
    let req = request_with([("Content-Length", "not-a-number")].into_iter().collect(), b"abc");

    assert_eq!(req.content_length(), None);
    assert_eq!(req.payload(), b"abc");
}

#[test]
fn test_request_payload_trimmed_to_content_length() {
    let req = request_with([("Content-Length", "3")].into_iter().collect(), b"abcdef");
    assert_eq!(req.payload(), b"abc");
}

#[test]
fn test_request_payload_shorter_than_declared() {
    let req = request_with([("Content-Length", "10")].into_iter().collect(), b"abc");
    assert_eq!(req.payload(), b"abc");
}

#[test]
fn test_request_method_from_token() {
    assert_eq!(Method::from_token("GET"), Method::GET);
    assert_eq!(Method::from_token("POST"), Method::POST);
    assert_eq!(Method::from_token("get"), Method::Extension("get".to_string())); // Case-sensitive
    assert_eq!(Method::from_token("BREW").as_str(), "BREW");
}

#[test]
fn test_request_builder_defaults_version() {
    let req = RequestBuilder::new()
        .method(Method::GET)
        .path("/")
        .header("User-Agent", "test")
        .build()
        .unwrap();

    assert_eq!(req.version, "HTTP/1.1");
    assert_eq!(req.header("user-agent"), Some("test"));
}

#[test]
fn test_request_builder_requires_method_and_path() {
    assert!(RequestBuilder::new().path("/").build().is_err());
    assert!(RequestBuilder::new().method(Method::GET).build().is_err());
}
