use harbor::http::response::{Body, Response, ResponseBuilder, StatusCode};
use harbor::http::writer::ResponseWriter;

async fn serialize(response: Response) -> Vec<u8> {
    let mut out = Vec::new();
    ResponseWriter::new(response).write_to(&mut out).await.unwrap();
    out
}

#[test]
fn test_status_code_as_u16() {
    assert_eq!(StatusCode::Ok.as_u16(), 200);
    assert_eq!(StatusCode::Created.as_u16(), 201);
    assert_eq!(StatusCode::NotFound.as_u16(), 404);
    assert_eq!(StatusCode::InternalServerError.as_u16(), 500);
}

#[test]
fn test_status_code_reason_phrase() {
    assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    assert_eq!(StatusCode::Created.reason_phrase(), "Created");
    assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
    assert_eq!(
        StatusCode::InternalServerError.reason_phrase(),
        "Internal Server Error"
    );
}

#[test]
fn test_response_builder_with_headers() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Type", "text/plain")
        .header("X-Custom", "value")
        .body(b"test".to_vec())
        .build();

    assert_eq!(response.headers.get("content-type"), Some("text/plain"));
    assert_eq!(response.headers.get("X-Custom"), Some("value"));
}

#[test]
fn test_response_builder_auto_content_length() {
    let body = b"This is the body".to_vec();
    let response = ResponseBuilder::new(StatusCode::Ok)
        .body(body.clone())
        .build();

    assert_eq!(
        response.headers.get("Content-Length"),
        Some(body.len().to_string().as_str())
    );
}

#[test]
fn test_response_builder_overrides_wrong_content_length() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("content-length", "999")
        .body(b"test".to_vec())
        .build();

    let lengths: Vec<_> = response.headers.get_all("Content-Length").collect();
    assert_eq!(lengths, vec!["4"]);
}

#[test]
fn test_response_builder_empty_body() {
    let response = ResponseBuilder::new(StatusCode::Created).build();

    assert!(response.body.is_empty());
    assert_eq!(response.headers.get("Content-Length"), Some("0"));
}

#[test]
fn test_response_helpers_have_empty_bodies() {
    for (response, status) in [
        (Response::created(), StatusCode::Created),
        (Response::not_found(), StatusCode::NotFound),
        (Response::internal_error(), StatusCode::InternalServerError),
    ] {
        assert_eq!(response.status, status);
        assert_eq!(response.body.as_bytes(), Some(&b""[..]));
    }
}

#[test]
fn test_response_text_helper() {
    let response = Response::text("abc");

    assert_eq!(response.status, StatusCode::Ok);
    assert_eq!(response.headers.get("Content-Type"), Some("text/plain"));
    assert!(matches!(&response.body, Body::Bytes(b) if b == b"abc"));
}

#[tokio::test]
async fn test_writer_serializes_head_in_order() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Type", "text/plain")
        .body("abc")
        .build();

    let out = serialize(response).await;
    assert_eq!(
        out,
        b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 3\r\n\r\nabc".to_vec()
    );
}

#[tokio::test]
async fn test_writer_not_found() {
    let out = serialize(Response::not_found()).await;
    assert_eq!(out, b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\n\r\n".to_vec());
}

#[tokio::test]
async fn test_writer_streams_file_body() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blob");
    let contents = vec![0u8, 10, 13, 255, 0, 42];
    std::fs::write(&path, &contents).unwrap();

    let file = tokio::fs::File::open(&path).await.unwrap();
    let response = ResponseBuilder::new(StatusCode::Ok)
        .file(file, contents.len() as u64)
        .build();
    assert_eq!(response.headers.get("Content-Length"), Some("6"));

    let out = serialize(response).await;
    assert!(out.ends_with(&contents));
}

#[tokio::test]
async fn test_writer_rejects_short_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("short");
    std::fs::write(&path, b"abc").unwrap();

    let file = tokio::fs::File::open(&path).await.unwrap();
    let response = ResponseBuilder::new(StatusCode::Ok).file(file, 10).build();

    let mut out = Vec::new();
    assert!(ResponseWriter::new(response).write_to(&mut out).await.is_err());
}
