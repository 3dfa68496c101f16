use std::io::ErrorKind;
use verbfs::http::body::{content_length, read_body};
use verbfs::http::parser::ParseError;
use verbfs::http::request::{Method, Request, RequestBuilder};

fn post_with_length(len: Option<&str>) -> Request {
    let mut builder = RequestBuilder::new().method(Method::Post).path("/x");
    if let Some(len) = len {
        builder = builder.header("Content-Length", len);
    }
    builder.build().unwrap()
}

#[test]
fn test_content_length_parsing() {
    assert_eq!(content_length(&post_with_length(Some("42"))).unwrap(), 42);
    assert_eq!(content_length(&post_with_length(Some("0"))).unwrap(), 0);
}

#[test]
fn test_content_length_missing() {
    let result = content_length(&post_with_length(None));
    assert!(matches!(result, Err(ParseError::MissingContentLength)));
}

#[test]
fn test_content_length_invalid() {
    for bad in ["not-a-number", "-1", "", " 5"] {
        let result = content_length(&post_with_length(Some(bad)));
        assert!(matches!(result, Err(ParseError::InvalidContentLength(_))), "{bad:?}");
    }
}

#[tokio::test]
async fn test_read_exact_length() {
    let mut req = post_with_length(Some("5"));
    let mut input: &[u8] = b"helloworld";

    let body = read_body(&mut input, &mut req).await.unwrap();
    assert_eq!(body, b"hello");
    assert_eq!(req.body.as_deref(), Some(&b"hello"[..]));
    assert_eq!(input, b"world");
}

#[tokio::test]
async fn test_read_zero_length() {
    let mut req = post_with_length(Some("0"));
    let mut input: &[u8] = b"ignored";

    let body = read_body(&mut input, &mut req).await.unwrap();
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_read_binary_body() {
    let mut req = post_with_length(Some("4"));
    let mut input: &[u8] = b"\x00\x01\x02\x03";

    let body = read_body(&mut input, &mut req).await.unwrap();
    assert_eq!(body, &[0, 1, 2, 3]);
}

#[tokio::test]
async fn test_short_body_is_an_error() {
    let mut req = post_with_length(Some("10"));
    let mut input: &[u8] = b"abc";

    let result = read_body(&mut input, &mut req).await;
    match result {
        Err(ParseError::Io(e)) => assert_eq!(e.kind(), ErrorKind::UnexpectedEof),
        other => panic!("expected eof error, got {:?}", other),
    }
    assert!(req.body.is_none());
}

#[tokio::test]
async fn test_body_waits_for_slow_sender() {
    let (mut client, mut server) = tokio::io::duplex(64);
    let mut req = post_with_length(Some("6"));

    let writer = tokio::spawn(async move {
        use tokio::io::AsyncWriteExt;
        client.write_all(b"abc").await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        client.write_all(b"def").await.unwrap();
        client
    });

    let body = read_body(&mut server, &mut req).await.unwrap().to_vec();
    assert_eq!(body, b"abcdef");
    drop(writer.await.unwrap());
}

#[tokio::test]
async fn test_huge_declared_length_is_not_preallocated() {
    // Far beyond what could be allocated up front; only the bytes sent are kept.
    let mut req = post_with_length(Some("100000000000000"));
    let mut input: &[u8] = b"abc";

    let result = read_body(&mut input, &mut req).await;
    match result {
        Err(ParseError::Io(e)) => assert_eq!(e.kind(), ErrorKind::UnexpectedEof),
        other => panic!("expected eof error, got {:?}", other),
    }
    assert!(req.body.is_none());
}
