use super::*;
use anyhow::Result;
use hooksign_core::SigningRequest;
use hooksign_hmac::canonical::canonical_request;
use hooksign_hmac::{PayloadEncoding, SignedHeaders};
use http::header::AUTHORIZATION;
use http::{HeaderValue, Method};
use pretty_assertions::assert_eq;
use test_case::test_case;

#[tokio::test]
async fn test_round_trip() -> Result<()> {
    init_logger();

    let req = signed_request();
    assert!(verifier().verify_request(&req).await?);
    Ok(())
}

#[test_case(Method::GET, "/", b""; "get root without body")]
#[test_case(Method::GET, "/search?q=a+b&q=c%2Fd&empty=", b""; "query with duplicates")]
#[test_case(Method::PUT, "/files/caf%C3%A9/", "é ü".as_bytes(); "encoded path and utf8 body")]
#[test_case(Method::DELETE, "/orders/42", b"\x00\xff"; "binary body")]
#[test_case(Method::from_bytes(b"PURGE").unwrap(), "/cache", b"all"; "extension method")]
#[tokio::test]
async fn test_round_trip_shapes(method: Method, uri: &str, body: &[u8]) -> Result<()> {
    init_logger();

    let req = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "text/plain")
        .body(body.to_vec())?;
    let req = signer().sign_request(req)?;

    assert!(verifier().verify_request(&req).await?);
    Ok(())
}

#[tokio::test]
async fn test_round_trip_binary_payload_encoding() -> Result<()> {
    let req = Request::post("/upload").body(vec![0xde, 0xad, 0xbe, 0xef])?;
    let req = signer()
        .with_payload_encoding(PayloadEncoding::Binary)
        .sign_request(req)?;

    assert!(verifier()
        .with_payload_encoding(PayloadEncoding::Binary)
        .verify_request(&req)
        .await?);
    // Invalid UTF-8 is read differently by the default encoding.
    assert!(!verifier().verify_request(&req).await?);
    Ok(())
}

#[tokio::test]
async fn test_round_trip_with_current_time() -> Result<()> {
    let req = Request::post("/orders").body(b"{}".to_vec())?;
    let req = RequestSigner::new(API_KEY, SECRET_KEY, SERVICE).sign_request(req)?;

    assert!(verifier().verify_request(&req).await?);
    Ok(())
}

#[tokio::test]
async fn test_unsigned_headers_are_ignored() -> Result<()> {
    let mut req = signed_request();
    req.headers_mut()
        .insert("x-forwarded-for", HeaderValue::from_static("10.0.0.1"));
    req.headers_mut()
        .insert("user-agent", HeaderValue::from_static("proxy/1.0"));

    assert!(verifier().verify_request(&req).await?);
    Ok(())
}

#[tokio::test]
async fn test_header_order_does_not_matter() -> Result<()> {
    let req = signed_request();
    let (mut parts, body) = req.into_parts();

    let mut reversed = http::HeaderMap::new();
    let entries: Vec<_> = parts
        .headers
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    for (k, v) in entries.into_iter().rev() {
        reversed.append(k, v);
    }
    parts.headers = reversed;

    assert!(verifier().verify(&parts, &body).await?);
    Ok(())
}

#[tokio::test]
async fn test_signed_header_list_case_and_order_is_free() -> Result<()> {
    let mut req = signed_request();
    req.headers_mut().insert(
        "x-api-signed-headers",
        HeaderValue::from_static(
            "X-Request-Id, content-type,X-API-ALGORITHM,x-api-scope,x-api-date,x-api-key",
        ),
    );

    assert!(verifier().verify_request(&req).await?);
    Ok(())
}

#[test]
fn test_canonical_request_is_deterministic() -> Result<()> {
    let req = signed_request();
    let (parts, body) = req.into_parts();
    let signing = SigningRequest::from_parts(&parts);
    let signed = SignedHeaders::parse(parts.headers["x-api-signed-headers"].to_str()?);

    let first = canonical_request(&signing, &signed, &body, PayloadEncoding::Utf8);
    let second = canonical_request(&signing, &signed, &body, PayloadEncoding::Utf8);
    assert_eq!(first, second);

    let expected = format!(
        "POST\n/v1/orders/\nevent=created&retry=0\n\
         content-type:application/json\n\
         x-api-algorithm:HMAC-SHA256\n\
         x-api-date:2024-05-06T07:08:09.123Z\n\
         x-api-key:api-key-0001\n\
         x-api-scope:orders\n\
         x-request-id:req-42\n\n\
         content-type;x-api-algorithm;x-api-date;x-api-key;x-api-scope;x-request-id\n\
         {}",
        hooksign_core::hash::hex_sha256(&body)
    );
    assert_eq!(first, expected);

    let signature = hooksign_hmac::signature(
        SECRET_KEY,
        SERVICE,
        signing_time(),
        &hooksign_hmac::string_to_sign(SERVICE, signing_time(), &first),
    );
    assert_eq!(parts.headers[AUTHORIZATION], signature.as_str());
    Ok(())
}

#[tokio::test]
async fn test_round_trip_bytes_body() -> Result<()> {
    let body = bytes::Bytes::from_static(b"event=created&id=42");
    let req = Request::post("/forms")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(body.clone())?;
    let req = signer().sign_request(req)?;

    assert!(verifier().verify_request(&req).await?);
    assert_eq!(req.body(), &body);
    Ok(())
}

#[tokio::test]
async fn test_round_trip_declared_charset() -> Result<()> {
    let req = Request::post("/notes")
        .header("content-type", "text/plain; charset=iso-8859-1")
        .body(b"caf\xe9 cr\xe8me".to_vec())?;
    let req = signer()
        .with_payload_encoding(PayloadEncoding::Declared)
        .sign_request(req)?;

    assert!(verifier()
        .with_payload_encoding(PayloadEncoding::Declared)
        .verify_request(&req)
        .await?);
    Ok(())
}
