use super::*;
use anyhow::Result;
use http::header::AUTHORIZATION;
use http::HeaderValue;
use test_case::test_case;

#[tokio::test]
async fn test_body_byte_flip() -> Result<()> {
    let req = signed_request();
    let len = req.body().len();

    for idx in [0, len / 2, len - 1] {
        let mut req = signed_request();
        req.body_mut()[idx] ^= 0x01;
        assert!(
            !verifier().verify_request(&req).await?,
            "flipping byte {idx} must break the signature"
        );
    }
    Ok(())
}

#[test_case("content-type", "text/plain"; "extra signed header")]
#[test_case("x-request-id", "req-43"; "request id")]
#[test_case("x-api-date", "2024-05-06T07:08:09.124Z"; "date")]
#[test_case("x-api-scope", "billing"; "scope")]
#[tokio::test]
async fn test_signed_header_change(name: &'static str, value: &'static str) -> Result<()> {
    // Billing shares the secret so the lookup succeeds and only the signature decides.
    let verifier = RequestVerifier::new(
        Context::new(),
        StaticSecretProvider::new()
            .with_secret(API_KEY, SERVICE, SECRET_KEY)
            .with_secret(API_KEY, "billing", SECRET_KEY),
    );

    let mut req = signed_request();
    req.headers_mut()
        .insert(name, HeaderValue::from_static(value));

    assert!(!verifier.verify_request(&req).await?);
    Ok(())
}

#[test_case("x-api-key,x-api-date,x-api-scope,x-api-algorithm,content-type"; "header dropped")]
#[test_case("x-api-key,x-api-date,x-api-scope,x-api-algorithm,content-type,x-request-id,user-agent"; "header added")]
#[tokio::test]
async fn test_signed_header_list_change(list: &'static str) -> Result<()> {
    let mut req = signed_request();
    req.headers_mut()
        .insert("x-api-signed-headers", HeaderValue::from_static(list));

    assert!(!verifier().verify_request(&req).await?);
    Ok(())
}

#[tokio::test]
async fn test_path_and_query_change() -> Result<()> {
    for uri in [
        "https://hooks.example.com/v1/orders?event=created&retry=0",
        "https://hooks.example.com/v1/orders/?event=deleted&retry=0",
        "https://hooks.example.com/v1/orders/?retry=0&event=created",
    ] {
        let mut req = signed_request();
        *req.uri_mut() = uri.parse()?;
        assert!(
            !verifier().verify_request(&req).await?,
            "{uri} must not verify"
        );
    }
    Ok(())
}

#[tokio::test]
async fn test_wrong_secret() -> Result<()> {
    let verifier = RequestVerifier::new(
        Context::new(),
        StaticSecretProvider::new().with_secret(API_KEY, SERVICE, "another-secret"),
    );

    assert!(!verifier.verify_request(&signed_request()).await?);
    Ok(())
}

#[tokio::test]
async fn test_truncated_signature() -> Result<()> {
    let mut req = signed_request();
    let signature = req.headers()[AUTHORIZATION].to_str()?.to_string();
    req.headers_mut().insert(
        AUTHORIZATION,
        HeaderValue::from_str(&signature[..signature.len() - 1])?,
    );

    assert!(!verifier().verify_request(&req).await?);
    Ok(())
}
