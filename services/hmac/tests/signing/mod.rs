mod round_trip;
mod tamper;

use chrono::{TimeZone, Utc};
use hooksign_core::time::DateTime;
use hooksign_core::Context;
use hooksign_hmac::{RequestSigner, RequestVerifier, StaticSecretProvider};
use http::Request;

pub const API_KEY: &str = "api-key-0001";
pub const SECRET_KEY: &str = "whsec_0123456789abcdef";
pub const SERVICE: &str = "orders";

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn signing_time() -> DateTime {
    Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9)
        .single()
        .expect("must be valid time")
        + chrono::Duration::milliseconds(123)
}

pub fn signer() -> RequestSigner {
    RequestSigner::new(API_KEY, SECRET_KEY, SERVICE)
        .with_signed_headers(["content-type", "x-request-id"])
        .with_time(signing_time())
}

pub fn verifier() -> RequestVerifier<StaticSecretProvider> {
    RequestVerifier::new(
        Context::new(),
        StaticSecretProvider::new().with_secret(API_KEY, SERVICE, SECRET_KEY),
    )
}

/// A typical webhook delivery, signed.
pub fn signed_request() -> Request<Vec<u8>> {
    let req = Request::post("https://hooks.example.com/v1/orders/?event=created&retry=0")
        .header("content-type", "application/json")
        .header("x-request-id", "req-42")
        .header("user-agent", "hooksign-test")
        .body(br#"{"order":42,"state":"created"}"#.to_vec())
        .expect("request must be valid");

    signer().sign_request(req).expect("sign must succeed")
}
