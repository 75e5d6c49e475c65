use anyhow::Result;
use hooksign_core::{Context, ErrorKind, StaticEnv};
use hooksign_hmac::{
    Config, EnvSecretProvider, ProvideSecretChain, RequestSigner, RequestVerifier,
    StaticSecretProvider, HOOKSIGN_API_KEY, HOOKSIGN_SECRET_KEY, HOOKSIGN_SERVICE,
    HOOKSIGN_SIGNED_HEADERS,
};
use http::Request;

fn env_context() -> Context {
    let _ = env_logger::builder().is_test(true).try_init();

    Context::new().with_env(StaticEnv::from_pairs([
        (HOOKSIGN_API_KEY, "env-api-key"),
        (HOOKSIGN_SECRET_KEY, "env-secret"),
        (HOOKSIGN_SERVICE, "orders"),
        (HOOKSIGN_SIGNED_HEADERS, "content-type"),
    ]))
}

#[tokio::test]
async fn test_config_from_env_round_trip() -> Result<()> {
    let ctx = env_context();
    let signer = RequestSigner::from_config(&Config::new().from_env(&ctx))?;

    let req = Request::post("/orders")
        .header("content-type", "application/json")
        .body(b"{}".to_vec())?;
    let req = signer.sign_request(req)?;
    assert_eq!(
        req.headers()["x-api-signed-headers"],
        "x-api-key,x-api-date,x-api-scope,x-api-algorithm,content-type"
    );

    let verifier = RequestVerifier::new(ctx, EnvSecretProvider::new());
    assert!(verifier.verify_request(&req).await?);
    Ok(())
}

#[tokio::test]
async fn test_chain_resolves_from_second_provider() -> Result<()> {
    let ctx = env_context();
    let chain = ProvideSecretChain::new()
        .push(StaticSecretProvider::new().with_secret("partner", "billing", "partner-secret"))
        .push(EnvSecretProvider::new());
    let verifier = RequestVerifier::new(ctx, chain);

    let req = RequestSigner::new("env-api-key", "env-secret", "orders")
        .sign_request(Request::get("/orders/1").body(Vec::new())?)?;
    assert!(verifier.verify_request(&req).await?);

    let req = RequestSigner::new("partner", "partner-secret", "billing")
        .sign_request(Request::get("/invoices/1").body(Vec::new())?)?;
    assert!(verifier.verify_request(&req).await?);

    let req = RequestSigner::new("stranger", "secret", "orders")
        .sign_request(Request::get("/orders/1").body(Vec::new())?)?;
    let err = verifier
        .verify_request(&req)
        .await
        .expect_err("unknown api key must fail");
    assert_eq!(err.kind(), ErrorKind::SecretNotFound);
    Ok(())
}
