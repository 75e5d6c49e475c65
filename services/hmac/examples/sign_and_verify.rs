// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Sign a webhook delivery and verify it on the receiving side.
//!
//! Run with `RUST_LOG=debug` to see the canonical request and string to sign.

use anyhow::Result;
use hooksign_core::Context;
use hooksign_hmac::{RequestSigner, RequestVerifier, StaticSecretProvider};
use http::Request;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let signer = RequestSigner::new("demo-key", "demo-secret", "orders")
        .with_signed_headers(["content-type", "x-delivery-id"]);

    let req = Request::post("https://hooks.example.com/v1/orders?event=created")
        .header("content-type", "application/json")
        .header("x-delivery-id", "d-0001")
        .body(br#"{"order":1}"#.to_vec())?;
    let mut req = signer.sign_request(req)?;

    for (name, value) in req.headers() {
        println!("{name}: {}", value.to_str().unwrap_or("<sensitive>"));
    }

    let verifier = RequestVerifier::new(
        Context::new(),
        StaticSecretProvider::new().with_secret("demo-key", "orders", "demo-secret"),
    );
    println!("untouched: {}", verifier.verify_request(&req).await?);

    req.body_mut().extend_from_slice(b" ");
    println!("tampered: {}", verifier.verify_request(&req).await?);

    Ok(())
}
