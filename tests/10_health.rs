mod common;

use anyhow::Result;
use reqwest::StatusCode;

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/health", server.base_url))
        .send()
        .await?;

    // We consider OK or SERVICE_UNAVAILABLE acceptable as a basic liveness check
    assert!(
        res.status() == StatusCode::OK || res.status() == StatusCode::SERVICE_UNAVAILABLE,
        "unexpected status: {}",
        res.status()
    );

    // Should be valid JSON
    let _body = res.json::<serde_json::Value>().await?;
    Ok(())
}

#[tokio::test]
async fn root_lists_unit_endpoints() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client.get(format!("{}/", server.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["success"], true);
    assert!(body["data"]["endpoints"]["organization_units"]
        .as_str()
        .unwrap()
        .contains("/api/organization_units"));
    Ok(())
}

#[tokio::test]
async fn protected_routes_require_a_token() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/organization_units", server.base_url))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["code"], "UNAUTHORIZED");
    Ok(())
}

#[tokio::test]
async fn valid_token_passes_authentication() -> Result<()> {
    use identity_api_rust::auth::{generate_jwt, Claims};
    use uuid::Uuid;

    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    // Test process and server share the development jwt secret
    let token = generate_jwt(Claims::new(Uuid::new_v4(), Uuid::new_v4()))?;

    let res = client
        .get(format!("{}/api/organization_units", server.base_url))
        .bearer_auth(token)
        .send()
        .await?;

    // Without a database the handler may fail downstream, but the token
    // itself must clear the auth middleware
    assert_ne!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}
