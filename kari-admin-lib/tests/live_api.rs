//! Integration tests against a running Kari API.
//!
//! These tests require real admin credentials and are ignored by default.
//! To run them, create a `.env` file in the kari-admin-lib directory with:
//!
//! ```env
//! KARI_API_URL=http://127.0.0.1:8000/api/v1
//! KARI_USERNAME=admin@kariajuda.com
//! KARI_PASSWORD=your-password
//! ```
//!
//! Then run: `cargo test -p kari-admin-lib -- --ignored`

use std::env;
use std::sync::Arc;

use kari_admin_lib::KariClient;
use kari_admin_lib::auth::PasswordFlow;
use kari_admin_lib::auth::Session;
use kari_admin_lib::auth::TokenProvider;
use kari_admin_lib::error::AuthError;

fn load_env() -> Option<(String, String, String)> {
    let _ = dotenvy::dotenv();

    let url = env::var("KARI_API_URL").ok()?;
    let username = env::var("KARI_USERNAME").ok()?;
    let password = env::var("KARI_PASSWORD").ok()?;

    Some((url, username, password))
}

#[tokio::test]
#[ignore = "requires real credentials in .env file"]
async fn test_password_flow() {
    let (url, username, password) =
        load_env().expect("Missing required environment variables. See module docs.");

    let token = PasswordFlow::new(&url)
        .authenticate(&username, &password)
        .await
        .expect("Authentication failed");

    assert!(
        !token.access_token.is_empty(),
        "Access token should not be empty"
    );
    println!("Token type: {}", token.token_type);
}

#[tokio::test]
#[ignore = "requires real credentials in .env file"]
async fn test_invalid_credentials() {
    let (url, _username, _password) =
        load_env().expect("Missing required environment variables. See module docs.");

    let result = PasswordFlow::new(&url)
        .authenticate("invalid@example.com", "wrongpassword")
        .await;

    assert!(
        matches!(result, Err(AuthError::InvalidCredentials)),
        "Should fail with invalid credentials, got {:?}",
        result
    );
}

#[tokio::test]
#[ignore = "requires real credentials in .env file"]
async fn test_session_fetches_collections() {
    let (url, username, password) =
        load_env().expect("Missing required environment variables. See module docs.");

    let session = Session::new(&url);
    let user = session
        .login(&username, &password)
        .await
        .expect("Login failed");
    println!("Logged in as {} (admin: {})", user.name, user.is_admin);

    let client = KariClient::builder()
        .url(&url)
        .shared_token_provider(Arc::new(session.clone()) as Arc<dyn TokenProvider>)
        .build()
        .expect("Client build failed");

    let campaigns = client.campaigns().await.expect("Fetching campaigns failed");
    let votes = client.votes().await.expect("Fetching votes failed");
    println!("{} campaigns, {} votes", campaigns.len(), votes.len());

    session.logout().await;
    assert!(!session.is_authenticated());
}
