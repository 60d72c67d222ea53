use std::sync::Arc;

use auth::Salt;
use auth::TokenService;
use session_service::account::service::AccountService;
use session_service::config::SessionConfig;
use session_service::inbound::http::router::create_router;
use session_service::outbound::repositories::InMemoryAccountRepository;

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub tokens: Arc<TokenService>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let tokens = Arc::new(TokenService::new(
            Salt::generate().expect("Failed to generate salt"),
        ));
        let account_service = Arc::new(AccountService::new(Arc::new(
            InMemoryAccountRepository::new(),
        )));

        let router = create_router(account_service, Arc::clone(&tokens), SessionConfig::default());

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::builder()
                .cookie_store(true)
                .redirect(reqwest::redirect::Policy::none())
                .build()
                .expect("Failed to create reqwest client"),
            tokens,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with an explicit session cookie and no cookie store
    pub fn get_with_session(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("Failed to create reqwest client")
            .get(&format!("{}{}", self.address, path))
            .header(reqwest::header::COOKIE, format!("user={}", token))
    }
}
