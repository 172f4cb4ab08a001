#![allow(dead_code)]

use std::net::TcpListener;
use std::path::PathBuf;
use std::sync::Arc;

use chirpy::configuration::{
    ApplicationSettings, DatabaseSettings, JwtSettings, Settings, WebhookSettings,
};
use chirpy::startup::run;
use chirpy::store::MemoryStore;
use serde_json::{json, Value};

pub const JWT_SECRET: &str = "test-secret-key-at-least-32-characters-long";
pub const POLKA_KEY: &str = "f271c81ff7084ee5b99a5091b42d486e";
pub const INDEX_HTML: &str = "<html><body><h1>Welcome to Chirpy</h1></body></html>";

pub struct TestApp {
    pub address: String,
    pub store: Arc<MemoryStore>,
    pub client: reqwest::Client,
}

pub async fn spawn_app() -> TestApp {
    spawn_app_on_platform("dev").await
}

pub async fn spawn_app_on_platform(platform: &str) -> TestApp {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let settings = test_settings(platform, port);
    let store = Arc::new(MemoryStore::new());
    let server = run(listener, store.clone(), settings).expect("Failed to bind address");
    let _ = tokio::spawn(server);

    TestApp {
        address,
        store,
        client: reqwest::Client::new(),
    }
}

fn test_settings(platform: &str, port: u16) -> Settings {
    Settings {
        database: DatabaseSettings {
            username: "postgres".to_string(),
            password: "password".to_string(),
            port: 5432,
            host: "localhost".to_string(),
            database_name: "chirpy".to_string(),
        },
        application: ApplicationSettings {
            host: "127.0.0.1".to_string(),
            port,
            platform: platform.to_string(),
            filepath_root: static_root().to_string_lossy().into_owned(),
        },
        jwt: JwtSettings {
            secret: JWT_SECRET.to_string(),
            access_token_expiry: 3600,
            refresh_token_expiry: 60 * 24 * 60 * 60,
        },
        webhook: WebhookSettings {
            polka_key: POLKA_KEY.to_string(),
        },
    }
}

fn static_root() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("chirpy-test-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).expect("Failed to create static dir");
    std::fs::write(dir.join("index.html"), INDEX_HTML).expect("Failed to write index.html");
    dir
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn post_user(&self, email: &str, password: &str) -> reqwest::Response {
        self.client
            .post(self.url("/api/users"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_login(&self, email: &str, password: &str) -> reqwest::Response {
        self.client
            .post(self.url("/api/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// Register and log in; returns the login body
    pub async fn signed_in_user(&self, email: &str, password: &str) -> Value {
        let response = self.post_user(email, password).await;
        assert_eq!(201, response.status().as_u16());

        let response = self.post_login(email, password).await;
        assert_eq!(200, response.status().as_u16());
        response.json().await.expect("Failed to parse login response")
    }

    pub async fn post_chirp(&self, token: &str, body: &str) -> reqwest::Response {
        self.client
            .post(self.url("/api/chirps"))
            .bearer_auth(token)
            .json(&json!({ "body": body }))
            .send()
            .await
            .expect("Failed to execute request.")
    }
}
