use std::path::PathBuf;

use fake::Fake;
use fake::faker::name::en::Name;
use secrecy::Secret;
use serde_json::{Value, json};
use uuid::Uuid;

use inkpress_adapters::{
    FsMediaStore, HashMapPostStore, HashMapUserStore, TokenConfig, TokenIssuer,
};
use inkpress_axum::UploadLimit;
use inkpress_blog_service::BlogService;

pub const TEST_PASSWORD: &str = "password123";
pub const MAX_UPLOAD_BYTES: u64 = 64 * 1024;

/// A blog service running on an ephemeral port, with in-memory stores and a
/// throwaway media directory.
pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
    pub media_root: PathBuf,
}

pub async fn spawn_app() -> TestApp {
    let user_store = HashMapUserStore::new();
    let post_store = HashMapPostStore::new();

    let media_root =
        std::env::temp_dir().join(format!("inkpress-api-{}", Uuid::new_v4().simple()));
    let media_store = FsMediaStore::create(media_root.clone(), "/media")
        .await
        .expect("Failed to create media root");

    let tokens = TokenIssuer::new(
        TokenConfig::new(
            Secret::from("test-access-secret".to_string()),
            Secret::from("test-refresh-secret".to_string()),
            "HS256",
            30,
            60 * 24 * 7,
        )
        .expect("Failed to build token config"),
    );

    let service = BlogService::new(
        user_store,
        post_store,
        media_store,
        tokens,
        UploadLimit(MAX_UPLOAD_BYTES),
        Some(media_root.clone()),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let address = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(service.run_standalone(listener, None));

    TestApp {
        address,
        client: reqwest::Client::new(),
        media_root,
    }
}

impl TestApp {
    pub async fn register(&self, username: &str) -> reqwest::Response {
        let full_name: String = Name().fake();
        self.client
            .post(format!("{}/admin/register/", self.address))
            .json(&json!({
                "username": username,
                "full_name": full_name,
                "email": format!("{username}@example.com"),
                "password": TEST_PASSWORD,
                "password_confirm": TEST_PASSWORD,
            }))
            .send()
            .await
            .expect("Failed to execute register request")
    }

    pub async fn login(&self, username: &str, password: &str) -> reqwest::Response {
        self.client
            .post(format!("{}/admin/login/", self.address))
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .expect("Failed to execute login request")
    }

    /// Register a fresh user and return their access token.
    pub async fn register_and_login(&self, username: &str) -> String {
        assert_eq!(self.register(username).await.status(), 201);
        let (access, _refresh) = self.login_tokens(username).await;
        access
    }

    /// Log in and return the (access, refresh) token pair.
    pub async fn login_tokens(&self, username: &str) -> (String, String) {
        let response = self.login(username, TEST_PASSWORD).await;
        assert_eq!(response.status(), 200);
        let body: Value = response.json().await.expect("login body was not json");
        (
            body["access_token"].as_str().expect("no access token").to_string(),
            body["refresh_token"].as_str().expect("no refresh token").to_string(),
        )
    }

    pub async fn create_post(&self, token: &str, title: &str, content: &str) -> reqwest::Response {
        let form = reqwest::multipart::Form::new()
            .text("title", title.to_string())
            .text("content", content.to_string());
        self.send_create_post(token, form).await
    }

    pub async fn create_post_with_files(
        &self,
        token: &str,
        title: &str,
        content: &str,
        files: Vec<(&str, Vec<u8>)>,
    ) -> reqwest::Response {
        let mut form = reqwest::multipart::Form::new()
            .text("title", title.to_string())
            .text("content", content.to_string());
        for (name, bytes) in files {
            let part = reqwest::multipart::Part::bytes(bytes)
                .file_name(name.to_string())
                .mime_str("image/png")
                .expect("valid mime");
            form = form.part("image", part);
        }
        self.send_create_post(token, form).await
    }

    async fn send_create_post(
        &self,
        token: &str,
        form: reqwest::multipart::Form,
    ) -> reqwest::Response {
        self.client
            .post(format!("{}/blog/create_post/", self.address))
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await
            .expect("Failed to execute create_post request")
    }

    pub async fn show_my_posts(&self, token: &str, query: &str) -> reqwest::Response {
        self.client
            .get(format!("{}/blog/show_my_posts/{query}", self.address))
            .bearer_auth(token)
            .send()
            .await
            .expect("Failed to execute show_my_posts request")
    }

    pub async fn find_post(&self, token: &str, query: &str) -> reqwest::Response {
        self.client
            .get(format!("{}/blog/find_post/{query}", self.address))
            .bearer_auth(token)
            .send()
            .await
            .expect("Failed to execute find_post request")
    }

    pub async fn download_file(&self, token: &str, file_name: &str) -> reqwest::Response {
        self.client
            .get(format!("{}/blog/download_file/{file_name}/", self.address))
            .bearer_auth(token)
            .send()
            .await
            .expect("Failed to execute download request")
    }
}

/// The `detail` message of an error body.
pub async fn error_detail(response: reqwest::Response) -> String {
    let body: Value = response.json().await.expect("error body was not json");
    body["detail"].as_str().expect("no detail field").to_string()
}
