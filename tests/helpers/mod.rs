//! Shared test helpers for HTTP-level tests.
//!
//! Every `TestApp` runs the gateway router in-process over in-memory
//! stores and a temporary storage root.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use filedesk_api::{build_files_state, build_users_state, gateway_router};
use filedesk_core::config::AppConfig;
use filedesk_core::config::auth::AuthConfig;
use filedesk_core::error::ErrorKind;
use filedesk_core::traits::storage::StorageProvider;
use filedesk_database::repositories::{MemoryAccountStore, MemoryFileRecordStore};
use filedesk_database::{AccountStore, FileRecordStore};
use filedesk_service::{CascadingDeleteCoordinator, LocalCascade};
use filedesk_storage::LocalStorageProvider;

pub const SECRET: &str = "integration-test-secret";
pub const PASSWORD: &str = "Passw0rd1";

/// Status and parsed JSON body of a response.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
    pub bytes: Vec<u8>,
}

/// Test application context
pub struct TestApp {
    pub router: Router,
    pub config: Arc<AppConfig>,
    pub accounts: Arc<dyn AccountStore>,
    pub files: Arc<dyn FileRecordStore>,
    pub storage: Arc<dyn StorageProvider>,
    _root: TempDir,
}

/// Configuration with cheap hashing and a fixed secret.
pub fn test_config(root: &TempDir) -> AppConfig {
    let mut config = AppConfig::default();
    config.auth = AuthConfig {
        jwt_secret: SECRET.to_string(),
        hash_memory_kib: 1024,
        hash_iterations: 1,
        hash_parallelism: 1,
        ..AuthConfig::default()
    };
    config.storage.root_path = root.path().to_string_lossy().into_owned();
    config
}

impl TestApp {
    /// Gateway with in-process cascade over real local storage.
    pub async fn new() -> Self {
        let root = TempDir::new().expect("temp dir");
        let storage: Arc<dyn StorageProvider> = Arc::new(
            LocalStorageProvider::new(&root.path().to_string_lossy())
                .await
                .expect("local storage"),
        );
        Self::with_storage(root, storage, None)
    }

    /// Gateway with a small upload body limit.
    pub async fn with_upload_limit(limit: u64) -> Self {
        let root = TempDir::new().expect("temp dir");
        let mut config = test_config(&root);
        config.storage.max_upload_size_bytes = limit;
        let storage: Arc<dyn StorageProvider> = Arc::new(
            LocalStorageProvider::new(&root.path().to_string_lossy())
                .await
                .expect("local storage"),
        );
        let accounts: Arc<dyn AccountStore> = Arc::new(MemoryAccountStore::new());
        let files: Arc<dyn FileRecordStore> = Arc::new(MemoryFileRecordStore::new());
        let cascade = CascadingDeleteCoordinator::local(LocalCascade::new(
            Arc::clone(&files),
            Arc::clone(&storage),
            Duration::from_secs(5),
        ));
        Self::assemble(root, Arc::new(config), accounts, files, storage, cascade)
    }

    /// Gateway whose cascade reaches files through `cascade_storage` while
    /// the files service itself uses `storage`.
    pub fn with_storage(
        root: TempDir,
        storage: Arc<dyn StorageProvider>,
        cascade_storage: Option<Arc<dyn StorageProvider>>,
    ) -> Self {
        let config = Arc::new(test_config(&root));
        let accounts: Arc<dyn AccountStore> = Arc::new(MemoryAccountStore::new());
        let files: Arc<dyn FileRecordStore> = Arc::new(MemoryFileRecordStore::new());

        let cascade = CascadingDeleteCoordinator::local(LocalCascade::new(
            Arc::clone(&files),
            cascade_storage.unwrap_or_else(|| Arc::clone(&storage)),
            Duration::from_secs(5),
        ));
        Self::assemble(root, config, accounts, files, storage, cascade)
    }

    pub fn assemble(
        root: TempDir,
        config: Arc<AppConfig>,
        accounts: Arc<dyn AccountStore>,
        files: Arc<dyn FileRecordStore>,
        storage: Arc<dyn StorageProvider>,
        cascade: CascadingDeleteCoordinator,
    ) -> Self {
        let users = build_users_state(Arc::clone(&config), Arc::clone(&accounts), Arc::new(cascade))
            .expect("users state");
        let files_state =
            build_files_state(Arc::clone(&config), Arc::clone(&files), Arc::clone(&storage))
                .expect("files state");

        Self {
            router: gateway_router(users, files_state),
            config,
            accounts,
            files,
            storage,
            _root: root,
        }
    }

    /// Send a request with an optional JSON body and bearer token.
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");

        self.send(request).await
    }

    /// Send a prepared request.
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes()
            .to_vec();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        TestResponse {
            status,
            headers,
            body,
            bytes,
        }
    }

    /// Register an account and return its user id.
    pub async fn register(&self, username: &str, role: &str) -> String {
        let response = self
            .request(
                "POST",
                "/users/register",
                Some(serde_json::json!({
                    "username": username,
                    "password": PASSWORD,
                    "role": role,
                })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.body["userId"]
            .as_str()
            .expect("userId")
            .to_string()
    }

    /// Log in and return the bearer token.
    pub async fn login(&self, username: &str) -> String {
        let response = self
            .request(
                "POST",
                "/users/login",
                Some(serde_json::json!({ "username": username, "password": PASSWORD })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.body);
        response.body["token"].as_str().expect("token").to_string()
    }

    /// Register and log in.
    pub async fn account(&self, username: &str, role: &str) -> (String, String) {
        let user_id = self.register(username, role).await;
        let token = self.login(username).await;
        (user_id, token)
    }

    /// Upload through `POST /files` with extra form fields.
    pub async fn upload(
        &self,
        token: &str,
        file_name: &str,
        content: &[u8],
        extra_fields: &[(&str, &str)],
    ) -> TestResponse {
        let (content_type, body) = multipart_body(Some((file_name, content)), extra_fields);
        let request = Request::builder()
            .method("POST")
            .uri("/files")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(body))
            .expect("request");
        self.send(request).await
    }

    /// Whether bytes are still stored under `path`.
    pub async fn is_stored(&self, path: &str) -> bool {
        match self.storage.read(path).await {
            Ok(_) => true,
            Err(e) if e.kind == ErrorKind::NotFound => false,
            Err(e) => panic!("storage read failed: {e}"),
        }
    }
}

const BOUNDARY: &str = "filedesk-test-boundary";

/// Encode a multipart/form-data body.
pub fn multipart_body(file: Option<(&str, &[u8])>, fields: &[(&str, &str)]) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((file_name, content)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    (format!("multipart/form-data; boundary={BOUNDARY}"), body)
}
