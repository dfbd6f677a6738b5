//! Files service: upload ownership, per-file access and downloads.

mod helpers;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use uuid::Uuid;

use filedesk_database::FileRecordStore;

use helpers::{TestApp, multipart_body};

#[tokio::test]
async fn upload_owner_comes_from_the_token() {
    let app = TestApp::new().await;
    let (owner_id, token) = app.account("alice", "User").await;
    let (other_id, _) = app.account("bruno", "User").await;

    let response = app
        .upload(
            &token,
            "notes.txt",
            b"hello",
            &[("userId", other_id.as_str()), ("user_id", other_id.as_str())],
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
    assert_eq!(response.body["userId"], owner_id.as_str());
    assert_eq!(response.body["fileName"], "notes.txt");
    assert_eq!(response.body["mimeType"], "text/plain");
    assert_eq!(response.body["sizeBytes"], 5);
    assert!(response.body.get("storagePath").is_none());

    assert!(app.files.list_by_owner(&other_id).await.unwrap().is_empty());
    assert_eq!(app.files.list_by_owner(&owner_id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn upload_without_file_part_is_rejected() {
    let app = TestApp::new().await;
    let (_, token) = app.account("carla", "User").await;

    let (content_type, body) = multipart_body(None, &[("description", "nothing here")]);
    let request = Request::builder()
        .method("POST")
        .uri("/files")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body))
        .unwrap();
    let response = app.send(request).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "No file uploaded");

    let not_multipart = app
        .request("POST", "/files", Some(serde_json::json!({})), Some(&token))
        .await;
    assert_eq!(not_multipart.status, StatusCode::BAD_REQUEST);
    assert_eq!(not_multipart.body["message"], "No file uploaded");
}

#[tokio::test]
async fn listing_shows_only_own_files() {
    let app = TestApp::new().await;
    let (_, alice) = app.account("dora", "User").await;
    let (_, bob) = app.account("eli", "User").await;

    app.upload(&alice, "a.txt", b"a", &[]).await;
    app.upload(&alice, "b.txt", b"b", &[]).await;
    app.upload(&bob, "c.txt", b"c", &[]).await;

    let listed = app.request("GET", "/files", None, Some(&alice)).await;
    assert_eq!(listed.status, StatusCode::OK);
    let names: Vec<&str> = listed
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["fileName"].as_str().unwrap())
        .collect();
    assert_eq!(names.len(), 2);
    assert!(!names.contains(&"c.txt"));

    let anonymous = app.request("GET", "/files", None, None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn only_owner_or_admin_may_delete() {
    let app = TestApp::new().await;
    let (_, owner) = app.account("fay", "User").await;
    let (_, stranger) = app.account("gus", "User").await;
    let (_, admin) = app.account("hal", "Admin").await;

    let uploaded = app.upload(&owner, "doc.pdf", b"%PDF", &[]).await;
    let id = uploaded.body["id"].as_str().unwrap().to_string();
    let uri = format!("/files/{id}");

    let denied = app.request("DELETE", &uri, None, Some(&stranger)).await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);
    assert_eq!(denied.body["message"], "Forbidden");

    let deleted = app.request("DELETE", &uri, None, Some(&admin)).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["message"], "File deleted successfully");

    let again = app.request("DELETE", &uri, None, Some(&owner)).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
    assert_eq!(again.body["message"], "File not found");
}

#[tokio::test]
async fn delete_removes_stored_bytes() {
    let app = TestApp::new().await;
    let (owner_id, owner) = app.account("ian", "User").await;

    let uploaded = app.upload(&owner, "x.bin", b"payload", &[]).await;
    let id: Uuid = uploaded.body["id"].as_str().unwrap().parse().unwrap();
    let record = app.files.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(record.user_id, owner_id);
    assert!(app.is_stored(&record.storage_path).await);

    let deleted = app
        .request("DELETE", &format!("/files/{id}"), None, Some(&owner))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert!(!app.is_stored(&record.storage_path).await);
}

#[tokio::test]
async fn download_streams_bytes_with_headers() {
    let app = TestApp::new().await;
    let (_, owner) = app.account("jon", "User").await;
    let (_, stranger) = app.account("kim", "User").await;
    let (_, admin) = app.account("lou", "Admin").await;

    let uploaded = app.upload(&owner, "photo.png", b"\x89PNGdata", &[]).await;
    let id = uploaded.body["id"].as_str().unwrap().to_string();
    let uri = format!("/files/{id}/download");

    for token in [&owner, &admin] {
        let response = app.request("GET", &uri, None, Some(token)).await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.bytes, b"\x89PNGdata");
        assert_eq!(response.headers[header::CONTENT_TYPE], "image/png");
        assert_eq!(
            response.headers[header::CONTENT_DISPOSITION],
            "attachment; filename=\"photo.png\""
        );
    }

    let denied = app.request("GET", &uri, None, Some(&stranger)).await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);

    let missing = app
        .request(
            "GET",
            &format!("/files/{}/download", Uuid::new_v4()),
            None,
            Some(&owner),
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn uploaded_path_segments_are_stripped_from_names() {
    let app = TestApp::new().await;
    let (_, token) = app.account("max", "User").await;
    let response = app.upload(&token, "../../etc/passwd", b"x", &[]).await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["fileName"], "passwd");
}

#[tokio::test]
async fn upload_over_the_body_limit_is_413() {
    let app = TestApp::with_upload_limit(1024).await;
    let (owner_id, owner) = app.account("lena", "User").await;

    let small = app.upload(&owner, "small.txt", b"fits", &[]).await;
    assert_eq!(small.status, StatusCode::CREATED);

    let big = vec![b'x'; 8 * 1024];
    let response = app.upload(&owner, "big.bin", &big, &[]).await;
    assert_eq!(response.status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(response.body["message"], "File too large");
    assert_eq!(app.files.list_by_owner(&owner_id).await.unwrap().len(), 1);
}
