use serde_json::{Value, json};

use crate::helpers::{MAX_UPLOAD_BYTES, error_detail, spawn_app};

#[tokio::test]
async fn create_post_returns_the_stored_view() {
    let app = spawn_app().await;
    let token = app.register_and_login("alice").await;

    let response = app.create_post(&token, "sample_title", "sample_content").await;

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["title"], "sample_title");
    assert_eq!(body["content"], "sample_content");
    assert_eq!(body["published"], false);
    assert!(body["created_at"].is_string());
    assert_eq!(body["users"]["username"], "alice");
    assert_eq!(body["images"], json!([]));
}

#[tokio::test]
async fn create_post_with_taken_title_fails() {
    let app = spawn_app().await;
    let token = app.register_and_login("alice").await;
    assert_eq!(app.create_post(&token, "unique", "a").await.status(), 201);

    let response = app.create_post(&token, "unique", "b").await;

    assert_eq!(response.status(), 400);
    assert_eq!(error_detail(response).await, "Post of this title already exists.");
}

#[tokio::test]
async fn post_lifecycle_end_to_end() {
    let app = spawn_app().await;
    let token = app.register_and_login("alice").await;

    // create unpublished
    let created = app.create_post(&token, "T1", "hello").await;
    assert_eq!(created.status(), 201);
    let post: Value = created.json().await.unwrap();
    assert_eq!(post["published"], false);
    let post_id = post["id"].as_i64().unwrap();

    // publish
    let updated = app
        .client
        .put(format!("{}/blog/update_post/{post_id}/", app.address))
        .bearer_auth(&token)
        .json(&json!({ "published": true }))
        .send()
        .await
        .unwrap();
    assert_eq!(updated.status(), 200);
    let updated: Value = updated.json().await.unwrap();
    assert_eq!(updated["published"], true);
    assert_eq!(updated["content"], "hello");

    // appears in the owner's listing as published
    let listed = app.show_my_posts(&token, "").await;
    assert_eq!(listed.status(), 200);
    let listed: Value = listed.json().await.unwrap();
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["published"], true);

    // delete, then the listing is empty -> 404
    let deleted = app
        .client
        .delete(format!("{}/blog/delete_post/{post_id}/", app.address))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(deleted.status(), 200);

    let empty = app.show_my_posts(&token, "").await;
    assert_eq!(empty.status(), 404);
    assert_eq!(error_detail(empty).await, "You do not have any post.");
}

#[tokio::test]
async fn another_users_post_reads_as_missing() {
    let app = spawn_app().await;
    let alice = app.register_and_login("alice").await;
    let bob = app.register_and_login("bob").await;

    let created = app.create_post(&alice, "alice-post", "hers").await;
    let post: Value = created.json().await.unwrap();
    let post_id = post["id"].as_i64().unwrap();

    let update = app
        .client
        .put(format!("{}/blog/update_post/{post_id}/", app.address))
        .bearer_auth(&bob)
        .json(&json!({ "published": true }))
        .send()
        .await
        .unwrap();
    assert_eq!(update.status(), 404);

    let delete = app
        .client
        .delete(format!("{}/blog/delete_post/{post_id}/", app.address))
        .bearer_auth(&bob)
        .send()
        .await
        .unwrap();
    assert_eq!(delete.status(), 404);
    assert_eq!(
        error_detail(delete).await,
        "Post does not exists or is not yours."
    );

    // Alice still owns an intact post.
    let listed = app.show_my_posts(&alice, "").await;
    assert_eq!(listed.status(), 200);
}

#[tokio::test]
async fn listing_supports_filters_and_sorting() {
    let app = spawn_app().await;
    let alice = app.register_and_login("alice").await;
    let bob = app.register_and_login("bob").await;

    for (title, content) in [
        ("alpha rust", "systems programming"),
        ("beta cooking", "pasta recipes"),
        ("gamma rust", "more systems"),
    ] {
        assert_eq!(app.create_post(&alice, title, content).await.status(), 201);
    }
    assert_eq!(app.create_post(&bob, "bob-post", "rust too").await.status(), 201);

    // substring title filter, scoped to the caller
    let filtered = app.show_my_posts(&alice, "?title__like=rust").await;
    assert_eq!(filtered.status(), 200);
    let filtered: Value = filtered.json().await.unwrap();
    assert_eq!(filtered.as_array().unwrap().len(), 2);

    // content search
    let searched = app.show_my_posts(&alice, "?search=pasta").await;
    let searched: Value = searched.json().await.unwrap();
    assert_eq!(searched.as_array().unwrap().len(), 1);
    assert_eq!(searched[0]["title"], "beta cooking");

    // descending title sort
    let sorted = app.show_my_posts(&alice, "?order_by=-title").await;
    let sorted: Value = sorted.json().await.unwrap();
    let titles: Vec<&str> = sorted
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["gamma rust", "beta cooking", "alpha rust"]);

    // published filter finds nothing yet -> 404
    let published = app.show_my_posts(&alice, "?published=true").await;
    assert_eq!(published.status(), 404);

    // unknown sort keys are rejected, not ignored
    let unknown = app.show_my_posts(&alice, "?order_by=owner").await;
    assert_eq!(unknown.status(), 400);
}

#[tokio::test]
async fn find_post_searches_across_users() {
    let app = spawn_app().await;
    let alice = app.register_and_login("alice").await;
    let bob = app.register_and_login("bob").await;

    assert_eq!(app.create_post(&alice, "alice-post", "hers").await.status(), 201);
    assert_eq!(app.create_post(&bob, "bob-post", "his").await.status(), 201);

    // bob can find alice's posts by owner username
    let found = app.find_post(&bob, "?username=alice").await;
    assert_eq!(found.status(), 200);
    let found: Value = found.json().await.unwrap();
    assert_eq!(found.as_array().unwrap().len(), 1);
    assert_eq!(found[0]["title"], "alice-post");
    assert_eq!(found[0]["users"]["username"], "alice");

    // no criteria returns everything
    let all = app.find_post(&bob, "").await;
    let all: Value = all.json().await.unwrap();
    assert_eq!(all.as_array().unwrap().len(), 2);

    // an unmatched search is 404
    let missing = app.find_post(&bob, "?title__like=nonexistent").await;
    assert_eq!(missing.status(), 404);
    assert_eq!(error_detail(missing).await, "Expected post was not found.");
}

#[tokio::test]
async fn uploads_are_stored_indexed_and_downloadable() {
    let app = spawn_app().await;
    let token = app.register_and_login("alice").await;

    let created = app
        .create_post_with_files(
            &token,
            "with-images",
            "content",
            vec![("first.png", b"first-bytes".to_vec()), ("second.png", b"second".to_vec())],
        )
        .await;
    assert_eq!(created.status(), 201);
    let post: Value = created.json().await.unwrap();

    let images = post["images"].as_array().unwrap();
    assert_eq!(images.len(), 2);
    for image in images {
        assert_eq!(image["content_type"], "image/png");
        assert!(image["size"].as_i64().unwrap() > 0);
        let filename = image["filename"].as_str().unwrap();
        assert!(image["location"].as_str().unwrap().ends_with(filename));

        // authenticated download streams the stored bytes
        let downloaded = app.download_file(&token, filename).await;
        assert_eq!(downloaded.status(), 200);
        assert_eq!(
            downloaded.headers()["content-disposition"],
            format!("attachment; filename={filename}")
        );
        assert!(!downloaded.bytes().await.unwrap().is_empty());

        // the public media URL serves it read-only
        let public = app
            .client
            .get(format!("{}/media/{filename}", app.address))
            .send()
            .await
            .unwrap();
        assert_eq!(public.status(), 200);
    }

    // removing the underlying file makes the download a 404
    let first = images[0]["filename"].as_str().unwrap();
    tokio::fs::remove_file(app.media_root.join(first)).await.unwrap();
    let gone = app.download_file(&token, first).await;
    assert_eq!(gone.status(), 404);
    assert_eq!(error_detail(gone).await, "File was not found.");
}

#[tokio::test]
async fn download_requires_authentication() {
    let app = spawn_app().await;

    let response = app
        .client
        .get(format!("{}/blog/download_file/anything.png/", app.address))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn oversized_upload_leaves_no_trace() {
    let app = spawn_app().await;
    let token = app.register_and_login("alice").await;

    let oversized = vec![0u8; (MAX_UPLOAD_BYTES + 1) as usize];
    let response = app
        .create_post_with_files(
            &token,
            "too-big",
            "content",
            vec![("ok.png", b"small".to_vec()), ("big.png", oversized)],
        )
        .await;

    assert_eq!(response.status(), 400);
    assert!(error_detail(response).await.contains("maximum allowed size"));

    // all-or-nothing: no post row, no indexed image, no file on disk
    assert_eq!(app.show_my_posts(&token, "").await.status(), 404);
    let mut entries = tokio::fs::read_dir(&app.media_root).await.unwrap();
    assert!(entries.next_entry().await.unwrap().is_none());
}
