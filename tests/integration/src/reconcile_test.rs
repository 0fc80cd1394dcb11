//! End-to-end reconciliation runs against a mock store.
//!
//! Each test drives the same path the CLI takes: load the declared set,
//! prime the engine, reconcile, and assert on the observable outcome — the
//! requests the store received, the persisted state, and the audit trail.

use std::path::Path;

use press_core::{AuditLog, ContentSet, StateStore, SyncEngine, SyncOptions, SyncReport};
use press_remote::RemoteClient;
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pretty_assertions::assert_eq;

async fn mount_listing(server: &MockServer, route: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/wp-json/wp/v2/{route}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn run_once(server: &MockServer, work_dir: &Path, content: &ContentSet) -> SyncReport {
    let client = RemoteClient::new(&server.uri(), "posts", "editor", "s3cret").unwrap();
    let state = StateStore::load(work_dir.join("state.json"));
    let audit = AuditLog::new(work_dir);
    let mut engine = SyncEngine::new(&client, state, audit).await.unwrap();
    engine.sync(&content.records, &SyncOptions::default()).await
}

#[tokio::test]
async fn first_run_creates_then_second_run_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let content = ContentSet::parse(
        r#"
[[records]]
title = "Process Insight: The CSV Reality Check"
body = "<p>Flatten the data.</p>"
status = "draft"
categories = ["ProductOps"]
"#,
    )
    .unwrap();

    // Run 1: empty store; everything gets created.
    let server = MockServer::start().await;
    mount_listing(&server, "posts", serde_json::json!([])).await;
    mount_listing(&server, "categories", serde_json::json!([])).await;
    mount_listing(&server, "tags", serde_json::json!([])).await;
    Mock::given(method("POST"))
        .and(path("/wp-json/wp/v2/categories"))
        .respond_with(ResponseTemplate::new(201).set_body_json(
            serde_json::json!({"id": 3, "name": "ProductOps"}),
        ))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/wp-json/wp/v2/posts"))
        .and(body_partial_json(serde_json::json!({
            "status": "draft",
            "categories": [3]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(
            serde_json::json!({"id": 942, "link": "https://example.com/?p=942"}),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let report = run_once(&server, dir.path(), &content).await;
    assert!(report.success);
    assert_eq!(report.created, 1);
    assert_eq!(StateStore::load(dir.path().join("state.json")).len(), 1);

    // Run 2: the store now lists the entity and the term; with no
    // intervening changes, zero writes are issued.
    let server2 = MockServer::start().await;
    mount_listing(
        &server2,
        "posts",
        serde_json::json!([{
            "id": 942,
            "title": {"rendered": "Process Insight: The CSV Reality Check"},
            "status": "draft"
        }]),
    )
    .await;
    mount_listing(
        &server2,
        "categories",
        serde_json::json!([{"id": 3, "name": "ProductOps"}]),
    )
    .await;
    mount_listing(&server2, "tags", serde_json::json!([])).await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server2)
        .await;

    let report = run_once(&server2, dir.path(), &content).await;
    assert!(report.success);
    assert_eq!(report.skipped, 1);
    assert!(report.is_noop());
}

#[tokio::test]
async fn remote_curly_quotes_match_local_straight_quotes() {
    let dir = TempDir::new().unwrap();
    let content = ContentSet::parse(
        r#"
[[records]]
title = "Confession: I Don't Hate Blogs"
body = "<p>I hate flat content models.</p>"
status = "published"
"#,
    )
    .unwrap();

    let server = MockServer::start().await;
    // The store renders the apostrophe as a curly-quote entity.
    mount_listing(
        &server,
        "posts",
        serde_json::json!([{
            "id": 952,
            "title": {"rendered": "Confession: I Don&#8217;t Hate Blogs"},
            "status": "publish"
        }]),
    )
    .await;
    mount_listing(&server, "categories", serde_json::json!([])).await;
    mount_listing(&server, "tags", serde_json::json!([])).await;

    // Identity resolved to 952: an update, never a duplicate create.
    Mock::given(method("POST"))
        .and(path("/wp-json/wp/v2/posts/952"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": 952, "link": ""})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/wp-json/wp/v2/posts"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let report = run_once(&server, dir.path(), &content).await;
    assert!(report.success);
    assert_eq!(report.updated, 1);
    assert_eq!(report.created, 0);
}

#[tokio::test]
async fn editing_one_body_updates_that_record_only() {
    let dir = TempDir::new().unwrap();

    let listing = serde_json::json!([
        {"id": 852, "title": {"rendered": "Market Scan"}, "status": "publish"},
        {"id": 942, "title": {"rendered": "Process Insight"}, "status": "publish"}
    ]);

    let original = ContentSet::parse(
        r#"
[[records]]
title = "Market Scan"
body = "<p>v1</p>"
status = "published"

[[records]]
title = "Process Insight"
body = "<p>v1</p>"
status = "published"
"#,
    )
    .unwrap();

    // Seed run: both records get written and fingerprinted.
    let server = MockServer::start().await;
    mount_listing(&server, "posts", listing.clone()).await;
    mount_listing(&server, "categories", serde_json::json!([])).await;
    mount_listing(&server, "tags", serde_json::json!([])).await;
    for id in [852, 942] {
        Mock::given(method("POST"))
            .and(path(format!("/wp-json/wp/v2/posts/{id}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                serde_json::json!({"id": id, "link": ""}),
            ))
            .expect(1)
            .mount(&server)
            .await;
    }
    let report = run_once(&server, dir.path(), &original).await;
    assert_eq!(report.updated, 2);

    // Edit only the second record's body.
    let edited = ContentSet::parse(
        r#"
[[records]]
title = "Market Scan"
body = "<p>v1</p>"
status = "published"

[[records]]
title = "Process Insight"
body = "<p>v2 with the annotated findings</p>"
status = "published"
"#,
    )
    .unwrap();

    let server2 = MockServer::start().await;
    mount_listing(&server2, "posts", listing).await;
    mount_listing(&server2, "categories", serde_json::json!([])).await;
    mount_listing(&server2, "tags", serde_json::json!([])).await;
    // Exactly one update, and only for the edited record.
    Mock::given(method("POST"))
        .and(path("/wp-json/wp/v2/posts/942"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": 942, "link": ""})),
        )
        .expect(1)
        .mount(&server2)
        .await;
    Mock::given(method("POST"))
        .and(path("/wp-json/wp/v2/posts/852"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server2)
        .await;

    let report = run_once(&server2, dir.path(), &edited).await;
    assert!(report.success);
    assert_eq!(report.updated, 1);
    assert_eq!(report.skipped, 1);
}

#[tokio::test]
async fn taxonomy_variants_share_one_provisioned_term() {
    let dir = TempDir::new().unwrap();
    let content = ContentSet::parse(
        r#"
[[records]]
title = "First"
body = "<p>a</p>"
categories = ["AI & Automation"]

[[records]]
title = "Second"
body = "<p>b</p>"
categories = ["ai-automation"]
"#,
    )
    .unwrap();

    let server = MockServer::start().await;
    mount_listing(&server, "posts", serde_json::json!([])).await;
    mount_listing(&server, "categories", serde_json::json!([])).await;
    mount_listing(&server, "tags", serde_json::json!([])).await;

    // The term is created exactly once, by the first record.
    Mock::given(method("POST"))
        .and(path("/wp-json/wp/v2/categories"))
        .respond_with(ResponseTemplate::new(201).set_body_json(
            serde_json::json!({"id": 12, "name": "AI & Automation"}),
        ))
        .expect(1)
        .mount(&server)
        .await;

    // Both payloads carry the single shared term ID.
    Mock::given(method("POST"))
        .and(path("/wp-json/wp/v2/posts"))
        .and(body_partial_json(serde_json::json!({"categories": [12]})))
        .respond_with(ResponseTemplate::new(201).set_body_json(
            serde_json::json!({"id": 1, "link": ""}),
        ))
        .expect(2)
        .mount(&server)
        .await;

    let report = run_once(&server, dir.path(), &content).await;
    assert!(report.success, "errors: {:?}", report.errors);
    assert_eq!(report.created, 2);
}

#[tokio::test]
async fn failed_middle_record_leaves_neighbors_and_state_intact() {
    let dir = TempDir::new().unwrap();
    let content = ContentSet::parse(
        r#"
[[records]]
title = "First"
body = "<p>a</p>"

[[records]]
title = "Second"
body = "<p>b</p>"

[[records]]
title = "Third"
body = "<p>c</p>"
"#,
    )
    .unwrap();

    let server = MockServer::start().await;
    mount_listing(&server, "posts", serde_json::json!([])).await;
    mount_listing(&server, "categories", serde_json::json!([])).await;
    mount_listing(&server, "tags", serde_json::json!([])).await;
    Mock::given(method("POST"))
        .and(path("/wp-json/wp/v2/posts"))
        .and(body_partial_json(serde_json::json!({"title": "First"})))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(serde_json::json!({"id": 101, "link": ""})),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/wp-json/wp/v2/posts"))
        .and(body_partial_json(serde_json::json!({"title": "Second"})))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/wp-json/wp/v2/posts"))
        .and(body_partial_json(serde_json::json!({"title": "Third"})))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(serde_json::json!({"id": 103, "link": ""})),
        )
        .mount(&server)
        .await;

    let report = run_once(&server, dir.path(), &content).await;
    assert!(!report.success);
    assert_eq!(report.created, 2);
    assert_eq!(report.failed, 1);

    let state = StateStore::load(dir.path().join("state.json"));
    assert!(state.fingerprint(101).is_some());
    assert!(state.fingerprint(103).is_some());
    assert_eq!(state.len(), 2);

    let changelog = std::fs::read_to_string(dir.path().join("changelog.txt")).unwrap();
    assert!(changelog.contains("First"));
    assert!(changelog.contains("Third"));
    assert!(!changelog.contains("Second"));

    let errorlog = std::fs::read_to_string(dir.path().join("errorlog.txt")).unwrap();
    assert!(errorlog.contains("Second - Status: 500 - Message: Internal Server Error"));
}
