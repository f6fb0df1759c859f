use chrono::{DateTime, Utc};
use serde_json::json;

use crate::common::{listing, TestApp};

mod health {
    use super::*;

    #[tokio::test]
    async fn api_root_reports_liveness() {
        let app = TestApp::spawn().await;

        let res = app.get("").await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["message"], "Real Estate API is running!");
    }
}

mod create {
    use super::*;

    #[tokio::test]
    async fn assigns_id_and_creation_time() {
        let app = TestApp::spawn().await;
        let before = Utc::now();

        let res = app.post("/properties", &listing("Garden House", 250_000.0)).await;

        assert_eq!(res.status, 201);
        assert_eq!(res.body["_id"].as_str().unwrap().len(), 24);
        assert_eq!(res.body["title"], "Garden House");
        assert_eq!(res.body["type"], "House");
        let created_at: DateTime<Utc> = res.body["createdAt"].as_str().unwrap().parse().unwrap();
        assert!(created_at >= before);
    }

    #[tokio::test]
    async fn fractional_bathroom_count_is_stored() {
        let app = TestApp::spawn().await;
        let mut body = listing("Half Bath Cottage", 180_000.0);
        body["bathrooms"] = json!(2.5);

        let res = app.post("/properties", &body).await;

        assert_eq!(res.status, 201);
        assert_eq!(res.body["bathrooms"], 2.5);
        assert_eq!(app.get("/properties").await.body[0]["bathrooms"], 2.5);
    }

    #[tokio::test]
    async fn missing_price_is_rejected_and_nothing_stored() {
        let app = TestApp::spawn().await;
        let mut body = listing("No Price", 0.0);
        body.as_object_mut().unwrap().remove("price");

        let res = app.post("/properties", &body).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        assert!(res.body["message"].as_str().unwrap().contains("price"));
        assert_eq!(app.get("/properties").await.body, json!([]));
    }

    #[tokio::test]
    async fn blank_title_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app.post("/properties", &listing("   ", 10.0)).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["message"], "title is required");
    }

    #[tokio::test]
    async fn status_outside_closed_set_is_rejected() {
        let app = TestApp::spawn().await;
        let mut body = listing("Leased Flat", 10.0);
        body["status"] = json!("Leased");

        let res = app.post("/properties", &body).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn identical_listings_are_both_kept() {
        let app = TestApp::spawn().await;
        let first = app.create(&listing("Twin", 1.0)).await;
        let second = app.create(&listing("Twin", 1.0)).await;

        assert_ne!(first, second);
        assert_eq!(app.get("/properties").await.body.as_array().unwrap().len(), 2);
    }
}

mod list {
    use super::*;

    #[tokio::test]
    async fn newest_first() {
        let app = TestApp::spawn().await;
        let r1 = app.create(&listing("R1", 1.0)).await;
        let r2 = app.create(&listing("R2", 2.0)).await;

        let res = app.get("/properties").await;

        assert_eq!(res.status, 200);
        let ids: Vec<&str> = res
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["_id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec![r2.as_str(), r1.as_str()]);
    }
}

mod update {
    use super::*;

    #[tokio::test]
    async fn status_only_update_leaves_other_fields() {
        let app = TestApp::spawn().await;
        let id = app.create(&listing("Corner House", 320_000.0)).await;
        let before = app.get("/properties").await.body[0].clone();

        let res = app
            .put(&format!("/properties/{}", id), &json!({"status": "Sold"}))
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["status"], "Sold");
        let mut expected = before;
        expected["status"] = json!("Sold");
        assert_eq!(res.body, expected);
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app
            .put(
                "/properties/507f1f77bcf86cd799439011",
                &json!({"status": "Sold"}),
            )
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn malformed_id_is_a_validation_error() {
        let app = TestApp::spawn().await;

        let res = app
            .put("/properties/not-an-id", &json!({"status": "Sold"}))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn empty_body_returns_current_record() {
        let app = TestApp::spawn().await;
        let id = app.create(&listing("Unchanged", 5.0)).await;

        let res = app.put(&format!("/properties/{}", id), &json!({})).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["title"], "Unchanged");
    }

    #[tokio::test]
    async fn id_and_created_at_in_body_are_ignored() {
        let app = TestApp::spawn().await;
        let id = app.create(&listing("Stable", 5.0)).await;
        let before = app.get("/properties").await.body[0].clone();

        let res = app
            .put(
                &format!("/properties/{}", id),
                &json!({
                    "_id": "507f1f77bcf86cd799439011",
                    "createdAt": "2001-01-01T00:00:00Z",
                    "price": 6
                }),
            )
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["_id"], before["_id"]);
        assert_eq!(res.body["createdAt"], before["createdAt"]);
        assert_eq!(res.body["price"], 6.0);
    }

    #[tokio::test]
    async fn invalid_type_value_is_rejected() {
        let app = TestApp::spawn().await;
        let id = app.create(&listing("Typed", 5.0)).await;

        let res = app
            .put(&format!("/properties/{}", id), &json!({"type": "Castle"}))
            .await;

        assert_eq!(res.status, 400);
    }
}

mod delete {
    use super::*;

    #[tokio::test]
    async fn deleting_twice_succeeds_both_times() {
        let app = TestApp::spawn().await;
        let id = app.create(&listing("Short Lived", 9.0)).await;
        let path = format!("/properties/{}", id);

        let first = app.delete(&path).await;
        let second = app.delete(&path).await;

        assert_eq!(first.status, 200);
        assert_eq!(first.body["message"], "Property deleted successfully");
        assert_eq!(second.status, 200);
        assert_eq!(second.body["message"], "Property deleted successfully");
        assert_eq!(app.get("/properties").await.body, json!([]));
    }
}

mod assets {
    use super::*;

    const INDEX: &str = "<html>catalog</html>";

    fn client_build() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), INDEX).unwrap();
        dir
    }

    #[tokio::test]
    async fn unknown_client_paths_get_index_html() {
        let dir = client_build();
        let app = TestApp::spawn_with_assets(dir.path()).await;

        let res = app.get_root("/dashboard").await;

        assert_eq!(res.status, 200);
        assert_eq!(res.text, INDEX);
    }

    #[tokio::test]
    async fn unknown_api_paths_stay_json_not_found() {
        let dir = client_build();
        let app = TestApp::spawn_with_assets(dir.path()).await;

        for path in ["/propertiez", "/properties/abc/extra"] {
            let res = app.get(path).await;

            assert_eq!(res.status, 404, "{}", path);
            assert_eq!(res.body["code"], "NOT_FOUND");
            assert!(!res.text.contains(INDEX));
        }
    }

    #[tokio::test]
    async fn api_routes_still_answer_with_assets_enabled() {
        let dir = client_build();
        let app = TestApp::spawn_with_assets(dir.path()).await;

        let res = app.get("").await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["message"], "Real Estate API is running!");
    }
}

mod routing {
    use super::*;

    #[tokio::test]
    async fn unknown_api_path_is_json_not_found() {
        let app = TestApp::spawn().await;

        let res = app.get("/propertiez").await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
        assert!(res.body["message"].as_str().unwrap().contains("/api/propertiez"));
    }
}
