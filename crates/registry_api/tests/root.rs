mod base;

use actix_http::StatusCode;
use actix_web::test;

#[tokio::test]
async fn api_not_found() -> anyhow::Result<()> {
    base::with_db(async |db| {
        let app = base::get_app(db).await;
        let req = test::TestRequest::get().uri("/api/unknown").to_request();

        let resp = test::call_service(&app, req).await;
        let status_code = resp.status();

        let body = test::read_body(resp).await;
        let error: base::ErrorResponse = serde_json::from_slice(&body)?;

        assert_eq!(status_code, StatusCode::NOT_FOUND);
        assert_eq!(error.r#type, 301);
        assert_eq!(error.message, "not found");
        assert!(!error.request_id.is_empty());

        anyhow::Ok(())
    })
    .await
}

#[tokio::test]
async fn page_not_found() -> anyhow::Result<()> {
    base::with_db(async |db| {
        let app = base::get_app(db).await;
        let req = test::TestRequest::get().uri("/unknown/page").to_request();

        let resp = test::call_service(&app, req).await;
        let status_code = resp.status();
        let content_type = resp
            .headers()
            .get("content-type")
            .and_then(|h| h.to_str().ok())
            .map(ToOwned::to_owned);

        let body = test::read_body(resp).await;
        let body = String::from_utf8(body.to_vec())?;

        assert_eq!(status_code, StatusCode::NOT_FOUND);
        assert_eq!(content_type.as_deref(), Some("text/html; charset=utf-8"));
        assert!(body.contains("404"));

        anyhow::Ok(())
    })
    .await
}

#[tokio::test]
async fn home_page_counts() -> anyhow::Result<()> {
    base::with_db(async |db| {
        let app = base::get_app(db).await;
        let category_id = base::add_category(&app, "Music", "Live music").await?;
        base::add_event(&app, "Concert", &category_id).await?;

        let req = test::TestRequest::get().uri("/").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = test::read_body(resp).await;
        let body = String::from_utf8(body.to_vec())?;

        assert!(body.contains("<tr><th>Categories</th><td>1</td></tr>"));
        assert!(body.contains("<tr><th>Events</th><td>1</td></tr>"));
        assert!(body.contains("<tr><th>Records created</th><td>2</td></tr>"));
        assert!(body.contains("<tr><th>Records deleted</th><td>0</td></tr>"));

        anyhow::Ok(())
    })
    .await
}
