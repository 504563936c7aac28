mod base;

use std::collections::HashSet;

use actix_web::test;
use base::{Category, DeleteResponse, Event, StatusResponse};
use registry_lib::human_id::{self, HumanIdKind};

async fn list_categories<S, B>(app: &S) -> anyhow::Result<Vec<Category<Event>>>
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse<B>,
            Error = actix_web::Error,
        >,
    B: actix_web::body::MessageBody,
{
    let req = test::TestRequest::get().uri("/api/category/list").to_request();
    base::call_json(app, req).await
}

#[tokio::test]
async fn add_generates_distinct_ids() -> anyhow::Result<()> {
    base::with_db(async |db| {
        let app = base::get_app(db).await;

        let mut ids = HashSet::new();
        for i in 0..20 {
            let id = base::add_category(&app, &format!("Category {i}"), "").await?;
            assert!(human_id::is_human_id(HumanIdKind::Category, &id), "invalid id: {id}");
            ids.insert(id);
        }
        assert_eq!(ids.len(), 20);

        let categories = list_categories(&app).await?;
        assert_eq!(categories.len(), 20);

        anyhow::Ok(())
    })
    .await
}

#[tokio::test]
async fn add_defaults() -> anyhow::Result<()> {
    base::with_db(async |db| {
        let app = base::get_app(db).await;
        let id = base::add_category(&app, "Sport", "Outdoor sports").await?;

        let categories = list_categories(&app).await?;
        let [category] = categories.as_slice() else {
            anyhow::bail!("expected one category, got {categories:?}");
        };

        assert_eq!(category.id, id);
        assert_eq!(category.name, "Sport");
        assert_eq!(category.description.as_deref(), Some("Outdoor sports"));
        assert_eq!(category.image, "image1.jpg");
        assert!(category.event_list.is_empty());

        anyhow::Ok(())
    })
    .await
}

#[tokio::test]
async fn add_invalid_name() -> anyhow::Result<()> {
    base::with_db(async |db| {
        let app = base::get_app(db).await;

        let req = test::TestRequest::post()
            .uri("/api/category/add")
            .set_json(serde_json::json!({ "name": "Bad!Name", "description": "x" }))
            .to_request();
        let res: StatusResponse = base::call_json(&app, req).await?;

        assert_eq!(res.status, "Invalid name format. Name must be alphanumeric.");
        assert!(list_categories(&app).await?.is_empty());

        anyhow::Ok(())
    })
    .await
}

#[tokio::test]
async fn update_category() -> anyhow::Result<()> {
    base::with_db(async |db| {
        let app = base::get_app(db).await;
        let id = base::add_category(&app, "Sport", "Outdoor sports").await?;

        let req = test::TestRequest::put()
            .uri("/api/category/update")
            .set_json(serde_json::json!({
                "categoryId": id,
                "name": "Indoor Sport",
                "description": "Indoor sports",
            }))
            .to_request();
        let res: StatusResponse = base::call_json(&app, req).await?;
        assert_eq!(res.status, "Update successfully");

        let categories = list_categories(&app).await?;
        assert_eq!(categories[0].name, "Indoor Sport");
        assert_eq!(categories[0].description.as_deref(), Some("Indoor sports"));

        anyhow::Ok(())
    })
    .await
}

#[tokio::test]
async fn update_without_description() -> anyhow::Result<()> {
    base::with_db(async |db| {
        let app = base::get_app(db).await;
        let id = base::add_category(&app, "Sport", "Outdoor sports").await?;

        let req = test::TestRequest::put()
            .uri("/api/category/update")
            .set_json(serde_json::json!({
                "categoryId": id,
                "name": "Team Sport",
            }))
            .to_request();
        let res: StatusResponse = base::call_json(&app, req).await?;
        assert_eq!(res.status, "Update successfully");

        let categories = list_categories(&app).await?;
        assert_eq!(categories[0].name, "Team Sport");
        assert_eq!(categories[0].description.as_deref(), Some("Outdoor sports"));

        anyhow::Ok(())
    })
    .await
}

#[tokio::test]
async fn update_invalid_name_is_rejected() -> anyhow::Result<()> {
    base::with_db(async |db| {
        let app = base::get_app(db).await;
        let id = base::add_category(&app, "Sport", "Outdoor sports").await?;

        let req = test::TestRequest::put()
            .uri("/api/category/update")
            .set_json(serde_json::json!({
                "categoryId": id,
                "name": "Bad!Name",
                "description": "changed",
            }))
            .to_request();
        let res: StatusResponse = base::call_json(&app, req).await?;
        assert_eq!(res.status, "Invalid field or ID not found");

        let categories = list_categories(&app).await?;
        assert_eq!(categories[0].name, "Sport");
        assert_eq!(categories[0].description.as_deref(), Some("Outdoor sports"));

        anyhow::Ok(())
    })
    .await
}

#[tokio::test]
async fn update_unknown_id() -> anyhow::Result<()> {
    base::with_db(async |db| {
        let app = base::get_app(db).await;

        let req = test::TestRequest::put()
            .uri("/api/category/update")
            .set_json(serde_json::json!({
                "categoryId": "CAB-0000",
                "name": "Sport",
            }))
            .to_request();
        let res: StatusResponse = base::call_json(&app, req).await?;
        assert_eq!(res.status, "Invalid field or ID not found");

        anyhow::Ok(())
    })
    .await
}

#[tokio::test]
async fn delete_unknown_id_twice() -> anyhow::Result<()> {
    base::with_db(async |db| {
        let app = base::get_app(db).await;

        for _ in 0..2 {
            let req = test::TestRequest::delete()
                .uri("/api/category/delete")
                .set_json(serde_json::json!({ "categoryId": "CZZ-9999" }))
                .to_request();
            let res: DeleteResponse = base::call_json(&app, req).await?;
            assert_eq!(
                res,
                DeleteResponse {
                    acknowledged: false,
                    deleted_count: 0
                }
            );
        }

        anyhow::Ok(())
    })
    .await
}

#[tokio::test]
async fn delete_cascades_to_events() -> anyhow::Result<()> {
    base::with_db(async |db| {
        let app = base::get_app(db).await;
        let c1 = base::add_category(&app, "Music", "Live music").await?;
        let c2 = base::add_category(&app, "Food", "Street food").await?;
        let e1 = base::add_event(&app, "Concert", &c1).await?;
        let e2 = base::add_event(&app, "Food Festival", &format!("{c1},{c2}")).await?;

        let req = test::TestRequest::delete()
            .uri("/api/category/delete")
            .set_json(serde_json::json!({ "categoryId": c1 }))
            .to_request();
        let res: DeleteResponse = base::call_json(&app, req).await?;
        assert_eq!(
            res,
            DeleteResponse {
                acknowledged: true,
                deleted_count: 1
            }
        );

        let categories = list_categories(&app).await?;
        let [food] = categories.as_slice() else {
            anyhow::bail!("expected one category, got {categories:?}");
        };
        assert_eq!(food.id, c2);
        assert!(food.event_list.is_empty());

        let req = test::TestRequest::get().uri("/api/v1/events").to_request();
        let events: Vec<Event<Category>> = base::call_json(&app, req).await?;
        assert!(events.iter().all(|e| e.id != e1 && e.id != e2));
        assert!(events.is_empty());

        anyhow::Ok(())
    })
    .await
}
