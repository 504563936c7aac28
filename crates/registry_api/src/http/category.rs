use actix_web::{Responder, Scope, web};
use registry_lib::{Database, association, category, counter::Counter, error::RegistryError};
use serde::{Deserialize, Serialize};
use tracing_actix_web::RequestId;

use crate::{ApiResponse, FitRequestId as _, Res, utils::json};

use super::StatusResponse;

pub fn category_scope() -> Scope {
    web::scope("/category")
        .route("/add", web::post().to(add))
        .route("/list", web::get().to(list))
        .route("/delete", web::delete().to(delete))
        .route("/update", web::put().to(update))
}

#[derive(Deserialize)]
struct AddBody {
    #[serde(default)]
    name: String,
    description: Option<String>,
    image: Option<String>,
}

#[derive(Serialize)]
struct AddResponse {
    id: String,
}

async fn add(
    req_id: RequestId,
    db: Res<Database>,
    counter: Res<Counter>,
    web::Json(body): web::Json<AddBody>,
) -> ApiResponse<impl Responder> {
    let new = category::NewCategory {
        name: body.name,
        description: body.description,
        image: body.image,
    };

    match category::create(&db.sql_conn, &counter, new).await {
        Ok(category) => json(AddResponse {
            id: category.human_id,
        }),
        Err(RegistryError::Validation(e)) => json(StatusResponse {
            status: e.to_string(),
        }),
        Err(e) => Err(e).fit(req_id),
    }
}

async fn list(req_id: RequestId, db: Res<Database>) -> ApiResponse<impl Responder> {
    let categories = category::list(&db.sql_conn).await.fit(req_id)?;
    json(categories)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteBody {
    #[serde(default)]
    category_id: String,
}

async fn delete(
    req_id: RequestId,
    db: Res<Database>,
    counter: Res<Counter>,
    web::Json(body): web::Json<DeleteBody>,
) -> ApiResponse<impl Responder> {
    let outcome = association::delete_category(&db.sql_conn, &counter, &body.category_id)
        .await
        .fit(req_id)?;
    json(outcome)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateBody {
    #[serde(default)]
    category_id: String,
    #[serde(default)]
    name: String,
    description: Option<String>,
}

async fn update(
    req_id: RequestId,
    db: Res<Database>,
    counter: Res<Counter>,
    web::Json(body): web::Json<UpdateBody>,
) -> ApiResponse<impl Responder> {
    let outcome = category::update(
        &db.sql_conn,
        &counter,
        &body.category_id,
        body.name,
        body.description,
    )
    .await
    .fit(req_id)?;

    json(StatusResponse {
        status: outcome.status(),
    })
}
