use actix_web::{Responder, Scope, web};
use registry_lib::{
    Database, association,
    counter::Counter,
    error::RegistryError,
    event,
    validation::{self, ValidationError},
};
use serde::{Deserialize, Serialize};
use tracing_actix_web::RequestId;

use crate::{ApiResponse, FitRequestId as _, Res, utils::json};

use super::StatusResponse;

pub fn event_scope() -> Scope {
    web::scope("/v1")
        .route("/add-event", web::post().to(add))
        .route("/events", web::get().to(list))
        .route("/delete-event", web::delete().to(delete))
        .route("/update-event", web::put().to(update))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddBody {
    #[serde(default)]
    name: String,
    description: Option<String>,
    start_date_time: Option<String>,
    #[serde(default)]
    duration_in_minutes: serde_json::Value,
    is_active: Option<bool>,
    image: Option<String>,
    #[serde(default)]
    capacity: serde_json::Value,
    #[serde(default)]
    tickets_available: serde_json::Value,
    #[serde(default)]
    categories: String,
}

/// Reads a number sent either as a JSON integer or as a string containing one.
///
/// `null` or a missing field gives `None`.
fn number_field(
    value: &serde_json::Value,
    err: ValidationError,
) -> Result<Option<i64>, ValidationError> {
    match value {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::Number(n) => n.as_i64().map(Some).ok_or(err),
        serde_json::Value::String(s) => s.trim().parse().map(Some).map_err(|_| err),
        _ => Err(err),
    }
}

impl AddBody {
    fn into_new_event(self) -> Result<(event::NewEvent, String), ValidationError> {
        let start_date_time = self
            .start_date_time
            .ok_or(ValidationError::MissingField("startDateTime"))?;
        let start_date_time = validation::parse_date_time(&start_date_time)?;
        let duration_in_minutes =
            number_field(&self.duration_in_minutes, ValidationError::InvalidDuration)?
                .ok_or(ValidationError::MissingField("durationInMinutes"))?;
        let capacity = number_field(&self.capacity, ValidationError::InvalidCapacity)?;
        let tickets_available =
            number_field(&self.tickets_available, ValidationError::InvalidTicketsAvailable)?;

        let new = event::NewEvent {
            name: self.name,
            description: self.description,
            start_date_time,
            duration_in_minutes,
            is_active: self.is_active,
            image: self.image,
            capacity,
            tickets_available,
        };

        Ok((new, self.categories))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AddResponse {
    event_id: String,
}

async fn add(
    req_id: RequestId,
    db: Res<Database>,
    counter: Res<Counter>,
    web::Json(body): web::Json<AddBody>,
) -> ApiResponse<impl Responder> {
    let created = match body.into_new_event() {
        Ok((new, categories)) => event::create(&db.sql_conn, &counter, new, &categories).await,
        Err(e) => Err(e.into()),
    };

    match created {
        Ok(event) => json(AddResponse {
            event_id: event.human_id,
        }),
        Err(RegistryError::Validation(e)) => json(StatusResponse {
            status: e.to_string(),
        }),
        Err(e) => Err(e).fit(req_id),
    }
}

async fn list(req_id: RequestId, db: Res<Database>) -> ApiResponse<impl Responder> {
    let events = event::list(&db.sql_conn).await.fit(req_id)?;
    json(events)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteBody {
    #[serde(default)]
    event_id: String,
}

async fn delete(
    req_id: RequestId,
    db: Res<Database>,
    counter: Res<Counter>,
    web::Json(body): web::Json<DeleteBody>,
) -> ApiResponse<impl Responder> {
    let outcome = association::delete_event(&db.sql_conn, &counter, &body.event_id)
        .await
        .fit(req_id)?;
    json(outcome)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateBody {
    #[serde(default)]
    event_id: String,
    #[serde(default)]
    name: String,
    /// Kept as a raw value, because anything else than a number is rejected with a status.
    #[serde(default)]
    capacity: serde_json::Value,
}

async fn update(
    req_id: RequestId,
    db: Res<Database>,
    counter: Res<Counter>,
    web::Json(body): web::Json<UpdateBody>,
) -> ApiResponse<impl Responder> {
    let outcome = event::update(
        &db.sql_conn,
        &counter,
        &body.event_id,
        body.name,
        number_field(&body.capacity, ValidationError::InvalidCapacity)
            .ok()
            .flatten(),
    )
    .await
    .fit(req_id)?;

    json(StatusResponse {
        status: outcome.status(),
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn number_fields() {
        let err = ValidationError::InvalidCapacity;
        assert_eq!(number_field(&json!(500), err.clone()), Ok(Some(500)));
        assert_eq!(number_field(&json!("500"), err.clone()), Ok(Some(500)));
        assert_eq!(number_field(&json!(" 45 "), err.clone()), Ok(Some(45)));
        assert_eq!(number_field(&json!(null), err.clone()), Ok(None));
        assert_eq!(number_field(&json!("many"), err.clone()), Err(err.clone()));
        assert_eq!(number_field(&json!(12.5), err.clone()), Err(err.clone()));
        assert_eq!(number_field(&json!([1]), err.clone()), Err(err));
    }
}
