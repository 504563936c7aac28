#![allow(dead_code)]

use std::fmt;

use actix_http::Request;
use actix_web::{
    App, Error,
    body::MessageBody,
    dev::{Service, ServiceResponse},
    test,
};
use registry_lib::{Database, counter::Counter};
use test_env::IntoResult;
use tracing_actix_web::TracingLogger;

use registry_api_lib::{configure, init_env};

#[derive(Debug, serde::Deserialize)]
pub struct ErrorResponse {
    pub request_id: String,
    pub r#type: i32,
    pub message: String,
}

#[derive(Debug, serde::Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event<C = i32> {
    #[serde(rename = "_id")]
    pub internal_id: i32,
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub start_date_time: chrono::NaiveDateTime,
    pub duration_in_minutes: i32,
    pub end_date_time: chrono::NaiveDateTime,
    pub is_active: bool,
    pub image: String,
    pub capacity: i32,
    pub tickets_available: i32,
    pub category_list: Vec<C>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category<E = i32> {
    #[serde(rename = "_id")]
    pub internal_id: i32,
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub image: String,
    pub created_at: chrono::NaiveDateTime,
    pub event_list: Vec<E>,
}

pub async fn with_db<F, R>(test: F) -> anyhow::Result<<R as IntoResult>::Out>
where
    F: AsyncFnOnce(Database) -> R,
    R: IntoResult,
{
    test_env::wrap(async |db| {
        init_env()?;
        test(db).await.into_result()
    })
    .await
}

pub async fn get_app(
    db: Database,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = Error> {
    test::init_service(
        App::new()
            .wrap(TracingLogger::<configure::RootSpanBuilder>::new())
            .configure(|cfg| configure::configure(cfg, db.clone(), Counter::from_env())),
    )
    .await
}

#[derive(Debug)]
pub enum ApiError {
    InvalidJson(Vec<u8>, serde_json::Error),
    UnexpectedJson(serde_json::Value, serde_json::Error),
    Error { r#type: i32, message: String },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::InvalidJson(raw, deser_err) => match str::from_utf8(raw) {
                Ok(s) => write!(
                    f,
                    "Invalid JSON returned by the API: {s}\nError when deserializing: {deser_err}"
                ),
                Err(_) => write!(
                    f,
                    "Invalid JSON returned by the API, with some non-UTF8 characters: {raw:?}"
                ),
            },
            ApiError::UnexpectedJson(json, deser_err) => {
                write!(
                    f,
                    "Unexpected JSON returned by the API:\n{json:#}\nError when deserializing: {deser_err}"
                )
            }
            ApiError::Error { r#type, message } => {
                f.write_str("Error returned from API: ")?;
                f.debug_map()
                    .entry(&"type", r#type)
                    .entry(&"message", message)
                    .finish()
            }
        }
    }
}

impl std::error::Error for ApiError {}

pub fn try_from_slice<'de, T>(slice: &'de [u8]) -> Result<T, ApiError>
where
    T: serde::Deserialize<'de>,
{
    match serde_json::from_slice(slice) {
        Ok(t) => Ok(t),
        Err(e) => match serde_json::from_slice::<serde_json::Value>(slice) {
            Ok(json) => match serde_json::from_value::<ErrorResponse>(json.clone()) {
                Ok(err) => Err(ApiError::Error {
                    r#type: err.r#type,
                    message: err.message.to_owned(),
                }),
                Err(_) => Err(ApiError::UnexpectedJson(json, e)),
            },
            Err(e) => Err(ApiError::InvalidJson(slice.to_vec(), e)),
        },
    }
}

/// Sends the provided request and deserializes the JSON body of the response.
pub async fn call_json<S, B, T>(app: &S, req: Request) -> anyhow::Result<T>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
    T: serde::de::DeserializeOwned,
{
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    anyhow::ensure!(status == 200, "unexpected status {status}: {body:?}");
    Ok(try_from_slice(&body)?)
}

/// Creates a category with the JSON API and returns its human-ID.
pub async fn add_category<S, B>(app: &S, name: &str, description: &str) -> anyhow::Result<String>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    #[derive(serde::Deserialize)]
    struct Response {
        id: String,
    }

    let req = test::TestRequest::post()
        .uri("/api/category/add")
        .set_json(serde_json::json!({
            "name": name,
            "description": description,
            "image": "",
        }))
        .to_request();
    let res: Response = call_json(app, req).await?;
    Ok(res.id)
}

/// Creates an event with the JSON API in the provided comma-separated categories,
/// and returns its human-ID.
pub async fn add_event<S, B>(app: &S, name: &str, categories: &str) -> anyhow::Result<String>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    #[derive(serde::Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Response {
        event_id: String,
    }

    let req = test::TestRequest::post()
        .uri("/api/v1/add-event")
        .set_json(serde_json::json!({
            "name": name,
            "description": "An event",
            "startDateTime": "2023-10-08T14:15:00Z",
            "durationInMinutes": 45,
            "capacity": 200,
            "categories": categories,
        }))
        .to_request();
    let res: Response = call_json(app, req).await?;
    Ok(res.event_id)
}
