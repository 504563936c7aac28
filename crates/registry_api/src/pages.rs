//! Module used to serve the HTML pages. The pages use the same stores as the JSON API.

use std::{fmt, path::Path};

use actix_web::{HttpResponse, web};
use askama::Template;
use entity::{category, event};
use itertools::Itertools as _;
use mkenv::prelude::*;
use registry_lib::models;
use tracing_actix_web::RequestId;

use crate::{ApiResponse, FitRequestId as _};

mod categories;
mod events;
mod home;

/// The date format displayed in the pages.
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A category as displayed in the pages.
struct CategoryView {
    id: String,
    name: String,
    description: String,
    image: String,
    created_at: String,
    event_count: usize,
}

impl CategoryView {
    fn new(category: category::Model, event_count: usize) -> Self {
        Self {
            id: category.human_id,
            name: category.name,
            description: category.description.unwrap_or_default(),
            image: category.image,
            created_at: category.created_at.format(DATE_FORMAT).to_string(),
            event_count,
        }
    }
}

impl From<models::Category> for CategoryView {
    fn from(category: models::Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            description: category.description.unwrap_or_default(),
            image: category.image,
            created_at: category.created_at.format(DATE_FORMAT).to_string(),
            event_count: category.event_list.len(),
        }
    }
}

/// An event as displayed in the pages, with the human-IDs of its categories.
struct EventView {
    id: String,
    name: String,
    description: String,
    start_date_time: String,
    end_date_time: String,
    duration_in_minutes: i32,
    is_active: bool,
    image: String,
    capacity: i32,
    tickets_available: i32,
    categories: String,
}

impl EventView {
    fn new<I>(event: event::Model, category_ids: I) -> Self
    where
        I: IntoIterator<Item: fmt::Display>,
    {
        Self::from_event(models::Event::from_model(event, Vec::<i32>::new()), category_ids)
    }

    fn from_event<C, I>(event: models::Event<C>, category_ids: I) -> Self
    where
        I: IntoIterator<Item: fmt::Display>,
    {
        Self {
            id: event.id,
            name: event.name,
            description: event.description.unwrap_or_default(),
            start_date_time: event.start_date_time.format(DATE_FORMAT).to_string(),
            end_date_time: event.end_date_time.format(DATE_FORMAT).to_string(),
            duration_in_minutes: event.duration_in_minutes,
            is_active: event.is_active,
            image: event.image,
            capacity: event.capacity,
            tickets_available: event.tickets_available,
            categories: category_ids.into_iter().join(", "),
        }
    }
}

#[derive(Template)]
#[template(path = "404.html")]
struct NotFoundPage;

/// Returns the rendered 404 page.
fn not_found_page() -> Result<HttpResponse, askama::Error> {
    let page = NotFoundPage.render()?;
    Ok(HttpResponse::NotFound()
        .content_type(actix_web::http::header::ContentType::html())
        .body(page))
}

/// The actix route handler for the pages that don't exist.
pub async fn not_found(req_id: RequestId) -> ApiResponse<HttpResponse> {
    not_found_page().fit(req_id)
}

/// Returns the file name of the image submitted in a form, if it exists in the images directory.
///
/// Otherwise, the fallback image is returned.
async fn resolve_image(image: &str) -> String {
    let env = crate::env();
    let image = image.trim();

    let is_plain_name = !image.is_empty()
        && !image.starts_with('.')
        && !image.contains(['/', '\\']);

    if is_plain_name
        && tokio::fs::try_exists(Path::new(&env.images_dir.get()).join(image))
            .await
            .unwrap_or(false)
    {
        image.to_owned()
    } else {
        env.fallback_image.get()
    }
}

/// Registers the pages and the static files.
pub fn pages_config(cfg: &mut web::ServiceConfig) {
    let env = crate::env();

    cfg.service(actix_files::Files::new("/css", env.css_dir.get()))
        .service(actix_files::Files::new("/images", env.images_dir.get()))
        .route("/", web::get().to(home::index))
        .service(categories::categories_scope())
        .service(events::events_scope());
}
