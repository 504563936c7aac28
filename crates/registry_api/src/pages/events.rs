use std::collections::HashMap;

use actix_web::{HttpResponse, Scope, web};
use askama::Template;
use registry_lib::{
    Database, association, category,
    counter::Counter,
    error::RegistryError,
    event::{self, NewEvent},
    must,
    validation::{self, ValidationError},
};
use serde::Deserialize;
use tracing_actix_web::RequestId;

use crate::{
    ApiResponse, FitRequestId as _, Res,
    utils::{html, redirect},
};

use super::{CategoryView, EventView, not_found_page, resolve_image};

const LIST_PAGE: &str = "/events/list";

pub fn events_scope() -> Scope {
    web::scope("/events")
        .route("/add-event", web::get().to(add_form))
        .route("/add-event", web::post().to(add))
        .route("/list", web::get().to(list))
        .route("/sold-out", web::get().to(sold_out))
        .route("/remove", web::get().to(remove_from_query))
        .route("/remove", web::post().to(remove_from_form))
        .route("/delete-event", web::get().to(delete_form))
        .route("/category/{category_id}", web::get().to(category_detail))
}

#[derive(Template)]
#[template(path = "add_event.html")]
struct AddEventPage {
    error_message: String,
}

fn render_add_form(error_message: String) -> Result<String, askama::Error> {
    AddEventPage { error_message }.render()
}

async fn add_form(req_id: RequestId) -> ApiResponse<HttpResponse> {
    let page = render_add_form(String::new()).fit(req_id)?;
    html(page)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddForm {
    #[serde(default)]
    event_name: String,
    #[serde(default)]
    event_desc: String,
    #[serde(default)]
    event_date_time: String,
    #[serde(default)]
    event_duration: String,
    is_active: Option<String>,
    #[serde(default)]
    event_image: String,
    #[serde(default)]
    event_capacity: String,
    #[serde(default)]
    event_tickets: String,
    #[serde(default)]
    event_category: String,
}

/// Parses an optional number field of a form, which is `None` if left empty.
fn parse_opt_number(input: &str, err: ValidationError) -> Result<Option<i64>, ValidationError> {
    match input.trim() {
        "" => Ok(None),
        s => s.parse().map(Some).map_err(|_| err),
    }
}

impl AddForm {
    fn to_new_event(&self, image: String) -> Result<NewEvent, ValidationError> {
        let start_date_time = validation::parse_date_time(&self.event_date_time)?;
        let duration_in_minutes = self
            .event_duration
            .trim()
            .parse()
            .map_err(|_| ValidationError::InvalidDuration)?;
        let capacity = parse_opt_number(&self.event_capacity, ValidationError::InvalidCapacity)?;
        let tickets_available =
            parse_opt_number(&self.event_tickets, ValidationError::InvalidTicketsAvailable)?;

        Ok(NewEvent {
            name: self.event_name.clone(),
            description: Some(self.event_desc.clone()),
            start_date_time,
            duration_in_minutes,
            is_active: Some(self.is_active.as_deref() == Some("on")),
            image: Some(image),
            capacity,
            tickets_available,
        })
    }
}

async fn add(
    req_id: RequestId,
    db: Res<Database>,
    counter: Res<Counter>,
    web::Form(form): web::Form<AddForm>,
) -> ApiResponse<HttpResponse> {
    let image = resolve_image(&form.event_image).await;

    let created = match form.to_new_event(image) {
        Ok(new) => event::create(&db.sql_conn, &counter, new, &form.event_category).await,
        Err(e) => Err(e.into()),
    };

    match created {
        Ok(_) => redirect(LIST_PAGE),
        Err(RegistryError::Validation(e)) => {
            let page = render_add_form(e.to_string()).fit(req_id)?;
            html(page)
        }
        Err(e) => Err(e).fit(req_id),
    }
}

#[derive(Template)]
#[template(path = "list_events.html")]
struct ListEventsPage {
    title: &'static str,
    other_route: &'static str,
    other_title: &'static str,
    events: Vec<EventView>,
}

async fn list(req_id: RequestId, db: Res<Database>) -> ApiResponse<HttpResponse> {
    let events = event::list(&db.sql_conn)
        .await
        .fit(req_id)?
        .into_iter()
        .map(|mut event| {
            let categories = std::mem::take(&mut event.category_list);
            EventView::from_event(event, categories.into_iter().map(|category| category.id))
        })
        .collect();

    let page = ListEventsPage {
        title: "Event List",
        other_route: "/events/sold-out",
        other_title: "Sold Out Events",
        events,
    }
    .render()
    .fit(req_id)?;

    html(page)
}

async fn sold_out(req_id: RequestId, db: Res<Database>) -> ApiResponse<HttpResponse> {
    let events = event::sold_out(&db.sql_conn).await.fit(req_id)?;
    let human_ids = category::all(&db.sql_conn)
        .await
        .fit(req_id)?
        .into_iter()
        .map(|category| (category.internal_id, category.id))
        .collect::<HashMap<_, _>>();

    let events = events
        .into_iter()
        .map(|event| {
            let categories = event
                .category_list
                .iter()
                .filter_map(|id| human_ids.get(id).cloned())
                .collect::<Vec<_>>();
            EventView::from_event(event, categories)
        })
        .collect();

    let page = ListEventsPage {
        title: "Sold Out Events",
        other_route: "/events/list",
        other_title: "Event List",
        events,
    }
    .render()
    .fit(req_id)?;

    html(page)
}

#[derive(Deserialize)]
struct RemoveParams {
    #[serde(default)]
    id: String,
}

async fn remove(
    req_id: RequestId,
    db: &Database,
    counter: &Counter,
    human_id: &str,
) -> ApiResponse<HttpResponse> {
    let outcome = association::delete_event(&db.sql_conn, counter, human_id.trim())
        .await
        .fit(req_id)?;
    tracing::debug!("Event deletion from page: {outcome:?}");
    redirect(LIST_PAGE)
}

async fn remove_from_query(
    req_id: RequestId,
    db: Res<Database>,
    counter: Res<Counter>,
    web::Query(params): web::Query<RemoveParams>,
) -> ApiResponse<HttpResponse> {
    remove(req_id, &db, &counter, &params.id).await
}

async fn remove_from_form(
    req_id: RequestId,
    db: Res<Database>,
    counter: Res<Counter>,
    web::Form(params): web::Form<RemoveParams>,
) -> ApiResponse<HttpResponse> {
    remove(req_id, &db, &counter, &params.id).await
}

#[derive(Template)]
#[template(path = "delete_event.html")]
struct DeleteEventPage;

async fn delete_form(req_id: RequestId) -> ApiResponse<HttpResponse> {
    let page = DeleteEventPage.render().fit(req_id)?;
    html(page)
}

#[derive(Template)]
#[template(path = "category_detail.html")]
struct CategoryDetailPage {
    category: CategoryView,
    events: Vec<EventView>,
}

async fn category_detail(
    req_id: RequestId,
    db: Res<Database>,
    category_id: web::Path<String>,
) -> ApiResponse<HttpResponse> {
    let category = match must::have_category(&db.sql_conn, &category_id).await {
        Ok(category) => category,
        Err(RegistryError::CategoryNotFound(_)) => return not_found_page().fit(req_id),
        Err(e) => return Err(e).fit(req_id),
    };
    let events = category::events_of(&db.sql_conn, &category)
        .await
        .fit(req_id)?;

    let events = events
        .into_iter()
        .map(|event| EventView::new(event, Vec::<String>::new()))
        .collect::<Vec<_>>();

    let page = CategoryDetailPage {
        category: CategoryView::new(category, events.len()),
        events,
    }
    .render()
    .fit(req_id)?;

    html(page)
}
