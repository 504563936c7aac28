use actix_web::{HttpResponse, Scope, web};
use askama::Template;
use registry_lib::{
    Database, association, category, counter::Counter, error::RegistryError, event,
    models::Category, must,
};
use serde::Deserialize;
use tracing_actix_web::RequestId;

use crate::{
    ApiResponse, FitRequestId as _, Res,
    utils::{html, redirect},
};

use super::{CategoryView, EventView, not_found_page, resolve_image};

const LIST_PAGE: &str = "/categories/list";

pub fn categories_scope() -> Scope {
    web::scope("/categories")
        .route("/add-category", web::get().to(add_form))
        .route("/add-category", web::post().to(add))
        .route("/list", web::get().to(list))
        .route("/search", web::get().to(search))
        .route("/search", web::post().to(search_post))
        .route("/event/{event_id}", web::get().to(event_detail))
        .route("/delete-category", web::get().to(delete_form))
        .route("/delete-category", web::post().to(delete))
}

#[derive(Template)]
#[template(path = "add_category.html")]
struct AddCategoryPage {
    error_message: String,
}

async fn add_form(req_id: RequestId) -> ApiResponse<HttpResponse> {
    let page = AddCategoryPage {
        error_message: String::new(),
    }
    .render()
    .fit(req_id)?;
    html(page)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddForm {
    #[serde(default)]
    catg_name: String,
    #[serde(default)]
    catg_desc: String,
    #[serde(default)]
    catg_image: String,
}

async fn add(
    req_id: RequestId,
    db: Res<Database>,
    counter: Res<Counter>,
    web::Form(form): web::Form<AddForm>,
) -> ApiResponse<HttpResponse> {
    let new = category::NewCategory {
        name: form.catg_name,
        description: Some(form.catg_desc),
        image: Some(resolve_image(&form.catg_image).await),
    };

    match category::create(&db.sql_conn, &counter, new).await {
        Ok(_) => redirect(LIST_PAGE),
        Err(RegistryError::Validation(e)) => {
            let page = AddCategoryPage {
                error_message: e.to_string(),
            }
            .render()
            .fit(req_id)?;
            html(page)
        }
        Err(e) => Err(e).fit(req_id),
    }
}

#[derive(Template)]
#[template(path = "list_categories.html")]
struct ListCategoriesPage {
    categories: Vec<CategoryView>,
    keyword: String,
}

fn render_list(categories: Vec<Category>, keyword: String) -> Result<String, askama::Error> {
    let categories = categories.into_iter().map(From::from).collect();
    ListCategoriesPage {
        categories,
        keyword,
    }
    .render()
}

async fn list(req_id: RequestId, db: Res<Database>) -> ApiResponse<HttpResponse> {
    let categories = category::all(&db.sql_conn).await.fit(req_id)?;
    let page = render_list(categories, String::new()).fit(req_id)?;
    html(page)
}

#[derive(Deserialize)]
struct SearchQuery {
    #[serde(default)]
    keyword: String,
}

async fn search(
    req_id: RequestId,
    db: Res<Database>,
    web::Query(query): web::Query<SearchQuery>,
) -> ApiResponse<HttpResponse> {
    let categories = category::search(&db.sql_conn, &query.keyword)
        .await
        .fit(req_id)?;
    let page = render_list(categories, query.keyword).fit(req_id)?;
    html(page)
}

async fn search_post(web::Form(form): web::Form<SearchQuery>) -> ApiResponse<HttpResponse> {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("keyword", &form.keyword)
        .finish();
    redirect(&format!("/categories/search?{query}"))
}

#[derive(Template)]
#[template(path = "event_detail.html")]
struct EventDetailPage {
    event: EventView,
}

async fn event_detail(
    req_id: RequestId,
    db: Res<Database>,
    event_id: web::Path<String>,
) -> ApiResponse<HttpResponse> {
    let event = match must::have_event(&db.sql_conn, &event_id).await {
        Ok(event) => event,
        Err(RegistryError::EventNotFound(_)) => return not_found_page().fit(req_id),
        Err(e) => return Err(e).fit(req_id),
    };
    let categories = event::categories_of(&db.sql_conn, &event)
        .await
        .fit(req_id)?;

    let page = EventDetailPage {
        event: EventView::new(event, categories.iter().map(|c| c.human_id.as_str())),
    }
    .render()
    .fit(req_id)?;

    html(page)
}

#[derive(Template)]
#[template(path = "delete_category.html")]
struct DeleteCategoryPage;

async fn delete_form(req_id: RequestId) -> ApiResponse<HttpResponse> {
    let page = DeleteCategoryPage.render().fit(req_id)?;
    html(page)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteForm {
    #[serde(default)]
    catg_id: String,
}

async fn delete(
    req_id: RequestId,
    db: Res<Database>,
    counter: Res<Counter>,
    web::Form(form): web::Form<DeleteForm>,
) -> ApiResponse<HttpResponse> {
    let outcome = association::delete_category(&db.sql_conn, &counter, form.catg_id.trim())
        .await
        .fit(req_id)?;
    tracing::debug!("Category deletion from page: {outcome:?}");
    redirect(LIST_PAGE)
}
