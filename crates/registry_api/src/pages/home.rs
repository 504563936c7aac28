use actix_web::HttpResponse;
use askama::Template;
use registry_lib::{
    Database, category,
    counter::{Counter, Counts},
    event,
};
use tracing_actix_web::RequestId;

use crate::{ApiResponse, FitRequestId as _, Res, utils::html};

#[derive(Template)]
#[template(path = "index.html")]
struct IndexPage {
    category_total: u64,
    event_total: u64,
    counts: Counts,
}

pub async fn index(
    req_id: RequestId,
    db: Res<Database>,
    counter: Res<Counter>,
) -> ApiResponse<HttpResponse> {
    let category_total = category::count(&db.sql_conn).await.fit(req_id)?;
    let event_total = event::count(&db.sql_conn).await.fit(req_id)?;
    let counts = counter.get(&db.sql_conn).await.fit(req_id)?;

    let page = IndexPage {
        category_total,
        event_total,
        counts,
    }
    .render()
    .fit(req_id)?;

    html(page)
}
