use std::{
    convert::Infallible,
    future::{Ready, ready},
    ops::Deref,
};

use actix_web::{
    FromRequest, HttpRequest, HttpResponse,
    dev::Payload,
    http::header::{self, ContentType},
};
use serde::Serialize;

/// Converts the provided body to a `200 OK` JSON responses.
pub fn json<T: Serialize, E>(obj: T) -> Result<HttpResponse, E> {
    Ok(HttpResponse::Ok().json(obj))
}

/// Converts the provided rendered page to a `200 OK` HTML response.
pub fn html<E>(page: String) -> Result<HttpResponse, E> {
    Ok(HttpResponse::Ok().content_type(ContentType::html()).body(page))
}

/// A resource handler, like [`Data`][d].
///
/// The difference with [`Data`][d] is that it doesn't use an [`Arc`](std::sync::Arc)
/// internally, but the [`Clone`] implementation of the inner type to implement [`FromRequest`].
///
/// [d]: actix_web::web::Data
#[derive(Clone)]
pub struct Res<T>(pub T);

impl<T> From<T> for Res<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}

impl<T> Deref for Res<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T: Clone + 'static> FromRequest for Res<T> {
    type Error = Infallible;

    type Future = Ready<Result<Self, Infallible>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let res = req
            .app_data::<T>()
            .unwrap_or_else(|| panic!("{} should be present", std::any::type_name::<T>()))
            .clone();
        ready(Ok(Self(res)))
    }
}

/// Returns a `303 See Other` response to the provided location.
pub fn redirect<E>(location: &str) -> Result<HttpResponse, E> {
    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish())
}
