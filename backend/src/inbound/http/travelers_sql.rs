//! Relational store traveler handlers.
//!
//! ```text
//! GET /Travelersql/{id}      Traveler: agent-7
//! POST /Travelersql {"name":"Bob","country":"CY","isNewClient":false,"totalTicketsGrossPrice":10}
//! PUT /Travelersql/{id} {"name":"Bob","country":"CY","isNewClient":true,"totalTicketsGrossPrice":12.5}
//! ```

use std::borrow::Cow;

use actix_web::{HttpRequest, HttpResponse, get, post, put, web};

use crate::domain::{Error, TravelerUnit, TravelerUser};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Header naming the requesting party on relational reads.
pub const TRAVELER_HEADER: &str = "Traveler";

/// Header bytes outside visible ASCII are decoded as lossy UTF-8.
fn requested_by(req: &HttpRequest) -> Result<Cow<'_, str>, Error> {
    req.headers()
        .get(TRAVELER_HEADER)
        .map(|value| String::from_utf8_lossy(value.as_bytes()))
        .ok_or_else(|| Error::invalid_request("Traveler key not found!"))
}

/// Fetch a traveler row; the `Traveler` header is echoed as `requestedBy`.
#[get("/Travelersql/{id}")]
pub async fn get_traveler_sql(
    state: web::Data<HttpState>,
    req: HttpRequest,
    id: web::Path<String>,
) -> ApiResult<web::Json<TravelerUser>> {
    let requester = requested_by(&req)?;
    let traveler = state.relational.get(&id, &requester).await?;
    Ok(web::Json(traveler))
}

/// Insert a traveler row and answer `201 Created`.
#[post("/Travelersql")]
pub async fn create_traveler_sql(
    state: web::Data<HttpState>,
    payload: web::Json<TravelerUnit>,
) -> ApiResult<HttpResponse> {
    let traveler = state.relational.add(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(traveler))
}

/// Overwrite the traveler row `id` with the payload.
#[put("/Travelersql/{id}")]
pub async fn update_traveler_sql(
    state: web::Data<HttpState>,
    id: web::Path<String>,
    payload: web::Json<TravelerUnit>,
) -> ApiResult<web::Json<TravelerUser>> {
    let traveler = state
        .relational
        .update(&id, payload.into_inner())
        .await?;
    Ok(web::Json(traveler))
}
