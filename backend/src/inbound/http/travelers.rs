//! Document store traveler handlers.
//!
//! ```text
//! GET /Traveler/{id}
//! POST /Traveler {"name":"Alice","country":"GR","isNewClient":true,"totalTicketsGrossPrice":150.5}
//! DELETE /Traveler/{id}
//! ```

use actix_web::{delete, get, post, web};

use crate::domain::{ResultEnvelope, TravelerUnit, TravelerUser};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Fetch the first traveler document carrying `id`, from any partition.
#[get("/Traveler/{id}")]
pub async fn get_traveler(
    state: web::Data<HttpState>,
    id: web::Path<String>,
) -> ApiResult<web::Json<TravelerUser>> {
    let traveler = state.documents.get(&id).await?;
    Ok(web::Json(traveler))
}

/// Validate the payload and store it under its country partition.
#[post("/Traveler")]
pub async fn create_traveler(
    state: web::Data<HttpState>,
    payload: web::Json<TravelerUnit>,
) -> ApiResult<web::Json<TravelerUser>> {
    let traveler = state.documents.add(payload.into_inner()).await?;
    Ok(web::Json(traveler))
}

/// Delete every document carrying `id`.
#[delete("/Traveler/{id}")]
pub async fn delete_traveler(
    state: web::Data<HttpState>,
    id: web::Path<String>,
) -> ApiResult<web::Json<ResultEnvelope>> {
    let result = state.documents.remove(&id).await?;
    Ok(web::Json(result))
}
