use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::ledger::Ledger;
use crate::models::activity::{CreateActivityRequest, UpdateActivityRequest};
use crate::utils::jwt;

#[derive(Deserialize)]
pub struct ListActivitiesQuery {
    date: Option<String>,
}

// GET /v1/activities?date=YYYY-MM-DD
pub async fn list_activities(
    req: HttpRequest,
    ledger: web::Data<Ledger>,
    query: web::Query<ListActivitiesQuery>,
) -> Result<HttpResponse, AppError> {
    let owner = jwt::owner_id(&req)?;
    let date = query
        .date
        .as_deref()
        .ok_or_else(|| AppError::BadRequest("Missing date query parameter".to_string()))?;

    let activities = ledger.list(owner, date).await?;
    Ok(HttpResponse::Ok().json(activities))
}

// POST /v1/activities
pub async fn create_activity(
    req: HttpRequest,
    ledger: web::Data<Ledger>,
    payload: web::Json<CreateActivityRequest>,
) -> Result<HttpResponse, AppError> {
    let owner = jwt::owner_id(&req)?;
    let activity = ledger.create(owner, payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(activity))
}

// PATCH /v1/activities/:activityId
pub async fn update_activity(
    req: HttpRequest,
    ledger: web::Data<Ledger>,
    activity_id: web::Path<Uuid>,
    payload: web::Json<UpdateActivityRequest>,
) -> Result<HttpResponse, AppError> {
    let owner = jwt::owner_id(&req)?;
    let activity = ledger
        .update(owner, *activity_id, payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(activity))
}

// DELETE /v1/activities/:activityId
pub async fn delete_activity(
    req: HttpRequest,
    ledger: web::Data<Ledger>,
    activity_id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let owner = jwt::owner_id(&req)?;
    ledger.delete(owner, *activity_id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Activity deleted successfully" })))
}
