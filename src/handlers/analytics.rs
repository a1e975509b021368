use actix_web::{web, HttpRequest, HttpResponse};

use crate::errors::AppError;
use crate::ledger::Ledger;
use crate::utils::jwt;

// GET /v1/analytics/:date
pub async fn day_summary(
    req: HttpRequest,
    ledger: web::Data<Ledger>,
    date: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let owner = jwt::owner_id(&req)?;
    let summary = ledger.day_summary(owner, &date).await?;
    Ok(HttpResponse::Ok().json(summary))
}
