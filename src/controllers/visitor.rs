use axum::Json;
use serde::Serialize;

use crate::core::database::{sqlite_operations, visitor_operations};
use crate::core::errors::ApiError;

#[derive(Serialize)]
pub struct VisitorTotal {
    pub total: i32,
}

pub async fn get_visitor() -> Result<Json<VisitorTotal>, ApiError> {
    let conn = sqlite_operations::connection();
    let total = visitor_operations::peek_total(&conn)?;
    Ok(Json(VisitorTotal { total }))
}

pub async fn hit_visitor() -> Result<Json<VisitorTotal>, ApiError> {
    let conn = sqlite_operations::connection();
    let total = visitor_operations::hit_total(&conn)?;
    Ok(Json(VisitorTotal { total }))
}
