//! Store error classification and HTTP rendering of [`AppError`]

#[cfg(feature = "sqlx")]
/// Returns `true` when a sqlx error is a unique-constraint violation
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    // https://www.postgresql.org/docs/current/errcodes-appendix.html
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some("23505"),
        _ => false,
    }
}

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for super::app_error::AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // RFC 7807 Problem Details
        let body = serde_json::json!({
            "type": format!("https://httpstatuses.io/{}", self.status_code()),
            "title": self.kind().as_str(),
            "status": self.status_code(),
            "code": self.kind(),
            "detail": self.message(),
        });

        (status, Json(body)).into_response()
    }
}
