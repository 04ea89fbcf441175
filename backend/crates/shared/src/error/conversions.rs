//! Error conversions - framework integration for [`AppError`]

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for super::app_error::AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // Details stay in the logs; clients only see the reason phrase.
        (status, self.kind().as_str()).into_response()
    }
}
