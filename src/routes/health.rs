use axum::http::StatusCode;

/// Liveness probe
///
/// Returns 200 while the process is serving. Not rate limited and does not
/// touch the database.
#[utoipa::path(
    get,
    path = "/healthz",
    responses(
        (status = 200, description = "Service is alive"),
    ),
    tag = "health"
)]
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}
