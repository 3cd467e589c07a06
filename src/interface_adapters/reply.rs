use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::domain::envelope::{ReplyStatus, ServiceReply};

fn status_code(status: ReplyStatus) -> StatusCode {
    match status {
        ReplyStatus::Ok => StatusCode::OK,
        ReplyStatus::BadRequest => StatusCode::BAD_REQUEST,
        ReplyStatus::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

// JSON body with the status chosen by the request wrapper.
impl<T> IntoResponse for ServiceReply<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        (status_code(self.status), Json(self.body)).into_response()
    }
}
