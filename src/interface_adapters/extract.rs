use std::collections::BTreeMap;

use axum::{
    body::to_bytes,
    extract::{FromRequest, FromRequestParts, Query, RawPathParams, Request},
    response::{IntoResponse, Response},
};
use serde_json::Value;

use crate::domain::envelope::ServiceReply;
use crate::domain::request::ServiceRequest;
use crate::domain::validation::{ValidationError, ValidationLocation};

// Largest request body accepted by the extractor.
const MAX_BODY_BYTES: usize = 1024 * 1024;

// Rejection for requests that cannot be turned into a `ServiceRequest`.
// Rendered as a 400 envelope so clients see the same shape as rule failures.
#[derive(Debug)]
pub enum ServiceRequestRejection {
    UnreadableBody,
    InvalidJson,
    InvalidQuery,
}

impl IntoResponse for ServiceRequestRejection {
    fn into_response(self) -> Response {
        let error = match self {
            Self::UnreadableBody => ValidationError::new(
                "body",
                "request body could not be read",
                ValidationLocation::Body,
            ),
            Self::InvalidJson => ValidationError::new(
                "body",
                "request body must be valid JSON",
                ValidationLocation::Body,
            ),
            Self::InvalidQuery => ValidationError::new(
                "query",
                "query string could not be parsed",
                ValidationLocation::Query,
            ),
        };
        ServiceReply::<()>::invalid(vec![error]).into_response()
    }
}

impl<S> FromRequest<S> for ServiceRequest
where
    S: Send + Sync,
{
    type Rejection = ServiceRequestRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (mut parts, body) = req.into_parts();

        // Routes without captures carry no path params; treat that as empty.
        let params = match RawPathParams::from_request_parts(&mut parts, state).await {
            Ok(raw) => raw
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
            Err(_) => BTreeMap::new(),
        };

        let Query(query) = Query::<BTreeMap<String, String>>::from_request_parts(&mut parts, state)
            .await
            .map_err(|_| ServiceRequestRejection::InvalidQuery)?;

        let headers = parts
            .headers
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|text| (name.as_str().to_string(), text.to_string()))
            })
            .collect();

        let bytes = to_bytes(body, MAX_BODY_BYTES)
            .await
            .map_err(|_| ServiceRequestRejection::UnreadableBody)?;
        let body = if bytes.iter().all(u8::is_ascii_whitespace) {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).map_err(|_| ServiceRequestRejection::InvalidJson)?
        };

        Ok(ServiceRequest {
            method: parts.method.to_string(),
            path: parts.uri.path().to_string(),
            params,
            query,
            headers,
            body,
        })
    }
}
