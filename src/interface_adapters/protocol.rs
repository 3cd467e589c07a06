use serde::Serialize;

// Response payload for the health probe.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
