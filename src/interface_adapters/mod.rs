// Interface adapters: HTTP wiring, port implementations and the UI skeleton.

pub mod error_pipeline;
pub mod extract;
pub mod handlers;
pub mod logger;
pub mod protocol;
pub mod reply;
pub mod routes;
pub mod state;
pub mod ui;
pub mod validation;
