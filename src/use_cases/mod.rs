// Use cases layer: the request wrapper, route forwarder and example service.

pub mod async_handler;
pub mod request_handler;
pub mod transaction;
pub mod users;

#[cfg(test)]
pub(crate) mod test_support;

pub use async_handler::async_handler;
pub use request_handler::RequestHandler;
pub use transaction::in_transaction;
pub use users::UserService;
