use std::env;
use std::net::IpAddr;

// Runtime/server settings read from the environment.

pub fn http_host() -> IpAddr {
    env::var("SERVICE_HOST")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(IpAddr::from([127, 0, 0, 1]))
}

pub fn http_port() -> u16 {
    env::var("SERVICE_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000)
}

pub fn service_name() -> String {
    env::var("SERVICE_NAME")
        .ok()
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| "service_scaffold".to_string())
}
