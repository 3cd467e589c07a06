// One-time server bootstrap shared by the integration tests in a binary.
use std::{
    sync::{Arc, OnceLock},
    time::Duration,
};

static BASE_URL: OnceLock<String> = OnceLock::new();

// Start the service on an ephemeral port once and return its base URL.
pub fn ensure_server() -> &'static str {
    BASE_URL.get_or_init(|| {
        let published = Arc::new(OnceLock::<String>::new());
        let published_by_server = Arc::clone(&published);

        // The server gets its own OS thread and runtime so it outlives the
        // per-test runtimes created by `#[tokio::test]`.
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("test runtime");
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("bind ephemeral test port");
                let addr = listener.local_addr().expect("get local addr");
                let _ = published_by_server.set(format!("http://{addr}"));
                service_scaffold::run(listener).await.expect("server failed");
            });
        });

        wait_until_accepting(&published)
    })
}

fn wait_until_accepting(published: &OnceLock<String>) -> String {
    let base_url = loop {
        if let Some(url) = published.get() {
            break url.clone();
        }
        std::thread::sleep(Duration::from_millis(10));
    };

    let addr = base_url
        .strip_prefix("http://")
        .expect("base url should use http://");
    for _ in 0..100 {
        if std::net::TcpStream::connect(addr).is_ok() {
            return base_url;
        }
        std::thread::sleep(Duration::from_millis(20));
    }

    panic!("server did not become ready in time");
}
