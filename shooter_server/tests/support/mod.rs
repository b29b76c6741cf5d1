// Shared primitives for one-time server bootstrapping across integration tests.
use std::{
    // `Arc` shares data between threads; `OnceLock` writes a value only once.
    sync::{Arc, OnceLock},
    // Sleep durations are used in readiness polling loops.
    time::Duration,
};

// Global base URL used by all tests after the server publishes its bound address.
static SERVER_URL: OnceLock<String> = OnceLock::new();
// One-time guard that ensures the server bootstrap path runs only once.
static SERVER_READY: OnceLock<()> = OnceLock::new();
// Score service address with no listener behind it.
const UNREACHABLE_SCORE_SERVICE: &str = "http://127.0.0.1:9";

// Ensure the test server is running and return the shared base URL.
pub fn ensure_server() -> &'static str {
    // Run initialization exactly once even if multiple tests call this function.
    SERVER_READY.get_or_init(|| {
        // Local one-time slot where the server thread publishes its selected URL.
        let published_url = Arc::new(OnceLock::<String>::new());
        // Clone so the spawned thread can write into the same shared slot.
        let published_url_thread = Arc::clone(&published_url);
        // Spawn an OS thread so the server outlives individual `#[tokio::test]` runtimes.
        std::thread::spawn(move || {
            // Each server thread owns its own Tokio runtime.
            let runtime = tokio::runtime::Runtime::new().expect("test runtime");
            // Run async server startup and serving on this dedicated runtime.
            runtime.block_on(async move {
                // Bind to an ephemeral port to avoid collisions with local services.
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("bind ephemeral test port");
                // Capture the exact address that was assigned by the OS.
                let addr = listener.local_addr().expect("get local addr");
                // Publish the final base URL so test code can target the right server.
                let _ = published_url_thread.set(format!("http://{}", addr));
                // Nothing listens on the discard port, so score calls fail fast.
                let mut config = shooter_server::ServerConfig::from_env();
                config.score_service_url = UNREACHABLE_SCORE_SERVICE.to_string();
                config.score_service_timeout = Duration::from_millis(300);
                config.session.archive_timeout = Duration::from_millis(300);
                // Start serving requests until the test process exits.
                shooter_server::run(listener, config)
                    .await
                    .expect("server failed");
            });
        });
        // Block until URL is published and the bound port starts accepting connections.
        wait_for_server_url_and_readiness(published_url);
    });

    // Return the stable shared URL used by all tests in this binary.
    SERVER_URL
        .get()
        .expect("server url should be initialized")
        .as_str()
}

// Wait for URL publication and then wait for the server socket to accept TCP connections.
fn wait_for_server_url_and_readiness(published_url: Arc<OnceLock<String>>) {
    // Poll until the server thread publishes the base URL.
    let base_url = loop {
        // If the URL is published, clone it and stop waiting.
        if let Some(url) = published_url.get() {
            break url.clone();
        }
        // Avoid a tight loop while waiting for the background thread.
        std::thread::sleep(Duration::from_millis(10));
    };

    // Persist the URL globally so every test gets the same endpoint.
    let _ = SERVER_URL.set(base_url.clone());

    // Strip the scheme so we can use host:port for raw TCP readiness checks.
    let addr = base_url
        .strip_prefix("http://")
        .expect("base url should use http://");

    // Retry for a short period to avoid racing server bind/accept.
    for _ in 0..100 {
        // Successful connect means the server socket is accepting connections.
        if std::net::TcpStream::connect(addr).is_ok() {
            return;
        }
        // Wait briefly before the next readiness probe.
        std::thread::sleep(Duration::from_millis(20));
    }

    // Fail fast if startup never reached an accepting state.
    panic!("server did not become ready in time");
}

// WebSocket endpoint of the shared test server.
pub fn ws_url() -> String {
    let base_url = ensure_server();
    format!("{}/ws", base_url.replacen("http://", "ws://", 1))
}

pub type ShellSocket =
    tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>;

// Open a fresh host-shell connection.
pub async fn connect() -> ShellSocket {
    let (socket, _) = tokio_tungstenite::connect_async(ws_url())
        .await
        .expect("websocket connect");
    socket
}

// Send one JSON text frame.
pub async fn send_json(socket: &mut ShellSocket, value: serde_json::Value) {
    use futures_util::SinkExt;

    socket
        .send(tokio_tungstenite::tungstenite::Message::Text(
            value.to_string().into(),
        ))
        .await
        .expect("send frame");
}

// Wait for the next server message whose `type` is `kind`, skipping everything else.
pub async fn next_of_type(socket: &mut ShellSocket, kind: &str) -> serde_json::Value {
    use futures_util::StreamExt;

    let wait = async {
        loop {
            let frame = socket
                .next()
                .await
                .expect("socket closed early")
                .expect("websocket error");
            let tokio_tungstenite::tungstenite::Message::Text(text) = frame else {
                continue;
            };
            let value: serde_json::Value =
                serde_json::from_str(text.as_str()).expect("server sent invalid json");
            if value["type"] == kind {
                return value;
            }
        }
    };
    tokio::time::timeout(Duration::from_secs(5), wait)
        .await
        .expect("timed out waiting for server message")
}

// Wait for the server's close frame, skipping any data frames still in flight.
pub async fn next_close(
    socket: &mut ShellSocket,
) -> tokio_tungstenite::tungstenite::protocol::CloseFrame {
    use futures_util::StreamExt;
    use tokio_tungstenite::tungstenite::Message;

    let wait = async {
        loop {
            match socket.next().await {
                Some(Ok(Message::Close(Some(frame)))) => return frame,
                Some(Ok(Message::Close(None))) | None => panic!("closed without a close frame"),
                Some(Ok(_)) => continue,
                Some(Err(e)) => panic!("websocket error before close: {e}"),
            }
        }
    };
    tokio::time::timeout(Duration::from_secs(5), wait)
        .await
        .expect("timed out waiting for close frame")
}
