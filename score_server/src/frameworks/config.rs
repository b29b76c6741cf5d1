use std::env;

pub fn http_port() -> u16 {
    env::var("SCORE_SERVER_PORT")
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(3002)
}
