// Network adapter for host-shell sockets.

pub mod client;

pub use client::ws_handler;
