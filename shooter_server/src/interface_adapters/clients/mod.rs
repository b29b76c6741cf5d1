// Outbound HTTP clients for services the shooter server depends on.

pub mod score;

pub use score::ScoreServiceClient;
