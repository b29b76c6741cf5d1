pub mod best_score;
pub mod credentials;
pub mod login;
pub mod record_game;
pub mod register;

#[cfg(test)]
pub(crate) mod test_support;
