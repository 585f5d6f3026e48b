//! Authentication for the bot/automation gate

pub mod api_key;

pub use api_key::verify_api_key;
