use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    /// Shared key the bot/automation layer must present in `X-API-Key`
    pub bot_api_key: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            bot_api_key: env::var("BOT_API_KEY").expect("BOT_API_KEY must be set"),
        }
    }
}
