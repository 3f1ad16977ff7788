use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub audit_list_limit: i64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            port: env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().expect("PORT must be a number"),
            audit_list_limit: env::var("AUDIT_LIST_LIMIT").unwrap_or_else(|_| "200".to_string()).parse().expect("AUDIT_LIST_LIMIT must be a number"),
        }
    }
}
