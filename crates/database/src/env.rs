use tweetservice_common::{env_flag, EnvVars};

pub struct DatabaseEnv {
    pub database_url: String,
    pub create_tables: bool,
}

impl EnvVars for DatabaseEnv {
    fn load() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").unwrap_or_default(),
            create_tables: env_flag("DATABASE_CREATE_TABLES", true),
        }
    }

    fn get_env_var(&self, key: &str) -> String {
        match key {
            "DATABASE_URL" => self.database_url.clone(),
            "DATABASE_CREATE_TABLES" => self.create_tables.to_string(),
            _ => panic!("Invalid environment variable: {}", key),
        }
    }
}
