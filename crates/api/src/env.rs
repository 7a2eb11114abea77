use tweetservice_common::{env_or, EnvVars};

pub struct ApiServerEnv {
    pub port: u16,
}

impl EnvVars for ApiServerEnv {
    fn load() -> Self {
        Self {
            port: env_or("PORT", "8080").parse().unwrap_or(8080),
        }
    }

    fn get_env_var(&self, key: &str) -> String {
        match key {
            "PORT" => self.port.to_string(),
            _ => panic!("{} is not set", key),
        }
    }
}
