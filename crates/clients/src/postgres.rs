use sqlx::PgPool;

use tweetservice_common::{define_module_client, EnvVars};
use tweetservice_database::{connect, DatabaseEnv};

define_module_client! {
    (struct PostgresClient, "postgres")
    client_type: PgPool,
    env: ["DATABASE_URL"],
    setup: async {
        let env = DatabaseEnv::load();
        connect(&env.database_url, env.create_tables).await
    }
}
