use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Table definitions, in creation order. No foreign keys: the services keep
/// references consistent themselves.
const CREATE_TABLES_SQL: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS tweet (
        id BIGSERIAL PRIMARY KEY,
        text TEXT NOT NULL DEFAULT '',
        author_id BIGINT NOT NULL,
        created_on DATE NOT NULL,
        retweet_id BIGINT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS comment (
        id BIGSERIAL PRIMARY KEY,
        text TEXT NOT NULL DEFAULT '',
        author_id BIGINT NOT NULL,
        tweet_id BIGINT NOT NULL,
        created_on DATE NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS tweet_like (
        tweet_id BIGINT NOT NULL,
        user_id BIGINT NOT NULL,
        PRIMARY KEY (tweet_id, user_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS comment_like (
        comment_id BIGINT NOT NULL,
        user_id BIGINT NOT NULL,
        PRIMARY KEY (comment_id, user_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS tweet_picture (
        position BIGSERIAL PRIMARY KEY,
        tweet_id BIGINT NOT NULL,
        picture_id BIGINT NOT NULL
    )
    "#,
];

const INDEXES_SQL: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_tweet_author_id ON tweet (author_id)",
    "CREATE INDEX IF NOT EXISTS idx_tweet_retweet_id ON tweet (retweet_id)",
    "CREATE INDEX IF NOT EXISTS idx_comment_tweet_id ON comment (tweet_id)",
    "CREATE INDEX IF NOT EXISTS idx_tweet_picture_tweet_id ON tweet_picture (tweet_id)",
];

/// Opens a pool against `database_url`, optionally creating the schema.
pub async fn connect(database_url: &str, create: bool) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    if create {
        create_tables(&pool).await?;
    }

    Ok(pool)
}

/// Idempotently creates all tables and indexes.
pub async fn create_tables(pool: &PgPool) -> Result<()> {
    for statement in CREATE_TABLES_SQL.iter().chain(INDEXES_SQL) {
        sqlx::query(statement).execute(pool).await?;
    }
    tracing::info!("[database] schema ready");
    Ok(())
}
