use std::sync::Arc;

use anyhow::Result;
use reqwest::{Client, Url};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tweetservice_clients::{
    ConsulRegistry, HttpEnrichmentClient, PostgresClient, ServiceResolver, ServicesEnv, StaticRegistry,
};
use tweetservice_common::{EnvVars, ModuleClient};
use tweetservice_database::PgStore;
use tweetservice_api::{app, setup_tracing, ApiServerEnv, AppState};

fn resolver(http: &Client, env: &ServicesEnv) -> Result<Arc<dyn ServiceResolver>> {
    match &env.service_registry_url {
        Some(registry_url) => {
            tracing::info!("[server] resolving services through registry {}", registry_url);
            let registry_url = Url::parse(registry_url)?;
            Ok(Arc::new(ConsulRegistry::new(http.clone(), registry_url, &env.service_scheme)))
        }
        None => {
            tracing::info!("[server] resolving services from SERVICE_INSTANCES");
            Ok(Arc::new(StaticRegistry::from_env(env)))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    setup_tracing();

    let cors = CorsLayer::very_permissive();
    let trace = TraceLayer::new_for_http();

    let db = PostgresClient::setup_connection().await?;
    let store = Arc::new(PgStore::new(db.get_client().as_ref().clone()));

    let http = Client::new();
    let services_env = ServicesEnv::load();
    let enrichment = Arc::new(HttpEnrichmentClient::new(
        http.clone(),
        resolver(&http, &services_env)?,
        services_env,
    ));

    let app = app(AppState::new(store, enrichment))
        .layer(cors)
        .layer(trace);

    let port = ApiServerEnv::load().port;
    let listener = tokio::net::TcpListener::bind(format!(":::{port}")).await?;

    tracing::info!("LISTENING ON {port}");
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
