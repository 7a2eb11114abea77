use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::ServicesEnv;

/// Turns a logical service name into the base address of one running instance.
///
/// `None` means nothing is registered under that name right now. Results are
/// never cached; every call asks again.
#[async_trait]
pub trait ServiceResolver: Send + Sync + 'static {
    async fn resolve(&self, service_name: &str) -> Option<Url>;
}

fn base_url(scheme: &str, host: &str) -> Option<Url> {
    match Url::parse(&format!("{}://{}", scheme, host)) {
        Ok(url) => Some(url),
        Err(e) => {
            tracing::warn!("[discovery] invalid instance address {}: {}", host, e);
            None
        }
    }
}

/// A fixed registry, e.g. `hashtag-service=hashtag:8080;follow-service=follow:8080,follow-2:8080`.
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    scheme: String,
    instances: HashMap<String, Vec<String>>,
}

impl StaticRegistry {
    pub fn parse(list: &str, scheme: &str) -> Self {
        let instances = list
            .split(';')
            .filter_map(|entry| entry.split_once('='))
            .map(|(name, hosts)| {
                let hosts = hosts
                    .split(',')
                    .map(str::trim)
                    .filter(|host| !host.is_empty())
                    .map(str::to_string)
                    .collect::<Vec<_>>();
                (name.trim().to_string(), hosts)
            })
            .collect();

        Self { scheme: scheme.to_string(), instances }
    }

    pub fn from_env(env: &ServicesEnv) -> Self {
        Self::parse(&env.service_instances, &env.service_scheme)
    }

    /// Registers one more instance of `service_name`.
    pub fn with_instance(mut self, service_name: &str, host: &str) -> Self {
        self.instances
            .entry(service_name.to_string())
            .or_default()
            .push(host.to_string());
        self
    }

    pub fn with_scheme(mut self, scheme: &str) -> Self {
        self.scheme = scheme.to_string();
        self
    }
}

#[async_trait]
impl ServiceResolver for StaticRegistry {
    async fn resolve(&self, service_name: &str) -> Option<Url> {
        match self.instances.get(service_name).and_then(|hosts| hosts.first()) {
            Some(host) => {
                tracing::debug!("[discovery] service found: {} -> {}", service_name, host);
                base_url(&self.scheme, host)
            }
            None => {
                tracing::warn!("[discovery] {} not found in registry", service_name);
                None
            }
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CatalogEntry {
    #[serde(default)]
    address: String,
    #[serde(default)]
    service_address: String,
    service_port: u16,
}

/// Resolves through a Consul compatible catalog (`/v1/catalog/service/{name}`).
#[derive(Clone)]
pub struct ConsulRegistry {
    http: Client,
    registry_url: Url,
    scheme: String,
}

impl ConsulRegistry {
    pub fn new(http: Client, registry_url: Url, scheme: &str) -> Self {
        Self { http, registry_url, scheme: scheme.to_string() }
    }

    async fn catalog(&self, service_name: &str) -> Result<Vec<CatalogEntry>, reqwest::Error> {
        let mut url = self.registry_url.clone();
        url.set_path(&format!("/v1/catalog/service/{}", service_name));
        self.http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<CatalogEntry>>()
            .await
    }
}

#[async_trait]
impl ServiceResolver for ConsulRegistry {
    async fn resolve(&self, service_name: &str) -> Option<Url> {
        let entries = match self.catalog(service_name).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("[discovery] registry lookup for {} failed: {}", service_name, e);
                return None;
            }
        };

        let Some(entry) = entries.first() else {
            tracing::warn!("[discovery] {} not found in registry", service_name);
            return None;
        };

        let host = if entry.service_address.is_empty() { &entry.address } else { &entry.service_address };
        tracing::debug!("[discovery] service found: {} -> {}:{}", service_name, host, entry.service_port);
        base_url(&self.scheme, &format!("{}:{}", host, entry.service_port))
    }
}
