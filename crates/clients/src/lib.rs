mod consts;
mod discovery;
mod enrichment;
mod env;

#[cfg(feature = "postgres")]
mod postgres;

pub use consts::*;
pub use discovery::{ConsulRegistry, ServiceResolver, StaticRegistry};
pub use enrichment::{ClientError, EnrichmentClient, HashtagLikes, HashtagText, HttpEnrichmentClient};
pub use env::ServicesEnv;

#[cfg(feature = "postgres")]
pub use postgres::PostgresClient;
