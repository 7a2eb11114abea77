/// A long lived connection to one backing resource, set up from the environment.
#[async_trait::async_trait]
pub trait ModuleClient: Clone + Send + Sync + 'static {
    const NAME: &'static str;
    type Client;

    /// Names of the required environment variables that are not set.
    fn missing_env() -> Vec<&'static str>;

    fn validate_env() -> bool {
        let missing = Self::missing_env();
        if !missing.is_empty() {
            tracing::error!("[Client: {}] Required environment variables are not set: [{}]", Self::NAME, missing.join(", "));
        }
        missing.is_empty()
    }

    async fn setup_connection() -> anyhow::Result<Self>;

    fn get_client(&self) -> &Self::Client;
}

/// Declares a [`ModuleClient`] wrapping `client_type`, built by the `setup`
/// block once the listed environment variables are present.
#[macro_export]
macro_rules! define_module_client {
    {
        (struct $struct_name:ident, $client_name:expr)
        client_type: $client_type:ty,
        env: [ $( $env_var:literal ),* ],
        setup: $setup_logic:expr
    } => {
        #[derive(Clone)]
        pub struct $struct_name {
            client: std::sync::Arc<$client_type>,
        }

        impl $struct_name {
            /// Wraps an already established client, skipping the env driven setup.
            pub fn from_client(client: $client_type) -> Self {
                Self { client: std::sync::Arc::new(client) }
            }
        }

        #[async_trait::async_trait]
        impl ::tweetservice_common::ModuleClient for $struct_name {
            const NAME: &'static str = $client_name;
            type Client = std::sync::Arc<$client_type>;

            fn missing_env() -> Vec<&'static str> {
                const ENV_VARS: &'static [&'static str] = &[ $( $env_var ),* ];
                ENV_VARS.iter().cloned().filter(|var| std::env::var(var).is_err()).collect()
            }

            async fn setup_connection() -> anyhow::Result<Self> {
                if !<Self as ::tweetservice_common::ModuleClient>::validate_env() {
                    anyhow::bail!("[Client: {}] cannot connect, environment is incomplete", $client_name);
                }

                let client_instance: anyhow::Result<$client_type> = $setup_logic.await;
                let client_instance = client_instance?;
                tracing::info!("[Client: {}] connected", $client_name);
                Ok(Self::from_client(client_instance))
            }

            fn get_client(&self) -> &Self::Client {
                &self.client
            }
        }
    }
}
