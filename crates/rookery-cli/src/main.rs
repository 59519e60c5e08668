//! Terminal client for the Rookery social network.

mod router;
mod shell;
mod views;

use std::sync::Arc;

use clap::Parser;
use rookery_api::{ApiGateway, HttpTransport};
use rookery_application::{
    AppStore, AuthService, FeedService, NotificationService, ProfileService, SessionStore,
};
use rookery_infrastructure::{ConfigService, CredentialStorage};
use tracing_subscriber::EnvFilter;

use crate::shell::Services;

#[derive(Parser)]
#[command(name = "rookery", version, about = "Terminal client for the Rookery social network")]
struct Cli {
    /// GraphQL endpoint, overriding the environment and config file.
    #[arg(long)]
    endpoint: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = ConfigService::new();
    let endpoint = config.resolve_endpoint(cli.endpoint.as_deref());
    tracing::debug!(endpoint, "resolved GraphQL endpoint");

    let storage = CredentialStorage::new()?;
    let session = SessionStore::hydrate(storage)?;
    let store = Arc::new(AppStore::new(session.clone()));

    let transport = Arc::new(HttpTransport::new(endpoint));
    let gateway = ApiGateway::new(transport, Arc::new(session));

    let services = Services {
        store: store.clone(),
        auth: AuthService::new(store.clone(), gateway.clone()),
        feed: FeedService::new(store.clone(), gateway.clone()),
        profile: ProfileService::new(store.clone(), gateway.clone()),
        notifications: NotificationService::new(store, gateway),
    };

    shell::run(services).await
}
