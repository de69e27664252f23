use std::sync::Arc;

use tokio::sync::Mutex;

use crate::auth::IdentityVerifier;
use crate::community::feed::PostFeed;
use crate::community::store::PostStore;
use crate::config::Config;
use crate::congestion::loader::Loader;
use crate::forecast_client::{Forecast, ForecastClient, ForecastDay};
use crate::parking::ParkingClient;
use crate::travel_kit::packing::PackingLists;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub forecast_client: ForecastClient,
    /// Latest forecast per day, with generation tickets so late responses are discarded.
    pub forecasts: Arc<Mutex<Loader<ForecastDay, Forecast>>>,
    pub parking_client: ParkingClient,
    /// Pluggable post store. Default: InMemoryPostStore. Swap via STORE_BACKEND env.
    pub store: Arc<dyn PostStore>,
    /// Subscription cache the feed endpoints read from.
    pub feed: Arc<PostFeed>,
    pub identity: Arc<dyn IdentityVerifier>,
    pub packing: Arc<PackingLists>,
}

impl AppState {
    pub fn new(
        config: Config,
        store: Arc<dyn PostStore>,
        identity: Arc<dyn IdentityVerifier>,
    ) -> Self {
        let feed = Arc::new(PostFeed::new(store.as_ref()));
        Self {
            forecast_client: ForecastClient::new(config.forecast_base_url.clone()),
            forecasts: Arc::new(Mutex::new(Loader::new())),
            parking_client: ParkingClient::new(
                config.parking_endpoint.clone(),
                config.parking_service_key.clone(),
            ),
            store,
            feed,
            identity,
            packing: Arc::new(PackingLists::new()),
            config,
        }
    }

    /// In-memory store, `user:<uid>` tokens and every upstream at `base`.
    #[cfg(test)]
    pub fn for_testing(base: &str) -> Self {
        use crate::auth::StaticIdentityVerifier;
        use crate::community::store::InMemoryPostStore;

        Self::new(
            Config::for_testing(base),
            Arc::new(InMemoryPostStore::new()),
            Arc::new(StaticIdentityVerifier),
        )
    }
}
