use axum::extract::FromRef;

use crate::catalog::Catalog;
use crate::classifier::EmotionClassifier;
use std::sync::Arc;
use std::time::Instant;

use super::ServerConfig;

pub type GuardedCatalog = Arc<Catalog>;
pub type OptionalClassifier = Option<Arc<dyn EmotionClassifier>>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub catalog: GuardedCatalog,
    pub classifier: OptionalClassifier,
}

impl ServerState {
    pub fn new(
        config: ServerConfig,
        catalog: GuardedCatalog,
        classifier: OptionalClassifier,
    ) -> ServerState {
        ServerState {
            config,
            start_time: Instant::now(),
            catalog,
            classifier,
        }
    }
}

impl FromRef<ServerState> for GuardedCatalog {
    fn from_ref(input: &ServerState) -> Self {
        input.catalog.clone()
    }
}

impl FromRef<ServerState> for OptionalClassifier {
    fn from_ref(input: &ServerState) -> Self {
        input.classifier.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}
