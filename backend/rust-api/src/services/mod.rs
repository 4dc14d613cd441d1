use std::sync::Arc;

use mongodb::Database;

use crate::config::Config;
use crate::store::mongo::{MongoAttemptStore, MongoQuestionCatalog};
use crate::store::{AttemptStore, QuestionCatalog};

pub struct AppState {
    pub config: Config,
    pub attempts: Arc<dyn AttemptStore>,
    pub catalog: Arc<dyn QuestionCatalog>,
}

impl AppState {
    pub fn new(
        config: Config,
        attempts: Arc<dyn AttemptStore>,
        catalog: Arc<dyn QuestionCatalog>,
    ) -> Self {
        Self {
            config,
            attempts,
            catalog,
        }
    }

    /// Production wiring over a MongoDB database.
    pub fn with_mongo(config: Config, mongo: Database) -> Self {
        let attempts = Arc::new(MongoAttemptStore::new(mongo.clone()));
        let catalog = Arc::new(MongoQuestionCatalog::new(mongo));
        Self::new(config, attempts, catalog)
    }
}

pub mod profile_service;
pub mod recommendation_service;
