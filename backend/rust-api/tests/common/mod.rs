#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use chrono::Utc;
use echolingo_api::config::Config;
use echolingo_api::create_router;
use echolingo_api::models::attempt::AttemptRecord;
use echolingo_api::models::question::QuestionRecord;
use echolingo_api::models::Difficulty;
use echolingo_api::services::AppState;
use echolingo_api::store::memory::{InMemoryAttemptStore, InMemoryQuestionCatalog};
use echolingo_api::store::{AttemptStore, QuestionCatalog};

fn test_config() -> Config {
    Config {
        mongo_uri: "mongodb://localhost:27017/echolingo-test".to_string(),
        mongo_database: "echolingo-test".to_string(),
        bind_addr: "127.0.0.1:0".to_string(),
    }
}

/// Router over in-memory stores seeded with the given fixtures.
pub fn create_test_app(attempts: Vec<AttemptRecord>, questions: Vec<QuestionRecord>) -> Router {
    let attempts: Arc<dyn AttemptStore> = Arc::new(InMemoryAttemptStore::new(attempts));
    let catalog: Arc<dyn QuestionCatalog> = Arc::new(InMemoryQuestionCatalog::new(questions));
    create_router(Arc::new(AppState::new(test_config(), attempts, catalog)))
}

/// Router with custom store implementations (e.g. a failing catalog).
pub fn create_test_app_with_stores(
    attempts: Arc<dyn AttemptStore>,
    catalog: Arc<dyn QuestionCatalog>,
) -> Router {
    create_router(Arc::new(AppState::new(test_config(), attempts, catalog)))
}

pub fn attempt(user_id: &str, category: Option<&str>, correct: bool) -> AttemptRecord {
    AttemptRecord {
        user_id: user_id.to_string(),
        question_id: uuid::Uuid::new_v4().to_string(),
        category: category.map(str::to_string),
        difficulty: Difficulty::Easy,
        correct,
        answered_at: Utc::now(),
    }
}

pub fn question(id: &str, category: Option<&str>, difficulty: Difficulty) -> QuestionRecord {
    QuestionRecord {
        id: id.to_string(),
        question_text: format!("Listen to the clip and fill in the blank ({})", id),
        category: category.map(str::to_string),
        difficulty,
        is_public: true,
        play_count: 0,
        avg_score: 0.0,
        created_at: Utc::now(),
    }
}
