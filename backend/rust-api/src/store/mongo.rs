use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::options::FindOptions;
use mongodb::Database;
use serde::Deserialize;

use crate::metrics::track_db_operation;
use crate::models::attempt::{correctness_from_score, AttemptRecord};
use crate::models::question::QuestionRecord;
use crate::models::Difficulty;

use super::{AttemptStore, QuestionCatalog, QuestionFilter};

const LEARNING_LOGS_COLLECTION: &str = "learning_logs";
const QUESTIONS_COLLECTION: &str = "questions";

fn default_difficulty_level() -> i32 {
    1
}

fn default_is_public() -> bool {
    true
}

/// Learning log document as written by the answering flow. Scores are stored
/// on the 0-100 scale and normalized to a correctness flag on read.
#[derive(Debug, Deserialize)]
struct LearningLogDocument {
    user_id: String,
    question_id: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(default = "default_difficulty_level")]
    difficulty_level: i32,
    #[serde(default)]
    score: i64,
    answered_at: DateTime<Utc>,
}

impl LearningLogDocument {
    fn into_attempt(self) -> AttemptRecord {
        AttemptRecord {
            user_id: self.user_id,
            question_id: self.question_id,
            category: self.category,
            difficulty: Difficulty::from_level(self.difficulty_level),
            correct: correctness_from_score(self.score),
            answered_at: self.answered_at,
        }
    }
}

#[derive(Debug, Deserialize)]
struct QuestionDocument {
    #[serde(rename = "_id")]
    id: String,
    question_text: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(default = "default_difficulty_level")]
    difficulty_level: i32,
    #[serde(default = "default_is_public")]
    is_public: bool,
    #[serde(default)]
    play_count: u32,
    #[serde(default)]
    avg_score: f64,
    created_at: DateTime<Utc>,
}

impl QuestionDocument {
    fn into_record(self) -> QuestionRecord {
        QuestionRecord {
            id: self.id,
            question_text: self.question_text,
            category: self.category,
            difficulty: Difficulty::from_level(self.difficulty_level),
            is_public: self.is_public,
            play_count: self.play_count,
            avg_score: self.avg_score,
            created_at: self.created_at,
        }
    }
}

pub struct MongoAttemptStore {
    mongo: Database,
}

impl MongoAttemptStore {
    pub fn new(mongo: Database) -> Self {
        Self { mongo }
    }
}

#[async_trait]
impl AttemptStore for MongoAttemptStore {
    async fn fetch_attempts(&self, user_id: &str) -> Result<Vec<AttemptRecord>> {
        let collection = self
            .mongo
            .collection::<LearningLogDocument>(LEARNING_LOGS_COLLECTION);
        let options = FindOptions::builder()
            .sort(doc! { "answered_at": 1 })
            .build();

        track_db_operation("find", LEARNING_LOGS_COLLECTION, async {
            let mut cursor = collection
                .find(doc! { "user_id": user_id })
                .with_options(options)
                .await
                .context("Failed to query learning logs")?;

            let mut attempts = Vec::new();
            while let Some(log) = cursor
                .try_next()
                .await
                .context("Learning log cursor error")?
            {
                attempts.push(log.into_attempt());
            }
            Ok(attempts)
        })
        .await
    }
}

pub struct MongoQuestionCatalog {
    mongo: Database,
}

impl MongoQuestionCatalog {
    pub fn new(mongo: Database) -> Self {
        Self { mongo }
    }
}

#[async_trait]
impl QuestionCatalog for MongoQuestionCatalog {
    async fn find_questions(
        &self,
        filter: &QuestionFilter,
        limit: usize,
    ) -> Result<Vec<QuestionRecord>> {
        let collection = self
            .mongo
            .collection::<QuestionDocument>(QUESTIONS_COLLECTION);
        // Stable _id order keeps repeated backfill queries deterministic.
        let options = FindOptions::builder()
            .sort(doc! { "_id": 1 })
            .limit(limit as i64)
            .build();

        let query = filter_document(filter);

        track_db_operation("find", QUESTIONS_COLLECTION, async {
            let mut cursor = collection
                .find(query)
                .with_options(options)
                .await
                .context("Failed to query questions")?;

            let mut questions = Vec::new();
            while let Some(question) =
                cursor.try_next().await.context("Question cursor error")?
            {
                questions.push(question.into_record());
            }
            Ok(questions)
        })
        .await
    }

    async fn ping(&self) -> Result<()> {
        self.mongo
            .run_command(doc! { "ping": 1 })
            .await
            .context("MongoDB ping failed")?;
        Ok(())
    }
}

fn filter_document(filter: &QuestionFilter) -> Document {
    let mut document = Document::new();
    if filter.public_only {
        document.insert("is_public", true);
    }
    if let Some(category) = &filter.category {
        document.insert("category", category.as_str());
    }
    if let Some(difficulty) = filter.difficulty {
        // The catalog stores the upstream 1-5 level; map the coarse difficulty
        // back onto the matching level range.
        let range = match difficulty {
            Difficulty::Easy => doc! { "$lte": 2 },
            Difficulty::Medium => doc! { "$eq": 3 },
            Difficulty::Hard => doc! { "$gte": 4 },
        };
        document.insert("difficulty_level", range);
    }
    document
}
