//! Shared fixtures for integration tests.

use async_trait::async_trait;
use ideate::error::ApiError;
use ideate::generation::{GenerationRequest, GroundedGenerator};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Contact-center schema with one fact, one dimension, a bridge entity with an
/// unknown role, an attribute with an unknown logical type, and one relation.
pub const CONTACT_CENTER_SCHEMA: &str = r#"{
  "entityList": [
    {
      "entityType": "Fact",
      "canonicalName": "calls",
      "attributeList": [
        {"logicalDataType": "CONTINUOUS", "canonicalName": "acv"},
        {"logicalDataType": "CONTINUOUS", "canonicalName": "aht"},
        {"logicalDataType": "DATABASE_ID", "canonicalName": "queueid"},
        {"logicalDataType": "TIMESTAMP", "canonicalName": "call_time"}
      ]
    },
    {
      "entityType": "Dimension",
      "canonicalName": "queue",
      "attributeList": [
        {"logicalDataType": "CATEGORICAL", "canonicalName": "queue_name"},
        {"logicalDataType": "ORDERED", "canonicalName": "priority"},
        {"logicalDataType": "GEOGRAPHY", "canonicalName": "site_shape"}
      ]
    },
    {
      "entityType": "Bridge",
      "canonicalName": "queue_agent",
      "attributeList": [
        {"logicalDataType": "BOOLEAN", "canonicalName": "is_primary"}
      ]
    }
  ],
  "entityRelations": [
    {"lhsEntityName": "queue", "rhsEntityName": "calls"}
  ],
  "sampleData": {"ignored": true}
}"#;

pub const SEARCH_HISTORY: &str = r#"{"searches": [
  {"query": "acv by queue last week", "count": 4},
  {"query": "top queues by aht", "count": 2}
]}"#;

pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

pub enum Step {
    Reply(&'static str),
    Fail,
    Hang,
}

/// Plays back a fixed script of outcomes and records every request it sees.
pub struct ScriptedGenerator {
    steps: Mutex<Vec<Step>>,
    pub requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedGenerator {
    pub fn new(mut steps: Vec<Step>) -> Arc<Self> {
        steps.reverse();
        Arc::new(Self {
            steps: Mutex::new(steps),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl GroundedGenerator for ScriptedGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, ApiError> {
        self.requests.lock().unwrap().push(request.clone());
        let step = self.steps.lock().unwrap().pop();
        match step {
            Some(Step::Reply(text)) => Ok(text.to_string()),
            Some(Step::Fail) => Err(ApiError::ProviderRateLimit("429".to_string())),
            Some(Step::Hang) | None => {
                tokio::time::sleep(Duration::from_secs(86_400)).await;
                Ok("never observed".to_string())
            }
        }
    }
}
