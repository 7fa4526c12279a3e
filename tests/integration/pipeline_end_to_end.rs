//! End-to-end pipeline tests with a scripted generator.

use ideate::context::parse_taxonomy_passage;
use ideate::generation::{Orchestrator, TaskKind};
use ideate::schema::{AttributeCategory, EntityRole};
use ideate::{IdeateError, PipelineMode, PromptPipeline};
use std::time::Duration;
use tempfile::TempDir;

use crate::integration::test_utils::{
    write_file, ScriptedGenerator, Step, CONTACT_CENTER_SCHEMA, SEARCH_HISTORY,
};

fn pipeline(generator: std::sync::Arc<ScriptedGenerator>) -> PromptPipeline {
    PromptPipeline::new(Orchestrator::with_timeout(generator, Duration::from_secs(30)))
}

#[tokio::test]
async fn test_generate_prompts_from_files() {
    let temp = TempDir::new().unwrap();
    let schema = write_file(temp.path(), "schema.json", CONTACT_CENTER_SCHEMA);
    let history = write_file(temp.path(), "history.json", SEARCH_HISTORY);
    let generator = ScriptedGenerator::new(vec![Step::Reply(
        "Here are some prompts:\n1. ACV by queue_name last month\n2. \"Trend of AHT by week\"\n- not a prompt\n3. Rank queues by priority",
    )]);

    let results = pipeline(generator.clone())
        .generate_prompts("contact center", &schema, Some(&history))
        .await
        .unwrap();

    assert_eq!(
        results.prompts(),
        vec![
            "ACV by queue_name last month",
            "Trend of AHT by week",
            "Rank queues by priority"
        ]
    );
    assert!(results.records()[0].references("acv"));
    assert!(results.records()[0].references("queue_name"));
    assert!(results.records()[1].references("aht"));
    assert!(results.records()[2].references("priority"));

    let requests = generator.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    let context = requests[0].context();
    assert_eq!(context.len(), 3);
    assert!(context.passages()[2].text().starts_with("Previous Search History:"));
    assert!(requests[0].question().contains("contact center"));
}

#[tokio::test]
async fn test_context_reflects_classification() {
    let temp = TempDir::new().unwrap();
    let schema = write_file(temp.path(), "schema.json", CONTACT_CENTER_SCHEMA);
    let generator = ScriptedGenerator::new(vec![Step::Reply("1. ACV by queue")]);

    pipeline(generator.clone())
        .generate_prompts("contact center", &schema, None)
        .await
        .unwrap();

    let requests = generator.requests.lock().unwrap();
    let context = requests[0].context();
    assert_eq!(context.len(), 2, "no history passage without a history file");

    let pair = parse_taxonomy_passage(context.passages()[0].text()).unwrap();
    assert_eq!(pair.entities.get(EntityRole::Fact), ["calls"]);
    assert_eq!(pair.entities.get(EntityRole::Dimension), ["queue"]);
    assert!(pair.attributes.category_of("site_shape").is_none());
    assert_eq!(
        pair.attributes.category_of("is_primary"),
        Some(AttributeCategory::Boolean)
    );
}

#[tokio::test(start_paused = true)]
async fn test_generator_timing_out_twice_is_unavailable() {
    let temp = TempDir::new().unwrap();
    let schema = write_file(temp.path(), "schema.json", CONTACT_CENTER_SCHEMA);
    let generator = ScriptedGenerator::new(vec![Step::Hang, Step::Hang, Step::Reply("1. late")]);

    let err = pipeline(generator.clone())
        .generate_prompts("contact center", &schema, None)
        .await
        .unwrap_err();

    assert!(err.is_generation_unavailable());
    assert!(err.to_string().contains("2 attempt"));
    assert_eq!(generator.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_retry_recovers_after_timeout() {
    let temp = TempDir::new().unwrap();
    let schema = write_file(temp.path(), "schema.json", CONTACT_CENTER_SCHEMA);
    let generator = ScriptedGenerator::new(vec![Step::Hang, Step::Reply("1. AHT by queue")]);

    let results = pipeline(generator.clone())
        .generate_prompts("contact center", &schema, None)
        .await
        .unwrap();

    assert_eq!(results.prompts(), vec!["AHT by queue"]);
    let requests = generator.requests.lock().unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].context(), requests[1].context());
}

#[tokio::test]
async fn test_provider_errors_then_blank_reply_is_unavailable() {
    let temp = TempDir::new().unwrap();
    let schema = write_file(temp.path(), "schema.json", CONTACT_CENTER_SCHEMA);
    let generator = ScriptedGenerator::new(vec![Step::Fail, Step::Reply("   \n")]);

    let err = pipeline(generator.clone())
        .generate_prompts("contact center", &schema, None)
        .await
        .unwrap_err();

    assert!(err.is_generation_unavailable());
    assert_eq!(generator.calls(), 2);
}

#[tokio::test]
async fn test_malformed_schema_makes_no_generator_call() {
    let temp = TempDir::new().unwrap();
    let schema = write_file(temp.path(), "schema.json", "{\"entityList\": [");
    let generator = ScriptedGenerator::new(vec![Step::Reply("1. unused")]);

    let err = pipeline(generator.clone())
        .generate_prompts("contact center", &schema, None)
        .await
        .unwrap_err();

    assert!(matches!(err, IdeateError::Schema(_)));
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn test_malformed_history_is_schema_error() {
    let temp = TempDir::new().unwrap();
    let schema = write_file(temp.path(), "schema.json", CONTACT_CENTER_SCHEMA);
    let history = write_file(temp.path(), "history.json", "not json");
    let generator = ScriptedGenerator::new(vec![]);

    let err = pipeline(generator.clone())
        .generate_prompts("contact center", &schema, Some(&history))
        .await
        .unwrap_err();

    assert!(matches!(err, IdeateError::Schema(_)));
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn test_delegated_mode_end_to_end() {
    let temp = TempDir::new().unwrap();
    let schema = write_file(temp.path(), "schema.json", CONTACT_CENTER_SCHEMA);
    let generator = ScriptedGenerator::new(vec![
        Step::Reply("1. ACV by queue\n2. Busiest hour of the day"),
        Step::Reply(
            "Prompt: ACV by queue\nAttributes: ACV, queue_name, wait time\nPrompt: Busiest hour of the day\nPrompt: orphaned\nAttributes: call_time",
        ),
    ]);

    let results = pipeline(generator.clone())
        .with_mode(PipelineMode::Delegated)
        .generate_prompts("contact center", &schema, None)
        .await
        .unwrap();

    assert_eq!(results.prompts(), vec!["ACV by queue", "orphaned"]);
    assert!(results.records()[1].references("call_time"));
    assert_eq!(
        results.records()[0].attributes().iter().collect::<Vec<_>>(),
        vec!["acv", "queue_name"]
    );

    let requests = generator.requests.lock().unwrap();
    assert_eq!(requests[1].task(), TaskKind::AttributeExtraction);
    assert!(requests[1].question().contains("Busiest hour of the day"));
    assert_eq!(requests[1].context().len(), 3);
}

#[tokio::test]
async fn test_label_relations_from_schema_file() {
    let temp = TempDir::new().unwrap();
    let schema = write_file(temp.path(), "schema.json", CONTACT_CENTER_SCHEMA);
    let generator = ScriptedGenerator::new(vec![Step::Reply("[\"RECEIVES\"]")]);

    let relations = pipeline(generator.clone())
        .label_relations("contact center", &schema)
        .await
        .unwrap();

    assert_eq!(relations.len(), 1);
    assert_eq!(relations[0].lhs, "queue");
    assert_eq!(relations[0].relation.as_deref(), Some("RECEIVES"));
    assert_eq!(
        generator.requests.lock().unwrap()[0].task(),
        TaskKind::RelationLabeling
    );
}

#[tokio::test]
async fn test_result_set_serializes_for_callers() {
    let temp = TempDir::new().unwrap();
    let schema = write_file(temp.path(), "schema.json", CONTACT_CENTER_SCHEMA);
    let generator = ScriptedGenerator::new(vec![Step::Reply("1. ACV by queue")]);

    let results = pipeline(generator)
        .generate_prompts("contact center", &schema, None)
        .await
        .unwrap();

    let json = serde_json::to_value(&results).unwrap();
    assert_eq!(json[0]["prompt"], "ACV by queue");
    assert_eq!(json[0]["attributes"][0], "acv");
}
