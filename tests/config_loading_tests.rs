// Configuration file loading and validation of configured workflows

use resource_workflow::{ConfigError, DefinitionError, EngineConfig, Marking, Stateful, Workflow};
use std::fs;
use tempfile::TempDir;

const ARTICLE_WORKFLOW: &str = r#"
[observability]
log_level = "warn"

[workflows.article]
initial = "draft"
states = ["draft", "review", "live", "archived"]

[[workflows.article.transitions]]
name = "submit"
from = ["draft"]
to = "review"
label = "Submit for review"

[[workflows.article.transitions]]
name = "go_live"
from = ["review"]
to = "live"

[[workflows.article.transitions]]
name = "archive"
from = ["draft", "review", "live"]
to = "archived"
"#;

#[test]
fn test_load_from_explicit_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("workflows.toml");
    fs::write(&path, ARTICLE_WORKFLOW).unwrap();

    let config = EngineConfig::load(Some(path.as_path())).unwrap();

    assert_eq!(config.observability.log_level, "warn");
    let definitions = config.definitions().unwrap();
    assert_eq!(definitions.len(), 1);
    assert_eq!(definitions[0].name(), "article");
    assert_eq!(definitions[0].terminal_states(), vec!["archived"]);
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.toml");

    let error = EngineConfig::load(Some(path.as_path())).unwrap_err();

    assert!(matches!(error, ConfigError::Load(_)));
}

#[test]
fn test_configured_workflow_drives_entities() {
    let config = EngineConfig::from_toml_str(ARTICLE_WORKFLOW).unwrap();
    let definition = config.definitions().unwrap().remove(0);
    let workflow = Workflow::<Marking>::new(definition).unwrap();

    let mut article = Marking::new();
    workflow.initialize(&mut article);
    assert_eq!(workflow.enabled_transitions(&article).unwrap(), vec!["submit", "archive"]);

    workflow.apply(&mut article, "submit").unwrap();
    workflow.apply(&mut article, "go_live").unwrap();
    assert_eq!(article.state("article"), Some("live"));

    let actions = workflow.enabled_actions(&article).unwrap();
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].name, "archive");
}

#[test]
fn test_save_and_reload_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("saved.toml");
    let original = EngineConfig::from_toml_str(ARTICLE_WORKFLOW).unwrap();

    original.save_to_file(&path).unwrap();
    let reloaded = EngineConfig::load(Some(path.as_path())).unwrap();

    assert_eq!(reloaded.workflows, original.workflows);
    assert_eq!(reloaded.observability.log_level, "warn");
}

#[test]
fn test_inconsistent_definition_aborts_loading() {
    let config = EngineConfig::from_toml_str(
        r#"
        [workflows.article]
        states = ["draft", "live"]

        [[workflows.article.transitions]]
        name = "publish"
        from = ["draft"]
        to = "live"

        [[workflows.article.transitions]]
        name = "publish"
        from = ["draft"]
        to = "live"
        "#,
    )
    .unwrap();

    let error = config.definitions().unwrap_err();

    match error {
        ConfigError::InvalidWorkflow { workflow, source } => {
            assert_eq!(workflow, "article");
            assert!(matches!(source, DefinitionError::DuplicateTransition { .. }));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_named_guard_must_be_registered() {
    let config = EngineConfig::from_toml_str(
        r#"
        [workflows.article]
        states = ["draft", "live"]

        [[workflows.article.transitions]]
        name = "publish"
        from = ["draft"]
        to = "live"
        guard = "has_body"
        "#,
    )
    .unwrap();
    let definition = config.definitions().unwrap().remove(0);

    let error = Workflow::<Marking>::new(definition.clone()).unwrap_err();
    assert!(matches!(error, DefinitionError::UnregisteredGuard { .. }));

    let workflow = Workflow::<Marking>::builder(definition)
        .named_guard("has_body", |m: &Marking| m.get("body").is_some())
        .build()
        .unwrap();
    let mut article = Marking::new().with("article", "draft");
    assert!(!workflow.can(&article, "publish").unwrap());

    article.set_state("body", "present");
    assert!(workflow.can(&article, "publish").unwrap());
}
