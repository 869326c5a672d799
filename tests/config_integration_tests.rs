// Integration tests for per-model configuration construction, the
// action-config cache, the finalize passes and sealing.

use scaffold_core::config::{GlobalConfig, ScaffoldConfig};
use scaffold_core::error::ConfigError;
use scaffold_core::models::{Action, ActionLink, Association, FormUi, ModelSchema};

fn blog_schema() -> ModelSchema {
    ModelSchema {
        model_id: "blog_post".to_string(),
        attributes: vec![
            "id".to_string(),
            "name".to_string(),
            "created_at".to_string(),
        ],
        content_columns: vec![
            "id".to_string(),
            "name".to_string(),
            "created_at".to_string(),
        ],
        associations: vec![
            Association::new("author"),
            Association::polymorphic("owner", "owner_type"),
        ],
        extra_associations: vec![],
        inheritance_column: None,
    }
}

fn ignoring_created_at() -> GlobalConfig {
    let mut global = GlobalConfig::default();
    global.set_ignore_columns(["created_at"]);
    global
}

#[test]
fn test_column_derivation() {
    let config = ScaffoldConfig::new(blog_schema(), &ignoring_created_at()).unwrap();

    // created_at dropped by the ignore set, owner_type never surfaces;
    // ordering between attribute and association groups is not part of the
    // contract, so assert set equality
    let mut names = config.columns().active_names();
    names.sort();
    assert_eq!(names, vec!["author", "id", "name", "owner"]);

    // name uniqueness: active count matches the deduplicated descriptor set
    assert_eq!(config.columns().len(), 4);
}

#[test]
fn test_polymorphic_foreign_type_column_excluded() {
    let mut schema = blog_schema();
    // this time the discriminator is a real persisted attribute
    schema.attributes.push("owner_type".to_string());
    schema.content_columns.push("owner_type".to_string());

    let config = ScaffoldConfig::new(schema, &ignoring_created_at()).unwrap();
    assert!(!config.columns().contains("owner_type"));
    // the descriptor still exists, only the active view dropped it
    assert!(config.columns().get("owner_type").is_some());
}

#[test]
fn test_non_content_pseudo_columns_excluded() {
    let mut schema = blog_schema();
    schema.attributes.push("computed_rank".to_string());
    // computed_rank deliberately left out of content_columns

    let config = ScaffoldConfig::new(schema, &ignoring_created_at()).unwrap();
    assert!(!config.columns().contains("computed_rank"));
    // associations have no schema backing and survive the content filter
    assert!(config.columns().contains("author"));
}

#[test]
fn test_invalid_schema_rejected() {
    let mut schema = blog_schema();
    schema.model_id = String::new();
    let err = ScaffoldConfig::new(schema, &GlobalConfig::default()).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidSchema { .. }));
}

#[test]
fn test_disabled_action_is_a_hard_error() {
    let mut config = ScaffoldConfig::new(blog_schema(), &GlobalConfig::default()).unwrap();
    config.set_actions([Action::List, Action::Show]);

    let err = config.action_config_mut(Action::Create).unwrap_err();
    assert_eq!(
        err,
        ConfigError::ActionNotEnabled {
            action: Action::Create
        }
    );
    // the message carries the remediation hint
    let message = err.to_string();
    assert!(message.contains("Create is not enabled"));
    assert!(message.contains("config.create.columns"));
}

#[test]
fn test_enabled_action_config_is_cached() {
    let mut config = ScaffoldConfig::new(blog_schema(), &GlobalConfig::default()).unwrap();

    if let scaffold_core::ActionConfig::List(list) =
        config.action_config_mut(Action::List).unwrap()
    {
        list.per_page = 42;
    } else {
        panic!("expected list config");
    }

    // second access returns the cached entry, not a fresh default
    match config.action_config_mut(Action::List).unwrap() {
        scaffold_core::ActionConfig::List(list) => assert_eq!(list.per_page, 42),
        other => panic!("expected list config, got {:?}", other.action()),
    }
}

#[test]
fn test_unknown_action_name_is_a_silent_miss() {
    let mut config = ScaffoldConfig::new(blog_schema(), &GlobalConfig::default()).unwrap();
    assert!(config.action_config_by_name("frobnicate").unwrap().is_none());
    // known name routes through the registry check
    config.set_actions([Action::Show]);
    assert!(config.action_config_by_name("list").is_err());
    assert!(config.action_config_by_name("show").unwrap().is_some());
}

#[test]
fn test_cloning_isolates_models_from_global_and_each_other() {
    let mut global = GlobalConfig::default();
    global
        .action_links
        .add(ActionLink::new("show_record", Action::Show));
    let global = global;

    let mut first = ScaffoldConfig::new(blog_schema(), &global).unwrap();
    let mut second_schema = blog_schema();
    second_schema.model_id = "page".to_string();
    let second = ScaffoldConfig::new(second_schema, &global).unwrap();

    first.set_actions([Action::List]);
    first
        .action_links_mut()
        .add(ActionLink::new("extra", Action::Delete));

    // the other model still has the full inherited registry and link set
    assert_eq!(second.actions().len(), 8);
    assert_eq!(second.action_links().len(), 1);
    // and the global source is untouched
    assert_eq!(global.actions.len(), 8);
    assert_eq!(global.action_links.len(), 1);
}

#[test]
fn test_cache_lazy_values_is_idempotent() {
    let mut global = GlobalConfig::default();
    global
        .action_links
        .add(ActionLink::new("show_record", Action::Show));
    global
        .action_links
        .add(ActionLink::new("new_record", Action::Create));

    let mut config = ScaffoldConfig::new(blog_schema(), &global).unwrap();
    config.cache_lazy_values();

    let members_first: Vec<String> = config
        .action_links_mut()
        .member()
        .iter()
        .map(|s| s.to_string())
        .collect();
    let sort_first: Vec<Option<String>> = config
        .columns()
        .iter_active()
        .map(|c| c.sort_clause().map(str::to_string))
        .collect();

    config.cache_lazy_values();

    let members_second: Vec<String> = config
        .action_links_mut()
        .member()
        .iter()
        .map(|s| s.to_string())
        .collect();
    let sort_second: Vec<Option<String>> = config
        .columns()
        .iter_active()
        .map(|c| c.sort_clause().map(str::to_string))
        .collect();

    assert_eq!(members_first, members_second);
    assert_eq!(sort_first, sort_second);
}

#[test]
fn test_link_names_cached_only_when_enabled() {
    let mut global = GlobalConfig::default();
    global
        .action_links
        .add(ActionLink::new("show_record", Action::Show));
    global.cache_action_link_urls = false;

    let mut config = ScaffoldConfig::new(blog_schema(), &global).unwrap();
    config.cache_lazy_values();
    assert!(config
        .action_links()
        .get("show_record")
        .unwrap()
        .cached_name()
        .is_none());

    global.cache_action_link_urls = true;
    let mut config = ScaffoldConfig::new(blog_schema(), &global).unwrap();
    config.cache_lazy_values();
    assert!(config
        .action_links()
        .get("show_record")
        .unwrap()
        .cached_name()
        .is_some());
}

#[test]
fn test_set_columns_appends_virtual_placeholders() {
    let mut config = ScaffoldConfig::new(blog_schema(), &GlobalConfig::default()).unwrap();
    config.set_columns(["name", "word_count"]);

    assert_eq!(config.columns().active_names(), vec!["name", "word_count"]);
    assert!(config.columns().get("word_count").unwrap().is_virtual());
    // the deactivated schema columns keep their descriptors
    assert!(config.columns().get("id").is_some());
}

#[test]
fn test_seal_loads_action_columns() {
    let mut config = ScaffoldConfig::new(blog_schema(), &ignoring_created_at()).unwrap();
    config.set_actions([Action::List, Action::Delete]);
    let sealed = config.seal().unwrap();

    let list = sealed.action_config(Action::List).unwrap();
    let columns = list.columns().expect("list config receives columns");
    assert_eq!(columns.len(), 4);

    // delete renders no columns
    let delete = sealed.action_config(Action::Delete).unwrap();
    assert!(delete.columns().is_none());

    // disabled actions were never materialized
    assert_eq!(
        sealed.action_config(Action::Create),
        Err(ConfigError::ActionNotEnabled {
            action: Action::Create
        })
    );
}

#[test]
fn test_label_fallback_pluralizes() {
    let config = ScaffoldConfig::new(blog_schema(), &GlobalConfig::default()).unwrap();
    assert_eq!(config.label(), "Blog posts");

    let mut config = ScaffoldConfig::new(blog_schema(), &GlobalConfig::default()).unwrap();
    config.label = Some("Articles".to_string());
    assert_eq!(config.label(), "Articles");
}

fn sti_schema() -> ModelSchema {
    let mut schema = blog_schema();
    schema.attributes.push("type".to_string());
    schema.content_columns.push("type".to_string());
    schema.inheritance_column = Some("type".to_string());
    schema
}

#[test]
fn test_sti_create_links_hides_discriminator() {
    let mut config = ScaffoldConfig::new(sti_schema(), &GlobalConfig::default()).unwrap();
    config.sti_create_links = true;
    config.sti_children = Some(vec!["draft_post".to_string(), "published_post".to_string()]);
    assert!(config.add_sti_create_links());

    let sealed = config.seal().unwrap();
    let column = sealed.columns().get("type").unwrap();
    assert_eq!(column.form_ui, Some(FormUi::Hidden));
    assert!(column.select_options.is_empty());
}

#[test]
fn test_sti_select_builds_child_options() {
    let mut config = ScaffoldConfig::new(sti_schema(), &GlobalConfig::default()).unwrap();
    config.sti_create_links = false;
    config.sti_children = Some(vec!["draft_post".to_string(), "published_post".to_string()]);

    let sealed = config.seal().unwrap();
    let column = sealed.columns().get("type").unwrap();
    assert_eq!(column.form_ui, Some(FormUi::Select));

    let options: Vec<(&str, &str)> = column
        .select_options
        .iter()
        .map(|o| (o.label.as_str(), o.value.as_str()))
        .collect();
    assert_eq!(
        options,
        vec![
            ("Draft post", "DraftPost"),
            ("Published post", "PublishedPost"),
        ]
    );
}

#[test]
fn test_sti_select_without_children_fails_before_freeze() {
    let mut config = ScaffoldConfig::new(sti_schema(), &GlobalConfig::default()).unwrap();
    config.sti_create_links = false;

    let err = config.seal().unwrap_err();
    assert!(matches!(err, ConfigError::MissingStiChildren { .. }));
}

#[test]
fn test_explicit_form_ui_survives_sti_pass() {
    let mut config = ScaffoldConfig::new(sti_schema(), &GlobalConfig::default()).unwrap();
    config.sti_create_links = true;
    config
        .columns_mut()
        .get_mut("type")
        .unwrap()
        .form_ui = Some(FormUi::Text);

    let sealed = config.seal().unwrap();
    assert_eq!(sealed.columns().get("type").unwrap().form_ui, Some(FormUi::Text));
}
