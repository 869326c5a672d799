// Integration tests for per-user copy-on-write overlays over a sealed
// configuration shared by many sessions.

use std::sync::Arc;

use indexmap::IndexMap;
use scaffold_core::config::{GlobalConfig, ScaffoldConfig, SettingValue};
use scaffold_core::models::{Action, Association, FormUi, ModelSchema};
use scaffold_core::overlay::UserSettingsOverlay;
use scaffold_core::SealedScaffoldConfig;

fn sealed_config() -> Arc<SealedScaffoldConfig> {
    let schema = ModelSchema {
        model_id: "blog_post".to_string(),
        attributes: vec!["id".to_string(), "name".to_string()],
        content_columns: vec!["id".to_string(), "name".to_string()],
        associations: vec![Association::new("author")],
        extra_associations: vec![],
        inheritance_column: None,
    };
    let config = ScaffoldConfig::new(schema, &GlobalConfig::default()).unwrap();
    Arc::new(config.seal().unwrap())
}

#[test]
fn test_two_overlays_never_see_each_other() {
    let base = sealed_config();
    let mut alice = UserSettingsOverlay::new(Arc::clone(&base));
    let mut bob = UserSettingsOverlay::new(Arc::clone(&base));

    alice
        .set("theme", SettingValue::Text("slate".to_string()))
        .unwrap();
    bob.set("theme", SettingValue::Text("sand".to_string()))
        .unwrap();

    assert_eq!(
        alice.get("theme").unwrap(),
        SettingValue::Text("slate".to_string())
    );
    assert_eq!(
        bob.get("theme").unwrap(),
        SettingValue::Text("sand".to_string())
    );
    // the shared base still answers with its own value
    assert_eq!(base.theme(), "default");
}

#[test]
fn test_action_overlay_isolation_and_fallthrough() {
    let base = sealed_config();
    let mut alice = UserSettingsOverlay::new(Arc::clone(&base));
    let mut bob = UserSettingsOverlay::new(Arc::clone(&base));

    alice
        .action(Action::List)
        .unwrap()
        .set("per_page", SettingValue::Int(100))
        .unwrap();

    // bob reads the sealed default
    assert_eq!(
        bob.action(Action::List).unwrap().get("per_page").unwrap(),
        SettingValue::Int(15)
    );
    // alice reads her own override, and her other keys still fall through
    let alice_list = alice.action(Action::List).unwrap();
    assert_eq!(alice_list.get("per_page").unwrap(), SettingValue::Int(100));
    assert_eq!(alice_list.get("page").unwrap(), SettingValue::Int(1));
}

#[test]
fn test_action_overlay_respects_enablement() {
    let schema = ModelSchema {
        model_id: "note".to_string(),
        attributes: vec!["id".to_string(), "body".to_string()],
        content_columns: vec!["id".to_string(), "body".to_string()],
        associations: vec![],
        extra_associations: vec![],
        inheritance_column: None,
    };
    let mut config = ScaffoldConfig::new(schema, &GlobalConfig::default()).unwrap();
    config.set_actions([Action::List]);
    let base = Arc::new(config.seal().unwrap());

    let mut overlay = UserSettingsOverlay::new(base);
    assert!(overlay.action(Action::Delete).is_err());
    assert!(overlay.action_by_name("delete").is_err());
    assert!(overlay.action_by_name("not_an_action").unwrap().is_none());
}

#[test]
fn test_cow_columns_are_per_overlay() {
    let base = sealed_config();
    let mut alice = UserSettingsOverlay::new(Arc::clone(&base));
    let mut bob = UserSettingsOverlay::new(Arc::clone(&base));

    alice
        .columns()
        .get("name")
        .unwrap()
        .modify()
        .form_ui = Some(FormUi::Textarea);

    assert_eq!(
        alice.columns().get("name").unwrap().read().form_ui,
        Some(FormUi::Textarea)
    );
    assert_eq!(bob.columns().get("name").unwrap().read().form_ui, None);
    assert_eq!(base.columns().get("name").unwrap().form_ui, None);
    assert_eq!(alice.columns().customized_count(), 1);
    assert_eq!(bob.columns().customized_count(), 0);
}

#[test]
fn test_cow_column_memoized_within_overlay() {
    let base = sealed_config();
    let mut overlay = UserSettingsOverlay::new(base);

    overlay.columns().get("name").unwrap().modify().sortable = false;
    // a later request for the same column sees the earlier write
    assert!(!overlay.columns().get("name").unwrap().read().sortable);
    // untouched columns are still plain reads from the base
    assert!(!overlay.columns().get("id").unwrap().is_overridden());
}

#[test]
fn test_overrides_survive_a_yaml_round_trip() {
    let base = sealed_config();
    let mut overlay = UserSettingsOverlay::new(Arc::clone(&base));
    overlay
        .set("theme", SettingValue::Text("slate".to_string()))
        .unwrap();
    overlay
        .set("conditional_get_support", SettingValue::Bool(true))
        .unwrap();

    // the host session store persists the sparse map as YAML
    let persisted = serde_yaml_ng::to_string(overlay.overrides()).unwrap();
    let restored: IndexMap<String, SettingValue> =
        serde_yaml_ng::from_str(&persisted).unwrap();

    let mut next_session = UserSettingsOverlay::new(base);
    next_session.restore(restored);
    assert_eq!(
        next_session.get("theme").unwrap(),
        SettingValue::Text("slate".to_string())
    );
    assert_eq!(
        next_session.get("conditional_get_support").unwrap(),
        SettingValue::Bool(true)
    );
}
