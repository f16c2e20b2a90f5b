//! Tests to verify that shared model types are Send + Sync.

use scaffold_core::*;

const fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_template_model_is_send_sync() {
    // Definitions are shared behind Arc by the registry
    assert_send_sync::<TemplateDefinition>();
    assert_send_sync::<ParameterSpec>();
    assert_send_sync::<FileTree>();
    assert_send_sync::<FieldValidator>();
}

#[test]
fn test_settings_are_send_sync() {
    assert_send_sync::<ScaffoldSettings>();
}

#[test]
fn test_error_is_send_sync() {
    assert_send_sync::<Error>();
}
