use valguard_core::{builtin_registry, rules::UuidCheck, Severity, Validator, Value};

#[test]
fn test_base64_scenarios() {
    let registry = builtin_registry().build().unwrap();

    let ok = registry.call("is_base64", &Value::string("U29sdmluZyB0aGU=")).unwrap();
    assert_eq!(ok.result, Some(true));
    assert!(ok.diagnostics.is_empty());

    let ko = registry.call("is_base64", &Value::string("not base64!")).unwrap();
    assert_eq!(ko.result, Some(false));
    assert_eq!(ko.diagnostics.len(), 1);
    let diag = &ko.diagnostics.as_slice()[0];
    assert_eq!(diag.severity, Severity::Error);
    assert!(diag.detail.contains("invalid encoding"));
}

#[test]
fn test_cidr_scenarios() {
    let registry = builtin_registry().build().unwrap();

    let ok = registry.call("is_cidr", &Value::string("10.0.0.0/24")).unwrap();
    assert_eq!(ok.result, Some(true));

    let ko = registry.call("is_cidr", &Value::string("10.0.0.0/99")).unwrap();
    assert_eq!(ko.result, Some(false));
    assert_eq!(ko.diagnostics.len(), 1);
    assert_eq!(ko.diagnostics.as_slice()[0].severity, Severity::Error);
}

#[test]
fn test_every_builtin_returns_unknown_for_absent_input() {
    let registry = builtin_registry().build().unwrap();

    for function in registry.functions() {
        for input in [Value::unknown(), Value::null()] {
            let response = function.call(&input);
            assert_eq!(response.result, None, "{}", function.name());
            assert!(response.diagnostics.is_empty(), "{}", function.name());
            assert!(response.error.is_none(), "{}", function.name());
        }
    }
}

#[test]
fn test_every_failure_carries_an_error_diagnostic() {
    let registry = builtin_registry().build().unwrap();

    for function in registry.functions() {
        let response = function.call(&Value::string("definitely not valid!"));
        assert_eq!(response.result, Some(false), "{}", function.name());
        assert!(response.diagnostics.has_error(), "{}", function.name());
        assert!(response.error.is_some(), "{}", function.name());
    }
}

#[test]
fn test_port_accepts_numbers_and_strings() {
    let registry = builtin_registry().build().unwrap();

    assert_eq!(registry.call("is_port", &Value::number(443.0)).unwrap().result, Some(true));
    assert_eq!(registry.call("is_port", &Value::string("8080")).unwrap().result, Some(true));
    assert_eq!(registry.call("is_port", &Value::string("0")).unwrap().result, Some(false));
    assert_eq!(registry.call("is_port", &Value::number(70000.0)).unwrap().result, Some(false));
}

#[test]
fn test_string_function_rejects_number_argument() {
    let registry = builtin_registry().build().unwrap();

    let direct = UuidCheck::new().validate(&Value::number(1.0));
    let response = registry.call("is_uuid", &Value::number(1.0)).unwrap();
    assert_eq!(response.result, Some(direct.is_empty()));
    assert_eq!(response.result, Some(false));
    assert_eq!(response.diagnostics.len(), 1);
    let diag = &response.diagnostics.as_slice()[0];
    assert_eq!(diag.summary, "Invalid value type");
    assert_eq!(diag.attribute_path.as_deref(), Some("value"));
    assert_eq!(response.error.unwrap().argument, Some(0));
}

#[test]
fn test_every_builtin_judges_a_bool_argument() {
    let registry = builtin_registry().build().unwrap();

    for function in registry.functions() {
        let response = function.call(&Value::bool(true));
        assert_eq!(response.result, Some(false), "{}", function.name());
        assert!(response.diagnostics.has_error(), "{}", function.name());
    }
}

#[test]
fn test_descriptions_are_static() {
    let registry = builtin_registry().build().unwrap();
    let cidr = registry.get("is_cidr").unwrap();

    let before = cidr.definition().description.clone();
    let _ = cidr.call(&Value::string("10.0.0.0/99"));
    assert_eq!(cidr.definition().description, before);
    assert_eq!(before, "value must be valid CIDR notation");
}
