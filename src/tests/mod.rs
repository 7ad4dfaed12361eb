use crate::registries_from_source;
use crate::registry::{RegistryError, Value};
use crate::SourceErrors;
use std::path::PathBuf;

fn load(source: &str) -> Result<crate::registry::RegistrySet, SourceErrors> {
    registries_from_source("tutorial", PathBuf::from("tutorial.reg"), source)
}

#[test]
fn direction_tutorial_round_trips() {
    let set = load(
        "// movement on a grid\n\
         enum Direction { Up, Down, Left, Right }",
    )
    .expect("should load");

    let direction = set.get("Direction").expect("Direction should exist");
    assert_eq!(direction.value("Up"), Ok(&Value::Int(0)));
    assert_eq!(direction.value("Right"), Ok(&Value::Int(3)));
    assert_eq!(direction.name_of_int(0), Ok("Up"));
    assert_eq!(direction.name_of_int(3), Ok("Right"));
}

#[test]
fn explicit_start_tutorial_counts_upward() {
    let set = load("enum Direction { Up = 1, Down, Left }").expect("should load");
    let direction = set.get("Direction").expect("Direction should exist");
    assert_eq!(direction.value("Up"), Ok(&Value::Int(1)));
    assert_eq!(direction.value("Down"), Ok(&Value::Int(2)));
    assert_eq!(direction.value("Left"), Ok(&Value::Int(3)));
}

#[test]
fn mixed_value_tutorial_limits_reverse_lookup() {
    let set = load(r#"enum BootMessage { No = 0, Yes = "YES" }"#).expect("should load");
    let boot = set.get("BootMessage").expect("BootMessage should exist");

    assert_eq!(boot.value("Yes"), Ok(&Value::Str("YES".into())));
    assert_eq!(boot.name_of_int(0), Ok("No"));
    assert!(matches!(
        boot.name_of(&Value::from("YES")),
        Err(RegistryError::NoReverseMapping { .. })
    ));
}

#[test]
fn several_registries_coexist_in_one_file() {
    let set = load(
        "enum Direction { Up, Down }\n\
         /* explicit values */\n\
         enum Status { Active = 1, Retired = 9, Pending }",
    )
    .expect("should load");

    assert_eq!(set.len(), 2);
    let status = set.get("Status").expect("Status should exist");
    assert_eq!(status.value("Pending"), Ok(&Value::Int(10)));
    assert_eq!(status.name_of_int(9), Ok("Retired"));
}

#[test]
fn syntax_errors_surface_through_the_pipeline() {
    let err = load("enum Direction { Up Down }").expect_err("should fail");
    match err {
        SourceErrors::Syntax(errors) => {
            assert_eq!(errors.errors.len(), 1);
            assert!(errors.errors[0].message.contains("Expected `,` or `}`"));
        }
        SourceErrors::Build(_) => panic!("expected a syntax error"),
    }
}

#[test]
fn duplicate_entries_surface_as_build_errors() {
    let err = load("enum Direction { Up, Up }").expect_err("should fail");
    match err {
        SourceErrors::Build(errors) => {
            assert_eq!(errors.errors.len(), 1);
            assert!(errors.errors[0].message.contains("Duplicate entry `Up`"));
        }
        SourceErrors::Syntax(_) => panic!("expected a build error"),
    }
}

#[test]
fn queries_after_loading_are_caller_recoverable() {
    let set = load("enum Direction { Up }").expect("should load");
    let direction = set.get("Direction").expect("Direction should exist");

    // A miss is an error value, not a panic; callers may treat it as
    // "not present".
    let missing = direction.value("Diagonal");
    assert!(matches!(missing, Err(RegistryError::NameNotFound { .. })));
    assert!(direction.value("Up").is_ok());
}
