//! Named-constant registries: an ordered set of symbolic names bound to
//! values, built once and immutable afterwards. Forward lookup (name to
//! value) always works; reverse lookup (value to name) is defined for
//! integer values only, and on a collision the later entry wins.

use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// A value bound to a registry entry.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Value {
    Int(i64),
    Str(String),
}

impl Value {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(value) => Some(*value),
            Value::Str(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(value) => write!(f, "{}", value),
            Value::Str(value) => write!(f, "\"{}\"", value),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

/// One entry in the construction sequence: bare entries take the running
/// auto counter, explicit entries carry their own value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntrySpec {
    Auto(String),
    Int(String, i64),
    Str(String, String),
}

impl EntrySpec {
    pub fn name(&self) -> &str {
        match self {
            EntrySpec::Auto(name) | EntrySpec::Int(name, _) | EntrySpec::Str(name, _) => name,
        }
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("duplicate name `{name}` in registry `{registry}`")]
    DuplicateName { registry: String, name: String },
    #[error("registry `{registry}` has no entry named `{name}`")]
    NameNotFound { registry: String, name: String },
    #[error("registry `{registry}` has no reverse mapping for value {value}")]
    NoReverseMapping { registry: String, value: Value },
    #[error("registry `{name}` is already defined")]
    DuplicateRegistry { name: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub value: Value,
}

/// An immutable bidirectional lookup table over named constants.
#[derive(Clone, Debug)]
pub struct Registry {
    name: String,
    entries: Vec<Entry>,
    forward: HashMap<String, usize>,
    reverse: HashMap<i64, usize>,
}

impl Registry {
    /// Builds a registry from an ordered entry sequence.
    ///
    /// The auto counter starts at 0. A bare entry takes the counter and
    /// increments it; an explicit integer entry resets the counter to
    /// value+1; a string entry leaves the counter alone. Duplicate names
    /// are the only construction failure.
    pub fn build(name: impl Into<String>, specs: Vec<EntrySpec>) -> Result<Self, RegistryError> {
        let name = name.into();
        let mut entries: Vec<Entry> = Vec::with_capacity(specs.len());
        let mut forward = HashMap::with_capacity(specs.len());
        let mut reverse = HashMap::new();
        let mut next_auto: i64 = 0;

        for spec in specs {
            let (entry_name, value) = match spec {
                EntrySpec::Auto(entry_name) => {
                    let value = next_auto;
                    next_auto = next_auto.wrapping_add(1);
                    (entry_name, Value::Int(value))
                }
                EntrySpec::Int(entry_name, value) => {
                    next_auto = value.wrapping_add(1);
                    (entry_name, Value::Int(value))
                }
                EntrySpec::Str(entry_name, value) => (entry_name, Value::Str(value)),
            };

            if forward.contains_key(&entry_name) {
                return Err(RegistryError::DuplicateName {
                    registry: name,
                    name: entry_name,
                });
            }

            let index = entries.len();
            if let Value::Int(int) = value {
                // Later entries overwrite earlier ones on a collision.
                reverse.insert(int, index);
            }
            forward.insert(entry_name.clone(), index);
            entries.push(Entry {
                name: entry_name,
                value,
            });
        }

        Ok(Self {
            name,
            entries,
            forward,
            reverse,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.forward.contains_key(name)
    }

    /// Entries in definition order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    /// Forward lookup: name to value.
    pub fn value(&self, name: &str) -> Result<&Value, RegistryError> {
        self.forward
            .get(name)
            .map(|&index| &self.entries[index].value)
            .ok_or_else(|| RegistryError::NameNotFound {
                registry: self.name.clone(),
                name: name.to_string(),
            })
    }

    /// Reverse lookup: value to the most-recently-assigned name. String
    /// values never have a reverse mapping.
    pub fn name_of(&self, value: &Value) -> Result<&str, RegistryError> {
        match value.as_int() {
            Some(int) => self.name_of_int(int),
            None => Err(RegistryError::NoReverseMapping {
                registry: self.name.clone(),
                value: value.clone(),
            }),
        }
    }

    pub fn name_of_int(&self, value: i64) -> Result<&str, RegistryError> {
        self.reverse
            .get(&value)
            .map(|&index| self.entries[index].name.as_str())
            .ok_or_else(|| RegistryError::NoReverseMapping {
                registry: self.name.clone(),
                value: Value::Int(value),
            })
    }
}

/// An ordered collection of registries, unique by name.
#[derive(Clone, Debug, Default)]
pub struct RegistrySet {
    registries: Vec<Registry>,
    index: HashMap<String, usize>,
}

impl RegistrySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, registry: Registry) -> Result<(), RegistryError> {
        if self.index.contains_key(registry.name()) {
            return Err(RegistryError::DuplicateRegistry {
                name: registry.name().to_string(),
            });
        }
        self.index
            .insert(registry.name().to_string(), self.registries.len());
        self.registries.push(registry);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Registry> {
        self.index.get(name).map(|&index| &self.registries[index])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Registry> {
        self.registries.iter()
    }

    pub fn len(&self) -> usize {
        self.registries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auto(name: &str) -> EntrySpec {
        EntrySpec::Auto(name.to_string())
    }

    fn int(name: &str, value: i64) -> EntrySpec {
        EntrySpec::Int(name.to_string(), value)
    }

    fn str_entry(name: &str, value: &str) -> EntrySpec {
        EntrySpec::Str(name.to_string(), value.to_string())
    }

    #[test]
    fn bare_names_count_from_zero() {
        let registry = Registry::build(
            "Direction",
            vec![auto("Up"), auto("Down"), auto("Left"), auto("Right")],
        )
        .expect("should build");

        assert_eq!(registry.value("Up"), Ok(&Value::Int(0)));
        assert_eq!(registry.value("Down"), Ok(&Value::Int(1)));
        assert_eq!(registry.value("Left"), Ok(&Value::Int(2)));
        assert_eq!(registry.value("Right"), Ok(&Value::Int(3)));
        assert_eq!(registry.name_of_int(0), Ok("Up"));
        assert_eq!(registry.name_of_int(3), Ok("Right"));
    }

    #[test]
    fn explicit_start_shifts_subsequent_bare_entries() {
        let registry = Registry::build("Direction", vec![int("Up", 1), auto("Down"), auto("Left")])
            .expect("should build");

        assert_eq!(registry.value("Up"), Ok(&Value::Int(1)));
        assert_eq!(registry.value("Down"), Ok(&Value::Int(2)));
        assert_eq!(registry.value("Left"), Ok(&Value::Int(3)));
    }

    #[test]
    fn explicit_value_mid_sequence_resets_the_counter() {
        let registry = Registry::build(
            "Mixed",
            vec![auto("A"), int("B", 10), auto("C"), auto("D")],
        )
        .expect("should build");

        assert_eq!(registry.value("A"), Ok(&Value::Int(0)));
        assert_eq!(registry.value("B"), Ok(&Value::Int(10)));
        assert_eq!(registry.value("C"), Ok(&Value::Int(11)));
        assert_eq!(registry.value("D"), Ok(&Value::Int(12)));
    }

    #[test]
    fn string_values_leave_the_counter_alone() {
        let registry = Registry::build(
            "Boot",
            vec![auto("First"), str_entry("Label", "tag"), auto("Second")],
        )
        .expect("should build");

        assert_eq!(registry.value("First"), Ok(&Value::Int(0)));
        assert_eq!(registry.value("Label"), Ok(&Value::Str("tag".into())));
        assert_eq!(registry.value("Second"), Ok(&Value::Int(1)));
    }

    #[test]
    fn reverse_is_the_inverse_of_forward_for_unique_integers() {
        let registry = Registry::build(
            "Direction",
            vec![auto("Up"), auto("Down"), int("Jump", 40), auto("Fall")],
        )
        .expect("should build");

        for entry in registry.entries() {
            let name = registry
                .name_of(&entry.value)
                .expect("every integer value should reverse-resolve");
            assert_eq!(name, entry.name);
        }
    }

    #[test]
    fn string_entries_never_reverse_resolve() {
        let registry = Registry::build("Boot", vec![int("No", 0), str_entry("Yes", "YES")])
            .expect("should build");

        assert_eq!(registry.value("Yes"), Ok(&Value::Str("YES".into())));
        assert_eq!(registry.name_of_int(0), Ok("No"));
        assert_eq!(
            registry.name_of(&Value::from("YES")),
            Err(RegistryError::NoReverseMapping {
                registry: "Boot".into(),
                value: Value::Str("YES".into()),
            })
        );
    }

    #[test]
    fn integer_collision_keeps_both_forward_names_and_the_later_reverse_name() {
        let registry = Registry::build("Alias", vec![int("Old", 2), int("New", 2)])
            .expect("should build");

        assert_eq!(registry.value("Old"), Ok(&Value::Int(2)));
        assert_eq!(registry.value("New"), Ok(&Value::Int(2)));
        assert_eq!(registry.name_of_int(2), Ok("New"));
    }

    #[test]
    fn duplicate_names_fail_regardless_of_values() {
        let err = Registry::build("Direction", vec![auto("Up"), int("Up", 7)])
            .expect_err("should fail");
        assert_eq!(
            err,
            RegistryError::DuplicateName {
                registry: "Direction".into(),
                name: "Up".into(),
            }
        );

        let err = Registry::build("Boot", vec![str_entry("Yes", "a"), str_entry("Yes", "b")])
            .expect_err("should fail");
        assert!(matches!(err, RegistryError::DuplicateName { .. }));
    }

    #[test]
    fn forward_lookup_of_absent_name_fails() {
        let registry = Registry::build("Direction", vec![auto("Up")]).expect("should build");
        assert_eq!(
            registry.value("Sideways"),
            Err(RegistryError::NameNotFound {
                registry: "Direction".into(),
                name: "Sideways".into(),
            })
        );
    }

    #[test]
    fn reverse_lookup_of_absent_value_fails() {
        let registry = Registry::build("Direction", vec![auto("Up")]).expect("should build");
        assert_eq!(
            registry.name_of_int(9),
            Err(RegistryError::NoReverseMapping {
                registry: "Direction".into(),
                value: Value::Int(9),
            })
        );
    }

    #[test]
    fn empty_registry_is_valid() {
        let registry = Registry::build("Empty", Vec::new()).expect("should build");
        assert!(registry.is_empty());
        assert!(!registry.contains("anything"));
    }

    #[test]
    fn entries_iterate_in_definition_order() {
        let registry = Registry::build("Order", vec![int("B", 5), auto("A"), auto("C")])
            .expect("should build");
        let names: Vec<&str> = registry.entries().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
    }

    #[test]
    fn negative_explicit_values_continue_upward() {
        let registry = Registry::build("Depth", vec![int("Low", -2), auto("Mid"), auto("High")])
            .expect("should build");
        assert_eq!(registry.value("Mid"), Ok(&Value::Int(-1)));
        assert_eq!(registry.value("High"), Ok(&Value::Int(0)));
    }

    #[test]
    fn registry_set_rejects_duplicate_names() {
        let mut set = RegistrySet::new();
        set.insert(Registry::build("A", vec![auto("X")]).expect("should build"))
            .expect("first insert should succeed");
        let err = set
            .insert(Registry::build("A", Vec::new()).expect("should build"))
            .expect_err("second insert should fail");
        assert_eq!(err, RegistryError::DuplicateRegistry { name: "A".into() });
        assert_eq!(set.len(), 1);
        assert!(set.get("A").is_some());
    }
}
