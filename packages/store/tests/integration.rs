use std::sync::{Arc, Mutex};

use formpath_store::{
    path, BoxError, ErrorMap, FormStore, FormStoreOptions, Validation, ValidationTrigger, Value,
};

fn signup_values() -> Value {
    Value::from_entries([
        ("email", Value::from("")),
        ("password", Value::from("")),
        (
            "address",
            Value::from_entries([("city", Value::from("Oslo")), ("zip", Value::Null)]),
        ),
        ("tags", Value::from(vec!["new"])),
    ])
}

fn signup_rules(values: &Value) -> Result<ErrorMap, BoxError> {
    let mut errors = ErrorMap::new();
    let email = values.get(&path!("email")).and_then(Value::as_str);
    if !email.is_some_and(|e| e.contains('@')) {
        errors.insert(path!("email"), Some("enter a valid email".to_string()));
    }
    let password = values.get(&path!("password")).and_then(Value::as_str);
    if password.map_or(0, str::len) < 8 {
        errors.insert(path!("password"), Some("at least 8 characters".to_string()));
    }
    Ok(errors)
}

#[test]
fn nested_update_shares_untouched_branches() {
    let initial = Value::from_entries([
        ("a", Value::from_entries([("b", Value::from(1))])),
        ("list", Value::from(vec![1, 2])),
    ]);
    let mut store = FormStore::new(initial.clone());

    let resolved = formpath_store::resolve(store.values(), |s| s.field("a")?.field("b")).unwrap();
    assert_eq!(resolved.path.to_string(), "a.b");
    assert_eq!(resolved.value, Some(&Value::from(1)));

    store
        .set_field_value(|s| s.field("a")?.field("b"), Value::from(5))
        .unwrap();
    assert_eq!(
        store.get_field_value(|s| s.field("a")?.field("b")).unwrap(),
        Some(Value::from(5))
    );
    assert_eq!(initial.get(&path!("a.b")), Some(&Value::from(1)));

    let list = store.get_field_value(|s| s.field("list")).unwrap().unwrap();
    assert_eq!(list, Value::from(vec![1, 2]));
    assert!(list.shares_subtree(initial.get(&path!("list")).unwrap()));
}

#[test]
fn signup_flow_with_both_triggers() {
    let mut store = FormStoreOptions::new(signup_values())
        .validation(Validation::new(ValidationTrigger::Both, signup_rules))
        .build();

    // Nothing validated until the first interaction.
    assert!(store.is_valid());

    store.set_field_touched(|s| s.field("email"), true).unwrap();
    assert_eq!(
        store.get_field_error(|s| s.field("email")).unwrap().as_deref(),
        Some("enter a valid email")
    );
    assert!(store.get_field_error(|s| s.field("password")).unwrap().is_some());

    store
        .set_field_value(|s| s.field("email"), Value::from("ada@example.com"))
        .unwrap();
    assert_eq!(store.get_field_error(|s| s.field("email")).unwrap(), None);

    store
        .set_field_value(|s| s.field("password"), Value::from("correct horse"))
        .unwrap();
    assert!(store.is_valid());

    // Unrelated branches are untouched by all of the above.
    assert_eq!(
        store.get_field_value(|s| s.field("address")?.field("city")).unwrap(),
        Some(Value::from("Oslo"))
    );
    assert_eq!(
        store.get_field_value(|s| s.field("address")?.field("zip")).unwrap(),
        Some(Value::Null)
    );
}

#[test]
fn manual_errors_survive_until_next_change_validation() {
    let mut store = FormStoreOptions::new(signup_values())
        .validation(Validation::new(ValidationTrigger::Change, signup_rules))
        .build();

    store
        .set_field_error(
            |s| s.field("address")?.field("city"),
            Some("we do not ship there".to_string()),
        )
        .unwrap();
    store.set_field_touched(|s| s.field("email"), true).unwrap();
    assert_eq!(
        store
            .get_field_error(|s| s.field("address")?.field("city"))
            .unwrap()
            .as_deref(),
        Some("we do not ship there")
    );

    store
        .set_field_value(|s| Ok(s.field("tags")?.index(1)), Value::from("beta"))
        .unwrap();
    assert_eq!(
        store.get_field_error(|s| s.field("address")?.field("city")).unwrap(),
        None
    );
    assert_eq!(
        store.get_field_value(|s| s.field("tags")).unwrap(),
        Some(Value::from(vec!["new", "beta"]))
    );
}

#[test]
fn store_can_be_shared_behind_a_mutex() {
    let store = Arc::new(Mutex::new(FormStore::new(signup_values())));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                store
                    .lock()
                    .unwrap()
                    .set_field_value(|s| s.field("slots")?.get(i as usize), Value::from(i))
                    .unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let store = store.lock().unwrap();
    for i in 0..4usize {
        assert_eq!(
            store.get_field_value(|s| Ok(s.field("slots")?.index(i))).unwrap(),
            Some(Value::from(i as i64))
        );
    }
}

#[test]
fn reset_after_a_session() {
    let initial = signup_values();
    let mut store = FormStoreOptions::new(initial.clone())
        .validation(Validation::new(ValidationTrigger::Both, signup_rules))
        .build();

    store
        .set_field_value(|s| s.field("email"), Value::from("x"))
        .unwrap();
    store.set_field_touched(|s| s.field("email"), true).unwrap();
    assert!(!store.is_valid());

    store.reset();
    assert_eq!(store.values(), &initial);
    assert!(store.touched().is_empty());
    assert!(store.errors().is_empty());
}
