use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use behavior_graph::error::{LoadYamlError, RegistryError};
use behavior_graph::{load, load_yaml, parse_tree, Action, BehaviorResult, Registry};

#[test]
fn test_duplicate_names_are_rejected() {
    let mut registry = Registry::new();
    registry
        .add_leaf("Wait", Box::new(|| BehaviorResult::Success))
        .unwrap();
    let err = registry
        .add_leaf("Wait", Box::new(|| BehaviorResult::Fail))
        .unwrap_err();
    assert!(matches!(err, RegistryError::DuplicateName(name) if name == "Wait"));

    // Composites share the same namespace as leaves.
    let err = registry.add_sequence("Wait", vec![]).unwrap_err();
    assert!(matches!(err, RegistryError::DuplicateName(name) if name == "Wait"));
}

#[test]
fn test_root_guard() {
    let mut registry = Registry::new();
    assert!(matches!(registry.tick(), Err(RegistryError::NoRoot)));

    let err = registry.set_root("Missing").unwrap_err();
    assert!(matches!(err, RegistryError::UnknownNode(name) if name == "Missing"));

    registry
        .add_leaf("Wait", Box::new(|| BehaviorResult::Success))
        .unwrap();
    registry.set_root("Wait").unwrap();
    assert_eq!(registry.tick().unwrap(), BehaviorResult::Success);
}

#[test]
fn test_children_must_live_in_the_same_registry() {
    let mut home = Registry::new();
    let mut foreign = Registry::new();
    let stranger = foreign
        .add_leaf("Wait", Box::new(|| BehaviorResult::Success))
        .unwrap();

    // Same name, different arena: the handle identity is what counts.
    home.add_leaf("Wait", Box::new(|| BehaviorResult::Success))
        .unwrap();
    let err = home.add_sequence("Main", vec![stranger]).unwrap_err();
    assert!(matches!(err, RegistryError::UnknownChild(name) if name == "Wait"));
    assert!(home.get("Main").is_none());
}

/// The controller's decision tree used by the scenario tests: recovery
/// strategies in priority order, sharing the `Wait` leaf between the
/// recovery and transmit branches and `ForceQuit` with the shutdown branch.
const CONTROLLER_TREE: &str = "
tree = Selector Root {
    Sequence Handshake {
        CheckSerial
    }
    Sequence Recover {
        Wait
        Reconnect
        ForceQuit
    }
    Selector Retry {
        Sequence Reopen {
            OpenSerial
        }
        Sequence Reset {
            PowerCycle
            FlushQueue
        }
        Sequence Probe {
            ReadStatus
        }
    }
    Sequence Transmit {
        ref Wait
        WriteUTF8
    }
    Sequence Shutdown {
        ref ForceQuit
        CloseLog
    }
}
";

/// Builds the controller tree with actions that append their leaf name to
/// `log`; only the names in `successes` succeed.
fn build_controller(
    log: &Rc<RefCell<Vec<String>>>,
    successes: &'static [&'static str],
) -> Registry {
    let (_, item) = parse_tree(CONTROLLER_TREE).unwrap();
    let mut registry = Registry::new();
    let log = log.clone();
    let root = load(&item, &mut registry, &mut move |name: &str| {
        let log = log.clone();
        let name = name.to_owned();
        let result = if successes.contains(&name.as_str()) {
            BehaviorResult::Success
        } else {
            BehaviorResult::Fail
        };
        Some(Box::new(move || {
            log.borrow_mut().push(name.clone());
            result
        }) as Action)
    })
    .unwrap();
    registry.set_root(root.name()).unwrap();
    registry
}

#[test]
fn test_controller_scenario() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let registry = build_controller(&log, &["Wait", "WriteUTF8"]);

    assert_eq!(registry.behaviors().len(), 19);
    assert_eq!(registry.get("ForceQuit").unwrap().name(), "ForceQuit");
    assert_eq!(registry.root().unwrap().name(), "Root");

    assert_eq!(registry.tick().unwrap(), BehaviorResult::Success);

    // Every branch before Transmit fails, Transmit reaches WriteUTF8 on
    // the eighth leaf invocation, and Shutdown is never tried.
    assert_eq!(
        *log.borrow(),
        [
            "CheckSerial",
            "Wait",
            "Reconnect",
            "OpenSerial",
            "PowerCycle",
            "ReadStatus",
            "Wait",
            "WriteUTF8",
        ]
    );
}

#[test]
fn test_controller_reticks_identically() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let registry = build_controller(&log, &["Wait", "WriteUTF8"]);

    assert_eq!(registry.tick().unwrap(), BehaviorResult::Success);
    assert_eq!(registry.tick().unwrap(), BehaviorResult::Success);

    // No state is kept between passes; the second tick repeats the first.
    let log = log.borrow();
    assert_eq!(log.len(), 16);
    assert_eq!(log[..8], log[8..]);
}

#[test]
fn test_controller_all_fail() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let registry = build_controller(&log, &[]);

    assert_eq!(registry.tick().unwrap(), BehaviorResult::Fail);

    // With Wait failing too, Recover stops one leaf earlier, Transmit dies
    // at the shared Wait, and the Shutdown branch is finally reached.
    assert_eq!(
        *log.borrow(),
        [
            "CheckSerial",
            "Wait",
            "OpenSerial",
            "PowerCycle",
            "ReadStatus",
            "Wait",
            "ForceQuit",
        ]
    );
}

#[test]
fn test_same_source_builds_the_same_graph() {
    let log_a = Rc::new(RefCell::new(Vec::new()));
    let log_b = Rc::new(RefCell::new(Vec::new()));
    let a = build_controller(&log_a, &["Wait", "WriteUTF8"]);
    let b = build_controller(&log_b, &["Wait", "WriteUTF8"]);

    let names = |registry: &Registry| -> BTreeSet<String> {
        registry
            .behaviors()
            .keys()
            .map(|name| name.to_string())
            .collect()
    };
    assert_eq!(names(&a), names(&b));
    assert_eq!(a.root().unwrap().name(), b.root().unwrap().name());
    assert_eq!(a.tick().unwrap(), b.tick().unwrap());
    assert_eq!(*log_a.borrow(), *log_b.borrow());

    // Same graph, distinct node instances.
    assert!(!Rc::ptr_eq(a.get("Root").unwrap(), b.get("Root").unwrap()));
}

#[test]
fn test_yaml_front_end_shares_nodes() {
    let source = r#"
behavior_tree:
  type: Selector
  name: Root
  children:
    - Reconnect
    - type: Sequence
      name: Settle
      children:
        - Wait
        - ref: Reconnect
"#;

    let log = Rc::new(RefCell::new(Vec::new()));
    let outer = log.clone();
    let registry = load_yaml(source, &mut move |name: &str| {
        let log = outer.clone();
        let name = name.to_owned();
        let result = if name == "Wait" {
            BehaviorResult::Success
        } else {
            BehaviorResult::Fail
        };
        Some(Box::new(move || {
            log.borrow_mut().push(name.clone());
            result
        }) as Action)
    })
    .unwrap();

    assert_eq!(registry.behaviors().len(), 4);
    assert_eq!(registry.tick().unwrap(), BehaviorResult::Fail);
    // Reconnect runs once per path: directly under Root, then via the ref.
    assert_eq!(*log.borrow(), ["Reconnect", "Wait", "Reconnect"]);
}

#[test]
fn test_yaml_rejects_malformed_items() {
    let mut resolver = |_: &str| Some(Box::new(|| BehaviorResult::Success) as Action);

    // Not a leaf, ref, or composite.
    let err = load_yaml("behavior_tree: 42", &mut resolver).unwrap_err();
    assert!(matches!(err, LoadYamlError::Malformed(_)));

    // A composite type outside the closed set.
    let err = load_yaml(
        "behavior_tree:\n  type: Parallel\n  name: Root\n  children: []\n",
        &mut resolver,
    )
    .unwrap_err();
    assert!(matches!(err, LoadYamlError::Malformed(_)));

    // Composites must carry their children list.
    let err = load_yaml(
        "behavior_tree:\n  type: Sequence\n  name: Root\n",
        &mut resolver,
    )
    .unwrap_err();
    assert!(matches!(err, LoadYamlError::Malformed(_)));
}
