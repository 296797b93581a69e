use serde_yaml::Value;
use tracing::debug;

use super::{loader::load, CompositeDef, CompositeType, Item};
use crate::{
    error::{LoadError, LoadYamlError},
    ActionResolver, Registry,
};

/// Load a behavior graph from a YAML document.
///
/// The document holds one tree under the `behavior_tree` key. A scalar
/// string is a leaf, a mapping with a `ref` key reuses an existing node,
/// and a mapping with `type`, `name` and `children` is a composite; any
/// other shape is rejected. The node built for the top item becomes the
/// root of the returned registry.
///
/// ```yaml
/// behavior_tree:
///   type: Selector
///   name: Root
///   children:
///     - CheckSerial
///     - type: Sequence
///       name: Reopen
///       children:
///         - OpenSerial
///         - ref: CheckSerial
/// ```
pub fn load_yaml(yaml: &str, resolver: ActionResolver) -> Result<Registry, LoadYamlError> {
    let doc: Value = serde_yaml::from_str(yaml)?;
    let tree = doc.get("behavior_tree").ok_or_else(|| {
        LoadYamlError::Malformed("the `behavior_tree` document key is missing".to_owned())
    })?;
    let item = parse_item(tree)?;

    let mut registry = Registry::new();
    let root = load(&item, &mut registry, resolver)?;
    debug!("loaded {} nodes, root {}", registry.behaviors().len(), root.name());
    registry.set_root(root.name()).map_err(LoadError::from)?;
    Ok(registry)
}

fn parse_item(value: &Value) -> Result<Item, LoadYamlError> {
    match value {
        Value::String(name) => Ok(Item::Leaf(name.as_str())),
        Value::Mapping(_) => {
            if let Some(reference) = value.get("ref") {
                let name = reference
                    .as_str()
                    .ok_or_else(|| malformed("`ref` must hold a node name", value))?;
                return Ok(Item::Ref(name));
            }

            let ty = match value.get("type").and_then(Value::as_str) {
                Some("Sequence") => CompositeType::Sequence,
                Some("Selector") => CompositeType::Selector,
                Some(other) => {
                    return Err(LoadYamlError::Malformed(format!(
                        "unknown composite type {:?}",
                        other
                    )))
                }
                None => return Err(malformed("a composite needs a `type`", value)),
            };
            let name = value
                .get("name")
                .and_then(Value::as_str)
                .ok_or_else(|| malformed("a composite needs a `name`", value))?;
            let children = match value.get("children") {
                Some(Value::Sequence(children)) => children
                    .iter()
                    .map(parse_item)
                    .collect::<Result<Vec<_>, _>>()?,
                _ => return Err(malformed("a composite needs a `children` list", value)),
            };
            Ok(Item::Composite(CompositeDef { ty, name, children }))
        }
        other => Err(malformed("expected a leaf name or a mapping", other)),
    }
}

fn malformed(what: &str, value: &Value) -> LoadYamlError {
    LoadYamlError::Malformed(format!("{} in {:?}", what, value))
}
