use std::rc::Rc;

use tracing::debug;

use super::{CompositeType, Item};
use crate::{error::LoadError, ActionResolver, BehaviorNode, Registry};

/// Instantiate a tree description into `registry`, bottom-up.
///
/// Children are built before the composite that holds them, preserving the
/// written order exactly. A leaf name that is already registered reuses the
/// existing node without consulting the resolver, and a `ref` item reuses a
/// node built earlier in the same description; either way the node gains
/// another parent and the graph becomes a DAG. A `ref` to a name that has
/// not been built yet fails; since building is strictly bottom-up, this
/// also means no item can ever reference itself through any chain.
///
/// Returns the node built for the top item. Setting it as the registry
/// root is left to the caller:
///
/// ```rust
/// # use behavior_graph::{load, parse_tree, Action, BehaviorResult, Registry};
/// # let (_, item) = parse_tree("tree = Sequence Main { Probe }").unwrap();
/// # let mut registry = Registry::new();
/// # let mut resolver = |_: &str| Some(Box::new(|| BehaviorResult::Success) as Action);
/// let root = load(&item, &mut registry, &mut resolver).unwrap();
/// registry.set_root(root.name()).unwrap();
/// ```
///
/// On error the registry keeps the nodes built so far; there is no
/// rollback.
pub fn load(
    item: &Item,
    registry: &mut Registry,
    resolver: ActionResolver,
) -> Result<Rc<BehaviorNode>, LoadError> {
    match item {
        Item::Leaf(name) => {
            if let Some(existing) = registry.get(*name) {
                return Ok(existing.clone());
            }
            let action =
                resolver(name).ok_or_else(|| LoadError::UnknownAction((*name).to_owned()))?;
            debug!("registering leaf {name}");
            Ok(registry.add_leaf(*name, action)?)
        }
        Item::Ref(name) => registry
            .get(*name)
            .cloned()
            .ok_or_else(|| LoadError::UnknownReference((*name).to_owned())),
        Item::Composite(def) => {
            let mut children = Vec::with_capacity(def.children.len());
            for child in &def.children {
                children.push(load(child, registry, &mut *resolver)?);
            }
            debug!(
                "registering {:?} {} with {} children",
                def.ty,
                def.name,
                children.len()
            );
            let node = match def.ty {
                CompositeType::Sequence => registry.add_sequence(def.name, children)?,
                CompositeType::Selector => registry.add_selector(def.name, children)?,
            };
            Ok(node)
        }
    }
}
