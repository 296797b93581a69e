use std::collections::HashMap;
use std::rc::Rc;

use crate::{error::RegistryError, Action, BehaviorNode, BehaviorResult, Symbol};

/// The owning arena for one behavior graph.
///
/// All nodes of a graph are created through this registry, stored under
/// unique names, and dropped together with it. Children of a composite must
/// already live in the same registry when the composite is created, which
/// keeps the graph acyclic by construction.
///
/// The intended life cycle is a build phase (the `add_*` methods and
/// [`set_root`](Registry::set_root)) followed by an execute phase of
/// repeated [`tick`](Registry::tick) calls. Nothing enforces the boundary;
/// adding nodes between ticks is possible but ticks in flight are safe
/// either way, since `tick` borrows the registry immutably.
#[derive(Debug, Default)]
pub struct Registry {
    behaviors: HashMap<Symbol, Rc<BehaviorNode>>,
    root: Option<Symbol>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create and store a leaf bound to `action`.
    pub fn add_leaf(
        &mut self,
        name: impl Into<Symbol>,
        action: Action,
    ) -> Result<Rc<BehaviorNode>, RegistryError> {
        self.insert(BehaviorNode::leaf(name.into(), action))
    }

    /// Create and store a Sequence over `children`, which must all be
    /// handles previously returned by this registry.
    pub fn add_sequence(
        &mut self,
        name: impl Into<Symbol>,
        children: Vec<Rc<BehaviorNode>>,
    ) -> Result<Rc<BehaviorNode>, RegistryError> {
        self.verify_children(&children)?;
        self.insert(BehaviorNode::sequence(name.into(), children))
    }

    /// Create and store a Selector over `children`, which must all be
    /// handles previously returned by this registry.
    pub fn add_selector(
        &mut self,
        name: impl Into<Symbol>,
        children: Vec<Rc<BehaviorNode>>,
    ) -> Result<Rc<BehaviorNode>, RegistryError> {
        self.verify_children(&children)?;
        self.insert(BehaviorNode::selector(name.into(), children))
    }

    /// Choose the node evaluation starts from.
    pub fn set_root(&mut self, name: impl Into<Symbol>) -> Result<(), RegistryError> {
        let name = name.into();
        if !self.behaviors.contains_key(&name) {
            return Err(RegistryError::UnknownNode(name.to_string()));
        }
        self.root = Some(name);
        Ok(())
    }

    /// Evaluate the graph once from the root and return its result
    /// verbatim. The only side effects are those of the leaf actions
    /// reached during traversal.
    pub fn tick(&self) -> Result<BehaviorResult, RegistryError> {
        let root = self
            .root
            .and_then(|name| self.behaviors.get(&name))
            .ok_or(RegistryError::NoRoot)?;
        Ok(root.tick())
    }

    pub fn get(&self, name: impl Into<Symbol>) -> Option<&Rc<BehaviorNode>> {
        self.behaviors.get(&name.into())
    }

    /// All registered nodes, keyed by name.
    pub fn behaviors(&self) -> &HashMap<Symbol, Rc<BehaviorNode>> {
        &self.behaviors
    }

    pub fn root(&self) -> Option<&Rc<BehaviorNode>> {
        self.root.and_then(move |name| self.behaviors.get(&name))
    }

    fn insert(&mut self, node: BehaviorNode) -> Result<Rc<BehaviorNode>, RegistryError> {
        let name = node.name();
        if self.behaviors.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name.to_string()));
        }
        let node = Rc::new(node);
        self.behaviors.insert(name, node.clone());
        Ok(node)
    }

    /// A child qualifies only if it is the very node this registry stores
    /// under its name, not merely a node that shares the name.
    fn verify_children(&self, children: &[Rc<BehaviorNode>]) -> Result<(), RegistryError> {
        for child in children {
            match self.behaviors.get(&child.name()) {
                Some(owned) if Rc::ptr_eq(owned, child) => (),
                _ => return Err(RegistryError::UnknownChild(child.name().to_string())),
            }
        }
        Ok(())
    }
}
