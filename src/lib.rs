//! # behavior-graph
//!
//! A minimal tick-based behavior tree engine with a named node arena and
//! shared sub-behaviors.
//!
//!
//! ## Overview
//!
//! A behavior tree encodes prioritized decision logic as a composition of
//! terminal actions (leaves) and combinators (Sequence, Selector). One call
//! to `tick()` evaluates the graph from the root and yields a single
//! [`BehaviorResult`].
//!
//! Unlike most behavior tree libraries, nodes here are *named* and owned by
//! a [`Registry`] arena, and a node may be attached to more than one parent.
//! The result is a directed acyclic graph rather than a strict tree, which
//! lets a recovery branch and a transmit branch share the same `Wait` leaf
//! without duplicating it.
//!
//!
//! ## How it looks like
//!
//! The [`Registry`] is the sole factory for nodes. Leaves bind a
//! zero-argument action; composites take handles to already-registered
//! children.
//!
//! ```rust
//! use behavior_graph::{BehaviorResult, Registry};
//!
//! # fn main() -> Result<(), behavior_graph::error::RegistryError> {
//! let mut registry = Registry::new();
//! let check = registry.add_leaf("CheckSerial", Box::new(|| BehaviorResult::Fail))?;
//! let open = registry.add_leaf("OpenSerial", Box::new(|| BehaviorResult::Success))?;
//! registry.add_selector("Probe", vec![check, open])?;
//! registry.set_root("Probe")?;
//! assert_eq!(registry.tick()?, BehaviorResult::Success);
//! # Ok(())
//! # }
//! ```
//!
//! A `Sequence` ticks its children in order and fails on the first failing
//! child, skipping the rest. A `Selector` is the mirror image: it succeeds
//! on the first succeeding child. Child order is the whole of the priority
//! model, so it is preserved exactly from construction through every tick.
//!
//!
//! ## Loading a tree from a declarative description
//!
//! Trees are usually not assembled by hand but loaded from a description,
//! with leaf behavior supplied by an action resolver: a closure mapping a
//! leaf name to its [`Action`]. The engine performs no I/O of its own;
//! whatever the actions do is up to the caller.
//!
//! ```rust
//! use behavior_graph::{load_yaml, Action, BehaviorResult};
//!
//! # fn main() -> Result<(), behavior_graph::error::LoadYamlError> {
//! let source = r#"
//! behavior_tree:
//!   type: Selector
//!   name: Root
//!   children:
//!     - Reconnect
//!     - Wait
//! "#;
//!
//! let registry = load_yaml(source, &mut |name| {
//!     let succeed = name == "Wait";
//!     Some(Box::new(move || {
//!         if succeed {
//!             BehaviorResult::Success
//!         } else {
//!             BehaviorResult::Fail
//!         }
//!     }) as Action)
//! })?;
//! assert_eq!(registry.tick().unwrap(), BehaviorResult::Success);
//! # Ok(())
//! # }
//! ```
//!
//! An item in the description is one of three shapes: a bare string names a
//! leaf, a mapping with a `ref` key reuses an already-built node, and a
//! mapping with `type`, `name` and `children` builds a composite. Repeating
//! a leaf name also reuses the first node built for it; the same string is
//! the same leaf.
//!
//!
//! ## The custom config file format
//!
//! The same description can be written more concisely in a dedicated text
//! format, with `#` line comments:
//!
//! ```raw
//! tree = Selector Root {
//!     Sequence Handshake {
//!         CheckSerial      # leaf by name
//!     }
//!     WriteUTF8
//!     ref Handshake        # reuse an already-built node
//! }
//! ```
//!
//! [`parse_tree`] turns the source into an [`Item`] AST borrowing from the
//! input string, and [`load`] instantiates it into a registry:
//!
//! ```rust
//! use behavior_graph::{load, parse_tree, Action, BehaviorResult, Registry};
//!
//! let source = "
//! tree = Selector Root {
//!     CheckSerial
//!     Sequence Reopen {
//!         OpenSerial
//!         ref CheckSerial
//!     }
//! }
//! ";
//!
//! let (_, item) = parse_tree(source).unwrap();
//! let mut registry = Registry::new();
//! let root = load(&item, &mut registry, &mut |_| {
//!     Some(Box::new(|| BehaviorResult::Success) as Action)
//! })
//! .unwrap();
//! registry.set_root(root.name()).unwrap();
//! assert_eq!(registry.tick().unwrap(), BehaviorResult::Success);
//! ```
//!
//! Pseudo-EBNF of the format:
//!
//! ```raw
//! tree = "tree" "=" item
//!
//! item = composite | reference | leaf
//!
//! composite = ( "Sequence" | "Selector" ) name "{" item* "}"
//!
//! reference = "ref" name
//!
//! leaf = name
//!
//! name = identifier
//! ```
//!
//!
//! ## Errors
//!
//! Construction is fail-fast: duplicate names, children from a foreign
//! registry, unknown references and unresolvable actions all surface as
//! errors at build time, in [`error`]. The only tick-time error is calling
//! [`Registry::tick`] before a root is set. A child returning
//! [`BehaviorResult::Fail`] is ordinary control-flow data, never an error.
//!
//!
//! ## Execution model
//!
//! Ticking is single-threaded, synchronous recursion with no suspension
//! points; a blocking action blocks the whole tick. Results are not
//! memoized within a pass, so a node reachable through two parents runs
//! once per path. The registry has no internal locking, so callers that share
//! one across threads must serialize access themselves.

pub mod error;
mod nodes;
pub mod parser;
mod registry;
mod symbol;

pub use crate::nodes::BehaviorNode;
pub use crate::parser::{load, load_yaml, parse_tree, CompositeDef, CompositeType, Item};
pub use crate::registry::Registry;
pub use crate::symbol::Symbol;
pub use ::once_cell::sync::*;

/// The outcome of ticking a node: the node either achieved its goal or it
/// did not.
///
/// There is deliberately no third `Running` state, since actions are synchronous
/// and every tick runs to completion. Supporting long-running actions would
/// mean extending this enum and keeping per-node resumption state, which
/// this engine does not do.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum BehaviorResult {
    Success,
    Fail,
}

/// A leaf's bound behavior: invoked with no arguments on every tick that
/// reaches the leaf, its result returned unchanged. Panics propagate.
pub type Action = Box<dyn Fn() -> BehaviorResult>;

/// Maps a leaf name to its action while loading a declarative description.
///
/// Returning `None` makes the load fail with
/// [`LoadError::UnknownAction`](crate::error::LoadError::UnknownAction).
/// The resolver is only consulted for names not yet in the registry.
pub type ActionResolver<'a> = &'a mut dyn FnMut(&str) -> Option<Action>;
