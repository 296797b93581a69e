use std::fmt::{self, Debug, Formatter};
use std::rc::Rc;

use crate::{Action, BehaviorResult, Symbol};

/// A single node of the behavior graph: an interned name plus its behavior.
///
/// Nodes are created exclusively through the
/// [`Registry`](crate::Registry)'s `add_*` methods and never change after
/// construction. Composite children are shared handles into the same
/// registry arena, so one node may sit under several parents.
pub struct BehaviorNode {
    name: Symbol,
    behavior: Behavior,
}

/// The closed set of behaviors a node can have.
enum Behavior {
    Leaf(Action),
    Sequence(Vec<Rc<BehaviorNode>>),
    Selector(Vec<Rc<BehaviorNode>>),
}

impl BehaviorNode {
    pub(crate) fn leaf(name: Symbol, action: Action) -> Self {
        Self {
            name,
            behavior: Behavior::Leaf(action),
        }
    }

    pub(crate) fn sequence(name: Symbol, children: Vec<Rc<BehaviorNode>>) -> Self {
        Self {
            name,
            behavior: Behavior::Sequence(children),
        }
    }

    pub(crate) fn selector(name: Symbol, children: Vec<Rc<BehaviorNode>>) -> Self {
        Self {
            name,
            behavior: Behavior::Selector(children),
        }
    }

    pub fn name(&self) -> Symbol {
        self.name
    }

    /// Child nodes in evaluation order. Empty for a leaf.
    pub fn children(&self) -> &[Rc<BehaviorNode>] {
        match &self.behavior {
            Behavior::Leaf(_) => &[],
            Behavior::Sequence(children) | Behavior::Selector(children) => children,
        }
    }

    /// Evaluate this node once.
    ///
    /// A leaf invokes its action and returns the result unchanged. A
    /// Sequence ticks children in order and returns `Fail` on the first
    /// failing child without ticking the rest; with no children it
    /// vacuously succeeds. A Selector returns `Success` on the first
    /// succeeding child, and vacuously fails when empty.
    pub fn tick(&self) -> BehaviorResult {
        match &self.behavior {
            Behavior::Leaf(action) => action(),
            Behavior::Sequence(children) => {
                for child in children {
                    if let BehaviorResult::Fail = child.tick() {
                        return BehaviorResult::Fail;
                    }
                }
                BehaviorResult::Success
            }
            Behavior::Selector(children) => {
                for child in children {
                    if let BehaviorResult::Success = child.tick() {
                        return BehaviorResult::Success;
                    }
                }
                BehaviorResult::Fail
            }
        }
    }
}

impl Debug for BehaviorNode {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        let kind = match &self.behavior {
            Behavior::Leaf(_) => "Leaf",
            Behavior::Sequence(_) => "Sequence",
            Behavior::Selector(_) => "Selector",
        };
        fmt.debug_struct(kind)
            .field("name", &self.name)
            .field(
                "children",
                &self
                    .children()
                    .iter()
                    .map(|child| child.name())
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}
