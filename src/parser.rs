mod loader;
mod nom_parser;
mod yaml_parser;

pub use self::{loader::load, nom_parser::parse_tree, yaml_parser::load_yaml};

/// One item of a declarative tree description.
///
/// Items are resolved bottom-up by [`load`]: children are built before the
/// composite that holds them, in the order written, and that order is the
/// evaluation priority at tick time. The AST borrows from the source it was
/// parsed from.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Item<'src> {
    /// A leaf by name. The first mention builds the node through the action
    /// resolver; later mentions reuse it.
    Leaf(&'src str),
    /// Reuse of a node built earlier in the same description.
    Ref(&'src str),
    Composite(CompositeDef<'src>),
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct CompositeDef<'src> {
    pub ty: CompositeType,
    pub name: &'src str,
    pub children: Vec<Item<'src>>,
}

/// Tag selecting which composite constructor a description item maps to.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CompositeType {
    Sequence,
    Selector,
}
