use std::fmt::{self, Display, Formatter};

/// Errors raised by [`Registry`](crate::Registry) operations.
#[derive(Debug)]
#[non_exhaustive]
pub enum RegistryError {
    /// A node with this name is already registered.
    DuplicateName(String),
    /// A composite was given a child handle this registry does not own.
    UnknownChild(String),
    /// `set_root` named a node that was never registered.
    UnknownNode(String),
    /// `tick` was called before any root was set.
    NoRoot,
}

impl Display for RegistryError {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        match self {
            Self::DuplicateName(name) => {
                write!(fmt, "A node named {:?} is already registered", name)
            }
            Self::UnknownChild(name) => {
                write!(fmt, "Child {:?} is not owned by this registry", name)
            }
            Self::UnknownNode(name) => write!(fmt, "No node named {:?} is registered", name),
            Self::NoRoot => write!(fmt, "No root node has been set"),
        }
    }
}

impl std::error::Error for RegistryError {}

/// Errors raised while instantiating a declarative tree description.
#[derive(Debug)]
#[non_exhaustive]
pub enum LoadError {
    /// A `ref` item named a node that has not been built.
    UnknownReference(String),
    /// The action resolver returned no action for a leaf name.
    UnknownAction(String),
    Registry(RegistryError),
}

impl Display for LoadError {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        match self {
            Self::UnknownReference(name) => {
                write!(fmt, "Reference to a node {:?} that is not built yet", name)
            }
            Self::UnknownAction(name) => {
                write!(fmt, "No action could be resolved for leaf {:?}", name)
            }
            Self::Registry(e) => e.fmt(fmt),
        }
    }
}

impl std::error::Error for LoadError {}

impl From<RegistryError> for LoadError {
    fn from(err: RegistryError) -> Self {
        Self::Registry(err)
    }
}

/// Errors raised by the YAML front end.
#[derive(Debug)]
pub enum LoadYamlError {
    Yaml(serde_yaml::Error),
    /// An item was not a leaf name, a `ref` mapping, or a composite mapping.
    Malformed(String),
    Load(LoadError),
}

impl Display for LoadYamlError {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        match self {
            Self::Yaml(e) => e.fmt(fmt),
            Self::Malformed(what) => write!(fmt, "Malformed tree description: {}", what),
            Self::Load(e) => e.fmt(fmt),
        }
    }
}

impl std::error::Error for LoadYamlError {}

impl From<serde_yaml::Error> for LoadYamlError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml(err)
    }
}

impl From<LoadError> for LoadYamlError {
    fn from(err: LoadError) -> Self {
        Self::Load(err)
    }
}
