use crate::descriptor::TypeDescriptor;
use log::debug;
use std::collections::HashMap;

/// Type catalog - definitions of the named types a service exposes.
///
/// Only types that appear here can expand into composite shapes; every other
/// name resolves to a leaf.
#[derive(Debug, Clone, Default)]
pub struct TypeCatalog {
    definitions: HashMap<String, TypeDefinition>,
}

/// A named type definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDefinition {
    pub name: String,
    pub kind: DefinitionKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefinitionKind {
    /// A struct with its public readable members in declaration order
    Struct(Vec<MemberDefinition>),
    /// An enum with its variant names
    Enum(Vec<String>),
}

/// A public readable member of a struct
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDefinition {
    pub name: String,
    pub type_descriptor: TypeDescriptor,
}

impl MemberDefinition {
    pub fn new(name: impl Into<String>, type_descriptor: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            type_descriptor,
        }
    }
}

impl TypeDefinition {
    pub fn structure(name: impl Into<String>, members: Vec<MemberDefinition>) -> Self {
        Self {
            name: name.into(),
            kind: DefinitionKind::Struct(members),
        }
    }

    pub fn enumeration(name: impl Into<String>, variants: Vec<String>) -> Self {
        Self {
            name: name.into(),
            kind: DefinitionKind::Enum(variants),
        }
    }
}

impl TypeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition. The first definition of a name wins.
    pub fn insert(&mut self, definition: TypeDefinition) {
        if self.definitions.contains_key(&definition.name) {
            debug!("Type {} already defined, keeping first definition", definition.name);
            return;
        }
        self.definitions.insert(definition.name.clone(), definition);
    }

    pub fn get(&self, name: &str) -> Option<&TypeDefinition> {
        self.definitions.get(name)
    }

    /// Public readable members of `name`, if it is a known struct.
    pub fn members(&self, name: &str) -> Option<&[MemberDefinition]> {
        match self.definitions.get(name).map(|definition| &definition.kind) {
            Some(DefinitionKind::Struct(members)) => Some(members),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
