use crate::catalog::TypeCatalog;
use crate::descriptor::TypeDescriptor;
use crate::naming::friendly_name;
use log::{debug, warn};
use serde::Serialize;

/// Structural schema of a type.
///
/// Serialized with a `Kind` tag so consumers can tell the variants apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "Kind")]
pub enum TypeShape {
    /// Primitives, text, enums and unknown names
    Leaf {
        #[serde(rename = "Name")]
        name: String,
        /// Set when this leaf stands in for a type already being expanded
        /// further up the same path
        #[serde(rename = "Cyclic", skip_serializing_if = "is_false")]
        cyclic: bool,
    },
    /// A struct expanded into its public members
    Composite {
        #[serde(rename = "Name")]
        name: String,
        #[serde(rename = "Members")]
        members: Vec<MemberShape>,
    },
    /// A generic type with one shape per type argument
    GenericComposite {
        #[serde(rename = "Name")]
        name: String,
        #[serde(rename = "Arguments")]
        arguments: Vec<TypeShape>,
    },
}

/// One member of a [`TypeShape::Composite`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberShape {
    #[serde(rename = "Name")]
    pub name: String,
    /// Friendly name of the member's declared type
    #[serde(rename = "Type")]
    pub type_name: String,
    #[serde(rename = "Structure")]
    pub structure: TypeShape,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl TypeShape {
    pub fn leaf(name: impl Into<String>) -> Self {
        TypeShape::Leaf {
            name: name.into(),
            cyclic: false,
        }
    }

    pub fn cyclic(name: impl Into<String>) -> Self {
        TypeShape::Leaf {
            name: name.into(),
            cyclic: true,
        }
    }
}

/// Shape resolver - recursively converts type descriptors into [`TypeShape`]s.
///
/// Holds no state between calls; the active recursion path lives on the stack
/// of a single [`ShapeResolver::resolve`] call.
pub struct ShapeResolver<'a> {
    catalog: &'a TypeCatalog,
}

impl<'a> ShapeResolver<'a> {
    pub fn new(catalog: &'a TypeCatalog) -> Self {
        Self { catalog }
    }

    /// Resolve the structural shape of `ty`.
    ///
    /// Generic types resolve each argument; known structs (other than the
    /// text types) expand into their public members; everything else is a
    /// leaf. A struct met again while it is still being expanded becomes a
    /// cyclic leaf, so resolution terminates on self-referential graphs.
    pub fn resolve(&self, ty: &TypeDescriptor) -> TypeShape {
        let mut path = Vec::new();
        self.resolve_on_path(ty, &mut path)
    }

    fn resolve_on_path(&self, ty: &TypeDescriptor, path: &mut Vec<String>) -> TypeShape {
        if ty.is_generic() {
            let arguments = ty
                .args
                .iter()
                .map(|arg| self.resolve_on_path(arg, path))
                .collect();
            return TypeShape::GenericComposite {
                name: friendly_name(ty),
                arguments,
            };
        }

        let name = ty.base_name();
        if is_text(name) {
            return TypeShape::leaf(name);
        }

        let Some(members) = self.catalog.members(name) else {
            return TypeShape::leaf(name);
        };

        if path.iter().any(|active| active == name) {
            warn!("Cyclic reference to type {}, not expanding further", name);
            return TypeShape::cyclic(name);
        }

        debug!("Expanding {} with {} members", name, members.len());
        path.push(name.to_string());
        let members = members
            .iter()
            .map(|member| MemberShape {
                name: member.name.clone(),
                type_name: friendly_name(&member.type_descriptor),
                structure: self.resolve_on_path(&member.type_descriptor, path),
            })
            .collect();
        path.pop();

        TypeShape::Composite {
            name: name.to_string(),
            members,
        }
    }
}

fn is_text(name: &str) -> bool {
    matches!(name, "String" | "str")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{MemberDefinition, TypeDefinition};
    use pretty_assertions::assert_eq;

    fn catalog() -> TypeCatalog {
        let mut catalog = TypeCatalog::new();
        catalog.insert(TypeDefinition::structure(
            "Item",
            vec![
                MemberDefinition::new("id", TypeDescriptor::named("u64")),
                MemberDefinition::new("name", TypeDescriptor::named("String")),
            ],
        ));
        catalog.insert(TypeDefinition::structure(
            "Node",
            vec![
                MemberDefinition::new("label", TypeDescriptor::named("String")),
                MemberDefinition::new("children", TypeDescriptor::parse("Vec<Node>")),
            ],
        ));
        catalog.insert(TypeDefinition::structure(
            "Order",
            vec![MemberDefinition::new("customer", TypeDescriptor::named("Customer"))],
        ));
        catalog.insert(TypeDefinition::structure(
            "Customer",
            vec![MemberDefinition::new("orders", TypeDescriptor::parse("Vec<Order>"))],
        ));
        catalog.insert(TypeDefinition::structure("Empty", vec![]));
        catalog.insert(TypeDefinition::enumeration("Status", vec!["Open".to_string()]));
        catalog
    }

    #[test]
    fn test_primitives_are_leaves() {
        let catalog = catalog();
        let resolver = ShapeResolver::new(&catalog);
        assert_eq!(resolver.resolve(&TypeDescriptor::named("u64")), TypeShape::leaf("u64"));
        assert_eq!(resolver.resolve(&TypeDescriptor::named("String")), TypeShape::leaf("String"));
        assert_eq!(resolver.resolve(&TypeDescriptor::named("Status")), TypeShape::leaf("Status"));
    }

    #[test]
    fn test_struct_expands_members() {
        let catalog = catalog();
        let shape = ShapeResolver::new(&catalog).resolve(&TypeDescriptor::named("Item"));

        assert_eq!(
            shape,
            TypeShape::Composite {
                name: "Item".to_string(),
                members: vec![
                    MemberShape {
                        name: "id".to_string(),
                        type_name: "u64".to_string(),
                        structure: TypeShape::leaf("u64"),
                    },
                    MemberShape {
                        name: "name".to_string(),
                        type_name: "String".to_string(),
                        structure: TypeShape::leaf("String"),
                    },
                ],
            }
        );
    }

    #[test]
    fn test_struct_without_members_is_empty_composite() {
        let catalog = catalog();
        let shape = ShapeResolver::new(&catalog).resolve(&TypeDescriptor::named("Empty"));
        assert_eq!(
            shape,
            TypeShape::Composite {
                name: "Empty".to_string(),
                members: vec![],
            }
        );
    }

    #[test]
    fn test_generic_page_of_items() {
        let catalog = catalog();
        let shape = ShapeResolver::new(&catalog).resolve(&TypeDescriptor::parse("Page<Item>"));

        let TypeShape::GenericComposite { name, arguments } = shape else {
            panic!("expected a generic composite");
        };
        assert_eq!(name, "Page<Item>");
        assert_eq!(arguments.len(), 1);
        match &arguments[0] {
            TypeShape::Composite { name, members } => {
                assert_eq!(name, "Item");
                assert_eq!(members.len(), 2);
            }
            other => panic!("expected Item composite, got {:?}", other),
        }
    }

    #[test]
    fn test_self_reference_terminates() {
        let catalog = catalog();
        let shape = ShapeResolver::new(&catalog).resolve(&TypeDescriptor::named("Node"));

        let TypeShape::Composite { members, .. } = shape else {
            panic!("expected Node composite");
        };
        assert_eq!(members[1].type_name, "Vec<Node>");
        assert_eq!(
            members[1].structure,
            TypeShape::GenericComposite {
                name: "Vec<Node>".to_string(),
                arguments: vec![TypeShape::cyclic("Node")],
            }
        );
    }

    #[test]
    fn test_mutual_reference_terminates() {
        let catalog = catalog();
        let shape = ShapeResolver::new(&catalog).resolve(&TypeDescriptor::named("Order"));

        let json = serde_json::to_value(&shape).unwrap();
        let inner = &json["Members"][0]["Structure"]["Members"][0]["Structure"]["Arguments"][0];
        assert_eq!(inner["Kind"], "Leaf");
        assert_eq!(inner["Name"], "Order");
        assert_eq!(inner["Cyclic"], true);
    }

    #[test]
    fn test_sibling_references_are_not_cyclic() {
        let mut catalog = catalog();
        catalog.insert(TypeDefinition::structure(
            "Pair",
            vec![
                MemberDefinition::new("left", TypeDescriptor::named("Item")),
                MemberDefinition::new("right", TypeDescriptor::named("Item")),
            ],
        ));
        let shape = ShapeResolver::new(&catalog).resolve(&TypeDescriptor::named("Pair"));

        let TypeShape::Composite { members, .. } = shape else {
            panic!("expected Pair composite");
        };
        assert!(matches!(members[0].structure, TypeShape::Composite { .. }));
        assert!(matches!(members[1].structure, TypeShape::Composite { .. }));
    }

    #[test]
    fn test_leaf_serialization_omits_cyclic_flag() {
        let json = serde_json::to_value(TypeShape::leaf("u64")).unwrap();
        assert_eq!(json, serde_json::json!({ "Kind": "Leaf", "Name": "u64" }));
    }
}
