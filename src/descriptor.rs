//! Normalized descriptors of containers, operations, parameters and types.
//!
//! These are the only input the generator consumes. A [`MetadataSource`]
//! produces them from whatever introspection facility the host has (a Rust
//! source tree, a manifest file, ...); the generator never looks further than
//! this module.

use crate::catalog::TypeCatalog;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supplies one [`MetadataSet`] per generation pass.
pub trait MetadataSource {
    /// Loads all candidate containers and the type catalog.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::Configuration`] when no candidate source
    /// can be supplied at all.
    fn load(&self) -> Result<MetadataSet>;
}

/// Everything a generation pass needs, already normalized.
#[derive(Debug, Clone, Default)]
pub struct MetadataSet {
    /// Candidate containers in discovery order
    pub containers: Vec<ContainerDescriptor>,
    /// Definitions used to expand composite types
    pub catalog: TypeCatalog,
}

/// HTTP methods an operation can be exposed under.
///
/// The declaration order here is the priority order used when picking an
/// operation's route template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Post,
    Get,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    /// Route template priority: POST, GET, PUT, DELETE, PATCH.
    pub const PRIORITY: [HttpMethod; 5] = [
        HttpMethod::Post,
        HttpMethod::Get,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Patch,
    ];

    /// Upper-case verb token.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Post => "POST",
            HttpMethod::Get => "GET",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }

    /// Parse a verb from a marker name such as `get` or `POST`.
    pub fn from_marker(name: &str) -> Option<HttpMethod> {
        match name.to_ascii_lowercase().as_str() {
            "post" => Some(HttpMethod::Post),
            "get" => Some(HttpMethod::Get),
            "put" => Some(HttpMethod::Put),
            "delete" => Some(HttpMethod::Delete),
            "patch" => Some(HttpMethod::Patch),
            _ => None,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a parameter's value is taken from in an incoming request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BindingSource {
    Route,
    Query,
    Body,
    Header,
    Form,
}

impl BindingSource {
    /// Precedence among explicit markers when more than one is present.
    pub const MARKER_PRECEDENCE: [BindingSource; 5] = [
        BindingSource::Query,
        BindingSource::Body,
        BindingSource::Route,
        BindingSource::Header,
        BindingSource::Form,
    ];

    /// Parse a binding marker attribute name (`from_query`, `from_path`, ...).
    pub fn from_marker(name: &str) -> Option<BindingSource> {
        match name {
            "from_query" => Some(BindingSource::Query),
            "from_body" => Some(BindingSource::Body),
            "from_route" | "from_path" => Some(BindingSource::Route),
            "from_header" => Some(BindingSource::Header),
            "from_form" => Some(BindingSource::Form),
            _ => None,
        }
    }

    /// Binding implied by a framework extractor wrapper such as `Json<T>`.
    pub fn from_extractor(name: &str) -> Option<BindingSource> {
        match name {
            "Query" => Some(BindingSource::Query),
            "Json" => Some(BindingSource::Body),
            "Path" => Some(BindingSource::Route),
            "TypedHeader" | "Header" => Some(BindingSource::Header),
            "Form" => Some(BindingSource::Form),
            _ => None,
        }
    }
}

/// A (possibly generic) type reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    /// Type name, possibly carrying an arity suffix (``List`1``)
    pub name: String,
    /// Generic type arguments in declaration order
    pub args: Vec<TypeDescriptor>,
}

impl TypeDescriptor {
    /// A non-generic type.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// A generic type applied to `args`.
    pub fn generic(name: impl Into<String>, args: Vec<TypeDescriptor>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    /// The unit type, used for operations without a return type.
    pub fn unit() -> Self {
        Self::named("()")
    }

    pub fn is_generic(&self) -> bool {
        !self.args.is_empty()
    }

    /// The name with any arity suffix (everything from a backtick on) removed.
    pub fn base_name(&self) -> &str {
        match self.name.find('`') {
            Some(pos) => &self.name[..pos],
            None => &self.name,
        }
    }

    /// Parse Rust type syntax such as `Page<Item>` or `Vec<Option<u32>>`.
    ///
    /// Text that is not valid type syntax is kept verbatim as a bare name.
    pub fn parse(text: &str) -> Self {
        match syn::parse_str::<syn::Type>(text) {
            Ok(ty) => Self::from_syn(&ty),
            Err(_) => Self::named(text.trim()),
        }
    }

    /// Convert a `syn::Type` into a descriptor.
    pub fn from_syn(ty: &syn::Type) -> Self {
        match ty {
            syn::Type::Path(type_path) => Self::from_path(&type_path.path),
            syn::Type::Reference(reference) => Self::from_syn(&reference.elem),
            syn::Type::Paren(paren) => Self::from_syn(&paren.elem),
            syn::Type::Group(group) => Self::from_syn(&group.elem),
            syn::Type::Slice(slice) => Self::generic("Array", vec![Self::from_syn(&slice.elem)]),
            syn::Type::Array(array) => Self::generic("Array", vec![Self::from_syn(&array.elem)]),
            syn::Type::Tuple(tuple) if tuple.elems.is_empty() => Self::unit(),
            syn::Type::Tuple(tuple) => {
                Self::generic("Tuple", tuple.elems.iter().map(Self::from_syn).collect())
            }
            syn::Type::ImplTrait(impl_trait) => {
                let bound = impl_trait.bounds.iter().find_map(|bound| match bound {
                    syn::TypeParamBound::Trait(trait_bound) => trait_bound
                        .path
                        .segments
                        .last()
                        .map(|segment| segment.ident.to_string()),
                    _ => None,
                });
                Self::named(format!("impl {}", bound.unwrap_or_else(|| "Unknown".to_string())))
            }
            _ => Self::named("Unknown"),
        }
    }

    fn from_path(path: &syn::Path) -> Self {
        let Some(segment) = path.segments.last() else {
            return Self::named("Unknown");
        };

        let mut args = Vec::new();
        if let syn::PathArguments::AngleBracketed(angle) = &segment.arguments {
            for arg in &angle.args {
                if let syn::GenericArgument::Type(inner) = arg {
                    args.push(Self::from_syn(inner));
                }
            }
        }

        Self::generic(segment.ident.to_string(), args)
    }
}

/// One HTTP-method marker on an operation, with its optional route template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerbMarker {
    pub method: HttpMethod,
    pub template: Option<String>,
}

impl VerbMarker {
    pub fn new(method: HttpMethod, template: Option<String>) -> Self {
        Self { method, template }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDescriptor {
    pub name: String,
    pub type_descriptor: TypeDescriptor,
    /// Explicit binding markers, possibly empty
    pub markers: Vec<BindingSource>,
}

impl ParameterDescriptor {
    pub fn new(name: impl Into<String>, type_descriptor: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            type_descriptor,
            markers: Vec::new(),
        }
    }

    pub fn with_marker(mut self, marker: BindingSource) -> Self {
        self.markers.push(marker);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationDescriptor {
    pub name: String,
    /// HTTP-method markers in declaration order; empty means not an operation
    pub verbs: Vec<VerbMarker>,
    pub parameters: Vec<ParameterDescriptor>,
    pub return_type: TypeDescriptor,
    pub summary: Option<String>,
}

impl OperationDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            verbs: Vec::new(),
            parameters: Vec::new(),
            return_type: TypeDescriptor::unit(),
            summary: None,
        }
    }

    pub fn verb(mut self, method: HttpMethod, template: Option<&str>) -> Self {
        self.verbs.push(VerbMarker::new(method, template.map(str::to_string)));
        self
    }

    pub fn parameter(mut self, parameter: ParameterDescriptor) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn returns(mut self, return_type: TypeDescriptor) -> Self {
        self.return_type = return_type;
        self
    }

    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerDescriptor {
    pub name: String,
    /// Whether the container carries the controller capability marker
    pub marked: bool,
    /// Container-level route template
    pub route_template: Option<String>,
    pub operations: Vec<OperationDescriptor>,
}

impl ContainerDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            marked: false,
            route_template: None,
            operations: Vec::new(),
        }
    }

    pub fn marked(mut self) -> Self {
        self.marked = true;
        self
    }

    pub fn route(mut self, template: impl Into<String>) -> Self {
        self.route_template = Some(template.into());
        self
    }

    pub fn operation(mut self, operation: OperationDescriptor) -> Self {
        self.operations.push(operation);
        self
    }
}
