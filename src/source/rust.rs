use crate::catalog::{MemberDefinition, TypeCatalog, TypeDefinition};
use crate::descriptor::{
    BindingSource, ContainerDescriptor, HttpMethod, MetadataSet, MetadataSource,
    OperationDescriptor, ParameterDescriptor, TypeDescriptor, VerbMarker,
};
use crate::error::{Error, Result};
use crate::parser::{AstParser, ParsedFile};
use crate::scanner::SourceScanner;
use log::{debug, info, warn};
use std::path::{Component, Path, PathBuf};
use syn::punctuated::Punctuated;
use syn::visit::Visit;
use syn::{Attribute, Expr, ExprLit, Lit, LitStr, Meta, Token};

/// Metadata source backed by a Rust project directory.
///
/// Every struct is a candidate container. `#[controller]` (optionally with a
/// route template) marks it as one explicitly and `#[route("...")]` sets its
/// template. Methods of its inherent `impl` blocks are candidate operations;
/// `#[get]`, `#[post]`, `#[put]`, `#[delete]` and `#[patch]` expose them.
pub struct RustSource {
    root_path: PathBuf,
}

impl RustSource {
    pub fn new(root_path: PathBuf) -> Self {
        Self { root_path }
    }
}

impl MetadataSource for RustSource {
    fn load(&self) -> Result<MetadataSet> {
        let scan = SourceScanner::new(self.root_path.clone()).scan();
        if !scan.warnings.is_empty() {
            warn!(
                "{} entries under {} could not be read",
                scan.warnings.len(),
                self.root_path.display()
            );
        }
        if scan.rust_files.is_empty() {
            return Err(Error::configuration(format!(
                "no Rust files found under {}",
                self.root_path.display()
            )));
        }

        let parsed_files = AstParser::parse_files(&scan.rust_files);
        if parsed_files.is_empty() {
            return Err(Error::configuration(format!(
                "none of the {} Rust files under {} could be parsed",
                scan.rust_files.len(),
                self.root_path.display()
            )));
        }

        info!(
            "Parsed {} of {} Rust files under {}",
            parsed_files.len(),
            scan.rust_files.len(),
            self.root_path.display()
        );
        Ok(collect_metadata(&parsed_files))
    }
}

/// Build a metadata set from parsed files.
///
/// Containers follow file order, then item order within each file. Each
/// inherent `impl` block is attached to the struct it names: the struct in the
/// same module when the self type is a bare name, the struct whose module path
/// ends with the written path when it is qualified, and otherwise the first
/// struct of that name (an `impl` in another file than its struct).
pub fn collect_metadata(parsed_files: &[ParsedFile]) -> MetadataSet {
    let mut visitor = DescriptorVisitor::default();
    for (index, parsed_file) in parsed_files.iter().enumerate() {
        debug!("Collecting descriptors from {}", parsed_file.path.display());
        visitor.file = index;
        visitor.module_path = file_module_path(&parsed_file.path);
        visitor.visit_file(&parsed_file.syntax_tree);
    }
    visitor.finish()
}

/// Module path implied by a file's location below `src/`.
///
/// `src/api/v2/items.rs` is `api::v2::items`, `src/api/mod.rs` is `api`; a
/// path without a `src` directory contributes its file stem only.
fn file_module_path(path: &Path) -> Vec<String> {
    let components: Vec<String> = path
        .with_extension("")
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => part.to_str().map(str::to_string),
            _ => None,
        })
        .collect();

    let start = components
        .iter()
        .rposition(|part| part == "src")
        .map_or(components.len().saturating_sub(1), |pos| pos + 1);
    let mut module_path = components[start..].to_vec();
    if matches!(module_path.last().map(String::as_str), Some("mod" | "lib" | "main")) {
        module_path.pop();
    }
    module_path
}

struct ScopedContainer {
    descriptor: ContainerDescriptor,
    file: usize,
    module_path: Vec<String>,
}

impl ScopedContainer {
    fn qualified_path(&self) -> Vec<String> {
        let mut path = self.module_path.clone();
        path.push(self.descriptor.name.clone());
        path
    }
}

struct ScopedImpl {
    file: usize,
    module_path: Vec<String>,
    /// Self type path without leading `crate`/`self`/`super`
    self_path: Vec<String>,
    operations: Vec<OperationDescriptor>,
}

#[derive(Default)]
struct DescriptorVisitor {
    file: usize,
    module_path: Vec<String>,
    containers: Vec<ScopedContainer>,
    impls: Vec<ScopedImpl>,
    catalog: TypeCatalog,
}

impl DescriptorVisitor {
    fn finish(self) -> MetadataSet {
        let DescriptorVisitor {
            mut containers,
            impls,
            catalog,
            ..
        } = self;

        for scoped_impl in impls {
            match owner_of(&containers, &scoped_impl) {
                Some(index) => containers[index]
                    .descriptor
                    .operations
                    .extend(scoped_impl.operations),
                None => debug!(
                    "No struct found for impl {}",
                    scoped_impl.self_path.join("::")
                ),
            }
        }

        debug!(
            "Collected {} candidate containers and {} type definitions",
            containers.len(),
            catalog.len()
        );
        MetadataSet {
            containers: containers.into_iter().map(|c| c.descriptor).collect(),
            catalog,
        }
    }
}

/// Index of the container an `impl` block belongs to.
fn owner_of(containers: &[ScopedContainer], scoped_impl: &ScopedImpl) -> Option<usize> {
    let name = scoped_impl.self_path.last()?;

    let scoped = if scoped_impl.self_path.len() > 1 {
        containers
            .iter()
            .position(|c| c.qualified_path().ends_with(&scoped_impl.self_path))
    } else {
        containers.iter().position(|c| {
            c.file == scoped_impl.file
                && c.module_path == scoped_impl.module_path
                && c.descriptor.name == *name
        })
    };

    scoped.or_else(|| containers.iter().position(|c| c.descriptor.name == *name))
}

fn container(item_struct: &syn::ItemStruct) -> ContainerDescriptor {
    let mut container = ContainerDescriptor::new(item_struct.ident.to_string());

    for attr in &item_struct.attrs {
        match attr_name(attr).as_deref() {
            Some("controller") => {
                container.marked = true;
                if let Some(template) = string_argument(attr) {
                    container.route_template = Some(template);
                }
            }
            Some("route") => container.route_template = string_argument(attr),
            _ => {}
        }
    }

    container
}

fn operation(method: &syn::ImplItemFn) -> OperationDescriptor {
    let mut operation = OperationDescriptor::new(method.sig.ident.to_string());

    for attr in &method.attrs {
        let Some(verb) = attr_name(attr).as_deref().and_then(HttpMethod::from_marker) else {
            continue;
        };
        operation.verbs.push(VerbMarker::new(verb, string_argument(attr)));
    }

    operation.summary = doc_summary(&method.attrs);
    operation.return_type = match &method.sig.output {
        syn::ReturnType::Default => TypeDescriptor::unit(),
        syn::ReturnType::Type(_, ty) => TypeDescriptor::from_syn(ty),
    };
    operation.parameters = method
        .sig
        .inputs
        .iter()
        .filter_map(|input| match input {
            syn::FnArg::Typed(pat_type) => Some(pat_type),
            syn::FnArg::Receiver(_) => None,
        })
        .enumerate()
        .map(|(index, pat_type)| parameter(index, pat_type))
        .collect();

    operation
}

impl<'ast> Visit<'ast> for DescriptorVisitor {
    fn visit_item_mod(&mut self, node: &'ast syn::ItemMod) {
        self.module_path.push(node.ident.to_string());
        syn::visit::visit_item_mod(self, node);
        self.module_path.pop();
    }

    fn visit_item_struct(&mut self, node: &'ast syn::ItemStruct) {
        self.containers.push(ScopedContainer {
            descriptor: container(node),
            file: self.file,
            module_path: self.module_path.clone(),
        });
        self.catalog.insert(TypeDefinition::structure(
            node.ident.to_string(),
            public_members(&node.fields),
        ));
        syn::visit::visit_item_struct(self, node);
    }

    fn visit_item_enum(&mut self, node: &'ast syn::ItemEnum) {
        let variants = node.variants.iter().map(|v| v.ident.to_string()).collect();
        self.catalog
            .insert(TypeDefinition::enumeration(node.ident.to_string(), variants));
        syn::visit::visit_item_enum(self, node);
    }

    fn visit_item_impl(&mut self, node: &'ast syn::ItemImpl) {
        if node.trait_.is_some() {
            return;
        }
        let syn::Type::Path(self_ty) = node.self_ty.as_ref() else {
            return;
        };
        let self_path: Vec<String> = self_ty
            .path
            .segments
            .iter()
            .map(|segment| segment.ident.to_string())
            .filter(|segment| !matches!(segment.as_str(), "crate" | "self" | "super"))
            .collect();
        if self_path.is_empty() {
            return;
        }

        let operations = node
            .items
            .iter()
            .filter_map(|item| match item {
                syn::ImplItem::Fn(method) => Some(operation(method)),
                _ => None,
            })
            .collect();

        self.impls.push(ScopedImpl {
            file: self.file,
            module_path: self.module_path.clone(),
            self_path,
            operations,
        });
    }
}

/// Last path segment of an attribute, so `#[actix_web::get]` reads as `get`.
fn attr_name(attr: &Attribute) -> Option<String> {
    attr.path().segments.last().map(|s| s.ident.to_string())
}

/// The first positional string literal of `#[name("...", key = value)]`, if any.
fn string_argument(attr: &Attribute) -> Option<String> {
    let Meta::List(_) = &attr.meta else {
        return None;
    };
    let args = attr
        .parse_args_with(Punctuated::<Expr, Token![,]>::parse_terminated)
        .ok()?;
    args.into_iter().find_map(|arg| match arg {
        Expr::Lit(ExprLit {
            lit: Lit::Str(lit), ..
        }) => Some(lit.value()),
        _ => None,
    })
}

/// Doc comment lines, trimmed and joined with spaces.
fn doc_summary(attrs: &[Attribute]) -> Option<String> {
    let lines: Vec<String> = attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            Meta::NameValue(name_value) => match &name_value.value {
                Expr::Lit(expr_lit) => match &expr_lit.lit {
                    Lit::Str(lit) => Some(lit.value().trim().to_string()),
                    _ => None,
                },
                _ => None,
            },
            _ => None,
        })
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        None
    } else {
        Some(lines.join(" "))
    }
}

fn parameter(index: usize, pat_type: &syn::PatType) -> ParameterDescriptor {
    let name = pattern_name(&pat_type.pat).unwrap_or_else(|| format!("arg{}", index));
    let mut type_descriptor = TypeDescriptor::from_syn(&pat_type.ty);
    let mut markers: Vec<BindingSource> = pat_type
        .attrs
        .iter()
        .filter_map(|attr| attr_name(attr).as_deref().and_then(BindingSource::from_marker))
        .collect();

    if type_descriptor.args.len() == 1 {
        if let Some(source) = BindingSource::from_extractor(&type_descriptor.name) {
            markers.push(source);
            type_descriptor = type_descriptor.args.remove(0);
        }
    }

    ParameterDescriptor {
        name,
        type_descriptor,
        markers,
    }
}

/// The binding name of a parameter pattern: `id`, `Path(id)`, `(a, b)` → `a`.
fn pattern_name(pat: &syn::Pat) -> Option<String> {
    match pat {
        syn::Pat::Ident(ident) => Some(ident.ident.to_string()),
        syn::Pat::TupleStruct(tuple_struct) => tuple_struct.elems.first().and_then(pattern_name),
        syn::Pat::Tuple(tuple) => tuple.elems.first().and_then(pattern_name),
        syn::Pat::Reference(reference) => pattern_name(&reference.pat),
        syn::Pat::Type(pat_type) => pattern_name(&pat_type.pat),
        syn::Pat::Struct(pat_struct) => pat_struct.fields.first().and_then(|field| match &field.member {
            syn::Member::Named(ident) => Some(ident.to_string()),
            syn::Member::Unnamed(_) => None,
        }),
        _ => None,
    }
}

/// Public readable fields, honouring `#[serde(skip)]` and `#[serde(rename)]`.
fn public_members(fields: &syn::Fields) -> Vec<MemberDefinition> {
    fields
        .iter()
        .enumerate()
        .filter(|(_, field)| !matches!(field.vis, syn::Visibility::Inherited))
        .filter_map(|(index, field)| {
            let options = SerdeFieldOptions::parse(&field.attrs);
            if options.skip {
                return None;
            }
            let name = options.rename.unwrap_or_else(|| match &field.ident {
                Some(ident) => ident.to_string(),
                None => index.to_string(),
            });
            Some(MemberDefinition::new(name, TypeDescriptor::from_syn(&field.ty)))
        })
        .collect()
}

#[derive(Debug, Default)]
struct SerdeFieldOptions {
    rename: Option<String>,
    skip: bool,
}

impl SerdeFieldOptions {
    fn parse(attrs: &[Attribute]) -> Self {
        let mut options = Self::default();

        for attr in attrs.iter().filter(|attr| attr.path().is_ident("serde")) {
            let parsed = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") && meta.input.peek(syn::Token![=]) {
                    let value: LitStr = meta.value()?.parse()?;
                    options.rename = Some(value.value());
                } else if meta.path.is_ident("skip") || meta.path.is_ident("skip_serializing") {
                    options.skip = true;
                } else if meta.input.peek(syn::Token![=]) {
                    let _: Expr = meta.value()?.parse()?;
                } else if meta.input.peek(syn::token::Paren) {
                    let _content;
                    syn::parenthesized!(_content in meta.input);
                }
                Ok(())
            });
            if let Err(e) = parsed {
                debug!("Ignoring unreadable serde attribute: {}", e);
            }
        }

        options
    }
}
