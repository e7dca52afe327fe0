//! Declarative descriptor manifests.
//!
//! A manifest lists controllers, their actions and the data types they use,
//! with types written in Rust syntax:
//!
//! ```yaml
//! controllers:
//!   - name: ItemsController
//!     route: items
//!     actions:
//!       - name: get
//!         verbs:
//!           - method: GET
//!             route: "{id}"
//!         parameters:
//!           - name: id
//!             type: u64
//!         returns: Item
//!         summary: Fetch one item
//! types:
//!   - name: Item
//!     members:
//!       - name: id
//!         type: u64
//! ```

use crate::catalog::{MemberDefinition, TypeCatalog, TypeDefinition};
use crate::descriptor::{
    BindingSource, ContainerDescriptor, HttpMethod, MetadataSet, MetadataSource,
    OperationDescriptor, ParameterDescriptor, TypeDescriptor, VerbMarker,
};
use crate::error::{Error, Result};
use log::debug;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Json,
    Yaml,
}

impl ManifestFormat {
    /// `.json` files are JSON, everything else is read as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ManifestFormat::Json,
            _ => ManifestFormat::Yaml,
        }
    }
}

/// Metadata source backed by a manifest file.
pub struct ManifestSource {
    path: PathBuf,
}

impl ManifestSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl MetadataSource for ManifestSource {
    fn load(&self) -> Result<MetadataSet> {
        let content = fs::read_to_string(&self.path).map_err(|e| {
            Error::configuration(format!("cannot read manifest {}: {}", self.path.display(), e))
        })?;
        parse_manifest(&content, ManifestFormat::from_path(&self.path)).map_err(|e| {
            Error::configuration(format!("invalid manifest {}: {}", self.path.display(), e))
        })
    }
}

/// Parse manifest text into a metadata set.
pub fn parse_manifest(content: &str, format: ManifestFormat) -> Result<MetadataSet> {
    let manifest: Manifest = match format {
        ManifestFormat::Json => serde_json::from_str(content)?,
        ManifestFormat::Yaml => serde_yaml::from_str(content)?,
    };
    debug!(
        "Manifest lists {} controllers and {} types",
        manifest.controllers.len(),
        manifest.types.len()
    );
    Ok(manifest.into_metadata())
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Manifest {
    #[serde(default)]
    controllers: Vec<ManifestController>,
    #[serde(default)]
    types: Vec<ManifestType>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestController {
    name: String,
    /// Explicit controller capability marker
    #[serde(default)]
    controller: bool,
    route: Option<String>,
    #[serde(default)]
    actions: Vec<ManifestAction>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestAction {
    name: String,
    #[serde(default)]
    verbs: Vec<ManifestVerb>,
    #[serde(default)]
    parameters: Vec<ManifestParameter>,
    returns: Option<String>,
    summary: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestVerb {
    method: HttpMethod,
    route: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestParameter {
    name: String,
    #[serde(rename = "type")]
    type_name: String,
    /// Explicit binding markers
    #[serde(default)]
    from: Vec<BindingSource>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestType {
    name: String,
    #[serde(default)]
    members: Vec<ManifestMember>,
    /// Present for enums
    variants: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestMember {
    name: String,
    #[serde(rename = "type")]
    type_name: String,
}

impl Manifest {
    fn into_metadata(self) -> MetadataSet {
        let mut catalog = TypeCatalog::new();
        for ty in self.types {
            let definition = match ty.variants {
                Some(variants) => TypeDefinition::enumeration(ty.name, variants),
                None => TypeDefinition::structure(
                    ty.name,
                    ty.members
                        .into_iter()
                        .map(|m| {
                            MemberDefinition::new(m.name, TypeDescriptor::parse(&m.type_name))
                        })
                        .collect(),
                ),
            };
            catalog.insert(definition);
        }

        let containers = self
            .controllers
            .into_iter()
            .map(|controller| ContainerDescriptor {
                name: controller.name,
                marked: controller.controller,
                route_template: controller.route,
                operations: controller
                    .actions
                    .into_iter()
                    .map(ManifestAction::into_operation)
                    .collect(),
            })
            .collect();

        MetadataSet { containers, catalog }
    }
}

impl ManifestAction {
    fn into_operation(self) -> OperationDescriptor {
        OperationDescriptor {
            name: self.name,
            verbs: self
                .verbs
                .into_iter()
                .map(|verb| VerbMarker::new(verb.method, verb.route))
                .collect(),
            parameters: self
                .parameters
                .into_iter()
                .map(|p| ParameterDescriptor {
                    name: p.name,
                    type_descriptor: TypeDescriptor::parse(&p.type_name),
                    markers: p.from,
                })
                .collect(),
            return_type: self
                .returns
                .as_deref()
                .map(TypeDescriptor::parse)
                .unwrap_or_else(TypeDescriptor::unit),
            summary: self.summary,
        }
    }
}
