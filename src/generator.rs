//! Operation discovery and record assembly.
//!
//! [`DocsGenerator`] drives a whole generation pass: it loads a
//! [`MetadataSet`] from a [`MetadataSource`], keeps the eligible containers and
//! operations, and assembles one [`OperationRecord`] per (operation, declared
//! verb) pair using the route composer, the binding classifier and the shape
//! resolver.
//!
//! Nothing is cached: each call recomputes everything from the source, so the
//! generator can be shared freely between callers.

use crate::binding::classify;
use crate::descriptor::{
    BindingSource, ContainerDescriptor, HttpMethod, MetadataSet, MetadataSource,
    OperationDescriptor, TypeDescriptor,
};
use crate::error::Result;
use crate::naming::friendly_name;
use crate::route::RouteConventions;
use crate::shape::{ShapeResolver, TypeShape};
use log::{debug, info};
use serde::Serialize;

/// One exposed operation under one HTTP method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationRecord {
    #[serde(rename = "ControllerName")]
    pub controller_name: String,
    #[serde(rename = "ActionName")]
    pub action_name: String,
    #[serde(rename = "HttpMethod")]
    pub http_method: HttpMethod,
    #[serde(rename = "Route")]
    pub route: String,
    #[serde(rename = "ReturnType")]
    pub return_type: TypeRecord,
    #[serde(rename = "Parameters")]
    pub parameters: Vec<ParameterRecord>,
    /// Free-text summary, empty when the operation has none
    #[serde(rename = "Summary")]
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterRecord {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Type")]
    pub type_record: TypeRecord,
    #[serde(rename = "Source")]
    pub source: BindingSource,
}

/// A type as it appears in the output: its friendly name and its shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeRecord {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Structure")]
    pub structure: TypeShape,
}

/// Stateless documentation generator.
#[derive(Debug, Clone, Default)]
pub struct DocsGenerator {
    conventions: RouteConventions,
}

impl DocsGenerator {
    pub fn new(conventions: RouteConventions) -> Self {
        Self { conventions }
    }

    /// Run one full generation pass against `source`.
    ///
    /// # Errors
    ///
    /// Fails only when the source cannot supply metadata; the error is
    /// returned as-is and no partial result is produced.
    pub fn generate(&self, source: &dyn MetadataSource) -> Result<Vec<OperationRecord>> {
        let metadata = source.load()?;
        Ok(self.assemble(&metadata))
    }

    /// Assemble records from an already loaded metadata set.
    ///
    /// Order follows discovery: containers, then operations, then verbs as
    /// declared. No sorting is applied.
    pub fn assemble(&self, metadata: &MetadataSet) -> Vec<OperationRecord> {
        let resolver = ShapeResolver::new(&metadata.catalog);
        let mut records = Vec::new();

        for container in &metadata.containers {
            if !self.conventions.is_eligible(container) {
                continue;
            }
            debug!("Discovered container: {}", container.name);

            for operation in container.operations.iter().filter(|op| !op.verbs.is_empty()) {
                records.extend(self.assemble_operation(container, operation, &resolver));
            }
        }

        info!(
            "Assembled {} operation records from {} candidate containers",
            records.len(),
            metadata.containers.len()
        );
        records
    }

    fn assemble_operation(
        &self,
        container: &ContainerDescriptor,
        operation: &OperationDescriptor,
        resolver: &ShapeResolver<'_>,
    ) -> Vec<OperationRecord> {
        let route = self.conventions.compose(container, operation);
        let return_type = type_record(&operation.return_type, resolver);
        let parameters: Vec<ParameterRecord> = operation
            .parameters
            .iter()
            .map(|parameter| ParameterRecord {
                name: parameter.name.clone(),
                type_record: type_record(&parameter.type_descriptor, resolver),
                source: classify(parameter, container, operation, &self.conventions),
            })
            .collect();

        operation
            .verbs
            .iter()
            .map(|marker| {
                debug!(
                    "Adding operation: {} {} -> {}::{}",
                    marker.method, route, container.name, operation.name
                );
                OperationRecord {
                    controller_name: container.name.clone(),
                    action_name: operation.name.clone(),
                    http_method: marker.method,
                    route: route.clone(),
                    return_type: return_type.clone(),
                    parameters: parameters.clone(),
                    summary: operation.summary.clone().unwrap_or_default(),
                }
            })
            .collect()
    }
}

fn type_record(ty: &TypeDescriptor, resolver: &ShapeResolver<'_>) -> TypeRecord {
    TypeRecord {
        name: friendly_name(ty),
        structure: resolver.resolve(ty),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{MemberDefinition, TypeCatalog, TypeDefinition};
    use crate::descriptor::ParameterDescriptor;
    use crate::error::Error;
    use pretty_assertions::assert_eq;

    struct FixedSource(MetadataSet);

    impl MetadataSource for FixedSource {
        fn load(&self) -> Result<MetadataSet> {
            Ok(self.0.clone())
        }
    }

    struct MissingSource;

    impl MetadataSource for MissingSource {
        fn load(&self) -> Result<MetadataSet> {
            Err(Error::configuration("no metadata available"))
        }
    }

    fn metadata() -> MetadataSet {
        let mut catalog = TypeCatalog::new();
        catalog.insert(TypeDefinition::structure(
            "Item",
            vec![
                MemberDefinition::new("id", TypeDescriptor::named("u64")),
                MemberDefinition::new("name", TypeDescriptor::named("String")),
            ],
        ));

        let items = ContainerDescriptor::new("ItemsController")
            .route("items")
            .operation(
                OperationDescriptor::new("get")
                    .verb(HttpMethod::Get, Some("{id}"))
                    .parameter(ParameterDescriptor::new("id", TypeDescriptor::named("u64")))
                    .returns(TypeDescriptor::named("Item"))
                    .summary("Fetch one item"),
            )
            .operation(
                OperationDescriptor::new("search")
                    .verb(HttpMethod::Get, Some(""))
                    .verb(HttpMethod::Post, None)
                    .parameter(ParameterDescriptor::new("filter", TypeDescriptor::named("String")))
                    .returns(TypeDescriptor::parse("Page<Item>")),
            )
            .operation(OperationDescriptor::new("helper"));

        let model = ContainerDescriptor::new("Item")
            .operation(OperationDescriptor::new("touch").verb(HttpMethod::Put, None));

        let health = ContainerDescriptor::new("Health")
            .marked()
            .operation(OperationDescriptor::new("ping").verb(HttpMethod::Get, Some("ping")));

        MetadataSet {
            containers: vec![items, model, health],
            catalog,
        }
    }

    #[test]
    fn test_discovery_order_and_eligibility() {
        let records = DocsGenerator::default().assemble(&metadata());

        let summary: Vec<(String, String, HttpMethod)> = records
            .iter()
            .map(|r| (r.controller_name.clone(), r.action_name.clone(), r.http_method))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("ItemsController".to_string(), "get".to_string(), HttpMethod::Get),
                ("ItemsController".to_string(), "search".to_string(), HttpMethod::Get),
                ("ItemsController".to_string(), "search".to_string(), HttpMethod::Post),
                ("Health".to_string(), "ping".to_string(), HttpMethod::Get),
            ]
        );
    }

    #[test]
    fn test_route_parameter_record() {
        let records = DocsGenerator::default().assemble(&metadata());
        let get = &records[0];

        assert_eq!(get.route, "items/{id}");
        assert_eq!(get.summary, "Fetch one item");
        assert_eq!(get.parameters.len(), 1);
        assert_eq!(get.parameters[0].source, BindingSource::Route);
        assert_eq!(get.return_type.name, "Item");
        assert!(matches!(get.return_type.structure, TypeShape::Composite { .. }));
    }

    #[test]
    fn test_multiple_verbs_share_route_and_parameters() {
        let records = DocsGenerator::default().assemble(&metadata());
        let (get, post) = (&records[1], &records[2]);

        assert_eq!(get.route, "items");
        assert_eq!(get.route, post.route);
        assert_eq!(get.parameters, post.parameters);
        assert_eq!(get.parameters[0].source, BindingSource::Query);
        assert_ne!(get.http_method, post.http_method);
        assert_eq!(get.summary, "");
    }

    #[test]
    fn test_generic_return_type() {
        let records = DocsGenerator::default().assemble(&metadata());
        let return_type = &records[1].return_type;

        assert_eq!(return_type.name, "Page<Item>");
        let TypeShape::GenericComposite { name, arguments } = &return_type.structure else {
            panic!("expected generic composite");
        };
        assert_eq!(name, "Page<Item>");
        match &arguments[..] {
            [TypeShape::Composite { name, members }] => {
                assert_eq!(name, "Item");
                assert_eq!(members.len(), 2);
            }
            other => panic!("unexpected arguments: {:?}", other),
        }
    }

    #[test]
    fn test_generate_is_repeatable() {
        let generator = DocsGenerator::default();
        let source = FixedSource(metadata());
        let first = generator.generate(&source).unwrap();
        let second = generator.generate(&source).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_configuration_error_propagates() {
        let err = DocsGenerator::default().generate(&MissingSource).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_custom_suffix() {
        let conventions = RouteConventions {
            container_suffix: "Api".to_string(),
            ..RouteConventions::default()
        };
        let metadata = MetadataSet {
            containers: vec![ContainerDescriptor::new("OrdersApi")
                .operation(OperationDescriptor::new("list").verb(HttpMethod::Get, None))],
            catalog: TypeCatalog::new(),
        };

        let records = DocsGenerator::new(conventions).assemble(&metadata);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].route, "Orders");
    }

    #[test]
    fn test_record_json_field_names() {
        let records = DocsGenerator::default().assemble(&metadata());
        let json = serde_json::to_value(&records[0]).unwrap();

        assert_eq!(json["ControllerName"], "ItemsController");
        assert_eq!(json["ActionName"], "get");
        assert_eq!(json["HttpMethod"], "GET");
        assert_eq!(json["Route"], "items/{id}");
        assert_eq!(json["ReturnType"]["Name"], "Item");
        assert_eq!(json["ReturnType"]["Structure"]["Kind"], "Composite");
        assert_eq!(json["Parameters"][0]["Name"], "id");
        assert_eq!(json["Parameters"][0]["Type"]["Name"], "u64");
        assert_eq!(json["Parameters"][0]["Source"], "Route");
        assert_eq!(json["Summary"], "Fetch one item");
    }
}
