//! Effective route composition.
//!
//! Templates are passed through rather than validated: placeholders such as
//! `{id}` stay as written and malformed input composes to a best-effort string.

use crate::descriptor::{ContainerDescriptor, HttpMethod, OperationDescriptor};

/// Naming conventions used to discover containers and compose their routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteConventions {
    /// Placeholder replaced by the container's base name
    pub container_token: String,
    /// Conventional container-name suffix, stripped from the base name
    pub container_suffix: String,
}

impl Default for RouteConventions {
    fn default() -> Self {
        Self {
            container_token: "[controller]".to_string(),
            container_suffix: "Controller".to_string(),
        }
    }
}

impl RouteConventions {
    /// Whether a container is exposed: it carries the capability marker or
    /// follows the naming convention.
    pub fn is_eligible(&self, container: &ContainerDescriptor) -> bool {
        container.marked
            || (!self.container_suffix.is_empty()
                && container.name.ends_with(&self.container_suffix))
    }

    /// Container name with the conventional suffix removed.
    pub fn base_name<'a>(&self, container_name: &'a str) -> &'a str {
        if self.container_suffix.is_empty() {
            return container_name;
        }
        container_name
            .strip_suffix(self.container_suffix.as_str())
            .unwrap_or(container_name)
    }

    /// The container template, defaulting to the container token.
    pub fn container_template<'a>(&'a self, container: &'a ContainerDescriptor) -> &'a str {
        container
            .route_template
            .as_deref()
            .unwrap_or(self.container_token.as_str())
    }

    /// Compose the effective route of `operation` inside `container`.
    ///
    /// Produces `container/operation`, substitutes the container token and
    /// drops a single trailing `/`.
    pub fn compose(&self, container: &ContainerDescriptor, operation: &OperationDescriptor) -> String {
        let composed = format!(
            "{}/{}",
            self.container_template(container),
            operation_template(operation)
        );
        let composed = if self.container_token.is_empty() {
            composed
        } else {
            composed.replace(&self.container_token, self.base_name(&container.name))
        };

        match composed.strip_suffix('/') {
            Some(stripped) => stripped.to_string(),
            None => composed,
        }
    }
}

/// The operation-level template: the first non-empty template among the verb
/// markers, checked in [`HttpMethod::PRIORITY`] order, or `""`.
pub fn operation_template(operation: &OperationDescriptor) -> &str {
    HttpMethod::PRIORITY
        .iter()
        .find_map(|method| {
            operation
                .verbs
                .iter()
                .filter(|marker| marker.method == *method)
                .filter_map(|marker| marker.template.as_deref())
                .find(|template| !template.is_empty())
        })
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn items() -> ContainerDescriptor {
        ContainerDescriptor::new("ItemsController").route("items")
    }

    #[test]
    fn test_compose_with_placeholder() {
        let operation = OperationDescriptor::new("get").verb(HttpMethod::Get, Some("{id}"));
        assert_eq!(RouteConventions::default().compose(&items(), &operation), "items/{id}");
    }

    #[test]
    fn test_empty_operation_template_drops_trailing_separator() {
        let operation = OperationDescriptor::new("list").verb(HttpMethod::Get, None);
        assert_eq!(RouteConventions::default().compose(&items(), &operation), "items");
    }

    #[test]
    fn test_only_one_trailing_separator_is_dropped() {
        let container = ContainerDescriptor::new("ItemsController").route("items/");
        let operation = OperationDescriptor::new("list").verb(HttpMethod::Get, Some(""));
        assert_eq!(RouteConventions::default().compose(&container, &operation), "items/");
    }

    #[test]
    fn test_default_container_template_uses_base_name() {
        let container = ContainerDescriptor::new("OrdersController");
        let operation = OperationDescriptor::new("get").verb(HttpMethod::Get, Some("{id:int}"));
        assert_eq!(
            RouteConventions::default().compose(&container, &operation),
            "Orders/{id:int}"
        );
    }

    #[test]
    fn test_token_inside_explicit_template() {
        let container = ContainerDescriptor::new("OrdersController").route("api/[controller]");
        let operation = OperationDescriptor::new("list").verb(HttpMethod::Get, None);
        assert_eq!(
            RouteConventions::default().compose(&container, &operation),
            "api/Orders"
        );
    }

    #[test]
    fn test_name_without_suffix_is_kept() {
        let container = ContainerDescriptor::new("Health").marked();
        let operation = OperationDescriptor::new("ping").verb(HttpMethod::Get, Some("ping"));
        assert_eq!(RouteConventions::default().compose(&container, &operation), "Health/ping");
    }

    #[test]
    fn test_verb_priority_picks_first_non_empty() {
        let operation = OperationDescriptor::new("upsert")
            .verb(HttpMethod::Patch, Some("patched"))
            .verb(HttpMethod::Get, Some("{id}"))
            .verb(HttpMethod::Post, Some(""));
        assert_eq!(operation_template(&operation), "{id}");

        let operation = operation.verb(HttpMethod::Post, Some("created"));
        assert_eq!(operation_template(&operation), "created");
    }

    #[test]
    fn test_no_templates_is_empty() {
        let operation = OperationDescriptor::new("list").verb(HttpMethod::Delete, None);
        assert_eq!(operation_template(&operation), "");
    }

    #[test]
    fn test_composition_is_idempotent() {
        let conventions = RouteConventions::default();
        let operation = OperationDescriptor::new("get")
            .verb(HttpMethod::Get, Some("{id}/tags/{tag}"))
            .verb(HttpMethod::Put, Some("{id}"));
        let first = conventions.compose(&items(), &operation);
        let second = conventions.compose(&items(), &operation);
        assert_eq!(first, second);
    }

    #[test]
    fn test_malformed_templates_pass_through() {
        let container = ContainerDescriptor::new("ItemsController").route("items/{");
        let operation = OperationDescriptor::new("get").verb(HttpMethod::Get, Some("}/x//"));
        assert_eq!(
            RouteConventions::default().compose(&container, &operation),
            "items/{/}/x/"
        );
    }

    #[test]
    fn test_eligibility() {
        let conventions = RouteConventions::default();
        assert!(conventions.is_eligible(&ContainerDescriptor::new("ItemsController")));
        assert!(conventions.is_eligible(&ContainerDescriptor::new("Health").marked()));
        assert!(!conventions.is_eligible(&ContainerDescriptor::new("Item")));
    }
}
