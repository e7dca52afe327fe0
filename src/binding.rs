use crate::descriptor::{BindingSource, ContainerDescriptor, OperationDescriptor, ParameterDescriptor};
use crate::route::{operation_template, RouteConventions};

/// Decide where `parameter` is bound from.
///
/// Explicit markers win, in [`BindingSource::MARKER_PRECEDENCE`] order.
/// Without one, a parameter named by a `{name}` or `{name:constraint}`
/// placeholder in the container or operation template (compared
/// case-insensitively) is a route value; anything else is a query value.
pub fn classify(
    parameter: &ParameterDescriptor,
    container: &ContainerDescriptor,
    operation: &OperationDescriptor,
    conventions: &RouteConventions,
) -> BindingSource {
    if let Some(explicit) = BindingSource::MARKER_PRECEDENCE
        .iter()
        .copied()
        .find(|source| parameter.markers.contains(source))
    {
        return explicit;
    }

    let templates = format!(
        "{}{}",
        conventions.container_template(container),
        operation_template(operation)
    );
    if has_placeholder(&templates, &parameter.name) {
        BindingSource::Route
    } else {
        BindingSource::Query
    }
}

/// Whether `template` holds a `{name}` or `{name:...}` placeholder, ignoring case.
fn has_placeholder(template: &str, name: &str) -> bool {
    let template = template.to_lowercase();
    let name = name.to_lowercase();
    template.contains(&format!("{{{}}}", name)) || template.contains(&format!("{{{}:", name))
}
