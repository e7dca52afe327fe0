//! Human-readable type names.

use crate::descriptor::TypeDescriptor;

/// Render a display name for a type.
///
/// Non-generic types render as their bare name; generic types render as
/// `Base<Arg1, Arg2>` with every argument formatted the same way.
pub fn friendly_name(ty: &TypeDescriptor) -> String {
    if !ty.is_generic() {
        return ty.base_name().to_string();
    }

    let args: Vec<String> = ty.args.iter().map(friendly_name).collect();
    format!("{}<{}>", ty.base_name(), args.join(", "))
}
