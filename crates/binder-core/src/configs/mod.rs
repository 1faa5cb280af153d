/*!
# Binding Configurations

The three binders built on the resolver engine:

- [`PropertyBinder`]: property ⇄ backing field
- [`CommandBinder`]: execute method ⇄ can-execute method, command property, backing field
- [`DependencyBinder`]: property ⇄ static dependency-property descriptor field

Each binder implements [`BindingRules`](crate::resolver::BindingRules) and
exposes a `resolve` entry point returning typed bindings.
*/

pub mod command;
pub mod dependency;
pub mod property;

pub use command::{CommandBinder, CommandBinding};
pub use dependency::{DependencyBinder, DependencyBinding};
pub use property::{PropertyBinder, PropertyBinding};

use crate::model::Member;
use crate::report::{BindingError, Diagnostics};

/// Record a mismatch between two members' declared types
pub(crate) fn check_same_type(
    left_role: &'static str,
    left: &Member,
    right_role: &'static str,
    right: &Member,
    diagnostics: &mut Diagnostics,
) {
    if left.declared_type() != right.declared_type() {
        diagnostics.push(BindingError::type_mismatch(
            left_role,
            &left.name,
            right_role,
            &right.name,
        ));
    }
}

/// Record shape errors of a parameterless method returning `return_type`
pub(crate) fn check_method_shape(
    role: &'static str,
    method: &Member,
    return_type: &str,
    diagnostics: &mut Diagnostics,
) {
    if !method.parameters.is_empty() {
        diagnostics.push(BindingError::shape(role, &method.name, "can not have parameters"));
    }
    if !method.returns(return_type) {
        let detail = format!("must return '{}'", return_type);
        diagnostics.push(BindingError::shape(role, &method.name, detail));
    }
}
