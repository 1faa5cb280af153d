/*!
# Naming Conventions

Role-based naming conventions and cross-role name conversion.

A [`NamingConvention`] is a casing scheme wrapped in a literal prefix and
suffix. Every [`NamingRole`] has one convention; converting a name from one
role to another segments it under the source convention and recompiles the
words under the target convention:

```rust
use binder_core::naming::{NamingConventions, NamingRole};

let conventions = NamingConventions::default();
let name = conventions
    .convert_name("anyActionCommand", NamingRole::CommandField, NamingRole::CommandProperty)
    .unwrap();
assert_eq!(name, "AnyActionCommand");
```
*/

pub mod scheme;

use std::fmt;
use std::str::FromStr;

use regex::Regex;

pub use scheme::CasingScheme;

/// Naming engine errors
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NamingError {
    #[error("Name '{name}' does not match naming convention {convention}")]
    Format { name: String, convention: String },
}

/// Member role a naming convention is assigned to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum NamingRole {
    Field,
    Property,
    CommandField,
    CommandProperty,
    DependencyField,
    DependencyProperty,
    ExecuteMethod,
    CanExecuteMethod,
}

impl NamingRole {
    pub const ALL: [NamingRole; 8] = [
        NamingRole::Field,
        NamingRole::Property,
        NamingRole::CommandField,
        NamingRole::CommandProperty,
        NamingRole::DependencyField,
        NamingRole::DependencyProperty,
        NamingRole::ExecuteMethod,
        NamingRole::CanExecuteMethod,
    ];

    /// Kebab-case name used on the command line
    pub fn key(self) -> &'static str {
        match self {
            NamingRole::Field => "field",
            NamingRole::Property => "property",
            NamingRole::CommandField => "command-field",
            NamingRole::CommandProperty => "command-property",
            NamingRole::DependencyField => "dependency-field",
            NamingRole::DependencyProperty => "dependency-property",
            NamingRole::ExecuteMethod => "execute-method",
            NamingRole::CanExecuteMethod => "can-execute-method",
        }
    }
}

impl fmt::Display for NamingRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for NamingRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NamingRole::ALL
            .into_iter()
            .find(|role| role.key() == s)
            .ok_or_else(|| format!("unknown naming role '{}'", s))
    }
}

/// Casing scheme plus literal prefix and suffix
#[derive(Debug, Clone)]
pub struct NamingConvention {
    scheme: CasingScheme,
    prefix: String,
    suffix: String,
    pattern: Regex,
}

impl NamingConvention {
    pub fn new(scheme: CasingScheme, prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let suffix = suffix.into();
        let source = format!(
            "^{}(?P<body>{}){}$",
            regex::escape(&prefix),
            scheme.body_pattern(),
            regex::escape(&suffix)
        );
        // Both affixes are escaped and the body patterns are fixed literals.
        let pattern = Regex::new(&source).expect("naming convention pattern must compile");
        Self {
            scheme,
            prefix,
            suffix,
            pattern,
        }
    }

    pub fn plain(scheme: CasingScheme) -> Self {
        Self::new(scheme, "", "")
    }

    pub fn scheme(&self) -> CasingScheme {
        self.scheme
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Whether `name` is prefix + scheme body + suffix
    pub fn validate(&self, name: &str) -> bool {
        self.pattern.is_match(name)
    }

    /// Split `name` into lower-case words
    pub fn segment(&self, name: &str) -> Result<Vec<String>, NamingError> {
        let body = self
            .pattern
            .captures(name)
            .and_then(|captures| captures.name("body"))
            .ok_or_else(|| NamingError::Format {
                name: name.to_string(),
                convention: self.to_string(),
            })?;
        Ok(self.scheme.split_body(body.as_str()))
    }

    /// Render `words` under this convention
    pub fn compile<S: AsRef<str>>(&self, words: &[S]) -> String {
        format!("{}{}{}", self.prefix, self.scheme.compile(words), self.suffix)
    }
}

impl PartialEq for NamingConvention {
    fn eq(&self, other: &Self) -> bool {
        self.scheme == other.scheme && self.prefix == other.prefix && self.suffix == other.suffix
    }
}

impl Eq for NamingConvention {}

impl fmt::Display for NamingConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}<{}>{}", self.prefix, self.scheme, self.suffix)
    }
}

/// Convention assignment for all eight roles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingConventions {
    pub field: NamingConvention,
    pub property: NamingConvention,
    pub command_field: NamingConvention,
    pub command_property: NamingConvention,
    pub dependency_field: NamingConvention,
    pub dependency_property: NamingConvention,
    pub execute_method: NamingConvention,
    pub can_execute_method: NamingConvention,
}

impl Default for NamingConventions {
    fn default() -> Self {
        Self {
            field: NamingConvention::plain(CasingScheme::LowerCamel),
            property: NamingConvention::plain(CasingScheme::UpperCamel),
            command_field: NamingConvention::new(CasingScheme::LowerCamel, "", "Command"),
            command_property: NamingConvention::new(CasingScheme::UpperCamel, "", "Command"),
            dependency_field: NamingConvention::new(CasingScheme::UpperCamel, "", "Property"),
            dependency_property: NamingConvention::plain(CasingScheme::UpperCamel),
            execute_method: NamingConvention::new(CasingScheme::UpperCamel, "Execute", "Method"),
            can_execute_method: NamingConvention::new(
                CasingScheme::UpperCamel,
                "CanExecute",
                "Method",
            ),
        }
    }
}

impl NamingConventions {
    pub fn get(&self, role: NamingRole) -> &NamingConvention {
        match role {
            NamingRole::Field => &self.field,
            NamingRole::Property => &self.property,
            NamingRole::CommandField => &self.command_field,
            NamingRole::CommandProperty => &self.command_property,
            NamingRole::DependencyField => &self.dependency_field,
            NamingRole::DependencyProperty => &self.dependency_property,
            NamingRole::ExecuteMethod => &self.execute_method,
            NamingRole::CanExecuteMethod => &self.can_execute_method,
        }
    }

    /// Replace the convention of one role
    pub fn with(mut self, role: NamingRole, convention: NamingConvention) -> Self {
        let slot = match role {
            NamingRole::Field => &mut self.field,
            NamingRole::Property => &mut self.property,
            NamingRole::CommandField => &mut self.command_field,
            NamingRole::CommandProperty => &mut self.command_property,
            NamingRole::DependencyField => &mut self.dependency_field,
            NamingRole::DependencyProperty => &mut self.dependency_property,
            NamingRole::ExecuteMethod => &mut self.execute_method,
            NamingRole::CanExecuteMethod => &mut self.can_execute_method,
        };
        *slot = convention;
        self
    }

    pub fn validate(&self, name: &str, role: NamingRole) -> bool {
        self.get(role).validate(name)
    }

    /// Segment `name` under `from` and recompile it under `to`
    pub fn convert_name(
        &self,
        name: &str,
        from: NamingRole,
        to: NamingRole,
    ) -> Result<String, NamingError> {
        let words = self.get(from).segment(name)?;
        Ok(self.get(to).compile(&words))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn samples(scheme: CasingScheme) -> (&'static [&'static str], &'static [&'static str]) {
        match scheme {
            CasingScheme::AllLower => (
                &["foo", "foo_bar", "foo2_bar", "a_1", "class_"],
                &["Foo", "foo__bar", "_foo", "2foo", "foo_bar__", "fooBar", ""],
            ),
            CasingScheme::AllUpper => (
                &["FOO", "FOO_BAR", "MAX_2", "X_"],
                &["Foo", "FOO__BAR", "_FOO", "9LIVES", "FOO_bar"],
            ),
            CasingScheme::FirstUpper => (
                &["Foo", "Foo_bar", "Foo_bar_", "X_2"],
                &["foo", "Foo_Bar", "FOO", "Foo__bar"],
            ),
            CasingScheme::LowerCamel => (
                &["foo", "fooBar", "foo2Bar3", "x"],
                &["Foo", "foo_bar", "fooBAR", "2foo", "fooB"],
            ),
            CasingScheme::UpperCamel => (
                &["Foo", "FooBar", "X", "FooB", "Area51"],
                &["foo", "FOO", "Foo_Bar", "FooBAR", "5Foo"],
            ),
        }
    }

    #[test]
    fn validate_accepts_and_rejects_per_scheme() {
        for scheme in CasingScheme::ALL {
            let convention = NamingConvention::plain(scheme);
            let (valid, invalid) = samples(scheme);
            for name in valid {
                assert!(convention.validate(name), "{} should accept '{}'", scheme, name);
            }
            for name in invalid {
                assert!(!convention.validate(name), "{} should reject '{}'", scheme, name);
            }
        }
    }

    #[test]
    fn compile_of_segment_round_trips_valid_names() {
        for scheme in CasingScheme::ALL {
            for (prefix, suffix) in [("", ""), ("m", ""), ("", "Command"), ("Execute", "Method")] {
                let convention = NamingConvention::new(scheme, prefix, suffix);
                let (valid, _) = samples(scheme);
                for body in valid {
                    let name = format!("{}{}{}", prefix, body, suffix);
                    if !convention.validate(&name) {
                        continue;
                    }
                    let words = convention.segment(&name).unwrap();
                    assert_eq!(convention.compile(&words), name, "round trip under {}", convention);
                }
            }
        }
    }

    #[test]
    fn affixes_are_matched_literally() {
        let convention = NamingConvention::new(CasingScheme::UpperCamel, "Execute", "Method");
        assert!(convention.validate("ExecuteSaveAllMethod"));
        assert!(!convention.validate("ExecuteMethod"));
        assert!(!convention.validate("CanExecuteSaveMethod"));
        assert_eq!(convention.segment("ExecuteSaveAllMethod").unwrap(), vec!["save", "all"]);

        let dotted = NamingConvention::new(CasingScheme::LowerCamel, "m.", "");
        assert!(dotted.validate("m.value"));
        assert!(!dotted.validate("mxvalue"));
    }

    #[test]
    fn segment_reports_format_error() {
        let convention = NamingConvention::new(CasingScheme::LowerCamel, "", "Command");
        let err = convention.segment("SaveCommand").unwrap_err();
        assert_eq!(
            err,
            NamingError::Format {
                name: "SaveCommand".to_string(),
                convention: "<LowerCamel>Command".to_string(),
            }
        );
    }

    #[test]
    fn converts_command_field_to_command_property() {
        let conventions = NamingConventions::default();
        assert_eq!(
            conventions
                .convert_name(
                    "anyActionCommand",
                    NamingRole::CommandField,
                    NamingRole::CommandProperty
                )
                .unwrap(),
            "AnyActionCommand"
        );
    }

    #[test]
    fn converts_between_default_roles() {
        let conventions = NamingConventions::default();
        let cases = [
            ("Foo", NamingRole::Property, NamingRole::Field, "foo"),
            ("X", NamingRole::Property, NamingRole::Field, "x"),
            (
                "ExecuteFooMethod",
                NamingRole::ExecuteMethod,
                NamingRole::CanExecuteMethod,
                "CanExecuteFooMethod",
            ),
            (
                "ExecuteFooMethod",
                NamingRole::ExecuteMethod,
                NamingRole::CommandProperty,
                "FooCommand",
            ),
            ("FooCommand", NamingRole::CommandProperty, NamingRole::CommandField, "fooCommand"),
            ("Title", NamingRole::DependencyProperty, NamingRole::DependencyField, "TitleProperty"),
        ];
        for (name, from, to, expected) in cases {
            assert_eq!(conventions.convert_name(name, from, to).unwrap(), expected);
        }
    }

    #[test]
    fn replacing_a_role_convention() {
        let conventions = NamingConventions::default()
            .with(NamingRole::Field, NamingConvention::new(CasingScheme::AllLower, "_", ""));
        assert_eq!(
            conventions
                .convert_name("UserName", NamingRole::Property, NamingRole::Field)
                .unwrap(),
            "_user_name"
        );
    }

    #[test]
    fn naming_roles_parse_from_keys() {
        for role in NamingRole::ALL {
            assert_eq!(role.key().parse::<NamingRole>(), Ok(role));
        }
    }
}
