//! Member snapshot model
//!
//! A read-only view of one type's declared fields, properties and methods,
//! together with the declarative annotations attached to each member. The
//! snapshot is built by the caller (the assembly patcher) and handed to a
//! binder; nothing in this crate mutates it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// CLR name of the void return type
pub const VOID_TYPE: &str = "System.Void";
/// CLR name of the boolean type
pub const BOOL_TYPE: &str = "System.Boolean";
/// CLR name of the command marker interface
pub const COMMAND_TYPE: &str = "System.Windows.Input.ICommand";
/// CLR name of the dependency-property descriptor type
pub const DEPENDENCY_PROPERTY_TYPE: &str = "System.Windows.DependencyProperty";

/// Kind of a declared member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    Field,
    Property,
    Method,
}

impl MemberKind {
    pub fn label(self) -> &'static str {
        match self {
            MemberKind::Field => "field",
            MemberKind::Property => "property",
            MemberKind::Method => "method",
        }
    }
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The closed set of explicit link annotations.
///
/// Display names appear verbatim in resolution errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkKind {
    /// Property → backing field
    LinkField,
    /// Field → property it backs
    LinkProperty,
    /// Execute method → can-execute method
    LinkCanExecuteMethod,
    /// Can-execute method → execute method
    LinkExecuteMethod,
    /// Execute method → command property
    LinkCommand,
    /// Command property → execute method, optionally also the can-execute method
    LinkCommandMethods,
}

impl LinkKind {
    pub fn name(self) -> &'static str {
        match self {
            LinkKind::LinkField => "LinkField",
            LinkKind::LinkProperty => "LinkProperty",
            LinkKind::LinkCanExecuteMethod => "LinkCanExecuteMethod",
            LinkKind::LinkExecuteMethod => "LinkExecuteMethod",
            LinkKind::LinkCommand => "LinkCommand",
            LinkKind::LinkCommandMethods => "LinkCommandMethods",
        }
    }
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// "Bind me to the sibling named X"
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExplicitLink {
    pub kind: LinkKind,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second_name: Option<String>,
}

impl ExplicitLink {
    pub fn new(kind: LinkKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            second_name: None,
        }
    }

    pub fn with_second_name(mut self, name: impl Into<String>) -> Self {
        self.second_name = Some(name.into());
        self
    }

    /// Target names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.second_name.as_deref())
    }
}

/// Declarative metadata attached to a member
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Annotation {
    /// Selects the member in selective mode
    Include,
    /// Removes the member from patching
    Exclude,
    Link(ExplicitLink),
    /// Forbids name-convention search for this member's roles
    RequireExplicitLink,
    /// The patcher must not generate a backing field for this member
    SuppressAutoField,
}

/// Index of a member inside its [`TypeSnapshot`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MemberId(pub usize);

/// A named, typed declaration on a type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    pub kind: MemberKind,
    /// Declared type of a field or property
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,
    /// Return type of a method
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,
    /// Parameter types of a method
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<String>,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
}

impl Member {
    fn new(name: impl Into<String>, kind: MemberKind) -> Self {
        Self {
            name: name.into(),
            kind,
            value_type: None,
            return_type: None,
            parameters: Vec::new(),
            is_static: false,
            annotations: Vec::new(),
        }
    }

    pub fn field(name: impl Into<String>, value_type: impl Into<String>) -> Self {
        Self {
            value_type: Some(value_type.into()),
            ..Self::new(name, MemberKind::Field)
        }
    }

    pub fn property(name: impl Into<String>, value_type: impl Into<String>) -> Self {
        Self {
            value_type: Some(value_type.into()),
            ..Self::new(name, MemberKind::Property)
        }
    }

    pub fn method(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        Self {
            return_type: Some(return_type.into()),
            ..Self::new(name, MemberKind::Method)
        }
    }

    pub fn with_parameter(mut self, parameter_type: impl Into<String>) -> Self {
        self.parameters.push(parameter_type.into());
        self
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn with_link(self, link: ExplicitLink) -> Self {
        self.with_annotation(Annotation::Link(link))
    }

    pub fn into_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Value type for fields and properties, return type for methods
    pub fn declared_type(&self) -> Option<&str> {
        match self.kind {
            MemberKind::Method => self.return_type.as_deref(),
            MemberKind::Field | MemberKind::Property => self.value_type.as_deref(),
        }
    }

    pub fn returns(&self, type_name: &str) -> bool {
        self.return_type.as_deref() == Some(type_name)
    }

    pub fn is_included(&self) -> bool {
        self.annotations.contains(&Annotation::Include)
    }

    pub fn is_excluded(&self) -> bool {
        self.annotations.contains(&Annotation::Exclude)
    }

    pub fn requires_explicit_link(&self) -> bool {
        self.annotations.contains(&Annotation::RequireExplicitLink)
    }

    pub fn suppresses_auto_field(&self) -> bool {
        self.annotations.contains(&Annotation::SuppressAutoField)
    }

    pub fn links(&self) -> impl Iterator<Item = &ExplicitLink> {
        self.annotations.iter().filter_map(|annotation| match annotation {
            Annotation::Link(link) => Some(link),
            _ => None,
        })
    }

    pub fn links_of(&self, kind: LinkKind) -> impl Iterator<Item = &ExplicitLink> {
        self.links().filter(move |link| link.kind == kind)
    }
}

/// Read-only view of one type's members
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSnapshot {
    pub name: String,
    #[serde(default)]
    pub members: Vec<Member>,
}

impl TypeSnapshot {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
        }
    }

    pub fn with_member(mut self, member: Member) -> Self {
        self.members.push(member);
        self
    }

    /// Panics if `id` was not produced from this snapshot.
    pub fn member(&self, id: MemberId) -> &Member {
        &self.members[id.0]
    }

    pub fn iter(&self) -> impl Iterator<Item = (MemberId, &Member)> {
        self.members
            .iter()
            .enumerate()
            .map(|(index, member)| (MemberId(index), member))
    }

    pub fn members_of(&self, kind: MemberKind) -> impl Iterator<Item = (MemberId, &Member)> {
        self.iter().filter(move |(_, member)| member.kind == kind)
    }
}

/// Platform type names the configurations check shapes against
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSystem {
    pub void_type: String,
    pub bool_type: String,
    pub command_type: String,
    /// Types a command instance can be assigned to (the command type and its bases)
    pub command_assignable_types: Vec<String>,
    pub dependency_property_type: String,
}

impl Default for TypeSystem {
    fn default() -> Self {
        Self {
            void_type: VOID_TYPE.to_string(),
            bool_type: BOOL_TYPE.to_string(),
            command_type: COMMAND_TYPE.to_string(),
            command_assignable_types: vec![COMMAND_TYPE.to_string(), "System.Object".to_string()],
            dependency_property_type: DEPENDENCY_PROPERTY_TYPE.to_string(),
        }
    }
}

impl TypeSystem {
    /// Whether a member of type `type_name` can hold a command instance
    pub fn is_command_assignable(&self, type_name: &str) -> bool {
        self.command_assignable_types.iter().any(|t| t == type_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn annotations_round_trip_through_json() {
        let member = Member::property("Title", "System.String")
            .with_annotation(Annotation::Include)
            .with_link(ExplicitLink::new(LinkKind::LinkField, "title"));

        let json = serde_json::to_string(&member).unwrap();
        assert!(json.contains(r#"{"type":"link","kind":"LinkField","name":"title"}"#));

        let back: Member = serde_json::from_str(&json).unwrap();
        assert_eq!(back, member);
    }

    #[test]
    fn link_names_include_second_name() {
        let link = ExplicitLink::new(LinkKind::LinkCommandMethods, "ExecuteSave")
            .with_second_name("CanExecuteSave");
        assert_eq!(link.names().collect::<Vec<_>>(), vec!["ExecuteSave", "CanExecuteSave"]);
    }

    #[test]
    fn members_of_keeps_declaration_order() {
        let snapshot = TypeSnapshot::new("Sample")
            .with_member(Member::field("b", "int"))
            .with_member(Member::property("A", "int"))
            .with_member(Member::field("a", "int"));

        let fields: Vec<_> = snapshot
            .members_of(MemberKind::Field)
            .map(|(id, m)| (id, m.name.as_str()))
            .collect();
        assert_eq!(fields, vec![(MemberId(0), "b"), (MemberId(2), "a")]);
    }
}
