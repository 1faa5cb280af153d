/*!
# Resolver Integration Tests

End-to-end resolution over realistic view-model and UI-element snapshots,
through the public API only.
*/

use binder_core::{
    Annotation, BinderConfig, BinderError, CasingScheme, CommandBinder, DependencyBinder,
    ErrorCategory, ExplicitLink, LinkKind, Member, NamingConvention, NamingConventions, NamingRole,
    PropertyBinder, ResolveMode, ResolveOptions, TypeSnapshot,
};
use pretty_assertions::assert_eq;

const COMMAND: &str = "System.Windows.Input.ICommand";
const DESCRIPTOR: &str = "System.Windows.DependencyProperty";

fn order_view_model() -> TypeSnapshot {
    TypeSnapshot::new("OrderViewModel")
        .with_member(Member::property("CustomerName", "System.String"))
        .with_member(Member::field("customerName", "System.String"))
        .with_member(Member::property("Total", "System.Decimal"))
        .with_member(Member::property("SubmitCommand", COMMAND))
        .with_member(Member::field("submitCommand", COMMAND))
        .with_member(Member::method("ExecuteSubmitMethod", "System.Void"))
        .with_member(Member::method("CanExecuteSubmitMethod", "System.Boolean"))
        .with_member(Member::method("Recalculate", "System.Void"))
}

#[test]
fn test_full_view_model() -> binder_core::Result<()> {
    let snapshot = order_view_model();

    let properties = PropertyBinder::default().resolve(&snapshot, ResolveMode::All)?;
    let rendered: Vec<String> = properties.iter().map(ToString::to_string).collect();
    assert_eq!(rendered, vec!["CustomerName -> field: customerName", "Total -> field: -"]);

    let commands = CommandBinder::default().resolve(&snapshot, ResolveMode::All)?;
    assert_eq!(commands.len(), 1);
    assert_eq!(
        commands[0].to_string(),
        "ExecuteSubmitMethod -> can execute: CanExecuteSubmitMethod, \
         property: SubmitCommand, field: submitCommand"
    );
    Ok(())
}

#[test]
fn test_resolution_is_idempotent() {
    let snapshot = order_view_model()
        .with_member(Member::property("broken", "System.String"))
        .with_member(Member::property("Count", "System.Int32"))
        .with_member(Member::field("count", "System.Int64"));
    let binder = PropertyBinder::default();

    let first = binder.resolve(&snapshot, ResolveMode::All);
    let second = binder.resolve(&snapshot, ResolveMode::All);
    assert_eq!(first, second);

    let ok = order_view_model();
    assert_eq!(
        binder.resolve(&ok, ResolveMode::Selectively),
        binder.resolve(&ok, ResolveMode::Selectively)
    );
}

#[test]
fn test_explosion_keeps_other_roles() {
    let snapshot = TypeSnapshot::new("ToolbarViewModel")
        .with_member(
            Member::method("ExecutePrintMethod", "System.Void")
                .with_link(ExplicitLink::new(LinkKind::LinkCommand, "PrintCommand"))
                .with_link(ExplicitLink::new(LinkKind::LinkCommand, "QuickPrintCommand"))
                .with_link(ExplicitLink::new(LinkKind::LinkCommand, "MenuPrintCommand")),
        )
        .with_member(Member::method("CanExecutePrintMethod", "System.Boolean"))
        .with_member(Member::property("PrintCommand", COMMAND))
        .with_member(Member::property("QuickPrintCommand", COMMAND))
        .with_member(Member::property("MenuPrintCommand", COMMAND))
        .with_member(Member::field("quickPrintCommand", COMMAND));

    let bindings = CommandBinder::default()
        .resolve(&snapshot, ResolveMode::All)
        .unwrap();

    let properties: Vec<&str> = bindings
        .iter()
        .map(|b| b.property.map_or("-", |p| p.name.as_str()))
        .collect();
    assert_eq!(properties, vec!["PrintCommand", "QuickPrintCommand", "MenuPrintCommand"]);

    for binding in &bindings {
        assert_eq!(binding.execute.name, "ExecutePrintMethod");
        assert_eq!(binding.can_execute.map(|m| m.name.as_str()), Some("CanExecutePrintMethod"));
    }
    let fields: Vec<Option<&str>> = bindings
        .iter()
        .map(|b| b.field.map(|f| f.name.as_str()))
        .collect();
    assert_eq!(fields, vec![None, Some("quickPrintCommand"), None]);
}

#[test]
fn test_ambiguous_can_execute_fails_whole_run() {
    let snapshot = order_view_model().with_member(
        Member::method("CanSubmitNow", "System.Boolean")
            .with_link(ExplicitLink::new(LinkKind::LinkExecuteMethod, "ExecuteSubmitMethod")),
    );

    let failure = CommandBinder::default()
        .resolve(&snapshot, ResolveMode::All)
        .unwrap_err();
    assert_eq!(
        failure.to_string(),
        "internal errors of command patching:\n\
         1. Multi-connect execute method to can execute method found: \
         execute method 'ExecuteSubmitMethod', \
         can execute methods: 'CanExecuteSubmitMethod', 'CanSubmitNow'"
    );
    assert!(failure.has_category(ErrorCategory::Multiplicity));
}

#[test]
fn test_all_errors_are_reported_together() {
    let snapshot = TypeSnapshot::new("Broken")
        .with_member(Member::property("lowerName", "System.String"))
        .with_member(Member::property("Count", "System.Int32"))
        .with_member(Member::field("count", "System.String"))
        .with_member(
            Member::property("Title", "System.String")
                .with_link(ExplicitLink::new(LinkKind::LinkField, "caption")),
        )
        .with_member(
            Member::field("ghost", "System.String")
                .with_annotation(Annotation::Exclude)
                .with_link(ExplicitLink::new(LinkKind::LinkProperty, "Count")),
        );

    let failure = PropertyBinder::default()
        .resolve(&snapshot, ResolveMode::All)
        .unwrap_err();
    assert_eq!(
        failure.messages(),
        vec![
            "Can not use Exclude together with LinkProperty at field 'ghost'",
            "Not valid patching property name 'lowerName'",
            "Not found field with name 'caption', specified in LinkField at property 'Title'",
            "Types do not match inside group: property 'Count', field 'count'",
        ]
    );
    for category in [
        ErrorCategory::MutualExclusion,
        ErrorCategory::NameFormat,
        ErrorCategory::LinkResolution,
        ErrorCategory::TypeMismatch,
    ] {
        assert!(failure.has_category(category), "missing {:?}", category);
    }
}

#[test]
fn test_failure_converts_into_binder_error() {
    fn run(snapshot: &TypeSnapshot) -> binder_core::Result<usize> {
        Ok(DependencyBinder::default().resolve(snapshot, ResolveMode::All)?.len())
    }

    let snapshot = TypeSnapshot::new("Dial")
        .with_member(Member::property("Angle", "System.Double"))
        .with_member(Member::field("AngleProperty", DESCRIPTOR));

    match run(&snapshot) {
        Err(BinderError::Resolution(failure)) => {
            assert_eq!(
                failure.messages(),
                vec!["Patching field 'AngleProperty' can not be non static"]
            );
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_custom_conventions() {
    let conventions = NamingConventions::default()
        .with(NamingRole::Field, NamingConvention::new(CasingScheme::AllLower, "_", ""))
        .with(NamingRole::Property, NamingConvention::plain(CasingScheme::UpperCamel));
    let binder = PropertyBinder::new(BinderConfig::new().with_conventions(conventions));

    let snapshot = TypeSnapshot::new("LegacyViewModel")
        .with_member(Member::property("FirstName", "System.String"))
        .with_member(Member::field("_first_name", "System.String"))
        .with_member(Member::field("firstName", "System.String"));

    let bindings = binder.resolve(&snapshot, ResolveMode::All).unwrap();
    assert_eq!(bindings[0].field.map(|f| f.name.as_str()), Some("_first_name"));
}

#[test]
fn test_name_round_trip_for_every_role() {
    let conventions = NamingConventions::default();
    let samples = [
        (NamingRole::Field, "orderTotal"),
        (NamingRole::Property, "OrderTotal"),
        (NamingRole::CommandField, "submitOrderCommand"),
        (NamingRole::CommandProperty, "SubmitOrderCommand"),
        (NamingRole::DependencyField, "OrderTotalProperty"),
        (NamingRole::DependencyProperty, "OrderTotal"),
        (NamingRole::ExecuteMethod, "ExecuteSubmitOrderMethod"),
        (NamingRole::CanExecuteMethod, "CanExecuteSubmitOrderMethod"),
    ];

    for (role, name) in samples {
        let convention = conventions.get(role);
        assert!(convention.validate(name), "{} should be a valid {}", name, role);
        let words = convention.segment(name).unwrap();
        assert!(words.iter().all(|word| word.chars().all(|c| !c.is_ascii_uppercase())));
        assert_eq!(convention.compile(&words), name);
    }

    assert_eq!(
        conventions
            .convert_name("anyActionCommand", NamingRole::CommandField, NamingRole::CommandProperty)
            .unwrap(),
        "AnyActionCommand"
    );
}

#[test]
fn test_selective_mode_with_prefer_explicit() {
    let options = ResolveOptions::default().with_prefer_explicit(true);
    let binder = PropertyBinder::new(BinderConfig::new().with_options(options));

    let snapshot = TypeSnapshot::new("Settings")
        .with_member(
            Member::property("Theme", "System.String").with_annotation(Annotation::Include),
        )
        .with_member(Member::field("theme", "System.String"))
        .with_member(
            Member::property("Language", "System.String")
                .with_link(ExplicitLink::new(LinkKind::LinkField, "culture")),
        )
        .with_member(Member::field("language", "System.String"))
        .with_member(Member::field("culture", "System.String"))
        .with_member(Member::property("Ignored", "System.String"));

    let bindings = binder.resolve(&snapshot, ResolveMode::Selectively).unwrap();
    let pairs: Vec<(&str, Option<&str>)> = bindings
        .iter()
        .map(|b| (b.property.name.as_str(), b.field.map(|f| f.name.as_str())))
        .collect();
    assert_eq!(pairs, vec![("Theme", Some("theme")), ("Language", Some("culture"))]);
}

#[test]
fn test_binders_are_shared_across_threads() {
    let binder = CommandBinder::default();
    let snapshots: Vec<TypeSnapshot> = (0..4)
        .map(|i| {
            TypeSnapshot::new(format!("ViewModel{}", i))
                .with_member(Member::method(format!("ExecuteAction{}Method", i), "System.Void"))
                .with_member(Member::property(format!("Action{}Command", i), COMMAND))
        })
        .collect();

    std::thread::scope(|scope| {
        for snapshot in &snapshots {
            let binder = &binder;
            scope.spawn(move || {
                let bindings = binder.resolve(snapshot, ResolveMode::All).unwrap();
                assert_eq!(bindings.len(), 1);
                assert!(bindings[0].property.is_some());
            });
        }
    });
}
