use binder_core::{
    CommandBinder, ExplicitLink, LinkKind, Member, NamingConventions, NamingRole, PropertyBinder,
    ResolveMode, TypeSnapshot,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const COMMAND: &str = "System.Windows.Input.ICommand";

/// A view model with `size` properties, half of them backed by fields, and
/// `size / 4` commands
fn view_model(size: usize) -> TypeSnapshot {
    let mut snapshot = TypeSnapshot::new("GeneratedViewModel");
    for i in 0..size {
        snapshot = snapshot.with_member(Member::property(format!("Value{}", i), "System.Int32"));
        if i % 2 == 0 {
            snapshot = snapshot.with_member(Member::field(format!("value{}", i), "System.Int32"));
        }
    }
    for i in 0..size / 4 {
        let alias = ExplicitLink::new(LinkKind::LinkCommand, format!("AliasAction{}Command", i));
        snapshot = snapshot
            .with_member(
                Member::method(format!("ExecuteAction{}Method", i), "System.Void").with_link(alias),
            )
            .with_member(Member::method(format!("CanExecuteAction{}Method", i), "System.Boolean"))
            .with_member(Member::property(format!("Action{}Command", i), COMMAND))
            .with_member(Member::property(format!("AliasAction{}Command", i), COMMAND))
            .with_member(Member::field(format!("action{}Command", i), COMMAND));
    }
    snapshot
}

fn bench_property_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("property_resolution");
    let binder = PropertyBinder::default();

    for size in [16, 128, 1024] {
        let snapshot = view_model(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &snapshot, |b, snapshot| {
            b.iter(|| binder.resolve(black_box(snapshot), ResolveMode::All))
        });
    }
    group.finish();
}

fn bench_command_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("command_resolution");
    let binder = CommandBinder::default();

    for size in [16, 128, 1024] {
        let snapshot = view_model(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &snapshot, |b, snapshot| {
            b.iter(|| binder.resolve(black_box(snapshot), ResolveMode::All))
        });
    }
    group.finish();
}

fn bench_name_conversion(c: &mut Criterion) {
    let conventions = NamingConventions::default();
    c.bench_function("convert_command_field_to_property", |b| {
        b.iter(|| {
            conventions.convert_name(
                black_box("submitCustomerOrderCommand"),
                NamingRole::CommandField,
                NamingRole::CommandProperty,
            )
        })
    });
}

criterion_group!(
    benches,
    bench_property_resolution,
    bench_command_resolution,
    bench_name_conversion
);
criterion_main!(benches);
