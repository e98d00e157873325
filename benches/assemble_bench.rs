//! Descriptor assembly benchmark
//!
//! Measures the model-class visitor over one wide class in both emission
//! modes.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use tsmeta::plugin::{ModelClassVisitor, PluginOptions, RunContext};
use tsmeta::syntax::{
    ClassDeclaration, Decorator, Expression, KeywordType, ModuleRef, NodeId, PropertyDeclaration,
    SourceFile, TypeNode, TypeTable,
};

const FILE: &str = "/app/src/wide/wide.dto.ts";

/// A class with `width` properties cycling through the common shapes:
/// primitives, arrays, cross-file classes, literal-union enums, nullable
/// unions, defaults and validation decorators.
fn wide_class(width: u32) -> (SourceFile, TypeTable) {
    let mut table = TypeTable::new();
    let string = table.string();
    let number = table.number();
    let strings = table.array(string);
    let owner = table.class(
        "Owner",
        Some(ModuleRef::File("/app/src/owners/owner.entity.ts".to_string())),
    );
    let active = table.string_literal("ACTIVE");
    let inactive = table.string_literal("INACTIVE");
    let status = table.union(vec![active, inactive]);

    let mut class = ClassDeclaration::new("WideDto").exported();
    for i in 0..width {
        let node = NodeId(i + 1);
        let name = format!("field{i}");
        let property = match i % 6 {
            0 => {
                table.bind(node, string);
                PropertyDeclaration::new(name)
                    .with_type(TypeNode::keyword(node, KeywordType::String))
                    .with_decorator(Decorator::new("MaxLength", vec![Expression::number("64")]))
            }
            1 => {
                table.bind(node, number);
                PropertyDeclaration::new(name)
                    .optional()
                    .with_type(TypeNode::keyword(node, KeywordType::Number))
                    .with_initializer(Expression::number("0"))
            }
            2 => {
                table.bind(node, strings);
                PropertyDeclaration::new(name)
                    .with_type(TypeNode::array(
                        node,
                        TypeNode::keyword(NodeId::NONE, KeywordType::String),
                    ))
                    .with_decorator(Decorator::new(
                        "Length",
                        vec![Expression::number("1"), Expression::number("8")],
                    ))
            }
            3 => {
                table.bind(node, owner);
                PropertyDeclaration::new(name).with_type(TypeNode::reference(node, "Owner"))
            }
            4 => {
                table.bind(node, status);
                PropertyDeclaration::new(name)
                    .optional()
                    .with_type(TypeNode::reference(node, "Status"))
            }
            _ => {
                table.bind(node, string);
                PropertyDeclaration::new(name).with_type(TypeNode::union(
                    NodeId::NONE,
                    vec![
                        TypeNode::keyword(node, KeywordType::String),
                        TypeNode::null(NodeId::NONE),
                    ],
                ))
            }
        };
        class = class.with_property(property);
    }
    (SourceFile::new(FILE).with_class(class), table)
}

fn bench_augment(c: &mut Criterion) {
    let mut group = c.benchmark_group("augment");
    for width in [10u32, 100, 1000] {
        let (file, table) = wide_class(width);
        group.throughput(Throughput::Elements(u64::from(width)));
        group.bench_with_input(BenchmarkId::from_parameter(width), &file, |b, file| {
            b.iter(|| {
                let mut run = RunContext::new(PluginOptions::default()).expect("valid options");
                let transforms = ModelClassVisitor::new(&mut run).visit_file(file, &table);
                black_box(transforms)
            });
        });
    }
    group.finish();
}

fn bench_collect(c: &mut Criterion) {
    let options = PluginOptions {
        readonly: true,
        path_to_source: Some("/app/src".to_string()),
        ..PluginOptions::default()
    };
    let mut group = c.benchmark_group("collect");
    for width in [10u32, 100, 1000] {
        let (file, table) = wide_class(width);
        group.throughput(Throughput::Elements(u64::from(width)));
        group.bench_with_input(BenchmarkId::from_parameter(width), &file, |b, file| {
            b.iter(|| {
                let mut run = RunContext::new(options.clone()).expect("valid options");
                ModelClassVisitor::new(&mut run).visit_file(file, &table);
                black_box(run.into_artifact().print())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_augment, bench_collect);
criterion_main!(benches);
