//! End-to-end behaviour of the augmentation pass over model classes.

use tsmeta_emitter::IRPrinter;
use tsmeta_plugin::{ModelClassVisitor, PluginOptions, RunContext, TransformDirective};
use tsmeta_syntax::{
    ClassDeclaration, ClassMember, Decorator, Expression, KeywordType, LiteralType,
    MethodDeclaration, ModuleRef, NodeId, ObjectLiteralElement, PropertyDeclaration,
    PropertyName, PropertySignature, SourceFile, TypeNode, TypeNodeKind, TypeTable,
};

const FILE: &str = "/app/src/cats/cat.dto.ts";

const STRING_NODE: NodeId = NodeId(1);
const NUMBER_NODE: NodeId = NodeId(2);

/// A type table with `string` bound to node 1 and `number` to node 2.
fn base_table() -> TypeTable {
    let mut table = TypeTable::new();
    let string = table.string();
    let number = table.number();
    table.bind(STRING_NODE, string);
    table.bind(NUMBER_NODE, number);
    table
}

fn string_type() -> TypeNode {
    TypeNode::keyword(STRING_NODE, KeywordType::String)
}

fn number_type() -> TypeNode {
    TypeNode::keyword(NUMBER_NODE, KeywordType::Number)
}

fn literal(id: u32, value: &str) -> TypeNode {
    TypeNode::new(
        NodeId(id),
        TypeNodeKind::Literal(LiteralType::String(value.to_string())),
    )
}

/// Describe a single-property class and print that property's descriptor.
fn describe(
    options: PluginOptions,
    table: &TypeTable,
    property: PropertyDeclaration,
) -> Option<String> {
    let name = property.name.display();
    let class = ClassDeclaration::new("CreateCatDto").with_property(property);
    let file = SourceFile::new(FILE).with_class(class.clone());
    let mut run = RunContext::new(options).expect("valid options");
    let metadata = ModelClassVisitor::new(&mut run).class_metadata(&class, &file, table);
    metadata
        .get(&name)
        .map(|descriptor| IRPrinter::emit_to_string(&descriptor.to_ir()))
}

fn describe_default(table: &TypeTable, property: PropertyDeclaration) -> String {
    describe(PluginOptions::default(), table, property).expect("property is described")
}

#[test]
fn test_required_tracks_optionality() {
    let table = base_table();
    let required = describe_default(&table, PropertyDeclaration::new("name").with_type(string_type()));
    assert!(required.contains("required: true"), "got {required}");

    let optional = describe_default(
        &table,
        PropertyDeclaration::new("name")
            .optional()
            .with_type(string_type()),
    );
    assert!(optional.contains("required: false"), "got {optional}");
}

#[test]
fn test_nullable_single_branch_union() {
    let table = base_table();
    let property = PropertyDeclaration::new("nickname").with_type(TypeNode::union(
        NodeId(10),
        vec![string_type(), TypeNode::null(NodeId(11))],
    ));
    assert_eq!(
        describe_default(&table, property),
        "{ required: true, type: () => String, nullable: true }"
    );
}

#[test]
fn test_multi_branch_union_has_no_type() {
    let table = base_table();
    let property = PropertyDeclaration::new("value").with_type(TypeNode::union(
        NodeId(10),
        vec![string_type(), number_type(), TypeNode::null(NodeId(11))],
    ));
    assert_eq!(describe_default(&table, property), "{ required: true }");
}

#[test]
fn test_inline_object_shape() {
    let table = base_table();
    let shape = TypeNode::type_literal(
        NodeId(10),
        vec![
            PropertySignature::new("a", Some(string_type())),
            PropertySignature::new("b", Some(number_type())).optional(),
        ],
    );
    let property = PropertyDeclaration::new("dimensions").with_type(shape);
    assert_eq!(
        describe_default(&table, property),
        "{ required: true, type: () => ({ a: { required: true, type: () => String }, b: { required: false, type: () => Number } }) }"
    );
}

#[test]
fn test_min_depends_on_validation_shim() {
    let table = base_table();
    let property = PropertyDeclaration::new("age")
        .with_type(number_type())
        .with_decorator(Decorator::new("Min", vec![Expression::number("3")]));

    let with_shim = describe_default(&table, property.clone());
    assert!(with_shim.contains("minimum: 3"), "got {with_shim}");

    let without_shim = describe(
        PluginOptions {
            class_validator_shim: false,
            ..PluginOptions::default()
        },
        &table,
        property,
    )
    .expect("property is described");
    assert!(!without_shim.contains("minimum"), "got {without_shim}");
}

#[test]
fn test_seeded_type_is_never_rederived() {
    let table = base_table();
    let seed = Decorator::new(
        "ApiProperty",
        vec![Expression::ObjectLiteral(vec![ObjectLiteralElement::Property {
            name: PropertyName::Identifier("type".to_string()),
            value: Expression::ident("String"),
        }])],
    );
    let property = PropertyDeclaration::new("name")
        .with_type(string_type())
        .with_decorator(seed);
    assert_eq!(describe_default(&table, property), "{ required: true }");
}

#[test]
fn test_reaugmenting_replaces_the_accessor() {
    let table = base_table();
    let class = ClassDeclaration::new("CreateCatDto")
        .with_property(PropertyDeclaration::new("name").with_type(string_type()))
        .with_member(ClassMember::Method(MethodDeclaration {
            id: NodeId(20),
            name: PropertyName::Identifier("_OPENAPI_METADATA_FACTORY".to_string()),
            is_static: true,
        }));
    let file = SourceFile::new(FILE).with_class(class);
    let mut run = RunContext::new(PluginOptions::default()).expect("valid options");
    let transforms = ModelClassVisitor::new(&mut run).visit_file(&file, &table);

    assert_eq!(transforms.len(), 1, "one directive per class");
    assert!(matches!(
        transforms.for_class("CreateCatDto"),
        Some(TransformDirective::ReplaceStaticMember { .. })
    ));
}

#[test]
fn test_output_is_deterministic() {
    let table = base_table();
    let class = ClassDeclaration::new("CreateCatDto")
        .with_property(PropertyDeclaration::new("name").with_type(string_type()))
        .with_property(
            PropertyDeclaration::new("age")
                .optional()
                .with_type(number_type())
                .with_decorator(Decorator::new("Max", vec![Expression::number("30")])),
        )
        .with_property(PropertyDeclaration::new("breed").with_type(string_type()));
    let file = SourceFile::new(FILE).with_class(class);

    let run_once = || {
        let mut run = RunContext::new(PluginOptions::default()).expect("valid options");
        let transforms = ModelClassVisitor::new(&mut run).visit_file(&file, &table);
        transforms
            .for_class("CreateCatDto")
            .map(TransformDirective::member_text)
            .expect("directive")
    };
    let first = run_once();
    assert_eq!(first, run_once());

    let name = first.find("name:").expect("name");
    let age = first.find("age:").expect("age");
    let breed = first.find("breed:").expect("breed");
    assert!(name < age && age < breed, "declaration order: {first}");
}

#[test]
fn test_optional_literal_union_is_an_enum() {
    let mut table = base_table();
    let active = table.string_literal("ACTIVE");
    let inactive = table.string_literal("INACTIVE");
    let union = table.union(vec![active, inactive]);
    table.bind(NodeId(10), union);

    let property = PropertyDeclaration::new("status").optional().with_type(TypeNode::union(
        NodeId(10),
        vec![literal(11, "ACTIVE"), literal(12, "INACTIVE")],
    ));
    let printed = describe_default(&table, property);
    assert!(printed.contains("required: false"), "got {printed}");
    assert!(
        printed.contains("enum: [\"ACTIVE\", \"INACTIVE\"]"),
        "got {printed}"
    );
    assert!(!printed.contains("isArray"), "got {printed}");
}

#[test]
fn test_length_on_string_array() {
    let mut table = base_table();
    let string = table.string();
    let strings = table.array(string);
    table.bind(NodeId(10), strings);

    let property = PropertyDeclaration::new("tags")
        .with_type(TypeNode::array(NodeId(10), string_type()))
        .with_decorator(Decorator::new(
            "Length",
            vec![Expression::number("2"), Expression::number("10")],
        ));
    assert_eq!(
        describe_default(&table, property),
        "{ required: true, type: () => [String], minLength: 2, maxLength: 10 }"
    );
}

#[test]
fn test_hidden_property_has_no_entry() {
    let table = base_table();
    let property = PropertyDeclaration::new("secret")
        .with_type(string_type())
        .with_decorator(Decorator::new("ApiHideProperty", vec![]));
    assert_eq!(describe(PluginOptions::default(), &table, property), None);
}

#[test]
fn test_cross_file_class_reference() {
    let mut table = base_table();
    let owner = table.class(
        "Owner",
        Some(ModuleRef::File("/app/src/owners/owner.entity.ts".to_string())),
    );
    table.bind(NodeId(10), owner);

    let class = ClassDeclaration::new("CreateCatDto")
        .with_property(PropertyDeclaration::new("owner").with_type(TypeNode::reference(NodeId(10), "Owner")));
    let file = SourceFile::new(FILE).with_class(class);
    let mut run = RunContext::new(PluginOptions::default()).expect("valid options");
    let transforms = ModelClassVisitor::new(&mut run).visit_file(&file, &table);

    let text = transforms
        .for_class("CreateCatDto")
        .map(TransformDirective::member_text)
        .expect("directive");
    assert!(
        text.contains("type: () => require(\"../owners/owner.entity\").Owner"),
        "got {text}"
    );
    assert_eq!(
        run.imports().get("/app/src/owners/owner.entity#Owner"),
        Some("../owners/owner.entity")
    );
}

#[test]
fn test_documentation_and_default() {
    let table = base_table();
    let property = PropertyDeclaration::new("lives")
        .with_type(number_type())
        .with_initializer(Expression::number("9"))
        .with_trivia("\n    /**\n     * Remaining lives.\n     * @example 7\n     */\n    ");
    let printed = describe(
        PluginOptions {
            introspect_comments: true,
            ..PluginOptions::default()
        },
        &table,
        property,
    )
    .expect("property is described");
    assert_eq!(
        printed,
        "{ required: true, type: () => Number, description: \"Remaining lives.\", example: 7, default: 9 }"
    );
}

#[test]
fn test_visit_under_a_debug_subscriber() {
    let subscriber = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("tsmeta_plugin=trace")
        .finish();
    let table = base_table();
    let file = SourceFile::new(FILE).with_class(
        ClassDeclaration::new("CreateCatDto")
            .with_property(PropertyDeclaration::new("name").with_type(string_type()))
            .with_property(
                PropertyDeclaration::new("createdBy")
                    .with_initializer(Expression::prop(Expression::This, "user")),
            ),
    );

    let text = tracing::subscriber::with_default(subscriber, || {
        let mut run = RunContext::new(PluginOptions::default()).expect("valid options");
        let transforms = ModelClassVisitor::new(&mut run).visit_file(&file, &table);
        transforms
            .for_class("CreateCatDto")
            .map(TransformDirective::member_text)
    });
    let text = text.expect("directive");
    assert!(text.contains("createdBy: { required: true }"), "got {text}");
}

#[test]
fn test_nullable_enum_property() {
    let mut table = base_table();
    let status = table.enum_type("Status", Some(ModuleRef::File(FILE.to_string())));
    let null = table.null();
    let union = table.union(vec![status, null]);
    table.bind(NodeId(10), union);
    table.bind(NodeId(20), status);

    let property = PropertyDeclaration::new("status").with_type(TypeNode::union(
        NodeId(10),
        vec![
            TypeNode::reference(NodeId(20), "Status"),
            TypeNode::null(NodeId(21)),
        ],
    ));
    assert_eq!(
        describe_default(&table, property),
        "{ required: true, nullable: true, enum: Status }"
    );
}

#[test]
fn test_matches_keeps_regex_flags() {
    let table = base_table();
    let property = PropertyDeclaration::new("code")
        .with_type(string_type())
        .with_decorator(Decorator::new(
            "Matches",
            vec![Expression::RegularExpressionLiteral("/^abc$/i".to_string())],
        ));
    assert_eq!(
        describe_default(&table, property),
        "{ required: true, type: () => String, pattern: \"/^abc$/i\" }"
    );
}
