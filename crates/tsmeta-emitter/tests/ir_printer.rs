use super::*;
use crate::ir::{IRParam, IRProperty, IRPropertyKey};
use tsmeta_syntax::{Expression, ObjectLiteralElement, PropertyName};

#[test]
fn test_emit_literals() {
    assert_eq!(IRPrinter::emit_to_string(&IRNode::number("42")), "42");
    assert_eq!(
        IRPrinter::emit_to_string(&IRNode::string("hello")),
        "\"hello\""
    );
    assert_eq!(
        IRPrinter::emit_to_string(&IRNode::BooleanLiteral(true)),
        "true"
    );
    assert_eq!(IRPrinter::emit_to_string(&IRNode::NullLiteral), "null");
    assert_eq!(IRPrinter::emit_to_string(&IRNode::void_0()), "void 0");
}

#[test]
fn test_emit_string_escapes() {
    assert_eq!(
        IRPrinter::emit_to_string(&IRNode::string("say \"hi\"\n")),
        "\"say \\\"hi\\\"\\n\""
    );
}

#[test]
fn test_emit_call_and_access() {
    let call = IRNode::call(
        IRNode::id("bar"),
        vec![IRNode::number("1"), IRNode::string("test")],
    );
    assert_eq!(IRPrinter::emit_to_string(&call), "bar(1, \"test\")");

    let chained = IRNode::prop(IRNode::prop(IRNode::id("a"), "b"), "c");
    assert_eq!(IRPrinter::emit_to_string(&chained), "a.b.c");

    let elem = IRNode::elem(IRNode::id("t"), IRNode::string("./user.dto"));
    assert_eq!(IRPrinter::emit_to_string(&elem), "t[\"./user.dto\"]");
}

#[test]
fn test_emit_require_access() {
    let node = IRNode::prop(IRNode::require("./role.dto"), "Role");
    assert_eq!(
        IRPrinter::emit_to_string(&node),
        "require(\"./role.dto\").Role"
    );
}

#[test]
fn test_emit_object_literal_keys() {
    let obj = IRNode::object(vec![
        IRProperty::init("required", IRNode::BooleanLiteral(true)),
        IRProperty::init("first-name", IRNode::NullLiteral),
        IRProperty::init_string("id", IRNode::number("1")),
    ]);
    assert_eq!(
        IRPrinter::emit_to_string(&obj),
        "{ required: true, \"first-name\": null, \"id\": 1 }"
    );
    assert_eq!(IRPrinter::emit_to_string(&IRNode::object(vec![])), "{}");
}

#[test]
fn test_emit_object_literal_multiline() {
    let obj = IRNode::object_multiline(vec![
        IRProperty::init("a", IRNode::number("1")),
        IRProperty::init("b", IRNode::number("2")),
    ]);
    assert_eq!(IRPrinter::emit_to_string(&obj), "{\n    a: 1,\n    b: 2\n}");
}

#[test]
fn test_thunk_returning_object_is_parenthesized() {
    let thunk = IRNode::thunk(IRNode::object(vec![IRProperty::init(
        "name",
        IRNode::string("x"),
    )]));
    assert_eq!(
        IRPrinter::emit_to_string(&thunk),
        "() => ({ name: \"x\" })"
    );

    let thunk = IRNode::thunk(IRNode::id("String"));
    assert_eq!(IRPrinter::emit_to_string(&thunk), "() => String");
}

#[test]
fn test_member_access_on_arrow_is_parenthesized() {
    let node = IRNode::call(IRNode::thunk(IRNode::number("1")), vec![]);
    assert_eq!(IRPrinter::emit_to_string(&node), "(() => 1)()");
}

#[test]
fn test_prefix_unary_spacing() {
    let neg = IRNode::from_json(&serde_json::json!(-5));
    assert_eq!(IRPrinter::emit_to_string(&neg), "-5");

    let double = IRNode::PrefixUnaryExpr {
        operator: "-".to_string(),
        operand: Box::new(neg),
    };
    assert_eq!(IRPrinter::emit_to_string(&double), "- -5");

    let void = IRNode::PrefixUnaryExpr {
        operator: "typeof".to_string(),
        operand: Box::new(IRNode::id("x")),
    };
    assert_eq!(IRPrinter::emit_to_string(&void), "typeof x");
}

#[test]
fn test_emit_static_method() {
    let method = IRNode::StaticMethod {
        name: "_OPENAPI_METADATA_FACTORY".to_string(),
        body: vec![IRNode::ret(Some(IRNode::object(vec![IRProperty::init(
            "id",
            IRNode::object(vec![IRProperty::init(
                "required",
                IRNode::BooleanLiteral(true),
            )]),
        )])))],
    };
    assert_eq!(
        IRPrinter::emit_to_string(&method),
        "static _OPENAPI_METADATA_FACTORY() {\n    return { id: { required: true } };\n}"
    );
}

#[test]
fn test_emit_async_arrow_block() {
    let node = IRNode::ExportDefault(Box::new(IRNode::ArrowFunctionBlock {
        parameters: vec![],
        body: vec![
            IRNode::const_decl(
                "t",
                IRNode::object(vec![IRProperty::init_string(
                    "./a",
                    IRNode::await_expr(IRNode::ImportCall("./a".to_string())),
                )]),
            ),
            IRNode::ret(Some(IRNode::id("t"))),
        ],
        is_async: true,
    }));
    assert_eq!(
        IRPrinter::emit_to_string(&node),
        "export default async () => {\n    const t = { \"./a\": await import(\"./a\") };\n    return t;\n}"
    );
}

#[test]
fn test_emit_indented_block() {
    let mut printer = IRPrinter::with_indent(1);
    printer.emit_node(&IRNode::StaticMethod {
        name: "f".to_string(),
        body: vec![IRNode::ret(None)],
    });
    assert_eq!(printer.finish(), "static f() {\n        return;\n    }");
}

#[test]
fn test_emit_params() {
    let node = IRNode::ArrowFunction {
        parameters: vec![IRParam::new("a"), IRParam::rest("rest")],
        body: Box::new(IRNode::id("a")),
        is_async: false,
    };
    assert_eq!(IRPrinter::emit_to_string(&node), "(a, ...rest) => a");
}

#[test]
fn test_emit_from_expression() {
    let expr = Expression::New {
        callee: Box::new(Expression::ident("Date")),
        arguments: vec![],
    };
    assert_eq!(
        IRPrinter::emit_to_string(&IRNode::from_expression(&expr)),
        "new Date()"
    );

    let obj = Expression::ObjectLiteral(vec![
        ObjectLiteralElement::Property {
            name: PropertyName::Identifier("a".to_string()),
            value: Expression::number("1"),
        },
        ObjectLiteralElement::Shorthand("b".to_string()),
        ObjectLiteralElement::Spread(Expression::ident("rest")),
    ]);
    assert_eq!(
        IRPrinter::emit_to_string(&IRNode::from_expression(&obj)),
        "{ a: 1, b, ...rest }"
    );

    let cast = Expression::As {
        expression: Box::new(Expression::BigIntLiteral("10".to_string())),
        type_node: None,
    };
    assert_eq!(
        IRPrinter::emit_to_string(&IRNode::from_expression(&cast)),
        "10n"
    );
}

#[test]
fn test_emit_computed_key() {
    let obj = IRNode::object(vec![IRProperty {
        key: IRPropertyKey::Computed(Box::new(IRNode::id("KEY"))),
        value: IRNode::number("0"),
    }]);
    assert_eq!(IRPrinter::emit_to_string(&obj), "{ [KEY]: 0 }");
}

#[test]
fn test_identifier_name_check() {
    assert!(is_identifier_name("_id"));
    assert!(is_identifier_name("$ref"));
    assert!(!is_identifier_name("2fa"));
    assert!(!is_identifier_name("first-name"));
    assert!(!is_identifier_name(""));
}
