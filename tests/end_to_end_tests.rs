//! Host-boundary tests: options from disk, syntax and types handed over as
//! JSON, directives and artifact text out.

use std::io::Write;

use tsmeta::syntax::{SourceFile, TypeTable};
use tsmeta::{ModelClassVisitor, RunContext, TransformDirective, load_options};

const CAT_FILE: &str = r#"{
    "fileName": "/app/src/cats/cat.dto.ts",
    "classes": [{
        "id": 100,
        "name": "CreateCatDto",
        "isExported": true,
        "members": [
            { "property": {
                "id": 101,
                "name": { "identifier": "name" },
                "typeAnnotation": { "id": 1, "kind": { "keyword": "string" } },
                "decorators": [
                    { "name": "MaxLength", "arguments": [ { "numericLiteral": "32" } ] }
                ]
            } },
            { "property": {
                "id": 102,
                "name": { "identifier": "age" },
                "questionToken": true,
                "typeAnnotation": { "id": 2, "kind": { "keyword": "number" } },
                "initializer": { "numericLiteral": "1" }
            } },
            { "property": {
                "id": 103,
                "name": { "identifier": "owner" },
                "typeAnnotation": {
                    "id": 3,
                    "kind": { "reference": { "name": "Owner" } }
                }
            } },
            { "property": {
                "id": 104,
                "name": { "identifier": "secret" },
                "typeAnnotation": { "id": 1, "kind": { "keyword": "string" } },
                "decorators": [ { "name": "ApiHideProperty" } ]
            } },
            "other"
        ]
    }]
}"#;

const TYPES: &str = r#"{
    "types": [
        { "intrinsic": "string" },
        { "intrinsic": "number" },
        { "class": { "name": "Owner", "module": { "file": "/app/src/owners/owner.entity.ts" } } }
    ],
    "bindings": [[1, 0], [2, 1], [3, 2]]
}"#;

fn options_file(json: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(json.as_bytes()).expect("write options");
    file
}

fn inputs() -> (SourceFile, TypeTable) {
    let file: SourceFile = serde_json::from_str(CAT_FILE).expect("valid source file");
    let table = TypeTable::from_json(TYPES).expect("valid type table");
    (file, table)
}

#[test]
fn test_load_options_from_disk() {
    let file = options_file(r#"{ "introspectComments": true, "dtoKeyOfComment": "title" }"#);
    let options = load_options(file.path()).expect("options load");
    assert!(options.introspect_comments);
    assert_eq!(options.dto_key_of_comment, "title");
    assert!(options.class_validator_shim, "defaults fill the rest");
}

#[test]
fn test_load_options_errors_carry_the_path() {
    let file = options_file(r#"{ "readonly": true }"#);
    let err = load_options(file.path()).expect_err("collection mode needs pathToSource");
    let message = format!("{err:#}");
    assert!(
        message.contains(&file.path().display().to_string()),
        "got {message}"
    );
    assert!(message.contains("pathToSource"), "got {message}");

    let missing = load_options("/definitely/not/here/tsmeta.json").expect_err("missing file");
    assert!(format!("{missing:#}").contains("failed to read options file"));
}

#[test]
fn test_augmentation_from_json_inputs() {
    let options = load_options(options_file("{}").path()).expect("options load");
    let (file, table) = inputs();

    let mut run = RunContext::new(options).expect("valid options");
    let transforms = ModelClassVisitor::new(&mut run).visit_file(&file, &table);
    let directive = transforms.for_class("CreateCatDto").expect("directive");
    assert!(matches!(
        directive,
        TransformDirective::AppendStaticMember { .. }
    ));
    assert_eq!(
        directive.member_text(),
        concat!(
            "static _OPENAPI_METADATA_FACTORY() {\n",
            "        return { ",
            "name: { required: true, type: () => String, maxLength: 32 }, ",
            "age: { required: false, type: () => Number, default: 1 }, ",
            "owner: { required: true, type: () => require(\"../owners/owner.entity\").Owner } ",
            "};\n",
            "    }",
        )
    );
    assert_eq!(transforms.iter().next().map(|t| t.class_index), Some(0));
}

#[test]
fn test_collection_from_json_inputs() {
    let options = load_options(
        options_file(r#"{ "readonly": true, "pathToSource": "/app/src" }"#).path(),
    )
    .expect("options load");
    let (file, table) = inputs();

    let mut run = RunContext::new(options).expect("valid options");
    let transforms = ModelClassVisitor::new(&mut run).visit_file(&file, &table);
    assert!(transforms.is_empty());

    let text = run.into_artifact().print();
    assert!(text.starts_with("export default async () => {\n"), "got {text}");
    assert!(
        text.contains("\"./owners/owner.entity\": await import(\"./owners/owner.entity\")"),
        "got {text}"
    );
    assert!(
        text.contains("[import(\"./cats/cat.dto\"), { CreateCatDto: { name: "),
        "got {text}"
    );
    assert!(
        text.contains("type: () => t[\"./owners/owner.entity\"].Owner"),
        "got {text}"
    );
    assert!(!text.contains("secret"), "hidden properties stay hidden");
}

#[test]
fn test_init_tracing_is_safe_to_call_twice() {
    tsmeta::init_tracing();
    tsmeta::init_tracing();
}
