use super::*;
use tsmeta_syntax::TypeTable;

fn collect_options() -> PluginOptions {
    PluginOptions {
        readonly: true,
        path_to_source: Some("/app/src".to_string()),
        ..PluginOptions::default()
    }
}

#[test]
fn test_global_types_need_no_import() {
    let table = TypeTable::new();
    let options = PluginOptions::default();
    let mut imports = TypeImportTable::new();
    let mut notes = Vec::new();
    let mut ctx = DescriptorContext::new(
        &table,
        &options,
        "/app/src/cats/cat.dto.ts",
        &mut imports,
        &mut notes,
    );
    assert_eq!(ctx.access_for(&NamedType::global("Date")), TypeAccess::Global);
    assert!(imports.is_empty());
}

#[test]
fn test_augment_same_file_uses_bare_name() {
    let table = TypeTable::new();
    let options = PluginOptions::default();
    let mut imports = TypeImportTable::new();
    let mut notes = Vec::new();
    let mut ctx = DescriptorContext::new(
        &table,
        &options,
        "/app/src/cats/cat.dto.ts",
        &mut imports,
        &mut notes,
    );
    let named = NamedType::new(
        "Owner",
        Some(ModuleRef::File("/app/src/cats/cat.dto.ts".to_string())),
    );
    assert_eq!(ctx.access_for(&named), TypeAccess::Global);
}

#[test]
fn test_augment_cross_file_uses_relative_require() {
    let table = TypeTable::new();
    let options = PluginOptions::default();
    let mut imports = TypeImportTable::new();
    let mut notes = Vec::new();
    let mut ctx = DescriptorContext::new(
        &table,
        &options,
        "/app/src/cats/dto/cat.dto.ts",
        &mut imports,
        &mut notes,
    );
    let named = NamedType::new(
        "Owner",
        Some(ModuleRef::File("/app/src/owners/owner.entity.ts".to_string())),
    );
    assert_eq!(
        ctx.access_for(&named),
        TypeAccess::Require("../../owners/owner.entity".to_string())
    );
    assert_eq!(
        imports.get("/app/src/owners/owner.entity#Owner"),
        Some("../../owners/owner.entity")
    );
}

#[test]
fn test_package_types_use_bare_specifier() {
    let table = TypeTable::new();
    let options = PluginOptions::default();
    let mut imports = TypeImportTable::new();
    let mut notes = Vec::new();
    let mut ctx = DescriptorContext::new(&table, &options, "/app/src/a.ts", &mut imports, &mut notes);
    let named = NamedType::new("Money", Some(ModuleRef::Package("@app/shared".to_string())));
    assert_eq!(
        ctx.access_for(&named),
        TypeAccess::Require("@app/shared".to_string())
    );
    assert_eq!(imports.get("@app/shared#Money"), Some("@app/shared"));
}

#[test]
fn test_collect_mode_is_late_bound_relative_to_source_root() {
    let table = TypeTable::new();
    let options = collect_options();
    let mut imports = TypeImportTable::new();
    let mut notes = Vec::new();
    let mut ctx = DescriptorContext::new(
        &table,
        &options,
        "/app/src/cats/cat.dto.ts",
        &mut imports,
        &mut notes,
    );
    let same_file = NamedType::new(
        "Owner",
        Some(ModuleRef::File("/app/src/cats/cat.dto.ts".to_string())),
    );
    assert_eq!(
        ctx.access_for(&same_file),
        TypeAccess::LateBound("./cats/cat.dto".to_string())
    );
}

#[test]
fn test_dangling_type_is_an_error() {
    let table = TypeTable::new();
    let options = PluginOptions::default();
    let mut imports = TypeImportTable::new();
    let mut notes = Vec::new();
    let ctx = DescriptorContext::new(&table, &options, "/a.ts", &mut imports, &mut notes);
    assert_eq!(
        ctx.shape(TypeId(7)),
        Err(DescriptorError::DanglingType(TypeId(7)))
    );
}

#[test]
fn test_notes_only_with_debug() {
    let table = TypeTable::new();
    let mut imports = TypeImportTable::new();
    let mut notes = Vec::new();

    let quiet = PluginOptions::default();
    let mut ctx = DescriptorContext::new(&table, &quiet, "/a.ts", &mut imports, &mut notes);
    ctx.note("skipped", 100);
    assert!(notes.is_empty());

    let verbose = PluginOptions {
        debug: true,
        ..PluginOptions::default()
    };
    let mut ctx = DescriptorContext::new(&table, &verbose, "/a.ts", &mut imports, &mut notes);
    ctx.set_subject("Cat.name");
    ctx.note("skipped", 100);
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].subject, "Cat.name");
}

#[test]
fn test_run_context_file_key() {
    let run = RunContext::new(collect_options()).unwrap();
    assert_eq!(run.file_key("/app/src/cats/cat.dto.ts"), "./cats/cat.dto");
    assert_eq!(run.file_key("/app/src\\dogs\\dog.dto.ts"), "./dogs/dog.dto");
}

#[test]
fn test_run_context_rejects_invalid_options() {
    let options = PluginOptions {
        readonly: true,
        ..PluginOptions::default()
    };
    assert!(RunContext::new(options).is_err());
}
