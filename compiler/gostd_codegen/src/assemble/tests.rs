use pretty_assertions::assert_eq;

use gostd_ir::{FieldShape, ResultField, TypeShape};

use super::*;

fn qn(package: &str, name: &str) -> QualifiedName {
    QualifiedName::new(package, name)
}

fn string_func(package: &str, name: &str, file: &str) -> FunctionDecl {
    FunctionDecl::new(qn(package, name))
        .with_param("s", TypeShape::string())
        .with_result(ResultField::unnamed(TypeShape::string()))
        .in_file(file)
}

fn chan_func(package: &str, name: &str) -> FunctionDecl {
    FunctionDecl::new(qn(package, name))
        .with_result(ResultField::unnamed(TypeShape::unsupported("chan int")))
        .in_file("x.go")
}

#[test]
fn functions_are_grouped_and_sorted() {
    let mut assembler = PackageAssembler::new();
    assembler.add_function(string_func("strings", "ToUpper", "strings/strings.go")).unwrap();
    assembler.add_function(string_func("net/url", "QueryEscape", "net/url/url.go")).unwrap();
    assembler.add_function(string_func("strings", "ToLower", "strings/strings.go")).unwrap();
    let batch = assembler.assemble().unwrap();

    let packages: Vec<&str> = batch.packages().map(|b| b.package.as_str()).collect();
    assert_eq!(packages, ["net/url", "strings"]);

    let strings = batch.bucket("strings").unwrap();
    let names: Vec<&str> = strings.artifacts.iter().map(|a| a.name.name()).collect();
    assert_eq!(names, ["ToLower", "ToUpper"]);
    assert!(strings.non_empty);
    assert_eq!(strings.imports.iter().collect::<Vec<_>>(), ["strings"]);
    assert!(strings.stub_body().find("(defn ToLower").unwrap() < strings.stub_body().find("(defn ToUpper").unwrap());
    assert!(strings.shim_body().contains("func toUpper(s string) Object {"));
}

#[test]
fn unsupported_sibling_does_not_affect_usable_function() {
    let mut assembler = PackageAssembler::new();
    assembler.add_function(chan_func("os", "Signals")).unwrap();
    assembler.add_function(string_func("os", "Getenv", "os/env.go")).unwrap();
    let batch = assembler.assemble().unwrap();

    let os = batch.bucket("os").unwrap();
    let getenv = os.artifacts.iter().find(|a| a.name.name() == "Getenv").unwrap();
    let signals = os.artifacts.iter().find(|a| a.name.name() == "Signals").unwrap();
    assert!(getenv.usable);
    assert!(!signals.usable);
    assert!(os.non_empty);
    assert_eq!(batch.report().generated, 1);
    assert_eq!(batch.report().functions, 2);
}

#[test]
fn empty_packages_are_suppressed_unless_requested() {
    let mut assembler = PackageAssembler::new();
    assembler.add_function(chan_func("os/signal", "Notify")).unwrap();
    assembler.add_function(string_func("path", "Base", "path/path.go")).unwrap();
    let batch = assembler.assemble().unwrap();

    let emitted: Vec<&str> = batch.packages_to_emit(false).map(|b| b.package.as_str()).collect();
    assert_eq!(emitted, ["path"]);
    let all: Vec<&str> = batch.packages_to_emit(true).map(|b| b.package.as_str()).collect();
    assert_eq!(all, ["os/signal", "path"]);

    let signal = batch.bucket("os/signal").unwrap();
    assert!(signal.imports.is_empty());
    assert!(signal.stub_body().starts_with("\n;; (defn Notify"));
}

#[test]
fn duplicate_function_keeps_first_and_notes_the_rest() {
    let mut assembler = PackageAssembler::new();
    assembler.add_function(string_func("os", "Getenv", "os/env.go")).unwrap();
    let mut again = chan_func("os", "Getenv");
    again.file = "os/env_unix.go".to_string();
    assembler.add_function(again).unwrap();
    let batch = assembler.assemble().unwrap();

    assert_eq!(
        batch.report().duplicates,
        ["NOTE: Already seen function os.Getenv in os/env.go, yet again in os/env_unix.go"]
    );
    let os = batch.bucket("os").unwrap();
    assert_eq!(os.artifacts.len(), 1);
    assert!(os.artifacts[0].usable);
}

#[test]
fn duplicate_type_across_files_is_noted() {
    let mut assembler = PackageAssembler::new();
    let first = TypeDecl::new(qn("syscall", "Signal"), TypeShape::int()).in_file("syscall/a.go");
    let second = TypeDecl::new(qn("syscall", "Signal"), TypeShape::string()).in_file("syscall/b.go");
    assembler.add_type(&first).unwrap();
    assembler.add_type(&second).unwrap();
    let batch = assembler.assemble().unwrap();

    assert_eq!(batch.report().types, 1);
    assert_eq!(
        batch.report().duplicates,
        ["NOTE: Already seen type syscall.Signal in syscall/a.go, yet again in syscall/b.go"]
    );
    let types: Vec<(&QualifiedName, &String)> = batch.bucket("syscall").unwrap().types.iter().collect();
    assert_eq!(types, [(&qn("syscall", "Signal"), &"syscall/a.go".to_string())]);
}

#[test]
fn malformed_names_are_fatal() {
    let mut assembler = PackageAssembler::new();
    let err = assembler
        .add_function(string_func("", "Orphan", "orphan.go"))
        .unwrap_err();
    assert_eq!(
        err,
        BindError::MalformedName {
            name: ".Orphan".to_string(),
            file: "orphan.go".to_string()
        }
    );

    let bare = TypeDecl::new(qn("os", ""), TypeShape::string());
    assert!(matches!(
        assembler.add_type(&bare),
        Err(BindError::MalformedName { .. })
    ));
}

#[test]
fn same_file_type_redefinition_is_fatal() {
    let decl = TypeDecl::new(qn("io", "Whence"), TypeShape::int()).in_file("io/io.go");
    let declarations = Declarations {
        types: vec![decl.clone(), decl],
        functions: Vec::new(),
    };
    let mut assembler = PackageAssembler::new();
    assert!(matches!(
        assembler.add_declarations(declarations),
        Err(BindError::TypeDefinedTwice { .. })
    ));
}

#[test]
fn report_tallies_sentinels_of_disabled_artifacts() {
    let mut assembler = PackageAssembler::new();
    assembler
        .add_type(
            &TypeDecl::new(
                qn("container/list", "Element"),
                TypeShape::Struct(vec![FieldShape::new(
                    "Next",
                    TypeShape::pointer(TypeShape::named(qn("container/list", "Element"))),
                )]),
            )
            .in_file("container/list/list.go"),
        )
        .unwrap();
    assembler
        .add_function(
            FunctionDecl::new(qn("container/list", "First"))
                .with_result(ResultField::unnamed(TypeShape::named(qn("container/list", "Element")))),
        )
        .unwrap();
    assembler.add_function(chan_func("container/list", "Stream")).unwrap();
    assembler.add_function(string_func("container/list", "Name", "n.go")).unwrap();
    let report = assembler.assemble().unwrap().report().clone();

    assert!(report.sentinels.count(947) > 0);
    assert!(report.sentinels.count(883) > 0);
    assert_eq!(report.generated, 1);
    assert_eq!(report.generated_percentage(), "33.33");
    assert!(report.to_string().ends_with("Totals: types=1 functions=3 generated=1 (33.33%)"));
}

#[test]
fn empty_batch_reports_placeholder_percentage() {
    let batch = PackageAssembler::new().assemble().unwrap();
    assert_eq!(batch.report().to_string(), "ABENDs:\nTotals: types=0 functions=0 generated=0 (--%)");
    assert_eq!(batch.packages().count(), 0);
}

#[test]
fn identifier_shaped_like_a_code_stays_usable() {
    let mut assembler = PackageAssembler::new();
    assembler
        .add_type(
            &TypeDecl::new(
                qn("codes", "Table"),
                TypeShape::Struct(vec![FieldShape::new("ABEND1", TypeShape::string())]),
            )
            .in_file("codes/table.go"),
        )
        .unwrap();
    assembler
        .add_function(
            FunctionDecl::new(qn("codes", "Lookup"))
                .with_result(ResultField::unnamed(TypeShape::named(qn("codes", "Table"))))
                .in_file("codes/table.go"),
        )
        .unwrap();
    assembler.add_function(string_func("strings", "ToUpper", "strings/strings.go")).unwrap();
    let batch = assembler.assemble().unwrap();

    let lookup = &batch.bucket("codes").unwrap().artifacts[0];
    assert!(lookup.usable);
    assert!(lookup.host_shim.contains("MakeKeyword(\"ABEND1\"), MakeString(_res.ABEND1)"));
    assert!(lookup.dynamic_stub.contains("{:ABEND1 ^String}"));
    assert_eq!(batch.report().generated, 2);
    assert!(batch.report().sentinels.is_empty());
}
