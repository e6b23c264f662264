//! Property-based tests for the code generator.
//!
//! Random named-type graphs (cycles included) and random function
//! signatures are pushed through the full assembler to check:
//! 1. Determinism: identical input gives identical batches, regardless of
//!    declaration order
//! 2. Termination: every graph translates, and self-reference is reported
//! 3. Symbol uniqueness: no temporary is declared twice in one shim
//! 4. Consistency: a usable artifact never contains a sentinel token

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::doc_markdown,
    clippy::uninlined_format_args,
    clippy::redundant_closure_for_method_calls,
    reason = "Proptest macros generate code with these patterns"
)]

use std::collections::HashSet;

use gostd_codegen::{Guard, PackageAssembler, SymbolAllocator, Translator, TypeRegistry, ValueHandle};
use gostd_diagnostic::contains_sentinel;
use gostd_ir::{
    Declarations, FieldShape, FunctionDecl, IntKind, PrimitiveKind, QualifiedName, ResultField, TypeDecl,
    TypeShape,
};
use proptest::prelude::*;

const PACKAGE: &str = "example/pkg";
const TYPE_NAMES: [&str; 4] = ["Alpha", "Beta", "Gamma", "Delta"];

// -- Strategies --

fn type_name(index: usize) -> QualifiedName {
    QualifiedName::new(PACKAGE, TYPE_NAMES[index])
}

fn primitive_strategy() -> impl Strategy<Value = TypeShape> {
    prop_oneof![
        Just(TypeShape::string()),
        Just(TypeShape::int()),
        Just(TypeShape::bool()),
        Just(TypeShape::error()),
        Just(TypeShape::Primitive(PrimitiveKind::Byte)),
        Just(TypeShape::Primitive(PrimitiveKind::Integer(IntKind::Uint32))),
    ]
}

fn leaf_strategy() -> impl Strategy<Value = TypeShape> {
    prop_oneof![
        4 => primitive_strategy(),
        2 => (0..TYPE_NAMES.len()).prop_map(|i| TypeShape::named(type_name(i))),
        1 => Just(TypeShape::unsupported("chan int")),
    ]
}

fn field_name_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-z][a-z]{0,6}").expect("valid regex")
}

fn shape_strategy() -> impl Strategy<Value = TypeShape> {
    leaf_strategy().prop_recursive(4, 24, 4, |inner| {
        prop_oneof![
            inner.clone().prop_map(TypeShape::pointer),
            inner.clone().prop_map(TypeShape::sequence),
            prop::collection::vec((field_name_strategy(), inner), 0..4).prop_map(|fields| {
                // Host structs never repeat a field name.
                let mut seen = HashSet::new();
                TypeShape::Struct(
                    fields
                        .into_iter()
                        .filter(|(name, _)| seen.insert(name.clone()))
                        .map(|(name, shape)| FieldShape::new(name, shape))
                        .collect(),
                )
            }),
        ]
    })
}

fn result_strategy() -> impl Strategy<Value = ResultField> {
    (prop::option::of("[a-z]{1,4}"), shape_strategy()).prop_map(|(name, shape)| ResultField { name, shape })
}

fn function_strategy() -> impl Strategy<Value = FunctionDecl> {
    ("[A-Z][a-z]{0,8}", prop::collection::vec(result_strategy(), 0..3)).prop_map(|(name, results)| {
        // Named results are all-or-nothing in host signatures, and distinct.
        let named = results.first().is_some_and(|r| r.name.is_some());
        let results = results
            .into_iter()
            .enumerate()
            .map(|(i, r)| ResultField {
                name: named.then(|| format!("r{i}")),
                shape: r.shape,
            })
            .collect::<Vec<_>>();
        let mut decl = FunctionDecl::new(QualifiedName::new(PACKAGE, name)).in_file("pkg.go");
        decl.results = results;
        decl
    })
}

fn declarations_strategy() -> impl Strategy<Value = Declarations> {
    (
        prop::collection::vec(shape_strategy(), TYPE_NAMES.len()),
        prop::collection::vec(function_strategy(), 1..6),
    )
        .prop_map(|(shapes, functions)| {
            // Duplicates keep the first declaration seen, which would make
            // the outcome depend on input order.
            let mut seen = HashSet::new();
            Declarations {
                types: shapes
                    .into_iter()
                    .enumerate()
                    .map(|(i, shape)| TypeDecl::new(type_name(i), shape).in_file("types.go"))
                    .collect(),
                functions: functions
                    .into_iter()
                    .filter(|decl| seen.insert(decl.name.clone()))
                    .collect(),
            }
        })
}

// -- Helpers --

fn assemble(declarations: Declarations) -> gostd_codegen::Batch {
    let mut assembler = PackageAssembler::new();
    assembler.add_declarations(declarations).unwrap();
    assembler.assemble().unwrap()
}

/// Names bound by `x := EmptyVector` / `x := EmptyArrayMap()` lines.
fn declared_temporaries(code: &str) -> Vec<&str> {
    code.lines()
        .filter(|line| line.ends_with(":= EmptyVector") || line.ends_with(":= EmptyArrayMap()"))
        .filter_map(|line| line.trim_start_matches("// ").trim_start().split(' ').next())
        .collect()
}

fn references_itself(name: &QualifiedName, shape: &TypeShape) -> bool {
    match shape {
        TypeShape::Named(other) => other == name,
        TypeShape::Pointer(inner) | TypeShape::Sequence(inner) => references_itself(name, inner),
        TypeShape::Struct(fields) => fields
            .iter()
            .filter(|field| field.is_exported())
            .any(|field| references_itself(name, &field.shape)),
        TypeShape::Primitive(_) | TypeShape::Unsupported(_) => false,
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        ..ProptestConfig::default()
    })]

    /// Two runs over the same declarations, in any order, agree byte for byte.
    #[test]
    fn prop_batches_are_deterministic(declarations in declarations_strategy()) {
        let mut reversed = declarations.clone();
        reversed.types.reverse();
        reversed.functions.reverse();

        let first = assemble(declarations.clone());
        let second = assemble(declarations);
        let third = assemble(reversed);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.report(), third.report());
        for (a, b) in first.packages().zip(third.packages()) {
            prop_assert_eq!(a.stub_body(), b.stub_body());
            prop_assert_eq!(a.shim_body(), b.shim_body());
        }
    }

    /// Every named type resolves, and direct self-reference through exported
    /// fields is always reported.
    #[test]
    fn prop_cycles_terminate(shapes in prop::collection::vec(shape_strategy(), TYPE_NAMES.len())) {
        let mut registry = TypeRegistry::new();
        for (i, shape) in shapes.iter().enumerate() {
            registry.register(&TypeDecl::new(type_name(i), shape.clone()).in_file("t.go")).unwrap();
        }
        for (i, shape) in shapes.iter().enumerate() {
            let resolved = registry.resolve(&type_name(i)).unwrap();
            if references_itself(&type_name(i), shape) {
                prop_assert!(!resolved.is_clean());
                prop_assert!(contains_sentinel(&resolved.dynamic_doc));
            }
        }
    }

    /// No temporary is declared twice within one generated shim, and usable
    /// artifacts carry no sentinel.
    #[test]
    fn prop_shims_are_well_formed(declarations in declarations_strategy()) {
        let batch = assemble(declarations);
        for bucket in batch.packages() {
            for artifact in &bucket.artifacts {
                let temporaries = declared_temporaries(&artifact.host_shim);
                let unique: HashSet<&str> = temporaries.iter().copied().collect();
                prop_assert_eq!(unique.len(), temporaries.len(), "{}", artifact.host_shim);
                prop_assert_eq!(artifact.usable, !contains_sentinel(&artifact.host_shim));
                prop_assert_eq!(artifact.usable, artifact.failures.is_empty());
            }
        }
    }

    /// A present pointer converts exactly like its dereferenced value.
    #[test]
    fn prop_pointer_guards_direct_conversion(shape in primitive_strategy()) {
        let mut registry = TypeRegistry::new();
        let mut symbols = SymbolAllocator::new();
        let mut translator = Translator::new(&mut registry, &mut symbols);
        let direct = translator.translate(&shape, "(*p)", &Guard::always());
        let pointer = translator.translate(&TypeShape::pointer(shape.clone()), "p", &Guard::always());
        let (ValueHandle::Expr(direct), ValueHandle::Expr(pointer)) = (direct.value, pointer.value) else {
            return Err(TestCaseError::fail("primitive conversion failed"));
        };
        let present = direct.replace("func() Object { if (*p) != nil { return ", "").replace(" } else { return NIL } }()", "");
        let guarded = "func() Object { if p != nil";
        prop_assert!(pointer.starts_with(guarded), "{}", pointer);
        prop_assert!(pointer.contains(&present), "{}", pointer);
    }
}
