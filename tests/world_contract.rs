//! The behaviour a host can rely on from a Typst-backed world.

mod common;

use common::fixtures::{PackageCache, Project, package_source};
use common::pdf_assertions::get_page_dimensions;
use common::{TestResult, compile_request, compile_source, shared_world};
use folio::{CompileError, CompileRequest, FontOrigin, TypesetEngine, TypstEngine, World};
use std::thread;

#[test]
fn test_simple_document() -> TestResult {
    let pdf = compile_source("= Hello, Typst!\n\nThis is a simple document.")?;
    assert!(pdf.bytes.starts_with(b"%PDF-"));
    assert_eq!(pdf.page_count(), 1);
    Ok(())
}

#[test]
fn test_page_settings_are_honoured() -> TestResult {
    let pdf = compile_source("#set page(width: 200pt, height: 300pt)\nSmall page")?;
    let (width, height) = get_page_dimensions(&pdf.doc, 1).expect("page 1 has a media box");
    assert!((width - 200.0).abs() < 0.5, "width {width}");
    assert!((height - 300.0).abs() < 0.5, "height {height}");
    Ok(())
}

#[test]
fn test_builtin_fonts_are_available() -> TestResult {
    let pdf = compile_source("#set text(font: \"DejaVu Sans Mono\")\nmonospace")?;
    assert_pdf_uses_font!(pdf, "DejaVu");
    Ok(())
}

#[test]
fn test_registry_is_builtins_then_customs() {
    common::init_logger();
    let engine = TypstEngine::new();
    let builtin = engine.builtin_fonts();
    let custom_a = builtin[0].clone();
    let custom_b = b"not a real font".to_vec();

    let world = World::builder(engine)
        .with_font(custom_a.clone())
        .with_font(custom_b.clone())
        .build();

    let registry = world.fonts();
    assert_eq!(registry.len(), builtin.len() + 2);
    for (entry, expected) in registry.builtin().iter().zip(&builtin) {
        assert_eq!(entry.origin(), FontOrigin::Builtin);
        assert_eq!(entry.data(), expected);
    }
    assert_eq!(registry.custom()[0].data(), &custom_a);
    assert_eq!(&registry.custom()[1].data()[..], &custom_b[..]);

    // Compiling does not change what the world holds.
    let before = registry.clone();
    world.compile(&CompileRequest::new(b"text")).unwrap();
    assert_eq!(world.fonts(), &before);
}

#[test]
fn test_local_reference_needs_root() -> TestResult {
    let project = Project::new();
    let source = b"#include \"chapter.typ\"";

    let without_root = compile_request(&CompileRequest::new(source));
    assert!(matches!(without_root, Err(CompileError::Engine(_))));

    let with_root = compile_request(&CompileRequest::new(source).with_root(project.path()))?;
    assert_eq!(with_root.page_count(), 1);
    Ok(())
}

#[test]
fn test_nested_local_paths_and_data_files() -> TestResult {
    let project = Project::new();
    let source = b"#include \"parts/two-pages.typ\"\n#let rows = csv(\"/data.csv\")\n#rows.len() rows";
    let pdf = compile_request(&CompileRequest::new(source).with_root(project.path()))?;
    assert_eq!(pdf.page_count(), 2);
    Ok(())
}

#[test]
fn test_absolute_host_path_is_root_relative() {
    let project = Project::new();
    // An absolute host path is read relative to the root, so it does not exist there.
    let source = format!("#include \"{}\"", project.path().join("chapter.typ").display());
    let result = compile_request(&CompileRequest::new(source.as_bytes()).with_root(project.path()));
    assert!(result.is_err());
}

#[test]
fn test_package_reference_needs_cache() -> TestResult {
    let cache = PackageCache::new().with_package("titles", "1.0.0");
    let source = package_source("titles", "1.0.0");

    let without_cache = compile_request(&CompileRequest::new(source.as_bytes()));
    assert!(without_cache.is_err());

    // The root is not searched for packages.
    let root_only = compile_request(&CompileRequest::new(source.as_bytes()).with_root(cache.path()));
    assert!(root_only.is_err());

    let pdf = compile_request(&CompileRequest::new(source.as_bytes()).with_package_cache(cache.path()))?;
    assert_eq!(pdf.page_count(), 2);
    Ok(())
}

#[test]
fn test_unknown_package_version_fails() {
    let cache = PackageCache::new().with_package("titles", "1.0.0");
    let source = package_source("titles", "2.0.0");
    let result = compile_request(&CompileRequest::new(source.as_bytes()).with_package_cache(cache.path()));
    assert!(result.is_err());
}

#[test]
fn test_reference_free_source_ignores_directories() -> TestResult {
    let project = Project::new();
    let cache = PackageCache::new();
    let source = b"= Standalone\n\n#lorem(30)";

    let plain = compile_request(&CompileRequest::new(source))?;
    let configured = compile_request(
        &CompileRequest::new(source)
            .with_root(project.path())
            .with_package_cache(cache.path()),
    )?;
    let missing = compile_request(
        &CompileRequest::new(source)
            .with_root("/no/such/root")
            .with_package_cache("/no/such/cache"),
    )?;

    assert_eq!(plain.bytes, configured.bytes);
    assert_eq!(plain.bytes, missing.bytes);
    Ok(())
}

#[test]
fn test_compiles_are_idempotent() -> TestResult {
    let source = "= Repeatable\n\n#lorem(80)";
    let first = compile_source(source)?;
    let second = compile_source(source)?;
    assert_eq!(first.bytes, second.bytes);
    Ok(())
}

#[test]
fn test_failure_does_not_poison_the_world() -> TestResult {
    assert!(compile_source("#let broken = ").is_err());
    assert!(compile_source("#panic(\"from the document\")").is_err());
    let pdf = compile_source("Still fine")?;
    assert_eq!(pdf.page_count(), 1);
    Ok(())
}

#[test]
fn test_invalid_utf8_is_rejected() {
    let result = shared_world().compile(&CompileRequest::new(&[0x48, 0xff, 0x49]));
    assert!(matches!(result, Err(CompileError::InvalidSource(_))));
}

#[test]
fn test_concurrent_compiles_on_one_world() {
    let world = shared_world();
    let expected = world.compile(&CompileRequest::new(b"Concurrent")).unwrap();

    thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let expected = &expected;
                scope.spawn(move || {
                    for _ in 0..3 {
                        let pdf = world.compile(&CompileRequest::new(b"Concurrent")).unwrap();
                        assert_eq!(&pdf, expected);
                    }
                    let own = format!("Thread {i}");
                    world.compile(&CompileRequest::new(own.as_bytes())).unwrap()
                })
            })
            .collect();

        for handle in handles {
            let pdf = handle.join().unwrap();
            assert!(pdf.starts_with(b"%PDF-"));
        }
    });
}
