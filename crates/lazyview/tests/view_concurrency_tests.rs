//! Concurrent renders of the same view
//!
//! Renders race to compile a view that has no artifact yet. Exactly one of
//! them compiles; the rest wait on the compile lock and reuse the published
//! artifact.

use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use lazyview::{ParameterSet, View};
use lazyview_testkit::{CountingCompiler, FailingCompiler, ViewFixture};
use toml::toml;

const NUM_RENDERERS: usize = 8;

/// Simultaneous first renders compile once and all see the same output
#[test]
fn test_concurrent_first_render_compiles_once() {
    let fixture = ViewFixture::new().with_view(
        "report.view.tpl",
        "{{title}}:{{each rows |row|}} {{row}}{{/each}}",
    );
    let compiler = CountingCompiler::new().with_delay(Duration::from_millis(50));
    let view = Arc::new(fixture.view().with_compiler(compiler.clone()));
    let barrier = Arc::new(Barrier::new(NUM_RENDERERS));

    let mut handles = vec![];
    for _ in 0..NUM_RENDERERS {
        let view = Arc::clone(&view);
        let barrier = Arc::clone(&barrier);

        let handle = thread::spawn(move || {
            barrier.wait();
            view.render(
                "report",
                &toml! {
                    title = "Totals"
                    rows = [1, 2, 3]
                },
            )
        });
        handles.push(handle);
    }

    for handle in handles {
        let html = handle.join().unwrap().unwrap();
        assert_eq!(html, "Totals: 1 2 3");
    }

    assert_eq!(compiler.calls(), 1);
    assert!(fixture.compiled_artifact("report").is_file());
}

/// Independent `View` instances over the same roots share the lock file
#[test]
fn test_separate_views_share_compile_lock() {
    let fixture = ViewFixture::new().with_view("shared.view.tpl", "ok");
    let compiler = CountingCompiler::new().with_delay(Duration::from_millis(50));
    let barrier = Arc::new(Barrier::new(NUM_RENDERERS));

    let mut handles = vec![];
    for _ in 0..NUM_RENDERERS {
        let view: View = fixture.view().with_compiler(compiler.clone());
        let barrier = Arc::clone(&barrier);
        handles.push(thread::spawn(move || {
            barrier.wait();
            view.render("shared", &ParameterSet::new())
        }));
    }

    for handle in handles {
        assert_eq!(handle.join().unwrap().unwrap(), "ok");
    }
    assert_eq!(compiler.calls(), 1);
}

/// A compiler that writes garbage and fails must not leave a visible
/// artifact, so the next render compiles from scratch
#[test]
fn test_failed_compile_leaves_no_artifact() {
    let fixture = ViewFixture::new().with_view("home.view.tpl", "Hello {{name}}");

    let failing = fixture.view().with_compiler(FailingCompiler);
    let err = failing.render("home", &toml! { name = "x" }).unwrap_err();
    assert!(err.to_string().contains("compiler crashed"));
    assert!(!fixture.compiled_artifact("home").exists());

    let leftovers: Vec<_> = std::fs::read_dir(fixture.compiled_dir())
        .unwrap()
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name != ".compile.lock")
        .collect();
    assert!(leftovers.is_empty(), "unexpected files: {:?}", leftovers);

    let compiler = CountingCompiler::new();
    let view = fixture.view().with_compiler(compiler.clone());
    assert_eq!(view.render("home", &toml! { name = "y" }).unwrap(), "Hello y");
    assert_eq!(compiler.calls(), 1);
}

/// A render blocked behind a stuck compile gives up with a lock timeout
#[test]
fn test_compile_lock_timeout() {
    let fixture = ViewFixture::new().with_view("slow.view.tpl", "slow");
    let slow = CountingCompiler::new().with_delay(Duration::from_millis(600));
    let holder = fixture.view().with_compiler(slow);

    let waiter = fixture
        .view()
        .with_lock_timeout(Duration::from_millis(100));

    let handle = thread::spawn(move || holder.render("slow", &ParameterSet::new()));
    thread::sleep(Duration::from_millis(150));

    let err = waiter.render("slow", &ParameterSet::new()).unwrap_err();
    assert!(matches!(err, lazyview::ViewError::Lock(_)));

    assert_eq!(handle.join().unwrap().unwrap(), "slow");
}
