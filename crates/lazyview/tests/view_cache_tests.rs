//! Integration tests for compiled-artifact caching

use lazyview::{ParameterSet, View, ViewError};
use lazyview_testkit::{CountingCompiler, ViewFixture};
use toml::toml;

/// With caching on, an existing artifact is used as-is: the source can even
/// disappear and the compiler is never called
#[test]
fn test_cached_artifact_skips_compilation() {
    let fixture = ViewFixture::new().with_view("home.view.tpl", "Hello {{name}}");
    fixture.view().render("home", &toml! { name = "warm" }).unwrap();
    assert!(fixture.compiled_artifact("home").is_file());

    fixture.remove_view("home.view.tpl");
    let compiler = CountingCompiler::new();
    let view = fixture.view().with_compiler(compiler.clone());

    let html = view.render("home", &toml! { name = "cached" }).unwrap();

    assert_eq!(html, "Hello cached");
    assert_eq!(compiler.calls(), 0);
}

/// Cached artifacts are never checked against their source
#[test]
fn test_edited_source_is_ignored_while_cached() {
    let fixture = ViewFixture::new().with_view("page.view.tpl", "v1");
    let view = fixture.view();
    assert_eq!(view.render("page", &ParameterSet::new()).unwrap(), "v1");

    fixture.write_view("page.view.tpl", "v2");
    assert_eq!(view.render("page", &ParameterSet::new()).unwrap(), "v1");

    assert!(view.forget("page").unwrap());
    assert_eq!(view.render("page", &ParameterSet::new()).unwrap(), "v2");
}

#[test]
fn test_cache_disabled_recompiles_every_render() {
    let fixture = ViewFixture::new().with_view("page.view.tpl", "v1");
    let compiler = CountingCompiler::new();
    let mut view = fixture.view().with_compiler(compiler.clone());
    view.set_cache_enabled(false);

    assert_eq!(view.render("page", &ParameterSet::new()).unwrap(), "v1");
    assert!(fixture.compiled_artifact("page").is_file());

    fixture.write_view("page.view.tpl", "v2");
    assert_eq!(view.render("page", &ParameterSet::new()).unwrap(), "v2");
    assert_eq!(compiler.calls(), 2);
}

/// Disabling the cache means the artifact no longer counts, so a view whose
/// source is gone is not found
#[test]
fn test_cache_disabled_requires_source() {
    let fixture = ViewFixture::new().with_view("page.view.tpl", "v1");
    let mut view = fixture.view();
    view.render("page", &ParameterSet::new()).unwrap();
    fixture.remove_view("page.view.tpl");

    view.set_cache_enabled(false);
    assert!(!view.exists("page").unwrap());
    assert!(matches!(
        view.render("page", &ParameterSet::new()),
        Err(ViewError::NotFound { .. })
    ));

    view.set_cache_enabled(true);
    assert!(view.exists("page").unwrap());
    assert_eq!(view.render("page", &ParameterSet::new()).unwrap(), "v1");
}

#[test]
fn test_compiled_artifacts_mirror_name_hierarchy() {
    let fixture = ViewFixture::new()
        .with_view("admin/users/index.view.tpl", "users")
        .with_view("admin/index.view.html", "admin");
    let view = fixture.view();

    view.render("admin.users.index", &ParameterSet::new()).unwrap();
    view.render("admin.index", &ParameterSet::new()).unwrap();

    assert!(fixture.compiled_artifact("admin/users/index").is_file());
    assert!(fixture.compiled_artifact("admin/index").is_file());
    assert!(!fixture.views_dir().join("admin/index.compiled.json").exists());
}

#[test]
fn test_syntax_error_publishes_nothing() {
    let fixture = ViewFixture::new().with_view("bad.view.tpl", "{{each items |item|}}open");
    let view = fixture.view();

    let err = view.render("bad", &ParameterSet::new()).unwrap_err();

    assert!(matches!(err, ViewError::Compile(_)));
    assert!(err.template_error().is_some());
    assert!(!fixture.compiled_artifact("bad").exists());
}

/// Artifacts live beside the sources when no compiled root is configured
#[test]
fn test_default_compiled_dir_is_views_dir() {
    let fixture = ViewFixture::new().with_view("home.view.tpl", "home");
    let view = View::new(fixture.views_dir());

    assert_eq!(view.compiled_dir(), view.dir());
    view.render("home", &ParameterSet::new()).unwrap();
    assert!(fixture.views_dir().join("home.compiled.json").is_file());
}
