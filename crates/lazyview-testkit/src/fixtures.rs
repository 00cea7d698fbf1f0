//! Scratch view trees for tests

use std::path::{Path, PathBuf};

use lazyview::View;
use tempfile::TempDir;

use crate::temp_dir_in_workspace;

/// A temporary views root with a separate compiled root
///
/// ```no_run
/// use lazyview_testkit::ViewFixture;
///
/// let fixture = ViewFixture::new().with_view("home.view.html", "<h1>Hi</h1>");
/// let view = fixture.view();
/// assert_eq!(view.render("home", &Default::default()).unwrap(), "<h1>Hi</h1>");
/// ```
pub struct ViewFixture {
    root: TempDir,
}

impl ViewFixture {
    pub fn new() -> Self {
        let root = temp_dir_in_workspace();
        std::fs::create_dir_all(root.path().join("views")).expect("Failed to create views dir");
        Self { root }
    }

    /// Add a source file relative to the views root
    pub fn with_view(self, relative: &str, content: &str) -> Self {
        self.write_view(relative, content);
        self
    }

    pub fn write_view(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.views_dir().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create view parent dir");
        }
        std::fs::write(&path, content).expect("Failed to write view");
        path
    }

    pub fn remove_view(&self, relative: &str) {
        std::fs::remove_file(self.views_dir().join(relative)).expect("Failed to remove view");
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    pub fn views_dir(&self) -> PathBuf {
        self.root.path().join("views")
    }

    pub fn compiled_dir(&self) -> PathBuf {
        self.root.path().join("compiled")
    }

    /// Compiled artifact path for a relative name such as `admin/index`
    pub fn compiled_artifact(&self, relative: &str) -> PathBuf {
        self.compiled_dir()
            .join(format!("{}{}", relative, lazyview::config::consts::files::COMPILED_VIEW_EXT))
    }

    /// View over this fixture with the default compiler
    pub fn view(&self) -> View {
        View::new(self.views_dir()).with_compiled_dir(self.compiled_dir())
    }
}

impl Default for ViewFixture {
    fn default() -> Self {
        Self::new()
    }
}
