//! Constants shared by the resolver, compiler and evaluator

/// File naming
pub mod files {
    /// Suffix appended to a normalized view name to form its compiled artifact
    pub const COMPILED_VIEW_EXT: &str = ".compiled.json";

    /// Lock file guarding compilation, created inside the compiled root
    pub const COMPILE_LOCK_FILE: &str = ".compile.lock";
}

/// Default recognized view extensions, in resolution priority order
pub mod extensions {
    pub const TEMPLATE: &str = ".view.tpl";
    pub const HTML: &str = ".view.html";
    pub const SCRIPT: &str = ".view.js";
    pub const STYLE: &str = ".view.css";
}

/// Time limits
pub mod limits {
    use std::time::Duration;

    /// Maximum duration for evaluating one view (malformed input protection)
    pub const RENDER_TIMEOUT: Duration = Duration::from_secs(10);

    /// Maximum wait for the compile lock
    pub const LOCK_TIMEOUT: Duration = Duration::from_secs(30);
}
