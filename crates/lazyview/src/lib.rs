// Core modules
pub mod compile;
pub mod config;
pub mod error;
pub mod lock;
pub mod path;
pub mod template;
pub mod view;

// Re-export commonly used types
pub use compile::{CompileError, Compiler, TemplateCompiler};
pub use config::ViewConfig;
pub use error::{Result, ViewError};
pub use template::{OutputStack, ParameterSet, TemplateError};
pub use view::{ParameterStore, PathResolver, SourceDescriptor, View, ViewExtension, ViewKind};
