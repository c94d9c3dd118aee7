pub mod engine;
pub mod font;
pub mod resource;

pub use engine::{Diagnostic, EngineError, EngineInput, Severity, TypesetEngine};
pub use font::{FontData, FontEntry, FontOrigin, FontRegistry};
pub use resource::{
    FileRef, FileResolver, InMemoryResolver, PackageSpec, ResourceError, SharedResourceData,
};
