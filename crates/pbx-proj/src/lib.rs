//! Xcode project file document model, resolver, and writer.
//!
//! This crate reads a `project.pbxproj` file into a strongly-typed,
//! cross-referenced object graph and writes it back byte-for-byte in the
//! external tool's own dialect, so a round-tripped file stays diff-stable
//! and loadable.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use pbx_proj::PbxProj;
//! use pbx_util::HostFilesystem;
//!
//! let fs = HostFilesystem::new();
//! let proj = PbxProj::open(&fs, Path::new("HelloWorld.xcodeproj")).unwrap();
//! for target in proj.targets() {
//!     println!("{} ({})", target.name(), target.product_name());
//! }
//! let bytes = proj.save().unwrap();
//! ```

mod context;
mod error;
pub mod objects;
mod proj;
mod uuid;
pub mod writer;

pub use error::{ProjError, Result};
pub use objects::{
    BuildConfiguration, BuildFile, BuildPhase, BuildRule, ConfigurationList, ContainerItemProxy,
    FileReference, Group, GroupKind, Object, ObjectKind, ObjectRef, PhaseKind, Project,
    ProjectReference, Ref, ReferenceProxy, Target, TargetDependency, TargetKind, VersionGroup,
};
pub use proj::{PROJECT_DATA_FILE, PbxProj};
pub use uuid::{UUID_LEN, generate_uuid};
pub use writer::{ASCII_HEADER, PbxWriter, escape_string, needs_quoting, quote_bytes};
