//! The typed project graph.
//!
//! Every node is a variant of the closed [`Object`] enum; the `isa` type
//! tag is a function of the variant, never stored separately. The
//! document store owns each node by uuid; all cross-references —
//! `fileRef`, `containerPortal`, children, targets, `parent` — are uuid
//! handles resolved against that store, so reference cycles never form
//! ownership cycles.

mod build_file;
mod build_phase;
mod build_rule;
mod configuration;
mod container_item_proxy;
mod file_reference;
mod group;
mod project;
mod reference_proxy;
mod target;
mod target_dependency;
mod version_group;

pub use build_file::BuildFile;
pub use build_phase::{BuildPhase, PhaseKind};
pub use build_rule::BuildRule;
pub use configuration::{BuildConfiguration, ConfigurationList};
pub use container_item_proxy::ContainerItemProxy;
pub use file_reference::FileReference;
pub use group::{Group, GroupKind};
pub use project::{Project, ProjectReference};
pub use reference_proxy::ReferenceProxy;
pub use target::{Target, TargetKind};
pub use target_dependency::TargetDependency;
pub use version_group::VersionGroup;

use std::marker::PhantomData;

use pbx_plist::{Dictionary, Unpack, Value};

use crate::context::Context;
use crate::error::Result;
use crate::proj::PbxProj;

/// The concrete variants an object can resolve to, one per isa tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Project,
    NativeTarget,
    LegacyTarget,
    AggregateTarget,
    SourcesBuildPhase,
    FrameworksBuildPhase,
    ResourcesBuildPhase,
    CopyFilesBuildPhase,
    ShellScriptBuildPhase,
    HeadersBuildPhase,
    AppleScriptBuildPhase,
    RezBuildPhase,
    BuildFile,
    FileReference,
    Group,
    VariantGroup,
    VersionGroup,
    ReferenceProxy,
    ContainerItemProxy,
    TargetDependency,
    BuildConfiguration,
    ConfigurationList,
    BuildRule,
}

impl ObjectKind {
    /// The isa tag identifying this kind in serialized form.
    pub fn isa(self) -> &'static str {
        match self {
            ObjectKind::Project => "PBXProject",
            ObjectKind::NativeTarget => "PBXNativeTarget",
            ObjectKind::LegacyTarget => "PBXLegacyTarget",
            ObjectKind::AggregateTarget => "PBXAggregateTarget",
            ObjectKind::SourcesBuildPhase => "PBXSourcesBuildPhase",
            ObjectKind::FrameworksBuildPhase => "PBXFrameworksBuildPhase",
            ObjectKind::ResourcesBuildPhase => "PBXResourcesBuildPhase",
            ObjectKind::CopyFilesBuildPhase => "PBXCopyFilesBuildPhase",
            ObjectKind::ShellScriptBuildPhase => "PBXShellScriptBuildPhase",
            ObjectKind::HeadersBuildPhase => "PBXHeadersBuildPhase",
            ObjectKind::AppleScriptBuildPhase => "PBXAppleScriptBuildPhase",
            ObjectKind::RezBuildPhase => "PBXRezBuildPhase",
            ObjectKind::BuildFile => "PBXBuildFile",
            ObjectKind::FileReference => "PBXFileReference",
            ObjectKind::Group => "PBXGroup",
            ObjectKind::VariantGroup => "PBXVariantGroup",
            ObjectKind::VersionGroup => "XCVersionGroup",
            ObjectKind::ReferenceProxy => "PBXReferenceProxy",
            ObjectKind::ContainerItemProxy => "PBXContainerItemProxy",
            ObjectKind::TargetDependency => "PBXTargetDependency",
            ObjectKind::BuildConfiguration => "XCBuildConfiguration",
            ObjectKind::ConfigurationList => "XCConfigurationList",
            ObjectKind::BuildRule => "PBXBuildRule",
        }
    }
}

/// Reference-target families, in resolution priority order.
pub mod families {
    use super::ObjectKind;

    /// Anything a group child or a build file's `fileRef` may point at.
    pub const GROUP_ITEMS: &[ObjectKind] = &[
        ObjectKind::FileReference,
        ObjectKind::ReferenceProxy,
        ObjectKind::Group,
        ObjectKind::VariantGroup,
        ObjectKind::VersionGroup,
    ];

    /// What a container item proxy's portal may point at.
    pub const CONTAINER_PORTALS: &[ObjectKind] =
        &[ObjectKind::FileReference, ObjectKind::Project];

    /// The target variants.
    pub const TARGETS: &[ObjectKind] = &[
        ObjectKind::NativeTarget,
        ObjectKind::LegacyTarget,
        ObjectKind::AggregateTarget,
    ];

    /// The build phase variants.
    pub const BUILD_PHASES: &[ObjectKind] = &[
        ObjectKind::SourcesBuildPhase,
        ObjectKind::FrameworksBuildPhase,
        ObjectKind::ResourcesBuildPhase,
        ObjectKind::CopyFilesBuildPhase,
        ObjectKind::ShellScriptBuildPhase,
        ObjectKind::HeadersBuildPhase,
        ObjectKind::AppleScriptBuildPhase,
        ObjectKind::RezBuildPhase,
    ];

    /// The single-member families.
    pub const PROJECTS: &[ObjectKind] = &[ObjectKind::Project];
    pub const GROUPS: &[ObjectKind] = &[ObjectKind::Group];
    pub const FILE_REFERENCES: &[ObjectKind] = &[ObjectKind::FileReference];
    pub const CONFIGURATION_LISTS: &[ObjectKind] = &[ObjectKind::ConfigurationList];
    pub const BUILD_CONFIGURATIONS: &[ObjectKind] = &[ObjectKind::BuildConfiguration];
    pub const BUILD_FILES: &[ObjectKind] = &[ObjectKind::BuildFile];
    pub const BUILD_RULES: &[ObjectKind] = &[ObjectKind::BuildRule];
    pub const CONTAINER_ITEM_PROXIES: &[ObjectKind] = &[ObjectKind::ContainerItemProxy];
    pub const TARGET_DEPENDENCIES: &[ObjectKind] = &[ObjectKind::TargetDependency];
}

/// A typed, non-owning handle to an object of a known kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ref<T> {
    uuid: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Ref<T> {
    pub fn new(uuid: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            _marker: PhantomData,
        }
    }

    pub fn uuid(&self) -> &str {
        &self.uuid
    }
}

/// An untyped, non-owning handle for family-valued reference fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRef {
    uuid: String,
    kind: ObjectKind,
}

impl ObjectRef {
    pub fn new(uuid: impl Into<String>, kind: ObjectKind) -> Self {
        Self {
            uuid: uuid.into(),
            kind,
        }
    }

    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    pub fn kind(&self) -> ObjectKind {
        self.kind
    }
}

/// State common to every object: its identity and its enclosing node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectCore {
    uuid: String,
    parent: Option<String>,
}

impl ObjectCore {
    pub(crate) fn new(uuid: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            parent: None,
        }
    }

    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    /// Record the enclosing node. The first assignment wins.
    pub(crate) fn set_parent(&mut self, parent: &str) {
        if self.parent.is_none() {
            self.parent = Some(parent.to_owned());
        }
    }
}

/// A typed project graph node.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    Project(Project),
    Target(Target),
    BuildPhase(BuildPhase),
    BuildFile(BuildFile),
    FileReference(FileReference),
    Group(Group),
    VersionGroup(VersionGroup),
    ReferenceProxy(ReferenceProxy),
    ContainerItemProxy(ContainerItemProxy),
    TargetDependency(TargetDependency),
    BuildConfiguration(BuildConfiguration),
    ConfigurationList(ConfigurationList),
    BuildRule(BuildRule),
}

impl Object {
    pub(crate) fn parse(
        ctx: &mut Context<'_>,
        uuid: &str,
        kind: ObjectKind,
        dict: &Dictionary,
    ) -> Result<Object> {
        let object = match kind {
            ObjectKind::Project => Object::Project(Project::parse(ctx, uuid, dict)?),
            ObjectKind::NativeTarget | ObjectKind::LegacyTarget | ObjectKind::AggregateTarget => {
                Object::Target(Target::parse(ctx, uuid, kind, dict)?)
            }
            ObjectKind::SourcesBuildPhase
            | ObjectKind::FrameworksBuildPhase
            | ObjectKind::ResourcesBuildPhase
            | ObjectKind::CopyFilesBuildPhase
            | ObjectKind::ShellScriptBuildPhase
            | ObjectKind::HeadersBuildPhase
            | ObjectKind::AppleScriptBuildPhase
            | ObjectKind::RezBuildPhase => {
                Object::BuildPhase(BuildPhase::parse(ctx, uuid, kind, dict)?)
            }
            ObjectKind::BuildFile => Object::BuildFile(BuildFile::parse(ctx, uuid, dict)?),
            ObjectKind::FileReference => {
                Object::FileReference(FileReference::parse(ctx, uuid, dict)?)
            }
            ObjectKind::Group | ObjectKind::VariantGroup => {
                Object::Group(Group::parse(ctx, uuid, kind, dict)?)
            }
            ObjectKind::VersionGroup => Object::VersionGroup(VersionGroup::parse(ctx, uuid, dict)?),
            ObjectKind::ReferenceProxy => {
                Object::ReferenceProxy(ReferenceProxy::parse(ctx, uuid, dict)?)
            }
            ObjectKind::ContainerItemProxy => {
                Object::ContainerItemProxy(ContainerItemProxy::parse(ctx, uuid, dict)?)
            }
            ObjectKind::TargetDependency => {
                Object::TargetDependency(TargetDependency::parse(ctx, uuid, dict)?)
            }
            ObjectKind::BuildConfiguration => {
                Object::BuildConfiguration(BuildConfiguration::parse(ctx, uuid, dict)?)
            }
            ObjectKind::ConfigurationList => {
                Object::ConfigurationList(ConfigurationList::parse(ctx, uuid, dict)?)
            }
            ObjectKind::BuildRule => Object::BuildRule(BuildRule::parse(ctx, uuid, dict)?),
        };
        Ok(object)
    }

    pub fn kind(&self) -> ObjectKind {
        match self {
            Object::Project(_) => ObjectKind::Project,
            Object::Target(target) => target.kind().object_kind(),
            Object::BuildPhase(phase) => phase.kind().object_kind(),
            Object::BuildFile(_) => ObjectKind::BuildFile,
            Object::FileReference(_) => ObjectKind::FileReference,
            Object::Group(group) => group.kind().object_kind(),
            Object::VersionGroup(_) => ObjectKind::VersionGroup,
            Object::ReferenceProxy(_) => ObjectKind::ReferenceProxy,
            Object::ContainerItemProxy(_) => ObjectKind::ContainerItemProxy,
            Object::TargetDependency(_) => ObjectKind::TargetDependency,
            Object::BuildConfiguration(_) => ObjectKind::BuildConfiguration,
            Object::ConfigurationList(_) => ObjectKind::ConfigurationList,
            Object::BuildRule(_) => ObjectKind::BuildRule,
        }
    }

    /// The serialized type tag.
    pub fn isa(&self) -> &'static str {
        self.kind().isa()
    }

    pub(crate) fn core(&self) -> &ObjectCore {
        match self {
            Object::Project(o) => &o.core,
            Object::Target(o) => &o.core,
            Object::BuildPhase(o) => &o.core,
            Object::BuildFile(o) => &o.core,
            Object::FileReference(o) => &o.core,
            Object::Group(o) => &o.core,
            Object::VersionGroup(o) => &o.core,
            Object::ReferenceProxy(o) => &o.core,
            Object::ContainerItemProxy(o) => &o.core,
            Object::TargetDependency(o) => &o.core,
            Object::BuildConfiguration(o) => &o.core,
            Object::ConfigurationList(o) => &o.core,
            Object::BuildRule(o) => &o.core,
        }
    }

    pub(crate) fn core_mut(&mut self) -> &mut ObjectCore {
        match self {
            Object::Project(o) => &mut o.core,
            Object::Target(o) => &mut o.core,
            Object::BuildPhase(o) => &mut o.core,
            Object::BuildFile(o) => &mut o.core,
            Object::FileReference(o) => &mut o.core,
            Object::Group(o) => &mut o.core,
            Object::VersionGroup(o) => &mut o.core,
            Object::ReferenceProxy(o) => &mut o.core,
            Object::ContainerItemProxy(o) => &mut o.core,
            Object::TargetDependency(o) => &mut o.core,
            Object::BuildConfiguration(o) => &mut o.core,
            Object::ConfigurationList(o) => &mut o.core,
            Object::BuildRule(o) => &mut o.core,
        }
    }

    pub fn uuid(&self) -> &str {
        self.core().uuid()
    }

    /// The enclosing node's uuid, if one was recorded.
    pub fn parent_uuid(&self) -> Option<&str> {
        self.core().parent()
    }

    /// Human-readable label used for write-time comments. Derived, never
    /// stored.
    pub fn display_name(&self, proj: &PbxProj) -> String {
        match self {
            Object::Project(o) => o.display_name(),
            Object::Target(o) => o.display_name(),
            Object::BuildPhase(o) => o.display_name(),
            Object::BuildFile(o) => o.display_name(proj),
            Object::FileReference(o) => o.display_name(),
            Object::Group(o) => o.display_name(),
            Object::VersionGroup(o) => o.display_name(),
            Object::ReferenceProxy(o) => o.display_name(),
            Object::BuildConfiguration(o) => o.display_name(),
            Object::ContainerItemProxy(_)
            | Object::TargetDependency(_)
            | Object::ConfigurationList(_)
            | Object::BuildRule(_) => self.isa().to_owned(),
        }
    }

    /// The comment text attached to this object's uuid wherever it is
    /// written. Defaults to the display name.
    pub fn annotation(&self, proj: &PbxProj) -> String {
        match self {
            Object::Project(_) => "Project object".to_owned(),
            Object::BuildFile(o) => o.annotation(proj),
            Object::ConfigurationList(o) => o.annotation(proj),
            _ => self.display_name(proj),
        }
    }

    /// Re-emit this object as an untyped dictionary, the structural
    /// inverse of `parse`.
    pub fn to_plist(&self, proj: &PbxProj) -> Dictionary {
        match self {
            Object::Project(o) => o.to_plist(proj),
            Object::Target(o) => o.to_plist(proj),
            Object::BuildPhase(o) => o.to_plist(proj),
            Object::BuildFile(o) => o.to_plist(proj),
            Object::FileReference(o) => o.to_plist(),
            Object::Group(o) => o.to_plist(proj),
            Object::VersionGroup(o) => o.to_plist(proj),
            Object::ReferenceProxy(o) => o.to_plist(proj),
            Object::ContainerItemProxy(o) => o.to_plist(proj),
            Object::TargetDependency(o) => o.to_plist(proj),
            Object::BuildConfiguration(o) => o.to_plist(proj),
            Object::ConfigurationList(o) => o.to_plist(proj),
            Object::BuildRule(o) => o.to_plist(),
        }
    }
}

/// Start an object dictionary: `isa` plus nothing else.
pub(crate) fn isa_dictionary(kind: ObjectKind) -> Dictionary {
    let mut dict = Dictionary::new();
    dict.set("isa", Value::string(kind.isa()));
    dict
}

/// Begin unpacking an object dictionary, consuming the `isa` key the way
/// the shared base parse does.
pub(crate) fn unpack_object<'a>(name: &'static str, dict: &'a Dictionary) -> Unpack<'a> {
    let mut unpack = Unpack::new(name, dict);
    let _ = unpack.cast_str("isa");
    unpack
}

/// A reference rendered for output: the uuid string annotated with the
/// referenced object's comment text, when it has one.
pub(crate) fn reference_value(proj: &PbxProj, uuid: &str) -> Value {
    match proj.object(uuid) {
        Some(object) => {
            let annotation = object.annotation(proj);
            if annotation.is_empty() {
                Value::string(uuid)
            } else {
                Value::annotated(uuid, annotation)
            }
        }
        None => Value::string(uuid),
    }
}
