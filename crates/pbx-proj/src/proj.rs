//! The project document: owner of the object store, entry point for
//! `open` and `save`.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use pbx_plist::{Dictionary, Unpack};
use pbx_setting::{Level, Setting};
use pbx_util::{Filesystem, base_name_without_extension, directory_name, normalize_path};

use crate::context::Context;
use crate::error::{ProjError, Result};
use crate::objects::{FileReference, Object, Project, Ref, Target, families};
use crate::writer::PbxWriter;

/// Name of the data file inside the project directory.
pub const PROJECT_DATA_FILE: &str = "project.pbxproj";

/// Highest archive version this reader knows; larger is a warning.
const MAX_ARCHIVE_VERSION: i64 = 1;
/// Highest object version this reader knows; larger is a warning.
const MAX_OBJECT_VERSION: i64 = 46;

/// A fully resolved project document.
///
/// The uuid-keyed store is the sole owner of every object; everything
/// else in the graph refers to objects by uuid. Dropping the document
/// drops the whole graph, cycles included, because no cross-reference
/// owns its target.
#[derive(Debug)]
pub struct PbxProj {
    objects: HashMap<String, Object>,
    archive_version: i64,
    object_version: i64,
    root_object: Ref<Project>,
    file_references: Vec<Ref<FileReference>>,
    name: String,
    project_file: PathBuf,
    data_file: PathBuf,
    base_path: PathBuf,
}

struct ParsedDocument {
    archive_version: i64,
    object_version: i64,
    root_uuid: String,
    objects: HashMap<String, Object>,
    file_references: Vec<String>,
}

impl PbxProj {
    /// Open the project inside `path` (a `.xcodeproj`-style directory):
    /// locate the data file, decode it, and resolve the typed graph.
    ///
    /// This is all-or-nothing: any failure — unreadable path, undecodable
    /// bytes, a non-dictionary root, or any resolver failure — discards
    /// everything.
    pub fn open(filesystem: &dyn Filesystem, path: &Path) -> Result<Self> {
        if path.as_os_str().is_empty() {
            return Err(ProjError::EmptyPath);
        }

        let project_file_name = path.join(PROJECT_DATA_FILE);
        if !filesystem.is_readable(&project_file_name) {
            return Err(ProjError::Unreadable {
                path: project_file_name,
            });
        }
        let real_path = filesystem
            .resolve_path(&project_file_name)
            .ok_or(ProjError::Unresolvable {
                path: project_file_name,
            })?;
        let contents = filesystem.read(&real_path)?;

        let value = pbx_plist::deserialize(&contents)?;
        let dict = value.as_dictionary().ok_or(ProjError::NotADictionary)?;

        let parsed = Self::parse(dict)?;

        let project_file = directory_name(&real_path);
        let base_path = directory_name(&project_file);
        let name = base_name_without_extension(&project_file);

        let mut proj = Self {
            objects: parsed.objects,
            archive_version: parsed.archive_version,
            object_version: parsed.object_version,
            root_object: Ref::new(parsed.root_uuid.clone()),
            file_references: parsed
                .file_references
                .into_iter()
                .map(Ref::new)
                .collect(),
            name: name.clone(),
            project_file,
            data_file: real_path,
            base_path,
        };

        // The project node carries the document name for display.
        if let Some(Object::Project(project)) = proj.objects.get_mut(&parsed.root_uuid) {
            project.name = name;
        }

        Ok(proj)
    }

    fn parse(dict: &Dictionary) -> Result<ParsedDocument> {
        let mut unpack = Unpack::new("Root", dict);

        let archive_version = unpack
            .coerce_integer("archiveVersion")
            .ok_or(ProjError::MissingKey {
                key: "archiveVersion",
            })?;
        if archive_version > MAX_ARCHIVE_VERSION {
            tracing::warn!(archive_version, "archive version may be unsupported");
        }

        let object_version =
            unpack
                .coerce_integer("objectVersion")
                .ok_or(ProjError::MissingKey {
                    key: "objectVersion",
                })?;
        if object_version > MAX_OBJECT_VERSION {
            tracing::warn!(object_version, "object version may be unsupported");
        }

        if let Some(classes) = unpack.cast_dictionary("classes") {
            if !classes.is_empty() {
                tracing::warn!("non-empty classes may be unsupported");
            }
        }

        let objects = unpack
            .cast_dictionary("objects")
            .ok_or(ProjError::MissingKey { key: "objects" })?;

        let mut ctx = Context::new(objects);
        let (root_uuid, root_kind) = ctx
            .indirect(&mut unpack, "rootObject", families::PROJECTS)
            .ok_or(ProjError::MissingKey { key: "rootObject" })?;
        ctx.parse_object(&root_uuid, root_kind)?;

        // The document root is the one strict completeness check.
        unpack.complete(true);

        let (objects, file_references) = ctx.finish();
        Ok(ParsedDocument {
            archive_version,
            object_version,
            root_uuid,
            objects,
            file_references,
        })
    }

    /// Serialize the document to the external byte dialect.
    pub fn save(&self) -> Result<Vec<u8>> {
        PbxWriter::new(self).write()
    }

    pub fn archive_version(&self) -> i64 {
        self.archive_version
    }

    pub fn object_version(&self) -> i64 {
        self.object_version
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The `.xcodeproj`-style directory.
    pub fn project_file(&self) -> &Path {
        &self.project_file
    }

    /// The resolved `project.pbxproj` path.
    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn root_object_uuid(&self) -> &str {
        self.root_object.uuid()
    }

    /// The root project node.
    pub fn root_object(&self) -> Option<&Project> {
        match self.objects.get(self.root_object.uuid()) {
            Some(Object::Project(project)) => Some(project),
            _ => None,
        }
    }

    pub fn object(&self, uuid: &str) -> Option<&Object> {
        self.objects.get(uuid)
    }

    /// Every object in the store, unordered.
    pub fn objects(&self) -> impl Iterator<Item = &Object> {
        self.objects.values()
    }

    /// Look up any buildable object by uuid; empty uuids resolve to
    /// nothing.
    pub fn resolve_buildable_reference(&self, uuid: &str) -> Option<&Object> {
        if uuid.is_empty() {
            return None;
        }
        self.objects.get(uuid)
    }

    /// The root project's targets, in declaration order.
    pub fn targets(&self) -> Vec<&Target> {
        let Some(project) = self.root_object() else {
            return Vec::new();
        };
        project
            .targets()
            .iter()
            .filter_map(|reference| match self.objects.get(reference.uuid()) {
                Some(Object::Target(target)) => Some(target),
                _ => None,
            })
            .collect()
    }

    /// Mutable access to one target, for renames and similar edits.
    pub fn target_mut(&mut self, uuid: &str) -> Option<&mut Target> {
        match self.objects.get_mut(uuid) {
            Some(Object::Target(target)) => Some(target),
            _ => None,
        }
    }

    /// Every file reference resolved from the document, in resolution
    /// order.
    pub fn file_references(&self) -> Vec<&FileReference> {
        self.file_references
            .iter()
            .filter_map(|reference| match self.objects.get(reference.uuid()) {
                Some(Object::FileReference(file)) => Some(file),
                _ => None,
            })
            .collect()
    }

    /// The project source root: the base path extended by the root
    /// object's project directory, normalized.
    pub fn source_root(&self) -> PathBuf {
        let mut root = self.base_path.clone();
        if let Some(project) = self.root_object() {
            if !project.project_dir_path().is_empty() {
                root.push(project.project_dir_path());
            }
        }
        normalize_path(&root)
    }

    /// A settings level seeded with the document-derived values the
    /// settings-resolution layer expects.
    pub fn settings(&self) -> Level {
        let source_root = self.source_root().display().to_string();
        let development_language = self
            .root_object()
            .and_then(Project::development_region)
            .filter(|region| !region.is_empty())
            .unwrap_or("English");

        Level::new(vec![
            Setting::new("PROJECT", self.name.clone()),
            Setting::new("PROJECT_NAME", self.name.clone()),
            Setting::new("PROJECT_DIR", source_root.clone()),
            Setting::new(
                "PROJECT_FILE_PATH",
                self.project_file.display().to_string(),
            ),
            Setting::new("SRCROOT", source_root),
            Setting::new("DEVELOPMENT_LANGUAGE", development_language),
        ])
    }

    /// Objects bucketed by isa for sectioned output: sections ascending
    /// by isa, entries ascending by uuid.
    pub fn objects_grouped_by_isa(&self) -> BTreeMap<&'static str, Vec<&Object>> {
        let mut groups: BTreeMap<&'static str, Vec<&Object>> = BTreeMap::new();
        for object in self.objects.values() {
            groups.entry(object.isa()).or_default().push(object);
        }
        for objects in groups.values_mut() {
            objects.sort_by(|a, b| a.uuid().cmp(b.uuid()));
        }
        groups
    }
}
