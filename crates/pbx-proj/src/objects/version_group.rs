//! XCVersionGroup: a versioned container (Core Data model versions).

use pbx_plist::{Array, Dictionary, Value};

use crate::context::Context;
use crate::error::Result;
use crate::objects::{
    FileReference, ObjectCore, ObjectKind, Ref, families, isa_dictionary, reference_value,
    unpack_object,
};
use crate::proj::PbxProj;

#[derive(Debug, Clone, PartialEq)]
pub struct VersionGroup {
    pub(crate) core: ObjectCore,
    children: Vec<Ref<FileReference>>,
    current_version: Option<Ref<FileReference>>,
    name: Option<String>,
    path: Option<String>,
    source_tree: String,
    version_group_type: Option<String>,
}

impl VersionGroup {
    pub(crate) fn parse(ctx: &mut Context<'_>, uuid: &str, dict: &Dictionary) -> Result<Self> {
        let mut unpack = unpack_object("VersionGroup", dict);

        let children = ctx
            .parse_reference_array(&mut unpack, "children", families::FILE_REFERENCES, Some(uuid))?
            .into_iter()
            .map(|child| Ref::new(child.uuid()))
            .collect();
        let current_version = ctx
            .parse_reference(&mut unpack, "currentVersion", families::FILE_REFERENCES)?
            .map(|version| Ref::new(version.uuid()));
        let name = unpack.cast_string("name");
        let path = unpack.cast_string("path");
        let source_tree = unpack
            .cast_string("sourceTree")
            .unwrap_or_else(|| "<group>".to_owned());
        let version_group_type = unpack.cast_string("versionGroupType");

        unpack.complete(false);

        Ok(Self {
            core: ObjectCore::new(uuid),
            children,
            current_version,
            name,
            path,
            source_tree,
            version_group_type,
        })
    }

    pub fn uuid(&self) -> &str {
        self.core.uuid()
    }

    pub fn children(&self) -> &[Ref<FileReference>] {
        &self.children
    }

    pub fn current_version(&self) -> Option<&Ref<FileReference>> {
        self.current_version.as_ref()
    }

    pub fn display_name(&self) -> String {
        if let Some(name) = &self.name {
            return name.clone();
        }
        match self.path.as_deref().and_then(|path| path.rsplit('/').next()) {
            Some(base) if !base.is_empty() => base.to_owned(),
            _ => ObjectKind::VersionGroup.isa().to_owned(),
        }
    }

    pub(crate) fn to_plist(&self, proj: &PbxProj) -> Dictionary {
        let mut dict = isa_dictionary(ObjectKind::VersionGroup);
        let children: Array = self
            .children
            .iter()
            .map(|child| reference_value(proj, child.uuid()))
            .collect();
        dict.set("children", Value::Array(children));
        if let Some(version) = &self.current_version {
            dict.set("currentVersion", reference_value(proj, version.uuid()));
        }
        if let Some(name) = &self.name {
            dict.set("name", Value::string(name.clone()));
        }
        if let Some(path) = &self.path {
            dict.set("path", Value::string(path.clone()));
        }
        dict.set("sourceTree", Value::string(self.source_tree.clone()));
        if let Some(group_type) = &self.version_group_type {
            dict.set("versionGroupType", Value::string(group_type.clone()));
        }
        dict
    }
}
