//! PBXProject: the root node of the typed graph.

use pbx_plist::{Array, Dictionary, Value};

use crate::context::Context;
use crate::error::Result;
use crate::objects::{
    ConfigurationList, FileReference, Group, ObjectCore, ObjectKind, ObjectRef, Ref, families,
    isa_dictionary, reference_value, unpack_object,
};
use crate::proj::PbxProj;

/// A reference from this project to an external project file and the
/// group that shows its products.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectReference {
    pub product_group: Ref<Group>,
    pub project_ref: Ref<FileReference>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub(crate) core: ObjectCore,
    /// The document-level project name; derived from the file path, not
    /// from the plist.
    pub(crate) name: String,
    attributes: Dictionary,
    build_configuration_list: Option<Ref<ConfigurationList>>,
    compatibility_version: Option<String>,
    development_region: Option<String>,
    has_scanned_for_encodings: Option<i64>,
    known_regions: Vec<String>,
    main_group: Option<Ref<Group>>,
    product_ref_group: Option<Ref<Group>>,
    project_dir_path: String,
    project_root: String,
    project_references: Vec<ProjectReference>,
    targets: Vec<ObjectRef>,
}

impl Project {
    pub(crate) fn parse(ctx: &mut Context<'_>, uuid: &str, dict: &Dictionary) -> Result<Self> {
        let mut unpack = unpack_object("Project", dict);

        let attributes = unpack.cast_dictionary("attributes").cloned().unwrap_or_default();
        let build_configuration_list = ctx
            .parse_reference(
                &mut unpack,
                "buildConfigurationList",
                families::CONFIGURATION_LISTS,
            )?
            .map(|list| {
                ctx.set_parent(list.uuid(), uuid);
                Ref::new(list.uuid())
            });
        let compatibility_version = unpack.cast_string("compatibilityVersion");
        let development_region = unpack.cast_string("developmentRegion");
        let has_scanned_for_encodings = unpack.coerce_integer("hasScannedForEncodings");
        let known_regions = unpack
            .cast_array("knownRegions")
            .map(Array::strings)
            .unwrap_or_default();
        let main_group = ctx
            .parse_reference(&mut unpack, "mainGroup", families::GROUPS)?
            .map(|group| {
                ctx.set_parent(group.uuid(), uuid);
                Ref::new(group.uuid())
            });
        let product_ref_group = ctx
            .parse_reference(&mut unpack, "productRefGroup", families::GROUPS)?
            .map(|group| Ref::new(group.uuid()));
        let project_dir_path = unpack.cast_string("projectDirPath").unwrap_or_default();
        let project_root = unpack.cast_string("projectRoot").unwrap_or_default();

        let mut project_references = Vec::new();
        if let Some(references) = unpack.cast_array("projectReferences") {
            for element in references.iter() {
                let Some(entry) = element.as_dictionary() else {
                    continue;
                };
                let mut entry_unpack = pbx_plist::Unpack::new("ProjectReference", entry);
                let product_group =
                    ctx.parse_reference(&mut entry_unpack, "ProductGroup", families::GROUPS)?;
                let project_ref = ctx.parse_reference(
                    &mut entry_unpack,
                    "ProjectRef",
                    families::FILE_REFERENCES,
                )?;
                entry_unpack.complete(false);
                if let (Some(product_group), Some(project_ref)) = (product_group, project_ref) {
                    project_references.push(ProjectReference {
                        product_group: Ref::new(product_group.uuid()),
                        project_ref: Ref::new(project_ref.uuid()),
                    });
                }
            }
        }

        let targets =
            ctx.parse_reference_array(&mut unpack, "targets", families::TARGETS, Some(uuid))?;

        unpack.complete(false);

        Ok(Self {
            core: ObjectCore::new(uuid),
            name: String::new(),
            attributes,
            build_configuration_list,
            compatibility_version,
            development_region,
            has_scanned_for_encodings,
            known_regions,
            main_group,
            product_ref_group,
            project_dir_path,
            project_root,
            project_references,
            targets,
        })
    }

    pub fn uuid(&self) -> &str {
        self.core.uuid()
    }

    /// The project name, taken from the enclosing document's path.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn development_region(&self) -> Option<&str> {
        self.development_region.as_deref()
    }

    pub fn project_dir_path(&self) -> &str {
        &self.project_dir_path
    }

    pub fn main_group(&self) -> Option<&Ref<Group>> {
        self.main_group.as_ref()
    }

    pub fn build_configuration_list(&self) -> Option<&Ref<ConfigurationList>> {
        self.build_configuration_list.as_ref()
    }

    pub fn targets(&self) -> &[ObjectRef] {
        &self.targets
    }

    pub fn display_name(&self) -> String {
        if self.name.is_empty() {
            ObjectKind::Project.isa().to_owned()
        } else {
            self.name.clone()
        }
    }

    pub(crate) fn to_plist(&self, proj: &PbxProj) -> Dictionary {
        let mut dict = isa_dictionary(ObjectKind::Project);

        if !self.attributes.is_empty() {
            dict.set("attributes", Value::Dictionary(self.attributes.clone()));
        }
        if let Some(list) = &self.build_configuration_list {
            dict.set("buildConfigurationList", reference_value(proj, list.uuid()));
        }
        if let Some(version) = &self.compatibility_version {
            dict.set("compatibilityVersion", Value::string(version.clone()));
        }
        if let Some(region) = &self.development_region {
            dict.set("developmentRegion", Value::string(region.clone()));
        }
        if let Some(scanned) = self.has_scanned_for_encodings {
            dict.set("hasScannedForEncodings", Value::Integer(scanned));
        }
        if !self.known_regions.is_empty() {
            let regions: Array = self
                .known_regions
                .iter()
                .map(|region| Value::string(region.clone()))
                .collect();
            dict.set("knownRegions", Value::Array(regions));
        }
        if let Some(group) = &self.main_group {
            dict.set("mainGroup", reference_value(proj, group.uuid()));
        }
        if let Some(group) = &self.product_ref_group {
            dict.set("productRefGroup", reference_value(proj, group.uuid()));
        }
        dict.set("projectDirPath", Value::string(self.project_dir_path.clone()));
        if !self.project_references.is_empty() {
            let references: Array = self
                .project_references
                .iter()
                .map(|reference| {
                    let mut entry = Dictionary::new();
                    entry.set(
                        "ProductGroup",
                        reference_value(proj, reference.product_group.uuid()),
                    );
                    entry.set(
                        "ProjectRef",
                        reference_value(proj, reference.project_ref.uuid()),
                    );
                    Value::Dictionary(entry)
                })
                .collect();
            dict.set("projectReferences", Value::Array(references));
        }
        dict.set("projectRoot", Value::string(self.project_root.clone()));
        let targets: Array = self
            .targets
            .iter()
            .map(|target| reference_value(proj, target.uuid()))
            .collect();
        dict.set("targets", Value::Array(targets));

        dict
    }
}
