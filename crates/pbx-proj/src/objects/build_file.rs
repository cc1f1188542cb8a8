//! PBXBuildFile: the association of a file-like reference with a build
//! phase.

use pbx_plist::{Array, Dictionary, Value};
use pbx_setting::parse_list;

use crate::context::Context;
use crate::error::{ProjError, Result};
use crate::objects::{
    ObjectCore, ObjectKind, ObjectRef, families, isa_dictionary, reference_value, unpack_object,
};
use crate::proj::PbxProj;

#[derive(Debug, Clone, PartialEq)]
pub struct BuildFile {
    pub(crate) core: ObjectCore,
    file_ref: ObjectRef,
    compiler_flags: Vec<String>,
    attributes: Vec<String>,
}

impl BuildFile {
    pub(crate) fn parse(ctx: &mut Context<'_>, uuid: &str, dict: &Dictionary) -> Result<Self> {
        let mut unpack = unpack_object("BuildFile", dict);

        let file_ref = ctx.parse_reference(&mut unpack, "fileRef", families::GROUP_ITEMS)?;
        let settings = unpack.cast_dictionary("settings");

        unpack.complete(false);

        // A build file without a resolvable target is meaningless; this
        // is the one reference whose absence fails the parse.
        let file_ref = file_ref.ok_or_else(|| ProjError::UnresolvedReference {
            uuid: uuid.to_owned(),
            key: "fileRef",
        })?;

        let mut compiler_flags = Vec::new();
        let mut attributes = Vec::new();
        if let Some(settings) = settings {
            // Xcode stores a single flag as one space-separated string
            // and several as an array; accept both.
            match settings.get("COMPILER_FLAGS") {
                Some(Value::String(flags)) => compiler_flags = parse_list(flags.value()),
                Some(Value::Array(flags)) => compiler_flags = flags.strings(),
                _ => {}
            }
            if let Some(values) = settings.get_array("ATTRIBUTES") {
                attributes = values.strings();
            }
        }

        Ok(Self {
            core: ObjectCore::new(uuid),
            file_ref,
            compiler_flags,
            attributes,
        })
    }

    pub fn uuid(&self) -> &str {
        self.core.uuid()
    }

    pub fn file_ref(&self) -> &ObjectRef {
        &self.file_ref
    }

    pub fn compiler_flags(&self) -> &[String] {
        &self.compiler_flags
    }

    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    /// The referenced item's display name.
    pub fn display_name(&self, proj: &PbxProj) -> String {
        proj.object(self.file_ref.uuid())
            .map(|object| object.display_name(proj))
            .unwrap_or_default()
    }

    /// "`<file> in <container>`", with a literal placeholder when no
    /// parent link was recorded.
    pub fn annotation(&self, proj: &PbxProj) -> String {
        let display = self.display_name(proj);
        match self
            .core
            .parent()
            .and_then(|parent| proj.object(parent))
        {
            Some(parent) => format!("{display} in {}", parent.display_name(proj)),
            None => format!("{display} in null"),
        }
    }

    pub(crate) fn to_plist(&self, proj: &PbxProj) -> Dictionary {
        let mut dict = isa_dictionary(ObjectKind::BuildFile);
        dict.set("fileRef", reference_value(proj, self.file_ref.uuid()));

        if !self.compiler_flags.is_empty() || !self.attributes.is_empty() {
            let mut settings = Dictionary::new();
            match self.compiler_flags.as_slice() {
                [] => {}
                // A single flag is stored as a bare string, several as an
                // array, matching what Xcode writes.
                [flag] => settings.set("COMPILER_FLAGS", Value::string(flag.clone())),
                flags => {
                    let array: Array = flags.iter().map(|flag| Value::string(flag.clone())).collect();
                    settings.set("COMPILER_FLAGS", Value::Array(array));
                }
            }
            if !self.attributes.is_empty() {
                let attributes: Array = self
                    .attributes
                    .iter()
                    .map(|attr| Value::string(attr.clone()))
                    .collect();
                settings.set("ATTRIBUTES", Value::Array(attributes));
            }
            dict.set("settings", Value::Dictionary(settings));
        }

        dict
    }
}
