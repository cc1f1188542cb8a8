//! PBXFileReference: an on-disk file the project knows about.

use pbx_plist::{Dictionary, Value};

use crate::context::Context;
use crate::error::Result;
use crate::objects::{ObjectCore, ObjectKind, isa_dictionary, unpack_object};

#[derive(Debug, Clone, PartialEq)]
pub struct FileReference {
    pub(crate) core: ObjectCore,
    file_encoding: Option<i64>,
    explicit_file_type: Option<String>,
    last_known_file_type: Option<String>,
    include_in_index: Option<i64>,
    line_ending: Option<i64>,
    name: Option<String>,
    path: String,
    source_tree: String,
}

impl FileReference {
    pub(crate) fn parse(_ctx: &mut Context<'_>, uuid: &str, dict: &Dictionary) -> Result<Self> {
        let mut unpack = unpack_object("FileReference", dict);

        let file_encoding = unpack.coerce_integer("fileEncoding");
        let explicit_file_type = unpack.cast_string("explicitFileType");
        let last_known_file_type = unpack.cast_string("lastKnownFileType");
        let include_in_index = unpack.coerce_integer("includeInIndex");
        let line_ending = unpack.coerce_integer("lineEnding");
        let name = unpack.cast_string("name");
        let path = unpack.cast_string("path").unwrap_or_default();
        let source_tree = unpack
            .cast_string("sourceTree")
            .unwrap_or_else(|| "<group>".to_owned());

        unpack.complete(false);

        Ok(Self {
            core: ObjectCore::new(uuid),
            file_encoding,
            explicit_file_type,
            last_known_file_type,
            include_in_index,
            line_ending,
            name,
            path,
            source_tree,
        })
    }

    pub fn uuid(&self) -> &str {
        self.core.uuid()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn source_tree(&self) -> &str {
        &self.source_tree
    }

    pub fn explicit_file_type(&self) -> Option<&str> {
        self.explicit_file_type.as_deref()
    }

    pub fn last_known_file_type(&self) -> Option<&str> {
        self.last_known_file_type.as_deref()
    }

    /// The name when set, otherwise the last path component.
    pub fn display_name(&self) -> String {
        if let Some(name) = &self.name {
            return name.clone();
        }
        match self.path.rsplit('/').next() {
            Some(base) if !base.is_empty() => base.to_owned(),
            _ => ObjectKind::FileReference.isa().to_owned(),
        }
    }

    pub(crate) fn to_plist(&self) -> Dictionary {
        let mut dict = isa_dictionary(ObjectKind::FileReference);
        if let Some(encoding) = self.file_encoding {
            dict.set("fileEncoding", Value::Integer(encoding));
        }
        if let Some(file_type) = &self.explicit_file_type {
            dict.set("explicitFileType", Value::string(file_type.clone()));
        }
        if let Some(file_type) = &self.last_known_file_type {
            dict.set("lastKnownFileType", Value::string(file_type.clone()));
        }
        if let Some(include) = self.include_in_index {
            dict.set("includeInIndex", Value::Integer(include));
        }
        if let Some(line_ending) = self.line_ending {
            dict.set("lineEnding", Value::Integer(line_ending));
        }
        if let Some(name) = &self.name {
            dict.set("name", Value::string(name.clone()));
        }
        dict.set("path", Value::string(self.path.clone()));
        dict.set("sourceTree", Value::string(self.source_tree.clone()));
        dict
    }
}
