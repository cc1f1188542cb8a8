//! PBXBuildRule: a custom file-type-to-compiler mapping on a native
//! target.

use pbx_plist::{Array, Dictionary, Value};

use crate::context::Context;
use crate::error::Result;
use crate::objects::{ObjectCore, ObjectKind, isa_dictionary, unpack_object};

#[derive(Debug, Clone, PartialEq)]
pub struct BuildRule {
    pub(crate) core: ObjectCore,
    compiler_spec: String,
    file_patterns: Option<String>,
    file_type: String,
    is_editable: i64,
    output_files: Vec<String>,
    script: Option<String>,
}

impl BuildRule {
    pub(crate) fn parse(_ctx: &mut Context<'_>, uuid: &str, dict: &Dictionary) -> Result<Self> {
        let mut unpack = unpack_object("BuildRule", dict);

        let compiler_spec = unpack.cast_string("compilerSpec").unwrap_or_default();
        let file_patterns = unpack.cast_string("filePatterns");
        let file_type = unpack.cast_string("fileType").unwrap_or_default();
        let is_editable = unpack.coerce_integer("isEditable").unwrap_or(1);
        let output_files = unpack
            .cast_array("outputFiles")
            .map(Array::strings)
            .unwrap_or_default();
        let script = unpack.cast_string("script");

        unpack.complete(false);

        Ok(Self {
            core: ObjectCore::new(uuid),
            compiler_spec,
            file_patterns,
            file_type,
            is_editable,
            output_files,
            script,
        })
    }

    pub fn uuid(&self) -> &str {
        self.core.uuid()
    }

    pub fn compiler_spec(&self) -> &str {
        &self.compiler_spec
    }

    pub fn file_type(&self) -> &str {
        &self.file_type
    }

    pub(crate) fn to_plist(&self) -> Dictionary {
        let mut dict = isa_dictionary(ObjectKind::BuildRule);
        dict.set("compilerSpec", Value::string(self.compiler_spec.clone()));
        if let Some(patterns) = &self.file_patterns {
            dict.set("filePatterns", Value::string(patterns.clone()));
        }
        dict.set("fileType", Value::string(self.file_type.clone()));
        dict.set("isEditable", Value::Integer(self.is_editable));
        let outputs: Array = self
            .output_files
            .iter()
            .map(|output| Value::string(output.clone()))
            .collect();
        dict.set("outputFiles", Value::Array(outputs));
        if let Some(script) = &self.script {
            dict.set("script", Value::string(script.clone()));
        }
        dict
    }
}
