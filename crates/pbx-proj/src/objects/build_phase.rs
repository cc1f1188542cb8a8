//! The build phase variants.
//!
//! All phases share the mask/files/postprocessing trio; copy-files and
//! shell-script phases carry extra fields in their kind payload.

use pbx_plist::{Array, Dictionary, Value};

use crate::context::Context;
use crate::error::Result;
use crate::objects::{
    BuildFile, ObjectCore, ObjectKind, Ref, families, isa_dictionary, reference_value,
    unpack_object,
};
use crate::proj::PbxProj;

/// Default `buildActionMask`: build on every action.
const DEFAULT_BUILD_ACTION_MASK: i64 = 0x7FFF_FFFF;

#[derive(Debug, Clone, PartialEq)]
pub enum PhaseKind {
    Sources,
    Frameworks,
    Resources,
    Headers,
    Rez,
    AppleScript,
    CopyFiles {
        dst_path: String,
        dst_subfolder_spec: i64,
    },
    ShellScript {
        input_paths: Vec<String>,
        output_paths: Vec<String>,
        shell_path: String,
        shell_script: String,
        show_env_vars_in_log: Option<i64>,
    },
}

impl PhaseKind {
    pub(crate) fn object_kind(&self) -> ObjectKind {
        match self {
            PhaseKind::Sources => ObjectKind::SourcesBuildPhase,
            PhaseKind::Frameworks => ObjectKind::FrameworksBuildPhase,
            PhaseKind::Resources => ObjectKind::ResourcesBuildPhase,
            PhaseKind::Headers => ObjectKind::HeadersBuildPhase,
            PhaseKind::Rez => ObjectKind::RezBuildPhase,
            PhaseKind::AppleScript => ObjectKind::AppleScriptBuildPhase,
            PhaseKind::CopyFiles { .. } => ObjectKind::CopyFilesBuildPhase,
            PhaseKind::ShellScript { .. } => ObjectKind::ShellScriptBuildPhase,
        }
    }

    /// The label Xcode shows when the phase has no explicit name.
    fn default_name(&self) -> &'static str {
        match self {
            PhaseKind::Sources => "Sources",
            PhaseKind::Frameworks => "Frameworks",
            PhaseKind::Resources => "Resources",
            PhaseKind::Headers => "Headers",
            PhaseKind::Rez => "Rez",
            PhaseKind::AppleScript => "AppleScript",
            PhaseKind::CopyFiles { .. } => "CopyFiles",
            PhaseKind::ShellScript { .. } => "ShellScript",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BuildPhase {
    pub(crate) core: ObjectCore,
    kind: PhaseKind,
    build_action_mask: i64,
    files: Vec<Ref<BuildFile>>,
    run_only_for_deployment_postprocessing: i64,
    name: Option<String>,
}

impl BuildPhase {
    pub(crate) fn parse(
        ctx: &mut Context<'_>,
        uuid: &str,
        kind: ObjectKind,
        dict: &Dictionary,
    ) -> Result<Self> {
        let mut unpack = unpack_object("BuildPhase", dict);

        let build_action_mask = unpack
            .coerce_integer("buildActionMask")
            .unwrap_or(DEFAULT_BUILD_ACTION_MASK);
        let files = ctx
            .parse_reference_array(&mut unpack, "files", families::BUILD_FILES, Some(uuid))?
            .into_iter()
            .map(|file| Ref::new(file.uuid()))
            .collect();
        let run_only = unpack
            .coerce_integer("runOnlyForDeploymentPostprocessing")
            .unwrap_or_default();
        let name = unpack.cast_string("name");

        let kind = match kind {
            ObjectKind::FrameworksBuildPhase => PhaseKind::Frameworks,
            ObjectKind::ResourcesBuildPhase => PhaseKind::Resources,
            ObjectKind::HeadersBuildPhase => PhaseKind::Headers,
            ObjectKind::RezBuildPhase => PhaseKind::Rez,
            ObjectKind::AppleScriptBuildPhase => PhaseKind::AppleScript,
            ObjectKind::CopyFilesBuildPhase => PhaseKind::CopyFiles {
                dst_path: unpack.cast_string("dstPath").unwrap_or_default(),
                dst_subfolder_spec: unpack.coerce_integer("dstSubfolderSpec").unwrap_or_default(),
            },
            ObjectKind::ShellScriptBuildPhase => PhaseKind::ShellScript {
                input_paths: unpack
                    .cast_array("inputPaths")
                    .map(Array::strings)
                    .unwrap_or_default(),
                output_paths: unpack
                    .cast_array("outputPaths")
                    .map(Array::strings)
                    .unwrap_or_default(),
                shell_path: unpack
                    .cast_string("shellPath")
                    .unwrap_or_else(|| "/bin/sh".to_owned()),
                shell_script: unpack.cast_string("shellScript").unwrap_or_default(),
                show_env_vars_in_log: unpack.coerce_integer("showEnvVarsInLog"),
            },
            _ => PhaseKind::Sources,
        };

        unpack.complete(false);

        Ok(Self {
            core: ObjectCore::new(uuid),
            kind,
            build_action_mask,
            files,
            run_only_for_deployment_postprocessing: run_only,
            name,
        })
    }

    pub fn uuid(&self) -> &str {
        self.core.uuid()
    }

    pub fn kind(&self) -> &PhaseKind {
        &self.kind
    }

    pub fn files(&self) -> &[Ref<BuildFile>] {
        &self.files
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => self.kind.default_name().to_owned(),
        }
    }

    pub(crate) fn to_plist(&self, proj: &PbxProj) -> Dictionary {
        let mut dict = isa_dictionary(self.kind.object_kind());
        dict.set("buildActionMask", Value::Integer(self.build_action_mask));

        let files: Array = self
            .files
            .iter()
            .map(|file| reference_value(proj, file.uuid()))
            .collect();
        dict.set("files", Value::Array(files));

        if let Some(name) = &self.name {
            dict.set("name", Value::string(name.clone()));
        }
        dict.set(
            "runOnlyForDeploymentPostprocessing",
            Value::Integer(self.run_only_for_deployment_postprocessing),
        );

        match &self.kind {
            PhaseKind::CopyFiles {
                dst_path,
                dst_subfolder_spec,
            } => {
                dict.set("dstPath", Value::string(dst_path.clone()));
                dict.set("dstSubfolderSpec", Value::Integer(*dst_subfolder_spec));
            }
            PhaseKind::ShellScript {
                input_paths,
                output_paths,
                shell_path,
                shell_script,
                show_env_vars_in_log,
            } => {
                dict.set("inputPaths", string_array(input_paths));
                dict.set("outputPaths", string_array(output_paths));
                dict.set("shellPath", Value::string(shell_path.clone()));
                dict.set("shellScript", Value::string(shell_script.clone()));
                if let Some(show) = show_env_vars_in_log {
                    dict.set("showEnvVarsInLog", Value::Integer(*show));
                }
            }
            _ => {}
        }

        dict
    }
}

fn string_array(items: &[String]) -> Value {
    Value::Array(items.iter().map(|item| Value::string(item.clone())).collect())
}
