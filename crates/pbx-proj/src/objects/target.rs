//! The target variants: native, legacy (external build tool), and
//! aggregate.

use pbx_plist::{Array, Dictionary, Value};

use crate::context::Context;
use crate::error::Result;
use crate::objects::{
    BuildPhase, BuildRule, ConfigurationList, FileReference, ObjectCore, ObjectKind, Ref,
    TargetDependency, families, isa_dictionary, reference_value, unpack_object,
};
use crate::proj::PbxProj;

#[derive(Debug, Clone, PartialEq)]
pub enum TargetKind {
    Native {
        product_install_path: Option<String>,
        product_reference: Option<Ref<FileReference>>,
        product_type: String,
        build_rules: Vec<Ref<BuildRule>>,
    },
    Legacy {
        build_arguments_string: String,
        build_tool_path: String,
        build_working_directory: String,
        pass_build_settings_in_environment: bool,
    },
    Aggregate,
}

impl TargetKind {
    pub(crate) fn object_kind(&self) -> ObjectKind {
        match self {
            TargetKind::Native { .. } => ObjectKind::NativeTarget,
            TargetKind::Legacy { .. } => ObjectKind::LegacyTarget,
            TargetKind::Aggregate => ObjectKind::AggregateTarget,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub(crate) core: ObjectCore,
    kind: TargetKind,
    name: String,
    product_name: String,
    build_configuration_list: Option<Ref<ConfigurationList>>,
    build_phases: Vec<Ref<BuildPhase>>,
    dependencies: Vec<Ref<TargetDependency>>,
}

impl Target {
    pub(crate) fn parse(
        ctx: &mut Context<'_>,
        uuid: &str,
        kind: ObjectKind,
        dict: &Dictionary,
    ) -> Result<Self> {
        let mut unpack = unpack_object("Target", dict);

        let name = unpack.cast_string("name").unwrap_or_default();
        let product_name = unpack.cast_string("productName").unwrap_or_default();
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
        let build_phases = ctx
            .parse_reference_array(&mut unpack, "buildPhases", families::BUILD_PHASES, Some(uuid))?
            .into_iter()
            .map(|phase| Ref::new(phase.uuid()))
            .collect();
        let dependencies = ctx
            .parse_reference_array(
                &mut unpack,
                "dependencies",
                families::TARGET_DEPENDENCIES,
                Some(uuid),
            )?
            .into_iter()
            .map(|dependency| Ref::new(dependency.uuid()))
            .collect();

        let kind = match kind {
            ObjectKind::LegacyTarget => TargetKind::Legacy {
                build_arguments_string: unpack
                    .cast_string("buildArgumentsString")
                    .unwrap_or_default(),
                build_tool_path: unpack.cast_string("buildToolPath").unwrap_or_default(),
                build_working_directory: unpack
                    .cast_string("buildWorkingDirectory")
                    .unwrap_or_default(),
                pass_build_settings_in_environment: unpack
                    .coerce_boolean("passBuildSettingsInEnvironment")
                    .unwrap_or_default(),
            },
            ObjectKind::AggregateTarget => TargetKind::Aggregate,
            _ => TargetKind::Native {
                product_install_path: unpack.cast_string("productInstallPath"),
                product_reference: ctx
                    .parse_reference(&mut unpack, "productReference", families::FILE_REFERENCES)?
                    .map(|product| Ref::new(product.uuid())),
                product_type: unpack.cast_string("productType").unwrap_or_default(),
                build_rules: ctx
                    .parse_reference_array(
                        &mut unpack,
                        "buildRules",
                        families::BUILD_RULES,
                        Some(uuid),
                    )?
                    .into_iter()
                    .map(|rule| Ref::new(rule.uuid()))
                    .collect(),
            },
        };

        unpack.complete(false);

        Ok(Self {
            core: ObjectCore::new(uuid),
            kind,
            name,
            product_name,
            build_configuration_list,
            build_phases,
            dependencies,
        })
    }

    pub fn uuid(&self) -> &str {
        self.core.uuid()
    }

    pub fn kind(&self) -> &TargetKind {
        &self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    pub fn set_product_name(&mut self, product_name: impl Into<String>) {
        self.product_name = product_name.into();
    }

    /// The product type identifier, for native targets.
    pub fn product_type(&self) -> Option<&str> {
        match &self.kind {
            TargetKind::Native { product_type, .. } => Some(product_type),
            _ => None,
        }
    }

    pub fn build_configuration_list(&self) -> Option<&Ref<ConfigurationList>> {
        self.build_configuration_list.as_ref()
    }

    pub fn build_phases(&self) -> &[Ref<BuildPhase>] {
        &self.build_phases
    }

    pub fn dependencies(&self) -> &[Ref<TargetDependency>] {
        &self.dependencies
    }

    pub fn display_name(&self) -> String {
        if self.name.is_empty() {
            self.kind.object_kind().isa().to_owned()
        } else {
            self.name.clone()
        }
    }

    pub(crate) fn to_plist(&self, proj: &PbxProj) -> Dictionary {
        let mut dict = isa_dictionary(self.kind.object_kind());

        if let Some(list) = &self.build_configuration_list {
            dict.set("buildConfigurationList", reference_value(proj, list.uuid()));
        }
        let phases: Array = self
            .build_phases
            .iter()
            .map(|phase| reference_value(proj, phase.uuid()))
            .collect();
        dict.set("buildPhases", Value::Array(phases));
        let dependencies: Array = self
            .dependencies
            .iter()
            .map(|dependency| reference_value(proj, dependency.uuid()))
            .collect();
        dict.set("dependencies", Value::Array(dependencies));
        dict.set("name", Value::string(self.name.clone()));
        dict.set("productName", Value::string(self.product_name.clone()));

        match &self.kind {
            TargetKind::Native {
                product_install_path,
                product_reference,
                product_type,
                build_rules,
            } => {
                let rules: Array = build_rules
                    .iter()
                    .map(|rule| reference_value(proj, rule.uuid()))
                    .collect();
                dict.set("buildRules", Value::Array(rules));
                if let Some(install_path) = product_install_path {
                    dict.set("productInstallPath", Value::string(install_path.clone()));
                }
                if let Some(product) = product_reference {
                    dict.set("productReference", reference_value(proj, product.uuid()));
                }
                dict.set("productType", Value::string(product_type.clone()));
            }
            TargetKind::Legacy {
                build_arguments_string,
                build_tool_path,
                build_working_directory,
                pass_build_settings_in_environment,
            } => {
                dict.set(
                    "buildArgumentsString",
                    Value::string(build_arguments_string.clone()),
                );
                dict.set("buildToolPath", Value::string(build_tool_path.clone()));
                dict.set(
                    "buildWorkingDirectory",
                    Value::string(build_working_directory.clone()),
                );
                dict.set(
                    "passBuildSettingsInEnvironment",
                    Value::Integer(i64::from(*pass_build_settings_in_environment)),
                );
            }
            TargetKind::Aggregate => {}
        }

        dict
    }
}
