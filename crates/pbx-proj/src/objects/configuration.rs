//! XCBuildConfiguration and XCConfigurationList.

use pbx_plist::{Array, Dictionary, Value};
use pbx_setting::{Level, Setting, SettingValue};

use crate::context::Context;
use crate::error::Result;
use crate::objects::{
    FileReference, ObjectCore, ObjectKind, Ref, families, isa_dictionary, reference_value,
    unpack_object,
};
use crate::proj::PbxProj;

/// Build settings whose values are lists; a bare string under one of
/// these names is a one-element list.
const ARRAY_SETTINGS: &[&str] = &[
    "ALTERNATE_PERMISSIONS_FILES",
    "ARCHS",
    "BUILD_VARIANTS",
    "EXCLUDED_SOURCE_FILE_NAMES",
    "FRAMEWORK_SEARCH_PATHS",
    "GCC_PREPROCESSOR_DEFINITIONS",
    "GCC_PREPROCESSOR_DEFINITIONS_NOT_USED_IN_PRECOMPS",
    "HEADER_SEARCH_PATHS",
    "INCLUDED_SOURCE_FILE_NAMES",
    "INFOPLIST_PREPROCESSOR_DEFINITIONS",
    "LD_RUNPATH_SEARCH_PATHS",
    "LIBRARY_SEARCH_PATHS",
    "LOCALIZED_STRING_MACRO_NAMES",
    "OTHER_CFLAGS",
    "OTHER_CPLUSPLUSFLAGS",
    "OTHER_LDFLAGS",
    "REZ_SEARCH_PATHS",
    "SECTORDER_FLAGS",
    "SYSTEM_FRAMEWORK_SEARCH_PATHS",
    "SYSTEM_HEADER_SEARCH_PATHS",
    "USER_HEADER_SEARCH_PATHS",
    "WARNING_CFLAGS",
    "WARNING_LDFLAGS",
];

#[derive(Debug, Clone, PartialEq)]
pub struct BuildConfiguration {
    pub(crate) core: ObjectCore,
    base_configuration_reference: Option<Ref<FileReference>>,
    build_settings: Level,
    name: String,
}

impl BuildConfiguration {
    pub(crate) fn parse(ctx: &mut Context<'_>, uuid: &str, dict: &Dictionary) -> Result<Self> {
        let mut unpack = unpack_object("BuildConfiguration", dict);

        let base_configuration_reference = ctx
            .parse_reference(
                &mut unpack,
                "baseConfigurationReference",
                families::FILE_REFERENCES,
            )?
            .map(|reference| Ref::new(reference.uuid()));

        let mut settings = Vec::new();
        if let Some(build_settings) = unpack.cast_dictionary("buildSettings") {
            for (key, value) in build_settings.iter() {
                let as_list = ARRAY_SETTINGS.contains(&key);
                settings.push(Setting::with_value(
                    key,
                    SettingValue::from_value(value, as_list),
                ));
            }
        }
        let name = unpack.cast_string("name").unwrap_or_default();

        unpack.complete(false);

        Ok(Self {
            core: ObjectCore::new(uuid),
            base_configuration_reference,
            build_settings: Level::new(settings),
            name,
        })
    }

    pub fn uuid(&self) -> &str {
        self.core.uuid()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn build_settings(&self) -> &Level {
        &self.build_settings
    }

    pub fn base_configuration_reference(&self) -> Option<&Ref<FileReference>> {
        self.base_configuration_reference.as_ref()
    }

    pub fn display_name(&self) -> String {
        if self.name.is_empty() {
            ObjectKind::BuildConfiguration.isa().to_owned()
        } else {
            self.name.clone()
        }
    }

    pub(crate) fn to_plist(&self, proj: &PbxProj) -> Dictionary {
        let mut dict = isa_dictionary(ObjectKind::BuildConfiguration);
        if let Some(base) = &self.base_configuration_reference {
            dict.set(
                "baseConfigurationReference",
                reference_value(proj, base.uuid()),
            );
        }
        let mut settings = Dictionary::new();
        for setting in self.build_settings.settings() {
            settings.set(setting.name(), setting.value().to_value());
        }
        dict.set("buildSettings", Value::Dictionary(settings));
        dict.set("name", Value::string(self.name.clone()));
        dict
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConfigurationList {
    pub(crate) core: ObjectCore,
    build_configurations: Vec<Ref<BuildConfiguration>>,
    default_configuration_is_visible: i64,
    default_configuration_name: Option<String>,
}

impl ConfigurationList {
    pub(crate) fn parse(ctx: &mut Context<'_>, uuid: &str, dict: &Dictionary) -> Result<Self> {
        let mut unpack = unpack_object("ConfigurationList", dict);

        let build_configurations = ctx
            .parse_reference_array(
                &mut unpack,
                "buildConfigurations",
                families::BUILD_CONFIGURATIONS,
                Some(uuid),
            )?
            .into_iter()
            .map(|configuration| Ref::new(configuration.uuid()))
            .collect();
        let default_configuration_is_visible = unpack
            .coerce_integer("defaultConfigurationIsVisible")
            .unwrap_or_default();
        let default_configuration_name = unpack.cast_string("defaultConfigurationName");

        unpack.complete(false);

        Ok(Self {
            core: ObjectCore::new(uuid),
            build_configurations,
            default_configuration_is_visible,
            default_configuration_name,
        })
    }

    pub fn uuid(&self) -> &str {
        self.core.uuid()
    }

    pub fn build_configurations(&self) -> &[Ref<BuildConfiguration>] {
        &self.build_configurations
    }

    pub fn default_configuration_name(&self) -> Option<&str> {
        self.default_configuration_name.as_deref()
    }

    /// "Build configuration list for `<owner isa>` "`<owner>`"", the way
    /// the external tool labels these entries.
    pub fn annotation(&self, proj: &PbxProj) -> String {
        match self.core.parent().and_then(|parent| proj.object(parent)) {
            Some(owner) => format!(
                "Build configuration list for {} \"{}\"",
                owner.isa(),
                owner.display_name(proj)
            ),
            None => ObjectKind::ConfigurationList.isa().to_owned(),
        }
    }

    pub(crate) fn to_plist(&self, proj: &PbxProj) -> Dictionary {
        let mut dict = isa_dictionary(ObjectKind::ConfigurationList);
        let configurations: Array = self
            .build_configurations
            .iter()
            .map(|configuration| reference_value(proj, configuration.uuid()))
            .collect();
        dict.set("buildConfigurations", Value::Array(configurations));
        dict.set(
            "defaultConfigurationIsVisible",
            Value::Integer(self.default_configuration_is_visible),
        );
        if let Some(name) = &self.default_configuration_name {
            dict.set("defaultConfigurationName", Value::string(name.clone()));
        }
        dict
    }
}
