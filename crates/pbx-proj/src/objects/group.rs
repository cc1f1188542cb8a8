//! PBXGroup and PBXVariantGroup: hierarchy nodes of the file tree.

use pbx_plist::{Array, Dictionary, Value};

use crate::context::Context;
use crate::error::Result;
use crate::objects::{
    ObjectCore, ObjectKind, ObjectRef, families, isa_dictionary, reference_value, unpack_object,
};
use crate::proj::PbxProj;

/// The two group flavors share every field; variant groups exist to hold
/// per-localization copies of one resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    Group,
    Variant,
}

impl GroupKind {
    pub(crate) fn object_kind(self) -> ObjectKind {
        match self {
            GroupKind::Group => ObjectKind::Group,
            GroupKind::Variant => ObjectKind::VariantGroup,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub(crate) core: ObjectCore,
    kind: GroupKind,
    children: Vec<ObjectRef>,
    name: Option<String>,
    path: Option<String>,
    source_tree: String,
}

impl Group {
    pub(crate) fn parse(
        ctx: &mut Context<'_>,
        uuid: &str,
        kind: ObjectKind,
        dict: &Dictionary,
    ) -> Result<Self> {
        let kind = match kind {
            ObjectKind::VariantGroup => GroupKind::Variant,
            _ => GroupKind::Group,
        };
        let mut unpack = unpack_object("Group", dict);

        let children =
            ctx.parse_reference_array(&mut unpack, "children", families::GROUP_ITEMS, Some(uuid))?;
        let name = unpack.cast_string("name");
        let path = unpack.cast_string("path");
        let source_tree = unpack
            .cast_string("sourceTree")
            .unwrap_or_else(|| "<group>".to_owned());

        unpack.complete(false);

        Ok(Self {
            core: ObjectCore::new(uuid),
            kind,
            children,
            name,
            path,
            source_tree,
        })
    }

    pub fn uuid(&self) -> &str {
        self.core.uuid()
    }

    pub fn kind(&self) -> GroupKind {
        self.kind
    }

    pub fn children(&self) -> &[ObjectRef] {
        &self.children
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn source_tree(&self) -> &str {
        &self.source_tree
    }

    /// The name, else the last path component, else empty — an unnamed
    /// root group prints without a comment.
    pub fn display_name(&self) -> String {
        if let Some(name) = &self.name {
            return name.clone();
        }
        self.path
            .as_deref()
            .and_then(|path| path.rsplit('/').next())
            .unwrap_or_default()
            .to_owned()
    }

    pub(crate) fn to_plist(&self, proj: &PbxProj) -> Dictionary {
        let mut dict = isa_dictionary(self.kind.object_kind());
        let children: Array = self
            .children
            .iter()
            .map(|child| reference_value(proj, child.uuid()))
            .collect();
        dict.set("children", Value::Array(children));
        if let Some(name) = &self.name {
            dict.set("name", Value::string(name.clone()));
        }
        if let Some(path) = &self.path {
            dict.set("path", Value::string(path.clone()));
        }
        dict.set("sourceTree", Value::string(self.source_tree.clone()));
        dict
    }
}
