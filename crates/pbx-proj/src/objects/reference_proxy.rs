//! PBXReferenceProxy: a product of another project, seen through a
//! container item proxy.

use pbx_plist::{Dictionary, Value};

use crate::context::Context;
use crate::error::Result;
use crate::objects::{
    ContainerItemProxy, ObjectCore, ObjectKind, Ref, families, isa_dictionary, reference_value,
    unpack_object,
};
use crate::proj::PbxProj;

#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceProxy {
    pub(crate) core: ObjectCore,
    file_type: Option<String>,
    path: String,
    remote_ref: Option<Ref<ContainerItemProxy>>,
    source_tree: String,
}

impl ReferenceProxy {
    pub(crate) fn parse(ctx: &mut Context<'_>, uuid: &str, dict: &Dictionary) -> Result<Self> {
        let mut unpack = unpack_object("ReferenceProxy", dict);

        let file_type = unpack.cast_string("fileType");
        let path = unpack.cast_string("path").unwrap_or_default();
        let remote_ref = ctx
            .parse_reference(&mut unpack, "remoteRef", families::CONTAINER_ITEM_PROXIES)?
            .map(|proxy| Ref::new(proxy.uuid()));
        let source_tree = unpack
            .cast_string("sourceTree")
            .unwrap_or_else(|| "<group>".to_owned());

        unpack.complete(false);

        Ok(Self {
            core: ObjectCore::new(uuid),
            file_type,
            path,
            remote_ref,
            source_tree,
        })
    }

    pub fn uuid(&self) -> &str {
        self.core.uuid()
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn remote_ref(&self) -> Option<&Ref<ContainerItemProxy>> {
        self.remote_ref.as_ref()
    }

    pub fn display_name(&self) -> String {
        match self.path.rsplit('/').next() {
            Some(base) if !base.is_empty() => base.to_owned(),
            _ => ObjectKind::ReferenceProxy.isa().to_owned(),
        }
    }

    pub(crate) fn to_plist(&self, proj: &PbxProj) -> Dictionary {
        let mut dict = isa_dictionary(ObjectKind::ReferenceProxy);
        if let Some(file_type) = &self.file_type {
            dict.set("fileType", Value::string(file_type.clone()));
        }
        dict.set("path", Value::string(self.path.clone()));
        if let Some(remote_ref) = &self.remote_ref {
            dict.set("remoteRef", reference_value(proj, remote_ref.uuid()));
        }
        dict.set("sourceTree", Value::string(self.source_tree.clone()));
        dict
    }
}
