//! PBXTargetDependency: one target requiring another, possibly through a
//! container item proxy.

use pbx_plist::{Dictionary, Value};

use crate::context::Context;
use crate::error::Result;
use crate::objects::{
    ContainerItemProxy, ObjectCore, ObjectKind, ObjectRef, Ref, families, isa_dictionary,
    reference_value, unpack_object,
};
use crate::proj::PbxProj;

#[derive(Debug, Clone, PartialEq)]
pub struct TargetDependency {
    pub(crate) core: ObjectCore,
    name: Option<String>,
    target: Option<ObjectRef>,
    target_proxy: Option<Ref<ContainerItemProxy>>,
}

impl TargetDependency {
    pub(crate) fn parse(ctx: &mut Context<'_>, uuid: &str, dict: &Dictionary) -> Result<Self> {
        let mut unpack = unpack_object("TargetDependency", dict);

        let name = unpack.cast_string("name");
        let target = ctx.parse_reference(&mut unpack, "target", families::TARGETS)?;
        let target_proxy = ctx
            .parse_reference(&mut unpack, "targetProxy", families::CONTAINER_ITEM_PROXIES)?
            .map(|proxy| Ref::new(proxy.uuid()));

        unpack.complete(false);

        Ok(Self {
            core: ObjectCore::new(uuid),
            name,
            target,
            target_proxy,
        })
    }

    pub fn uuid(&self) -> &str {
        self.core.uuid()
    }

    pub fn target(&self) -> Option<&ObjectRef> {
        self.target.as_ref()
    }

    pub fn target_proxy(&self) -> Option<&Ref<ContainerItemProxy>> {
        self.target_proxy.as_ref()
    }

    pub(crate) fn to_plist(&self, proj: &PbxProj) -> Dictionary {
        let mut dict = isa_dictionary(ObjectKind::TargetDependency);
        if let Some(name) = &self.name {
            dict.set("name", Value::string(name.clone()));
        }
        if let Some(target) = &self.target {
            dict.set("target", reference_value(proj, target.uuid()));
        }
        if let Some(proxy) = &self.target_proxy {
            dict.set("targetProxy", reference_value(proj, proxy.uuid()));
        }
        dict
    }
}
