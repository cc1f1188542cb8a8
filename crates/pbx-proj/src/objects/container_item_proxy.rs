//! PBXContainerItemProxy: an indirection to an object living in another
//! container (or in this project, for target dependencies).

use pbx_plist::{Dictionary, Value};

use crate::context::Context;
use crate::error::Result;
use crate::objects::{
    ObjectCore, ObjectKind, ObjectRef, families, isa_dictionary, reference_value, unpack_object,
};
use crate::proj::PbxProj;

#[derive(Debug, Clone, PartialEq)]
pub struct ContainerItemProxy {
    pub(crate) core: ObjectCore,
    container_portal: Option<ObjectRef>,
    proxy_type: i64,
    remote_global_id_string: String,
    remote_info: String,
}

impl ContainerItemProxy {
    pub(crate) fn parse(ctx: &mut Context<'_>, uuid: &str, dict: &Dictionary) -> Result<Self> {
        let mut unpack = unpack_object("ContainerItemProxy", dict);

        // The portal is a file reference for external containers, or the
        // project itself for in-project dependencies. The latter is the
        // cycle the memo table exists for: that project transitively
        // holds the dependency that holds this proxy.
        let container_portal =
            ctx.parse_reference(&mut unpack, "containerPortal", families::CONTAINER_PORTALS)?;
        let proxy_type = unpack.coerce_integer("proxyType").unwrap_or_default();
        let remote_global_id_string = unpack
            .cast_string("remoteGlobalIDString")
            .unwrap_or_default();
        let remote_info = unpack.cast_string("remoteInfo").unwrap_or_default();

        unpack.complete(false);

        Ok(Self {
            core: ObjectCore::new(uuid),
            container_portal,
            proxy_type,
            remote_global_id_string,
            remote_info,
        })
    }

    pub fn uuid(&self) -> &str {
        self.core.uuid()
    }

    pub fn container_portal(&self) -> Option<&ObjectRef> {
        self.container_portal.as_ref()
    }

    pub fn proxy_type(&self) -> i64 {
        self.proxy_type
    }

    pub fn remote_global_id_string(&self) -> &str {
        &self.remote_global_id_string
    }

    pub fn remote_info(&self) -> &str {
        &self.remote_info
    }

    pub(crate) fn to_plist(&self, proj: &PbxProj) -> Dictionary {
        let mut dict = isa_dictionary(ObjectKind::ContainerItemProxy);
        if let Some(portal) = &self.container_portal {
            dict.set("containerPortal", reference_value(proj, portal.uuid()));
        }
        dict.set("proxyType", Value::Integer(self.proxy_type));
        dict.set(
            "remoteGlobalIDString",
            Value::string(self.remote_global_id_string.clone()),
        );
        dict.set("remoteInfo", Value::string(self.remote_info.clone()));
        dict
    }
}
