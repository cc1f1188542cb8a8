//! The reference resolver.
//!
//! Turns the untyped `{uuid: {isa: ..., ...}}` map into the typed graph.
//! Resolution is memoized *before* recursion: a uuid is recorded as
//! resolved the moment its variant is chosen, so a cyclic reference chain
//! (a proxy pointing at a project that transitively points back) settles
//! on the in-flight uuid handle instead of recursing forever.
//!
//! A `Context` lives for exactly one `PbxProj::open` call.

use std::collections::HashMap;

use pbx_plist::{Dictionary, Unpack};

use crate::error::{ProjError, Result};
use crate::objects::{Object, ObjectKind, ObjectRef};

pub struct Context<'a> {
    /// The untyped objects map being resolved.
    objects: &'a Dictionary,
    /// Memo of every uuid whose variant has been chosen, including those
    /// still mid-construction.
    resolved: HashMap<String, ObjectKind>,
    /// The owning store under construction. Objects land here exactly
    /// once, at the point of first construction.
    store: HashMap<String, Object>,
    /// Parent links recorded during parse; first assignment wins.
    parents: HashMap<String, String>,
    /// File references in construction order.
    file_references: Vec<String>,
}

impl<'a> Context<'a> {
    pub fn new(objects: &'a Dictionary) -> Self {
        Self {
            objects,
            resolved: HashMap::new(),
            store: HashMap::new(),
            parents: HashMap::new(),
            file_references: Vec::new(),
        }
    }

    /// Read an indirect reference field: the key's value is a uuid whose
    /// target dictionary's isa is tested against `family` in priority
    /// order. `None` (missing key, unknown uuid, or no family match) is
    /// an absent reference, not an error.
    pub fn indirect(
        &self,
        unpack: &mut Unpack<'_>,
        key: &str,
        family: &[ObjectKind],
    ) -> Option<(String, ObjectKind)> {
        let uuid = unpack.cast_str(key)?;
        let kind = self.match_family(uuid, family)?;
        Some((uuid.to_owned(), kind))
    }

    /// Match a bare uuid (an array element) against a family.
    pub fn match_family(&self, uuid: &str, family: &[ObjectKind]) -> Option<ObjectKind> {
        let dict = self.objects.get_dictionary(uuid)?;
        let isa = dict.get_str("isa")?;
        family.iter().copied().find(|kind| kind.isa() == isa)
    }

    /// Resolve `uuid` as `kind`, constructing it on first sight. A memo
    /// hit returns immediately — the instance may still be
    /// mid-construction, which is what makes cycles terminate.
    pub fn parse_object(&mut self, uuid: &str, kind: ObjectKind) -> Result<()> {
        if self.resolved.contains_key(uuid) {
            return Ok(());
        }
        self.resolved.insert(uuid.to_owned(), kind);
        tracing::debug!(uuid, isa = kind.isa(), "resolving object");

        let objects: &'a Dictionary = self.objects;
        let dict = objects
            .get_dictionary(uuid)
            .ok_or_else(|| ProjError::MalformedObject {
                uuid: uuid.to_owned(),
            })?;

        let object = Object::parse(self, uuid, kind, dict)?;
        if kind == ObjectKind::FileReference {
            self.file_references.push(uuid.to_owned());
        }
        self.store.insert(uuid.to_owned(), object);
        Ok(())
    }

    /// Resolve a reference field end to end: family match, memoized
    /// construction, handle.
    pub fn parse_reference(
        &mut self,
        unpack: &mut Unpack<'_>,
        key: &str,
        family: &[ObjectKind],
    ) -> Result<Option<ObjectRef>> {
        match self.indirect(unpack, key, family) {
            Some((uuid, kind)) => {
                self.parse_object(&uuid, kind)?;
                Ok(Some(ObjectRef::new(uuid, kind)))
            }
            None => Ok(None),
        }
    }

    /// Resolve an array-of-references field. Elements that are not
    /// strings or do not match the family are skipped with a diagnostic.
    /// When `parent` is given, each resolved child records it as its
    /// enclosing node.
    pub fn parse_reference_array(
        &mut self,
        unpack: &mut Unpack<'_>,
        key: &str,
        family: &[ObjectKind],
        parent: Option<&str>,
    ) -> Result<Vec<ObjectRef>> {
        let mut refs = Vec::new();
        let Some(array) = unpack.cast_array(key) else {
            return Ok(refs);
        };
        for element in array.iter() {
            let Some(uuid) = element.as_str() else {
                tracing::warn!(key, "skipping non-string reference element");
                continue;
            };
            let Some(kind) = self.match_family(uuid, family) else {
                tracing::warn!(key, uuid, "skipping unresolvable reference");
                continue;
            };
            self.parse_object(uuid, kind)?;
            if let Some(parent) = parent {
                self.set_parent(uuid, parent);
            }
            refs.push(ObjectRef::new(uuid, kind));
        }
        Ok(refs)
    }

    /// Record `parent` as `child`'s enclosing node; the first recording
    /// wins.
    pub fn set_parent(&mut self, child: &str, parent: &str) {
        self.parents
            .entry(child.to_owned())
            .or_insert_with(|| parent.to_owned());
    }

    /// Finalize: apply parent links and hand the store to the document.
    pub fn finish(mut self) -> (HashMap<String, Object>, Vec<String>) {
        for (child, parent) in &self.parents {
            if let Some(object) = self.store.get_mut(child) {
                object.core_mut().set_parent(parent);
            }
        }
        (self.store, self.file_references)
    }
}
