use crate::{
    Error,
    db::store::{Store, StoreError},
    traits::{Args, EntityKind},
};
use rosterdb_schema::node::EntityModel;

///
/// TypeHandle
///
/// One catalog entry: the static model plus monomorphized shims the loader
/// uses where it cannot name the entity type.
///

#[derive(Clone, Copy)]
pub struct TypeHandle {
    pub model: &'static EntityModel,
    register: fn(&mut Store) -> Result<(), StoreError>,
    construct: fn(&mut Store, &Args) -> Result<(), Error>,
}

impl TypeHandle {
    #[must_use]
    pub fn of<E: EntityKind>() -> Self {
        Self {
            model: E::MODEL,
            register: Store::register::<E>,
            construct: construct::<E>,
        }
    }

    pub fn register(&self, store: &mut Store) -> Result<(), StoreError> {
        (self.register)(store)
    }

    /// Run the designated constructor and hand the candidate to the store
    /// (validation, derived pass, roster append).
    pub fn construct(&self, store: &mut Store, args: &Args) -> Result<(), Error> {
        (self.construct)(store, args)
    }
}

fn construct<E: EntityKind>(store: &mut Store, args: &Args) -> Result<(), Error> {
    let candidate = E::construct(args)?;

    store.create(candidate)
}

///
/// Catalog
///
/// Ordered manual registration table: every type the engine knows about,
/// in the order snapshots should list them. The single source of type
/// resolution during load; nothing is resolved dynamically.
///

#[derive(Clone, Default)]
pub struct Catalog {
    handles: Vec<TypeHandle>,
}

impl Catalog {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            handles: Vec::new(),
        }
    }

    #[must_use]
    pub fn with<E: EntityKind>(mut self) -> Self {
        self.handles.push(TypeHandle::of::<E>());
        self
    }

    /// Register every cataloged type into a store. Each model is validated
    /// on the way in; duplicate paths are rejected.
    pub fn register_all(&self, store: &mut Store) -> Result<(), StoreError> {
        for handle in &self.handles {
            handle.register(store)?;
        }

        Ok(())
    }

    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<&TypeHandle> {
        self.handles.iter().find(|h| h.model.path == path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeHandle> {
        self.handles.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

///
/// TESTS
///
