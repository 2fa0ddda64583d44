mod entity;
mod query;
mod store;
mod table;

use std::collections::HashSet;

pub use entity::{EntityId, EntityIdAllocator, MapBounds};
pub use query::Query;
pub use store::{Bundle, Component, ComponentStore};
pub use table::ComponentTable;

use crate::error::{SimError, SimResult};

/// The component store: live entity ids plus one table per component kind.
#[derive(Debug)]
pub struct World {
    allocator: EntityIdAllocator,
    live: HashSet<EntityId>,
    store: ComponentStore,
    bounds: MapBounds,
}

impl World {
    pub fn new(bounds: MapBounds) -> Self {
        Self {
            allocator: EntityIdAllocator::default(),
            live: HashSet::new(),
            store: ComponentStore::default(),
            bounds,
        }
    }

    pub fn bounds(&self) -> MapBounds {
        self.bounds
    }

    pub fn spawn<B: Bundle>(&mut self, bundle: B) -> EntityId {
        let id = self.allocator.allocate();
        self.live.insert(id);
        bundle.insert_into(&mut self.store, id);
        id
    }

    /// Removes the entity and every component it holds.
    pub fn despawn(&mut self, id: EntityId) -> bool {
        if !self.live.remove(&id) {
            return false;
        }
        self.store.remove_all(id);
        true
    }

    pub fn is_alive(&self, id: EntityId) -> bool {
        self.live.contains(&id)
    }

    pub fn entity_count(&self) -> usize {
        self.live.len()
    }

    pub fn insert<T: Component>(&mut self, id: EntityId, component: T) -> SimResult<Option<T>> {
        if !self.is_alive(id) {
            return Err(SimError::UnknownEntity(id));
        }
        Ok(T::table_mut(&mut self.store).insert(id, component))
    }

    pub fn remove<T: Component>(&mut self, id: EntityId) -> Option<T> {
        T::table_mut(&mut self.store).remove(id)
    }

    pub fn has<T: Component>(&self, id: EntityId) -> bool {
        T::table(&self.store).contains(id)
    }

    pub fn get<T: Component>(&self, id: EntityId) -> SimResult<&T> {
        self.try_get(id).ok_or(SimError::MissingComponent {
            entity: id,
            component: T::NAME,
        })
    }

    pub fn get_mut<T: Component>(&mut self, id: EntityId) -> SimResult<&mut T> {
        self.try_get_mut(id).ok_or(SimError::MissingComponent {
            entity: id,
            component: T::NAME,
        })
    }

    pub fn try_get<T: Component>(&self, id: EntityId) -> Option<&T> {
        T::table(&self.store).get(id)
    }

    pub fn try_get_mut<T: Component>(&mut self, id: EntityId) -> Option<&mut T> {
        T::table_mut(&mut self.store).get_mut(id)
    }

    pub fn count<T: Component>(&self) -> usize {
        T::table(&self.store).len()
    }

    /// Snapshot of matching ids; safe to mutate the world while walking it.
    pub fn matching<Q: Query>(&self) -> Vec<EntityId> {
        Q::matching_ids(self)
    }

    pub fn query<Q: Query>(&self) -> impl Iterator<Item = (EntityId, Q::Item<'_>)> + '_ {
        Q::matching_ids(self)
            .into_iter()
            .filter_map(move |id| Q::fetch(self, id).map(|item| (id, item)))
    }

    pub(crate) fn store(&self) -> &ComponentStore {
        &self.store
    }
}
