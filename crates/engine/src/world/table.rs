use super::EntityId;

/// Sparse set keyed by entity id: a dense `(id, value)` array plus an index
/// from id slot to dense position.
#[derive(Debug, Clone)]
pub struct ComponentTable<T> {
    dense: Vec<(EntityId, T)>,
    sparse: Vec<Option<usize>>,
}

impl<T> Default for ComponentTable<T> {
    fn default() -> Self {
        Self {
            dense: Vec::new(),
            sparse: Vec::new(),
        }
    }
}

impl<T> ComponentTable<T> {
    pub fn len(&self) -> usize {
        self.dense.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dense.is_empty()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.dense_index(id).is_some()
    }

    pub fn get(&self, id: EntityId) -> Option<&T> {
        let index = self.dense_index(id)?;
        self.dense.get(index).map(|(_, value)| value)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut T> {
        let index = self.dense_index(id)?;
        self.dense.get_mut(index).map(|(_, value)| value)
    }

    /// Inserts or replaces; returns the previous value.
    pub fn insert(&mut self, id: EntityId, value: T) -> Option<T> {
        if let Some(index) = self.dense_index(id) {
            return Some(std::mem::replace(&mut self.dense[index].1, value));
        }
        let slot = id.slot()?;
        if slot >= self.sparse.len() {
            self.sparse.resize(slot + 1, None);
        }
        self.sparse[slot] = Some(self.dense.len());
        self.dense.push((id, value));
        None
    }

    pub fn remove(&mut self, id: EntityId) -> Option<T> {
        let slot = id.slot()?;
        let index = self.sparse.get_mut(slot)?.take()?;
        let (_, value) = self.dense.swap_remove(index);
        if let Some((moved_id, _)) = self.dense.get(index) {
            if let Some(moved_slot) = moved_id.slot() {
                self.sparse[moved_slot] = Some(index);
            }
        }
        Some(value)
    }

    pub fn ids(&self) -> Vec<EntityId> {
        self.dense.iter().map(|(id, _)| *id).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &T)> {
        self.dense.iter().map(|(id, value)| (*id, value))
    }

    fn dense_index(&self, id: EntityId) -> Option<usize> {
        self.sparse.get(id.slot()?).copied().flatten()
    }
}
