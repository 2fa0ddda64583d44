use super::{Component, ComponentStore, EntityId, World};

/// A set of component kinds that must all be present on an entity.
pub trait Query: 'static {
    type Item<'w>;

    /// Ids holding every kind, driven by the smallest table, sorted ascending.
    fn matching_ids(world: &World) -> Vec<EntityId>;

    fn fetch(world: &World, id: EntityId) -> Option<Self::Item<'_>>;
}

type IdsFn = fn(&ComponentStore) -> Vec<EntityId>;

macro_rules! impl_query {
    ($($name:ident),+) => {
        impl<$($name: Component),+> Query for ($($name,)+) {
            type Item<'w> = ($(&'w $name,)+);

            fn matching_ids(world: &World) -> Vec<EntityId> {
                let store = world.store();
                let drivers: &[(usize, IdsFn)] = &[
                    $((
                        $name::table(store).len(),
                        (|store: &ComponentStore| $name::table(store).ids()) as IdsFn,
                    ),)+
                ];
                let Some((_, smallest)) = drivers.iter().min_by_key(|(len, _)| *len) else {
                    return Vec::new();
                };
                let mut ids = smallest(store)
                    .into_iter()
                    .filter(|id| true $(&& $name::table(store).contains(*id))+)
                    .collect::<Vec<_>>();
                ids.sort_unstable();
                ids
            }

            fn fetch(world: &World, id: EntityId) -> Option<Self::Item<'_>> {
                let store = world.store();
                Some(($($name::table(store).get(id)?,)+))
            }
        }
    };
}

impl_query!(A);
impl_query!(A, B);
impl_query!(A, B, C);
impl_query!(A, B, C, D);
