use crate::components::{
    Collider, Collision, Decay, Enemy, Health, Item, Poison, Position, Projectile, Recovery,
    Renderable, Seeker, Stamina, Velocity,
};

use super::{ComponentTable, EntityId};

/// A component kind with a fixed table in [`ComponentStore`].
pub trait Component: Sized + 'static {
    const NAME: &'static str;

    fn table(store: &ComponentStore) -> &ComponentTable<Self>;
    fn table_mut(store: &mut ComponentStore) -> &mut ComponentTable<Self>;
}

macro_rules! component_store {
    ($($field:ident: $ty:ident),+ $(,)?) => {
        /// One table per component kind, all indexed by entity id.
        #[derive(Debug, Default)]
        pub struct ComponentStore {
            $($field: ComponentTable<$ty>,)+
        }

        impl ComponentStore {
            pub(crate) fn remove_all(&mut self, id: EntityId) {
                $(self.$field.remove(id);)+
            }
        }

        $(
            impl Component for $ty {
                const NAME: &'static str = stringify!($ty);

                fn table(store: &ComponentStore) -> &ComponentTable<Self> {
                    &store.$field
                }

                fn table_mut(store: &mut ComponentStore) -> &mut ComponentTable<Self> {
                    &mut store.$field
                }
            }
        )+
    };
}

component_store! {
    renderables: Renderable,
    positions: Position,
    colliders: Collider,
    velocities: Velocity,
    decays: Decay,
    projectiles: Projectile,
    collisions: Collision,
    healths: Health,
    staminas: Stamina,
    recoveries: Recovery,
    poisons: Poison,
    seekers: Seeker,
    items: Item,
    enemies: Enemy,
}

/// Initial component set handed to [`super::World::spawn`].
pub trait Bundle {
    fn insert_into(self, store: &mut ComponentStore, id: EntityId);
}

macro_rules! impl_bundle {
    ($($name:ident),+) => {
        impl<$($name: Component),+> Bundle for ($($name,)+) {
            #[allow(non_snake_case)]
            fn insert_into(self, store: &mut ComponentStore, id: EntityId) {
                let ($($name,)+) = self;
                $($name::table_mut(store).insert(id, $name);)+
            }
        }
    };
}

impl_bundle!(A);
impl_bundle!(A, B);
impl_bundle!(A, B, C);
impl_bundle!(A, B, C, D);
impl_bundle!(A, B, C, D, E);
impl_bundle!(A, B, C, D, E, F);
impl_bundle!(A, B, C, D, E, F, G);
impl_bundle!(A, B, C, D, E, F, G, H);
