use thiserror::Error;

use crate::world::EntityId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    #[error("entity {0:?} is not alive")]
    UnknownEntity(EntityId),
    #[error("entity {entity:?} has no {component} component")]
    MissingComponent {
        entity: EntityId,
        component: &'static str,
    },
    #[error("simulation invariant violated: {0}")]
    InvariantViolation(String),
}

pub type SimResult<T> = Result<T, SimError>;
