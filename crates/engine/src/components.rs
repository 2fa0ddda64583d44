//! Plain component records. Behavior is limited to clamped resource math.

use serde::{Deserialize, Serialize};

use crate::world::EntityId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const GREEN: Rgb = Rgb(0, 255, 0);
    pub const GREY: Rgb = Rgb(200, 200, 200);
    pub const GOLD: Rgb = Rgb(255, 215, 0);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Renderable {
    pub glyph: char,
    pub color: Rgb,
}

impl Renderable {
    pub fn new(glyph: char, color: Rgb) -> Self {
        Self { glyph, color }
    }
}

/// Grid cell on layer `z`. `overlap` entities never block movement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Position {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub overlap: bool,
}

impl Position {
    pub fn at(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            z: 0,
            overlap: false,
        }
    }

    pub fn overlapping(x: i32, y: i32) -> Self {
        Self {
            overlap: true,
            ..Self::at(x, y)
        }
    }

    pub fn cell(&self) -> (i32, i32, i32) {
        (self.x, self.y, self.z)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Collider;

/// Displacement applied each tick for `duration` ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Velocity {
    pub x: i32,
    pub y: i32,
    pub duration: u32,
}

impl Velocity {
    pub fn new(x: i32, y: i32, duration: u32) -> Self {
        Self { x, y, duration }
    }

    pub fn step(x: i32, y: i32) -> Self {
        Self::new(x, y, 1)
    }

    pub fn is_inert(&self) -> bool {
        (self.x == 0 && self.y == 0) || self.duration == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decay {
    pub duration: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Projectile {
    pub damage: u32,
}

/// Attached to the struck entity for the remainder of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collision {
    pub striker: EntityId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Health {
    current: u32,
    max: u32,
    pub inventory: Vec<ItemKind>,
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self::with_inventory(max, Vec::new())
    }

    pub fn with_inventory(max: u32, inventory: Vec<ItemKind>) -> Self {
        Self {
            current: max,
            max,
            inventory,
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }

    pub fn heal(&mut self, amount: u32) {
        self.current = self.current.saturating_add(amount).min(self.max);
    }

    /// Heal then damage, clamped once at the end so both effects net out.
    pub fn apply_effects(&mut self, heal: u32, damage: u32) {
        let net = i64::from(self.current) + i64::from(heal) - i64::from(damage);
        self.current = net.clamp(0, i64::from(self.max)) as u32;
    }

    pub fn is_dead(&self) -> bool {
        self.current == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stamina {
    current: u32,
    max: u32,
}

impl Stamina {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn exert(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }

    pub fn rest(&mut self, amount: u32) {
        self.current = self.current.saturating_add(amount).min(self.max);
    }

    pub fn is_depleted(&self) -> bool {
        self.current == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recovery {
    pub effect: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Poison {
    pub effect: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seeker {
    pub aggro: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item(pub ItemKind);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Enemy(pub EnemyKind);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Food,
    Shiny,
}

impl ItemKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Shiny => "Bright, shiny object",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Food => "It smells delicious",
            Self::Shiny => "It glows brilliantly; surely someone will trade for this",
        }
    }

    pub fn renderable(self) -> Renderable {
        match self {
            Self::Food => Renderable::new('!', Rgb::WHITE),
            Self::Shiny => Renderable::new('$', Rgb::GOLD),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyKind {
    Human,
}

impl EnemyKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Human => "Human",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Human => "Maybe they have food...",
        }
    }

    pub fn renderable(self) -> Renderable {
        match self {
            Self::Human => Renderable::new('o', Rgb::WHITE),
        }
    }

    pub fn health(self) -> u32 {
        match self {
            Self::Human => 5,
        }
    }

    pub fn aggro(self) -> u32 {
        match self {
            Self::Human => 10,
        }
    }

    pub fn starting_inventory(self) -> Vec<ItemKind> {
        match self {
            Self::Human => vec![ItemKind::Food],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn health_damage_and_heal_clamp_to_range() {
        let mut health = Health::new(10);
        health.damage(25);
        assert_eq!(health.current(), 0);
        assert!(health.is_dead());
        health.heal(4);
        assert_eq!(health.current(), 4);
        health.heal(100);
        assert_eq!(health.current(), 10);
    }

    #[test]
    fn stamina_exert_and_rest_clamp_to_range() {
        let mut stamina = Stamina::new(3);
        stamina.exert(2);
        assert_eq!(stamina.current(), 1);
        stamina.exert(5);
        assert!(stamina.is_depleted());
        stamina.rest(9);
        assert_eq!(stamina.current(), 3);
    }

    #[test]
    fn velocity_without_displacement_or_ticks_is_inert() {
        assert!(Velocity::new(0, 0, 4).is_inert());
        assert!(Velocity::new(1, 0, 0).is_inert());
        assert!(!Velocity::step(0, -1).is_inert());
    }

    proptest! {
        #[test]
        fn health_stays_in_range_after_damage_then_heal(
            max in 0u32..1_000,
            damage in 0u32..u32::MAX,
            heal in 0u32..u32::MAX,
        ) {
            let mut health = Health::new(max);
            health.damage(damage);
            health.heal(heal);
            prop_assert!(health.current() <= health.max());
        }

        #[test]
        fn health_effects_stay_in_range(
            max in 0u32..1_000,
            heal in 0u32..u32::MAX,
            damage in 0u32..u32::MAX,
        ) {
            let mut health = Health::new(max);
            health.apply_effects(heal, damage);
            prop_assert!(health.current() <= health.max());
        }

        #[test]
        fn stamina_stays_in_range_after_exert_then_rest(
            max in 0u32..1_000,
            exert in 0u32..u32::MAX,
            rest in 0u32..u32::MAX,
        ) {
            let mut stamina = Stamina::new(max);
            stamina.exert(exert);
            stamina.rest(rest);
            prop_assert!(stamina.current() <= stamina.max());
        }
    }
}
