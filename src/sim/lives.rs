//! Lives, the HUD heart icons and the numeric counter

use glam::Vec2;

use super::entity::{Body, EntityId, EntityKind};
use super::registry::EntityRegistry;
use crate::consts::{HEART_CAP, HEART_SIZE, LIFE_COUNTER_SIZE};
use crate::platform::VisualHandle;

/// Colour of the numeric life counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifeColor {
    Green,
    Yellow,
    Red,
}

impl LifeColor {
    pub fn for_lives(lives: u8) -> Self {
        match lives {
            3.. => LifeColor::Green,
            2 => LifeColor::Yellow,
            _ => LifeColor::Red,
        }
    }
}

/// Numeric life display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifeCounter {
    pub text: String,
    pub color: LifeColor,
}

impl LifeCounter {
    fn showing(lives: u8) -> Self {
        Self {
            text: lives.to_string(),
            color: LifeColor::for_lives(lives),
        }
    }
}

/// Remaining lives with one HUD icon per life
#[derive(Debug, Clone)]
pub struct Lives {
    left: u8,
    /// Icon ids, oldest first; the last one is removed on life loss
    slots: Vec<EntityId>,
    counter: LifeCounter,
}

impl Default for Lives {
    fn default() -> Self {
        Self::new()
    }
}

impl Lives {
    pub fn new() -> Self {
        Self {
            left: 0,
            slots: Vec::with_capacity(HEART_CAP as usize),
            counter: LifeCounter::showing(0),
        }
    }

    pub fn left(&self) -> u8 {
        self.left
    }

    pub fn slots(&self) -> &[EntityId] {
        &self.slots
    }

    pub fn counter(&self) -> &LifeCounter {
        &self.counter
    }

    /// HUD position of the icon for slot `index`
    pub fn slot_position(index: u8, playfield: Vec2) -> Vec2 {
        Vec2::new(
            LIFE_COUNTER_SIZE + 5.0 + index as f32 * (HEART_SIZE + 2.0),
            playfield.y - LIFE_COUNTER_SIZE,
        )
    }

    /// Grant a life and show its icon; no-op at the cap
    pub fn add_heart(&mut self, registry: &mut EntityRegistry, visual: VisualHandle, playfield: Vec2) -> bool {
        if self.left >= HEART_CAP {
            return false;
        }
        let pos = Self::slot_position(self.left, playfield);
        let icon = registry.add(Body::new(pos, Vec2::splat(HEART_SIZE), visual), EntityKind::LifeIcon);
        self.slots.push(icon);
        self.left += 1;
        self.counter = LifeCounter::showing(self.left);
        debug_assert_eq!(self.slots.len(), self.left as usize);
        true
    }

    /// Take a life and remove its icon; no-op with no lives left
    pub fn lose_life(&mut self, registry: &mut EntityRegistry) -> bool {
        let Some(icon) = self.slots.pop() else {
            return false;
        };
        registry.remove(icon);
        self.left -= 1;
        self.counter = LifeCounter::showing(self.left);
        debug_assert_eq!(self.slots.len(), self.left as usize);
        true
    }
}
