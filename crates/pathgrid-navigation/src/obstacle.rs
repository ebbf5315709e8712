//! Obstacle input consumed once while a grid is built.
//!
//! The grid never talks to a physics or rendering engine directly. Whatever
//! owns the scene geometry implements [`ObstacleSource`] and hands over a
//! snapshot of `(position, bounds, layer)` tuples; the snapshot is discarded
//! once rasterization is done.

use std::fmt;

use nalgebra::Vector2;

use crate::map::{Aabb, WorldPoint};

/// Bitmask selecting which layers count as obstacles.
///
/// Bit `n` selects layer `n`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct LayerMask(pub u32);

impl LayerMask {
    /// Selects no layer; nothing is treated as an obstacle.
    pub const NONE: LayerMask = LayerMask(0);
    /// Selects every layer.
    pub const ALL: LayerMask = LayerMask(u32::MAX);

    /// Builds a mask selecting each listed layer. Layers of 32 and above are ignored.
    #[must_use]
    pub fn from_layers(layers: &[u8]) -> Self {
        LayerMask(layers.iter().fold(0, |acc, &layer| acc | layer_bit(layer)))
    }

    /// Returns true if the mask selects `layer`.
    #[must_use]
    pub fn contains_layer(self, layer: u8) -> bool {
        self.intersects(layer_bit(layer))
    }

    /// Returns true if any bit of `bits` is selected.
    #[must_use]
    pub fn intersects(self, bits: u32) -> bool {
        self.0 & bits != 0
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        LayerMask::ALL
    }
}

impl fmt::Display for LayerMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

fn layer_bit(layer: u8) -> u32 {
    1u32.checked_shl(u32::from(layer)).unwrap_or(0)
}

/// A world-space volume that may block cells.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Obstacle {
    /// Pivot position of the obstacle on the ground plane.
    pub position: WorldPoint,
    /// Planar footprint of the obstacle.
    pub bounds: Aabb,
    /// Layer classification of the obstacle (0-31).
    pub layer: u8,
}

impl Obstacle {
    /// Creates an obstacle from its pivot, footprint and layer.
    #[must_use]
    pub fn new(position: WorldPoint, bounds: Aabb, layer: u8) -> Self {
        Self {
            position,
            bounds,
            layer,
        }
    }

    /// Creates an obstacle whose footprint of `size` is centered on its pivot.
    #[must_use]
    pub fn centered(position: WorldPoint, size: Vector2<f32>, layer: u8) -> Self {
        Self::new(position, Aabb::from_center_size(position, size), layer)
    }

    /// Single-bit mask of this obstacle's layer, or 0 for layers outside 0-31.
    #[must_use]
    pub fn layer_bit(&self) -> u32 {
        layer_bit(self.layer)
    }
}

/// Supplies the obstacles present in the scene when a grid is built.
pub trait ObstacleSource {
    /// Returns every candidate obstacle; layer filtering happens in the grid.
    fn obstacles(&self) -> Vec<Obstacle>;
}

impl ObstacleSource for [Obstacle] {
    fn obstacles(&self) -> Vec<Obstacle> {
        self.to_vec()
    }
}

impl<const N: usize> ObstacleSource for [Obstacle; N] {
    fn obstacles(&self) -> Vec<Obstacle> {
        self.to_vec()
    }
}

impl ObstacleSource for Vec<Obstacle> {
    fn obstacles(&self) -> Vec<Obstacle> {
        self.clone()
    }
}

impl<F> ObstacleSource for F
where
    F: Fn() -> Vec<Obstacle>,
{
    fn obstacles(&self) -> Vec<Obstacle> {
        self()
    }
}
