use crate::geometry::{FPoint, Point};

use super::RngOracle;

/// How an entity moves, which decides the tiles it may stand on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MovementType {
    #[default]
    Normal,
    Flying,
    Intangible,
}

/// Collision queries and occupancy updates used by the executors.
///
/// Positions are continuous; implementations resolve them to the tile
/// containing the point.
pub trait CollisionOracle {
    /// True when the tile is walkable and no entity blocks it.
    fn is_empty(&self, pos: FPoint) -> bool;

    /// True when the tile stops projectiles. Positions off the map count as
    /// walls.
    fn is_wall(&self, pos: FPoint) -> bool;

    /// True when an entity with the given movement type may stand at `pos`.
    fn is_valid_position(&self, pos: FPoint, movement: MovementType, is_hero: bool) -> bool;

    /// Picks a random tile within `radius` of `center` (the center itself
    /// excluded) and returns its center point. Unless `ignore_blocked` is set
    /// only empty tiles qualify. Returns `None` when nothing qualifies.
    fn random_neighbor(
        &self,
        center: Point,
        radius: u32,
        ignore_blocked: bool,
        rng: &mut dyn RngOracle,
    ) -> Option<FPoint>;

    /// Marks the tile at `pos` as occupied.
    fn block(&mut self, pos: FPoint);

    /// Clears the occupancy mark at `pos`.
    fn unblock(&mut self, pos: FPoint);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, tile: Point) -> bool {
        tile.x >= 0 && tile.y >= 0 && tile.x < self.width as i32 && tile.y < self.height as i32
    }
}

/// Static terrain class of a tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileKind {
    #[default]
    Floor,
    Wall,
    /// Impassable on foot but does not stop projectiles or fliers.
    Pit,
}

/// Rectangular tile map with an occupancy layer.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileGrid {
    dimensions: MapDimensions,
    tiles: Vec<TileKind>,
    occupied: Vec<bool>,
}

impl TileGrid {
    /// Creates an all-floor map.
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize;
        Self {
            dimensions: MapDimensions::new(width, height),
            tiles: vec![TileKind::Floor; len],
            occupied: vec![false; len],
        }
    }

    pub fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    pub fn tile(&self, tile: Point) -> Option<TileKind> {
        self.index(tile).map(|index| self.tiles[index])
    }

    pub fn set_tile(&mut self, tile: Point, kind: TileKind) {
        if let Some(index) = self.index(tile) {
            self.tiles[index] = kind;
        }
    }

    pub fn is_occupied(&self, tile: Point) -> bool {
        self.index(tile).is_some_and(|index| self.occupied[index])
    }

    pub fn set_occupied(&mut self, tile: Point, occupied: bool) {
        if let Some(index) = self.index(tile) {
            self.occupied[index] = occupied;
        }
    }

    fn index(&self, tile: Point) -> Option<usize> {
        self.dimensions
            .contains(tile)
            .then(|| tile.y as usize * self.dimensions.width as usize + tile.x as usize)
    }

    fn tile_is_empty(&self, tile: Point) -> bool {
        self.index(tile)
            .is_some_and(|index| self.tiles[index] == TileKind::Floor && !self.occupied[index])
    }
}

impl CollisionOracle for TileGrid {
    fn is_empty(&self, pos: FPoint) -> bool {
        self.tile_is_empty(pos.floor())
    }

    fn is_wall(&self, pos: FPoint) -> bool {
        !matches!(self.tile(pos.floor()), Some(TileKind::Floor | TileKind::Pit))
    }

    fn is_valid_position(&self, pos: FPoint, movement: MovementType, _is_hero: bool) -> bool {
        let tile = pos.floor();
        match movement {
            MovementType::Normal => self.tile_is_empty(tile),
            MovementType::Flying => {
                !self.is_occupied(tile)
                    && matches!(self.tile(tile), Some(TileKind::Floor | TileKind::Pit))
            }
            MovementType::Intangible => self.dimensions.contains(tile),
        }
    }

    fn random_neighbor(
        &self,
        center: Point,
        radius: u32,
        ignore_blocked: bool,
        rng: &mut dyn RngOracle,
    ) -> Option<FPoint> {
        let radius = radius as i32;
        let mut candidates = Vec::new();
        for y in (center.y - radius)..=(center.y + radius) {
            for x in (center.x - radius)..=(center.x + radius) {
                let tile = Point::new(x, y);
                if tile == center || !self.dimensions.contains(tile) {
                    continue;
                }
                if ignore_blocked || self.tile_is_empty(tile) {
                    candidates.push(tile);
                }
            }
        }
        if candidates.is_empty() {
            return None;
        }
        let pick = rng.below(candidates.len() as u32) as usize;
        Some(candidates[pick].center())
    }

    fn block(&mut self, pos: FPoint) {
        self.set_occupied(pos.floor(), true);
    }

    fn unblock(&mut self, pos: FPoint) {
        self.set_occupied(pos.floor(), false);
    }
}
