mod map;
mod mover;
mod objects;

pub use map::{TileLayer, TileLayerError, EMPTY_GID};
pub use mover::{GridMover, MoverConfig, MoverTick, StepArrival, StepStart};
pub use objects::{parse_world_objects, PlacementRecord, WorldObject, WorldObjectError};

/// Side length of one grid tile in pixels.
pub const TILE_SIZE_PX: f32 = 16.0;

/// Character sprites anchor at their bottom-center, so the anchor pixel of a
/// tile sits half a tile right and a full tile down from the tile's top-left
/// corner.
pub const ANCHOR_OFFSET_X_PX: f32 = TILE_SIZE_PX / 2.0;
pub const ANCHOR_OFFSET_Y_PX: f32 = TILE_SIZE_PX;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TilePoint {
    pub x: i32,
    pub y: i32,
}

impl TilePoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, facing: Facing) -> Self {
        let (dx, dy) = facing.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn manhattan_distance(self, other: Self) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facing {
    Up,
    Down,
    Left,
    Right,
}

impl Facing {
    pub const ALL: [Facing; 4] = [Facing::Up, Facing::Down, Facing::Left, Facing::Right];

    pub const fn delta(self) -> (i32, i32) {
        match self {
            Facing::Up => (0, -1),
            Facing::Down => (0, 1),
            Facing::Left => (-1, 0),
            Facing::Right => (1, 0),
        }
    }

    /// Facing that looks from `from` toward `to`. Horizontal difference wins
    /// over vertical; `None` when the tiles are identical.
    pub fn toward(from: TilePoint, to: TilePoint) -> Option<Facing> {
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        if dx < 0 {
            Some(Facing::Left)
        } else if dx > 0 {
            Some(Facing::Right)
        } else if dy < 0 {
            Some(Facing::Up)
        } else if dy > 0 {
            Some(Facing::Down)
        } else {
            None
        }
    }
}

/// Pixel position of the sprite anchor for a tile.
pub fn tile_anchor_px(tile: TilePoint) -> Vec2 {
    Vec2 {
        x: tile.x as f32 * TILE_SIZE_PX + ANCHOR_OFFSET_X_PX,
        y: tile.y as f32 * TILE_SIZE_PX + ANCHOR_OFFSET_Y_PX,
    }
}

/// Tile whose anchor is nearest to a pixel position. The tile coordinate is
/// always derived from the continuous position, never stored alongside it.
pub fn tile_from_anchor_px(position: Vec2) -> TilePoint {
    TilePoint {
        x: ((position.x - ANCHOR_OFFSET_X_PX) / TILE_SIZE_PX).round() as i32,
        y: ((position.y - ANCHOR_OFFSET_Y_PX) / TILE_SIZE_PX).round() as i32,
    }
}

/// Tiles at exactly `radius` Manhattan distance from `center`, in the fixed
/// scan order used by the diamond searches: left to right, below before above.
pub fn manhattan_ring(center: TilePoint, radius: i32) -> Vec<TilePoint> {
    let mut ring = Vec::new();
    for dx in -radius..=radius {
        let dy = radius - dx.abs();
        ring.push(TilePoint::new(center.x + dx, center.y + dy));
        if dy != 0 {
            ring.push(TilePoint::new(center.x + dx, center.y - dy));
        }
    }
    ring
}

/// Expanding diamond search: the origin itself, then rings of growing
/// Manhattan radius up to `max_radius`. Returns the first tile accepted by
/// the predicate.
pub fn find_nearest_tile(
    origin: TilePoint,
    max_radius: i32,
    mut accepts: impl FnMut(TilePoint) -> bool,
) -> Option<TilePoint> {
    if accepts(origin) {
        return Some(origin);
    }
    for radius in 1..=max_radius {
        for candidate in manhattan_ring(origin, radius) {
            if accepts(candidate) {
                return Some(candidate);
            }
        }
    }
    None
}
