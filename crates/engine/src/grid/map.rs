use super::TilePoint;
use thiserror::Error;

/// Gid 0 marks "nothing authored here" in every layer.
pub const EMPTY_GID: u16 = 0;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TileLayerError {
    #[error("tile layer of {width}x{height} expects {expected} gids, got {actual}")]
    GidCountMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

/// One rectangular layer of tile gids. Reads outside the authored rectangle
/// return `None`; there is nothing present outside the data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileLayer {
    width: u32,
    height: u32,
    gids: Vec<u16>,
}

impl TileLayer {
    pub fn new(width: u32, height: u32, gids: Vec<u16>) -> Result<Self, TileLayerError> {
        let expected = (width as usize) * (height as usize);
        if gids.len() != expected {
            return Err(TileLayerError::GidCountMismatch {
                width,
                height,
                expected,
                actual: gids.len(),
            });
        }
        Ok(Self {
            width,
            height,
            gids,
        })
    }

    pub fn filled(width: u32, height: u32, gid: u16) -> Self {
        Self {
            width,
            height,
            gids: vec![gid; (width as usize) * (height as usize)],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn in_bounds(&self, tile: TilePoint) -> bool {
        tile.x >= 0 && tile.y >= 0 && (tile.x as u32) < self.width && (tile.y as u32) < self.height
    }

    pub fn gid_at(&self, tile: TilePoint) -> Option<u16> {
        if !self.in_bounds(tile) {
            return None;
        }
        let index = (tile.y as usize) * (self.width as usize) + tile.x as usize;
        self.gids.get(index).copied()
    }

    pub fn set_gid(&mut self, tile: TilePoint, gid: u16) {
        if !self.in_bounds(tile) {
            return;
        }
        let index = (tile.y as usize) * (self.width as usize) + tile.x as usize;
        self.gids[index] = gid;
    }

    /// Collision semantics: any authored (non-empty) gid blocks.
    pub fn blocks(&self, tile: TilePoint) -> bool {
        matches!(self.gid_at(tile), Some(gid) if gid != EMPTY_GID)
    }
}
