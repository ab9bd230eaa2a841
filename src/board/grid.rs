//! Spatial index of deployed assets.
//!
//! Uses a dense vector of cells indexed row-major, so occupancy lookups are
//! O(1) and iteration order is deterministic.

use std::collections::BTreeMap;

use super::asset::{AssetId, AssetType};
use super::coord::{Coord, Dims, Player};
use crate::error::EngineError;

/// An asset occupying a cell, with the facts placement rules need.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Occupant {
    pub id: AssetId,
    pub owner: Player,
    pub asset_type: AssetType,
    pub is_mobile: bool,
}

/// Coordinate → ordered set of live assets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    dims: Dims,
    cells: Vec<Vec<Occupant>>,
    positions: BTreeMap<AssetId, Coord>,
}

impl Board {
    /// Creates an empty board.
    pub fn new(dims: Dims) -> Self {
        Board {
            dims,
            cells: vec![Vec::new(); dims.cell_count()],
            positions: BTreeMap::new(),
        }
    }

    pub fn dims(&self) -> Dims {
        self.dims
    }

    /// Checks whether `occupant` could be placed at `coord` without placing it.
    pub fn check_place(&self, occupant: &Occupant, coord: Coord) -> Result<(), EngineError> {
        if !self.dims.contains(coord) {
            return Err(EngineError::OutOfBounds(coord));
        }
        if occupant.is_mobile {
            if !self.has_launch_site(coord, occupant.owner) {
                return Err(EngineError::NoLaunchSite(coord));
            }
        } else if self.static_occupant(coord).is_some() {
            return Err(EngineError::OccupiedStatic(coord));
        }
        Ok(())
    }

    /// Places an asset. A static asset needs a cell free of other statics;
    /// a mobile asset needs a friendly launch site. Fails without mutating.
    pub fn place(&mut self, occupant: Occupant, coord: Coord) -> Result<(), EngineError> {
        self.check_place(&occupant, coord)?;
        self.insert(occupant, coord);
        Ok(())
    }

    /// Moves an asset already on the board. Movement ignores launch-site
    /// rules; only the grid bounds apply.
    pub fn relocate(&mut self, id: AssetId, to: Coord) -> Result<(), EngineError> {
        if !self.dims.contains(to) {
            return Err(EngineError::OutOfBounds(to));
        }
        let occupant = self.take(id).ok_or(EngineError::NotOnBoard(id))?;
        self.insert(occupant, to);
        Ok(())
    }

    /// Removes an asset, returning the cell it occupied.
    pub fn remove(&mut self, id: AssetId) -> Option<Coord> {
        let coord = self.positions.get(&id).copied()?;
        self.take(id);
        Some(coord)
    }

    /// Every asset at `coord`, in arrival order.
    pub fn occupants_at(&self, coord: Coord) -> &[Occupant] {
        if !self.dims.contains(coord) {
            return &[];
        }
        &self.cells[self.dims.index_of(coord)]
    }

    /// The static asset at `coord`, if any.
    pub fn static_occupant(&self, coord: Coord) -> Option<&Occupant> {
        self.occupants_at(coord).iter().find(|o| !o.is_mobile)
    }

    /// True if `owner` has a launch site at `coord`.
    pub fn has_launch_site(&self, coord: Coord, owner: Player) -> bool {
        self.static_occupant(coord)
            .is_some_and(|o| o.owner == owner && o.asset_type.is_launch_site())
    }

    pub fn position_of(&self, id: AssetId) -> Option<Coord> {
        self.positions.get(&id).copied()
    }

    /// Number of assets on the board.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Occupied cells in row-major order.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (Coord, &[Occupant])> {
        let cols = self.dims.cols as usize;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| !cell.is_empty())
            .map(move |(i, cell)| (Coord::new((i / cols) as u16, (i % cols) as u16), cell.as_slice()))
    }

    fn insert(&mut self, occupant: Occupant, coord: Coord) {
        let idx = self.dims.index_of(coord);
        self.cells[idx].push(occupant);
        self.positions.insert(occupant.id, coord);
    }

    fn take(&mut self, id: AssetId) -> Option<Occupant> {
        let coord = self.positions.remove(&id)?;
        let cell = &mut self.cells[self.dims.index_of(coord)];
        let pos = cell.iter().position(|o| o.id == id)?;
        Some(cell.remove(pos))
    }
}
