//! Dense action-ID encoding.
//!
//! An [`ActionCodec`] is built from a state snapshot for one player and maps
//! IDs to semantic actions and back. The same ID means different things
//! under different snapshots, so callers must re-snapshot after every
//! mutation.
//!
//! Deployment layout (T = catalog size, Z = zone cells, Q = queue length):
//!   [0, T)              purchase catalog entry t
//!   [T, T + Q*Z)        deploy queue entry i at zone cell c: T + i*Z + c
//!   T + Q*Z             finish deployment
//!
//! Execution layout:
//!   0                   pass
//!   then per unmoved live mobile asset (roster order), one ID per on-board
//!   cell within its speed, row-major, own cell included
//!   then one launch ID per unlaunched mobile asset on a friendly launch site
//!   then one scout ID per unacted asset with a visibility range

use crate::board::{Action, ActionId, AssetId, AssetType, Coord, GameState, Phase, Player, Zone};
use crate::catalog::AssetCatalog;

/// Reachable cells for one mobile asset.
#[derive(Debug, Clone, PartialEq, Eq)]
struct MoveBlock {
    asset: AssetId,
    /// First ID of the block.
    start: u32,
    /// Row-major, so sorted by `Coord`'s ordering.
    cells: Vec<Coord>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Layout {
    Empty,
    Deployment {
        types: Vec<AssetType>,
        queue: Vec<AssetId>,
        zone: Zone,
    },
    Execution {
        moves: Vec<MoveBlock>,
        launches: Vec<AssetId>,
        scouts: Vec<AssetId>,
    },
}

/// Bidirectional ID ↔ action mapping for one player's snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionCodec {
    player: Player,
    layout: Layout,
}

impl ActionCodec {
    /// Builds the action space `player` has in `state`. Players who are not
    /// on move, and phases that take no input, get an empty space.
    pub fn snapshot(state: &GameState, catalog: &AssetCatalog, player: Player) -> Self {
        let layout = if player != state.current {
            Layout::Empty
        } else {
            match state.phase {
                Phase::Deployment => Layout::Deployment {
                    types: catalog.definitions().iter().map(|d| d.asset_type).collect(),
                    queue: state.ledger(player).queue.clone(),
                    zone: state.dims().zone(player),
                },
                Phase::Movement => execution_layout(state, catalog, player),
                Phase::Combat | Phase::Scouting | Phase::Terminal => Layout::Empty,
            }
        };
        ActionCodec { player, layout }
    }

    pub fn player(&self) -> Player {
        self.player
    }

    /// Size of the ID space. Every ID below this decodes.
    pub fn len(&self) -> u32 {
        match &self.layout {
            Layout::Empty => 0,
            Layout::Deployment { types, queue, zone } => {
                (types.len() + queue.len() * zone.cell_count() + 1) as u32
            }
            Layout::Execution { moves, launches, scouts } => {
                1 + moves_len(moves) + launches.len() as u32 + scouts.len() as u32
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maps an ID to its action, or `None` if it is out of range.
    pub fn decode(&self, id: ActionId) -> Option<Action> {
        match &self.layout {
            Layout::Empty => None,
            Layout::Deployment { types, queue, zone } => {
                let t = types.len() as u32;
                if id < t {
                    return Some(Action::Purchase { asset_type: types[id as usize] });
                }
                let z = zone.cell_count();
                let rel = (id - t) as usize;
                if rel == queue.len() * z {
                    return Some(Action::FinishDeployment);
                }
                let asset = *queue.get(rel / z.max(1))?;
                let to = zone.cell(rel % z.max(1))?;
                Some(Action::Deploy { asset, to })
            }
            Layout::Execution { moves, launches, scouts } => {
                if id == 0 {
                    return Some(Action::Pass);
                }
                let mut rel = id - 1;
                for block in moves {
                    let n = block.cells.len() as u32;
                    if rel < n {
                        return Some(Action::Move { asset: block.asset, to: block.cells[rel as usize] });
                    }
                    rel -= n;
                }
                if let Some(&asset) = launches.get(rel as usize) {
                    return Some(Action::Launch { asset });
                }
                rel -= launches.len() as u32;
                scouts.get(rel as usize).map(|&asset| Action::Scout { asset })
            }
        }
    }

    /// Maps an action to its ID, or `None` if it has no ID in this snapshot.
    pub fn encode(&self, action: &Action) -> Option<ActionId> {
        match (&self.layout, action) {
            (Layout::Deployment { types, .. }, Action::Purchase { asset_type }) => {
                types.iter().position(|t| t == asset_type).map(|i| i as u32)
            }
            (Layout::Deployment { types, queue, zone }, Action::Deploy { asset, to }) => {
                let i = queue.iter().position(|q| q == asset)?;
                let c = zone.index_of(*to)?;
                Some((types.len() + i * zone.cell_count() + c) as u32)
            }
            (Layout::Deployment { types, queue, zone }, Action::FinishDeployment) => {
                Some((types.len() + queue.len() * zone.cell_count()) as u32)
            }
            (Layout::Execution { .. }, Action::Pass) => Some(0),
            (Layout::Execution { moves, .. }, Action::Move { asset, to }) => {
                let block = moves.iter().find(|b| b.asset == *asset)?;
                let offset = block.cells.binary_search(to).ok()?;
                Some(1 + block.start + offset as u32)
            }
            (Layout::Execution { moves, launches, .. }, Action::Launch { asset }) => {
                let i = launches.iter().position(|a| a == asset)?;
                Some(1 + moves_len(moves) + i as u32)
            }
            (Layout::Execution { moves, launches, scouts }, Action::Scout { asset }) => {
                let i = scouts.iter().position(|a| a == asset)?;
                Some(1 + moves_len(moves) + launches.len() as u32 + i as u32)
            }
            _ => None,
        }
    }

    /// Every (ID, action) pair in ID order.
    pub fn iter(&self) -> impl Iterator<Item = (ActionId, Action)> + '_ {
        (0..self.len()).filter_map(move |id| self.decode(id).map(|a| (id, a)))
    }
}

fn moves_len(moves: &[MoveBlock]) -> u32 {
    moves.last().map_or(0, |b| b.start + b.cells.len() as u32)
}

fn execution_layout(state: &GameState, catalog: &AssetCatalog, player: Player) -> Layout {
    let dims = state.dims();
    let mut moves = Vec::new();
    let mut launches = Vec::new();
    let mut scouts = Vec::new();
    let mut start = 0u32;

    for asset in state.roster(player) {
        let Some(def) = catalog.get(asset.asset_type) else {
            continue;
        };
        let Some(pos) = asset.position else {
            continue;
        };
        if def.is_mobile && !asset.has_moved {
            let cells = dims.ball(pos, def.speed);
            let n = cells.len() as u32;
            moves.push(MoveBlock { asset: asset.id, start, cells });
            start += n;
        }
        if def.is_mobile && !asset.is_active && state.board.has_launch_site(pos, player) {
            launches.push(asset.id);
        }
        if def.can_scout() && !asset.has_acted {
            scouts.push(asset.id);
        }
    }

    Layout::Execution { moves, launches, scouts }
}
