//! Asset kinds, their static definitions, and live instances.
//!
//! Definitions are immutable and live in the shared catalog. Instances are
//! owned by the game state's arena and addressed by a stable [`AssetId`].

use std::fmt;

use serde::{Deserialize, Serialize};

use super::coord::{Coord, Player};

/// The kind of a military asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetType {
    Citadel,
    LaunchSite,
    Icbm,
    CruiseMissile,
    Artillery,
    LongRangeInterceptor,
    ShortRangeInterceptor,
    #[serde(rename = "POINT_DEFENSE_INTERCEPTOR")]
    PointDefense,
    Satellite,
    ReconPlane,
    LongRangeRadar,
    ShortRangeRadar,
}

/// Number of asset kinds.
pub const ASSET_TYPE_COUNT: usize = 12;

/// All asset kinds in canonical order.
pub const ALL_ASSET_TYPES: [AssetType; ASSET_TYPE_COUNT] = [
    AssetType::Citadel,
    AssetType::LaunchSite,
    AssetType::Icbm,
    AssetType::CruiseMissile,
    AssetType::Artillery,
    AssetType::LongRangeInterceptor,
    AssetType::ShortRangeInterceptor,
    AssetType::PointDefense,
    AssetType::Satellite,
    AssetType::ReconPlane,
    AssetType::LongRangeRadar,
    AssetType::ShortRangeRadar,
];

impl AssetType {
    /// Returns the canonical upper-case name used in catalog files.
    pub const fn name(self) -> &'static str {
        match self {
            AssetType::Citadel => "CITADEL",
            AssetType::LaunchSite => "LAUNCH_SITE",
            AssetType::Icbm => "ICBM",
            AssetType::CruiseMissile => "CRUISE_MISSILE",
            AssetType::Artillery => "ARTILLERY",
            AssetType::LongRangeInterceptor => "LONG_RANGE_INTERCEPTOR",
            AssetType::ShortRangeInterceptor => "SHORT_RANGE_INTERCEPTOR",
            AssetType::PointDefense => "POINT_DEFENSE_INTERCEPTOR",
            AssetType::Satellite => "SATELLITE",
            AssetType::ReconPlane => "RECON_PLANE",
            AssetType::LongRangeRadar => "LONG_RANGE_RADAR",
            AssetType::ShortRangeRadar => "SHORT_RANGE_RADAR",
        }
    }

    /// True for the static asset mobile assets deploy onto and launch from.
    pub const fn is_launch_site(self) -> bool {
        matches!(self, AssetType::LaunchSite)
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Immutable per-type statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetDefinition {
    #[serde(rename = "type")]
    pub asset_type: AssetType,
    pub cost: u32,
    pub is_mobile: bool,
    /// Manhattan movement budget per turn.
    #[serde(default)]
    pub speed: u32,
    #[serde(default, alias = "range")]
    pub weapon_range: u32,
    /// Scouting radius; zero means the asset cannot scout.
    #[serde(default)]
    pub visibility_range: u32,
}

impl AssetDefinition {
    pub const fn can_scout(&self) -> bool {
        self.visibility_range > 0
    }
}

/// Stable identity of an asset instance, issued in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(pub u32);

impl AssetId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A purchased asset, deployed or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetInstance {
    pub id: AssetId,
    pub asset_type: AssetType,
    pub owner: Player,
    /// Unset while the asset waits in the purchased queue.
    pub position: Option<Coord>,
    /// A mobile asset that has been launched or has moved.
    pub is_active: bool,
    pub is_destroyed: bool,
    pub has_moved: bool,
    pub has_acted: bool,
}

impl AssetInstance {
    pub fn new(id: AssetId, asset_type: AssetType, owner: Player) -> Self {
        AssetInstance {
            id,
            asset_type,
            owner,
            position: None,
            is_active: false,
            is_destroyed: false,
            has_moved: false,
            has_acted: false,
        }
    }

    /// True while the asset is on the board and not destroyed.
    pub fn is_live(&self) -> bool {
        !self.is_destroyed && self.position.is_some()
    }

    /// Clears the per-turn flags at the start of the owner's turn.
    pub fn reset_turn_flags(&mut self) {
        self.has_moved = false;
        self.has_acted = false;
    }
}
