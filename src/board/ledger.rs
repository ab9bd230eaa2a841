//! Per-player economy and roster.

use serde::Serialize;

use super::asset::{AssetDefinition, AssetId, AssetType};
use crate::error::EngineError;

/// A player's purchase balance, victory points, and asset lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerLedger {
    /// Purchase points left. Only ever decreases.
    pub balance: u32,
    pub victory_points: i32,
    /// Purchased assets awaiting placement, in purchase order.
    pub queue: Vec<AssetId>,
    /// Live assets on the board, in deployment order.
    pub roster: Vec<AssetId>,
    pub has_citadel: bool,
    /// A citadel has been bought, whether or not it is deployed yet.
    pub citadel_purchased: bool,
    /// Set once the player's citadel has been destroyed.
    pub citadel_lost: bool,
    /// Number of deployed, live launch sites.
    pub launch_sites: u32,
    /// The player has finished deploying.
    pub deployment_ready: bool,
}

impl PlayerLedger {
    pub fn new(balance: u32, victory_points: i32) -> Self {
        PlayerLedger {
            balance,
            victory_points,
            queue: Vec::new(),
            roster: Vec::new(),
            has_citadel: false,
            citadel_purchased: false,
            citadel_lost: false,
            launch_sites: 0,
            deployment_ready: false,
        }
    }

    /// Checks whether an asset of this definition may be bought right now.
    pub fn check_purchase(&self, def: &AssetDefinition) -> Result<(), EngineError> {
        if self.balance < def.cost {
            return Err(EngineError::InsufficientFunds {
                asset: def.asset_type,
                required: def.cost,
                available: self.balance,
            });
        }
        if def.asset_type == AssetType::Citadel && (self.has_citadel || self.citadel_purchased) {
            return Err(EngineError::CitadelAlreadyOwned);
        }
        if def.is_mobile && !def.asset_type.is_launch_site() && self.launch_sites == 0 {
            return Err(EngineError::NoLaunchSiteForMobile(def.asset_type));
        }
        Ok(())
    }

    /// Debits the balance and enqueues `id`. Fails without mutating.
    pub fn purchase(&mut self, def: &AssetDefinition, id: AssetId) -> Result<(), EngineError> {
        self.check_purchase(def)?;
        self.balance -= def.cost;
        self.queue.push(id);
        if def.asset_type == AssetType::Citadel {
            self.citadel_purchased = true;
        }
        Ok(())
    }

    /// Position of `id` in the purchased queue.
    pub fn queue_position(&self, id: AssetId) -> Option<usize> {
        self.queue.iter().position(|&q| q == id)
    }

    /// Moves a placed asset from the queue to the roster.
    pub fn record_deployment(&mut self, id: AssetId, asset_type: AssetType) {
        if let Some(pos) = self.queue_position(id) {
            self.queue.remove(pos);
        }
        self.roster.push(id);
        match asset_type {
            AssetType::Citadel => self.has_citadel = true,
            t if t.is_launch_site() => self.launch_sites += 1,
            _ => {}
        }
    }

    /// Drops a destroyed asset from the roster. Returns true if it was the
    /// citadel, in which case `citadel_penalty` is charged.
    pub fn record_loss(&mut self, id: AssetId, asset_type: AssetType, citadel_penalty: i32) -> bool {
        self.roster.retain(|&r| r != id);
        match asset_type {
            AssetType::Citadel => {
                self.has_citadel = false;
                self.citadel_lost = true;
                self.victory_points = self.victory_points.saturating_sub(citadel_penalty);
                true
            }
            t if t.is_launch_site() => {
                self.launch_sites = self.launch_sites.saturating_sub(1);
                false
            }
            _ => false,
        }
    }

    /// Deducts victory points.
    pub fn apply_penalty(&mut self, amount: i32) {
        self.victory_points = self.victory_points.saturating_sub(amount);
    }

    /// A citadel is deployed and nothing is left to place.
    pub fn is_deployment_complete(&self) -> bool {
        self.has_citadel && self.queue.is_empty()
    }

    /// Out of victory points or without a citadel.
    pub fn is_defeated(&self) -> bool {
        self.victory_points <= 0 || self.citadel_lost
    }
}
