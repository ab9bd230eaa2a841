//! Asset catalog: immutable per-type statistics.
//!
//! Loaded once (from JSON or the built-in table) and shared read-only by
//! `Arc` across every engine instance.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::board::{AssetDefinition, AssetType};
use crate::error::{CatalogError, EngineError};

/// Environment variable naming a catalog JSON file.
pub const ASSET_DEF_VAR: &str = "ASSET_DEF";

/// Definitions in catalog-definition order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetCatalog {
    defs: Vec<AssetDefinition>,
}

const fn def(
    asset_type: AssetType,
    cost: u32,
    is_mobile: bool,
    speed: u32,
    weapon_range: u32,
    visibility_range: u32,
) -> AssetDefinition {
    AssetDefinition { asset_type, cost, is_mobile, speed, weapon_range, visibility_range }
}

/// The built-in rule set.
const STANDARD: [AssetDefinition; 12] = [
    def(AssetType::Citadel, 0, false, 0, 0, 0),
    def(AssetType::LaunchSite, 10, false, 0, 0, 0),
    def(AssetType::Icbm, 25, true, 8, 1, 0),
    def(AssetType::CruiseMissile, 15, true, 4, 1, 0),
    def(AssetType::Artillery, 10, false, 0, 3, 0),
    def(AssetType::LongRangeInterceptor, 20, true, 6, 2, 0),
    def(AssetType::ShortRangeInterceptor, 10, true, 3, 1, 0),
    def(AssetType::PointDefense, 8, false, 0, 1, 0),
    def(AssetType::Satellite, 30, true, 10, 0, 4),
    def(AssetType::ReconPlane, 15, true, 5, 0, 3),
    def(AssetType::LongRangeRadar, 20, false, 0, 0, 6),
    def(AssetType::ShortRangeRadar, 10, false, 0, 0, 3),
];

impl AssetCatalog {
    /// Validates and wraps a list of definitions.
    ///
    /// The list must be non-empty, free of duplicates, and contain a
    /// citadel, plus a launch site whenever any mobile asset is defined.
    pub fn new(defs: Vec<AssetDefinition>) -> Result<Self, CatalogError> {
        if defs.is_empty() {
            return Err(EngineError::CatalogMissing(None).into());
        }
        for (i, d) in defs.iter().enumerate() {
            if defs[..i].iter().any(|prev| prev.asset_type == d.asset_type) {
                return Err(CatalogError::Duplicate(d.asset_type));
            }
        }
        let has = |t: AssetType| defs.iter().any(|d| d.asset_type == t);
        if !has(AssetType::Citadel) {
            return Err(EngineError::CatalogMissing(Some(AssetType::Citadel)).into());
        }
        if defs.iter().any(|d| d.is_mobile) && !defs.iter().any(|d| d.asset_type.is_launch_site()) {
            return Err(EngineError::CatalogMissing(Some(AssetType::LaunchSite)).into());
        }
        Ok(AssetCatalog { defs })
    }

    /// The built-in twelve-asset rule set.
    pub fn standard() -> Self {
        AssetCatalog { defs: STANDARD.to_vec() }
    }

    /// Parses a JSON array of definitions.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let defs: Vec<AssetDefinition> = serde_json::from_str(json)?;
        Self::new(defs)
    }

    /// Number of asset types in the catalog.
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Definitions in catalog order.
    pub fn definitions(&self) -> &[AssetDefinition] {
        &self.defs
    }

    pub fn get(&self, asset_type: AssetType) -> Option<&AssetDefinition> {
        self.defs.iter().find(|d| d.asset_type == asset_type)
    }

    /// Looks up a definition, failing with `CatalogMissing` if absent.
    pub fn require(&self, asset_type: AssetType) -> Result<&AssetDefinition, EngineError> {
        self.get(asset_type).ok_or(EngineError::CatalogMissing(Some(asset_type)))
    }

    /// Catalog-order index of a type.
    pub fn position_of(&self, asset_type: AssetType) -> Option<usize> {
        self.defs.iter().position(|d| d.asset_type == asset_type)
    }

    /// How many units of each type `balance` could buy, in catalog order.
    /// The citadel is capped at one, and at zero once it has been bought.
    pub fn affordable_counts(&self, balance: u32, citadel_purchased: bool) -> Vec<(AssetType, u32)> {
        self.defs
            .iter()
            .map(|d| {
                let count = match (d.asset_type, d.cost) {
                    (AssetType::Citadel, _) => u32::from(!citadel_purchased),
                    (_, 0) => u32::MAX,
                    (_, cost) => balance / cost,
                };
                (d.asset_type, count)
            })
            .collect()
    }
}

impl Default for AssetCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

/// Loads a catalog from a JSON file.
pub fn load_catalog(path: &Path) -> Result<AssetCatalog, CatalogError> {
    let data = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog = AssetCatalog::from_json_str(&data)?;
    info!(path = %path.display(), types = catalog.len(), "loaded asset catalog");
    Ok(catalog)
}

/// Loads the catalog named by `ASSET_DEF`, or the standard one if unset.
pub fn load_catalog_from_env() -> Result<AssetCatalog, CatalogError> {
    load_catalog_from(std::env::var_os(ASSET_DEF_VAR).map(PathBuf::from))
}

fn load_catalog_from(path: Option<PathBuf>) -> Result<AssetCatalog, CatalogError> {
    match path {
        Some(path) if !path.exists() => Err(CatalogError::MissingFile { var: ASSET_DEF_VAR, path }),
        Some(path) => load_catalog(&path),
        None => Ok(AssetCatalog::standard()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_is_valid() {
        let standard = AssetCatalog::standard();
        assert_eq!(standard.len(), 12);
        let rebuilt = AssetCatalog::new(standard.definitions().to_vec()).unwrap();
        assert_eq!(rebuilt, standard);
        assert_eq!(standard.position_of(AssetType::Citadel), Some(0));
        assert_eq!(standard.position_of(AssetType::ShortRangeRadar), Some(11));
        assert_eq!(standard.require(AssetType::Icbm).map(|d| d.cost), Ok(25));
    }

    #[test]
    fn json_order_is_preserved() {
        let json = r#"[
            {"type":"LAUNCH_SITE","cost":10,"is_mobile":false},
            {"type":"RECON_PLANE","cost":15,"is_mobile":true,"speed":5,"visibility_range":3},
            {"type":"CITADEL","cost":0,"is_mobile":false}
        ]"#;
        let catalog = AssetCatalog::from_json_str(json).unwrap();
        let order: Vec<AssetType> = catalog.definitions().iter().map(|d| d.asset_type).collect();
        assert_eq!(order, vec![AssetType::LaunchSite, AssetType::ReconPlane, AssetType::Citadel]);
        assert_eq!(catalog.require(AssetType::Icbm), Err(EngineError::CatalogMissing(Some(AssetType::Icbm))));
    }

    #[test]
    fn empty_catalog_is_rejected() {
        let err = AssetCatalog::from_json_str("[]").unwrap_err();
        assert!(matches!(err, CatalogError::Invalid(EngineError::CatalogMissing(None))));
    }

    #[test]
    fn catalog_without_citadel_is_rejected() {
        let json = r#"[{"type":"LAUNCH_SITE","cost":10,"is_mobile":false}]"#;
        let err = AssetCatalog::from_json_str(json).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Invalid(EngineError::CatalogMissing(Some(AssetType::Citadel)))
        ));
    }

    #[test]
    fn mobile_without_launch_site_is_rejected() {
        let json = r#"[
            {"type":"CITADEL","cost":0,"is_mobile":false},
            {"type":"ICBM","cost":25,"is_mobile":true,"speed":8}
        ]"#;
        let err = AssetCatalog::from_json_str(json).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Invalid(EngineError::CatalogMissing(Some(AssetType::LaunchSite)))
        ));
    }

    #[test]
    fn duplicate_type_is_rejected() {
        let json = r#"[
            {"type":"CITADEL","cost":0,"is_mobile":false},
            {"type":"CITADEL","cost":5,"is_mobile":false}
        ]"#;
        let err = AssetCatalog::from_json_str(json).unwrap_err();
        assert!(matches!(err, CatalogError::Duplicate(AssetType::Citadel)));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = AssetCatalog::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn affordable_counts_cap_citadel() {
        let counts = AssetCatalog::standard().affordable_counts(125, false);
        assert_eq!(counts[0], (AssetType::Citadel, 1));
        assert_eq!(counts[1], (AssetType::LaunchSite, 12));
        assert_eq!(counts[2], (AssetType::Icbm, 5));
        assert_eq!(counts[8], (AssetType::Satellite, 4));

        let counts = AssetCatalog::standard().affordable_counts(125, true);
        assert_eq!(counts[0], (AssetType::Citadel, 0));
        assert_eq!(counts[1], (AssetType::LaunchSite, 12));
    }

    #[test]
    fn load_catalog_reports_missing_file() {
        let err = load_catalog(Path::new("/nonexistent/assets.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }

    #[test]
    fn missing_env_file_names_the_variable() {
        let path = PathBuf::from("/nonexistent/assets.json");
        let err = load_catalog_from(Some(path.clone())).unwrap_err();
        assert!(matches!(&err, CatalogError::MissingFile { var: ASSET_DEF_VAR, path: p } if *p == path));
        assert_eq!(err.to_string(), "ASSET_DEF points to /nonexistent/assets.json, which does not exist");
        assert_eq!(load_catalog_from(None).unwrap(), AssetCatalog::standard());
    }

    #[test]
    fn load_catalog_reads_file() {
        let path = std::env::temp_dir().join(format!("brinkmanship-catalog-{}.json", std::process::id()));
        let json = serde_json::to_string(AssetCatalog::standard().definitions()).unwrap();
        fs::write(&path, json).unwrap();
        let loaded = load_catalog(&path).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(loaded, AssetCatalog::standard());
    }
}
