//! The persisted form of the store: one JSON blob holding every collection,
//! written after each mutation and read back at startup.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use espeat_core::{
    Menu, MenuProposition, Restaurant, TicketPurchase, TicketShare, User, ValidationScan,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshot {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub restaurants: Vec<Restaurant>,
    #[serde(default)]
    pub menus: Vec<Menu>,
    #[serde(default)]
    pub propositions: Vec<MenuProposition>,
    #[serde(default)]
    pub partages: Vec<TicketShare>,
    #[serde(default)]
    pub achats: Vec<TicketPurchase>,
    #[serde(default)]
    pub scans: Vec<ValidationScan>,
}

impl StoreSnapshot {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read(path)
            .with_context(|| format!("lecture du snapshot {}", path.display()))?;
        let snapshot = serde_json::from_slice(&raw)
            .with_context(|| format!("snapshot illisible {}", path.display()))?;
        Ok(snapshot)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let raw = serde_json::to_vec_pretty(self).context("sérialisation du snapshot")?;
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("création de {}", parent.display()))?;
        }
        std::fs::write(path, raw)
            .with_context(|| format!("écriture du snapshot {}", path.display()))?;
        Ok(())
    }
}
