use serde::{Deserialize, Serialize};

use super::asset::CryptoAsset;

/// The ordered collection of tracked assets. Insertion order is display order.
///
/// Serialized as a bare JSON array of assets, which is the shape written to
/// the persistence adapter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Portfolio {
    pub assets: Vec<CryptoAsset>,
}

impl Portfolio {
    pub fn new(assets: Vec<CryptoAsset>) -> Self {
        Self { assets }
    }

    pub fn get(&self, id: &str) -> Option<&CryptoAsset> {
        self.assets.iter().find(|a| a.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.assets.iter().position(|a| a.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}
