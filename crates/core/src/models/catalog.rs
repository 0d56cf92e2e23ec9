use serde::{Deserialize, Serialize};

/// A token offered by the price source, tagged with the chain it lives on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogToken {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub symbol: String,
    /// Contract address; the chain's native gas token may have none
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub decimals: Option<u8>,
    pub chain_id: String,
    pub chain_name: String,
    pub chain_display_name: String,
}
