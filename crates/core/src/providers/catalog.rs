use std::collections::HashSet;

use crate::models::catalog::CatalogToken;

/// Filter the catalog by a case-insensitive substring of name or symbol.
///
/// A blank query returns the catalog unchanged.
pub fn search_tokens(catalog: &[CatalogToken], query: &str) -> Vec<CatalogToken> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return catalog.to_vec();
    }

    catalog
        .iter()
        .filter(|t| t.name.to_lowercase().contains(&q) || t.symbol.to_lowercase().contains(&q))
        .cloned()
        .collect()
}

/// Drop tokens that repeat an earlier entry's id, name, symbol, address and
/// chain. Keeps the first occurrence and the original order.
pub fn dedupe_tokens(tokens: Vec<CatalogToken>) -> Vec<CatalogToken> {
    let mut seen = HashSet::new();
    tokens
        .into_iter()
        .filter(|t| {
            seen.insert((
                t.id.clone(),
                t.name.clone(),
                t.symbol.clone(),
                t.address.clone(),
                t.chain_id.clone(),
            ))
        })
        .collect()
}
