pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;

use chrono::{DateTime, Utc};
use models::{
    analytics::{PortfolioSummary, RefreshFailure, RefreshReport, SummaryFilter},
    asset::{AssetSortOrder, CryptoAsset, NewAsset},
    catalog::CatalogToken,
    command::{CommandOutcome, PortfolioCommand},
    portfolio::Portfolio,
    sentiment::FearGreedReading,
    settings::Settings,
    snapshot::Snapshot,
};
use providers::{
    catalog::search_tokens, fear_greed::FearGreedProvider, relay::RelayProvider,
    traits::PriceSource,
};
use services::{
    analytics_service::AnalyticsService,
    portfolio_service::PortfolioService,
    price_service::{PriceService, PriceTarget},
};
use storage::{format, manager::StorageManager, traits::PersistenceAdapter};

use errors::CoreError;

/// Callback invoked with the full asset list after every successful mutation.
pub type MutationListener = Box<dyn Fn(&[CryptoAsset]) + Send + Sync>;

/// Main entry point for the DCA tracker core library: the portfolio store.
///
/// Owns the portfolio exclusively. Every mutating command validates first,
/// then applies, then writes the whole portfolio to the persistence adapter
/// and notifies the `on_mutated` listeners. Commands take `&mut self`, so
/// they never interleave.
#[must_use]
pub struct DcaTracker {
    portfolio: Portfolio,
    settings: Settings,
    portfolio_service: PortfolioService,
    price_service: PriceService,
    analytics_service: AnalyticsService,
    sentiment: FearGreedProvider,
    storage: Box<dyn PersistenceAdapter>,
    listeners: Vec<MutationListener>,
    /// Token catalog from the price source and the current search view of it.
    catalog: Vec<CatalogToken>,
    filtered_catalog: Vec<CatalogToken>,
    search_query: String,
    /// Set once the automatic start-up price refresh has run.
    auto_refreshed: bool,
}

impl std::fmt::Debug for DcaTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DcaTracker")
            .field("assets", &self.portfolio.len())
            .field("price_source", &self.price_service.source_name())
            .field("catalog", &self.catalog.len())
            .field("listeners", &self.listeners.len())
            .field("auto_refreshed", &self.auto_refreshed)
            .finish()
    }
}

impl DcaTracker {
    /// Create an empty tracker using the given price source and storage.
    /// Call [`initialize`](Self::initialize) to load the saved portfolio.
    pub fn new(
        settings: Settings,
        price_source: Box<dyn PriceSource>,
        storage: Box<dyn PersistenceAdapter>,
    ) -> Self {
        Self {
            portfolio: Portfolio::default(),
            portfolio_service: PortfolioService::new(),
            price_service: PriceService::new(price_source),
            analytics_service: AnalyticsService::new(),
            sentiment: FearGreedProvider::from_settings(&settings),
            storage,
            listeners: Vec::new(),
            catalog: Vec::new(),
            filtered_catalog: Vec::new(),
            search_query: String::new(),
            auto_refreshed: false,
            settings,
        }
    }

    /// Create an empty tracker backed by the Relay API.
    pub fn with_defaults(settings: Settings, storage: Box<dyn PersistenceAdapter>) -> Self {
        let source = RelayProvider::from_settings(&settings);
        Self::new(settings, Box::new(source), storage)
    }

    // ── Lifecycle ───────────────────────────────────────────────────

    /// Load the saved portfolio from storage, replacing the in-memory one.
    ///
    /// Missing or corrupt data leaves the tracker empty; corruption is
    /// logged, never returned. Returns the number of assets loaded.
    pub fn initialize(&mut self) -> usize {
        let loaded = StorageManager::load(self.storage.as_ref());
        let mut portfolio = Portfolio::default();

        match self.portfolio_service.replace_all(&mut portfolio, loaded.assets) {
            Ok(count) => {
                tracing::info!(assets = count, "Loaded saved portfolio");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Saved portfolio is inconsistent, starting empty");
            }
        }

        self.portfolio = portfolio;
        self.portfolio.len()
    }

    /// Register a callback run after every successful mutating command.
    pub fn on_mutated<F>(&mut self, callback: F)
    where
        F: Fn(&[CryptoAsset]) + Send + Sync + 'static,
    {
        self.listeners.push(Box::new(callback));
    }

    /// Refresh all prices the first time there is something to refresh.
    ///
    /// Returns `Some(report)` on the call that performed the refresh and
    /// `None` on every other call (before any asset has an address, and
    /// after the refresh has run).
    pub async fn auto_refresh_once(&mut self) -> Option<RefreshReport> {
        if self.auto_refreshed || !self.portfolio.assets.iter().any(CryptoAsset::has_address) {
            return None;
        }
        self.auto_refreshed = true;
        tracing::debug!("Running automatic price refresh");
        Some(self.refresh_all_prices().await)
    }

    /// Whether [`auto_refresh_once`](Self::auto_refresh_once) has already run.
    #[must_use]
    pub fn has_auto_refreshed(&self) -> bool {
        self.auto_refreshed
    }

    // ── Commands ────────────────────────────────────────────────────

    /// Apply any command, then persist and notify listeners if it changed
    /// anything. The typed methods below are shorthands for single commands.
    pub fn dispatch(&mut self, command: PortfolioCommand) -> Result<CommandOutcome, CoreError> {
        let kind = command.kind();
        let outcome = self.portfolio_service.apply(&mut self.portfolio, command)?;
        tracing::debug!(command = kind, outcome = ?outcome, "Applied command");

        if outcome.is_mutation() {
            self.commit();
        }
        Ok(outcome)
    }

    /// Register a new asset with zero holdings. Returns its id.
    pub fn add_asset(&mut self, details: NewAsset) -> Result<String, CoreError> {
        let id = self.portfolio_service.add_asset(&mut self.portfolio, details)?;
        self.commit();
        Ok(id)
    }

    /// Delete an asset. Unknown ids are ignored; returns whether anything was removed.
    pub fn remove_asset(&mut self, id: &str) -> bool {
        let removed = self.portfolio_service.remove_asset(&mut self.portfolio, id);
        if removed {
            self.commit();
        }
        removed
    }

    /// Set the current unit price of an asset and recompute its valuation.
    pub fn set_price(&mut self, id: &str, price: f64) -> Result<(), CoreError> {
        self.portfolio_service.set_price(&mut self.portfolio, id, price)?;
        self.commit();
        Ok(())
    }

    /// Record buying `amount` units for `cost` USD in total, dated now.
    /// Returns the new transaction id.
    pub fn record_purchase(&mut self, id: &str, amount: f64, cost: f64) -> Result<String, CoreError> {
        let tx_id = self
            .portfolio_service
            .record_purchase(&mut self.portfolio, id, amount, cost, None)?;
        self.commit();
        Ok(tx_id)
    }

    /// Record a purchase with an explicit date.
    pub fn record_purchase_at(
        &mut self,
        id: &str,
        amount: f64,
        cost: f64,
        date: DateTime<Utc>,
    ) -> Result<String, CoreError> {
        let tx_id = self
            .portfolio_service
            .record_purchase(&mut self.portfolio, id, amount, cost, Some(date))?;
        self.commit();
        Ok(tx_id)
    }

    // ── Prices ──────────────────────────────────────────────────────

    /// Fetch the current price of one asset from the price source and apply it.
    ///
    /// On failure the asset keeps its previous price.
    pub async fn refresh_price_from_source(&mut self, id: &str) -> Result<f64, CoreError> {
        let target = self
            .portfolio
            .get(id)
            .map(Self::price_target)
            .ok_or_else(|| CoreError::AssetNotFound(id.to_string()))?;

        let price = self.price_service.fetch_price(&target).await?;
        self.set_price(id, price)?;
        Ok(price)
    }

    /// Fetch prices for every asset with an address concurrently and apply
    /// the ones that arrived.
    ///
    /// Individual failures are captured in the report, never returned.
    /// A price is only applied if its asset is still in the portfolio.
    pub async fn refresh_all_prices(&mut self) -> RefreshReport {
        let targets: Vec<PriceTarget> = self
            .portfolio
            .assets
            .iter()
            .filter(|a| a.has_address())
            .map(Self::price_target)
            .collect();

        let mut report = RefreshReport {
            attempted: targets.len(),
            ..RefreshReport::default()
        };
        if targets.is_empty() {
            tracing::debug!("No assets with an address, skipping price refresh");
            return report;
        }

        let results = self.price_service.fetch_prices(&targets).await;

        let mut changed = false;
        for (target, result) in results {
            let outcome = result.and_then(|price| {
                if !self.portfolio.contains(&target.asset_id) {
                    return Err(CoreError::AssetNotFound(target.asset_id.clone()));
                }
                self.portfolio_service
                    .set_price(&mut self.portfolio, &target.asset_id, price)
            });

            match outcome {
                Ok(()) => {
                    report.succeeded += 1;
                    changed = true;
                }
                Err(e) => {
                    tracing::warn!(
                        asset = %target.symbol,
                        error = %e,
                        "Failed to refresh price"
                    );
                    report.failures.push(RefreshFailure {
                        asset_id: target.asset_id,
                        symbol: target.symbol,
                        reason: e.to_string(),
                    });
                }
            }
        }

        if changed {
            self.commit();
        }
        tracing::info!(result = %report, "Price refresh finished");
        report
    }

    // ── Queries ─────────────────────────────────────────────────────

    /// All assets in insertion order.
    #[must_use]
    pub fn assets(&self) -> &[CryptoAsset] {
        &self.portfolio.assets
    }

    #[must_use]
    pub fn get_asset(&self, id: &str) -> Option<&CryptoAsset> {
        self.portfolio.get(id)
    }

    #[must_use]
    pub fn asset_count(&self) -> usize {
        self.portfolio.len()
    }

    /// Assets ordered for display.
    #[must_use]
    pub fn sorted_assets(&self, order: AssetSortOrder) -> Vec<&CryptoAsset> {
        self.analytics_service.sorted_assets(&self.portfolio, order)
    }

    /// Aggregate totals over the assets accepted by `filter`.
    #[must_use]
    pub fn summary(&self, filter: &SummaryFilter) -> PortfolioSummary {
        self.analytics_service.summary(&self.portfolio, filter)
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // ── Export / Import ─────────────────────────────────────────────

    /// Snapshot of the whole portfolio for export.
    #[must_use]
    pub fn export_snapshot(&self) -> Snapshot {
        format::build_snapshot(&self.portfolio.assets, Utc::now())
    }

    /// Export the portfolio as pretty-printed JSON.
    pub fn export_to_json(&self) -> Result<String, CoreError> {
        StorageManager::export_to_json(&self.portfolio, Utc::now())
    }

    /// Suggested file name for an export made today.
    #[must_use]
    pub fn backup_filename(&self) -> String {
        format::backup_filename(Utc::now().date_naive())
    }

    /// Replace the whole portfolio with the contents of an export file.
    ///
    /// On any format problem returns `InvalidImportFormat` and keeps the
    /// current portfolio. Returns the number of imported assets.
    pub fn import_snapshot(&mut self, raw: &[u8]) -> Result<usize, CoreError> {
        let imported = StorageManager::import_from_bytes(raw)?;
        let count = self
            .portfolio_service
            .replace_all(&mut self.portfolio, imported.assets)?;
        self.commit();
        tracing::info!(assets = count, "Imported portfolio snapshot");
        Ok(count)
    }

    // ── Token Catalog ───────────────────────────────────────────────

    /// Fetch the token catalog from the price source (duplicates removed)
    /// and reset the search view to show all of it.
    /// On error the previous catalog is kept.
    pub async fn load_catalog(&mut self) -> Result<usize, CoreError> {
        let tokens = self.price_service.fetch_catalog().await?;
        self.catalog = tokens;
        self.filtered_catalog = self.catalog.clone();
        self.search_query.clear();
        Ok(self.catalog.len())
    }

    /// Filter the catalog by name or symbol and remember the query.
    pub fn search_catalog(&mut self, query: &str) -> &[CatalogToken] {
        self.search_query = query.to_string();
        self.filtered_catalog = search_tokens(&self.catalog, query);
        &self.filtered_catalog
    }

    #[must_use]
    pub fn catalog(&self) -> &[CatalogToken] {
        &self.catalog
    }

    #[must_use]
    pub fn filtered_catalog(&self) -> &[CatalogToken] {
        &self.filtered_catalog
    }

    #[must_use]
    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    // ── Market Sentiment ────────────────────────────────────────────

    /// Latest crypto Fear & Greed index reading.
    pub async fn fear_greed_index(&self) -> Result<FearGreedReading, CoreError> {
        self.sentiment.current().await
    }

    /// Last `days` daily Fear & Greed readings, newest first.
    pub async fn fear_greed_history(&self, days: u32) -> Result<Vec<FearGreedReading>, CoreError> {
        self.sentiment.history(days).await
    }

    // ── Internal ────────────────────────────────────────────────────

    /// Persist the portfolio and notify listeners. Storage failures are
    /// logged; the in-memory portfolio stays authoritative.
    fn commit(&self) {
        if let Err(e) = StorageManager::save(self.storage.as_ref(), &self.portfolio) {
            tracing::warn!(error = %e, "Failed to persist portfolio");
        }
        for listener in &self.listeners {
            listener(&self.portfolio.assets);
        }
    }

    fn price_target(asset: &CryptoAsset) -> PriceTarget {
        PriceTarget {
            asset_id: asset.id.clone(),
            symbol: asset.symbol.clone(),
            address: asset.address.clone(),
            chain_id: asset.chain_id.clone(),
        }
    }
}
