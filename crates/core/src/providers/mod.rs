pub mod catalog;
pub mod traits;

// API client implementations
pub mod fear_greed;
pub mod relay;
