pub mod format;
#[cfg(not(target_arch = "wasm32"))]
pub mod json_file;
pub mod manager;
pub mod memory;
pub mod traits;
