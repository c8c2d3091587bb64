pub mod abi;
pub mod currency;
pub mod types;
pub mod utils;

// Re-Exports
pub use alloy_primitives;
pub use alloy_sol_types;
