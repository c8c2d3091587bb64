pub mod bridge;
pub mod context;
pub mod dispatch;
pub mod price_impact;
pub mod utils;

pub use context::*;
pub use dispatch::{DispatchError, Dispatcher, TxRequest};
