pub mod address_book;
pub mod units;

pub use units::*;
