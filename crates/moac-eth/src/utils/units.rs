use alloy_primitives::U256;

/// Decimals of a gsha (the Moac analogue of gwei)
pub const GSHA_DECIMALS: u8 = 9;

/// Decimals of a whole MOAC
pub const MOAC_DECIMALS: u8 = 18;

/// Convert an amount of gsha to sha
pub fn gsha_to_sha(gsha: u64) -> u128 {
   gsha as u128 * 10u128.pow(GSHA_DECIMALS as u32)
}

/// Convert a whole amount of MOAC to sha
pub fn moac_to_sha(moac: u64) -> U256 {
   U256::from(moac) * U256::from(10u64).pow(U256::from(MOAC_DECIMALS))
}

/// `0x` prefixed, lowercase, no leading zeros
pub fn to_hex_string(value: U256) -> String {
   format!("0x{:x}", value)
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn gsha_conversion() {
      assert_eq!(gsha_to_sha(100), 100_000_000_000);
      assert_eq!(gsha_to_sha(0), 0);
   }

   #[test]
   fn moac_conversion() {
      assert_eq!(moac_to_sha(1).to_string(), "1000000000000000000");
   }

   #[test]
   fn hex_strings() {
      assert_eq!(to_hex_string(U256::ZERO), "0x0");
      assert_eq!(to_hex_string(U256::from(5_000_000u64)), "0x4c4b40");
      assert_eq!(to_hex_string(U256::from(100_000_000_000u64)), "0x174876e800");
   }
}
