use crate::types::ChainId;
use alloy_primitives::{Address, address};
use anyhow::bail;

/// Returns the Multicall contract address for the given chain id.
///
/// Moac mainnet has no deployment yet.
pub fn multicall(chain_id: u64) -> Result<Address, anyhow::Error> {
   let chain = ChainId::new(chain_id)?;
   match chain {
      ChainId::Mainnet => Ok(address!("0xeefBa1e63905eF1D7ACbA5a8513c70307C1cE441")),
      ChainId::Ropsten => Ok(address!("0x53C43764255c17BD724F74c4eF150724AC50a3ed")),
      ChainId::Kovan => Ok(address!("0x2cc8688C5f75E365aaEEb4ea8D6a480405A48D2A")),
      ChainId::Rinkeby => Ok(address!("0x42Ad527de7d4e9d9d011aC45B31D8551f8Fe9821")),
      ChainId::Goerli => Ok(address!("0x77dCa2C955b15e9dE4dbBCf1246B4B85b651e50e")),
      ChainId::MoacTestnet => Ok(address!("0xc4b00992d186435fced593a691b7138b13971bc8")),
      ChainId::Moac => bail!("Multicall is not deployed on {}", chain.name()),
   }
}

#[cfg(test)]
mod tests {
   use super::*;
   use crate::types::{MOAC_MAIN, MOAC_TEST};
   use std::str::FromStr;

   #[test]
   fn multicall_addresses() {
      let mainnet = multicall(1).unwrap();
      assert_eq!(
         mainnet,
         Address::from_str("0xeefba1e63905ef1d7acba5a8513c70307c1ce441").unwrap()
      );

      let moac_test = multicall(MOAC_TEST).unwrap();
      assert_eq!(
         moac_test,
         Address::from_str("0xc4b00992d186435fced593a691b7138b13971bc8").unwrap()
      );
   }

   #[test]
   fn multicall_missing_on_moac_mainnet() {
      assert!(multicall(MOAC_MAIN).is_err());
      assert!(multicall(8453).is_err());
   }
}
