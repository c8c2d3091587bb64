use anyhow::bail;
use serde::{Deserialize, Serialize};

pub const MAINNET: u64 = 1;
pub const ROPSTEN: u64 = 3;
pub const RINKEBY: u64 = 4;
pub const GOERLI: u64 = 5;
pub const KOVAN: u64 = 42;
pub const MOAC_MAIN: u64 = 99;
pub const MOAC_TEST: u64 = 101;

pub const SUPPORTED_CHAINS: [u64; 7] = [MAINNET, ROPSTEN, RINKEBY, GOERLI, KOVAN, MOAC_MAIN, MOAC_TEST];

/// Chains the injected (browser) connector accepts
pub const INJECTED_CHAINS: [u64; 5] = [MAINNET, ROPSTEN, RINKEBY, GOERLI, KOVAN];

const ERR_MSG: &str = "Supported chains are: Mainnet(1), Ropsten(3), Rinkeby(4), Goerli(5), Kovan(42), Moac(99), Moac Testnet(101)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u64)]
pub enum ChainId {
   Mainnet = 1,
   Ropsten = 3,
   Rinkeby = 4,
   Goerli = 5,
   Kovan = 42,
   Moac = 99,
   MoacTestnet = 101,
}

impl Default for ChainId {
   fn default() -> Self {
      ChainId::Mainnet
   }
}

impl TryFrom<u64> for ChainId {
   type Error = anyhow::Error;

   fn try_from(id: u64) -> Result<Self, Self::Error> {
      ChainId::new(id)
   }
}

impl ChainId {
   pub fn new(id: u64) -> Result<Self, anyhow::Error> {
      let chain = match id {
         MAINNET => ChainId::Mainnet,
         ROPSTEN => ChainId::Ropsten,
         RINKEBY => ChainId::Rinkeby,
         GOERLI => ChainId::Goerli,
         KOVAN => ChainId::Kovan,
         MOAC_MAIN => ChainId::Moac,
         MOAC_TEST => ChainId::MoacTestnet,
         _ => bail!("Unsupported chain id: {}\n{}", id, ERR_MSG),
      };
      Ok(chain)
   }

   pub fn is_moac(&self) -> bool {
      matches!(self, ChainId::Moac | ChainId::MoacTestnet)
   }

   pub fn is_testnet(&self) -> bool {
      !matches!(self, ChainId::Mainnet | ChainId::Moac)
   }

   pub fn is_supported(chain_id: u64) -> bool {
      SUPPORTED_CHAINS.contains(&chain_id)
   }

   /// Return all supported chains
   pub fn supported_chains() -> Vec<ChainId> {
      SUPPORTED_CHAINS
         .iter()
         .filter_map(|id| ChainId::new(*id).ok())
         .collect()
   }

   pub fn id(&self) -> u64 {
      *self as u64
   }

   pub fn id_as_hex(&self) -> String {
      format!("0x{:x}", self.id())
   }

   pub fn coin_symbol(&self) -> &str {
      if self.is_moac() { "MOAC" } else { "ETH" }
   }

   pub fn name(&self) -> &str {
      match self {
         ChainId::Mainnet => "Ethereum",
         ChainId::Ropsten => "Ropsten",
         ChainId::Rinkeby => "Rinkeby",
         ChainId::Goerli => "Görli",
         ChainId::Kovan => "Kovan",
         ChainId::Moac => "Moac",
         ChainId::MoacTestnet => "Moac Testnet",
      }
   }
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn moac_chain_ids() {
      let chain = ChainId::new(101).unwrap();
      assert_eq!(chain, ChainId::MoacTestnet);
      assert!(chain.is_moac());
      assert!(chain.is_testnet());
      assert_eq!(chain.id_as_hex(), "0x65");
      assert_eq!(ChainId::Moac.coin_symbol(), "MOAC");
      assert_eq!(ChainId::Kovan.coin_symbol(), "ETH");
   }

   #[test]
   fn unknown_chain_is_rejected() {
      assert!(ChainId::new(56).is_err());
      assert!(!ChainId::is_supported(56));
      assert_eq!(ChainId::supported_chains().len(), SUPPORTED_CHAINS.len());
   }
}
