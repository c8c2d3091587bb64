use crate::types::ChainId;
use alloy_primitives::Address;
use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Identifier used for the native currency in urls and lists
pub const NATIVE_CURRENCY_ID: &str = "MOAC";

/// The native currency of a chain (MOAC on Moac, ETH elsewhere)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NativeCurrency {
   pub chain_id: u64,
   pub symbol: String,
   pub name: String,
   pub decimals: u8,
}

impl NativeCurrency {
   pub fn from_chain_id(chain_id: u64) -> Result<Self, anyhow::Error> {
      let chain = ChainId::new(chain_id)?;
      let name = if chain.is_moac() { "Moac" } else { "Ether" };
      Ok(Self {
         chain_id,
         symbol: chain.coin_symbol().to_string(),
         name: name.to_string(),
         decimals: 18,
      })
   }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
   pub chain_id: u64,
   pub address: Address,
   pub symbol: String,
   pub name: String,
   pub decimals: u8,
}

/// Represents a Currency, either the [NativeCurrency] of its chain or a [Token]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
   Native(NativeCurrency),
   Token(Token),
}

impl From<NativeCurrency> for Currency {
   fn from(native: NativeCurrency) -> Self {
      Self::Native(native)
   }
}

impl From<Token> for Currency {
   fn from(token: Token) -> Self {
      Self::Token(token)
   }
}

impl Currency {
   pub fn is_native(&self) -> bool {
      matches!(self, Self::Native(_))
   }

   pub fn chain_id(&self) -> u64 {
      match self {
         Self::Native(native) => native.chain_id,
         Self::Token(token) => token.chain_id,
      }
   }

   pub fn symbol(&self) -> &str {
      match self {
         Self::Native(native) => &native.symbol,
         Self::Token(token) => &token.symbol,
      }
   }

   /// Get the address of this Currency
   ///
   /// If it's a `NativeCurrency`, it returns [Address::ZERO]
   pub fn address(&self) -> Address {
      match self {
         Self::Native(_) => Address::ZERO,
         Self::Token(token) => token.address,
      }
   }
}

/// The string id of a currency, `MOAC` for the native currency or the token address
pub fn currency_id(currency: &Currency) -> String {
   match currency {
      Currency::Native(_) => NATIVE_CURRENCY_ID.to_string(),
      Currency::Token(token) => token.address.to_checksum(None),
   }
}

/// What a currency id refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrencyRef {
   Native,
   Token(Address),
}

impl FromStr for CurrencyRef {
   type Err = anyhow::Error;

   fn from_str(id: &str) -> Result<Self, Self::Err> {
      if id.eq_ignore_ascii_case(NATIVE_CURRENCY_ID) {
         return Ok(Self::Native);
      }
      let address = Address::from_str(id).map_err(|_| anyhow!("invalid currency id: {}", id))?;
      Ok(Self::Token(address))
   }
}
