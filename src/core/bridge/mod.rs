pub mod client;
pub mod envelope;
#[cfg(test)]
pub mod mock;

pub use client::BridgeClient;
pub use envelope::BridgeResponse;

use crate::core::dispatch::{DispatchTx, NumericEncoding};
use moac_eth::alloy_primitives::{Address, TxHash};
use std::{future::Future, sync::Arc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BridgeError {
   #[error("bridge request failed: {0}")]
   Http(#[from] reqwest::Error),

   #[error("malformed bridge response: {0}")]
   Decode(String),

   #[error("bridge returned a failure: {0}")]
   Failure(serde_json::Value),

   /// JSON-RPC error object returned by the network node
   #[error("node returned an error: {0}")]
   Node(serde_json::Value),
}

/// The network the signing service is connected to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkInfo {
   pub chain_id: u64,
   pub node_url: String,
}

/// Platform the wallet bridge runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlatformProfile {
   /// Wallet app embedded on iOS, expects decimal strings
   MobileEmbedded,
   #[default]
   Other,
}

impl PlatformProfile {
   pub fn from_system(system: &str) -> Self {
      if system.eq_ignore_ascii_case("ios") {
         Self::MobileEmbedded
      } else {
         Self::Other
      }
   }

   pub fn encoding(&self) -> NumericEncoding {
      match self {
         Self::MobileEmbedded => NumericEncoding::Decimal,
         Self::Other => NumericEncoding::Hex,
      }
   }
}

/// An external wallet that holds the user's keys, signs and broadcasts transactions
pub trait SigningService: Send + Sync {
   /// The address of the currently selected wallet, `None` if there is no active session
   fn current_address(&self) -> impl Future<Output = Result<Option<Address>, BridgeError>> + Send;

   fn network(&self) -> impl Future<Output = Result<NetworkInfo, BridgeError>> + Send;

   /// Ask the user to approve the transaction, sign and broadcast it
   fn submit(
      &self,
      tx: &DispatchTx,
   ) -> impl Future<Output = Result<BridgeResponse<TxHash>, BridgeError>> + Send;
}

pub trait PlatformDetector: Send + Sync {
   fn platform(&self) -> impl Future<Output = Result<PlatformProfile, BridgeError>> + Send;
}

impl<T: SigningService> SigningService for Arc<T> {
   fn current_address(&self) -> impl Future<Output = Result<Option<Address>, BridgeError>> + Send {
      (**self).current_address()
   }

   fn network(&self) -> impl Future<Output = Result<NetworkInfo, BridgeError>> + Send {
      (**self).network()
   }

   fn submit(
      &self,
      tx: &DispatchTx,
   ) -> impl Future<Output = Result<BridgeResponse<TxHash>, BridgeError>> + Send {
      (**self).submit(tx)
   }
}

impl<T: PlatformDetector> PlatformDetector for Arc<T> {
   fn platform(&self) -> impl Future<Output = Result<PlatformProfile, BridgeError>> + Send {
      (**self).platform()
   }
}
