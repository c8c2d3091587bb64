//! In-memory signing service used by the tests

use super::{
   BridgeError, BridgeResponse, NetworkInfo, PlatformDetector, PlatformProfile, SigningService,
};
use crate::core::dispatch::DispatchTx;
use moac_eth::alloy_primitives::{Address, TxHash};
use serde_json::{Value, json};
use std::{
   str::FromStr,
   sync::{
      Mutex,
      atomic::{AtomicUsize, Ordering},
   },
   time::Duration,
};

pub const SESSION_ADDRESS: &str = "0x8ba1f109551bd432803012645ac136ddd64dba72";
pub const TX_HASH: &str = "0x5c504ed432cb51138bcf09aa5e8a410dd4a1e204ef84bfed1be16dfba1b22060";

pub struct MockSigner {
   /// What the wallet reports as the current address
   pub address: Option<String>,
   pub chain_id: u64,
   /// `None` makes platform detection fail
   pub platform: Option<PlatformProfile>,
   /// Raw bridge reply to a submission
   pub response: Value,
   /// Fail the submission at the transport level
   pub transport_error: bool,
   pub submit_delay: Option<Duration>,
   pub submitted: Mutex<Vec<DispatchTx>>,
   pub calls: AtomicUsize,
}

impl MockSigner {
   pub fn new() -> Self {
      Self {
         address: Some(SESSION_ADDRESS.to_string()),
         chain_id: moac_eth::types::MOAC_TEST,
         platform: Some(PlatformProfile::Other),
         response: json!({ "result": true, "data": TX_HASH }),
         transport_error: false,
         submit_delay: None,
         submitted: Mutex::new(Vec::new()),
         calls: AtomicUsize::new(0),
      }
   }

   pub fn session_address() -> Address {
      Address::from_str(SESSION_ADDRESS).unwrap()
   }

   pub fn tx_hash() -> TxHash {
      TxHash::from_str(TX_HASH).unwrap()
   }

   pub fn submitted(&self) -> Vec<DispatchTx> {
      self.submitted.lock().unwrap().clone()
   }

   pub fn calls(&self) -> usize {
      self.calls.load(Ordering::SeqCst)
   }
}

impl SigningService for MockSigner {
   async fn current_address(&self) -> Result<Option<Address>, BridgeError> {
      self.calls.fetch_add(1, Ordering::SeqCst);
      match &self.address {
         Some(address) => Address::from_str(address)
            .map(Some)
            .map_err(|e| BridgeError::Decode(e.to_string())),
         None => Ok(None),
      }
   }

   async fn network(&self) -> Result<NetworkInfo, BridgeError> {
      self.calls.fetch_add(1, Ordering::SeqCst);
      Ok(NetworkInfo {
         chain_id: self.chain_id,
         node_url: "http://mock.node".to_string(),
      })
   }

   async fn submit(&self, tx: &DispatchTx) -> Result<BridgeResponse<TxHash>, BridgeError> {
      self.calls.fetch_add(1, Ordering::SeqCst);
      self.submitted.lock().unwrap().push(tx.clone());

      if let Some(delay) = self.submit_delay {
         tokio::time::sleep(delay).await;
      }

      if self.transport_error {
         return Err(BridgeError::Decode("connection reset".to_string()));
      }

      BridgeResponse::decode(self.response.clone())
   }
}

impl PlatformDetector for MockSigner {
   async fn platform(&self) -> Result<PlatformProfile, BridgeError> {
      self.platform
         .ok_or_else(|| BridgeError::Decode("no app info".to_string()))
   }
}
