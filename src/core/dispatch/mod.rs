pub mod error;
pub mod request;

pub use error::DispatchError;
pub use request::{DispatchTx, NumericEncoding, TxRequest};

use crate::core::bridge::{BridgeError, BridgeResponse, PlatformDetector, PlatformProfile, SigningService};
use moac_eth::{
   alloy_primitives::{Address, TxHash},
   utils::gsha_to_sha,
};
use std::{future::Future, time::Duration};
use tracing::{info, warn};

/// Gas limit used when the request does not set one
pub const DEFAULT_GAS_LIMIT: u64 = 5_000_000;

/// Gas price in gsha
pub const DEFAULT_GAS_PRICE_GSHA: u64 = 100;

pub const REQUEST_TIMEOUT: u64 = 30;

/// The submission waits for the user to approve in the wallet
pub const APPROVAL_TIMEOUT: u64 = 300;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchConfig {
   pub default_gas_limit: u64,
   pub gas_price_gsha: u64,
   /// Limit for address, network and platform queries
   pub request_timeout: Duration,
   /// Limit for the submission
   pub approval_timeout: Duration,
}

impl Default for DispatchConfig {
   fn default() -> Self {
      Self {
         default_gas_limit: DEFAULT_GAS_LIMIT,
         gas_price_gsha: DEFAULT_GAS_PRICE_GSHA,
         request_timeout: Duration::from_secs(REQUEST_TIMEOUT),
         approval_timeout: Duration::from_secs(APPROVAL_TIMEOUT),
      }
   }
}

impl DispatchConfig {
   /// Gas price in sha
   pub fn gas_price(&self) -> u128 {
      gsha_to_sha(self.gas_price_gsha)
   }
}

/// Completes transactions and hands them to an external wallet for signing
///
/// The wallet (`S`) and the platform detection (`P`) are capabilities owned by the caller,
/// the dispatcher keeps no state of its own.
pub struct Dispatcher<S, P> {
   service: S,
   platform: P,
   config: DispatchConfig,
}

impl<S, P> Dispatcher<S, P>
where
   S: SigningService,
   P: PlatformDetector,
{
   pub fn new(service: S, platform: P, config: DispatchConfig) -> Self {
      Self {
         service,
         platform,
         config,
      }
   }

   pub fn service(&self) -> &S {
      &self.service
   }

   /// The current wallet address, `None` if there is no session or the wallet cannot be reached
   pub async fn account(&self) -> Option<Address> {
      match self.within(self.config.request_timeout, self.service.current_address()).await {
         Ok(address) => address,
         Err(e) => {
            warn!("Failed to get the current account: {}", e);
            None
         }
      }
   }

   /// Complete `request`, submit it to the signing service and return the transaction hash
   pub async fn dispatch(&self, request: TxRequest) -> Result<TxHash, DispatchError> {
      let request_timeout = self.config.request_timeout;

      let sender = self
         .within(request_timeout, self.service.current_address())
         .await?
         .ok_or(DispatchError::NoActiveSession)?;

      let from = match request.from {
         Some(from) if from != sender => {
            return Err(DispatchError::SenderMismatch {
               field: "from",
               value: from.to_string(),
            });
         }
         _ => sender,
      };

      let gas_limit = request.gas_limit.unwrap_or(self.config.default_gas_limit);
      let gas_price = self.config.gas_price();

      let profile = self.detect_platform().await;
      let network = self.within(request_timeout, self.service.network()).await?;

      let tx = DispatchTx::new(
         &request,
         from,
         gas_limit,
         gas_price,
         network.chain_id,
         profile.encoding(),
      );

      info!(
         "Dispatching tx from {} to {} on chain {} ({:?})",
         tx.from, tx.to, tx.chain_id, profile
      );

      let response = self
         .within(self.config.approval_timeout, self.service.submit(&tx))
         .await?;

      match response {
         BridgeResponse::Success(hash) => {
            info!("Transaction sent: {}", hash);
            Ok(hash)
         }
         BridgeResponse::Failure(raw) => {
            warn!("Signing service rejected the transaction: {}", raw);
            Err(DispatchError::ServiceFailure {
               payload: raw.to_string(),
            })
         }
      }
   }

   async fn detect_platform(&self) -> PlatformProfile {
      match self.within(self.config.request_timeout, self.platform.platform()).await {
         Ok(profile) => profile,
         Err(e) => {
            warn!("Platform detection failed, assuming {:?}: {}", PlatformProfile::Other, e);
            PlatformProfile::Other
         }
      }
   }

   async fn within<T>(
      &self,
      limit: Duration,
      fut: impl Future<Output = Result<T, BridgeError>>,
   ) -> Result<T, DispatchError> {
      match tokio::time::timeout(limit, fut).await {
         Ok(res) => res.map_err(DispatchError::from),
         Err(_) => Err(DispatchError::Timeout(limit)),
      }
   }
}
