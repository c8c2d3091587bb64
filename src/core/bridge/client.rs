use super::{
   BridgeError, BridgeResponse, NetworkInfo, PlatformDetector, PlatformProfile, SigningService,
};
use crate::core::dispatch::DispatchTx;
use moac_eth::alloy_primitives::{Address, TxHash};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::{Value, json};
use std::{str::FromStr, time::Duration};
use tracing::{debug, trace, warn};

const GET_CURRENT_WALLET: &str = "getCurrentWallet";
const GET_APP_INFO: &str = "getAppInfo";
const GET_NODE_URL: &str = "getNodeUrl";
const SEND_TRANSACTION: &str = "sendTransaction";

#[derive(Debug, Deserialize)]
struct CurrentWallet {
   #[serde(default)]
   address: String,
}

#[derive(Debug, Deserialize)]
struct AppInfo {
   #[serde(default)]
   system: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NodeUrl {
   node_url: String,
}

#[derive(Debug, Deserialize)]
struct JsonRpcReply {
   #[serde(default)]
   result: Option<Value>,
   #[serde(default)]
   error: Option<Value>,
}

/// HTTP client for the wallet bridge
///
/// Every bridge method is a `POST {base_url}/{method}` with a JSON body and answers with the
/// envelope decoded by [BridgeResponse].
#[derive(Debug, Clone)]
pub struct BridgeClient {
   http: reqwest::Client,
   base_url: String,
   /// Blockchain name the bridge should resolve nodes for, eg. `moac`
   blockchain: String,
}

impl BridgeClient {
   pub fn new(
      base_url: impl Into<String>,
      blockchain: impl Into<String>,
      connect_timeout: Duration,
   ) -> Result<Self, BridgeError> {
      // No total timeout here, sendTransaction waits for the user.
      let http = reqwest::Client::builder().connect_timeout(connect_timeout).build()?;

      Ok(Self {
         http,
         base_url: base_url.into().trim_end_matches('/').to_string(),
         blockchain: blockchain.into(),
      })
   }

   pub fn base_url(&self) -> &str {
      &self.base_url
   }

   async fn call<T: DeserializeOwned>(
      &self,
      method: &str,
      params: Value,
   ) -> Result<BridgeResponse<T>, BridgeError> {
      let url = format!("{}/{}", self.base_url, method);
      trace!("bridge call {} {}", method, params);

      let raw: Value = self
         .http
         .post(&url)
         .json(&params)
         .send()
         .await?
         .error_for_status()?
         .json()
         .await?;

      debug!("bridge reply for {}: {}", method, raw);
      BridgeResponse::decode(raw)
   }

   pub async fn node_url(&self) -> Result<String, BridgeError> {
      let params = json!({ "blockchain": self.blockchain });
      let node = self.call::<NodeUrl>(GET_NODE_URL, params).await?.into_result()?;
      Ok(node.node_url)
   }

   /// Network id reported by the node (`net_version`)
   pub async fn net_version(&self, node_url: &str) -> Result<u64, BridgeError> {
      let payload = json!({
         "jsonrpc": "2.0",
         "id": 1,
         "method": "net_version",
         "params": [],
      });

      let reply: JsonRpcReply = self
         .http
         .post(node_url)
         .json(&payload)
         .send()
         .await?
         .error_for_status()?
         .json()
         .await?;

      if let Some(error) = reply.error {
         return Err(BridgeError::Node(error));
      }

      match reply.result {
         Some(Value::String(version)) => parse_network_id(&version),
         Some(Value::Number(n)) => n
            .as_u64()
            .ok_or_else(|| BridgeError::Decode(format!("invalid network id: {}", n))),
         other => Err(BridgeError::Decode(format!(
            "invalid net_version result: {:?}",
            other
         ))),
      }
   }
}

impl SigningService for BridgeClient {
   async fn current_address(&self) -> Result<Option<Address>, BridgeError> {
      let wallet = match self.call::<CurrentWallet>(GET_CURRENT_WALLET, json!({})).await? {
         BridgeResponse::Success(wallet) => wallet,
         BridgeResponse::Failure(raw) => {
            debug!("No current wallet: {}", raw);
            return Ok(None);
         }
      };

      if wallet.address.is_empty() {
         return Ok(None);
      }

      let address = Address::from_str(&wallet.address)
         .map_err(|e| BridgeError::Decode(format!("invalid wallet address {}: {}", wallet.address, e)))?;
      Ok(Some(address))
   }

   async fn network(&self) -> Result<NetworkInfo, BridgeError> {
      let node_url = self.node_url().await?;
      let chain_id = self.net_version(&node_url).await?;
      Ok(NetworkInfo { chain_id, node_url })
   }

   async fn submit(&self, tx: &DispatchTx) -> Result<BridgeResponse<TxHash>, BridgeError> {
      let params = serde_json::to_value(tx).map_err(|e| BridgeError::Decode(e.to_string()))?;
      self.call::<TxHash>(SEND_TRANSACTION, params).await
   }
}

impl PlatformDetector for BridgeClient {
   async fn platform(&self) -> Result<PlatformProfile, BridgeError> {
      match self.call::<AppInfo>(GET_APP_INFO, json!({})).await? {
         BridgeResponse::Success(info) => Ok(PlatformProfile::from_system(&info.system)),
         BridgeResponse::Failure(raw) => {
            warn!("getAppInfo failed: {}", raw);
            Ok(PlatformProfile::Other)
         }
      }
   }
}

/// `net_version` is a decimal string on most nodes, some answer in hex
fn parse_network_id(version: &str) -> Result<u64, BridgeError> {
   let parsed = match version.strip_prefix("0x") {
      Some(hex) => u64::from_str_radix(hex, 16),
      None => version.parse::<u64>(),
   };
   parsed.map_err(|e| BridgeError::Decode(format!("invalid network id {}: {}", version, e)))
}
