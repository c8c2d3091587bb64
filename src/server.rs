use crate::core::{
   bridge::{PlatformDetector, SigningService},
   dispatch::{DispatchError, Dispatcher, TxRequest},
};
use moac_eth::alloy_primitives::{Address, Bytes, U256, hex};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::{convert::Infallible, net::SocketAddr, sync::Arc};
use tracing::{error, info, warn};
use warp::Filter;

// EIP-1193 Error codes
pub const USER_REJECTED_REQUEST: i32 = 4001;
pub const UNAUTHORIZED: i32 = 4100;
pub const UNSUPPORTED_METHOD: i32 = 4200;
pub const INVALID_PARAMS: i32 = -32602;
pub const INTERNAL_ERROR: i32 = -32603;

/// Methods the bridge server answers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
   EthAccounts,
   RequestAccounts,
   ChainId,
   NetVersion,
   SendTransaction,
}

impl RequestMethod {
   pub fn parse(method: &str) -> Option<Self> {
      let method = match method {
         "eth_accounts" => Self::EthAccounts,
         "eth_requestAccounts" => Self::RequestAccounts,
         "eth_chainId" => Self::ChainId,
         "net_version" => Self::NetVersion,
         "eth_sendTransaction" => Self::SendTransaction,
         _ => return None,
      };
      Some(method)
   }

   pub fn as_str(&self) -> &'static str {
      match self {
         Self::EthAccounts => "eth_accounts",
         Self::RequestAccounts => "eth_requestAccounts",
         Self::ChainId => "eth_chainId",
         Self::NetVersion => "net_version",
         Self::SendTransaction => "eth_sendTransaction",
      }
   }
}

#[derive(Deserialize, Debug)]
/// Request received from the dapp
pub struct JsonRpcRequest {
   #[serde(default)]
   pub origin: Option<String>,
   #[allow(dead_code)]
   #[serde(default)]
   pub jsonrpc: String,
   #[serde(default)]
   pub id: Value,
   pub method: String,
   #[serde(default)]
   pub params: Value,
}

#[derive(Serialize, Debug)]
/// Response sent back to the dapp
pub struct JsonRpcResponse {
   pub jsonrpc: String,
   pub id: Value,
   #[serde(skip_serializing_if = "Option::is_none")]
   pub result: Option<Value>,
   #[serde(skip_serializing_if = "Option::is_none")]
   pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
   pub fn error(error: JsonRpcError, payload_id: Value) -> Self {
      Self {
         jsonrpc: "2.0".to_string(),
         id: payload_id,
         result: None,
         error: Some(error),
      }
   }

   pub fn ok(result: Value, payload_id: Value) -> Self {
      Self {
         jsonrpc: "2.0".to_string(),
         id: payload_id,
         result: Some(result),
         error: None,
      }
   }
}

#[derive(Serialize, Debug)]
pub struct JsonRpcError {
   pub code: i32,
   pub message: String,
   #[serde(skip_serializing_if = "Option::is_none")]
   pub data: Option<Value>,
}

impl JsonRpcError {
   pub fn new(code: i32, message: impl Into<String>) -> Self {
      Self {
         code,
         message: message.into(),
         data: None,
      }
   }

   pub fn invalid_params(message: impl Into<String>) -> Self {
      Self::new(INVALID_PARAMS, message)
   }

   pub fn unsupported_method(method: &str) -> Self {
      Self::new(UNSUPPORTED_METHOD, format!("Unsupported Method: {}", method))
   }
}

impl From<DispatchError> for JsonRpcError {
   fn from(err: DispatchError) -> Self {
      let message = err.to_string();
      match err {
         DispatchError::NoActiveSession => Self::new(UNAUTHORIZED, message),
         DispatchError::SenderMismatch { .. } => Self::new(INVALID_PARAMS, message),
         DispatchError::ServiceFailure { payload } => Self {
            code: USER_REJECTED_REQUEST,
            message,
            data: serde_json::from_str(&payload).ok(),
         },
         DispatchError::Transport(_) | DispatchError::Timeout(_) => Self::new(INTERNAL_ERROR, message),
      }
   }
}

/// `eth_sendTransaction` params as dapps send them, all numbers are hex strings
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct SendTxParams {
   #[serde(default)]
   from: Option<Address>,
   to: Address,
   #[serde(default)]
   value: Option<U256>,
   #[serde(default)]
   gas: Option<U256>,
   #[serde(default)]
   gas_limit: Option<U256>,
   #[serde(default)]
   data: Option<Bytes>,
   #[serde(default)]
   input: Option<Bytes>,
   #[serde(default)]
   nonce: Option<U256>,
}

impl SendTxParams {
   fn into_request(self) -> Result<TxRequest, String> {
      let mut request = TxRequest::new(self.to, self.value.unwrap_or_default());
      request.from = self.from;
      request.data = self.data.or(self.input).filter(|data| !data.is_empty());
      // gasLimit wins when a dapp sends both
      request.gas_limit = self
         .gas_limit
         .or(self.gas)
         .map(|gas| u64::try_from(gas).map_err(|_| format!("gas out of range: {}", gas)))
         .transpose()?;
      request.nonce = self
         .nonce
         .map(|nonce| u64::try_from(nonce).map_err(|_| format!("nonce out of range: {}", nonce)))
         .transpose()?;
      Ok(request)
   }
}

/// What the server handlers need
pub struct ServerState<S, P> {
   pub dispatcher: Arc<Dispatcher<S, P>>,
   pub chain_id: u64,
}

impl<S, P> Clone for ServerState<S, P> {
   fn clone(&self) -> Self {
      Self {
         dispatcher: self.dispatcher.clone(),
         chain_id: self.chain_id,
      }
   }
}

impl<S, P> ServerState<S, P>
where
   S: SigningService + 'static,
   P: PlatformDetector + 'static,
{
   pub fn new(dispatcher: Arc<Dispatcher<S, P>>, chain_id: u64) -> Self {
      Self {
         dispatcher,
         chain_id,
      }
   }

   fn chain_id_hex(&self) -> String {
      format!("0x{:x}", self.chain_id)
   }

   async fn accounts(&self) -> Vec<String> {
      match self.dispatcher.account().await {
         Some(account) => vec![hex::encode_prefixed(account)],
         None => Vec::new(),
      }
   }
}

async fn send_transaction<S, P>(state: &ServerState<S, P>, payload: &JsonRpcRequest) -> JsonRpcResponse
where
   S: SigningService + 'static,
   P: PlatformDetector + 'static,
{
   let id = payload.id.clone();

   let object = match payload.params.get(0) {
      Some(object @ Value::Object(_)) => object.clone(),
      _ => {
         error!(
            "Invalid params for eth_sendTransaction, params[0] is not an object {:#?}",
            payload.params
         );
         return JsonRpcResponse::error(
            JsonRpcError::invalid_params("params[0] must be a transaction object"),
            id,
         );
      }
   };

   let params: SendTxParams = match serde_json::from_value(object) {
      Ok(params) => params,
      Err(e) => {
         error!("Invalid params for eth_sendTransaction: {}", e);
         return JsonRpcResponse::error(JsonRpcError::invalid_params(e.to_string()), id);
      }
   };

   let request = match params.into_request() {
      Ok(request) => request,
      Err(e) => return JsonRpcResponse::error(JsonRpcError::invalid_params(e), id),
   };

   match state.dispatcher.dispatch(request).await {
      Ok(hash) => JsonRpcResponse::ok(json!(hash), id),
      Err(e) => {
         if e.is_input_error() {
            warn!("Rejected eth_sendTransaction: {}", e);
         } else {
            error!("eth_sendTransaction failed: {}", e);
         }
         JsonRpcResponse::error(JsonRpcError::from(e), id)
      }
   }
}

pub async fn handle_request<S, P>(state: ServerState<S, P>, payload: JsonRpcRequest) -> JsonRpcResponse
where
   S: SigningService + 'static,
   P: PlatformDetector + 'static,
{
   let id = payload.id.clone();
   let Some(method) = RequestMethod::parse(&payload.method) else {
      error!("Method '{}' not supported.", payload.method);
      return JsonRpcResponse::error(JsonRpcError::unsupported_method(&payload.method), id);
   };

   match method {
      RequestMethod::EthAccounts | RequestMethod::RequestAccounts => {
         JsonRpcResponse::ok(json!(state.accounts().await), id)
      }
      RequestMethod::ChainId => JsonRpcResponse::ok(json!(state.chain_id_hex()), id),
      RequestMethod::NetVersion => JsonRpcResponse::ok(json!(state.chain_id.to_string()), id),
      RequestMethod::SendTransaction => {
         info!(
            "{} from {}",
            method.as_str(),
            payload.origin.as_deref().unwrap_or("unknown origin")
         );
         send_transaction(&state, &payload).await
      }
   }
}

// Handler for GET /status
async fn status_handler<S, P>(state: ServerState<S, P>) -> Result<impl warp::Reply, Infallible>
where
   S: SigningService + 'static,
   P: PlatformDetector + 'static,
{
   let res = json!({
      "status": true,
      "accounts": state.accounts().await,
      "chainId": state.chain_id_hex(),
   });

   Ok(warp::reply::json(&res))
}

// Handler for POST /api (JSON-RPC)
async fn api_handler<S, P>(
   state: ServerState<S, P>,
   payload: JsonRpcRequest,
) -> Result<impl warp::Reply, Infallible>
where
   S: SigningService + 'static,
   P: PlatformDetector + 'static,
{
   let response_body = handle_request(state, payload).await;
   Ok(warp::reply::json(&response_body))
}

fn with_state<S, P>(
   state: ServerState<S, P>,
) -> impl Filter<Extract = (ServerState<S, P>,), Error = Infallible> + Clone
where
   S: SigningService + 'static,
   P: PlatformDetector + 'static,
{
   warp::any().map(move || state.clone())
}

pub async fn run_server<S, P>(state: ServerState<S, P>, port: u16) -> Result<(), anyhow::Error>
where
   S: SigningService + 'static,
   P: PlatformDetector + 'static,
{
   let cors = warp::cors()
      .allow_any_origin()
      .allow_methods(vec!["GET", "POST", "OPTIONS"])
      .allow_headers(vec!["Content-Type", "Accept"]);

   let status_route = warp::path!("status")
      .and(warp::get())
      .and(with_state(state.clone()))
      .and_then(status_handler::<S, P>);

   let api_route = warp::path!("api")
      .and(warp::post())
      .and(with_state(state))
      .and(warp::body::json::<JsonRpcRequest>())
      .and_then(api_handler::<S, P>);

   let routes = status_route
      .or(api_route)
      .with(cors)
      .with(warp::trace::request());

   let addr = SocketAddr::from(([127, 0, 0, 1], port));
   info!("Bridge RPC server listening on {}", addr);

   warp::serve(routes).run(addr).await;

   Ok(())
}
