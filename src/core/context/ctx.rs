use super::{AppConfig, Connectors};
use crate::core::{
   bridge::BridgeClient,
   dispatch::Dispatcher,
};
use std::sync::Arc;

/// Dispatcher talking to the wallet bridge for both signing and platform detection
pub type BridgeDispatcher = Dispatcher<BridgeClient, BridgeClient>;

/// Cheap to clone handle to the [AppContext]
///
/// Built once at startup and passed to everything that needs the config or the wallet.
#[derive(Clone)]
pub struct AppCtx(Arc<AppContext>);

impl AppCtx {
   pub fn new(config: AppConfig) -> Result<Self, anyhow::Error> {
      Ok(Self(Arc::new(AppContext::new(config)?)))
   }

   pub fn config(&self) -> &AppConfig {
      &self.0.config
   }

   pub fn connectors(&self) -> &Connectors {
      &self.0.connectors
   }

   pub fn chain_id(&self) -> u64 {
      self.0.config.chain_id
   }

   pub fn dispatcher(&self) -> Arc<BridgeDispatcher> {
      self.0.dispatcher.clone()
   }
}

pub struct AppContext {
   pub config: AppConfig,
   pub connectors: Connectors,
   pub dispatcher: Arc<BridgeDispatcher>,
}

impl AppContext {
   pub fn new(config: AppConfig) -> Result<Self, anyhow::Error> {
      let connectors = Connectors::from_config(&config);

      let client = BridgeClient::new(
         config.bridge_url.clone(),
         config.blockchain.clone(),
         config.dispatch.request_timeout,
      )?;
      let dispatcher = Dispatcher::new(client.clone(), client, config.dispatch.clone());

      Ok(Self {
         config,
         connectors,
         dispatcher: Arc::new(dispatcher),
      })
   }
}

#[cfg(test)]
mod tests {
   use super::*;
   use crate::core::context::ConfigArgs;

   #[test]
   fn context_from_config() {
      let args = ConfigArgs {
         network_url: Some("https://gateway.moac.io/testnet".to_string()),
         chain_id: Some(101),
         bridge_url: Some("http://127.0.0.1:9000/".to_string()),
         ..Default::default()
      };
      let ctx = AppCtx::new(AppConfig::from_args(args).unwrap()).unwrap();

      assert_eq!(ctx.chain_id(), 101);
      assert_eq!(ctx.connectors().network.default_chain_id, 101);
      assert_eq!(ctx.dispatcher().service().base_url(), "http://127.0.0.1:9000");

      let clone = ctx.clone();
      assert!(Arc::ptr_eq(&ctx.dispatcher(), &clone.dispatcher()));
   }
}
