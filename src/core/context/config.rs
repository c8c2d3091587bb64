use crate::core::dispatch::{
   APPROVAL_TIMEOUT, DEFAULT_GAS_LIMIT, DEFAULT_GAS_PRICE_GSHA, DispatchConfig, REQUEST_TIMEOUT,
};
use anyhow::{anyhow, bail};
use clap::Args;
use moac_eth::types::MAINNET;
use std::time::Duration;

pub const DEFAULT_BRIDGE_URL: &str = "http://127.0.0.1:8645";
pub const DEFAULT_BLOCKCHAIN: &str = "moac";
pub const DEFAULT_SERVER_PORT: u16 = 65534;

/// Settings read from flags or the environment
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigArgs {
   /// JSON-RPC url of the network node
   #[arg(long, env = "NETWORK_URL", global = true)]
   pub network_url: Option<String>,

   /// Chain id of the network
   #[arg(long, env = "CHAIN_ID", global = true)]
   pub chain_id: Option<u64>,

   #[arg(long, env = "FORTMATIC_KEY", global = true, hide_env_values = true)]
   pub fortmatic_key: Option<String>,

   #[arg(long, env = "PORTIS_ID", global = true)]
   pub portis_id: Option<String>,

   /// Url of the wallet bridge
   #[arg(long, env = "BRIDGE_URL", global = true)]
   pub bridge_url: Option<String>,

   /// Blockchain name the wallet bridge resolves nodes for
   #[arg(long, env = "BRIDGE_BLOCKCHAIN", global = true)]
   pub blockchain: Option<String>,

   /// Gas price in gsha
   #[arg(long, env = "GAS_PRICE_GSHA", global = true)]
   pub gas_price_gsha: Option<u64>,

   /// Gas limit used when a transaction does not set one
   #[arg(long, env = "DEFAULT_GAS_LIMIT", global = true)]
   pub default_gas_limit: Option<u64>,

   /// Seconds to wait for the wallet to answer a query
   #[arg(long, env = "REQUEST_TIMEOUT", global = true)]
   pub request_timeout: Option<u64>,

   /// Seconds to wait for the user to approve a transaction
   #[arg(long, env = "APPROVAL_TIMEOUT", global = true)]
   pub approval_timeout: Option<u64>,

   #[arg(long, env = "SERVER_PORT", global = true)]
   pub server_port: Option<u16>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
   pub network_url: String,
   pub chain_id: u64,
   pub fortmatic_key: String,
   pub portis_id: String,
   pub bridge_url: String,
   pub blockchain: String,
   pub server_port: u16,
   pub dispatch: DispatchConfig,
}

impl AppConfig {
   pub fn from_args(args: ConfigArgs) -> Result<Self, anyhow::Error> {
      let network_url = args
         .network_url
         .filter(|url| !url.trim().is_empty())
         .ok_or_else(|| anyhow!("NETWORK_URL must be a defined environment variable"))?;

      if !(network_url.starts_with("http://") || network_url.starts_with("https://")) {
         bail!("NETWORK_URL must be an http(s) url, got {}", network_url);
      }

      let request_timeout = args.request_timeout.unwrap_or(REQUEST_TIMEOUT);
      let approval_timeout = args.approval_timeout.unwrap_or(APPROVAL_TIMEOUT);
      if request_timeout == 0 || approval_timeout == 0 {
         bail!("Timeouts must be greater than zero");
      }

      let dispatch = DispatchConfig {
         default_gas_limit: args.default_gas_limit.unwrap_or(DEFAULT_GAS_LIMIT),
         gas_price_gsha: args.gas_price_gsha.unwrap_or(DEFAULT_GAS_PRICE_GSHA),
         request_timeout: Duration::from_secs(request_timeout),
         approval_timeout: Duration::from_secs(approval_timeout),
      };

      Ok(Self {
         network_url,
         chain_id: args.chain_id.unwrap_or(MAINNET),
         fortmatic_key: args.fortmatic_key.unwrap_or_default(),
         portis_id: args.portis_id.unwrap_or_default(),
         bridge_url: args.bridge_url.unwrap_or_else(|| DEFAULT_BRIDGE_URL.to_string()),
         blockchain: args.blockchain.unwrap_or_else(|| DEFAULT_BLOCKCHAIN.to_string()),
         server_port: args.server_port.unwrap_or(DEFAULT_SERVER_PORT),
         dispatch,
      })
   }
}

#[cfg(test)]
mod tests {
   use super::*;

   fn args() -> ConfigArgs {
      ConfigArgs {
         network_url: Some("https://gateway.moac.io/testnet".to_string()),
         ..Default::default()
      }
   }

   #[test]
   fn network_url_is_required() {
      let err = AppConfig::from_args(ConfigArgs::default()).unwrap_err();
      assert_eq!(err.to_string(), "NETWORK_URL must be a defined environment variable");

      let blank = ConfigArgs {
         network_url: Some("  ".to_string()),
         ..Default::default()
      };
      assert!(AppConfig::from_args(blank).is_err());
   }

   #[test]
   fn defaults() {
      let config = AppConfig::from_args(args()).unwrap();
      assert_eq!(config.chain_id, 1);
      assert_eq!(config.fortmatic_key, "");
      assert_eq!(config.bridge_url, DEFAULT_BRIDGE_URL);
      assert_eq!(config.blockchain, "moac");
      assert_eq!(config.dispatch, DispatchConfig::default());
   }

   #[test]
   fn overrides() {
      let args = ConfigArgs {
         chain_id: Some(101),
         gas_price_gsha: Some(20),
         default_gas_limit: Some(1_000_000),
         approval_timeout: Some(10),
         ..args()
      };
      let config = AppConfig::from_args(args).unwrap();
      assert_eq!(config.chain_id, 101);
      assert_eq!(config.dispatch.gas_price(), 20_000_000_000);
      assert_eq!(config.dispatch.default_gas_limit, 1_000_000);
      assert_eq!(config.dispatch.approval_timeout, Duration::from_secs(10));
   }

   #[test]
   fn rejects_bad_values() {
      let args1 = ConfigArgs {
         network_url: Some("ftp://node".to_string()),
         ..Default::default()
      };
      assert!(AppConfig::from_args(args1).is_err());

      let args2 = ConfigArgs {
         request_timeout: Some(0),
         ..args()
      };
      assert!(AppConfig::from_args(args2).is_err());
   }
}
