use super::AppConfig;
use moac_eth::types::{INJECTED_CHAINS, MAINNET, MOAC_MAIN, MOAC_TEST};
use serde::Serialize;
use std::collections::BTreeMap;

pub const WALLETCONNECT_BRIDGE: &str = "https://bridge.walletconnect.org";
pub const WALLETCONNECT_POLLING_INTERVAL_MS: u64 = 15_000;
pub const APP_NAME: &str = "Uniswap";
pub const APP_LOGO_URL: &str = "https://mpng.pngfly.com/20181202/bex/kisspng-emoji-domain-unicorn-pin-badges-sticker-unicorn-tumblr-emoji-unicorn-iphoneemoji-5c046729264a77.5671679315437924251569.jpg";

/// Read-only connector to the configured node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkConnector {
   pub urls: BTreeMap<u64, String>,
   pub default_chain_id: u64,
}

impl NetworkConnector {
   pub fn url(&self, chain_id: u64) -> Option<&str> {
      self.urls.get(&chain_id).map(String::as_str)
   }
}

/// Wallet injected by the browser or the wallet app
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InjectedConnector {
   pub supported_chain_ids: Vec<u64>,
}

impl InjectedConnector {
   pub fn supports(&self, chain_id: u64) -> bool {
      self.supported_chain_ids.contains(&chain_id)
   }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WalletConnectConnector {
   pub rpc: BTreeMap<u64, String>,
   pub bridge: String,
   pub qrcode: bool,
   pub polling_interval_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FortmaticConnector {
   pub api_key: String,
   pub chain_id: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortisConnector {
   pub dapp_id: String,
   pub networks: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WalletLinkConnector {
   pub url: String,
   pub app_name: String,
   pub app_logo_url: String,
}

/// All wallet connectors the frontend offers
///
/// WalletConnect, Fortmatic, Portis and WalletLink are mainnet only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Connectors {
   pub network: NetworkConnector,
   pub injected: InjectedConnector,
   pub walletconnect: WalletConnectConnector,
   pub fortmatic: FortmaticConnector,
   pub portis: PortisConnector,
   pub walletlink: WalletLinkConnector,
}

impl Connectors {
   pub fn from_config(config: &AppConfig) -> Self {
      let url = config.network_url.clone();

      let mut supported_chain_ids = INJECTED_CHAINS.to_vec();
      supported_chain_ids.extend([MOAC_MAIN, MOAC_TEST]);

      Self {
         network: NetworkConnector {
            urls: BTreeMap::from([(config.chain_id, url.clone())]),
            default_chain_id: config.chain_id,
         },
         injected: InjectedConnector {
            supported_chain_ids,
         },
         walletconnect: WalletConnectConnector {
            rpc: BTreeMap::from([(MAINNET, url.clone())]),
            bridge: WALLETCONNECT_BRIDGE.to_string(),
            qrcode: true,
            polling_interval_ms: WALLETCONNECT_POLLING_INTERVAL_MS,
         },
         fortmatic: FortmaticConnector {
            api_key: config.fortmatic_key.clone(),
            chain_id: MAINNET,
         },
         portis: PortisConnector {
            dapp_id: config.portis_id.clone(),
            networks: vec![MAINNET],
         },
         walletlink: WalletLinkConnector {
            url,
            app_name: APP_NAME.to_string(),
            app_logo_url: APP_LOGO_URL.to_string(),
         },
      }
   }
}

#[cfg(test)]
mod tests {
   use super::*;
   use crate::core::context::ConfigArgs;

   #[test]
   fn connectors_from_config() {
      let args = ConfigArgs {
         network_url: Some("https://gateway.moac.io/testnet".to_string()),
         chain_id: Some(MOAC_TEST),
         fortmatic_key: Some("pk_test".to_string()),
         ..Default::default()
      };
      let config = AppConfig::from_args(args).unwrap();
      let connectors = Connectors::from_config(&config);

      assert_eq!(connectors.network.default_chain_id, MOAC_TEST);
      assert_eq!(connectors.network.url(MOAC_TEST), Some("https://gateway.moac.io/testnet"));
      assert_eq!(connectors.network.url(MAINNET), None);

      assert!(connectors.injected.supports(42));
      assert!(connectors.injected.supports(MOAC_MAIN));
      assert!(!connectors.injected.supports(56));

      assert_eq!(connectors.fortmatic.api_key, "pk_test");
      assert_eq!(connectors.fortmatic.chain_id, MAINNET);
      assert_eq!(connectors.portis.dapp_id, "");
      assert_eq!(connectors.portis.networks, vec![MAINNET]);
      assert_eq!(connectors.walletconnect.rpc.get(&MAINNET).map(String::as_str), Some("https://gateway.moac.io/testnet"));
   }
}
