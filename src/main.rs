use clap::{Parser, Subcommand};
use moac_eth::{
   alloy_primitives::{Address, Bytes, U256},
   types::{ChainId, MAINNET},
   utils::address_book,
};
use std::panic;
use tracing::info;

pub mod core;
pub mod server;

use crate::core::{
   AppConfig, AppCtx, ConfigArgs, TxRequest,
   price_impact::{PriceImpactSeverity, TerminalPrompt, confirm_price_impact},
   utils::trace::setup_tracing,
};
use crate::server::{ServerState, run_server};

#[derive(Parser)]
#[command(name = "moacswap")]
#[command(about = "Send swap transactions through the Moac wallet bridge", long_about = None)]
#[command(version)]
struct Cli {
   #[command(flatten)]
   config: ConfigArgs,

   #[command(subcommand)]
   command: Commands,
}

#[derive(Subcommand)]
enum Commands {
   /// Run the local JSON-RPC server dapps send their transactions to
   Serve,

   /// Print the account of the active wallet
   Account,

   /// Send a transaction through the wallet
   Send {
      #[arg(long)]
      to: Address,

      /// Amount in sha
      #[arg(long, default_value = "0")]
      value: U256,

      /// Must match the active wallet
      #[arg(long)]
      from: Option<Address>,

      #[arg(long)]
      gas_limit: Option<u64>,

      /// Hex encoded call data
      #[arg(long)]
      data: Option<Bytes>,

      #[arg(long)]
      nonce: Option<u64>,

      /// Price impact of the swap in %, asks for confirmation when it is high
      #[arg(long)]
      price_impact: Option<f64>,
   },

   /// Check a price impact (in %) against the confirmation thresholds
   Impact { percent: f64 },

   /// Print the multicall contract address
   Multicall {
      #[arg(long)]
      chain: Option<u64>,
   },

   /// Print the configured wallet connectors as json
   Connectors,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
   panic::set_hook(Box::new(|panic_info| {
      let message = panic_info
         .payload()
         .downcast_ref::<&str>()
         .map_or("Unknown panic", |s| s);
      let location = panic_info
         .location()
         .map_or("Unknown location".to_string(), |loc| {
            format!("{}:{}:{}", loc.file(), loc.line(), loc.column())
         });
      tracing::error!("Panic occurred: '{}' at {}", message, location);
   }));

   let _tracing_guard = setup_tracing();
   let cli = Cli::parse();

   match cli.command {
      Commands::Impact { percent } => {
         let severity = PriceImpactSeverity::from_percent(percent);
         let mut prompt = TerminalPrompt::stdio();
         if confirm_price_impact(percent, &mut prompt) {
            println!("proceed ({:?})", severity);
         } else {
            anyhow::bail!("Swap cancelled ({:?})", severity);
         }
      }

      Commands::Multicall { chain } => {
         let chain = chain.or(cli.config.chain_id).unwrap_or(MAINNET);
         let address = address_book::multicall(chain)?;
         println!("{} {}", ChainId::new(chain)?.name(), address);
      }

      Commands::Connectors => {
         let ctx = AppCtx::new(AppConfig::from_args(cli.config)?)?;
         println!("{}", serde_json::to_string_pretty(ctx.connectors())?);
      }

      Commands::Account => {
         let ctx = AppCtx::new(AppConfig::from_args(cli.config)?)?;
         match ctx.dispatcher().account().await {
            Some(account) => println!("{}", account),
            None => println!("No active account"),
         }
      }

      Commands::Send {
         to,
         value,
         from,
         gas_limit,
         data,
         nonce,
         price_impact,
      } => {
         let ctx = AppCtx::new(AppConfig::from_args(cli.config)?)?;

         if let Some(percent) = price_impact {
            let mut prompt = TerminalPrompt::stdio();
            if !confirm_price_impact(percent, &mut prompt) {
               info!("Swap cancelled at {}% price impact", percent);
               return Ok(());
            }
         }

         let request = TxRequest {
            from,
            to,
            value,
            gas_limit,
            data,
            nonce,
         };

         let hash = ctx.dispatcher().dispatch(request).await?;
         println!("{}", hash);
      }

      Commands::Serve => {
         let ctx = AppCtx::new(AppConfig::from_args(cli.config)?)?;
         let state = ServerState::new(ctx.dispatcher(), ctx.chain_id());
         run_server(state, ctx.config().server_port).await?;
      }
   }

   Ok(())
}
