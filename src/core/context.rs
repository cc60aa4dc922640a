use crate::core::{client::RigoClient, config::Config, session::WalletSession};
use rigo_eth::{alloy_primitives::Address, chain::ChainId, value::NumericValue};
use std::sync::{Arc, RwLock};

pub struct WalletContext {
   pub chain: ChainId,
   pub client: RigoClient,
   pub session: WalletSession,
   pub native_balance: NumericValue,
   pub config: Config,
}

impl WalletContext {
   pub fn new() -> Self {
      Self {
         chain: ChainId::default(),
         client: RigoClient::default(),
         session: WalletSession::new(),
         native_balance: NumericValue::default(),
         config: Config::default(),
      }
   }
}

/// Cheap to clone handle over the app state, shared between the GUI and background tasks
#[derive(Clone)]
pub struct WalletCtx(Arc<RwLock<WalletContext>>);

impl WalletCtx {
   pub fn new() -> Self {
      Self(Arc::new(RwLock::new(WalletContext::new())))
   }

   pub fn read<R>(&self, reader: impl FnOnce(&WalletContext) -> R) -> R {
      reader(&self.0.read().unwrap())
   }

   pub fn write<R>(&self, writer: impl FnOnce(&mut WalletContext) -> R) -> R {
      writer(&mut self.0.write().unwrap())
   }

   pub fn chain(&self) -> ChainId {
      self.read(|ctx| ctx.chain)
   }

   pub fn client(&self) -> RigoClient {
      self.read(|ctx| ctx.client.clone())
   }

   pub fn is_connected(&self) -> bool {
      self.read(|ctx| ctx.session.is_connected())
   }

   pub fn current_address(&self) -> Option<Address> {
      self.read(|ctx| ctx.session.address())
   }

   pub fn native_balance(&self) -> NumericValue {
      self.read(|ctx| ctx.native_balance.clone())
   }

   pub fn transfer_cap(&self) -> Option<f64> {
      self.read(|ctx| ctx.config.transfer_cap)
   }
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn fresh_context_is_disconnected() {
      let ctx = WalletCtx::new();
      assert!(!ctx.is_connected());
      assert!(ctx.current_address().is_none());
      assert!(ctx.native_balance().is_zero());
      assert!(ctx.chain().is_ethereum());
   }

   #[test]
   fn chain_switch_is_visible_through_the_handle() {
      let ctx = WalletCtx::new();
      ctx.write(|c| c.chain = ChainId::base());
      assert_eq!(ctx.chain().id(), 8453);

      let other = ctx.clone();
      assert_eq!(other.chain().id(), 8453);
   }
}
