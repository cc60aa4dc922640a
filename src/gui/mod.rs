pub mod app;
pub mod ui;

use eframe::egui::{Align, ComboBox, Context, Layout, RichText, Ui};
use std::sync::{Arc, RwLock};

use crate::core::{WC_PROJECT_ID_ENV, WalletCtx, sync_native_balance, utils::RT};
use lazy_static::lazy_static;
use rigo_eth::{
   chain::ChainId,
   value::{NumericValue, truncate_address},
};
use ui::{MsgWindow, Notification, SendUi, TokenInfoUi, button, rich_text};

lazy_static! {
   pub static ref SHARED_GUI: SharedGUI = SharedGUI::default();
}

#[derive(Clone)]
pub struct SharedGUI(Arc<RwLock<GUI>>);

impl SharedGUI {
   /// Shared access to the [GUI]
   pub fn read<R>(&self, reader: impl FnOnce(&GUI) -> R) -> R {
      reader(&self.0.read().unwrap())
   }

   /// Exclusive mutable access to the [GUI]
   pub fn write<R>(&self, writer: impl FnOnce(&mut GUI) -> R) -> R {
      writer(&mut self.0.write().unwrap())
   }

   pub fn request_repaint(&self) {
      self.read(|gui| gui.request_repaint());
   }
}

impl Default for SharedGUI {
   fn default() -> Self {
      Self(Arc::new(RwLock::new(GUI::default())))
   }
}

pub struct GUI {
   pub egui_ctx: Context,

   pub ctx: WalletCtx,

   pub send: SendUi,

   pub token_info: TokenInfoUi,

   pub notification: Notification,

   pub msg_window: MsgWindow,
}

impl GUI {
   pub fn new(egui_ctx: Context) -> Self {
      Self {
         egui_ctx,
         ctx: WalletCtx::new(),
         send: SendUi::new(),
         token_info: TokenInfoUi::new(),
         notification: Notification::new(),
         msg_window: MsgWindow::new(),
      }
   }

   pub fn show_top_panel(&mut self, ui: &mut Ui) {
      let ctx = self.ctx.clone();
      let connected = ctx.is_connected();

      ui.horizontal(|ui| {
         ui.label(RichText::new("My Wallet").size(20.0).strong());

         ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            if connected {
               if ui.add(button(rich_text("Disconnect"))).clicked() {
                  ctx.write(|ctx| {
                     ctx.session.disconnect();
                     ctx.native_balance = NumericValue::default();
                  });
               }

               if let Some(address) = ctx.current_address() {
                  ui.add_space(10.0);
                  ui.label(rich_text(truncate_address(&address.to_string(), 20)));
               }
            } else if ui.add(button(rich_text("Connect"))).clicked() {
               self.connect_wallet();
            }

            ui.add_space(10.0);
            chain_select(&ctx, ui);
         });
      });
   }

   pub fn show_central_panel(&mut self, ui: &mut Ui) {
      let ctx = self.ctx.clone();

      self.send.show(ctx.clone(), &mut self.notification, ui);
      self.token_info.show(ctx, ui);
   }

   pub fn open_msg_window(&mut self, title: impl Into<String>, msg: impl Into<String>) {
      self.msg_window.open(title, msg);
   }

   pub fn request_repaint(&self) {
      self.egui_ctx.request_repaint();
   }

   fn connect_wallet(&mut self) {
      let ctx = self.ctx.clone();
      let (ready, dev_key) = ctx.read(|ctx| (ctx.config.is_ready(), ctx.config.dev_key.clone()));

      if !ready {
         self.msg_window.open(
            "WalletConnect is not configured",
            format!("Set {} and restart the app", WC_PROJECT_ID_ENV),
         );
         return;
      }

      match ctx.write(|ctx| ctx.session.connect(dev_key.as_deref())) {
         Ok(address) => {
            tracing::info!("Connected wallet {}", address);

            RT.spawn(async move {
               match sync_native_balance(ctx).await {
                  Ok(_) => {}
                  Err(e) => {
                     tracing::error!("Failed to sync native balance: {:?}", e);
                  }
               }
            });
         }
         Err(e) => {
            self.msg_window.open("Failed to connect", e.to_string());
         }
      }
   }
}

impl Default for GUI {
   fn default() -> Self {
      GUI::new(Context::default())
   }
}

fn chain_select(ctx: &WalletCtx, ui: &mut Ui) {
   let current = ctx.chain();

   ComboBox::from_id_salt("chain_select")
      .width(140.0)
      .selected_text(rich_text(current.name()))
      .show_ui(ui, |ui| {
         for chain in ChainId::supported_chains() {
            if ui.selectable_label(current == chain, rich_text(chain.name())).clicked() {
               if current != chain {
                  ctx.write(|ctx| {
                     ctx.chain = chain;
                     ctx.native_balance = NumericValue::default();
                  });

                  let ctx = ctx.clone();
                  RT.spawn(async move {
                     match sync_native_balance(ctx).await {
                        Ok(_) => {}
                        Err(e) => {
                           tracing::error!("Failed to sync native balance: {:?}", e);
                        }
                     }
                  });
               }
            }
         }
      });
}
