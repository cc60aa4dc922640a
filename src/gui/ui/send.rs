use crate::core::{
   FieldErrors, SendState, SendTransition, SendWatcher, WalletCtx, send_transfer, utils::RT,
   validate_transfer,
};
use crate::gui::SHARED_GUI;
use crate::gui::ui::{Notification, button, rich_text, text_edit_single};

use egui::{Align, Color32, Frame, Layout, Margin, Spinner, Ui, vec2};
use rigo_eth::value::truncate_address;

/// The native transfer form
pub struct SendUi {
   pub recipient: String,
   pub amount: String,
   /// Field errors are only shown after the first submit attempt
   touched: bool,
   pub state: SendState,
   watcher: SendWatcher,
   size: (f32, f32),
}

impl SendUi {
   pub fn new() -> Self {
      Self {
         recipient: String::new(),
         amount: String::new(),
         touched: false,
         state: SendState::default(),
         watcher: SendWatcher::default(),
         size: (450.0, 320.0),
      }
   }

   pub fn show(&mut self, ctx: WalletCtx, notification: &mut Notification, ui: &mut Ui) {
      // Notifications fire on state transitions, not on the state itself,
      // otherwise they would re-open on every repaint
      if let Some(transition) = self.watcher.observe(&self.state) {
         match transition {
            SendTransition::Started => {
               notification.open_info(
                  "Confirm transaction",
                  "Confirm transaction request in the wallet",
               );
            }
            SendTransition::Confirmed(_) => {
               notification.open_success("Transaction confirmed.");
               self.recipient.clear();
               self.amount.clear();
               self.touched = false;
            }
            SendTransition::Failed(msg) => {
               notification.open_error(msg);
            }
         }
      }

      let connected = ctx.is_connected();
      let pending = self.state.is_pending();
      let cap = ctx.transfer_cap();
      let balance = ctx.native_balance();
      let chain = ctx.chain();

      let errors = if self.touched {
         validate_transfer(&self.recipient, &self.amount, cap)
      } else {
         FieldErrors::default()
      };

      ui.vertical_centered(|ui| {
         Frame::group(ui.style()).inner_margin(Margin::same(10)).show(ui, |ui| {
            ui.set_width(self.size.0);
            ui.set_max_height(self.size.1);
            ui.spacing_mut().item_spacing = vec2(0.0, 15.0);
            ui.spacing_mut().button_padding = vec2(10.0, 8.0);

            if connected {
               ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                  let text = format!("{} {}", balance.formatted(), chain.coin_symbol());
                  ui.label(rich_text(text));
               });
            }

            ui.with_layout(Layout::top_down(Align::Min), |ui| {
               ui.label(rich_text("Send to:"));
            });

            let hint = rich_text("0xA0Cf…251e").color(Color32::GRAY);
            ui.add(
               text_edit_single(&mut self.recipient)
                  .hint_text(hint)
                  .desired_width(ui.available_width()),
            );

            if let Some(err) = &errors.recipient {
               ui.label(rich_text(err).color(Color32::LIGHT_RED));
            }

            ui.with_layout(Layout::top_down(Align::Min), |ui| {
               ui.label(rich_text("Amount:"));
            });

            let hint = rich_text("0.05").color(Color32::GRAY);
            ui.add(
               text_edit_single(&mut self.amount)
                  .hint_text(hint)
                  .desired_width(ui.available_width()),
            );

            if let Some(err) = &errors.amount {
               ui.label(rich_text(err).color(Color32::LIGHT_RED));
            }

            ui.horizontal(|ui| {
               let send = button(rich_text("Send"));

               if ui.add_enabled(can_submit(connected, pending), send).clicked() {
                  self.touched = true;

                  let errors = validate_transfer(&self.recipient, &self.amount, cap);
                  if errors.is_empty() {
                     self.submit(ctx.clone());
                  }
               }

               if pending {
                  ui.add_space(10.0);
                  ui.add(Spinner::new().size(20.0));
               }
            });

            if let SendState::Success(hash) = &self.state {
               let link = format!("{}/tx/{}", chain.block_explorer(), hash);
               ui.horizontal(|ui| {
                  ui.label(rich_text("Transaction Hash:"));
                  ui.add_space(5.0);
                  ui.hyperlink_to(rich_text(truncate_address(&hash.to_string(), 20)), link);
               });
            }
         });
      });
   }

   fn submit(&mut self, ctx: WalletCtx) {
      self.state = SendState::Pending;

      let chain = ctx.chain();
      let recipient = self.recipient.clone();
      let amount = self.amount.clone();

      RT.spawn(async move {
         match send_transfer(ctx, chain, recipient, amount).await {
            Ok(hash) => {
               SHARED_GUI.write(|gui| {
                  gui.send.state = SendState::Success(hash);
                  gui.request_repaint();
               });
            }
            Err(e) => {
               tracing::error!("Error sending transfer: {:?}", e);

               let mut msg = e.to_string();
               if msg.is_empty() {
                  msg = "Transaction failed".to_string();
               }

               SHARED_GUI.write(|gui| {
                  gui.send.state = SendState::Error(msg);
                  gui.request_repaint();
               });
            }
         }
      });
   }
}

fn can_submit(connected: bool, pending: bool) -> bool {
   connected && !pending
}
