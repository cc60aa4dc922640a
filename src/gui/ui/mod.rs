pub mod notification;
pub mod send;
pub mod token_info;

pub use notification::{Notification, NotificationKind};
pub use send::SendUi;
pub use token_info::TokenInfoUi;

use eframe::egui::{
   Align2, Button, FontId, Frame, Order, RichText, Sense, TextEdit, Ui, Window,
   widget_text::WidgetText, vec2,
};

pub fn rich_text(text: impl Into<String>) -> RichText {
   RichText::new(text).size(15.0)
}

pub fn button(text: impl Into<WidgetText>) -> Button<'static> {
   Button::new(text)
      .sense(Sense::click())
      .min_size(vec2(70.0, 25.0))
}

pub fn text_edit_single(text: &mut String) -> TextEdit {
   let font = FontId::proportional(15.0);
   TextEdit::singleline(text)
      .min_size(vec2(150.0, 25.0))
      .font(font)
}

/// Simple window displaying a message, for example an error
#[derive(Default)]
pub struct MsgWindow {
   pub open: bool,
   pub title: String,
   pub message: String,
}

impl MsgWindow {
   pub fn new() -> Self {
      Self {
         open: false,
         title: String::new(),
         message: String::new(),
      }
   }

   /// Open the window with this title and message
   pub fn open(&mut self, title: impl Into<String>, msg: impl Into<String>) {
      self.open = true;
      self.title = title.into();
      self.message = msg.into();
   }

   pub fn reset(&mut self) {
      self.open = false;
      self.title.clear();
      self.message.clear();
   }

   pub fn show(&mut self, ui: &mut Ui) {
      if !self.open {
         return;
      }

      let title = RichText::new(self.title.clone()).size(16.0);
      let msg = RichText::new(&self.message).size(15.0);
      let ok = Button::new(RichText::new("Ok").size(15.0));

      Window::new(title)
         .resizable(false)
         .order(Order::Foreground)
         .movable(true)
         .anchor(Align2::CENTER_CENTER, vec2(0.0, 0.0))
         .collapsible(false)
         .frame(Frame::window(ui.style()))
         .show(ui.ctx(), |ui| {
            ui.vertical_centered(|ui| {
               ui.set_min_size(vec2(300.0, 100.0));
               ui.scope(|ui| {
                  ui.spacing_mut().item_spacing.y = 20.0;
                  ui.spacing_mut().button_padding = vec2(10.0, 8.0);

                  ui.label(msg);

                  if ui.add(ok).clicked() {
                     self.open = false;
                  }
               });
            });
         });
   }
}
