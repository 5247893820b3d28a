//! Glue between a chat surface and the conversation manager.

use crate::ai::CompletionBackend;
use crate::manager::ConversationManager;
use crate::rentals::RentalsSource;

pub const TYPING_INDICATOR: &str = "Assistant is typing...";

/// The visible side of the chat panel.
pub trait Renderer {
    fn render_user(&mut self, text: &str);
    fn render_assistant(&mut self, text: &str);
    fn show_typing(&mut self);
    fn clear_typing(&mut self);
}

pub struct ChatWidget<R, C, V> {
    manager: ConversationManager<R, C>,
    renderer: V,
    open: bool,
}

impl<R, C, V> ChatWidget<R, C, V>
where
    R: RentalsSource,
    C: CompletionBackend,
    V: Renderer,
{
    pub fn new(manager: ConversationManager<R, C>, renderer: V) -> Self {
        Self {
            manager,
            renderer,
            open: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Flips the panel open or closed and returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    pub fn manager(&self) -> &ConversationManager<R, C> {
        &self.manager
    }

    pub fn renderer(&self) -> &V {
        &self.renderer
    }

    /// Handles one form submission. Blank input renders nothing.
    pub async fn submit(&mut self, raw: &str) {
        let text = raw.trim();
        if text.is_empty() {
            return;
        }

        self.renderer.render_user(text);
        self.renderer.show_typing();
        let reply = self.manager.submit_user_turn(text).await;
        self.renderer.clear_typing();
        if let Some(reply) = reply {
            self.renderer.render_assistant(&reply);
        }
    }
}
