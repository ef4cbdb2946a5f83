use async_trait::async_trait;

use crate::board::CardView;

/// Where cards end up. The controller only hands over plain values.
#[async_trait]
pub trait Renderer: Send {
    /// Append a card at the end of the dashboard.
    fn render_card(&mut self, card: CardView);

    /// Fade the card out, then drop it. Resolves once it is gone.
    async fn remove_card(&mut self, name: &str);

    /// Flip the card between collapsed and expanded. `None` if there is no such card.
    fn toggle_expanded(&mut self, name: &str) -> Option<bool>;

    /// Loading indicator, only used for user-initiated adds.
    fn set_loading(&mut self, loading: bool);

    /// Show a short message to the user.
    fn notify(&mut self, message: &str);

    /// Forget every card, e.g. before a full refresh.
    fn clear(&mut self);
}
