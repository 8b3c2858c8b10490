//! What RegionGuard needs from the server it runs in: online lookups,
//! permission checks and player messaging.

use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedColor {
    Red,
    Green,
    Gold,
    Yellow,
    Aqua,
    Gray,
}

/// A chat line: coloured text followed by child components with their own colours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextComponent {
    pub text: String,
    pub color: Option<NamedColor>,
    pub extra: Vec<TextComponent>,
}

impl TextComponent {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: None,
            extra: Vec::new(),
        }
    }

    #[must_use]
    pub fn add_child(mut self, child: TextComponent) -> Self {
        self.extra.push(child);
        self
    }

    /// The text of this component and its children, colours dropped.
    #[must_use]
    pub fn plain(&self) -> String {
        let mut out = self.text.clone();
        for child in &self.extra {
            out.push_str(&child.plain());
        }
        out
    }

    #[must_use]
    pub fn color_named(mut self, color: NamedColor) -> Self {
        self.color = Some(color);
        self
    }
}

/// Server-side collaborators. Implementations must be cheap: they are called
/// on the event dispatch thread.
pub trait Host: Send + Sync {
    /// Used to colour member names in region summaries.
    fn is_online(&self, player: &Uuid) -> bool;

    fn has_permission(&self, player: &Uuid, node: &str) -> bool;

    /// Chat message. Offline players are silently skipped.
    fn send_message(&self, player: &Uuid, message: TextComponent);

    /// Short notice above the hotbar.
    fn send_action_bar(&self, player: &Uuid, message: TextComponent);
}
