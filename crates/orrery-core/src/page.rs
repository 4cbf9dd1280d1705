//! Effects on the surrounding page
//!
//! The scene never touches page elements directly. It issues [`PageCommand`]s
//! into a [`PageOutbox`], and whichever host is attached (the browser DOM or
//! the native overlay) applies them.

use glam::Vec2;

use crate::navigation::SectionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Default,
    /// Something under the pointer can be clicked
    Pointer,
}

impl Cursor {
    pub fn css(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Pointer => "pointer",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageCommand {
    ShowTooltip { text: String, position: Vec2 },
    HideTooltip,
    SetCursor(Cursor),
    SetBackVisible(bool),
    /// Activate one panel and its nav link, or none of them
    ActivateSection(Option<SectionId>),
    HideLoading,
}

/// Anything that can carry out page commands
pub trait HostPage {
    fn apply(&mut self, command: &PageCommand);
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub text: String,
    pub position: Vec2,
}

/// What the page should currently look like
#[derive(Debug, Clone, PartialEq)]
pub struct PageState {
    pub tooltip: Option<Tooltip>,
    pub cursor: Cursor,
    pub back_visible: bool,
    pub active_section: Option<SectionId>,
    pub loading_visible: bool,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            tooltip: None,
            cursor: Cursor::Default,
            back_visible: false,
            active_section: None,
            loading_visible: true,
        }
    }
}

impl HostPage for PageState {
    fn apply(&mut self, command: &PageCommand) {
        match command {
            PageCommand::ShowTooltip { text, position } => {
                self.tooltip = Some(Tooltip {
                    text: text.clone(),
                    position: *position,
                });
            }
            PageCommand::HideTooltip => self.tooltip = None,
            PageCommand::SetCursor(cursor) => self.cursor = *cursor,
            PageCommand::SetBackVisible(visible) => self.back_visible = *visible,
            PageCommand::ActivateSection(section) => self.active_section = section.clone(),
            PageCommand::HideLoading => self.loading_visible = false,
        }
    }
}

/// Page state mirror plus the commands not yet handed to a host
#[derive(Debug, Clone, Default)]
pub struct PageOutbox {
    state: PageState,
    queued: Vec<PageCommand>,
}

impl PageOutbox {
    /// Queue `command` unless the page already looks that way
    pub fn issue(&mut self, command: PageCommand) {
        let mut next = self.state.clone();
        next.apply(&command);
        if next != self.state {
            self.state = next;
            self.queued.push(command);
        }
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn drain(&mut self) -> Vec<PageCommand> {
        std::mem::take(&mut self.queued)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outbox_tracks_state() {
        let mut outbox = PageOutbox::default();
        assert!(outbox.state().loading_visible);

        outbox.issue(PageCommand::SetBackVisible(true));
        outbox.issue(PageCommand::ActivateSection(Some("home".into())));
        assert!(outbox.state().back_visible);
        assert_eq!(outbox.state().active_section, Some(SectionId::new("home")));
        assert_eq!(outbox.drain().len(), 2);
        assert!(outbox.drain().is_empty());
    }

    #[test]
    fn test_redundant_commands_are_dropped() {
        let mut outbox = PageOutbox::default();
        outbox.issue(PageCommand::HideTooltip);
        outbox.issue(PageCommand::SetCursor(Cursor::Default));
        outbox.issue(PageCommand::SetBackVisible(false));
        assert!(outbox.drain().is_empty());

        outbox.issue(PageCommand::SetCursor(Cursor::Pointer));
        outbox.issue(PageCommand::SetCursor(Cursor::Pointer));
        assert_eq!(outbox.drain(), vec![PageCommand::SetCursor(Cursor::Pointer)]);
    }

    #[test]
    fn test_tooltip_moves_with_pointer() {
        let mut outbox = PageOutbox::default();
        for x in [10.0, 20.0] {
            outbox.issue(PageCommand::ShowTooltip {
                text: "Home".to_string(),
                position: Vec2::new(x, 0.0),
            });
        }
        assert_eq!(outbox.drain().len(), 2);
        assert_eq!(outbox.state().tooltip.as_ref().map(|t| t.position.x), Some(20.0));
    }

    #[test]
    fn test_cursor_css() {
        assert_eq!(Cursor::Default.css(), "default");
        assert_eq!(Cursor::Pointer.css(), "pointer");
    }
}
