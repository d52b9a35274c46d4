use crate::ui::setup::SetupState;
use crate::ui::theme::{GLOBAL_BORDER, HEADER_TEXT};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

const VERSION: &str = env!("CARGO_PKG_VERSION");

const LIST_HINTS: &str =
    " ↑/↓: Select │ N: New │ Enter/E: Edit │ D: Delete │ R: Refresh │ Q: Quit";
const FORM_HINTS: &str = " Tab/Shift+Tab: Field │ Space: Toggle │ Ctrl+S: Submit │ Esc: Cancel";
const FORM_BUSY_HINTS: &str = " Tab/Shift+Tab: Field │ Saving... │ Esc: Cancel";
const DISMISS_HINT: &str = " │ Ctrl+X: Dismiss";

pub struct Footer;

impl Footer {
    pub fn new() -> Self {
        Self
    }

    /// Key hints for the current mode. The submit hint is hidden while a
    /// request is in flight.
    pub fn hints(state: &SetupState) -> String {
        let base = match (state.form.is_visible(), state.in_flight) {
            (true, true) => FORM_BUSY_HINTS,
            (true, false) => FORM_HINTS,
            (false, _) => LIST_HINTS,
        };
        if state.error.is_some() {
            format!("{base}{DISMISS_HINT}")
        } else {
            base.to_string()
        }
    }

    pub fn widget(&self, state: &SetupState, area: Rect) -> Paragraph<'static> {
        let hints = Self::hints(state);
        let version = format!("v{} ", VERSION);

        let hints_width = hints.chars().count();
        let version_width = version.chars().count();
        let content_width = area.width.saturating_sub(2) as usize;
        let padding = content_width
            .saturating_sub(hints_width)
            .saturating_sub(version_width);

        let text_style = Style::default().fg(HEADER_TEXT).add_modifier(Modifier::DIM);

        let line = Line::from(vec![
            Span::styled(hints, text_style),
            Span::styled(" ".repeat(padding), text_style),
            Span::styled(version, text_style),
        ]);

        Paragraph::new(line)
            .style(text_style)
            .alignment(Alignment::Left)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(GLOBAL_BORDER)),
            )
    }
}
