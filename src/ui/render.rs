use crate::config::FieldDescriptor;
use crate::ui::footer::Footer;
use crate::ui::header::Header;
use crate::ui::layout::{centered_rect, layout_regions};
use crate::ui::setup::{EntryStatus, FocusTarget, FormMode, SetupState};
use crate::ui::theme::{
    ACCENT, ACTIVE_HIGHLIGHT, FORM_BORDER, GLOBAL_BORDER, HEADER_TEXT, MUTED_TEXT, STATUS_ERROR,
    STATUS_OK,
};
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap};
use ratatui::Frame;

const MASK_CHAR: char = '•';
const BANNER_HEIGHT: u16 = 3;

pub fn draw(frame: &mut Frame<'_>, state: &SetupState) {
    let area = frame.area();
    let banner_height = if state.error.is_some() {
        BANNER_HEIGHT
    } else {
        0
    };
    let (header, body, banner, footer) = layout_regions(area, banner_height);

    frame.render_widget(Header::new().widget(state), header);
    frame.render_widget(Clear, body);
    draw_entries(frame, state, body);

    if state.form.is_visible() {
        draw_form(frame, state, centered_rect(70, 90, body));
    }

    if let Some(error) = &state.error {
        let widget = Paragraph::new(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(STATUS_ERROR),
        )))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(STATUS_ERROR)),
        );
        frame.render_widget(widget, banner);
    }

    frame.render_widget(Footer::new().widget(state, footer), footer);
}

fn draw_entries(frame: &mut Frame<'_>, state: &SetupState, area: Rect) {
    let block = Block::default()
        .title(Span::styled(
            format!(" {} Entries ", state.config.conf_type),
            Style::default().fg(ACCENT),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(GLOBAL_BORDER));

    if let Some(message) = state.list_placeholder() {
        let widget = Paragraph::new(Line::from(Span::styled(
            message,
            Style::default().fg(MUTED_TEXT),
        )))
        .block(block);
        frame.render_widget(widget, area);
        return;
    }

    let table = state.table();
    let header = Row::new(
        table
            .headers
            .iter()
            .map(|title| Cell::from(title.clone()))
            .collect::<Vec<_>>(),
    )
    .style(
        Style::default()
            .fg(HEADER_TEXT)
            .add_modifier(Modifier::BOLD),
    );

    let status_column = table.headers.len().saturating_sub(1);
    let rows = table.rows.iter().map(|row| {
        let cells = row.cells.iter().enumerate().map(|(idx, text)| {
            let style = if idx == status_column {
                match row.status {
                    EntryStatus::Enabled => Style::default().fg(STATUS_OK),
                    EntryStatus::Disabled => Style::default().fg(MUTED_TEXT),
                }
            } else {
                Style::default().fg(HEADER_TEXT)
            };
            Cell::from(text.clone()).style(style)
        });
        Row::new(cells)
    });

    let widths = table
        .headers
        .iter()
        .map(|_| Constraint::Fill(1))
        .collect::<Vec<_>>();

    let widget = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().bg(ACTIVE_HIGHLIGHT))
        .highlight_symbol("› ");

    let mut table_state = TableState::default().with_selected(Some(state.selected));
    frame.render_stateful_widget(widget, area, &mut table_state);
}

fn draw_form(frame: &mut Frame<'_>, state: &SetupState, area: Rect) {
    let form = &state.form;
    let title = match &form.mode {
        FormMode::Editing { original } => format!(" Edit {} '{}' ", state.config.conf_type, original),
        FormMode::Creating | FormMode::Hidden => format!(" New {} ", state.config.conf_type),
    };

    let focused = form.focused_target(&state.config);
    let mut lines = Vec::new();

    for target in form.targets(&state.config) {
        let is_focused = focused.as_ref() == Some(&target);
        let (label, required, value) = match &target {
            FocusTarget::Stanza => ("Name".to_string(), true, form.stanza.clone()),
            FocusTarget::Field(name) => match state.config.field(name) {
                Some(descriptor) => (
                    descriptor.label.clone(),
                    descriptor.required,
                    display_value(state, descriptor, form.value(name)),
                ),
                None => continue,
            },
        };

        let marker = if required { "*" } else { " " };
        let mut line = Line::from(vec![
            Span::styled(
                format!("{marker}{label:<20} "),
                Style::default().fg(if is_focused { ACCENT } else { HEADER_TEXT }),
            ),
            Span::styled(value, Style::default().fg(HEADER_TEXT)),
            Span::styled(
                if is_focused { "▏" } else { "" },
                Style::default().fg(ACCENT),
            ),
        ]);
        if is_focused {
            line = line.style(Style::default().bg(ACTIVE_HIGHLIGHT));
        }
        lines.push(line);

        if let Some(message) = form.error_for(target.key()) {
            lines.push(Line::from(Span::styled(
                format!("  {message}"),
                Style::default().fg(STATUS_ERROR),
            )));
        }
    }

    if let Some(descriptor) = state.focused_descriptor() {
        lines.push(Line::from(""));
        for text in [&descriptor.description, &descriptor.help]
            .into_iter()
            .flatten()
        {
            lines.push(Line::from(Span::styled(
                text.clone(),
                Style::default().fg(MUTED_TEXT),
            )));
        }
        if let Some(example) = &descriptor.example {
            lines.push(Line::from(Span::styled(
                format!("e.g. {example}"),
                Style::default().fg(MUTED_TEXT),
            )));
        }
    }

    if form.is_editing() && state.config.fields.iter().any(|field| field.is_secret()) {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Leave the password blank to keep the stored one.",
            Style::default().fg(MUTED_TEXT),
        )));
    }

    frame.render_widget(Clear, area);
    let block = Block::default()
        .title(Span::styled(title, Style::default().fg(ACCENT)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(FORM_BORDER));
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(block),
        area,
    );
}

/// Secret and hidden values render as one mask character per input char.
fn display_value(state: &SetupState, descriptor: &FieldDescriptor, value: &str) -> String {
    if descriptor.hidden || descriptor.is_secret() || state.config.is_secret(&descriptor.name) {
        std::iter::repeat_n(MASK_CHAR, value.chars().count()).collect()
    } else {
        value.to_string()
    }
}
