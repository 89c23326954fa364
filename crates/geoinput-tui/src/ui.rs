use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph};
use ratatui::Frame;

use geoinput_core::TextInput;

use crate::app::App;
use crate::layout::PickerLayout;

/// Main render function.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(app.theme.bg())), area);

    let layout = PickerLayout::compute(area, app.widget.surface().rows().map_or(0, <[String]>::len));

    render_title(frame, app, layout.title);
    render_input(frame, app, &layout);
    render_dropdown(frame, app, layout.list);
    render_status(frame, app, layout.status);
    render_hints(frame, app, layout.hints);
}

fn render_title(frame: &mut Frame, app: &App, area: Rect) {
    let title = Paragraph::new(Line::from(Span::styled(
        " geoinput ",
        Style::default().fg(app.theme.frost_ice()).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(title, area);
}

fn render_input(frame: &mut Frame, app: &App, layout: &PickerLayout) {
    let surface = app.widget.surface();
    let handle = app.widget.input();
    let text = surface.text_input();

    let border = if surface.rows().is_some() {
        app.theme.frost_ice()
    } else {
        app.theme.border()
    };
    let block = Block::default()
        .title(format!(" {} ", handle.name))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(app.theme.bg()));

    let inner = block.inner(layout.input);
    frame.render_widget(block, layout.input);

    let line = if text.value.is_empty() {
        Line::from(Span::styled(
            handle.placeholder.clone(),
            Style::default().fg(app.theme.muted()).add_modifier(Modifier::ITALIC),
        ))
    } else {
        Line::from(Span::styled(text.value.clone(), Style::default().fg(app.theme.fg_bright())))
    };
    frame.render_widget(Paragraph::new(line), inner);

    if surface.is_clear_visible() {
        let clear = Paragraph::new(Span::styled(
            " ✕ ",
            Style::default().fg(app.theme.frost_blue()).add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(clear, layout.clear_button);
    }

    frame.set_cursor_position((cursor_x(inner, text), inner.y));
}

/// Screen column of the text cursor, kept inside `inner`.
fn cursor_x(inner: Rect, text: &TextInput) -> u16 {
    let column = u16::try_from(text.value[..text.cursor].chars().count()).unwrap_or(u16::MAX);
    inner
        .x
        .saturating_add(column)
        .min(inner.right().saturating_sub(1))
}

fn render_dropdown(frame: &mut Frame, app: &App, area: Rect) {
    let surface = app.widget.surface();
    let Some(rows) = surface.rows() else {
        return;
    };
    frame.render_widget(Clear, area);

    let items: Vec<ListItem> = rows
        .iter()
        .enumerate()
        .map(|(i, text)| {
            let is_sel = surface.highlighted() == Some(i);
            let style = if is_sel {
                Style::default()
                    .bg(app.theme.bg_secondary())
                    .fg(app.theme.frost_ice())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(app.theme.fg())
            };
            let marker = if is_sel { "▶ " } else { "  " };
            ListItem::new(Span::styled(format!("{marker}{text}"), style))
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.frost_ice()))
        .style(Style::default().bg(app.theme.bg_secondary()));

    frame.render_widget(List::new(items).block(block), area);
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let state = app.widget.state();
    let line = if state.has_pending_timer() || state.has_pending_request() {
        Line::from(Span::styled(" searching…", Style::default().fg(app.theme.muted())))
    } else if let Some(candidate) = app.selection() {
        let mut spans = vec![Span::styled(
            format!(" {}", candidate.formatted),
            Style::default().fg(app.theme.green()),
        )];
        if let Some(coords) = candidate.coordinates() {
            spans.push(Span::styled(
                format!("  ({:.5}, {:.5})", coords.lat, coords.lon),
                Style::default().fg(app.theme.muted()),
            ));
        }
        Line::from(spans)
    } else {
        Line::from(Span::styled(" no address selected", Style::default().fg(app.theme.muted())))
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_hints(frame: &mut Frame, app: &App, area: Rect) {
    let key = Style::default().fg(app.theme.yellow()).add_modifier(Modifier::BOLD);
    let text = Style::default().fg(app.theme.muted()).add_modifier(Modifier::DIM);
    let hints = Line::from(vec![
        Span::styled(" ↑↓", key),
        Span::styled(" navigate  ", text),
        Span::styled("Enter", key),
        Span::styled(" select/confirm  ", text),
        Span::styled("Esc", key),
        Span::styled(" clear/quit  ", text),
        Span::styled("Tab", key),
        Span::styled(" close list  ", text),
        Span::styled("Ctrl-C", key),
        Span::styled(" quit", text),
    ]);
    frame.render_widget(Paragraph::new(hints), area);
}
