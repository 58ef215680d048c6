use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Padding, Paragraph};

use crate::app::{App, Screen};
use crate::response_log::{ActionDescriptor, Icon};
use crate::text_layout::{column_width, wrap_lines};
use crate::theme::Theme;

const TEXT_PADDING: u16 = 1;
const STATUS_HEIGHT: u16 = 1;
const PROMPT: &str = "> ";
const ENTRY_PROMPT: &str = ">_ ";
const CARET: &str = "█";
const BUTTON_GAP: u16 = 2;
const PICKER_MAX_WIDTH: u16 = 64;
const PICKER_VISIBLE_ROWS: usize = 5;
const STATUS_HELP_TEXT: &str =
    "Tab complete | ↑/↓ history | wheel suggestions | Alt+1-9 actions | F2 language | Ctrl+L clear | Ctrl+C quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ButtonRegion {
    line: usize,
    start: u16,
    end: u16,
    entry: usize,
    action: usize,
}

#[derive(Debug, Default)]
struct TerminalView {
    lines: Vec<Line<'static>>,
    buttons: Vec<ButtonRegion>,
}

impl TerminalView {
    fn push_wrapped(&mut self, text: &str, width: u16, style: Style) {
        for line in wrap_lines(text, width) {
            self.lines.push(Line::from(Span::styled(line, style)));
        }
    }

    fn blank(&mut self) {
        self.lines.push(Line::default());
    }
}

fn body_area(screen: Rect) -> Rect {
    let [body, _status] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(STATUS_HEIGHT)]).areas(screen);
    body
}

fn terminal_text_area(screen: Rect) -> Rect {
    Block::default()
        .padding(Padding::uniform(TEXT_PADDING))
        .inner(body_area(screen))
}

/// Where the picker overlay is drawn for `candidate_count` suggestions.
pub fn picker_area(screen: Rect, candidate_count: usize) -> Rect {
    let body = body_area(screen);
    let rows = candidate_count.clamp(1, PICKER_VISIBLE_ROWS) as u16;
    let width = body.width.saturating_sub(4).min(PICKER_MAX_WIDTH).max(1);
    let height = rows
        .saturating_add(2 + TEXT_PADDING * 2)
        .min(body.height.max(1));
    let x = body.x + body.width.saturating_sub(width) / 2;
    let y = body.y + body.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

pub fn picker_hit_test(screen: Rect, app: &App, x: u16, y: u16) -> bool {
    let count = app.engine().picker().candidates().len();
    point_in_rect(picker_area(screen, count), x, y)
}

/// Maps a click to the `(entry, action)` button under it.
pub fn action_hit_test(screen: Rect, app: &App, x: u16, y: u16) -> Option<(usize, usize)> {
    if app.screen() != &Screen::Terminal {
        return None;
    }
    let area = terminal_text_area(screen);
    if !point_in_rect(area, x, y) {
        return None;
    }
    let view = terminal_view(app, &Theme::default(), area.width);
    let line = usize::from(y - area.y) + usize::from(terminal_scroll(&view, area));
    let col = x - area.x;
    view.buttons
        .iter()
        .find(|button| button.line == line && col >= button.start && col < button.end)
        .map(|button| (button.entry, button.action))
}

pub fn render(frame: &mut Frame, app: &App, theme: &Theme) {
    let [body, status] = Layout::vertical([Constraint::Min(0), Constraint::Length(STATUS_HEIGHT)])
        .areas(frame.area());

    match app.screen() {
        Screen::Terminal => render_terminal(frame, body, app, theme),
        Screen::Page(name) => render_page(frame, body, app, name, theme),
    }

    frame.render_widget(
        Paragraph::new(status_line_text(app))
            .style(Style::default().bg(theme.status_bg).fg(theme.muted_fg)),
        status,
    );

    if app.screen() == &Screen::Terminal && app.engine().picker().is_open() {
        render_picker(frame, app, theme);
    }
}

fn render_terminal(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let block = Block::default()
        .style(Style::default().bg(theme.terminal_bg))
        .padding(Padding::uniform(TEXT_PADDING));
    let inner = block.inner(area);
    let view = terminal_view(app, theme, inner.width);
    let scroll = terminal_scroll(&view, inner);
    frame.render_widget(
        Paragraph::new(view.lines)
            .style(Style::default().bg(theme.terminal_bg).fg(theme.text_fg))
            .scroll((scroll, 0))
            .block(block),
        area,
    );
}

fn terminal_scroll(view: &TerminalView, area: Rect) -> u16 {
    let total = view.lines.len().min(u16::MAX as usize) as u16;
    total.saturating_sub(area.height)
}

fn terminal_view(app: &App, theme: &Theme, width: u16) -> TerminalView {
    let engine = app.engine();
    let messages = &app.content().messages;
    let width = width.max(1);
    let mut view = TerminalView::default();

    let greeting_style = Style::default()
        .fg(theme.prompt_fg)
        .add_modifier(Modifier::BOLD);
    view.push_wrapped(engine.greeting_text(), width, greeting_style);
    if !engine.greeting_complete()
        && engine.caret_visible()
        && let Some(last) = view.lines.last_mut()
    {
        last.spans.push(Span::styled(CARET, Style::default().fg(theme.prompt_fg)));
    }
    view.blank();

    let numbered = engine.log().last_with_actions().map(|(index, _)| index);
    for (index, entry) in engine.entries().iter().enumerate() {
        view.push_wrapped(
            &format!("{ENTRY_PROMPT}{}", entry.question),
            width,
            Style::default().fg(theme.prompt_fg),
        );
        let answer = if entry.loading {
            format!("{}{}", entry.answer, loading_dots(app.ticks))
        } else {
            entry.answer.clone()
        };
        view.push_wrapped(&answer, width, Style::default().fg(theme.text_fg));
        push_buttons(&mut view, index, &entry.actions, numbered == Some(index), width, theme);
        view.blank();
    }

    if engine.log().is_empty() && engine.greeting_complete() && !engine.is_redirecting() {
        view.push_wrapped(&messages.tip, width, Style::default().fg(theme.muted_fg));
        view.blank();
    }

    if engine.greeting_complete() && !engine.is_redirecting() {
        view.lines.push(input_line(app, theme));
    }
    view
}

fn push_buttons(
    view: &mut TerminalView,
    entry: usize,
    actions: &[ActionDescriptor],
    numbered: bool,
    width: u16,
    theme: &Theme,
) {
    if actions.is_empty() {
        return;
    }
    let style = Style::default()
        .fg(theme.action_fg)
        .add_modifier(Modifier::UNDERLINED);
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut col = 0u16;
    for (action, descriptor) in actions.iter().enumerate() {
        let label = button_label(descriptor, numbered.then_some(action + 1));
        let label_width = column_width(&label);
        if col > 0 && col.saturating_add(label_width) > width {
            view.lines.push(Line::from(std::mem::take(&mut spans)));
            col = 0;
        }
        if col > 0 {
            spans.push(Span::raw(" ".repeat(usize::from(BUTTON_GAP))));
            col = col.saturating_add(BUTTON_GAP);
        }
        view.buttons.push(ButtonRegion {
            line: view.lines.len(),
            start: col,
            end: col.saturating_add(label_width),
            entry,
            action,
        });
        spans.push(Span::styled(label, style));
        col = col.saturating_add(label_width);
    }
    view.lines.push(Line::from(spans));
}

fn button_label(action: &ActionDescriptor, number: Option<usize>) -> String {
    let mut label = String::from("[");
    if let Some(number) = number.filter(|n| *n <= 9) {
        label.push_str(&format!("{number} "));
    }
    if let Some(icon) = action.icon {
        label.push_str(icon_glyph(icon));
        label.push(' ');
    }
    label.push_str(&action.label);
    label.push(']');
    label
}

fn icon_glyph(icon: Icon) -> &'static str {
    match icon {
        Icon::FileText => "≡",
        Icon::Mail => "✉",
        Icon::Linkedin => "in",
        Icon::Github => "gh",
    }
}

fn input_line(app: &App, theme: &Theme) -> Line<'static> {
    let engine = app.engine();
    let mut spans = vec![
        Span::styled(PROMPT, Style::default().fg(theme.prompt_fg)),
        Span::styled(engine.input().to_string(), Style::default().fg(theme.text_fg)),
    ];
    let ghost = engine.completion();
    let caret = if engine.caret_visible() && !engine.picker().is_open() {
        CARET
    } else {
        " "
    };
    if !ghost.is_empty() {
        spans.push(Span::styled(ghost, Style::default().fg(theme.muted_fg)));
        spans.push(Span::styled(caret, Style::default().fg(theme.prompt_fg)));
    } else if engine.input().is_empty() {
        spans.push(Span::styled(caret, Style::default().fg(theme.prompt_fg)));
        spans.push(Span::styled(
            app.content().messages.input_placeholder.clone(),
            Style::default().fg(theme.muted_fg),
        ));
    } else {
        spans.push(Span::styled(caret, Style::default().fg(theme.prompt_fg)));
    }
    Line::from(spans)
}

fn loading_dots(ticks: u64) -> &'static str {
    const FRAMES: [&str; 4] = ["", ".", "..", "..."];
    FRAMES[((ticks / 8) as usize) % FRAMES.len()]
}

fn render_page(frame: &mut Frame, area: Rect, app: &App, name: &str, theme: &Theme) {
    let block = Block::default()
        .style(Style::default().bg(theme.terminal_bg))
        .padding(Padding::uniform(TEXT_PADDING));
    let width = block.inner(area).width.max(1);
    let messages = &app.content().messages;

    let mut lines: Vec<Line<'static>> = Vec::new();
    match app.current_page() {
        Some(page) => {
            lines.push(Line::from(Span::styled(
                page.title.clone(),
                Style::default()
                    .fg(theme.highlight_fg)
                    .add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::default());
            for line in wrap_lines(&page.summary, width) {
                lines.push(Line::from(Span::styled(line, Style::default().fg(theme.text_fg))));
            }
        }
        None => lines.push(Line::from(Span::styled(
            messages.no_such_page.replace("{target}", name),
            Style::default().fg(theme.text_fg),
        ))),
    }
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        messages.page_back.clone(),
        Style::default().fg(theme.muted_fg),
    )));

    frame.render_widget(
        Paragraph::new(lines)
            .style(Style::default().bg(theme.terminal_bg))
            .block(block),
        area,
    );
}

fn render_picker(frame: &mut Frame, app: &App, theme: &Theme) {
    let picker = app.engine().picker();
    let candidates = picker.candidates();
    if candidates.is_empty() {
        return;
    }
    let overlay = picker_area(frame.area(), candidates.len());
    let messages = &app.content().messages;

    let mut lines = Vec::with_capacity(PICKER_VISIBLE_ROWS + 2);
    lines.push(Line::from(Span::styled(
        messages.picker_title.clone(),
        Style::default().fg(theme.muted_fg),
    )));
    for index in wheel_window(candidates.len(), picker.selected_index()) {
        let selected = index == picker.selected_index();
        let style = if selected {
            Style::default()
                .fg(theme.highlight_fg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.muted_fg)
        };
        lines.push(Line::from(vec![
            Span::styled(if selected { "› " } else { "  " }, style),
            Span::styled(candidates[index].clone(), style),
        ]));
    }
    lines.push(Line::from(Span::styled(
        messages.picker_hint.clone(),
        Style::default().fg(theme.muted_fg),
    )));

    frame.render_widget(Clear, overlay);
    frame.render_widget(
        Paragraph::new(lines)
            .style(Style::default().bg(theme.overlay_bg))
            .block(
                Block::default()
                    .style(Style::default().bg(theme.overlay_bg))
                    .padding(Padding::uniform(TEXT_PADDING)),
            ),
        overlay,
    );
}

/// Indices shown in the picker, centered on `selected` and wrapping like a
/// wheel once there are more candidates than rows.
fn wheel_window(count: usize, selected: usize) -> Vec<usize> {
    if count <= PICKER_VISIBLE_ROWS {
        return (0..count).collect();
    }
    let half = PICKER_VISIBLE_ROWS / 2;
    (0..PICKER_VISIBLE_ROWS)
        .map(|offset| (selected + count + offset - half) % count)
        .collect()
}

fn status_line_text(app: &App) -> String {
    let locale = app.locale().code();
    match app.status() {
        Some(status) => format!(" {locale} | {status}"),
        None => format!(" {locale} | {STATUS_HELP_TEXT}"),
    }
}

fn point_in_rect(rect: Rect, x: u16, y: u16) -> bool {
    x >= rect.x
        && x < rect.x.saturating_add(rect.width)
        && y >= rect.y
        && y < rect.y.saturating_add(rect.height)
}
