use ratatui::prelude::*;
use ratatui::widgets::{Clear, Paragraph};

use crate::app::Model;
use crate::editor::char_width;

/// Render the complete UI.
///
/// Highlighting for the viewport window is refreshed first, then every text
/// row, the bottom status/command row, and finally the cursor. A pending
/// status message is consumed here so it shows for exactly one frame.
pub fn render(model: &mut Model, frame: &mut Frame) {
    let _scope = crate::perf::scope("ui.render");
    let area = frame.area();
    frame.render_widget(Clear, area);
    if area.width == 0 || area.height == 0 {
        return;
    }
    frame.buffer_mut().set_style(area, model.config.theme.base);

    model.refresh_highlights();

    let status = model.take_status();
    let bottom_busy = model.mode.is_command() || status.is_some();
    let text_rows = if bottom_busy {
        area.height - 1
    } else {
        area.height
    };

    render_text(model, frame, Rect { height: text_rows, ..area });

    let bottom = Rect {
        y: area.y + area.height - 1,
        height: 1,
        ..area
    };
    if let Some(line) = model.mode.command_line() {
        render_bottom_row(model, frame, bottom, line.as_str());
    } else if let Some(message) = &status {
        render_bottom_row(model, frame, bottom, message);
    }

    place_cursor(model, frame, area);
}

fn render_text(model: &Model, frame: &mut Frame, area: Rect) {
    let theme = model.config.theme;
    let cursor = model.buffer.cursor();
    let gutter = model.gutter_width();
    let number_width = usize::from(gutter.saturating_sub(1));
    let offset_x = model.viewport.offset_x();
    let offset_y = model.viewport.offset_y();
    let tab_width = model.buffer.tab_width();
    let buf = frame.buffer_mut();

    for y in 0..area.height {
        let line_idx = offset_y + usize::from(y);
        let Some(line) = model.buffer.line_at(line_idx) else {
            break;
        };
        let row = area.y + y;
        let current = model.config.highlight_current_line && line_idx == cursor.line;
        let emphasize = |style: Style| {
            if current { theme.emphasize(style) } else { style }
        };

        if current {
            buf.set_style(Rect { y: row, height: 1, ..area }, emphasize(theme.base));
        }

        if gutter > 0 {
            let number = format!("{:>number_width$} ", line_idx + 1);
            buf.set_stringn(area.x, row, number, usize::from(gutter), emphasize(theme.gutter));
        }

        let highlight = model.highlight_cache.get(line_idx);
        let right = area.x + area.width;
        let mut visual = 0;
        'chars: for (offset, ch) in line.chars().enumerate() {
            let width = char_width(ch, tab_width);
            let style = emphasize(highlight.style_at(offset).unwrap_or(theme.base));
            let symbol = if ch == '\t' { ' ' } else { ch };
            for col in visual..visual + width {
                if col < offset_x {
                    continue;
                }
                let Some(x) = u16::try_from(col - offset_x)
                    .ok()
                    .and_then(|dx| (area.x + gutter).checked_add(dx))
                    .filter(|x| *x < right)
                else {
                    break 'chars;
                };
                if let Some(cell) = buf.cell_mut((x, row)) {
                    cell.set_char(symbol).set_style(style);
                }
            }
            visual += width;
        }
    }
}

fn render_bottom_row(model: &Model, frame: &mut Frame, area: Rect, text: &str) {
    let row = Paragraph::new(text.to_string()).style(model.config.theme.status);
    frame.render_widget(row, area);
}

fn place_cursor(model: &Model, frame: &mut Frame, area: Rect) {
    let last_col = area.x + area.width - 1;
    if model.mode.is_command() {
        let typed = model
            .mode
            .command_line()
            .map_or(0, |line| line.as_str().chars().count());
        let x = u16::try_from(typed).unwrap_or(u16::MAX).min(area.width - 1);
        frame.set_cursor_position((area.x + x, area.y + area.height - 1));
        return;
    }

    let cursor = model.buffer.cursor();
    let dx = cursor.visual_col.saturating_sub(model.viewport.offset_x());
    let dy = cursor.line.saturating_sub(model.viewport.offset_y());
    let x = u16::try_from(dx)
        .ok()
        .and_then(|dx| (area.x + model.gutter_width()).checked_add(dx))
        .map_or(last_col, |x| x.min(last_col));
    let y = u16::try_from(dy).unwrap_or(u16::MAX).min(area.height - 1);
    frame.set_cursor_position((x, area.y + y));
}

/// Digits needed to print the largest line number.
pub const fn line_number_width(total_lines: usize) -> u16 {
    let mut width = 1;
    let mut n = total_lines;
    while n >= 10 {
        n /= 10;
        width += 1;
    }
    width
}
