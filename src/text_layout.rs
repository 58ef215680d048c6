use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Word-wraps `text` to `width` columns. Words longer than a line are broken
/// mid-word; explicit newlines always start a new line.
pub fn wrap_lines(text: &str, width: u16) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        wrap_paragraph(paragraph, width, &mut lines);
    }
    lines
}

/// Display columns taken by `text`, as ratatui lays it out.
pub fn column_width(text: &str) -> u16 {
    text.width().min(u16::MAX as usize) as u16
}

fn char_width(ch: char) -> u16 {
    ch.width().unwrap_or(0) as u16
}

fn wrap_paragraph(paragraph: &str, width: u16, lines: &mut Vec<String>) {
    let chars: Vec<char> = paragraph.chars().collect();
    let mut line = String::new();
    let mut col = 0u16;

    for (idx, ch) in chars.iter().copied().enumerate() {
        let ch_width = char_width(ch);
        if should_wrap_before_word(&chars, idx, col, width)
            || (col > 0 && col.saturating_add(ch_width) > width)
        {
            lines.push(std::mem::take(&mut line).trim_end().to_string());
            col = 0;
        }
        if col == 0 && ch.is_whitespace() && !lines.is_empty() && idx > 0 {
            continue;
        }
        line.push(ch);
        col = col.saturating_add(ch_width);
    }
    lines.push(line);
}

fn should_wrap_before_word(chars: &[char], idx: usize, col: u16, width: u16) -> bool {
    if col == 0 {
        return false;
    }
    let ch = chars[idx];
    if ch.is_whitespace() {
        return false;
    }
    if idx > 0 && !chars[idx - 1].is_whitespace() {
        return false;
    }

    let word_len = chars[idx..]
        .iter()
        .take_while(|c| !c.is_whitespace())
        .map(|c| char_width(*c))
        .fold(0u16, u16::saturating_add);

    word_len <= width && col.saturating_add(word_len) > width
}
