use super::{Line, Line2, Mode, Segment};

/// Token in a template replaced by the chosen word.
pub const FILL_MARKER: &str = "*****";
/// Shown for an unset template or an unfilled marker.
pub const PLACEHOLDER: &str = "...";
pub const FULL_WIDTH_COMMA: &str = "，";
/// A rendered segment ending in one of these needs no joining comma.
pub const TERMINAL_PUNCTUATION: [char; 5] = ['，', '。', '？', '！', '…'];

pub fn format_segment(segment: &Segment) -> String {
    if segment.template.is_empty() {
        return PLACEHOLDER.to_string();
    }
    if segment.has_fill_marker() {
        let word = if segment.word.is_empty() {
            PLACEHOLDER
        } else {
            segment.word.as_str()
        };
        return segment.template.replace(FILL_MARKER, word);
    }
    segment.template.clone()
}

/// Render a line. A full-width comma goes between segment 1 and the
/// conjunction unless the conjunction is that comma or segment 1 already ends
/// in terminal punctuation.
pub fn compose_line(line: &Line) -> String {
    let mut text = format_segment(&line.segment1);
    if line.has_conjunction() {
        let punctuated = text
            .chars()
            .next_back()
            .is_some_and(|c| TERMINAL_PUNCTUATION.contains(&c));
        if line.conjunction != FULL_WIDTH_COMMA && !punctuated {
            text.push_str(FULL_WIDTH_COMMA);
        }
        text.push_str(&line.conjunction);
        text.push_str(&format_segment(&line.segment2));
    }
    text
}

/// Full message text: line 1, plus line 2 on its own row in double mode.
pub fn compose_message(mode: Mode, line1: &Line, line2: &Line2) -> String {
    let first = compose_line(line1);
    if mode == Mode::Single {
        return first;
    }

    let mut second = compose_line(&line2.line);
    let start = line2.start_conjunction.as_str();
    if !start.is_empty() && start != FULL_WIDTH_COMMA {
        second.insert_str(0, start);
    }
    format!("{first}\n{second}")
}
