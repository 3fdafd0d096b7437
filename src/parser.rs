use std::sync::OnceLock;

use regex::Regex;

use crate::block::{ListKind, ScanState};
use crate::inline::apply_inline_formatting;

const FENCE: &str = "```";
const BULLETS: [&str; 3] = ["- ", "* ", "+ "];

/// Scan markdown line by line into HTML fragments, one or more per input line.
///
/// Lines are split on `\n` only. An open list is closed after the last line;
/// an unterminated code fence is left open.
pub fn parse(markdown: &str) -> Vec<String> {
    let mut fragments = Vec::new();
    let mut state = ScanState::default();

    for line in markdown.split('\n') {
        process_line(line, &mut state, &mut fragments);
    }

    if let Some(kind) = state.list.take() {
        fragments.push(kind.close_tag().to_string());
    }

    fragments
}

fn process_line(line: &str, state: &mut ScanState, fragments: &mut Vec<String>) {
    let trimmed = line.trim();

    // Fences toggle code-block state and are never content
    if let Some(lang) = trimmed.strip_prefix(FENCE) {
        if state.in_code_block {
            fragments.push("</code></pre>".to_string());
        } else {
            fragments.push(format!("<pre><code class=\"{}\">", lang.trim()));
        }
        state.in_code_block = !state.in_code_block;
        return;
    }

    if state.in_code_block {
        fragments.push(escape_angle_brackets(line));
        return;
    }

    if let Some((level, content)) = heading(line) {
        let content = apply_inline_formatting(content);
        fragments.push(format!("<h{level}>{content}</h{level}>"));
        return;
    }

    if let Some(content) = bullet_item(trimmed) {
        push_list_item(ListKind::Unordered, content, state, fragments);
        return;
    }

    if let Some(content) = ordered_item(trimmed) {
        push_list_item(ListKind::Ordered, content, state, fragments);
        return;
    }

    // A digit-led line that is not an ordered item does not end the list
    if let Some(kind) = state.list {
        if bullet_item(trimmed).is_none() && !starts_with_digit(trimmed) {
            fragments.push(kind.close_tag().to_string());
            state.list = None;
        }
    }

    if trimmed.is_empty() {
        fragments.push("<br>".to_string());
    } else {
        fragments.push(format!("<p>{}</p>", apply_inline_formatting(line)));
    }
}

/// `#` run of length 1-6 at the very start of the line, then one space.
fn heading(line: &str) -> Option<(usize, &str)> {
    let level = line.bytes().take_while(|&b| b == b'#').count();
    if level == 0 || level > 6 {
        return None;
    }
    line[level..]
        .strip_prefix(' ')
        .map(|content| (level, content.trim()))
}

fn bullet_item(trimmed: &str) -> Option<&str> {
    BULLETS
        .iter()
        .find_map(|bullet| trimmed.strip_prefix(bullet))
        .map(str::trim)
}

/// Digit first, and `". "` somewhere in the first four characters.
fn ordered_item(trimmed: &str) -> Option<&str> {
    if !starts_with_digit(trimmed) {
        return None;
    }
    let head_end = trimmed
        .char_indices()
        .nth(4)
        .map_or(trimmed.len(), |(idx, _)| idx);
    if !trimmed[..head_end].contains(". ") {
        return None;
    }
    trimmed.split_once(". ").map(|(_, content)| content)
}

// Decimal digits of any script, plus the superscript, subscript and circled
// forms that also carry a digit value. Fractions and roman numerals do not count.
const LEADING_DIGIT: &str = concat!(
    r"^[\p{Nd}",
    r"\x{B2}\x{B3}\x{B9}\x{1369}-\x{1371}\x{19DA}\x{2070}\x{2074}-\x{2079}\x{2080}-\x{2089}",
    r"\x{2460}-\x{2468}\x{2474}-\x{247C}\x{2488}-\x{2490}\x{24EA}\x{24F5}-\x{24FD}\x{24FF}",
    r"\x{2776}-\x{277E}\x{2780}-\x{2788}\x{278A}-\x{2792}",
    r"\x{10A40}-\x{10A43}\x{10E60}-\x{10E68}\x{11052}-\x{1105A}\x{1F100}-\x{1F10A}]",
);

fn starts_with_digit(trimmed: &str) -> bool {
    static DIGIT: OnceLock<Regex> = OnceLock::new();
    DIGIT
        .get_or_init(|| Regex::new(LEADING_DIGIT).expect("Invalid digit pattern"))
        .is_match(trimmed)
}

fn push_list_item(
    kind: ListKind,
    content: &str,
    state: &mut ScanState,
    fragments: &mut Vec<String>,
) {
    // An item of the other kind joins the list that is already open
    if state.list.is_none() {
        fragments.push(kind.open_tag().to_string());
        state.list = Some(kind);
    }
    fragments.push(format!("  <li>{}</li>", apply_inline_formatting(content)));
}

fn escape_angle_brackets(line: &str) -> String {
    line.replace('<', "&lt;").replace('>', "&gt;")
}
