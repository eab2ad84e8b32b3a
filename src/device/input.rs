//! Shell command builders for `input` injection

use super::geometry::Point;
use std::time::Duration;

/// Escape text for the device shell `input text` command.
///
/// `%s` is how `input text` spells a space; shell metacharacters are
/// backslash-escaped because adb joins arguments into one shell line.
pub fn escape_input_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() * 2);
    for ch in text.chars() {
        match ch {
            ' ' => escaped.push_str("%s"),
            '\\' | '"' | '\'' | '`' | '$' | '!' | '?' | '&' | '|' | ';' | '(' | ')' | '[' | ']'
            | '{' | '}' | '<' | '>' | '*' | '#' | '~' => {
                escaped.push('\\');
                escaped.push(ch);
            }
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// One continuous touch through `points` spread evenly over `duration`.
///
/// Built from `input motionevent DOWN/MOVE/UP` so that the finger stays down
/// between points, which `input swipe` cannot express for more than two.
pub fn motionevent_script(duration: Duration, points: &[Point]) -> Option<String> {
    let (first, rest) = points.split_first()?;
    let segments = rest.len().max(1) as u32;
    let pause = format!("sleep {:.3}", (duration / segments).as_secs_f64());

    let (x, y) = first.to_pixels();
    let mut steps = vec![format!("input motionevent DOWN {x} {y}")];
    for point in rest {
        let (x, y) = point.to_pixels();
        steps.push(pause.clone());
        steps.push(format!("input motionevent MOVE {x} {y}"));
    }
    let (x, y) = points.last().unwrap_or(first).to_pixels();
    if rest.is_empty() {
        steps.push(pause);
    }
    steps.push(format!("input motionevent UP {x} {y}"));
    Some(steps.join("; "))
}
