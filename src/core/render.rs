//! Human-readable rendering of log arguments
//!
//! Structured values are always fully expanded, one element per line, with a
//! four space indent per nesting level and a trailing comma after every
//! element. Rendering is deterministic: maps keep their entry order and set
//! members are sorted, and de-duplicated, by their rendered form.

use super::value::Value;
use colored::Colorize;
use unicode_width::UnicodeWidthStr;

const INDENT: &str = "    ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Style {
    Plain,
    Colored,
}

/// Whether `value` needs an expanded block rather than inline text
#[inline]
pub fn is_structured(value: &Value) -> bool {
    value.is_structured()
}

/// Plain multi-line rendering, optionally wrapped in a titled box.
///
/// Never contains escape codes, so the result is safe for files and handlers.
pub fn render_structured(value: &Value, title: Option<&str>) -> String {
    let body = expand(value, Style::Plain);
    match title {
        Some(title) => boxed(&body, &body, title),
        None => body,
    }
}

/// Same layout as [`render_structured`] with terminal colors, for the live console
pub fn render_colored(value: &Value, title: Option<&str>) -> String {
    let body = expand(value, Style::Colored);
    match title {
        Some(title) => boxed(&expand(value, Style::Plain), &body, title),
        None => body,
    }
}

/// Text of one message part: expanded block if structured, string form otherwise
pub fn render_part(value: &Value) -> String {
    if value.is_structured() {
        render_structured(value, None)
    } else {
        value.to_string()
    }
}

/// Join message parts into one body.
///
/// When any part is structured all parts are joined with newlines, so every
/// argument starts its own block. Otherwise they are joined with a space.
pub fn format_parts(parts: &[Value]) -> String {
    let separator = if parts.iter().any(Value::is_structured) {
        "\n"
    } else {
        " "
    };
    parts
        .iter()
        .map(render_part)
        .collect::<Vec<_>>()
        .join(separator)
}

/// Compact single-line representation (`{"a": [1, 2]}`)
pub fn inline(value: &Value) -> String {
    let mut out = String::new();
    write_inline(&mut out, value);
    out
}

fn write_inline(out: &mut String, value: &Value) {
    match value {
        Value::List(items) => write_inline_seq(out, "[", "]", items.iter(), false),
        Value::Tuple(items) => {
            write_inline_seq(out, "(", ")", items.iter(), items.len() == 1)
        }
        Value::Set(items) => {
            write_inline_seq(out, "{", "}", sorted_members(items).into_iter(), false)
        }
        Value::Map(entries) => {
            out.push('{');
            for (i, (key, val)) in entries.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_inline(out, key);
                out.push_str(": ");
                write_inline(out, val);
            }
            out.push('}');
        }
        scalar => out.push_str(&scalar_repr(scalar, Style::Plain)),
    }
}

fn write_inline_seq<'a>(
    out: &mut String,
    open: &str,
    close: &str,
    items: impl Iterator<Item = &'a Value>,
    trailing_comma: bool,
) {
    out.push_str(open);
    for (i, item) in items.enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_inline(out, item);
    }
    if trailing_comma {
        out.push(',');
    }
    out.push_str(close);
}

fn expand(value: &Value, style: Style) -> String {
    let mut out = String::new();
    write_expanded(&mut out, value, 0, style);
    out
}

fn write_expanded(out: &mut String, value: &Value, depth: usize, style: Style) {
    match value {
        Value::List(items) => write_block(
            out,
            ("[", "]"),
            items.iter().map(|v| (None, v)),
            depth,
            style,
        ),
        Value::Tuple(items) => write_block(
            out,
            ("(", ")"),
            items.iter().map(|v| (None, v)),
            depth,
            style,
        ),
        Value::Set(items) => write_block(
            out,
            ("{", "}"),
            sorted_members(items).into_iter().map(|v| (None, v)),
            depth,
            style,
        ),
        Value::Map(entries) => write_block(
            out,
            ("{", "}"),
            entries.iter().map(|(k, v)| (Some(k), v)),
            depth,
            style,
        ),
        scalar => out.push_str(&scalar_repr(scalar, style)),
    }
}

fn write_block<'a>(
    out: &mut String,
    (open, close): (&str, &str),
    items: impl Iterator<Item = (Option<&'a Value>, &'a Value)>,
    depth: usize,
    style: Style,
) {
    let mut items = items.peekable();
    out.push_str(open);
    if items.peek().is_none() {
        out.push_str(close);
        return;
    }
    out.push('\n');
    for (key, item) in items {
        push_indent(out, depth + 1);
        if let Some(key) = key {
            out.push_str(&scalar_repr(key, style));
            out.push_str(": ");
        }
        write_expanded(out, item, depth + 1, style);
        out.push_str(",\n");
    }
    push_indent(out, depth);
    out.push_str(close);
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

/// Set members in rendered order, each rendered form kept once
fn sorted_members(items: &[Value]) -> Vec<&Value> {
    let mut members: Vec<(String, &Value)> = items.iter().map(|v| (inline(v), v)).collect();
    members.sort_by(|a, b| a.0.cmp(&b.0));
    members.dedup_by(|a, b| a.0 == b.0);
    members.into_iter().map(|(_, v)| v).collect()
}

fn scalar_repr(value: &Value, style: Style) -> String {
    let text = match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Int(i) => i.to_string(),
        Value::Float(f) => format!("{:?}", f),
        Value::Str(s) => format!("{:?}", s),
        Value::Display(s) => s.clone(),
        structured => return inline(structured),
    };
    if style == Style::Plain {
        return text;
    }
    match value {
        Value::Str(_) => text.green().to_string(),
        Value::Int(_) | Value::Float(_) => text.cyan().to_string(),
        Value::Null | Value::Bool(_) => text.magenta().italic().to_string(),
        _ => text,
    }
}

/// Wrap `body` in a rounded box carrying `title` on its top border.
///
/// Widths are terminal columns measured on `plain` (the uncolored rendering
/// of the same layout), so escape codes in `body` do not skew the padding and
/// wide characters count twice.
fn boxed(plain: &str, body: &str, title: &str) -> String {
    let plain_lines: Vec<&str> = plain.lines().collect();
    let title_width = title.width();
    let content_width = plain_lines
        .iter()
        .map(|l| l.width())
        .max()
        .unwrap_or(0)
        .max(title_width + 1);

    let mut out = String::new();
    out.push_str("╭─ ");
    out.push_str(title);
    out.push(' ');
    out.push_str(&"─".repeat(content_width - title_width - 1));
    out.push_str("╮\n");

    for (plain_line, line) in plain_lines.iter().zip(body.lines()) {
        out.push_str("│ ");
        out.push_str(line);
        out.push_str(&" ".repeat(content_width - plain_line.width()));
        out.push_str(" │\n");
    }

    out.push('╰');
    out.push_str(&"─".repeat(content_width + 2));
    out.push('╯');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        Value::map([
            ("a", Value::from(1)),
            ("b", Value::from(vec![1, 2, 3])),
        ])
    }

    #[test]
    fn test_render_map_expanded() {
        let expected =
            "{\n    \"a\": 1,\n    \"b\": [\n        1,\n        2,\n        3,\n    ],\n}";
        assert_eq!(render_structured(&sample(), None), expected);
    }

    #[test]
    fn test_render_is_deterministic() {
        let first = render_structured(&sample(), None);
        let second = render_structured(&sample(), None);
        assert_eq!(first, second);
        assert!(!first.contains('\u{1b}'));
    }

    #[test]
    fn test_render_empty_containers() {
        assert_eq!(render_structured(&Value::List(vec![]), None), "[]");
        assert_eq!(render_structured(&Value::Tuple(vec![]), None), "()");
        assert_eq!(render_structured(&Value::Map(vec![]), None), "{}");
        assert_eq!(
            render_structured(&Value::map([("k", Value::List(vec![]))]), None),
            "{\n    \"k\": [],\n}"
        );
    }

    #[test]
    fn test_render_tuple_and_set() {
        assert_eq!(
            render_structured(&Value::from((1, "x")), None),
            "(\n    1,\n    \"x\",\n)"
        );
        let set = Value::set([3, 1, 2]);
        assert_eq!(render_structured(&set, None), "{\n    1,\n    2,\n    3,\n}");
    }

    #[test]
    fn test_set_members_rendered_once() {
        let set = Value::set([2, 1, 2, 1]);
        assert_eq!(render_structured(&set, None), "{\n    1,\n    2,\n}");
        assert_eq!(inline(&set), "{1, 2}");
        assert_eq!(inline(&Value::set(["a", "a"])), "{\"a\"}");
    }

    #[test]
    fn test_render_escapes_strings() {
        let value = Value::list(["line\nbreak", "quote\""]);
        assert_eq!(
            render_structured(&value, None),
            "[\n    \"line\\nbreak\",\n    \"quote\\\"\",\n]"
        );
    }

    #[test]
    fn test_render_with_title() {
        let rendered = render_structured(&Value::list([1]), Some("nums"));
        let expected = "╭─ nums ─╮\n│ [      │\n│     1, │\n│ ]      │\n╰────────╯";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_box_measures_wide_characters_in_columns() {
        let value = Value::map([("name", "홍길동"), ("id", "abc")]);
        let rendered = render_structured(&value, Some("사용자 데이터"));

        let widths: Vec<usize> = rendered.lines().map(|l| l.width()).collect();
        assert_eq!(widths, vec![25; 5], "{}", rendered);

        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "╭─ 사용자 데이터 ───────╮");
        assert_eq!(lines[2], "│     \"name\": \"홍길동\", │");
        assert_eq!(lines[3], "│     \"id\": \"abc\",      │");
    }

    #[test]
    fn test_colored_box_pads_on_plain_width() {
        colored::control::set_override(true);
        let rendered = render_colored(&Value::list(["abc"]), Some("t"));
        assert!(rendered.starts_with("╭─ t "));
        assert_eq!(rendered.lines().count(), 5);
    }

    #[test]
    fn test_format_parts_scalars_space_joined() {
        let parts = vec![Value::from("hello"), Value::from("world")];
        assert_eq!(format_parts(&parts), "hello world");

        let parts = vec![Value::from("count"), Value::from(3), Value::from(true)];
        assert_eq!(format_parts(&parts), "count 3 true");
    }

    #[test]
    fn test_format_parts_structured_newline_joined() {
        let parts = vec![Value::from("data:"), Value::from(json!({"a": 1}))];
        assert_eq!(format_parts(&parts), "data:\n{\n    \"a\": 1,\n}");
    }

    #[test]
    fn test_format_parts_single_line_structure_still_forces_newlines() {
        let parts = vec![Value::from("empty"), Value::List(vec![]), Value::from("done")];
        assert_eq!(format_parts(&parts), "empty\n[]\ndone");
    }

    #[test]
    fn test_format_parts_empty() {
        assert_eq!(format_parts(&[]), "");
    }

    #[test]
    fn test_inline() {
        assert_eq!(inline(&sample()), r#"{"a": 1, "b": [1, 2, 3]}"#);
        assert_eq!(inline(&Value::from((1,))), "(1,)");
        assert_eq!(inline(&Value::Float(1.0)), "1.0");
    }
}
