#![allow(clippy::module_inception)]

use std::rc::Rc;

use crate::errors::errors::{Error, ErrorTip};

pub mod ast;
pub mod errors;
pub mod macros;
pub mod type_checker;
pub mod types;

extern crate regex;

#[derive(Debug, Clone, PartialEq)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn null() -> Self {
        Span {
            start: Position::null(),
            end: Position::null(),
        }
    }

    pub fn new(start: u32, end: u32, file: Rc<String>) -> Self {
        Span {
            start: Position(start, Rc::clone(&file)),
            end: Position(end, file),
        }
    }
}

/// Finds the line holding byte offset `position` in `contents`.
///
/// Returns the 1-based line number, the full line text and the column of
/// `position` inside that line.
pub fn get_line_at_position(contents: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;

    if pos >= contents.len() {
        return None;
    }

    let mut start = 0;
    let mut line_number = 1;

    for line in contents.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            let line_pos = pos - start;
            return Some((line_number, line.to_string(), line_pos));
        }

        start = end;
        line_number += 1;
    }

    None
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use crate::{
        errors::errors::{Error, ErrorImpl},
        Position,
    };

    const SOURCE: &str = "Hello, world!\nval x = 1\n\n  val y: i32 = 3.5\n";

    #[test]
    fn test_get_line_at_position() {
        let (line_number, line, line_pos) = super::get_line_at_position(SOURCE, 10).unwrap();
        assert_eq!(line_number, 1);
        assert_eq!(line, "Hello, world!\n");
        assert_eq!(line_pos, 10);

        let (line_number, line, line_pos) = super::get_line_at_position(SOURCE, 40).unwrap();
        assert_eq!(line_number, 4);
        assert_eq!(line, "  val y: i32 = 3.5\n");
        assert_eq!(line_pos, 15);
    }

    #[test]
    fn test_get_line_past_end() {
        assert!(super::get_line_at_position(SOURCE, 400).is_none());
    }

    #[test]
    fn test_format_error_points_at_column() {
        let error = Error::new(
            ErrorImpl::TypeMismatch {
                expected: "i32".to_string(),
                received: "string".to_string(),
            },
            Position(40, Rc::new("main.hx".to_string())),
        );

        let rendered = super::format_error(&error, SOURCE, "main.hx");
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "Error: TypeMismatch (Expected type `i32`, received `string`)");
        assert_eq!(lines[1], "-> main.hx");
        assert_eq!(lines[2], "  |");
        assert_eq!(lines[3], "4 | val y: i32 = 3.5");
        // caret sits under the `3` of `3.5`
        assert_eq!(lines[4], "  | -------------^");
    }

    #[test]
    fn test_format_error_without_source_line() {
        let error = Error::new(ErrorImpl::ReturnOutsideFunction, Position::null());
        let rendered = super::format_error(&error, "", "main.hx");

        assert!(rendered.starts_with("Error: ReturnOutsideFunction"));
        assert!(rendered.contains("-> main.hx"));
    }
}

/// Renders one diagnostic against the source it was reported for.
///
/// ```text
/// Error: TypeMismatch (Expected type `i32`, received `string`)
/// -> main.hx
///   |
/// 4 | val y: i32 = "a"
///   | -------------^
/// ```
pub fn format_error(error: &Error, source: &str, file_name: &str) -> String {
    let mut output = String::new();

    if let ErrorTip::None = error.get_tip() {
        output.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        output.push_str(&format!(
            "Error: {} ({})\n",
            error.get_error_name(),
            error.get_tip()
        ));
    }
    output.push_str(&format!("-> {}\n", file_name));

    let Some((line, line_text, line_pos)) = get_line_at_position(source, error.get_position().0)
    else {
        return output;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    output.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    output.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim()));

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;

    output.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));
    output
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}
