//! Template engine for variable substitution.
//!
//! Layouts and documents are rendered through this module, both when a
//! child layout is merged into its parent and when a document is finally
//! wrapped by its layout.
//!
//! # Syntax
//!
//! - `{{ name }}` - Substitutes the value of variable `name` (surrounding
//!   whitespace is ignored)
//! - `{{" text "}}` - Verbatim block: `text` is emitted exactly as written,
//!   up to the first `"}}`, without interpreting any `{{` or `}}` inside it
//!
//! # Error Handling
//!
//! Undefined variables are an error unless the caller asks for them to be
//! tolerated. Tolerant rendering is used only while merging layouts: the
//! untouched placeholder is left in place for the final document render.

use crate::error::{Result, SiteError};
use std::collections::HashMap;

/// Variables available to a render, keyed by name.
pub type Variables = HashMap<String, String>;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";
const VERBATIM_CLOSE: &str = "\"}}";

/// A piece of a scanned template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Text outside of any `{{ ... }}`.
    Text(&'a str),
    /// A `{{" ... "}}` block.
    Verbatim {
        /// Text between the opening quote and the closing `"}}`.
        content: &'a str,
        /// The whole block including its markers.
        raw: &'a str,
    },
    /// A `{{ name }}` reference.
    Variable {
        /// The trimmed variable name.
        name: &'a str,
        /// The whole reference exactly as written.
        raw: &'a str,
        /// Byte offset of the opening `{{`.
        position: usize,
    },
}

#[derive(Debug, Clone, Copy)]
enum State {
    Plain,
    InVariable { start: usize },
    InVerbatim { start: usize },
    Done,
}

/// Single-pass scanner splitting a template into [`Segment`]s.
///
/// Each byte of the template is examined a bounded number of times, so
/// scanning is linear in the template length.
pub struct Scanner<'a> {
    template: &'a str,
    pos: usize,
    state: State,
}

impl<'a> Scanner<'a> {
    pub fn new(template: &'a str) -> Self {
        Self {
            template,
            pos: 0,
            state: State::Plain,
        }
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Result<Segment<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.state {
                State::Done => return None,
                State::Plain => {
                    let rest = &self.template[self.pos..];
                    if rest.is_empty() {
                        self.state = State::Done;
                        return None;
                    }
                    match rest.find(OPEN) {
                        None => {
                            self.pos = self.template.len();
                            self.state = State::Done;
                            return Some(Ok(Segment::Text(rest)));
                        }
                        Some(0) => {
                            let start = self.pos;
                            if rest[OPEN.len()..].starts_with('"') {
                                self.pos += OPEN.len() + 1;
                                self.state = State::InVerbatim { start };
                            } else {
                                self.pos += OPEN.len();
                                self.state = State::InVariable { start };
                            }
                        }
                        Some(idx) => {
                            self.pos += idx;
                            return Some(Ok(Segment::Text(&rest[..idx])));
                        }
                    }
                }
                State::InVerbatim { start } => {
                    let rest = &self.template[self.pos..];
                    let Some(idx) = rest.find(VERBATIM_CLOSE) else {
                        self.state = State::Done;
                        return Some(Err(SiteError::UnterminatedVerbatimBlock {
                            position: start,
                        }));
                    };
                    let content = &rest[..idx];
                    self.pos += idx + VERBATIM_CLOSE.len();
                    self.state = State::Plain;
                    return Some(Ok(Segment::Verbatim {
                        content,
                        raw: &self.template[start..self.pos],
                    }));
                }
                State::InVariable { start } => {
                    let rest = &self.template[self.pos..];
                    let Some(idx) = rest.find(CLOSE) else {
                        self.state = State::Done;
                        return Some(Err(SiteError::UnterminatedVariableReference {
                            position: start,
                        }));
                    };
                    let name = rest[..idx].trim();
                    self.pos += idx + CLOSE.len();
                    self.state = State::Plain;
                    return Some(Ok(Segment::Variable {
                        name,
                        raw: &self.template[start..self.pos],
                        position: start,
                    }));
                }
            }
        }
    }
}

/// Render a template string by substituting variables.
///
/// With `tolerate_undefined` set, an unknown `{{ name }}` is copied through
/// exactly as written and verbatim blocks keep their markers, so the output
/// is itself a template for a later pass. Without it, verbatim blocks are
/// unwrapped and an unknown variable fails with
/// [`SiteError::UndefinedVariable`].
///
/// Keeping the markers in tolerant mode departs from a plain "always copy
/// the enclosed text" rule on purpose: layout merges are intermediate passes,
/// and unwrapping there would expose verbatim text to the final render.
///
/// ```text
/// render("Hello {{ name }}!", &vars([("name", "Alice")]), false) == "Hello Alice!"
/// render("{{\" {{ name }} \"}}", &Variables::new(), false)        == " {{ name }} "
/// render("{{ missing }}", &Variables::new(), true)              == "{{ missing }}"
/// ```
pub fn render(template: &str, variables: &Variables, tolerate_undefined: bool) -> Result<String> {
    let mut result = String::with_capacity(template.len());

    for segment in Scanner::new(template) {
        match segment? {
            Segment::Text(text) => result.push_str(text),
            Segment::Verbatim { content, raw } => {
                if tolerate_undefined {
                    result.push_str(raw);
                } else {
                    result.push_str(content);
                }
            }
            Segment::Variable {
                name,
                raw,
                position,
            } => match variables.get(name) {
                Some(value) => result.push_str(value),
                None if tolerate_undefined => result.push_str(raw),
                None => {
                    return Err(SiteError::UndefinedVariable {
                        name: name.to_string(),
                        position,
                    });
                }
            },
        }
    }

    Ok(result)
}

/// Collect the names of all variable references outside verbatim blocks.
///
/// Names are returned in template order, including repeats.
pub fn placeholders(template: &str) -> Result<Vec<&str>> {
    let mut names = Vec::new();
    for segment in Scanner::new(template) {
        if let Segment::Variable { name, .. } = segment? {
            names.push(name);
        }
    }
    Ok(names)
}

/// Helper to create a variables map from a list of key-value pairs.
pub fn vars<I, K, V>(pairs: I) -> Variables
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_substitution() {
        let vars = vars([("name", "Bob")]);
        let result = render("A {{ name }} B", &vars, false).unwrap();
        assert_eq!(result, "A Bob B");
    }

    #[test]
    fn test_whitespace_around_name_is_optional() {
        let vars = vars([("name", "Bob")]);
        assert_eq!(render("{{name}}", &vars, false).unwrap(), "Bob");
        assert_eq!(render("{{   name\t}}", &vars, false).unwrap(), "Bob");
    }

    #[test]
    fn test_no_variables() {
        let result = render("Just plain text", &Variables::new(), false).unwrap();
        assert_eq!(result, "Just plain text");
    }

    #[test]
    fn test_empty_template() {
        assert_eq!(render("", &Variables::new(), false).unwrap(), "");
    }

    #[test]
    fn test_verbatim_block_is_not_substituted() {
        let template = "{{\" x {{ a }} y \"}}";
        assert_eq!(
            render(template, &Variables::new(), false).unwrap(),
            " x {{ a }} y "
        );

        let vars = vars([("a", "SHOULD NOT APPEAR")]);
        assert_eq!(render(template, &vars, false).unwrap(), " x {{ a }} y ");
    }

    #[test]
    fn test_verbatim_block_ends_at_first_closing_marker() {
        let vars = vars([("b", "B")]);
        let result = render("{{\"one\"}}\"}} {{ b }}", &vars, false).unwrap();
        assert_eq!(result, "one\"}} B");
    }

    #[test]
    fn test_verbatim_block_may_contain_quotes_and_braces() {
        let result = render("<{{\"say \"hi\" {{ }}\"}}>", &Variables::new(), false).unwrap();
        assert_eq!(result, "<say \"hi\" {{ }}>");
    }

    #[test]
    fn test_tolerant_render_keeps_verbatim_markers() {
        let template = "a {{\" {{ x }} \"}} b";
        let result = render(template, &Variables::new(), true).unwrap();
        assert_eq!(result, template);
        assert_eq!(render(&result, &Variables::new(), false).unwrap(), "a  {{ x }}  b");
    }

    #[test]
    fn test_undefined_variable_error() {
        let result = render("{{ missing }}", &Variables::new(), false);
        match result.unwrap_err() {
            SiteError::UndefinedVariable { name, position } => {
                assert_eq!(name, "missing");
                assert_eq!(position, 0);
            }
            err => panic!("unexpected error type: {:?}", err),
        }
    }

    #[test]
    fn test_undefined_variable_position() {
        let vars = vars([("a", "1")]);
        let err = render("{{ a }} and {{ b }}", &vars, false).unwrap_err();
        assert!(matches!(
            err,
            SiteError::UndefinedVariable { ref name, position: 12 } if name == "b"
        ));
    }

    #[test]
    fn test_tolerated_undefined_variable_is_left_untouched() {
        let result = render("{{ missing }}", &Variables::new(), true).unwrap();
        assert_eq!(result, "{{ missing }}");

        // The original spacing is preserved, not the trimmed name.
        let vars = vars([("known", "K")]);
        let result = render("{{known}} {{   later  }}", &vars, true).unwrap();
        assert_eq!(result, "K {{   later  }}");
    }

    #[test]
    fn test_unterminated_variable_reference() {
        let err = render("Hello {{ name", &Variables::new(), false).unwrap_err();
        assert!(matches!(
            err,
            SiteError::UnterminatedVariableReference { position: 6 }
        ));

        // Tolerance does not extend to syntax errors.
        let err = render("Hello {{ name", &Variables::new(), true).unwrap_err();
        assert!(matches!(
            err,
            SiteError::UnterminatedVariableReference { .. }
        ));
    }

    #[test]
    fn test_unterminated_verbatim_block() {
        let err = render("x {{\" never closed }}", &Variables::new(), false).unwrap_err();
        assert!(matches!(
            err,
            SiteError::UnterminatedVerbatimBlock { position: 2 }
        ));
    }

    #[test]
    fn test_lone_braces_are_plain_text() {
        let vars = vars([("x", "X")]);
        let result = render("fn f() { } }} {x} {{ x }}", &vars, false).unwrap();
        assert_eq!(result, "fn f() { } }} {x} X");
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let vars = vars([("content", "{{ title }}"), ("title", "T")]);
        let result = render("<main>{{ content }}</main>", &vars, false).unwrap();
        assert_eq!(result, "<main>{{ title }}</main>");
    }

    #[test]
    fn test_multiple_occurrences_and_adjacent_variables() {
        let vars = vars([("a", "A"), ("b", "B")]);
        assert_eq!(render("{{a}}{{b}}-{{a}}", &vars, false).unwrap(), "AB-A");
    }

    #[test]
    fn test_unicode_in_template_and_values() {
        let vars = vars([("emoji", "🎉"), ("text", "日本語")]);
        let result = render("こんにちは {{ emoji }} {{ text }}!", &vars, false).unwrap();
        assert_eq!(result, "こんにちは 🎉 日本語!");
    }

    #[test]
    fn test_placeholders_skip_verbatim_blocks() {
        let names = placeholders("{{ title }}{{\" {{ hidden }} \"}}{{content}}{{ title }}").unwrap();
        assert_eq!(names, vec!["title", "content", "title"]);
    }

    #[test]
    fn test_scanner_segments() {
        let segments: Vec<_> = Scanner::new("a{{ b }}c{{\"d\"}}")
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(
            segments,
            vec![
                Segment::Text("a"),
                Segment::Variable {
                    name: "b",
                    raw: "{{ b }}",
                    position: 1
                },
                Segment::Text("c"),
                Segment::Verbatim {
                    content: "d",
                    raw: "{{\"d\"}}"
                },
            ]
        );
    }

    #[test]
    fn test_scanner_stops_after_error() {
        let mut scanner = Scanner::new("ok {{ broken");
        assert!(matches!(scanner.next(), Some(Ok(Segment::Text("ok ")))));
        assert!(matches!(scanner.next(), Some(Err(_))));
        assert!(scanner.next().is_none());
    }
}
