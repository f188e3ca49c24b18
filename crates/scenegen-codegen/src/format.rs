//! Source formatting
//!
//! Provides the [`Formatter`] trait and [`SourceFormatter`], a layout pass
//! over generated source with two parser profiles: `typescript` for the typed
//! dialect and `babel` for plain JSX.

use crate::config::GenerationConfig;
use crate::error::FormatError;
use std::fmt::{self, Display, Formatter as FmtFormatter};

/// Parser a profile validates against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parser {
    /// TypeScript + JSX
    Typescript,
    /// Plain JavaScript + JSX
    Babel,
}

impl Parser {
    /// Parser name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Typescript => "typescript",
            Self::Babel => "babel",
        }
    }
}

impl Display for Parser {
    fn fmt(&self, f: &mut FmtFormatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Formatter settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatProfile {
    /// Parser
    pub parser: Parser,
    /// Target line width
    pub print_width: usize,
}

impl FormatProfile {
    /// Profile for a generation config: `types` selects the typescript parser
    #[must_use]
    pub fn for_config(config: &GenerationConfig) -> Self {
        Self {
            parser: if config.types {
                Parser::Typescript
            } else {
                Parser::Babel
            },
            print_width: config.printwidth,
        }
    }
}

/// Source formatter
pub trait Formatter: Send + Sync + std::fmt::Debug {
    /// Format `source` under `profile`
    ///
    /// # Errors
    /// Returns [`FormatError`] when the source does not parse under the profile.
    fn format(&self, source: &str, profile: &FormatProfile) -> Result<String, FormatError>;
}

/// Bracket-checking layout formatter
#[derive(Debug, Clone, Copy)]
pub struct SourceFormatter {
    tab_width: usize,
}

impl Default for SourceFormatter {
    fn default() -> Self {
        Self { tab_width: 2 }
    }
}

impl SourceFormatter {
    /// Create formatter with two-space tabs
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With tab width
    #[inline]
    #[must_use]
    pub fn with_tab_width(mut self, tab_width: usize) -> Self {
        self.tab_width = tab_width;
        self
    }
}

impl Formatter for SourceFormatter {
    fn format(&self, source: &str, profile: &FormatProfile) -> Result<String, FormatError> {
        let code_lines = scan(source)?;
        if profile.parser == Parser::Babel {
            reject_type_syntax(source, &code_lines, profile.parser)?;
        }

        let tab = " ".repeat(self.tab_width);
        let mut out = String::with_capacity(source.len());
        let mut blank_run = false;
        let mut overlong = 0usize;
        for line in source.lines() {
            let body = line.trim_start_matches([' ', '\t']);
            let indent = &line[..line.len() - body.len()];
            let line = format!("{}{}", indent.replace('\t', &tab), body.trim_end());
            if line.is_empty() {
                blank_run = !out.is_empty();
                continue;
            }
            if blank_run {
                out.push('\n');
                blank_run = false;
            }
            if line.len() > profile.print_width {
                overlong += 1;
            }
            out.push_str(&line);
            out.push('\n');
        }

        tracing::debug!(parser = %profile.parser, overlong, "formatted source");
        Ok(out)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Code,
    LineComment,
    BlockComment,
    Quoted(char),
}

/// Check brackets and string literals
///
/// Returns, per line, whether it starts in plain code.
fn scan(source: &str) -> Result<Vec<bool>, FormatError> {
    let mut stack: Vec<(char, usize)> = Vec::new();
    let mut state = State::Code;
    let mut string_start = 0;
    let mut code_lines = vec![true];
    let mut line = 1;
    let mut chars = source.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\n' {
            line += 1;
            match state {
                State::LineComment => state = State::Code,
                State::Quoted(q) if q != '`' => return Err(FormatError::UnterminatedString(string_start)),
                _ => {}
            }
            code_lines.push(state == State::Code);
            continue;
        }
        match state {
            State::LineComment => {}
            State::BlockComment => {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    state = State::Code;
                }
            }
            State::Quoted(quote) => {
                if c == '\\' {
                    chars.next();
                } else if c == quote {
                    state = State::Code;
                }
            }
            State::Code => match c {
                '/' if chars.peek() == Some(&'/') => state = State::LineComment,
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    state = State::BlockComment;
                }
                '\'' | '"' | '`' => {
                    state = State::Quoted(c);
                    string_start = line;
                }
                '(' | '[' | '{' => stack.push((c, line)),
                ')' | ']' | '}' => match stack.pop() {
                    Some((open, _)) if pair(open) == c => {}
                    _ => return Err(FormatError::UnexpectedClose { found: c, line }),
                },
                _ => {}
            },
        }
    }

    if let State::Quoted(_) = state {
        return Err(FormatError::UnterminatedString(string_start));
    }
    if let Some((open, line)) = stack.pop() {
        return Err(FormatError::Unclosed { open, line });
    }
    Ok(code_lines)
}

const fn pair(open: char) -> char {
    match open {
        '(' => ')',
        '[' => ']',
        _ => '}',
    }
}

fn reject_type_syntax(source: &str, code_lines: &[bool], parser: Parser) -> Result<(), FormatError> {
    for (index, text) in source.lines().enumerate() {
        if !code_lines.get(index).copied().unwrap_or(true) {
            continue;
        }
        let text = text.trim_start();
        let text = text.strip_prefix("export ").unwrap_or(text);
        let declares = ["type ", "interface ", "import type "]
            .iter()
            .any(|keyword| text.starts_with(keyword));
        if declares {
            return Err(FormatError::TypeSyntax {
                parser: parser.name(),
                line: index + 1,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn babel() -> FormatProfile {
        FormatProfile::for_config(&GenerationConfig::default())
    }

    fn typescript() -> FormatProfile {
        FormatProfile::for_config(&GenerationConfig::new().with_types(true))
    }

    #[test]
    fn profile_follows_types() {
        assert_eq!(babel().parser, Parser::Babel);
        assert_eq!(typescript().parser, Parser::Typescript);
        assert_eq!(typescript().print_width, 100);
    }

    #[test]
    fn normalizes_layout() {
        let source = "\n\nfunction a() {\t \n\treturn 1   \n\n\n\n}\n\n";
        let formatted = SourceFormatter::new().format(source, &babel()).unwrap();
        assert_eq!(formatted, "function a() {\n  return 1\n\n}\n");
    }

    #[test]
    fn brackets_inside_strings_and_comments_are_ignored() {
        let source = "const a = '(' // )\n/* { */ const b = \"]\"\n";
        assert!(SourceFormatter::new().format(source, &babel()).is_ok());
    }

    #[test]
    fn reports_bracket_errors() {
        let formatter = SourceFormatter::new();
        assert_eq!(
            formatter.format("f(\n]", &babel()),
            Err(FormatError::UnexpectedClose { found: ']', line: 2 })
        );
        assert_eq!(
            formatter.format("{\n(", &babel()),
            Err(FormatError::Unclosed { open: '(', line: 2 })
        );
        assert_eq!(
            formatter.format("a = 'open\n'", &babel()),
            Err(FormatError::UnterminatedString(1))
        );
    }

    #[test]
    fn babel_rejects_type_declarations() {
        let source = "type GLTFResult = {\n  nodes: {}\n}\n";
        assert_eq!(
            SourceFormatter::new().format(source, &babel()),
            Err(FormatError::TypeSyntax { parser: "babel", line: 1 })
        );
        assert!(SourceFormatter::new().format(source, &typescript()).is_ok());
    }

    #[test]
    fn type_keywords_in_comments_are_fine() {
        let source = "/*\ntype here\n*/\nconst x = 1\n";
        assert!(SourceFormatter::new().format(source, &babel()).is_ok());
    }
}
