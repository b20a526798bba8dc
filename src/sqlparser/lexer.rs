use once_cell::sync::Lazy;
use regex::Regex;

/// Lexical category of a token.
///
/// The three keyword categories are distinguished by what terminates the
/// statement they introduce: a slash on its own line, a semicolon, or the
/// end of the line. All remaining reserved words carry no terminating role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    LineComment,
    BlockComment,
    SingleQuoteString,
    DoubleQuoteString,
    /// Interactive client command keyword (`connect`, `spool`, ...).
    ClientKeyword,
    /// A line containing only a `/` with optional horizontal whitespace.
    SlashTerminator,
    /// Keyword opening a PL/SQL block (`create`, `declare`, `begin`).
    SlashKeyword,
    /// Keyword opening a semicolon-terminated SQL statement.
    SemiKeyword,
    /// Reserved word with no terminating role.
    Keyword,
    Semicolon,
    Identifier,
    Number,
    Operator,
    Bracket,
    Assign,
    Comparison,
    Dot,
    Whitespace,
    Newline,
    /// Character matched by no rule; preserved so lexing stays lossless.
    Unrecognized,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Exact matched substring, case preserved.
    pub text: String,
    /// Zero-based byte offset of the token start in the original script.
    pub offset: usize,
    /// 1-based source line of the token start.
    pub line: u32,
    /// 1-based source column of the token start.
    pub column: u32,
    /// Newline characters contained inside the token.
    pub line_breaks: u32,
}

impl Token {
    /// Byte offset one past the last character of the token.
    pub fn end_offset(&self) -> usize {
        self.offset + self.text.len()
    }
}

const SLASH_KEYWORDS: &[&str] = &["create", "declare", "begin"];

const SEMI_KEYWORDS: &[&str] = &[
    "select", "insert", "update", "delete", "commit", "rollback", "drop", "alter", "grant",
    "revoke",
];

// Declaration order matters: alternations keep first-match semantics, so the
// single-word `spool` wins over `spool off` and the trailing `off` lexes as a
// plain identifier.
const CLIENT_KEYWORDS: &[&str] = &["connect", "disconnect", "whenever", "spool", "spool off"];

const PLAIN_KEYWORDS: &[&str] = &[
    "from",
    "where",
    "order",
    "group",
    "by",
    "and",
    "or",
    "not",
    "procedure",
    "function",
    "package",
    "body",
    "type",
    "end",
    "as",
    "is",
    "null",
    "sysdate",
];

struct Rule {
    kind: TokenKind,
    pattern: Regex,
    /// Reject the match when the next character would extend an identifier.
    whole_word: bool,
    /// Only try this rule at the start of a line.
    line_start_only: bool,
    /// Require end of line (or input) immediately after the match.
    line_end_after: bool,
}

impl Rule {
    fn new(kind: TokenKind, pattern: &str) -> Self {
        Self {
            kind,
            pattern: Regex::new(pattern).expect("lexer rule pattern must compile"),
            whole_word: false,
            line_start_only: false,
            line_end_after: false,
        }
    }

    fn keywords(kind: TokenKind, words: &[&str]) -> Self {
        let alternation = words
            .iter()
            .map(|word| case_insensitive_pattern(word))
            .collect::<Vec<_>>()
            .join("|");
        let mut rule = Self::new(kind, &format!("^(?:{alternation})"));
        rule.whole_word = true;
        rule
    }
}

/// Build a pattern matching `word` with a `[aA]`-style bracket class per
/// ASCII letter. Only ASCII letters fold; everything else is escaped.
fn case_insensitive_pattern(word: &str) -> String {
    let mut pattern = String::new();
    for ch in word.chars() {
        if ch.is_ascii_alphabetic() {
            pattern.push('[');
            pattern.push(ch.to_ascii_lowercase());
            pattern.push(ch.to_ascii_uppercase());
            pattern.push(']');
        } else {
            pattern.push_str(&regex::escape(&ch.to_string()));
        }
    }
    pattern
}

fn is_identifier_continue(byte: Option<u8>) -> bool {
    matches!(byte, Some(b) if b.is_ascii_alphanumeric() || b == b'_' || b == b'$')
}

/// Compiled, immutable rule table. Built once by [`LexerRules::new`] and
/// shared behind a lazy singleton; rules are tried in priority order and the
/// first match at the cursor wins.
pub struct LexerRules {
    rules: Vec<Rule>,
}

static RULES: Lazy<LexerRules> = Lazy::new(LexerRules::new);

impl LexerRules {
    pub fn new() -> Self {
        let slash_line = {
            let mut rule = Rule::new(TokenKind::SlashTerminator, r"^[ \t]*/[ \t]*");
            rule.line_start_only = true;
            rule.line_end_after = true;
            rule
        };

        let rules = vec![
            Rule::new(TokenKind::LineComment, r"^--[^\n]*"),
            Rule::new(TokenKind::BlockComment, r"^/\*(?s:.)*?\*/"),
            Rule::new(TokenKind::SingleQuoteString, r"^'(?:\\['\\]|[^\n'\\])*'"),
            Rule::new(TokenKind::DoubleQuoteString, r#"^"(?:\\["\\]|[^\n"\\])*""#),
            // Client commands come before identifiers so `connect` is not
            // lexed as a plain identifier.
            Rule::keywords(TokenKind::ClientKeyword, CLIENT_KEYWORDS),
            slash_line,
            Rule::keywords(TokenKind::SlashKeyword, SLASH_KEYWORDS),
            Rule::keywords(TokenKind::SemiKeyword, SEMI_KEYWORDS),
            Rule::keywords(TokenKind::Keyword, PLAIN_KEYWORDS),
            Rule::new(TokenKind::Semicolon, r"^;"),
            Rule::new(TokenKind::Identifier, r"^[A-Za-z_$][A-Za-z0-9_$]*"),
            Rule::new(TokenKind::Number, r"^[+-]?[0-9]+(?:\.[0-9]+)?(?:[eE][+-]?[0-9]+)?"),
            Rule::new(TokenKind::Operator, r"^[-+*/%]"),
            Rule::new(TokenKind::Bracket, r"^[()\[\]{}]"),
            Rule::new(TokenKind::Assign, r"^:="),
            Rule::new(TokenKind::Comparison, r"^(?:<=|>=|<>|!=|=|<|>)"),
            Rule::new(TokenKind::Dot, r"^\."),
            Rule::new(TokenKind::Whitespace, r"^[ \t]+"),
            Rule::new(TokenKind::Newline, r"^\n"),
        ];

        Self { rules }
    }

    /// Tokenize `source` completely. Total: characters no rule matches are
    /// emitted as [`TokenKind::Unrecognized`] tokens one character at a time,
    /// so concatenating the token texts always reproduces the input.
    pub fn tokenize(&self, source: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let bytes = source.as_bytes();
        let mut offset = 0usize;
        let mut line = 1u32;
        let mut column = 1u32;

        while offset < source.len() {
            let rest = &source[offset..];
            let at_line_start = offset == 0 || bytes[offset - 1] == b'\n';

            let (kind, length) = match self.match_at(rest, at_line_start) {
                Some(matched) => matched,
                None => {
                    let width = rest.chars().next().map_or(1, char::len_utf8);
                    (TokenKind::Unrecognized, width)
                }
            };

            let text = &rest[..length];
            let line_breaks = text.bytes().filter(|byte| *byte == b'\n').count() as u32;
            tokens.push(Token {
                kind,
                text: text.to_string(),
                offset,
                line,
                column,
                line_breaks,
            });

            if line_breaks > 0 {
                line += line_breaks;
                let after_break = &text[text.rfind('\n').expect("token contains a newline") + 1..];
                column = after_break.chars().count() as u32 + 1;
            } else {
                column += text.chars().count() as u32;
            }
            offset += length;
        }

        tokens
    }

    fn match_at(&self, rest: &str, at_line_start: bool) -> Option<(TokenKind, usize)> {
        for rule in &self.rules {
            if rule.line_start_only && !at_line_start {
                continue;
            }
            let Some(found) = rule.pattern.find(rest) else {
                continue;
            };
            let length = found.end();
            if length == 0 {
                continue;
            }
            if rule.whole_word && is_identifier_continue(rest.as_bytes().get(length).copied()) {
                continue;
            }
            if rule.line_end_after && !matches!(rest.as_bytes().get(length), None | Some(b'\n')) {
                continue;
            }
            return Some((rule.kind, length));
        }
        None
    }
}

impl Default for LexerRules {
    fn default() -> Self {
        Self::new()
    }
}

/// Tokenize with the shared rule table.
pub fn tokenize(source: &str) -> Vec<Token> {
    RULES.tokenize(source)
}

/// Concatenated text of the tokens starting at `start`, up to but not
/// including the first token of `end_kind` (or the end of the slice).
pub fn token_text(tokens: &[Token], start: usize, end_kind: Option<TokenKind>) -> String {
    let mut text = String::new();
    for token in tokens.iter().skip(start) {
        if end_kind.is_some_and(|kind| token.kind == kind) {
            break;
        }
        text.push_str(&token.text);
    }
    text
}
