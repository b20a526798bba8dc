use std::fmt;

use tracing::debug;

use super::lexer::{tokenize, Token, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Sql,
    Plsql,
    ClientCommand,
}

impl BlockKind {
    pub fn as_str(self) -> &'static str {
        match self {
            BlockKind::Sql => "sql",
            BlockKind::Plsql => "plsql",
            BlockKind::ClientCommand => "client-command",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One executable unit of a script: the triggering keyword through its
/// terminator, inclusive. Immutable; recomputed on every [`split`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptBlock {
    pub kind: BlockKind,
    /// Exact source substring spanned by the block, terminator included.
    pub text: String,
    /// Ordered token subsequence composing the block.
    pub tokens: Vec<Token>,
}

impl ScriptBlock {
    pub fn start_offset(&self) -> usize {
        self.tokens.first().map_or(0, |token| token.offset)
    }

    pub fn end_offset(&self) -> usize {
        self.tokens.last().map_or(0, Token::end_offset)
    }

    /// A block overlaps `offset` on the closed interval from the start of
    /// its first token to the end of its last token.
    pub fn contains_offset(&self, offset: usize) -> bool {
        !self.tokens.is_empty() && self.start_offset() <= offset && offset <= self.end_offset()
    }
}

/// Unterminated block: a statement-introducing keyword reached the end of
/// the input with no matching terminator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{line}:{column} - {message}")]
pub struct SplitError {
    /// 1-based line of the offending keyword.
    pub line: u32,
    /// 1-based column of the offending keyword.
    pub column: u32,
    pub message: String,
}

/// Partition `source` into script blocks.
///
/// A trailing newline is appended before tokenizing when missing, so a
/// client command or slash-terminated block at end-of-input stays closeable.
/// Fails fast on the first unterminated block and returns no partial list.
///
/// The terminator scan is a flat forward search, never a recursive descent:
/// a `begin ... end;` block with no bare slash line after it is unterminated
/// (the semicolon after `end` closes nothing). The slash is the execution
/// trigger, and the client hands the whole block to the server atomically.
pub fn split(source: &str) -> Result<Vec<ScriptBlock>, SplitError> {
    debug!(length = source.len(), "split");

    let mut text = source.to_string();
    if !text.ends_with('\n') {
        text.push('\n');
    }

    let tokens = tokenize(&text);
    let mut blocks: Vec<ScriptBlock> = Vec::new();
    let mut index = 0;

    while index < tokens.len() {
        let token = &tokens[index];
        match token.kind {
            TokenKind::SlashKeyword => {
                let found = find_token(&tokens, index, TokenKind::SlashTerminator)
                    .ok_or_else(|| unterminated(token, "slash"))?;
                blocks.push(make_block(BlockKind::Plsql, &tokens[index..=found]));
                index = found;
            }
            TokenKind::SemiKeyword => {
                let found = find_token(&tokens, index, TokenKind::Semicolon)
                    .ok_or_else(|| unterminated(token, "semicolon"))?;
                blocks.push(make_block(BlockKind::Sql, &tokens[index..=found]));
                index = found;
            }
            TokenKind::ClientKeyword => {
                let found = find_token(&tokens, index, TokenKind::Newline)
                    .ok_or_else(|| unterminated(token, "newline"))?;
                blocks.push(make_block(BlockKind::ClientCommand, &tokens[index..=found]));
                index = found;
            }
            // Whitespace, comments, stray punctuation and top-level newlines
            // separate blocks and belong to none.
            _ => {}
        }
        index += 1;
    }

    Ok(blocks)
}

fn find_token(tokens: &[Token], start: usize, kind: TokenKind) -> Option<usize> {
    tokens[start..]
        .iter()
        .position(|token| token.kind == kind)
        .map(|position| start + position)
}

fn make_block(kind: BlockKind, tokens: &[Token]) -> ScriptBlock {
    let text: String = tokens.iter().map(|token| token.text.as_str()).collect();
    debug!(kind = kind.as_str(), text = %text, "block");
    ScriptBlock {
        kind,
        text,
        tokens: tokens.to_vec(),
    }
}

fn unterminated(token: &Token, terminator: &str) -> SplitError {
    SplitError {
        line: token.line,
        column: token.column,
        message: format!(
            "The {} statement is not followed by a {}",
            token.text.to_lowercase(),
            terminator
        ),
    }
}

/// Blocks whose span contains `offset`; resolves "run statement at cursor".
pub fn blocks_overlapping<'a>(blocks: &'a [ScriptBlock], offset: usize) -> Vec<&'a ScriptBlock> {
    blocks
        .iter()
        .filter(|block| block.contains_offset(offset))
        .collect()
}
