use tracing::debug;

use crate::db::connection::{parse_connect_string, purify_statement, ConnectionInfo};
use crate::sqlparser::{
    blocks_overlapping, split, token_text, BlockKind, ScriptBlock, SplitError, TokenKind,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunType {
    /// Execute every block of the script in order.
    RunScript,
    /// Execute the block(s) under the editor cursor.
    RunOneStatement,
}

/// One planned unit of work for the embedding application: either a purified
/// statement for the connection provider, or a parsed client command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptItem {
    Statement { sql: String, kind: BlockKind },
    Command(ToolCommand),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolCommand {
    Connect(ConnectionInfo),
    Disconnect,
    /// `spool <path>` starts spooling; `spool off` (or a bare `spool`)
    /// stops it.
    Spool { path: Option<String> },
    /// Recognized as a client command by the lexer but with no execution
    /// mapping. The caller decides whether that is fatal.
    Unsupported { raw: String, message: String },
}

/// Split `source` and map the blocks selected by `run_type` to executable
/// items. `cursor_offset` is only consulted for [`RunType::RunOneStatement`].
///
/// The planner performs no I/O and talks to no driver; executing the items
/// in order, stopping at the first failure, is the caller's job.
pub fn plan(
    source: &str,
    run_type: RunType,
    cursor_offset: usize,
) -> Result<Vec<ScriptItem>, SplitError> {
    let blocks = split(source)?;
    debug!(blocks = blocks.len(), ?run_type, cursor_offset, "plan");

    let selected: Vec<&ScriptBlock> = match run_type {
        RunType::RunScript => blocks.iter().collect(),
        RunType::RunOneStatement => blocks_overlapping(&blocks, cursor_offset),
    };

    Ok(selected.into_iter().map(script_item).collect())
}

fn script_item(block: &ScriptBlock) -> ScriptItem {
    match block.kind {
        BlockKind::Sql => ScriptItem::Statement {
            sql: purify_statement(&block.text),
            kind: block.kind,
        },
        BlockKind::Plsql => ScriptItem::Statement {
            sql: strip_slash_terminator(&block.text),
            kind: block.kind,
        },
        BlockKind::ClientCommand => ScriptItem::Command(parse_tool_command(block)),
    }
}

/// Drop the final slash line of a PL/SQL block; the body keeps its own
/// `end;` and the provider receives it without the client-side trigger.
fn strip_slash_terminator(text: &str) -> String {
    let trimmed = text.trim_end();
    match trimmed.rfind('\n') {
        Some(position) if trimmed[position + 1..].trim() == "/" => {
            trimmed[..position].trim_end().to_string()
        }
        _ => trimmed.to_string(),
    }
}

/// Parse a client-command block into a [`ToolCommand`], dispatching on the
/// first token. The command's argument text is recovered from the tokens
/// after the keyword and its separator, up to the terminating newline.
pub fn parse_tool_command(block: &ScriptBlock) -> ToolCommand {
    let Some(first) = block.tokens.first() else {
        return ToolCommand::Unsupported {
            raw: block.text.clone(),
            message: "The block must at least contain one token".to_string(),
        };
    };

    match first.text.to_lowercase().as_str() {
        "connect" => {
            let connect_string = token_text(&block.tokens, 2, Some(TokenKind::Newline));
            match parse_connect_string(&connect_string) {
                Ok(info) => ToolCommand::Connect(info),
                Err(error) => ToolCommand::Unsupported {
                    raw: block.text.trim_end().to_string(),
                    message: error.to_string(),
                },
            }
        }
        "disconnect" => ToolCommand::Disconnect,
        "spool" => {
            let argument = token_text(&block.tokens, 2, Some(TokenKind::Newline));
            let argument = argument.trim();
            if argument.is_empty() || argument.eq_ignore_ascii_case("off") {
                ToolCommand::Spool { path: None }
            } else {
                ToolCommand::Spool {
                    path: Some(argument.to_string()),
                }
            }
        }
        other => ToolCommand::Unsupported {
            raw: block.text.trim_end().to_string(),
            message: format!("Invalid client command \"{other}\""),
        },
    }
}
