use super::*;

fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
    tokens.iter().map(|token| token.kind).collect()
}

fn kinds_and_texts(tokens: &[Token]) -> Vec<(TokenKind, &str)> {
    tokens
        .iter()
        .map(|token| (token.kind, token.text.as_str()))
        .collect()
}

fn concatenated(tokens: &[Token]) -> String {
    tokens.iter().map(|token| token.text.as_str()).collect()
}

#[test]
fn test_single_whitespace_token() {
    let tokens = tokenize(" ");
    assert_eq!(
        tokens,
        vec![Token {
            kind: TokenKind::Whitespace,
            text: " ".to_string(),
            offset: 0,
            line: 1,
            column: 1,
            line_breaks: 0,
        }]
    );
}

#[test]
fn test_lossless_for_arbitrary_input() {
    let scripts = [
        "",
        "select sysdate from dual;",
        "connect user/password@host\nselect 1;\n",
        "create procedure foo is\nbegin\n\tnull;\nend;\n/\n",
        "/* multi\nline */ -- tail\n'a;b' \"c;d\"",
        "stray @ # ¤ chars\r\n",
        "x := 1 <= 2 <> 3 (4.5e-6)",
    ];
    for script in scripts {
        let tokens = tokenize(script);
        assert_eq!(concatenated(&tokens), script, "lossless for {script:?}");
    }
}

#[test]
fn test_spool_with_file_argument() {
    let tokens = tokenize("spool foo.log");
    assert_eq!(
        kinds_and_texts(&tokens),
        vec![
            (TokenKind::ClientKeyword, "spool"),
            (TokenKind::Whitespace, " "),
            (TokenKind::Identifier, "foo"),
            (TokenKind::Dot, "."),
            (TokenKind::Identifier, "log"),
        ]
    );
}

#[test]
fn test_spool_off_lexes_as_two_words() {
    let tokens = tokenize("spool off");
    assert_eq!(
        kinds_and_texts(&tokens),
        vec![
            (TokenKind::ClientKeyword, "spool"),
            (TokenKind::Whitespace, " "),
            (TokenKind::Identifier, "off"),
        ]
    );
}

#[test]
fn test_keyword_classification() {
    assert_eq!(kinds(&tokenize("select")), vec![TokenKind::SemiKeyword]);
    assert_eq!(kinds(&tokenize("SELECT")), vec![TokenKind::SemiKeyword]);
    assert_eq!(kinds(&tokenize("Begin")), vec![TokenKind::SlashKeyword]);
    assert_eq!(kinds(&tokenize("declare")), vec![TokenKind::SlashKeyword]);
    assert_eq!(kinds(&tokenize("connect")), vec![TokenKind::ClientKeyword]);
    assert_eq!(kinds(&tokenize("from")), vec![TokenKind::Keyword]);
    assert_eq!(kinds(&tokenize("sysdate")), vec![TokenKind::Keyword]);
}

#[test]
fn test_keyword_matching_is_whole_word() {
    // a longer identifier starting with a keyword is not misclassified
    assert_eq!(kinds(&tokenize("selection")), vec![TokenKind::Identifier]);
    assert_eq!(kinds(&tokenize("begin_x")), vec![TokenKind::Identifier]);
    assert_eq!(kinds(&tokenize("ends")), vec![TokenKind::Identifier]);
    assert_eq!(kinds(&tokenize("connected")), vec![TokenKind::Identifier]);
}

#[test]
fn test_case_preserved_in_token_text() {
    let tokens = tokenize("SeLeCt Foo");
    assert_eq!(tokens[0].text, "SeLeCt");
    assert_eq!(tokens[2].text, "Foo");
}

#[test]
fn test_slash_alone_on_line_is_terminator() {
    assert_eq!(
        kinds(&tokenize("/\n")),
        vec![TokenKind::SlashTerminator, TokenKind::Newline]
    );

    // surrounding horizontal whitespace belongs to the terminator token
    let tokens = tokenize("  /  \n");
    assert_eq!(tokens[0].kind, TokenKind::SlashTerminator);
    assert_eq!(tokens[0].text, "  /  ");
}

#[test]
fn test_slash_not_alone_on_line_is_operator() {
    assert_eq!(
        kinds(&tokenize("x /\n")),
        vec![
            TokenKind::Identifier,
            TokenKind::Whitespace,
            TokenKind::Operator,
            TokenKind::Newline,
        ]
    );
    assert_eq!(
        kinds(&tokenize("/ x\n")),
        vec![
            TokenKind::Operator,
            TokenKind::Whitespace,
            TokenKind::Identifier,
            TokenKind::Newline,
        ]
    );
}

#[test]
fn test_string_literals() {
    assert_eq!(
        kinds(&tokenize("'hello'")),
        vec![TokenKind::SingleQuoteString]
    );
    assert_eq!(
        kinds(&tokenize(r#""hello""#)),
        vec![TokenKind::DoubleQuoteString]
    );
    // backslash escapes keep the literal open
    assert_eq!(
        kinds(&tokenize(r"'a\'b'")),
        vec![TokenKind::SingleQuoteString]
    );
    // a terminator inside a string is part of the string token
    let tokens = tokenize("';'");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].text, "';'");
}

#[test]
fn test_string_cannot_span_a_literal_newline() {
    let tokens = tokenize("'a\nb'");
    assert_eq!(tokens[0].kind, TokenKind::Unrecognized);
    assert_eq!(concatenated(&tokens), "'a\nb'");
}

#[test]
fn test_comments() {
    assert_eq!(
        kinds(&tokenize("-- hello\n")),
        vec![TokenKind::LineComment, TokenKind::Newline]
    );
    let tokens = tokenize("/* a\nb */");
    assert_eq!(kinds(&tokens), vec![TokenKind::BlockComment]);
    assert_eq!(tokens[0].line_breaks, 1);
}

#[test]
fn test_line_and_column_tracking_across_multiline_tokens() {
    let tokens = tokenize("/* a\nb */x");
    assert_eq!(tokens[1].kind, TokenKind::Identifier);
    assert_eq!(tokens[1].line, 2);
    assert_eq!(tokens[1].column, 5);
}

#[test]
fn test_line_and_column_tracking_across_newline_tokens() {
    let tokens = tokenize("select 1;\nselect 2;\n");
    let second_select = &tokens[5];
    assert_eq!(second_select.kind, TokenKind::SemiKeyword);
    assert_eq!(second_select.line, 2);
    assert_eq!(second_select.column, 1);
    assert_eq!(second_select.offset, 10);
}

#[test]
fn test_numbers_and_operators() {
    assert_eq!(kinds(&tokenize("42")), vec![TokenKind::Number]);
    assert_eq!(kinds(&tokenize("3.14")), vec![TokenKind::Number]);
    assert_eq!(kinds(&tokenize("-2e10")), vec![TokenKind::Number]);
    // the sign rule wins over the arithmetic-operator rule
    assert_eq!(
        kinds(&tokenize("1+2")),
        vec![TokenKind::Number, TokenKind::Number]
    );
    assert_eq!(
        kinds(&tokenize("a * b")),
        vec![
            TokenKind::Identifier,
            TokenKind::Whitespace,
            TokenKind::Operator,
            TokenKind::Whitespace,
            TokenKind::Identifier,
        ]
    );
}

#[test]
fn test_assignment_and_comparison() {
    assert_eq!(
        kinds(&tokenize("x := 1")),
        vec![
            TokenKind::Identifier,
            TokenKind::Whitespace,
            TokenKind::Assign,
            TokenKind::Whitespace,
            TokenKind::Number,
        ]
    );
    assert_eq!(
        kinds(&tokenize("a<=b")),
        vec![
            TokenKind::Identifier,
            TokenKind::Comparison,
            TokenKind::Identifier,
        ]
    );
    assert_eq!(tokenize("a<>b")[1].text, "<>");
}

#[test]
fn test_brackets_and_punctuation() {
    assert_eq!(
        kinds(&tokenize("(a);")),
        vec![
            TokenKind::Bracket,
            TokenKind::Identifier,
            TokenKind::Bracket,
            TokenKind::Semicolon,
        ]
    );
}

#[test]
fn test_unrecognized_characters_are_preserved() {
    let tokens = tokenize("@");
    assert_eq!(
        kinds_and_texts(&tokens),
        vec![(TokenKind::Unrecognized, "@")]
    );

    // multi-byte characters advance as a whole
    let tokens = tokenize("¤x");
    assert_eq!(tokens[0].kind, TokenKind::Unrecognized);
    assert_eq!(tokens[0].text, "¤");
    assert_eq!(tokens[1].kind, TokenKind::Identifier);
    assert_eq!(tokens[1].offset, "¤".len());
}

#[test]
fn test_reclassification_is_stable_in_isolation() {
    let script = "connect u\nselect 'x' -- c\nfrom dual;\ncreate begin 1.5 := <=\n/\n";
    for token in tokenize(script) {
        // the slash rules are explicitly line-context-sensitive
        if matches!(token.kind, TokenKind::SlashTerminator | TokenKind::Operator) {
            continue;
        }
        let again = tokenize(&token.text);
        assert_eq!(again.len(), 1, "token {:?} relexes as one token", token.text);
        assert_eq!(
            again[0].kind, token.kind,
            "token {:?} keeps its kind",
            token.text
        );
    }
}

#[test]
fn test_pure_rule_construction_matches_singleton() {
    let rules = LexerRules::new();
    let script = "select sysdate from dual;";
    assert_eq!(rules.tokenize(script), tokenize(script));
}

#[test]
fn test_token_text_range() {
    let tokens = tokenize("connect user/password@host\nselect 1;");
    assert_eq!(
        token_text(&tokens, 2, Some(TokenKind::Newline)),
        "user/password@host"
    );
    assert_eq!(token_text(&tokens, 0, None), "connect user/password@host\nselect 1;");
}
