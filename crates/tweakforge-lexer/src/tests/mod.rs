//! Unit and property tests for the line tokenizer.

use insta::assert_snapshot;
use proptest::prelude::*;
use rstest::rstest;

use crate::lexer::pattern_compiles;
use crate::{Token, TokenKind, tokenize, tokenize_lines};

fn kinds(line: &str) -> Vec<TokenKind> {
    tokenize(line).iter().map(Token::kind).collect()
}

fn render(line: &str) -> String {
    tokenize(line)
        .iter()
        .map(|token| format!("{}({:?})", token.kind().as_str(), token.value()))
        .collect::<Vec<_>>()
        .join(" ")
}

fn rebuild(tokens: &[Token]) -> String {
    tokens.iter().map(Token::value).collect()
}

#[test]
fn token_pattern_compiles() {
    assert!(pattern_compiles());
}

#[test]
fn empty_line_has_no_tokens() {
    assert!(tokenize("").is_empty());
}

#[test]
fn whitespace_only_line_is_text() {
    assert_eq!(tokenize("   "), vec![Token::new(TokenKind::Text, "   ")]);
}

// =============================================================================
// Classification
// =============================================================================

#[rstest]
#[case("# comment with 'quotes' and $vars", TokenKind::Comment)]
#[case("'single $notavar'", TokenKind::String)]
#[case(r#""escaped \" quote""#, TokenKind::String)]
#[case("$env:TEMP", TokenKind::Variable)]
#[case("$_", TokenKind::Variable)]
#[case("Get-ItemProperty", TokenKind::Command)]
#[case("42", TokenKind::Number)]
#[case("3.14", TokenKind::Number)]
#[case("0x1F", TokenKind::Number)]
#[case("foreach", TokenKind::Keyword)]
#[case("ElseIf", TokenKind::Keyword)]
#[case("$true", TokenKind::Boolean)]
#[case("$NULL", TokenKind::Boolean)]
#[case("false", TokenKind::Boolean)]
#[case("-notmatch", TokenKind::Operator)]
#[case("-EQ", TokenKind::Operator)]
#[case("+=", TokenKind::Operator)]
#[case("{", TokenKind::Punctuation)]
#[case("plainword", TokenKind::Text)]
fn classifies_single_token_lines(#[case] line: &str, #[case] expected: TokenKind) {
    assert_eq!(kinds(line), vec![expected], "line {line:?}");
}

#[test]
fn comment_marker_inside_string_stays_in_string() {
    assert_eq!(
        kinds(r#""a # b" # real"#),
        vec![TokenKind::String, TokenKind::Text, TokenKind::Comment]
    );
}

#[test]
fn comment_consumes_rest_of_line() {
    let tokens = tokenize("Stop-Service wuauserv # pause updates; Start-Service x");
    assert_eq!(
        tokens.last(),
        Some(&Token::new(
            TokenKind::Comment,
            "# pause updates; Start-Service x"
        ))
    );
}

#[test]
fn single_quotes_do_not_honour_escapes() {
    assert_eq!(
        kinds(r"'C:\Temp\' + 'x'"),
        vec![
            TokenKind::String,
            TokenKind::Text,
            TokenKind::Operator,
            TokenKind::Text,
            TokenKind::String,
        ]
    );
}

#[test]
fn unterminated_string_falls_back_to_text() {
    assert_eq!(kinds("'open"), vec![TokenKind::Text]);
}

#[test]
fn parameter_dash_is_an_operator_followed_by_text() {
    assert_eq!(
        kinds("-Name"),
        vec![TokenKind::Operator, TokenKind::Text]
    );
}

#[test]
fn hyphenated_bare_words_read_as_commands() {
    // Known limitation: subtraction between bare words is indistinguishable
    // from a Verb-Noun command at the line level.
    assert_eq!(kinds("width-offset"), vec![TokenKind::Command]);
    assert_eq!(
        kinds("5-3"),
        vec![TokenKind::Number, TokenKind::Operator, TokenKind::Number]
    );
}

#[test]
fn keywords_require_word_boundaries() {
    assert_eq!(kinds("iffy"), vec![TokenKind::Text]);
    assert_eq!(kinds("ForEach-Object"), vec![TokenKind::Command]);
}

#[test]
fn renders_control_flow_line() {
    assert_snapshot!(
        render(r#"if ($value -eq 1) { Write-Host "done: $value" }"#),
        @r#"keyword("if") text(" ") punctuation("(") variable("$value") text(" ") operator("-eq") text(" ") number("1") punctuation(")") text(" ") punctuation("{") text(" ") command("Write-Host") text(" ") string("\"done: $value\"") text(" ") punctuation("}")"#
    );
}

#[test]
fn renders_cmdlet_with_parameters_and_comment() {
    assert_snapshot!(
        render("Set-Service -Name DiagTrack -StartupType Disabled # stop"),
        @r##"command("Set-Service") text(" ") operator("-") text("Name DiagTrack ") operator("-") text("StartupType Disabled ") comment("# stop")"##
    );
}

#[test]
fn renders_registry_command_line() {
    assert_snapshot!(
        render(r"reg add 'HKLM\Software' /v Start /d 0x0 /f"),
        @r#"text("reg add ") string("'HKLM\\Software'") text(" ") operator("/") text("v Start ") operator("/") text("d ") number("0x0") text(" ") operator("/") text("f")"#
    );
}

#[test]
fn tokenize_lines_keeps_one_row_per_logical_line() {
    let rows = tokenize_lines("$a = 1\n\n# done\n");
    assert_eq!(rows.len(), 4);
    assert!(rows.get(1).is_some_and(Vec::is_empty));
    assert!(rows.get(3).is_some_and(Vec::is_empty));
}

#[test]
fn carriage_return_survives_in_row() {
    let rows = tokenize_lines("$a\r\n$b");
    let first = rows.first().map(|row| rebuild(row));
    assert_eq!(first.as_deref(), Some("$a\r"));
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn tokenize_is_lossless(line in any::<String>()) {
        prop_assert_eq!(rebuild(&tokenize(&line)), line);
    }

    #[test]
    fn tokenize_is_lossless_for_script_like_text(
        line in r#"[A-Za-z0-9$#'"\\ _:;,.(){}\[\]=+\-*/<>|&!@]{0,80}"#
    ) {
        prop_assert_eq!(rebuild(&tokenize(&line)), line);
    }

    #[test]
    fn tokenize_is_deterministic(line in any::<String>()) {
        prop_assert_eq!(tokenize(&line), tokenize(&line));
    }

    #[test]
    fn tokens_are_never_empty(line in any::<String>()) {
        prop_assert!(tokenize(&line).iter().all(|token| !token.value().is_empty()));
    }
}
