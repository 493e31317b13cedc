use crate::token::LexerErrorKind;
use crate::T;

use self::mock::TokenMock;

macro_rules! assert_tokenizes_as {
    ($input:expr, $($tokens:expr),+ $(,)?) => {
        let expected_tokens: Vec<$crate::tests::mock::TokenMock> =
            vec![$($crate::tests::mock::TokenMock::from($tokens)),+];

        let mut start = 0;
        let mut lexed_tokens = vec![];
        for token in $crate::lexer::tokenize($input) {
            lexed_tokens.push($crate::tests::mock::TokenMock {
                kind: token.kind,
                len: token.len,
                text: std::borrow::Cow::Borrowed(&$input[start..start + token.len])
            });
            start += token.len;
        }

        pretty_assertions::assert_eq!(lexed_tokens, expected_tokens);
    };
}


#[test]
fn basic_comments() {
    assert_tokenizes_as!("# test", TokenMock::comment("# test"));
    assert_tokenizes_as!("#", TokenMock::comment("#"));
    assert_tokenizes_as!(
        "x  # trailing\n",
        TokenMock::identifier("x"),
        "  ",
        TokenMock::comment("# trailing"),
        '\n'
    );
}

#[test]
fn simple_assignment() {
    assert_tokenizes_as!(
        "name = 'zlib'",
        TokenMock::identifier("name"),
        ' ',
        T![=],
        ' ',
        TokenMock::string("'zlib'")
    );
}

#[test]
fn bare_tuple_assignment() {
    assert_tokenizes_as!(
        r#"settings = "os", "arch""#,
        TokenMock::identifier("settings"),
        ' ',
        T![=],
        ' ',
        TokenMock::string(r#""os""#),
        T![,],
        ' ',
        TokenMock::string(r#""arch""#)
    );
}

#[test]
fn keywords() {
    assert_tokenizes_as!(
        "class def lambda None True False import",
        T![class],
        ' ',
        T![def],
        ' ',
        T![lambda],
        ' ',
        T![None],
        ' ',
        T![True],
        ' ',
        T![False],
        ' ',
        TokenMock::keyword("import")
    );
}

#[test]
fn keyword_prefix_is_identifier() {
    assert_tokenizes_as!(
        "classes definitely",
        TokenMock::identifier("classes"),
        ' ',
        TokenMock::identifier("definitely")
    );
}

#[test]
fn operators_longest_match() {
    assert_tokenizes_as!(
        "a **= b ** c == d != e -> f := g",
        TokenMock::identifier("a"),
        ' ',
        TokenMock::augmented_assign("**="),
        ' ',
        TokenMock::identifier("b"),
        ' ',
        T![**],
        ' ',
        TokenMock::identifier("c"),
        ' ',
        TokenMock::operator("=="),
        ' ',
        TokenMock::identifier("d"),
        ' ',
        TokenMock::operator("!="),
        ' ',
        TokenMock::identifier("e"),
        ' ',
        T![->],
        ' ',
        TokenMock::identifier("f"),
        ' ',
        T![:=],
        ' ',
        TokenMock::identifier("g")
    );
}

#[test]
fn numbers() {
    assert_tokenizes_as!(
        "1 2.5 .5 1e-3 0xE+1",
        TokenMock::number("1"),
        ' ',
        TokenMock::number("2.5"),
        ' ',
        TokenMock::number(".5"),
        ' ',
        TokenMock::number("1e-3"),
        ' ',
        TokenMock::number("0xE"),
        TokenMock::operator("+"),
        TokenMock::number("1")
    );
}

#[test]
fn attribute_access_and_ellipsis() {
    assert_tokenizes_as!(
        "self.settings ...",
        TokenMock::identifier("self"),
        T![.],
        TokenMock::identifier("settings"),
        ' ',
        crate::token::make_fixed_str_token(crate::TokenKind::Ellipsis)
    );
}

#[test]
fn newlines_inside_brackets_are_whitespace() {
    let input = "x = (\n    1,\n)\n";
    assert_tokenizes_as!(
        input,
        TokenMock::identifier("x"),
        ' ',
        T![=],
        ' ',
        T!['('],
        TokenMock::whitespace("\n"),
        "    ",
        TokenMock::number("1"),
        T![,],
        TokenMock::whitespace("\n"),
        T![')'],
        '\n'
    );
}

#[test]
fn line_continuation() {
    let input = "x = 1 + \\\n    2";
    assert_tokenizes_as!(
        input,
        TokenMock::identifier("x"),
        ' ',
        T![=],
        ' ',
        TokenMock::number("1"),
        ' ',
        TokenMock::operator("+"),
        ' ',
        TokenMock::escaped_newline(),
        "    ",
        TokenMock::number("2")
    );
}

#[test]
fn unexpected_character() {
    assert_tokenizes_as!(
        "a $ b",
        TokenMock::identifier("a"),
        ' ',
        TokenMock::error(LexerErrorKind::UnexpectedCharacter, "$"),
        ' ',
        TokenMock::identifier("b")
    );
}

#[test]
fn non_ascii_text_is_sliced_on_char_boundaries() {
    assert_tokenizes_as!(
        "author = 'Aníbal' # é",
        TokenMock::identifier("author"),
        ' ',
        T![=],
        ' ',
        TokenMock::string("'Aníbal'"),
        ' ',
        TokenMock::comment("# é")
    );
}
