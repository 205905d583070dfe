//! Single-pass tokenizer for robot assembly source.
//!
//! Tokens are produced over the original text, never over rendered markup,
//! so a later category can't re-match something an earlier one already
//! claimed. The token sequence always covers the input exactly.

use std::ops::Range;

use crate::syntax::{TokenKind, classify_word, is_ident_start, is_word_char};

/// A classified span of the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Byte range in the source. Always on char boundaries.
    pub range: Range<usize>,
}

impl Token {
    pub fn new(kind: TokenKind, range: Range<usize>) -> Self {
        Self { kind, range }
    }

    /// The slice of `source` this token covers.
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.range.clone()]
    }
}

/// Split `source` into an ordered, gap-free token sequence.
///
/// Adjacent plain-text pieces are merged into a single `Text` token.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut tokens: Vec<Token> = Vec::new();
    for token in Tokenizer::new(source) {
        match tokens.last_mut() {
            Some(last)
                if last.kind == TokenKind::Text
                    && token.kind == TokenKind::Text
                    && last.range.end == token.range.start =>
            {
                last.range.end = token.range.end;
            }
            _ => tokens.push(token),
        }
    }
    tracing::trace!(
        target: "robasm::tokenize",
        source_len = source.len(),
        tokens = tokens.len(),
        "tokenized"
    );
    tokens
}

/// Iterator over raw (unmerged) tokens.
struct Tokenizer<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            pos: 0,
        }
    }

    fn byte(&self, at: usize) -> Option<u8> {
        self.bytes.get(at).copied()
    }

    /// End of the word run starting at `from`.
    fn word_end(&self, from: usize) -> usize {
        let mut end = from;
        while end < self.bytes.len() && is_word_char(self.bytes[end] as char) {
            end += 1;
        }
        end
    }

    /// Byte after the char starting at `at`.
    fn next_char_boundary(&self, at: usize) -> usize {
        at + self.source[at..]
            .chars()
            .next()
            .map(char::len_utf8)
            .unwrap_or(1)
    }

    /// End of a comment starting at `start`: the line terminator is excluded,
    /// including the `\r` of a `\r\n` pair.
    fn comment_end(&self, start: usize) -> usize {
        match self.bytes[start..].iter().position(|&b| b == b'\n') {
            Some(rel) => {
                let newline = start + rel;
                if newline > start + 2 && self.bytes[newline - 1] == b'\r' {
                    newline - 1
                } else {
                    newline
                }
            }
            None => self.bytes.len(),
        }
    }

    fn scan_word(&self, start: usize) -> (TokenKind, usize) {
        let end = self.word_end(start);
        let word = &self.source[start..end];

        if self.bytes[start].is_ascii_digit() {
            let kind = if word.len() <= 3 && word.bytes().all(|b| b.is_ascii_digit()) {
                TokenKind::Constant
            } else {
                TokenKind::Text
            };
            return (kind, end);
        }

        if self.byte(end) == Some(b':') {
            return (TokenKind::Label, end + 1);
        }

        (classify_word(word), end)
    }

    fn scan_register(&self, start: usize) -> (TokenKind, usize) {
        let glued = start > 0 && is_word_char(self.bytes[start - 1] as char);
        if !glued {
            let end = self.word_end(start + 1);
            let name = &self.bytes[start + 1..end];
            if (1..=3).contains(&name.len()) && name.iter().all(u8::is_ascii_lowercase) {
                return (TokenKind::Register, end);
            }
        }
        (TokenKind::Text, start + 1)
    }

    fn scan_sigil(&self, start: usize, kind: TokenKind) -> (TokenKind, usize) {
        match self.byte(start + 1) {
            Some(b) if is_ident_start(b as char) => (kind, self.word_end(start + 1)),
            _ => (TokenKind::Text, start + 1),
        }
    }

    fn scan_at(&self, start: usize) -> (TokenKind, usize) {
        match self.bytes[start] {
            b'\n' => (TokenKind::LineBreak, start + 1),
            b'\r' if self.byte(start + 1) == Some(b'\n') => (TokenKind::LineBreak, start + 2),
            b'/' if self.byte(start + 1) == Some(b'/') => {
                (TokenKind::Comment, self.comment_end(start))
            }
            b'%' => self.scan_register(start),
            b'$' => self.scan_sigil(start, TokenKind::Variable),
            b'@' => self.scan_sigil(start, TokenKind::Jump),
            b if is_word_char(b as char) => self.scan_word(start),
            _ => (TokenKind::Text, self.next_char_boundary(start)),
        }
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.pos >= self.bytes.len() {
            return None;
        }
        let start = self.pos;
        let (kind, end) = self.scan_at(start);
        self.pos = end;
        Some(Token::new(kind, start..end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use TokenKind::*;

    fn kinds_and_text(source: &str) -> Vec<(TokenKind, &str)> {
        tokenize(source)
            .iter()
            .map(|t| (t.kind, t.text(source)))
            .collect()
    }

    fn highlighted(source: &str) -> Vec<(TokenKind, &str)> {
        kinds_and_text(source)
            .into_iter()
            .filter(|(kind, _)| *kind != Text)
            .collect()
    }

    #[test]
    fn test_all_categories_in_one_line() {
        let source = "foo: %ab 12 $bar @baz // comment 34";
        assert_eq!(
            highlighted(source),
            vec![
                (Label, "foo:"),
                (Register, "%ab"),
                (Constant, "12"),
                (Variable, "$bar"),
                (Jump, "@baz"),
                (Comment, "// comment 34"),
            ]
        );
    }

    #[test]
    fn test_tokens_cover_source() {
        let source = "let $x = 5\nloop:\n  mov %rga $x // a < b & c\r\n  jmp @loop\n\u{e9}t\u{e9}";
        let tokens = tokenize(source);
        let rebuilt: String = tokens.iter().map(|t| t.text(source)).collect();
        assert_eq!(rebuilt, source);
        for pair in tokens.windows(2) {
            assert_eq!(pair[0].range.end, pair[1].range.start);
        }
    }

    #[test]
    fn test_plain_text_is_one_token() {
        assert_eq!(
            kinds_and_text("hello, world!"),
            vec![(Text, "hello, world!")]
        );
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_constants_are_whole_words() {
        assert_eq!(highlighted("7 42 255"), vec![(Constant, "7"), (Constant, "42"), (Constant, "255")]);
        assert_eq!(highlighted("1234"), vec![]);
        assert_eq!(highlighted("12abc"), vec![]);
        assert_eq!(highlighted("abc12"), vec![]);
    }

    #[test]
    fn test_registers_are_whole_words() {
        assert_eq!(highlighted("%rga"), vec![(Register, "%rga")]);
        assert_eq!(highlighted("%a"), vec![(Register, "%a")]);
        assert_eq!(highlighted("%abcd"), vec![]);
        assert_eq!(highlighted("%RGA"), vec![]);
        assert_eq!(highlighted("%rg1"), vec![]);
        assert_eq!(highlighted("x%ab"), vec![]);
    }

    #[test]
    fn test_sigils_need_identifiers() {
        assert_eq!(highlighted("$_tmp1"), vec![(Variable, "$_tmp1")]);
        assert_eq!(highlighted("@Loop_2"), vec![(Jump, "@Loop_2")]);
        assert_eq!(highlighted("$ @ $"), vec![]);
        // the digits after a bare sigil are still a constant
        assert_eq!(kinds_and_text("$12"), vec![(Text, "$"), (Constant, "12")]);
    }

    #[test]
    fn test_labels() {
        assert_eq!(highlighted("start:"), vec![(Label, "start:")]);
        assert_eq!(highlighted("let:"), vec![(Label, "let:")]);
        assert_eq!(highlighted("start :"), vec![]);
        assert_eq!(kinds_and_text("$x:"), vec![(Variable, "$x"), (Text, ":")]);
    }

    #[test]
    fn test_keywords_and_mnemonics() {
        assert_eq!(
            highlighted("let $count = 0"),
            vec![(Declaration, "let"), (Variable, "$count"), (Constant, "0")]
        );
        assert_eq!(
            highlighted("MOV %rga 1"),
            vec![(Instruction, "MOV"), (Register, "%rga"), (Constant, "1")]
        );
        assert_eq!(highlighted("letter"), vec![]);
    }

    #[test]
    fn test_mnemonics_get_instruction_class() {
        assert_eq!(
            highlighted("add 1 2"),
            vec![(Instruction, "add"), (Constant, "1"), (Constant, "2")]
        );
        assert_eq!(highlighted("robot 1"), vec![(Constant, "1")]);
    }

    #[test]
    fn test_comment_swallows_the_rest_of_the_line() {
        let source = "mov %rga 1 // $x @y 12 <b>&</b>\nfwd";
        assert_eq!(
            highlighted(source),
            vec![
                (Instruction, "mov"),
                (Register, "%rga"),
                (Constant, "1"),
                (Comment, "// $x @y 12 <b>&</b>"),
                (LineBreak, "\n"),
                (Instruction, "fwd"),
            ]
        );
    }

    #[test]
    fn test_line_breaks() {
        assert_eq!(
            kinds_and_text("a\r\nb\nc"),
            vec![(Text, "a"), (LineBreak, "\r\n"), (Text, "b"), (LineBreak, "\n"), (Text, "c")]
        );
        assert_eq!(
            kinds_and_text("// note\r\nx"),
            vec![(Comment, "// note"), (LineBreak, "\r\n"), (Text, "x")]
        );
    }

    #[test]
    fn test_non_ascii_text() {
        let source = "caf\u{e9} $x";
        let tokens = tokenize(source);
        assert_eq!(tokens.last().map(|t| t.text(source)), Some("$x"));
        assert_eq!(tokens[0].text(source), "caf\u{e9} ");
    }

    #[test]
    fn test_tokenize_is_deterministic() {
        let source = "loop: mov %rga $x\njmp @loop // again";
        assert_eq!(tokenize(source), tokenize(source));
    }
}
