//! Token categories for robot assembly and the highlight rule table.
//!
//! The rule table is the single source of truth for which categories exist,
//! which CSS class each one renders with, and the order the tokenizer tries
//! them in.
//!
//! Besides the base categories, instruction mnemonics (`mov`, `add`,
//! `jmp`, ...) get their own `instruction` class, so `add 1 2` highlights
//! `add` as well as both constants. Stylesheets written for the base classes
//! only can leave `.instruction` unstyled.

/// Lexical category of a token in assembly source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `\n` or `\r\n`.
    LineBreak,
    /// The `let` memory declaration keyword.
    Declaration,
    /// An instruction mnemonic such as `mov` or `jmp`.
    Instruction,
    /// `%` followed by 1-3 lowercase letters, e.g. `%rga`.
    Register,
    /// 1-3 decimal digits.
    Constant,
    /// `$` followed by an identifier.
    Variable,
    /// An identifier immediately followed by `:`.
    Label,
    /// `@` followed by an identifier.
    Jump,
    /// `//` through the end of the line.
    Comment,
    /// Anything unrecognised.
    Text,
}

impl TokenKind {
    /// CSS class the renderer wraps this token in.
    ///
    /// `None` for kinds that are not wrapped (plain text and line breaks).
    pub fn class_name(self) -> Option<&'static str> {
        HIGHLIGHT_RULES
            .iter()
            .find(|rule| rule.kind == self)
            .and_then(|rule| rule.class)
    }

    /// Whether the renderer emits a span for this kind.
    pub fn is_highlighted(self) -> bool {
        self.class_name().is_some()
    }
}

/// One row of the highlight rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightRule {
    pub kind: TokenKind,
    /// Display class, `None` when the kind renders without a wrapper.
    pub class: Option<&'static str>,
    pub description: &'static str,
}

/// Rule table in tokenizer precedence order.
///
/// At every position the tokenizer takes the first rule that matches and
/// consumes its span. Comments come before word rules so that anything after
/// `//` stays inside the comment.
pub const HIGHLIGHT_RULES: &[HighlightRule] = &[
    HighlightRule {
        kind: TokenKind::LineBreak,
        class: None,
        description: "newline, rendered as a line break",
    },
    HighlightRule {
        kind: TokenKind::Comment,
        class: Some("comment"),
        description: "`//` through the end of the line",
    },
    HighlightRule {
        kind: TokenKind::Constant,
        class: Some("constant"),
        description: "whole word of 1-3 decimal digits",
    },
    HighlightRule {
        kind: TokenKind::Label,
        class: Some("label"),
        description: "identifier immediately followed by `:`",
    },
    HighlightRule {
        kind: TokenKind::Declaration,
        class: Some("declaration"),
        description: "the `let` keyword",
    },
    HighlightRule {
        kind: TokenKind::Instruction,
        class: Some("instruction"),
        description: "instruction mnemonic",
    },
    HighlightRule {
        kind: TokenKind::Register,
        class: Some("register"),
        description: "`%` plus 1-3 lowercase letters, as a whole word",
    },
    HighlightRule {
        kind: TokenKind::Variable,
        class: Some("variable"),
        description: "`$` plus an identifier",
    },
    HighlightRule {
        kind: TokenKind::Jump,
        class: Some("jump"),
        description: "`@` plus an identifier",
    },
    HighlightRule {
        kind: TokenKind::Text,
        class: None,
        description: "anything else, passed through",
    },
];

/// Declaration keywords.
pub const KEYWORDS: &[&str] = &["let"];

/// Mnemonics understood by the robot assembler.
pub const MNEMONICS: &[&str] = &[
    "add", "sub", "mul", "div", "jmp", "jmpc", "mov", "stac_g", "stac_s", "exec", "return",
    "cmp_call", "fwd", "rot", "brk", "bttry", "inven", "drop", "item", "out", "noop",
];

/// Classify a bare word (no sigil, no trailing colon).
///
/// Matching is ASCII case-insensitive, the same way the assembler reads
/// source lines.
pub fn classify_word(word: &str) -> TokenKind {
    if KEYWORDS.iter().any(|k| k.eq_ignore_ascii_case(word)) {
        TokenKind::Declaration
    } else if MNEMONICS.iter().any(|m| m.eq_ignore_ascii_case(word)) {
        TokenKind::Instruction
    } else {
        TokenKind::Text
    }
}

/// Characters that can appear inside a word (`\w` in ASCII).
pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Characters that can start an identifier.
pub fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}
