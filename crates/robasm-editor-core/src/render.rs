//! HTML rendering of a token sequence.
//!
//! The renderer walks tokens produced over the original text and emits one
//! span per highlighted token. Text is escaped on the way out, so the output
//! is safe to assign to `innerHTML`.

use pulldown_cmark_escape::{FmtWriter, StrWrite, escape_html_body_text};
use smol_str::SmolStr;

use crate::platform::Quirks;
use crate::syntax::TokenKind;
use crate::token::{Token, tokenize};

/// Startup-resolved options for the renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Emit `<wbr>` after each literal space so the backdrop wraps the way
    /// the textarea does on engines that need it.
    pub space_break_hint: bool,
    /// Prepended to every token class, e.g. `hl-` gives `hl-register`.
    pub class_prefix: Option<SmolStr>,
}

impl RenderOptions {
    pub fn from_quirks(quirks: &Quirks) -> Self {
        Self {
            space_break_hint: quirks.space_break_hint,
            class_prefix: None,
        }
    }

    pub fn with_class_prefix(mut self, prefix: impl Into<SmolStr>) -> Self {
        self.class_prefix = Some(prefix.into());
        self
    }
}

/// Render `source` to highlighted HTML with default options.
pub fn render_highlights(source: &str) -> String {
    render_highlights_with(source, &RenderOptions::default())
}

/// Render `source` to highlighted HTML.
pub fn render_highlights_with(source: &str, options: &RenderOptions) -> String {
    let tokens = tokenize(source);
    render_tokens(source, &tokens, options)
}

/// Render an already-tokenized source.
pub fn render_tokens(source: &str, tokens: &[Token], options: &RenderOptions) -> String {
    // Markup roughly doubles short sources.
    let mut html = String::with_capacity(source.len() * 2);
    let writer = HighlightWriter::new(source, options, FmtWriter(&mut html));
    if let Err(e) = writer.run(tokens) {
        tracing::error!(error = %e, "writing highlight html failed");
    }
    tracing::trace!(
        target: "robasm::render",
        source_len = source.len(),
        html_len = html.len(),
        "rendered highlights"
    );
    html
}

/// Streams highlight markup for a token sequence into any `StrWrite`.
pub struct HighlightWriter<'a, W> {
    source: &'a str,
    options: &'a RenderOptions,
    writer: W,
}

impl<'a, W: StrWrite> HighlightWriter<'a, W> {
    pub fn new(source: &'a str, options: &'a RenderOptions, writer: W) -> Self {
        Self {
            source,
            options,
            writer,
        }
    }

    /// Write every token and hand the writer back.
    pub fn run(mut self, tokens: &[Token]) -> Result<W, W::Error> {
        for token in tokens {
            self.write_token(token)?;
        }
        Ok(self.writer)
    }

    fn write_token(&mut self, token: &Token) -> Result<(), W::Error> {
        let text = token.text(self.source);
        if token.kind == TokenKind::LineBreak {
            return self.writer.write_str("<br>");
        }
        match token.kind.class_name() {
            Some(class) => {
                let prefix = self.options.class_prefix.as_deref().unwrap_or("");
                write!(&mut self.writer, "<span class=\"{}{}\">", prefix, class)?;
                self.write_text(text)?;
                self.writer.write_str("</span>")
            }
            None => self.write_text(text),
        }
    }

    fn write_text(&mut self, text: &str) -> Result<(), W::Error> {
        if !self.options.space_break_hint {
            return escape_html_body_text(&mut self.writer, text);
        }
        let mut pieces = text.split(' ');
        if let Some(first) = pieces.next() {
            escape_html_body_text(&mut self.writer, first)?;
        }
        for piece in pieces {
            self.writer.write_str(" <wbr>")?;
            escape_html_body_text(&mut self.writer, piece)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_rule_coverage() {
        insta::assert_snapshot!(
            render_highlights("foo: %ab 12 $bar @baz // comment 34"),
            @r#"<span class="label">foo:</span> <span class="register">%ab</span> <span class="constant">12</span> <span class="variable">$bar</span> <span class="jump">@baz</span> <span class="comment">// comment 34</span>"#
        );
    }

    #[test]
    fn test_program() {
        insta::assert_snapshot!(
            render_highlights("let $n = 3\nloop:\nmov %rga $n\njmp @loop"),
            @r#"<span class="declaration">let</span> <span class="variable">$n</span> = <span class="constant">3</span><br><span class="label">loop:</span><br><span class="instruction">mov</span> <span class="register">%rga</span> <span class="variable">$n</span><br><span class="instruction">jmp</span> <span class="jump">@loop</span>"#
        );
    }

    #[test]
    fn test_plain_text_passes_through() {
        for source in ["", "hello world", "what is this?", "%abcd 1234 $ @"] {
            assert_eq!(render_highlights(source), source);
        }
    }

    #[test]
    fn test_newlines_become_breaks() {
        assert_eq!(render_highlights("one\ntwo\r\nthree"), "one<br>two<br>three");
        assert_eq!(render_highlights("\n\n"), "<br><br>");
    }

    #[test]
    fn test_single_variable_gets_single_span() {
        let html = render_highlights("the $answer is here");
        assert_eq!(html.matches("<span").count(), 1);
        assert!(html.contains(r#"<span class="variable">$answer</span>"#));
    }

    #[test]
    fn test_repeat_render_is_stable() {
        let source = "start: mov %rga 12 // go\njmp @start";
        assert_eq!(render_highlights(source), render_highlights(source));
    }

    #[test]
    fn test_html_is_escaped() {
        assert_eq!(render_highlights("a < b && c > d"), "a &lt; b &amp;&amp; c &gt; d");
        assert_eq!(
            render_highlights("// <script>"),
            r#"<span class="comment">// &lt;script&gt;</span>"#
        );
    }

    #[test]
    fn test_comment_keeps_neighbouring_spans_intact() {
        let html = render_highlights("%ab // %ab");
        assert_eq!(
            html,
            r#"<span class="register">%ab</span> <span class="comment">// %ab</span>"#
        );
    }

    #[test]
    fn test_space_break_hint() {
        let options = RenderOptions {
            space_break_hint: true,
            class_prefix: None,
        };
        assert_eq!(
            render_highlights_with("mov %rga // a b", &options),
            r#"<span class="instruction">mov</span> <wbr><span class="register">%rga</span> <wbr><span class="comment">// <wbr>a <wbr>b</span>"#
        );
    }

    #[test]
    fn test_class_prefix() {
        let options = RenderOptions::default().with_class_prefix("hl-");
        assert_eq!(
            render_highlights_with("@top", &options),
            r#"<span class="hl-jump">@top</span>"#
        );
    }

    #[test]
    fn test_options_from_quirks() {
        let quirks = Quirks {
            space_break_hint: true,
            horizontal_padding_px: 3.0,
        };
        assert!(RenderOptions::from_quirks(&quirks).space_break_hint);
    }
}
