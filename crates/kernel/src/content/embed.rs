//! Embedded-markup cleaning for iframe fields.
//!
//! Editors paste provider snippets such as form or map embeds. The snippet is
//! tokenized as HTML, so quoted attribute values, character references and
//! comments are read the way a browser reads them. Only the first `<iframe>`
//! survives, rebuilt from allow-listed attributes. Fallback content between
//! the tags is reduced to a few inline formatting tags.

use std::cell::RefCell;
use std::collections::HashSet;

use html5ever::tendril::StrTendril;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};
use thiserror::Error;

use super::helpers::html_escape;

/// Attributes kept on the rebuilt iframe, per the HTML iframe element
/// reference, plus `frameborder`.
pub const ALLOWED_IFRAME_ATTRIBUTES: &[&str] = &[
    "allowfullscreen",
    "height",
    "width",
    "name",
    "referrerpolicy",
    "sandbox",
    "src",
    "title",
    "frameborder",
];

/// Tags kept inside the iframe for browsers that do not render it.
pub const ALLOWED_FALLBACK_TAGS: &[&str] = &["a", "b", "i", "em", "strong", "br", "sup", "sub"];

/// Errors from embed cleaning.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmbedError {
    #[error("The embed string needs to look like '<iframe ...></iframe>'")]
    MissingIframe,
}

/// Rebuild the first iframe in `input` from allow-listed parts.
///
/// Attribute values are decoded by the tokenizer and HTML-escaped once on
/// output. When an attribute repeats, the first occurrence wins. Iframes
/// inside comments or raw-text elements are not iframes. Script and style
/// elements inside the iframe are dropped with their contents.
pub fn clean_iframe(input: &str) -> Result<String, EmbedError> {
    let queue = BufferQueue::default();
    queue.push_back(StrTendril::from_slice(input));

    let tokenizer = Tokenizer::new(IframeScan::default(), TokenizerOpts::default());
    let _ = tokenizer.feed(&queue);
    tokenizer.end();

    let found = tokenizer.sink.found.take();
    let Some(attrs) = found.attrs else {
        return Err(EmbedError::MissingIframe);
    };

    let mut out = String::from("<iframe");
    for (name, value) in &attrs {
        out.push_str(&format!(" {}=\"{}\"", name, html_escape(value)));
    }
    out.push('>');
    out.push_str(&clean_fallback(&found.inner));
    out.push_str("</iframe>");
    Ok(out)
}

fn clean_fallback(inner: &str) -> String {
    let tags: HashSet<&str> = ALLOWED_FALLBACK_TAGS.iter().copied().collect();
    ammonia::Builder::default()
        .tags(tags)
        .clean(inner.trim())
        .to_string()
}

/// What the scan collected: the first iframe's kept attributes and its raw
/// fallback markup.
#[derive(Debug, Default)]
struct FoundIframe {
    attrs: Option<Vec<(String, String)>>,
    inner: String,
    closed: bool,
}

impl FoundIframe {
    fn inside(&self) -> bool {
        self.attrs.is_some() && !self.closed
    }
}

/// Token sink that stops caring once the first iframe closes.
///
/// The tokenizer alone does not know which elements hold raw text; a tree
/// builder normally tells it. The sink does the same for the elements that
/// matter here, so `<script>"<iframe>"</script>` is not mistaken for markup.
#[derive(Debug, Default)]
struct IframeScan {
    found: RefCell<FoundIframe>,
}

impl TokenSink for IframeScan {
    type Handle = ();

    fn process_token(&self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        let mut found = self.found.borrow_mut();
        if found.closed {
            return TokenSinkResult::Continue;
        }
        match token {
            Token::TagToken(tag) if found.inside() => {
                if tag.kind == TagKind::EndTag && &*tag.name == "iframe" {
                    found.closed = true;
                }
                TokenSinkResult::Continue
            }
            Token::TagToken(tag) if tag.kind == TagKind::StartTag => match &*tag.name {
                "iframe" => {
                    let attrs = tag
                        .attrs
                        .iter()
                        .filter(|a| ALLOWED_IFRAME_ATTRIBUTES.contains(&&*a.name.local))
                        .map(|a| (a.name.local.to_string(), a.value.to_string()))
                        .collect();
                    found.attrs = Some(attrs);
                    TokenSinkResult::RawData(RawKind::Rawtext)
                }
                "script" => TokenSinkResult::RawData(RawKind::ScriptData),
                "style" | "xmp" | "noembed" | "noframes" => TokenSinkResult::RawData(RawKind::Rawtext),
                "textarea" | "title" => TokenSinkResult::RawData(RawKind::Rcdata),
                "plaintext" => TokenSinkResult::Plaintext,
                _ => TokenSinkResult::Continue,
            },
            Token::CharacterTokens(text) if found.inside() => {
                found.inner.push_str(&text);
                TokenSinkResult::Continue
            }
            _ => TokenSinkResult::Continue,
        }
    }
}
