//! Cleanup of raw completions into draft fields.
//!
//! Links are pulled out of the task body so they can be rendered separately,
//! HTML markup is dropped, and the generated title is unquoted.

use once_cell::sync::Lazy;
use regex::Regex;

/// Absolute http(s) URL running up to the next whitespace, quote or angle bracket.
static URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"https?://[^\s<>"]+"#).expect("URL pattern is valid"));

static MARKUP_TAG_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"</?[A-Za-z][A-Za-z0-9-]*(?:\s[^<>]*)?/?>").expect("markup pattern is valid")
});

/// Task body after link extraction, ready to feed into the title prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedBody {
    pub description: String,
    pub urls: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedDraft {
    pub title: String,
    pub description: String,
    pub urls: Vec<String>,
}

/// Text that remembers, for each byte, where it sat in the raw body.
struct TracedText {
    text: String,
    origins: Vec<usize>,
}

impl TracedText {
    fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            origins: (0..text.len()).collect(),
        }
    }

    /// Cut every match of `pattern` out, returning the matches with their raw-body offsets.
    fn cut(&self, pattern: &Regex) -> (TracedText, Vec<(usize, String)>) {
        let mut kept = TracedText {
            text: String::with_capacity(self.text.len()),
            origins: Vec::with_capacity(self.origins.len()),
        };
        let mut removed = Vec::new();
        let mut last = 0;

        for m in pattern.find_iter(&self.text) {
            kept.text.push_str(&self.text[last..m.start()]);
            kept.origins.extend_from_slice(&self.origins[last..m.start()]);
            removed.push((self.origins[m.start()], m.as_str().to_string()));
            last = m.end();
        }
        kept.text.push_str(&self.text[last..]);
        kept.origins.extend_from_slice(&self.origins[last..]);

        (kept, removed)
    }
}

/// Collect every URL in order of appearance and return the text with them cut out.
/// Duplicates are kept.
pub fn extract_urls(text: &str) -> (String, Vec<String>) {
    let (kept, urls) = TracedText::new(text).cut(&URL_PATTERN);
    (kept.text, urls.into_iter().map(|(_, url)| url).collect())
}

pub fn strip_markup(text: &str) -> String {
    MARKUP_TAG_PATTERN.replace_all(text, "").into_owned()
}

/// Removing URLs can leave double spaces or dangling punctuation; those are left alone.
pub fn clean_body(raw_body: &str) -> CleanedBody {
    let (without_urls, mut urls) = TracedText::new(raw_body).cut(&URL_PATTERN);
    let (without_markup, _) = without_urls.cut(&MARKUP_TAG_PATTERN);

    // Dropping a tag can glue a scheme back onto a host, so sweep once more.
    let (description, late_urls) = without_markup.cut(&URL_PATTERN);
    urls.extend(late_urls);
    urls.sort_by_key(|(offset, _)| *offset);

    CleanedBody {
        description: description.text.trim().to_string(),
        urls: urls.into_iter().map(|(_, url)| url).collect(),
    }
}

/// Trim and strip exactly one pair of wrapping double quotes.
pub fn clean_title(raw_title: &str) -> String {
    let stripped = strip_markup(raw_title);
    let trimmed = stripped.trim();

    let unquoted = trimmed
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(trimmed);

    unquoted.to_string()
}

pub fn clean(raw_body: &str, raw_title: &str) -> CleanedDraft {
    let body = clean_body(raw_body);

    CleanedDraft {
        title: clean_title(raw_title),
        description: body.description,
        urls: body.urls,
    }
}
