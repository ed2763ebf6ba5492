//! Tags recognised inside documentation comments.
//!
//! ```text
//! Constrains \a x to be sorted.
//! @group globals
//! @param x: the array to order
//! ```

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static GROUP_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@group[ \t]+(\w+)").expect("valid group tag regex"));

static PARAM_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"@param[ \t]+([^:\n]*):([^\n]*)").expect("valid param tag regex")
});

static ARG_REF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\a[ \t]+(\w+)").expect("valid argument reference regex"));

/// A `@param name: description` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDoc {
    pub name: String,
    pub doc: String,
}

/// Removes the first `@group name` tag from `text` and returns the name.
/// The name ends at the first character that is not a word character.
pub fn extract_group(text: &mut String) -> Option<String> {
    let (range, name) = {
        let caps = GROUP_TAG.captures(text)?;
        (caps.get(0)?.range(), caps[1].to_string())
    };
    text.replace_range(range, "");
    Some(name)
}

/// Removes every `@param` line from `text`, returning them in order.
pub fn extract_params(text: &mut String) -> Vec<ParamDoc> {
    let params: Vec<ParamDoc> = PARAM_TAG
        .captures_iter(text)
        .map(|caps| ParamDoc {
            name: caps[1].trim().to_string(),
            doc: caps[2].trim().to_string(),
        })
        .collect();
    if !params.is_empty() {
        *text = PARAM_TAG.replace_all(text, "").into_owned();
    }
    params
}

/// Replaces every `\a name` argument reference with a highlighted span and
/// returns the referenced names.
pub fn replace_args(text: &mut String) -> Vec<String> {
    let mut names = Vec::new();
    let replaced = ARG_REF.replace_all(text, |caps: &Captures| {
        names.push(caps[1].to_string());
        format!("<span class='mzn-arg'>{}</span>", &caps[1])
    });
    *text = replaced.into_owned();
    names
}
