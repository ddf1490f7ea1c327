//! Corpus hygiene checks for comment-shaped input.
//!
//! Scraped comment dumps carry tombstones for deleted content, bot
//! authors, and boilerplate left behind by moderation tooling. None of it
//! is human kinship talk, so callers screen records with [`valid_text`]
//! and [`valid_author`] before extraction.

use once_cell::sync::Lazy;
use regex::Regex;

/// Boilerplate posted when r/Parenting moderation removes a comment.
const PARENTING_REMOVAL_NOTICE: &str = "Your content may have been automatically removed \
through auto-moderation or manually removed by a human moderator.";

/// Boilerplate posted when r/askscience moderation removes a comment.
const ASKSCIENCE_REMOVAL_NOTICE: &str = "Thank you for your submission! Unfortunately, \
your submission has been removed for the following reason(s):";

/// Bot account names end in "bot" in some casing.
static BOT_AUTHOR: Lazy<Regex> =
    Lazy::new(|| Regex::new("[Bb][Oo][Tt]$").expect("BOT_AUTHOR pattern is invalid"));

/// True when the comment body is worth scanning.
///
/// Rejects empty bodies, the `[removed]` and `[deleted]` tombstones, and
/// the moderation boilerplate specific to the comment's subreddit.
#[must_use]
pub fn valid_text(text: &str, subreddit: &str) -> bool {
    if text.is_empty() || text == "[removed]" || text == "[deleted]" {
        return false;
    }
    if subreddit.eq_ignore_ascii_case("parenting") && text.contains(PARENTING_REMOVAL_NOTICE) {
        return false;
    }
    if subreddit.eq_ignore_ascii_case("askscience")
        && (text.contains(ASKSCIENCE_REMOVAL_NOTICE) || text.contains("sister sub"))
    {
        return false;
    }
    true
}

/// True when the author looks like a person rather than a bot or a
/// deleted account.
#[must_use]
pub fn valid_author(author: &str) -> bool {
    if author == "[deleted]" {
        return false;
    }
    if BOT_AUTHOR.is_match(author) {
        return false;
    }
    if author.to_lowercase().contains("automoderato") {
        return false;
    }
    true
}
