//! English strings surfaced by the views, keyed like the web app's
//! translation files. Unknown keys translate to themselves.

use std::collections::HashMap;

use lazy_static::lazy_static;

lazy_static! {
    static ref EN: HashMap<&'static str, &'static str> = HashMap::from([
        ("generic.loading", "Loading..."),
        ("generic.copied-clipboard", "Copied to clipboard"),
        ("auth.email-error-required", "Email is required"),
        ("auth.email-error-format", "Email must be a valid address"),
        ("settings.manage-admins.email-taken", "This email is already used by another account"),
        ("settings.manage-admins.generate-link-error", "An error occurred while generating the invitation link"),
        ("settings.manage-admins.copy-link-message", "Send this link to"),
        ("analytics.last-update", "Last update"),
        ("analytics.batches_one", "batch"),
        ("analytics.batches_other", "batches"),
        ("social.posts.no-posts", "No posts yet"),
        ("social.posts.admin-only", "Only site admins can publish posts"),
    ]);
}

pub fn translate(key: &str) -> &str {
    EN.get(key).copied().unwrap_or(key)
}

/// Picks the `_one` or `_other` variant of `key`.
pub fn translate_count(key: &str, count: usize) -> String {
    let suffix = if count == 1 { "one" } else { "other" };
    let plural_key = format!("{}_{}", key, suffix);

    match EN.get(plural_key.as_str()) {
        Some(text) => text.to_string(),
        None => translate(key).to_string(),
    }
}
