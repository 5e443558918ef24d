use postdigest_core::{AllowList, Post};

/// Keep posts whose author is on the allow-list (case-sensitive exact match).
///
/// Order is preserved, so filtering twice with the same list is a no-op.
#[must_use]
pub fn filter_posts(posts: Vec<Post>, allow_list: &AllowList) -> Vec<Post> {
    posts
        .into_iter()
        .filter(|p| allow_list.contains(&p.author))
        .collect()
}
