// Callback detection module
// Flags redirect-callback queries so they never land in search history

use crate::search::ParamMap;

/// Predicate deciding whether a raw query string belongs to a
/// redirect-callback navigation rather than a user-issued search
pub trait CallbackGuard {
    fn is_callback_search(&self, raw_search: &str) -> bool;
}

/// Detects OAuth authorization-code redirects by their query shape
///
/// A redirect back from the authorization server carries both a `code`
/// and a `state` parameter; a user search never does.
#[derive(Debug, Clone, Copy, Default)]
pub struct OAuthCallbackGuard;

impl CallbackGuard for OAuthCallbackGuard {
    fn is_callback_search(&self, raw_search: &str) -> bool {
        let params = ParamMap::from_query(raw_search);
        params.single("code").is_some() && params.single("state").is_some()
    }
}
