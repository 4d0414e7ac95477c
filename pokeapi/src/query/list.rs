use url::Url;

use super::{common::QueryCommon, Query};

/// Query for the named-resource list endpoints (`/pokemon`, `/type`).
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct ListQuery {
    pub common: QueryCommon,
}

impl Query for ListQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }

    fn add_to_url(&self, url: &Url) -> Url {
        self.common.add_to_url(url)
    }
}

impl ListQuery {
    /// Stable key for caching responses to this query.
    pub fn cache_key(&self) -> String {
        format!("l{:?}:o{:?}", self.common.limit, self.common.offset)
    }
}
