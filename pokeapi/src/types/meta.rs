use serde::{Deserialize, Serialize};

/// A `{name, url}` reference to another API resource.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

/// Envelope returned by the paginated list endpoints.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct NamedResourceList {
    pub count: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<NamedResource>,
}

impl NamedResourceList {
    /// Names of all entries, in response order.
    pub fn names(&self) -> Vec<String> {
        self.results.iter().map(|r| r.name.clone()).collect()
    }
}
