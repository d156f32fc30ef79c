// Type definitions and enums

use clap::ValueEnum;

/// Entity type searched by a query, rendered as the `search/{kind}` path
/// segment and the `type` parameter of browser URLs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchKind {
    #[default]
    Repositories,
}

impl SearchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchKind::Repositories => "repositories",
        }
    }
}

impl std::fmt::Display for SearchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ordering directive sent as a top-level request parameter rather than
/// embedded in the query string.
pub trait Parameter {
    /// Request parameter name.
    fn key(&self) -> &'static str;

    /// Provider-facing value.
    fn value(&self) -> &'static str;
}

/// Sort field for repository searches
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Sort {
    Forks,
    HelpWantedIssues,
    Stars,
    Updated,
}

impl Parameter for Sort {
    fn key(&self) -> &'static str {
        "sort"
    }

    fn value(&self) -> &'static str {
        match self {
            Sort::Forks => "forks",
            Sort::HelpWantedIssues => "help-wanted-issues",
            Sort::Stars => "stars",
            Sort::Updated => "updated",
        }
    }
}

impl std::fmt::Display for Sort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.value())
    }
}

/// Order direction, ignored by the provider unless a sort is given
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    Asc,
    Desc,
}

impl Parameter for Order {
    fn key(&self) -> &'static str {
        "order"
    }

    fn value(&self) -> &'static str {
        match self {
            Order::Asc => "asc",
            Order::Desc => "desc",
        }
    }
}

impl std::fmt::Display for Order {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.value())
    }
}
