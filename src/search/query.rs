//! Query compilation
//!
//! Renders a [`Query`] into the provider's flat search syntax
//! (`keywords key:value ...`) and into a browser URL for the provider's own
//! result page. Both are pure functions of the query.

use crate::search::qualifier::{Qualifiers, RepositoryQualifiers};
use crate::types::{Order, Parameter, SearchKind, Sort};
use reqwest::Url;
use serde::{Deserialize, Serialize};

/// Characters that force a token to be quoted
const QUOTE_TRIGGERS: &[char] = &[' ', '"', '\t', '\r', '\n'];

/// A structured search request.
///
/// `limit` is the total number of items to retrieve across all pages,
/// never a page size.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub keywords: Vec<String>,
    pub kind: SearchKind,
    pub limit: usize,
    pub sort: Option<Sort>,
    pub order: Option<Order>,
    pub qualifiers: Qualifiers,
}

impl Query {
    pub fn repositories(keywords: Vec<String>, limit: usize) -> Self {
        Self {
            keywords,
            kind: SearchKind::Repositories,
            limit,
            ..Default::default()
        }
    }

    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn with_order(mut self, order: Order) -> Self {
        self.order = Some(order);
        self
    }

    pub fn with_qualifiers(mut self, qualifiers: impl Into<Qualifiers>) -> Self {
        self.qualifiers = qualifiers.into();
        self
    }

    /// Compiled provider query string
    pub fn to_query_string(&self) -> String {
        let keywords = self.keywords.iter().map(|k| quote_keyword(k));
        let qualifiers = self
            .qualifiers
            .list_set()
            .into_iter()
            .map(|(key, value)| format!("{}:{}", key, quote_qualifier(&value)));

        keywords
            .chain(qualifiers)
            .filter(|term| !term.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// `(key, value)` for the sort and order parameters that are set
    pub fn parameters(&self) -> Vec<(&'static str, &'static str)> {
        let sort = self.sort.as_ref().map(|p| (p.key(), p.value()));
        let order = self.order.as_ref().map(|p| (p.key(), p.value()));
        sort.into_iter().chain(order).collect()
    }

    /// Browser URL for the provider's result page. Pagination is left to the
    /// provider's UI.
    pub fn browser_url(&self, host: &str) -> String {
        let mut params = vec![
            ("type", self.kind.as_str().to_string()),
            ("q", self.to_query_string()),
        ];
        params.extend(self.parameters().into_iter().map(|(k, v)| (k, v.to_string())));

        let base = format!("https://{}/search", host);
        match Url::parse_with_params(&base, &params) {
            Ok(url) => url.to_string(),
            // Hosts that do not parse still get a usable, if unencoded, link.
            Err(_) => {
                let qs = params
                    .iter()
                    .map(|(k, v)| format!("{}={}", k, v))
                    .collect::<Vec<_>>()
                    .join("&");
                format!("{}?{}", base, qs)
            }
        }
    }
}

impl From<RepositoryQualifiers> for Query {
    fn from(qualifiers: RepositoryQualifiers) -> Self {
        Query {
            kind: SearchKind::Repositories,
            qualifiers: qualifiers.into(),
            ..Default::default()
        }
    }
}

fn needs_quoting(s: &str) -> bool {
    s.contains(QUOTE_TRIGGERS)
}

fn quote(s: &str) -> String {
    format!("{:?}", s)
}

/// Quote a free-text keyword. A keyword that needs quoting and contains a
/// colon is an explicit `key:value` pair; only the value is quoted.
pub fn quote_keyword(keyword: &str) -> String {
    if !needs_quoting(keyword) {
        return keyword.to_string();
    }
    match keyword.split_once(':') {
        Some((key, value)) => format!("{}:{}", key, quote(value)),
        None => quote(keyword),
    }
}

/// Quote a qualifier value. Never splits on colons.
pub fn quote_qualifier(value: &str) -> String {
    if needs_quoting(value) {
        quote(value)
    } else {
        value.to_string()
    }
}
