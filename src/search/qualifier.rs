//! Qualifiers
//!
//! A qualifier is a named filter term embedded in the query string as
//! `key:value`, e.g. `stars:>100`. Keys are declared explicitly per variant
//! of [`QualifierKey`]; values are a closed set of shapes in
//! [`QualifierValue`].

use serde::{Deserialize, Serialize};

/// Provider-facing qualifier keys for repository searches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QualifierKey {
    Archived,
    Created,
    Followers,
    Fork,
    Forks,
    GoodFirstIssues,
    HelpWantedIssues,
    In,
    Is,
    Language,
    License,
    Mirror,
    Org,
    Pushed,
    Repo,
    Size,
    Stars,
    Topic,
    Topics,
    User,
}

impl QualifierKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualifierKey::Archived => "archived",
            QualifierKey::Created => "created",
            QualifierKey::Followers => "followers",
            QualifierKey::Fork => "fork",
            QualifierKey::Forks => "forks",
            QualifierKey::GoodFirstIssues => "good-first-issues",
            QualifierKey::HelpWantedIssues => "help-wanted-issues",
            QualifierKey::In => "in",
            QualifierKey::Is => "is",
            QualifierKey::Language => "language",
            QualifierKey::License => "license",
            QualifierKey::Mirror => "mirror",
            QualifierKey::Org => "org",
            QualifierKey::Pushed => "pushed",
            QualifierKey::Repo => "repo",
            QualifierKey::Size => "size",
            QualifierKey::Stars => "stars",
            QualifierKey::Topic => "topic",
            QualifierKey::Topics => "topics",
            QualifierKey::User => "user",
        }
    }
}

impl std::fmt::Display for QualifierKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value shapes a qualifier can take
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QualifierValue {
    /// Boolean tri-state: unset, true or false
    Flag(Option<bool>),
    /// Numeric or date range expression such as `>=10` or `2020-01-01..*`
    Range(Option<String>),
    Text(Option<String>),
    /// Rendered comma separated
    List(Vec<String>),
}

impl QualifierValue {
    pub fn is_set(&self) -> bool {
        match self {
            QualifierValue::Flag(v) => v.is_some(),
            QualifierValue::Range(v) | QualifierValue::Text(v) => {
                v.as_deref().is_some_and(|s| !s.is_empty())
            }
            QualifierValue::List(v) => !v.is_empty(),
        }
    }

    /// Unquoted provider rendering, `None` when unset.
    pub fn render(&self) -> Option<String> {
        if !self.is_set() {
            return None;
        }
        match self {
            QualifierValue::Flag(v) => v.map(|b| b.to_string()),
            QualifierValue::Range(v) | QualifierValue::Text(v) => v.clone(),
            QualifierValue::List(v) => Some(v.join(",")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Qualifier {
    pub key: QualifierKey,
    pub value: QualifierValue,
}

impl Qualifier {
    pub fn new(key: QualifierKey, value: QualifierValue) -> Self {
        Self { key, value }
    }

    pub fn key(&self) -> &'static str {
        self.key.as_str()
    }

    pub fn is_set(&self) -> bool {
        self.value.is_set()
    }

    pub fn render(&self) -> Option<String> {
        self.value.render()
    }
}

/// Ordered qualifier collection; rendering follows insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Qualifiers(Vec<Qualifier>);

impl Qualifiers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the qualifier for `key`, keeping its original position.
    pub fn set(&mut self, key: QualifierKey, value: QualifierValue) -> &mut Self {
        match self.0.iter_mut().find(|q| q.key == key) {
            Some(existing) => existing.value = value,
            None => self.0.push(Qualifier::new(key, value)),
        }
        self
    }

    pub fn with(mut self, key: QualifierKey, value: QualifierValue) -> Self {
        self.set(key, value);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &Qualifier> {
        self.0.iter()
    }

    /// `(key, unquoted value)` for every set qualifier, in order.
    pub fn list_set(&self) -> Vec<(&'static str, String)> {
        self.0
            .iter()
            .filter_map(|q| q.render().map(|v| (q.key(), v)))
            .collect()
    }
}

impl FromIterator<Qualifier> for Qualifiers {
    fn from_iter<I: IntoIterator<Item = Qualifier>>(iter: I) -> Self {
        let mut qualifiers = Qualifiers::new();
        for q in iter {
            qualifiers.set(q.key, q.value);
        }
        qualifiers
    }
}

/// Typed repository qualifier set.
///
/// Converting into [`Qualifiers`] emits every field in key order, so two
/// equal sets always render the same string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryQualifiers {
    pub archived: Option<bool>,
    pub created: Option<String>,
    pub followers: Option<String>,
    /// `true`, `false` or `only`
    pub fork: Option<String>,
    pub forks: Option<String>,
    pub good_first_issues: Option<String>,
    pub help_wanted_issues: Option<String>,
    pub r#in: Vec<String>,
    /// Visibility: `public` or `private`
    pub is: Option<String>,
    pub language: Vec<String>,
    pub license: Vec<String>,
    pub mirror: Option<bool>,
    pub org: Option<String>,
    pub pushed: Option<String>,
    pub repo: Option<String>,
    pub size: Option<String>,
    pub stars: Option<String>,
    pub topic: Vec<String>,
    pub topics: Option<String>,
    pub user: Option<String>,
}

impl From<RepositoryQualifiers> for Qualifiers {
    fn from(q: RepositoryQualifiers) -> Self {
        use QualifierKey as K;
        use QualifierValue as V;

        [
            (K::Archived, V::Flag(q.archived)),
            (K::Created, V::Range(q.created)),
            (K::Followers, V::Range(q.followers)),
            (K::Fork, V::Text(q.fork)),
            (K::Forks, V::Range(q.forks)),
            (K::GoodFirstIssues, V::Range(q.good_first_issues)),
            (K::HelpWantedIssues, V::Range(q.help_wanted_issues)),
            (K::In, V::List(q.r#in)),
            (K::Is, V::Text(q.is)),
            (K::Language, V::List(q.language)),
            (K::License, V::List(q.license)),
            (K::Mirror, V::Flag(q.mirror)),
            (K::Org, V::Text(q.org)),
            (K::Pushed, V::Range(q.pushed)),
            (K::Repo, V::Text(q.repo)),
            (K::Size, V::Range(q.size)),
            (K::Stars, V::Range(q.stars)),
            (K::Topic, V::List(q.topic)),
            (K::Topics, V::Range(q.topics)),
            (K::User, V::Text(q.user)),
        ]
        .into_iter()
        .map(|(key, value)| Qualifier::new(key, value))
        .collect()
    }
}
