// Provider records decoded verbatim from search responses.
// Every struct defaults missing fields so partial payloads still decode.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One page (or an accumulation of pages) of search results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult<T> {
    #[serde(default)]
    pub incomplete_results: bool,
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default, rename = "total_count")]
    pub total: u64,
}

impl<T> Default for SearchResult<T> {
    fn default() -> Self {
        Self {
            incomplete_results: false,
            items: Vec::new(),
            total: 0,
        }
    }
}

impl<T> SearchResult<T> {
    /// Merge a freshly fetched page. Items are appended; the totals are
    /// repeated on every page, so only the latest are kept.
    pub fn merge(&mut self, page: SearchResult<T>) {
        self.incomplete_results = page.incomplete_results;
        self.total = page.total;
        self.items.extend(page.items);
    }
}

pub type RepositoriesResult = SearchResult<Repository>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Repository {
    pub archived: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub default_branch: String,
    pub description: Option<String>,
    pub disabled: bool,
    pub fork: bool,
    pub forks_count: u64,
    pub full_name: String,
    pub has_downloads: bool,
    pub has_issues: bool,
    pub has_pages: bool,
    pub has_projects: bool,
    pub has_wiki: bool,
    pub homepage: Option<String>,
    pub id: i64,
    pub language: Option<String>,
    pub license: Option<License>,
    pub master_branch: Option<String>,
    pub name: String,
    pub open_issues_count: u64,
    pub owner: User,
    pub private: bool,
    pub pushed_at: Option<DateTime<Utc>>,
    pub size: u64,
    pub stargazers_count: u64,
    pub updated_at: Option<DateTime<Utc>>,
    pub watchers_count: u64,

    // URLs
    pub archive_url: String,
    pub assignees_url: String,
    pub blobs_url: String,
    pub branches_url: String,
    pub clone_url: String,
    pub collaborators_url: String,
    pub comments_url: String,
    pub commits_url: String,
    pub compare_url: String,
    pub contents_url: String,
    pub contributors_url: String,
    pub deployments_url: String,
    pub downloads_url: String,
    pub events_url: String,
    pub forks_url: String,
    pub git_commits_url: String,
    pub git_refs_url: String,
    pub git_tags_url: String,
    pub git_url: String,
    pub html_url: String,
    pub hooks_url: String,
    pub issue_comment_url: String,
    pub issue_events_url: String,
    pub issues_url: String,
    pub keys_url: String,
    pub labels_url: String,
    pub languages_url: String,
    pub merges_url: String,
    pub milestones_url: String,
    pub mirror_url: Option<String>,
    pub notifications_url: String,
    pub pulls_url: String,
    pub releases_url: String,
    pub ssh_url: String,
    pub svn_url: String,
    pub stargazers_url: String,
    pub statuses_url: String,
    pub subscribers_url: String,
    pub subscription_url: String,
    pub tags_url: String,
    pub teams_url: String,
    pub trees_url: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct License {
    pub html_url: Option<String>,
    pub key: String,
    pub name: String,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub gravatar_id: Option<String>,
    pub id: i64,
    pub login: String,
    pub site_admin: bool,
    #[serde(rename = "type")]
    pub user_type: String,

    // URLs
    pub avatar_url: String,
    pub events_url: String,
    pub followers_url: String,
    pub following_url: String,
    pub gists_url: String,
    pub html_url: String,
    pub organizations_url: String,
    pub received_events_url: String,
    pub repos_url: String,
    pub starred_url: String,
    pub subscriptions_url: String,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_partial_repository_page() {
        let body = r#"{
            "total_count": 2,
            "incomplete_results": true,
            "items": [
                {"full_name": "rust-lang/rust", "description": null, "license": null,
                 "owner": {"login": "rust-lang", "type": "Organization"},
                 "updated_at": "2024-05-01T12:00:00Z"}
            ]
        }"#;

        let page: RepositoriesResult = serde_json::from_str(body).unwrap();
        assert_eq!(page.total, 2);
        assert!(page.incomplete_results);
        assert_eq!(page.items[0].full_name, "rust-lang/rust");
        assert_eq!(page.items[0].owner.user_type, "Organization");
        assert!(page.items[0].description.is_none());
        assert!(page.items[0].updated_at.is_some());
    }

    #[test]
    fn test_merge_keeps_latest_totals() {
        let mut acc: SearchResult<u32> = SearchResult::default();
        acc.merge(SearchResult { incomplete_results: true, items: vec![1, 2], total: 10 });
        acc.merge(SearchResult { incomplete_results: false, items: vec![3], total: 11 });

        assert_eq!(acc.items, vec![1, 2, 3]);
        assert_eq!(acc.total, 11);
        assert!(!acc.incomplete_results);
    }
}
