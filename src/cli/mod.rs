//! Command line surface
//!
//! `repo-search repos [<query>...]` with one flag per qualifier. Range and
//! date flags get a permissive shape check so obvious typos fail before a
//! request is made; anything subtler is left to the provider.

pub mod display;

use crate::search::{Query, RepositoryQualifiers, RepositorySearcher};
use crate::types::{Order, Sort};
use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use regex::Regex;
use std::io::Write;
use std::sync::LazyLock;
use tracing::info;

static RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(>|>=|<|<=|\*\.\.)?\d+(\.\.(\*|\d+))?$").expect("valid range regex")
});
static DATE_RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(>|>=|<|<=|\*\.\.)?(\d|-|\+|:|T)+(\.\.(\*|(\d|-|\+|:|T)+))?$")
        .expect("valid date range regex")
});

#[derive(Debug, Parser)]
#[command(name = "repo-search", version, about = "Search for repositories")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search repositories
    Repos(ReposArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ForkFilter {
    False,
    True,
    Only,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MatchIn {
    Name,
    Description,
    Readme,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Visibility {
    Public,
    Private,
}

fn value_name<T: ValueEnum>(value: &T) -> String {
    value
        .to_possible_value()
        .map(|v| v.get_name().to_string())
        .unwrap_or_default()
}

#[derive(Debug, Clone, Args)]
pub struct ReposArgs {
    /// Search keywords
    pub query: Vec<String>,

    /// Output matched repositories as JSON
    #[arg(long, conflicts_with = "web")]
    pub json: bool,

    /// Print the search URL for the browser instead of searching
    #[arg(short, long)]
    pub web: bool,

    /// Maximum number of repositories to fetch
    #[arg(short = 'L', long, default_value_t = 30, value_parser = clap::value_parser!(u16).range(1..=1000))]
    pub limit: u16,

    /// Order of repositories returned, ignored unless --sort is specified
    #[arg(long, value_enum)]
    pub order: Option<Order>,

    /// Sort repositories by stars, forks, help-wanted-issues, or updated
    #[arg(long, value_enum)]
    pub sort: Option<Sort>,

    /// Filter based on archive state
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub archived: Option<bool>,

    /// Filter based on created at date
    #[arg(long, value_parser = parse_date_range)]
    pub created: Option<String>,

    /// Filter based on number of followers
    #[arg(long, value_parser = parse_range)]
    pub followers: Option<String>,

    /// Include forks in search
    #[arg(long, value_enum)]
    pub include_forks: Option<ForkFilter>,

    /// Filter on number of forks
    #[arg(long, value_parser = parse_range)]
    pub forks: Option<String>,

    /// Filter on number of issues with the 'good first issue' label
    #[arg(long, value_parser = parse_range)]
    pub good_first_issues: Option<String>,

    /// Filter on number of issues with the 'help wanted' label
    #[arg(long, value_parser = parse_range)]
    pub help_wanted_issues: Option<String>,

    /// Restrict search to the name, description, or README file
    #[arg(long = "in", value_enum, value_delimiter = ',')]
    pub match_in: Vec<MatchIn>,

    /// Filter based on the coding language
    #[arg(long, value_delimiter = ',')]
    pub language: Vec<String>,

    /// Filter based on license type
    #[arg(long, value_delimiter = ',')]
    pub license: Vec<String>,

    /// Filter based on mirror state
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub mirror: Option<bool>,

    /// Filter on organization
    #[arg(long)]
    pub org: Option<String>,

    /// Filter on last updated at date
    #[arg(long, value_parser = parse_date_range)]
    pub updated: Option<String>,

    /// Filter on repository name
    #[arg(long)]
    pub repo: Option<String>,

    /// Filter on a size range, in kilobytes
    #[arg(long, value_parser = parse_range)]
    pub size: Option<String>,

    /// Filter on number of stars
    #[arg(long, value_parser = parse_range)]
    pub stars: Option<String>,

    /// Filter on topic
    #[arg(long, value_delimiter = ',')]
    pub topic: Vec<String>,

    /// Filter on number of topics
    #[arg(long, value_parser = parse_range)]
    pub number_topics: Option<String>,

    /// Filter based on user
    #[arg(long)]
    pub user: Option<String>,

    /// Filter based on visibility
    #[arg(long, value_enum)]
    pub visibility: Option<Visibility>,
}

fn parse_range(s: &str) -> Result<String, String> {
    if RANGE_RE.is_match(s) {
        Ok(s.to_string())
    } else {
        Err(format!("invalid range {:?}, expected e.g. 10, >=10, 10..50 or *..50", s))
    }
}

fn parse_date_range(s: &str) -> Result<String, String> {
    if DATE_RANGE_RE.is_match(s) {
        Ok(s.to_string())
    } else {
        Err(format!("invalid date range {:?}, expected e.g. >2020-01-01 or 2020-01-01..2021-01-01", s))
    }
}

impl ReposArgs {
    pub fn qualifiers(&self) -> RepositoryQualifiers {
        RepositoryQualifiers {
            archived: self.archived,
            created: self.created.clone(),
            followers: self.followers.clone(),
            fork: self.include_forks.as_ref().map(value_name),
            forks: self.forks.clone(),
            good_first_issues: self.good_first_issues.clone(),
            help_wanted_issues: self.help_wanted_issues.clone(),
            r#in: self.match_in.iter().map(value_name).collect(),
            is: self.visibility.as_ref().map(value_name),
            language: self.language.clone(),
            license: self.license.clone(),
            mirror: self.mirror,
            org: self.org.clone(),
            pushed: self.updated.clone(),
            repo: self.repo.clone(),
            size: self.size.clone(),
            stars: self.stars.clone(),
            topic: self.topic.clone(),
            topics: self.number_topics.clone(),
            user: self.user.clone(),
        }
    }

    pub fn to_query(&self) -> Query {
        Query {
            sort: self.sort,
            order: self.order,
            ..Query::repositories(self.query.clone(), self.limit.into())
        }
        .with_qualifiers(self.qualifiers())
    }
}

/// Run `repos` against `searcher`, writing to `out`.
pub async fn run_repos(
    args: &ReposArgs,
    searcher: &dyn RepositorySearcher,
    out: &mut impl Write,
    tty: bool,
) -> Result<()> {
    let query = args.to_query();

    if args.web {
        let url = searcher.url(&query);
        info!(url = %url, "Browser search URL");
        writeln!(out, "{}", url)?;
        return Ok(());
    }

    let result = searcher.repositories(&query).await?;

    if args.json {
        display::display_json(out, &result)?;
    } else {
        display::display_results(out, &result, tty, chrono::Utc::now())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RepositoriesResult, Repository};
    use crate::search::SearchError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    fn parse(args: &[&str]) -> Result<ReposArgs, clap::Error> {
        let argv = ["repo-search", "repos"].iter().chain(args.iter()).copied();
        Cli::try_parse_from(argv).map(|cli| match cli.command {
            Command::Repos(args) => args,
        })
    }

    #[derive(Default)]
    struct StubSearcher {
        seen: Mutex<Vec<Query>>,
    }

    #[async_trait]
    impl RepositorySearcher for StubSearcher {
        async fn repositories(&self, query: &Query) -> Result<RepositoriesResult, SearchError> {
            self.seen.lock().unwrap().push(query.clone());
            Ok(RepositoriesResult {
                items: vec![Repository {
                    full_name: "cli/cli".to_string(),
                    ..Default::default()
                }],
                total: 1,
                incomplete_results: false,
            })
        }

        fn url(&self, query: &Query) -> String {
            query.browser_url("github.com")
        }
    }

    #[test]
    fn test_flags_to_query() {
        let args = parse(&[
            "cli", "shell", "--archived", "--include-forks", "only", "--in", "name,readme",
            "--language", "go", "--language", "rust", "--updated", ">2020-01-01", "--visibility",
            "public", "--number-topics", "5..*", "--sort", "help-wanted-issues", "--order", "asc",
            "-L", "250",
        ])
        .unwrap();

        let query = args.to_query();
        assert_eq!(query.limit, 250);
        assert_eq!(query.sort, Some(Sort::HelpWantedIssues));
        assert_eq!(
            query.to_query_string(),
            "cli shell archived:true fork:only in:name,readme is:public language:go,rust pushed:>2020-01-01 topics:5..*"
        );
    }

    #[test]
    fn test_archived_explicit_false() {
        let args = parse(&["--archived=false", "cli"]).unwrap();
        assert_eq!(args.archived, Some(false));
        assert_eq!(args.query, vec!["cli".to_string()]);
    }

    #[test]
    fn test_limit_bounds() {
        assert!(parse(&["-L", "0"]).is_err());
        assert!(parse(&["-L", "1001"]).is_err());
        assert_eq!(parse(&["-L", "1000"]).unwrap().limit, 1000);
        assert_eq!(parse(&[]).unwrap().limit, 30);
    }

    #[test]
    fn test_range_validation() {
        assert!(parse(&["--stars", ">=100"]).is_ok());
        assert!(parse(&["--stars", "*..100"]).is_ok());
        assert!(parse(&["--stars", "lots"]).is_err());
        assert!(parse(&["--created", "2020-01-01..2021-01-01"]).is_ok());
        assert!(parse(&["--created", "yesterday"]).is_err());
    }

    #[test]
    fn test_json_and_web_conflict() {
        assert!(parse(&["--json", "--web"]).is_err());
    }

    #[tokio::test]
    async fn test_run_web_prints_url_without_searching() {
        let searcher = StubSearcher::default();
        let args = parse(&["--web", "cli", "--stars", ">10"]).unwrap();
        let mut out = Vec::new();

        run_repos(&args, &searcher, &mut out, false).await.unwrap();

        assert!(searcher.seen.lock().unwrap().is_empty());
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "https://github.com/search?type=repositories&q=cli+stars%3A%3E10\n"
        );
    }

    #[tokio::test]
    async fn test_run_json() {
        let searcher = StubSearcher::default();
        let args = parse(&["--json", "cli"]).unwrap();
        let mut out = Vec::new();

        run_repos(&args, &searcher, &mut out, false).await.unwrap();

        let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed[0]["full_name"], "cli/cli");
        assert_eq!(searcher.seen.lock().unwrap()[0].keywords, vec!["cli".to_string()]);
    }
}
