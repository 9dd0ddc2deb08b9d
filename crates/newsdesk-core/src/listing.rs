//! # Cached Listings
//!
//! The last fetched records of a collection, held only for client-side
//! filtering. A listing is replaced wholesale on every refresh and is never
//! consulted for writes, with one exception: the category delete guard reads
//! the cached article count.

use crate::api::{Record, Role};

/// An ordered snapshot of records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Listing {
    records: Vec<Record>,
}

impl Listing {
    /// Creates a listing from freshly fetched records.
    #[must_use]
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Replaces the whole snapshot.
    pub fn replace(&mut self, records: Vec<Record>) {
        self.records = records;
    }

    /// All records, in backend order.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the listing holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Finds a record by id.
    #[must_use]
    pub fn find(&self, id: u64) -> Option<&Record> {
        self.records.iter().find(|r| r.id() == Some(id))
    }

    /// Users whose username, email or full name contains `query`.
    #[must_use]
    pub fn filter_users(&self, query: &str) -> Vec<&Record> {
        self.matching(query, |r| {
            vec![r.text("username"), r.text("email"), full_name(r)]
        })
    }

    /// Articles whose title, content or author contains `query`, optionally
    /// restricted to one category by exact name.
    #[must_use]
    pub fn filter_articles(&self, query: &str, category: Option<&str>) -> Vec<&Record> {
        self.matching(query, |r| {
            vec![r.text("title"), r.text("content"), r.text("authorName")]
        })
        .into_iter()
        .filter(|r| category.map_or(true, |name| r.text("categoryName") == name))
        .collect()
    }

    /// Categories whose name or description contains `query`.
    #[must_use]
    pub fn filter_categories(&self, query: &str) -> Vec<&Record> {
        self.matching(query, |r| vec![r.text("name"), r.text("description")])
    }

    /// Tokens whose description contains `query`.
    #[must_use]
    pub fn filter_tokens(&self, query: &str) -> Vec<&Record> {
        self.matching(query, |r| vec![r.text("description")])
    }

    fn matching<F>(&self, query: &str, haystacks: F) -> Vec<&Record>
    where
        F: Fn(&Record) -> Vec<String>,
    {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.records.iter().collect();
        }

        self.records
            .iter()
            .filter(|r| {
                haystacks(r)
                    .iter()
                    .any(|h| h.to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// Number of cached articles filed under `category_name`.
    #[must_use]
    pub fn article_count(&self, category_name: &str) -> usize {
        self.records
            .iter()
            .filter(|r| r.text("categoryName") == category_name)
            .count()
    }

    /// Role counts over a user listing.
    #[must_use]
    pub fn user_stats(&self) -> UserStats {
        let mut stats = UserStats {
            total: self.records.len(),
            ..UserStats::default()
        };

        for record in &self.records {
            match Role::parse(&record.text("role")) {
                Some(Role::Admin) => stats.admins += 1,
                Some(Role::Editor) => stats.editors += 1,
                Some(Role::Visitor) => stats.visitors += 1,
                None => {}
            }
        }

        stats
    }
}

/// "First Last", trimmed; empty when neither is set.
#[must_use]
pub fn full_name(record: &Record) -> String {
    format!("{} {}", record.text("firstName"), record.text("lastName"))
        .trim()
        .to_string()
}

/// Role breakdown of the user listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserStats {
    /// Every cached user.
    pub total: usize,
    /// Users with role `ADMIN`.
    pub admins: usize,
    /// Users with role `EDITOR`.
    pub editors: usize,
    /// Users with role `VISITOR`.
    pub visitors: usize,
}

/// Counters shown on the dashboard. A collection that failed to load
/// counts as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    /// All users.
    pub users: usize,
    /// Users whose `active` flag is set.
    pub active_users: usize,
    /// All articles, whatever their status.
    pub articles: usize,
    /// All categories.
    pub categories: usize,
}
