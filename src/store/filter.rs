use crate::models::{Airdrop, Article, Signal};

/// Conjunction of optional constraints applied to list queries. The same
/// filter is applied to the primary source and, when the primary falls
/// short, to the static fallback set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentFilter {
    category: Option<String>,
    status: Option<String>,
    difficulty: Option<String>,
    search: Option<String>,
}

/// The frontend sends "all" to mean "no constraint".
fn normalize(value: impl Into<String>) -> Option<String> {
    let value = value.into();
    if value.is_empty() || value.eq_ignore_ascii_case("all") {
        None
    } else {
        Some(value)
    }
}

impl ContentFilter {
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = normalize(category);
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = normalize(status);
        self
    }

    pub fn with_difficulty(mut self, difficulty: impl Into<String>) -> Self {
        self.difficulty = normalize(difficulty);
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        let search = search.into();
        self.search = (!search.is_empty()).then_some(search);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.status.is_none()
            && self.difficulty.is_none()
            && self.search.is_none()
    }

    pub fn matches_article(&self, article: &Article) -> bool {
        matches_eq(&self.category, &article.category)
            && matches_search(&self.search, &[&article.title, &article.excerpt])
    }

    pub fn matches_airdrop(&self, airdrop: &Airdrop) -> bool {
        matches_eq(&self.status, &airdrop.status)
            && matches_eq(&self.difficulty, &airdrop.difficulty)
            && matches_search(&self.search, &[&airdrop.project_name, &airdrop.description])
    }

    pub fn matches_signal(&self, signal: &Signal) -> bool {
        matches_eq(&self.category, &signal.kind)
            && matches_search(&self.search, &[&signal.title, &signal.description])
    }
}

fn matches_eq(constraint: &Option<String>, value: &str) -> bool {
    match constraint {
        Some(wanted) => wanted.eq_ignore_ascii_case(value),
        None => true,
    }
}

fn matches_search(constraint: &Option<String>, haystacks: &[&str]) -> bool {
    match constraint {
        Some(needle) => {
            let needle = needle.to_lowercase();
            haystacks
                .iter()
                .any(|hay| hay.to_lowercase().contains(&needle))
        }
        None => true,
    }
}
