use serde::Serialize;
use utoipa::ToSchema;

/// The user every `my_problems` request is made on behalf of
pub const CURRENT_USER_ID: u32 = 101;

/// How many records `/problems/recent` returns
pub const RECENT_COUNT: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Problem {
    pub id: u32,
    pub title: String,
    /// `open` or `closed`
    pub status: String,
    pub user_id: u32,
    pub category: String,
}

impl Problem {
    fn new(id: u32, title: &str, status: &str, user_id: u32, category: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            status: status.to_string(),
            user_id,
            category: category.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ProblemStats {
    pub open_problems: usize,
    pub closed_problems: usize,
    pub total: usize,
}

/// Read-only, in-memory problem records
#[derive(Debug, Clone)]
pub struct ProblemStore {
    problems: Vec<Problem>,
}

impl Default for ProblemStore {
    fn default() -> Self {
        Self::new(vec![
            Problem::new(1, "Server down", "open", 101, "infra"),
            Problem::new(2, "Login error", "closed", 102, "auth"),
            Problem::new(3, "Slow database", "open", 101, "database"),
        ])
    }
}

impl ProblemStore {
    pub fn new(problems: Vec<Problem>) -> Self {
        Self { problems }
    }

    pub fn all(&self) -> &[Problem] {
        &self.problems
    }

    pub fn get(&self, id: u32) -> Option<&Problem> {
        self.problems.iter().find(|p| p.id == id)
    }

    pub fn by_user(&self, user_id: u32) -> Vec<Problem> {
        self.filter(|p| p.user_id == user_id)
    }

    /// Matches the lowercased status
    pub fn by_status(&self, status: &str) -> Vec<Problem> {
        let status = status.to_lowercase();
        self.filter(|p| p.status == status)
    }

    /// Matches the lowercased category
    pub fn by_category(&self, category: &str) -> Vec<Problem> {
        let category = category.to_lowercase();
        self.filter(|p| p.category == category)
    }

    pub fn recent(&self) -> &[Problem] {
        let start = self.problems.len().saturating_sub(RECENT_COUNT);
        &self.problems[start..]
    }

    pub fn stats(&self) -> ProblemStats {
        ProblemStats {
            open_problems: self.problems.iter().filter(|p| p.status == "open").count(),
            closed_problems: self.problems.iter().filter(|p| p.status == "closed").count(),
            total: self.problems.len(),
        }
    }

    fn filter(&self, pred: impl Fn(&Problem) -> bool) -> Vec<Problem> {
        self.problems.iter().filter(|p| pred(p)).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_stats() {
        let store = ProblemStore::default();
        assert_eq!(
            store.stats(),
            ProblemStats { open_problems: 2, closed_problems: 1, total: 3 }
        );
    }

    #[test]
    fn test_filters_lowercase_input() {
        let store = ProblemStore::default();
        let ids: Vec<u32> = store.by_status("OPEN").iter().map(|p| p.id).collect();
        assert_eq!(ids, [1, 3]);
        assert_eq!(store.by_category("Auth")[0].title, "Login error");
        assert!(store.by_category("network").is_empty());
    }

    #[test]
    fn test_recent_and_user() {
        let store = ProblemStore::default();
        let ids: Vec<u32> = store.recent().iter().map(|p| p.id).collect();
        assert_eq!(ids, [2, 3]);
        assert_eq!(store.by_user(CURRENT_USER_ID).len(), 2);

        let single = ProblemStore::new(vec![Problem::new(9, "x", "open", 1, "infra")]);
        assert_eq!(single.recent().len(), 1);
    }
}
