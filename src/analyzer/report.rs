use crate::github::{Contribution, Release};

/// Everything significant known about one repository after analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryReport {
    /// Short name of the repository.
    pub name: String,

    /// Number of open issues.
    pub issues: u32,

    /// Number of stars.
    pub stars: u32,

    /// Contributors and their contribution counts. Order carries no meaning.
    pub contributions: Vec<Contribution>,

    /// The last published release, if any.
    pub last_release: Option<Release>,
}

impl RepositoryReport {
    #[must_use]
    pub const fn new(name: String, issues: u32, stars: u32, contributions: Vec<Contribution>, last_release: Option<Release>) -> Self {
        Self {
            name,
            issues,
            stars,
            contributions,
            last_release,
        }
    }

    /// Merge another report for the same repository into this one.
    ///
    /// Contributions are unioned without duplicates; the existing release is
    /// kept, or the other's is adopted when this report has none. Useful for
    /// coalescing partial reports of a single repository; the analyzer's
    /// primary path emits one complete report per repository and never needs
    /// this.
    pub fn merge(&mut self, other: Self) {
        debug_assert_eq!(self.name, other.name, "reports for different repositories are not mergeable");

        for contribution in other.contributions {
            if !self.contributions.contains(&contribution) {
                self.contributions.push(contribution);
            }
        }

        if self.last_release.is_none() {
            self.last_release = other.last_release;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(contributions: Vec<Contribution>, last_release: Option<Release>) -> RepositoryReport {
        RepositoryReport::new("r".to_owned(), 10, 100, contributions, last_release)
    }

    fn contribution(user: &str, contributions: u64) -> Contribution {
        Contribution {
            user: user.to_owned(),
            contributions,
        }
    }

    #[test]
    fn merge_unions_contributions() {
        let mut merged = report(vec![contribution("a", 1)], None);
        merged.merge(report(vec![contribution("b", 2)], None));

        assert_eq!(merged.contributions, vec![contribution("a", 1), contribution("b", 2)]);
    }

    #[test]
    fn merge_deduplicates_identical_contributions() {
        let mut merged = report(vec![contribution("a", 1)], None);
        merged.merge(report(vec![contribution("a", 1), contribution("b", 2)], None));

        assert_eq!(merged.contributions, vec![contribution("a", 1), contribution("b", 2)]);
    }

    #[test]
    fn merge_adopts_release_when_absent() {
        let release = Release {
            tag_name: "v0.1".to_owned(),
            date: "2024-02-21".to_owned(),
        };

        let mut merged = report(Vec::new(), None);
        merged.merge(report(Vec::new(), Some(release.clone())));
        assert_eq!(merged.last_release, Some(release.clone()));

        // an already-present release is kept
        let newer = Release {
            tag_name: "v0.2".to_owned(),
            date: "2024-03-05".to_owned(),
        };
        let mut merged = report(Vec::new(), Some(release.clone()));
        merged.merge(report(Vec::new(), Some(newer)));
        assert_eq!(merged.last_release, Some(release));
    }
}
