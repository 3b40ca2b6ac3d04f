//! Grouping of incompliances by source file.

use std::collections::HashMap;

use edf_model::Incompliance;

/// Incompliances of one source file, in append order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileGroup<'a> {
    pub source: &'a str,
    pub incompliances: Vec<&'a Incompliance>,
}

/// All incompliances of one validation run, grouped by file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncomplianceReport<'a> {
    total: usize,
    files: Vec<FileGroup<'a>>,
}

impl<'a> IncomplianceReport<'a> {
    /// Number of incompliances across every file.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Groups in the order their file was first seen.
    pub fn files(&self) -> &[FileGroup<'a>] {
        &self.files
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// Group `all` by source file.
///
/// Files keep first-seen order; each file keeps the order its incompliances
/// were appended in.
pub fn aggregate(all: &[Incompliance]) -> IncomplianceReport<'_> {
    let mut files: Vec<FileGroup<'_>> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for incompliance in all {
        let source = incompliance.source_file();
        let slot = *index.entry(source).or_insert_with(|| {
            files.push(FileGroup {
                source,
                incompliances: Vec::new(),
            });
            files.len() - 1
        });
        files[slot].incompliances.push(incompliance);
    }

    IncomplianceReport {
        total: all.len(),
        files,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edf_model::{GlobalAttribute, Violation};

    fn version_error(source: &str) -> Incompliance {
        Incompliance::global(source, GlobalAttribute::Version, Violation::VersionNotZero)
    }

    #[test]
    fn groups_in_first_seen_order() {
        let all = vec![
            version_error("b.edf"),
            version_error("a.edf"),
            version_error("b.edf"),
        ];
        let report = aggregate(&all);
        assert_eq!(report.total(), 3);
        let sources: Vec<&str> = report.files().iter().map(|group| group.source).collect();
        assert_eq!(sources, vec!["b.edf", "a.edf"]);
        assert_eq!(report.files()[0].incompliances.len(), 2);
        assert!(std::ptr::eq(report.files()[0].incompliances[1], &all[2]));
    }

    #[test]
    fn empty_input_gives_empty_report() {
        let report = aggregate(&[]);
        assert!(report.is_empty());
        assert!(report.files().is_empty());
    }
}
