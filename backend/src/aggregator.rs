use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;

use crate::counter::FrequencyMap;
use crate::parsers::SegmentCounts;

/// Running totals for one run. Counts only ever grow.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    global: SegmentCounts,
    groups: Option<BTreeMap<String, SegmentCounts>>,
    file_count: usize,
}

impl Aggregator {
    pub fn new(group_by_directory: bool) -> Self {
        Aggregator {
            global: SegmentCounts::default(),
            groups: group_by_directory.then(BTreeMap::new),
            file_count: 0,
        }
    }

    pub fn is_grouping(&self) -> bool {
        self.groups.is_some()
    }

    pub fn update_global(
        &mut self,
        lines: &FrequencyMap,
        regions: &FrequencyMap,
        chars: &FrequencyMap,
    ) {
        self.global.lines.merge(lines);
        self.global.regions.merge(regions);
        self.global.chars.merge(chars);
    }

    /// Add to the totals of `dirpath`, creating them on first use. Does
    /// nothing when grouping is off.
    pub fn update_group(
        &mut self,
        dirpath: &str,
        lines: &FrequencyMap,
        regions: &FrequencyMap,
        chars: &FrequencyMap,
    ) {
        if let Some(groups) = self.groups.as_mut() {
            let group = groups.entry(dirpath.to_string()).or_default();
            group.lines.merge(lines);
            group.regions.merge(regions);
            group.chars.merge(chars);
        }
    }

    /// Record one successfully processed file.
    pub fn add_file(&mut self, path: &Path, counts: &SegmentCounts) {
        if self.is_grouping() {
            let key = group_key(path);
            self.update_group(&key, &counts.lines, &counts.regions, &counts.chars);
        }
        self.update_global(&counts.lines, &counts.regions, &counts.chars);
        self.file_count += 1;
    }

    /// Freeze the totals for reporting.
    pub fn finish(self) -> Aggregation {
        Aggregation {
            global: self.global,
            groups: self.groups,
            file_count: self.file_count,
        }
    }
}

/// Directory part of a path as given on the command line, "" for bare file names.
pub fn group_key(path: &Path) -> String {
    path.parent()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Final, read-only totals of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Aggregation {
    global: SegmentCounts,
    groups: Option<BTreeMap<String, SegmentCounts>>,
    file_count: usize,
}

impl Aggregation {
    pub fn global(&self) -> &SegmentCounts {
        &self.global
    }

    pub fn lines(&self) -> &FrequencyMap {
        &self.global.lines
    }

    pub fn regions(&self) -> &FrequencyMap {
        &self.global.regions
    }

    pub fn chars(&self) -> &FrequencyMap {
        &self.global.chars
    }

    /// Per-directory totals in directory order, `None` when grouping was off.
    pub fn groups(&self) -> Option<&BTreeMap<String, SegmentCounts>> {
        self.groups.as_ref()
    }

    /// Number of files whose counts are included.
    pub fn file_count(&self) -> usize {
        self.file_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn counts(lines: &[&str], regions: &[&str], text: &str) -> SegmentCounts {
        SegmentCounts {
            lines: lines.iter().collect(),
            regions: regions.iter().collect(),
            chars: FrequencyMap::from_chars(text),
        }
    }

    #[test]
    fn test_global_totals() {
        let mut agg = Aggregator::new(false);
        agg.add_file(Path::new("a/1.xml"), &counts(&["default", "heading"], &["main"], "ab"));
        agg.add_file(Path::new("b/2.xml"), &counts(&["default"], &[], "a"));

        let result = agg.finish();
        assert_eq!(result.lines().get("default"), 2);
        assert_eq!(result.lines().get("heading"), 1);
        assert_eq!(result.regions().total(), 1);
        assert_eq!(result.chars().get("a"), 2);
        assert_eq!(result.file_count(), 2);
        assert!(result.groups().is_none());
    }

    #[test]
    fn test_grouped_totals() {
        let mut agg = Aggregator::new(true);
        agg.add_file(Path::new("a/1.xml"), &counts(&["default"], &["main"], "x"));
        agg.add_file(Path::new("a/2.xml"), &counts(&["default"], &[], "y"));
        agg.add_file(Path::new("b/3.xml"), &counts(&["heading"], &["margin"], ""));
        agg.add_file(Path::new("4.xml"), &counts(&["default"], &[], ""));

        let result = agg.finish();
        let groups = result.groups().unwrap();
        let keys: Vec<&str> = groups.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["", "a", "b"]);
        assert_eq!(groups["a"].lines.get("default"), 2);
        assert_eq!(groups["a"].chars.total(), 2);
        assert_eq!(groups["b"].regions.get("margin"), 1);
        assert_eq!(groups[""].lines.total(), 1);
        assert_eq!(result.lines().total(), 4);
    }

    #[test]
    fn test_update_group_ignored_without_grouping() {
        let mut agg = Aggregator::new(false);
        let lines: FrequencyMap = ["default"].into_iter().collect();
        agg.update_group("a", &lines, &FrequencyMap::new(), &FrequencyMap::new());
        assert!(agg.finish().groups().is_none());
    }

    #[test]
    fn test_file_order_does_not_matter() {
        let files = [
            (PathBuf::from("a/1.xml"), counts(&["default", "heading"], &["main"], "abc")),
            (PathBuf::from("b/2.xml"), counts(&["heading"], &["main", "margin"], "cd")),
            (PathBuf::from("a/3.xml"), counts(&[], &[], "")),
        ];

        let mut forward = Aggregator::new(true);
        for (path, c) in files.iter() {
            forward.add_file(path, c);
        }

        let mut backward = Aggregator::new(true);
        for (path, c) in files.iter().rev() {
            backward.add_file(path, c);
        }

        assert_eq!(forward.finish(), backward.finish());
    }

    #[test]
    fn test_empty_file_contributes_nothing() {
        let mut agg = Aggregator::new(true);
        agg.add_file(Path::new("a/1.xml"), &counts(&["default"], &[], "a"));
        let before = agg.clone().finish();

        agg.add_file(Path::new("a/2.xml"), &SegmentCounts::default());
        let after = agg.finish();

        assert_eq!(before.global(), after.global());
        assert_eq!(before.groups(), after.groups());
        assert_eq!(after.file_count(), 2);
    }

    #[test]
    fn test_group_key() {
        assert_eq!(group_key(Path::new("corpus/vol1/p1.xml")), "corpus/vol1");
        assert_eq!(group_key(Path::new("p1.xml")), "");
    }
}
