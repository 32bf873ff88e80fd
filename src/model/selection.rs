use chrono::{Duration, NaiveDateTime};

/// A chosen time range within one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Selection {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

/// Which part of a selection a gesture has grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grip {
    /// The trailing boundary: dragging stretches `end`, `start` is fixed.
    TrailingEdge,
    /// The whole body: dragging moves both ends together.
    Body,
}

/// Result of a hit test: which selection, grabbed where.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub grip: Grip,
    pub index: usize,
}

/// The ordered selections of one day.
///
/// Order is insertion order; the index is only stable for the duration of a
/// single drag gesture. Mutating operations are copy-on-write: they return a
/// new set and leave the receiver untouched, so a caller can hold the
/// current set while probing a proposed one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    items: Vec<Selection>,
}

impl SelectionSet {
    pub fn new(items: Vec<Selection>) -> Self {
        Self { items }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Selection> {
        self.items.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Selection> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all selection durations.
    pub fn total_duration(&self) -> Duration {
        self.items
            .iter()
            .fold(Duration::zero(), |acc, s| acc + s.duration())
    }

    /// First-match scan for the selection at `instant`.
    ///
    /// A point within `tolerance` of a selection's end grabs that trailing
    /// edge, even slightly past it; the edge test runs before the body test.
    /// A point inside `start..=end` grabs the body. `None` means "nothing
    /// here".
    pub fn find_at(&self, instant: NaiveDateTime, tolerance: Duration) -> Option<Hit> {
        for (index, sel) in self.items.iter().enumerate() {
            if (instant - sel.end).abs() <= tolerance {
                return Some(Hit {
                    grip: Grip::TrailingEdge,
                    index,
                });
            }
            if sel.start <= instant && instant <= sel.end {
                return Some(Hit {
                    grip: Grip::Body,
                    index,
                });
            }
        }
        None
    }

    /// Whether `[start, end]` collides with any selection other than
    /// `ignore`.
    ///
    /// Not a symmetric intersection test. Three clauses: an existing start
    /// strictly inside the open candidate interval, an existing end strictly
    /// inside it, or an existing selection containing the candidate
    /// outright. Touching exactly at a boundary is allowed.
    pub fn has_overlap(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        ignore: Option<usize>,
    ) -> bool {
        for (index, sel) in self.items.iter().enumerate() {
            if Some(index) == ignore {
                continue;
            }
            if sel.start > start && sel.start < end {
                return true;
            }
            if sel.end > start && sel.end < end {
                return true;
            }
            if sel.start <= start && sel.end >= end {
                return true;
            }
        }
        false
    }

    /// Append a selection; returns the new set and the new entry's index.
    pub fn with_appended(&self, sel: Selection) -> (SelectionSet, usize) {
        let mut items = self.items.clone();
        items.push(sel);
        let index = items.len() - 1;
        (SelectionSet { items }, index)
    }

    /// Replace both bounds of the selection at `index`, keeping its slot.
    /// The caller is expected to have cleared the proposal with
    /// [`Self::has_overlap`] first.
    pub fn with_moved(
        &self,
        index: usize,
        new_start: NaiveDateTime,
        new_end: NaiveDateTime,
    ) -> SelectionSet {
        let mut items = self.items.clone();
        if let Some(slot) = items.get_mut(index) {
            slot.start = new_start;
            slot.end = new_end;
        }
        SelectionSet { items }
    }

    /// Replace only the end of the selection at `index`; `start` is never
    /// altered by a stretch.
    pub fn with_stretched(&self, index: usize, new_end: NaiveDateTime) -> SelectionSet {
        let mut items = self.items.clone();
        if let Some(slot) = items.get_mut(index) {
            slot.end = new_end;
        }
        SelectionSet { items }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 11)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn tol() -> Duration {
        Duration::minutes(5)
    }

    fn set(ranges: &[(u32, u32, u32, u32)]) -> SelectionSet {
        SelectionSet::new(
            ranges
                .iter()
                .map(|&(h1, m1, h2, m2)| Selection::new(at(h1, m1), at(h2, m2)))
                .collect(),
        )
    }

    #[test]
    fn hit_inside_body() {
        let s = set(&[(9, 0, 10, 0)]);
        assert_eq!(
            s.find_at(at(9, 30), tol()),
            Some(Hit {
                grip: Grip::Body,
                index: 0
            })
        );
    }

    #[test]
    fn hit_near_end_grabs_the_trailing_edge() {
        let s = set(&[(9, 0, 10, 0)]);
        // Just before, exactly on, and just past the end.
        for m in [55, 0, 5] {
            let instant = if m == 55 { at(9, 55) } else { at(10, m) };
            assert_eq!(
                s.find_at(instant, tol()),
                Some(Hit {
                    grip: Grip::TrailingEdge,
                    index: 0
                }),
                "at minute {m}"
            );
        }
        // Outside the tolerance window there is nothing to grab.
        assert_eq!(s.find_at(at(10, 10), tol()), None);
    }

    #[test]
    fn scan_is_first_match_across_touching_neighbours() {
        // Two selections touching at 10:00. A press at 10:04 is inside the
        // second's body but within tolerance of the first's end; the scan
        // reports the first's trailing edge.
        let s = set(&[(9, 0, 10, 0), (10, 0, 11, 0)]);
        assert_eq!(
            s.find_at(at(10, 4), tol()),
            Some(Hit {
                grip: Grip::TrailingEdge,
                index: 0
            })
        );
    }

    #[test]
    fn miss_reports_none() {
        let s = set(&[(9, 0, 10, 0)]);
        assert_eq!(s.find_at(at(14, 0), tol()), None);
    }

    #[test]
    fn overlap_detects_a_start_inside_the_candidate() {
        let s = set(&[(10, 0, 11, 0)]);
        assert!(s.has_overlap(at(9, 30), at(10, 30), None));
    }

    #[test]
    fn overlap_detects_an_end_inside_the_candidate() {
        let s = set(&[(8, 0, 9, 30)]);
        assert!(s.has_overlap(at(9, 0), at(10, 0), None));
    }

    #[test]
    fn overlap_detects_full_containment_of_the_candidate() {
        let s = set(&[(8, 0, 12, 0)]);
        // Neither bound of the existing selection falls inside the
        // candidate; only the containment clause catches this.
        assert!(s.has_overlap(at(9, 0), at(10, 0), None));
        assert!(s.has_overlap(at(9, 0), at(9, 0), None));
    }

    #[test]
    fn touching_at_a_boundary_is_not_an_overlap() {
        let s = set(&[(9, 0, 10, 0)]);
        assert!(!s.has_overlap(at(10, 0), at(11, 0), None));
        assert!(!s.has_overlap(at(8, 0), at(9, 0), None));
    }

    #[test]
    fn ignore_index_is_skipped() {
        let s = set(&[(9, 0, 10, 0)]);
        assert!(!s.has_overlap(at(9, 0), at(10, 30), Some(0)));
        assert!(s.has_overlap(at(9, 0), at(10, 30), None));
    }

    #[test]
    fn append_returns_the_new_index_and_leaves_the_original_alone() {
        let s = set(&[(9, 0, 10, 0), (11, 0, 12, 0)]);
        let before = s.clone();
        let (next, index) = s.with_appended(Selection::new(at(14, 0), at(14, 30)));
        assert_eq!(index, 2);
        assert_eq!(next.len(), 3);
        assert_eq!(s, before);
    }

    #[test]
    fn move_and_stretch_are_copy_on_write() {
        let s = set(&[(9, 0, 10, 0)]);
        let moved = s.with_moved(0, at(11, 0), at(12, 0));
        let stretched = s.with_stretched(0, at(10, 30));
        assert_eq!(s.get(0), Some(&Selection::new(at(9, 0), at(10, 0))));
        assert_eq!(moved.get(0), Some(&Selection::new(at(11, 0), at(12, 0))));
        assert_eq!(stretched.get(0), Some(&Selection::new(at(9, 0), at(10, 30))));
    }

    #[test]
    fn total_duration_sums_all_selections() {
        let s = set(&[(9, 0, 10, 0), (13, 0, 13, 30)]);
        assert_eq!(s.total_duration(), Duration::minutes(90));
    }
}
