use chrono::NaiveDate;

use super::scale::DayScale;
use super::selection::{Grip, Selection, SelectionSet};

/// Transient gesture state. Lives only between a press and the matching
/// release; `index` refers into the selection set and is stable for exactly
/// that long.
#[derive(Debug, Clone, Copy, PartialEq)]
enum DragState {
    Idle,
    Dragging {
        grip: Grip,
        index: usize,
        last_position: f32,
    },
}

/// The interaction engine for one day: owns the day's selections and the
/// active drag, and is the only thing that mutates either.
///
/// The view layer feeds it raw press/move/release events with pixel offsets
/// measured from the top of the day column, and redraws from
/// [`Self::selections`] afterwards. All rejected updates (overlaps, stray
/// moves) are silent: the state simply does not change for that event.
pub struct DayPlanner {
    day: NaiveDate,
    scale: DayScale,
    selections: SelectionSet,
    drag: DragState,
    revision: u64,
}

impl DayPlanner {
    pub fn new(day: NaiveDate, scale: DayScale) -> Self {
        Self::with_selections(day, scale, SelectionSet::default())
    }

    /// Start from a pre-built set of (disjoint) selections.
    pub fn with_selections(day: NaiveDate, scale: DayScale, selections: SelectionSet) -> Self {
        Self {
            day,
            scale,
            selections,
            drag: DragState::Idle,
            revision: 0,
        }
    }

    pub fn day(&self) -> NaiveDate {
        self.day
    }

    pub fn scale(&self) -> DayScale {
        self.scale
    }

    pub fn selections(&self) -> &SelectionSet {
        &self.selections
    }

    /// Bumped on every committed change; lets the view detect updates
    /// without diffing the set.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    /// Index of the selection under the active gesture, if any.
    pub fn active_index(&self) -> Option<usize> {
        match self.drag {
            DragState::Dragging { index, .. } => Some(index),
            DragState::Idle => None,
        }
    }

    /// What the active gesture has grabbed, if anything.
    pub fn active_grip(&self) -> Option<Grip> {
        match self.drag {
            DragState::Dragging { grip, .. } => Some(grip),
            DragState::Idle => None,
        }
    }

    /// Pointer press at `position` px from the top of the day column.
    ///
    /// Grabs the selection under the pointer if there is one; otherwise
    /// creates a default half-hour selection on the spot and grabs its
    /// trailing edge, so even a click without movement leaves a visible
    /// selection. A second press while a gesture is active is ignored.
    pub fn pointer_down(&mut self, position: f32) {
        if self.is_dragging() {
            return;
        }
        let instant = self.scale.time_at(self.day, position);
        if let Some(hit) = self.selections.find_at(instant, self.scale.edge_tolerance()) {
            self.drag = DragState::Dragging {
                grip: hit.grip,
                index: hit.index,
                last_position: position,
            };
            return;
        }

        let end = self.scale.time_at(self.day, position + self.scale.half_slot_px());
        let (selections, index) = self.selections.with_appended(Selection::new(instant, end));
        log::debug!("new selection {} – {}", instant.time(), end.time());
        self.selections = selections;
        self.revision += 1;
        self.drag = DragState::Dragging {
            grip: Grip::TrailingEdge,
            index,
            last_position: position,
        };
    }

    /// Pointer moved to `position` while the button is down.
    ///
    /// Body grips shift the whole selection by the time delta since the last
    /// committed position; trailing-edge grips stretch `end`, floored at
    /// half an hour past `start`. A proposal that would overlap another
    /// selection is dropped for this event only: the set and the reference
    /// position stay as they were, so the next event re-proposes from the
    /// same base instead of compounding a half-applied delta.
    pub fn pointer_move(&mut self, position: f32) {
        let DragState::Dragging {
            grip,
            index,
            last_position,
        } = self.drag
        else {
            return;
        };
        let Some(current) = self.selections.get(index).copied() else {
            return;
        };

        match grip {
            Grip::Body => {
                let delta = self.scale.time_at(self.day, position)
                    - self.scale.time_at(self.day, last_position);
                let new_start = current.start + delta;
                let new_end = current.end + delta;
                if self.selections.has_overlap(new_start, new_end, Some(index)) {
                    return;
                }
                self.selections = self.selections.with_moved(index, new_start, new_end);
            }
            Grip::TrailingEdge => {
                let floor = self.scale.position_of(current.start) + self.scale.half_slot_px();
                let new_end = self.scale.time_at(self.day, floor.max(position));
                if self.selections.has_overlap(current.start, new_end, Some(index)) {
                    return;
                }
                self.selections = self.selections.with_stretched(index, new_end);
            }
        }

        self.revision += 1;
        self.drag = DragState::Dragging {
            grip,
            index,
            last_position: position,
        };
    }

    /// Pointer released, or left the interaction surface. The set stays as
    /// last committed; only the gesture state is cleared.
    pub fn pointer_up(&mut self) {
        self.drag = DragState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDateTime};

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 11).unwrap()
    }

    fn at(h: u32, m: u32) -> NaiveDateTime {
        day().and_hms_opt(h, m, 0).unwrap()
    }

    fn planner() -> DayPlanner {
        DayPlanner::new(day(), DayScale::default())
    }

    fn seeded(ranges: &[(u32, u32, u32, u32)]) -> DayPlanner {
        let set = SelectionSet::new(
            ranges
                .iter()
                .map(|&(h1, m1, h2, m2)| Selection::new(at(h1, m1), at(h2, m2)))
                .collect(),
        );
        DayPlanner::with_selections(day(), DayScale::default(), set)
    }

    // Default scale: 60 px/h, so y = minutes-since-midnight.
    fn y(h: u32, m: u32) -> f32 {
        (h * 60 + m) as f32
    }

    fn ranges(p: &DayPlanner) -> Vec<(NaiveDateTime, NaiveDateTime)> {
        p.selections().iter().map(|s| (s.start, s.end)).collect()
    }

    #[test]
    fn click_on_empty_space_creates_a_half_hour_selection() {
        let mut p = planner();
        p.pointer_down(y(9, 0));
        p.pointer_up();
        assert_eq!(ranges(&p), vec![(at(9, 0), at(9, 30))]);
        assert!(!p.is_dragging());
    }

    #[test]
    fn creation_snaps_down_to_the_grid() {
        let mut p = planner();
        p.pointer_down(y(9, 3)); // inside the 09:00 band
        p.pointer_up();
        assert_eq!(ranges(&p), vec![(at(9, 0), at(9, 30))]);
    }

    #[test]
    fn press_on_a_body_grabs_without_mutating() {
        let mut p = seeded(&[(9, 0, 10, 0)]);
        let before = p.revision();
        p.pointer_down(y(9, 30));
        assert!(p.is_dragging());
        assert_eq!(p.active_index(), Some(0));
        assert_eq!(p.revision(), before);
        assert_eq!(ranges(&p), vec![(at(9, 0), at(10, 0))]);
    }

    #[test]
    fn press_within_tolerance_past_the_end_grabs_the_edge() {
        let mut p = seeded(&[(9, 0, 10, 0)]);
        p.pointer_down(y(10, 5));
        // Stretching, not creating: dragging down extends the selection.
        p.pointer_move(y(10, 45));
        p.pointer_up();
        assert_eq!(ranges(&p), vec![(at(9, 0), at(10, 45))]);
    }

    #[test]
    fn moving_the_body_preserves_duration_exactly() {
        let mut p = seeded(&[(9, 0, 10, 15)]);
        p.pointer_down(y(9, 30));
        p.pointer_move(y(11, 30)); // +2 h
        p.pointer_up();
        assert_eq!(ranges(&p), vec![(at(11, 0), at(12, 15))]);
    }

    #[test]
    fn move_applies_per_event_deltas() {
        let mut p = seeded(&[(9, 0, 10, 0)]);
        p.pointer_down(y(9, 30));
        p.pointer_move(y(9, 45));
        p.pointer_move(y(10, 0));
        p.pointer_up();
        assert_eq!(ranges(&p), vec![(at(9, 30), at(10, 30))]);
    }

    #[test]
    fn rejected_move_does_not_stick_a_partial_delta() {
        let mut p = seeded(&[(9, 0, 10, 0), (10, 30, 11, 30)]);
        p.pointer_down(y(9, 30));
        // Would land on 10:00-11:00, crossing into the second selection.
        p.pointer_move(y(10, 30));
        assert_eq!(ranges(&p)[0], (at(9, 0), at(10, 0)));
        // The stored position did not advance: a move back to a legal spot
        // is measured from the original grab point, not the rejected one.
        p.pointer_move(y(9, 0));
        p.pointer_up();
        assert_eq!(ranges(&p)[0], (at(8, 30), at(9, 30)));
    }

    #[test]
    fn stretch_cannot_go_below_half_an_hour() {
        let mut p = seeded(&[(9, 0, 10, 0)]);
        p.pointer_down(y(10, 0));
        p.pointer_move(y(9, 5)); // well above start + 30 min
        p.pointer_up();
        assert_eq!(ranges(&p), vec![(at(9, 0), at(9, 30))]);
    }

    #[test]
    fn stretch_into_a_neighbour_is_rejected_deterministically() {
        // A = 10:00-11:00, B = 08:00-09:30; stretching B's end to 10:30
        // crosses into A and must leave B at 09:30.
        let mut p = seeded(&[(10, 0, 11, 0), (8, 0, 9, 30)]);
        p.pointer_down(y(9, 30));
        assert_eq!(p.active_index(), Some(1));
        p.pointer_move(y(10, 30));
        p.pointer_up();
        assert_eq!(ranges(&p), vec![(at(10, 0), at(11, 0)), (at(8, 0), at(9, 30))]);
    }

    #[test]
    fn stretch_up_to_a_touching_boundary_is_allowed() {
        let mut p = seeded(&[(10, 0, 11, 0), (8, 0, 9, 0)]);
        p.pointer_down(y(9, 0));
        p.pointer_move(y(10, 0));
        p.pointer_up();
        assert_eq!(ranges(&p)[1], (at(8, 0), at(10, 0)));
    }

    #[test]
    fn no_overlap_after_a_busy_gesture_sequence() {
        let mut p = planner();
        // Create three selections, then shove the middle one around.
        for (h, m) in [(8, 0), (10, 0), (12, 0)] {
            p.pointer_down(y(h, m));
            p.pointer_up();
        }
        p.pointer_down(y(10, 15));
        for target in [(9, 0), (8, 10), (11, 50), (12, 10)] {
            p.pointer_move(y(target.0, target.1));
        }
        p.pointer_up();

        let sels: Vec<Selection> = p.selections().iter().copied().collect();
        for (i, a) in sels.iter().enumerate() {
            for b in sels.iter().skip(i + 1) {
                assert!(
                    a.end <= b.start || b.end <= a.start,
                    "{:?} overlaps {:?}",
                    a,
                    b
                );
            }
        }
    }

    #[test]
    fn stray_move_without_a_press_is_ignored() {
        let mut p = seeded(&[(9, 0, 10, 0)]);
        p.pointer_move(y(14, 0));
        assert_eq!(ranges(&p), vec![(at(9, 0), at(10, 0))]);
        assert!(!p.is_dragging());
    }

    #[test]
    fn second_press_during_a_gesture_is_ignored() {
        let mut p = planner();
        p.pointer_down(y(9, 0));
        p.pointer_down(y(14, 0));
        p.pointer_up();
        assert_eq!(ranges(&p), vec![(at(9, 0), at(9, 30))]);
    }

    #[test]
    fn release_keeps_the_last_committed_state() {
        let mut p = seeded(&[(9, 0, 10, 0)]);
        p.pointer_down(y(10, 0));
        p.pointer_move(y(11, 0));
        p.pointer_up();
        p.pointer_move(y(13, 0)); // after release: no effect
        assert_eq!(ranges(&p), vec![(at(9, 0), at(11, 0))]);
    }

    // The half-hour minimum is enforced at creation and on stretch, never on
    // move: a shorter selection (not constructible by gestures) moves with
    // its duration intact.
    #[test]
    fn moving_a_short_selection_keeps_its_duration() {
        let mut p = seeded(&[(9, 0, 9, 10)]);
        p.pointer_down(y(9, 0)); // body grab; the end's tolerance starts at 09:05
        p.pointer_move(y(12, 0));
        p.pointer_up();
        assert_eq!(ranges(&p), vec![(at(12, 0), at(12, 10))]);
        assert_eq!(p.selections().get(0).unwrap().duration(), Duration::minutes(10));
    }

    // Creation is unconditional: a press just above an existing selection's
    // start still drops a default slot, overlap and all. Move and stretch
    // are the guarded paths.
    #[test]
    fn press_just_before_a_neighbour_creates_the_default_slot_anyway() {
        let mut p = seeded(&[(10, 0, 11, 0)]);
        p.pointer_down(y(9, 50));
        p.pointer_up();
        assert_eq!(
            ranges(&p),
            vec![(at(10, 0), at(11, 0)), (at(9, 50), at(10, 20))]
        );
    }

    #[test]
    fn revision_advances_only_on_commits() {
        let mut p = seeded(&[(9, 0, 10, 0), (10, 30, 11, 30)]);
        let r0 = p.revision();
        p.pointer_down(y(9, 30)); // grab, no mutation
        assert_eq!(p.revision(), r0);
        p.pointer_move(y(10, 30)); // rejected
        assert_eq!(p.revision(), r0);
        p.pointer_move(y(9, 15)); // committed
        assert!(p.revision() > r0);
    }

    #[test]
    fn gestures_work_at_other_scales() {
        let scale = DayScale {
            pixels_per_hour: 40.0,
            ..DayScale::default()
        };
        let mut p = DayPlanner::new(day(), scale);
        p.pointer_down(scale.position_of(at(9, 0)));
        p.pointer_up();
        assert_eq!(ranges(&p), vec![(at(9, 0), at(9, 30))]);

        p.pointer_down(scale.position_of(at(9, 30)));
        p.pointer_move(scale.position_of(at(10, 30)));
        p.pointer_up();
        assert_eq!(ranges(&p), vec![(at(9, 0), at(10, 30))]);
    }
}
