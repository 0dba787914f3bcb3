use crate::scheduler::candidate::PassCandidate;
use crate::scheduler::overlap::overlaps;

/// Pick the pass to track next.
///
/// Starts from the earliest rise (first one wins a tie), then lets any
/// higher-elevation candidate that overlaps the current pick take over.
/// Candidates are scanned once in the given order, so the outcome depends
/// on that order when several candidates overlap each other.
pub fn select(candidates: &[PassCandidate]) -> Option<PassCandidate> {
    let mut selected = candidates
        .iter()
        .enumerate()
        .min_by_key(|(_, c)| c.rise)
        .map(|(i, _)| i)?;

    for (i, candidate) in candidates.iter().enumerate() {
        if i == selected {
            continue;
        }
        let current = &candidates[selected];
        if candidate.max_elevation_deg > current.max_elevation_deg
            && overlaps(&candidate.window(), &current.window())
        {
            log::debug!(
                "{} ({:.1}°) overlaps {} ({:.1}°), taking the higher pass",
                candidate.object,
                candidate.max_elevation_deg,
                current.object,
                current.max_elevation_deg
            );
            selected = i;
        }
    }

    Some(candidates[selected].clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::testing::window;

    fn candidate(name: &str, rise: i64, set: i64, elevation: f64) -> PassCandidate {
        PassCandidate::new(name, window(rise, set, elevation))
    }

    #[test]
    fn empty_list_selects_nothing() {
        assert_eq!(select(&[]), None);
    }

    #[test]
    fn single_candidate_is_selected() {
        let only = candidate("A", 10, 20, 5.0);
        assert_eq!(select(&[only.clone()]), Some(only));
    }

    #[test]
    fn earliest_rise_wins_without_overlap() {
        let candidates = [
            candidate("LATE", 30, 40, 80.0),
            candidate("EARLY", 10, 20, 10.0),
        ];
        assert_eq!(select(&candidates).unwrap().object, "EARLY");
    }

    #[test]
    fn tie_goes_to_first_in_order() {
        let candidates = [
            candidate("FIRST", 10, 20, 30.0),
            candidate("SECOND", 10, 20, 30.0),
        ];
        assert_eq!(select(&candidates).unwrap().object, "FIRST");
    }

    #[test]
    fn higher_overlapping_pass_replaces_earliest() {
        let candidates = [candidate("A", 10, 20, 5.0), candidate("B", 15, 25, 9.0)];
        assert_eq!(select(&candidates).unwrap().object, "B");
    }

    #[test]
    fn lower_overlapping_pass_does_not_replace() {
        let candidates = [candidate("A", 10, 20, 50.0), candidate("B", 15, 25, 9.0)];
        assert_eq!(select(&candidates).unwrap().object, "A");
    }

    #[test]
    fn equal_elevation_does_not_replace() {
        let candidates = [candidate("A", 10, 20, 30.0), candidate("B", 15, 25, 30.0)];
        assert_eq!(select(&candidates).unwrap().object, "A");
    }

    #[test]
    fn higher_pass_nested_inside_is_ignored() {
        let candidates = [candidate("A", 10, 30, 20.0), candidate("B", 15, 25, 70.0)];
        assert_eq!(select(&candidates).unwrap().object, "A");
    }

    #[test]
    fn earlier_sat_with_higher_pass_wins() {
        // Sat2 rises first and is higher; Sat1 cannot take over
        let candidates = [
            candidate("Sat1", 10, 22, 30.0),
            candidate("Sat2", 5, 12, 60.0),
        ];
        assert_eq!(select(&candidates).unwrap().object, "Sat2");
    }

    #[test]
    fn selection_chains_through_overlaps() {
        // B overlaps A and is higher; C overlaps B (not A) and is higher still
        let candidates = [
            candidate("A", 10, 20, 10.0),
            candidate("B", 18, 30, 20.0),
            candidate("C", 28, 40, 30.0),
        ];
        assert_eq!(select(&candidates).unwrap().object, "C");
    }

    #[test]
    fn scan_order_matters() {
        // C is visited before B takes over, so C never gets compared with B
        let candidates = [
            candidate("A", 10, 20, 10.0),
            candidate("C", 28, 40, 30.0),
            candidate("B", 18, 30, 20.0),
        ];
        assert_eq!(select(&candidates).unwrap().object, "B");
    }

    #[test]
    fn result_never_rises_after_a_non_overlapping_earlier_pass() {
        let candidates = [
            candidate("A", 0, 5, 10.0),
            candidate("B", 20, 30, 80.0),
            candidate("C", 3, 9, 40.0),
        ];
        let chosen = select(&candidates).unwrap();
        // C overlaps A and is higher; B does not overlap C
        assert_eq!(chosen.object, "C");
        assert!(candidates
            .iter()
            .filter(|c| c.rise < chosen.rise)
            .all(|c| c.max_elevation_deg < chosen.max_elevation_deg));
    }
}
