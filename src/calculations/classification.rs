use crate::allocation::AllocationRecord;

/// Rounds accumulated values and flags over/under-allocation. Effort rounds
/// to whole seconds and units to whole percent, so float accumulation noise
/// (e.g. 100.00000001) cannot flip a flag. Records without contributions are
/// left unflagged. Safe to re-run on already-classified records.
pub(crate) fn classify(records: &mut [AllocationRecord]) {
    for record in records.iter_mut() {
        record.effort_secs = record.effort_secs.round();
        record.units = record.units.round();

        if record.assignments.is_empty() {
            record.is_overallocated = false;
            record.is_underallocated = false;
            continue;
        }
        record.is_overallocated =
            record.effort_secs > record.max_effort_secs || record.units > 100.0;
        record.is_underallocated =
            record.effort_secs < record.max_effort_secs || record.units < 100.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocation::AssignmentAllocationRecord;
    use crate::tick::Tick;
    use chrono::NaiveDate;

    fn record(effort: f64, max_effort: f64, units: f64) -> AllocationRecord {
        let day = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        let tick = Tick {
            index: 0,
            start: day.and_hms_opt(0, 0, 0).unwrap(),
            end: day.and_hms_opt(0, 0, 0).unwrap() + chrono::Duration::days(1),
        };
        let mut record = AllocationRecord::empty(&tick);
        record.effort_secs = effort;
        record.max_effort_secs = max_effort;
        record.units = units;
        record.assignments.push(AssignmentAllocationRecord {
            assignment: 1,
            effort_secs: effort,
            units,
        });
        record
    }

    #[test]
    fn float_noise_does_not_flip_flags() {
        let mut records = [record(28_800.000000008, 28_800.0, 100.00000001)];
        classify(&mut records);
        assert!(!records[0].is_overallocated);
        assert!(!records[0].is_underallocated);
    }

    #[test]
    fn classification_is_idempotent() {
        let mut records = [record(14_400.2, 28_800.0, 49.6)];
        classify(&mut records);
        let once = records[0].clone();
        classify(&mut records);
        assert_eq!(records[0], once);
    }

    #[test]
    fn records_without_assignments_are_never_flagged() {
        let mut records = [record(0.0, 28_800.0, 0.0)];
        records[0].assignments.clear();
        classify(&mut records);
        assert!(!records[0].is_overallocated);
        assert!(!records[0].is_underallocated);
    }
}
