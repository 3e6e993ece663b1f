//! Test-only fixtures shared by unit, behaviour and downstream crate tests.

use crate::{IntervalRecord, Segment};

/// Four locations joined in a line: `A-B 10`, `B-C 5`, `C-D 2.5`.
#[must_use]
pub fn corridor_segments() -> Vec<Segment<String>> {
    [("A", "B", 10.0), ("B", "C", 5.0), ("C", "D", 2.5)]
        .into_iter()
        .map(|(from, to, distance)| Segment {
            from: from.to_owned(),
            to: to.to_owned(),
            distance,
        })
        .collect()
}

/// Numeric segments shaped like the toll-plaza datasets.
#[must_use]
pub fn plaza_segments() -> Vec<Segment<u64>> {
    [
        (1_001_400, 1_001_402, 9.7),
        (1_001_402, 1_001_404, 20.2),
        (1_001_404, 1_001_406, 16.0),
        (1_001_406, 1_001_408, 21.7),
    ]
    .into_iter()
    .map(|(from, to, distance)| Segment { from, to, distance })
    .collect()
}

/// One group whose single interval spans the whole week.
#[must_use]
pub fn full_week_interval(id: u64, id_2: u64) -> IntervalRecord<u64> {
    IntervalRecord::new(id, id_2, ("Monday", "00:00:00"), ("Sunday", "23:59:59"))
}
