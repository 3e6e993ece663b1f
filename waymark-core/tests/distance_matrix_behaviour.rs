//! Behavioural coverage for matrix construction and edge-list conversion.

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use waymark_core::{
    DistanceMatrix, DistanceMatrixError, SchemaError, Segment, build_distance_matrix, roll,
    unroll,
};

type BuildResult = Result<DistanceMatrix<String>, DistanceMatrixError>;

#[fixture]
fn segments() -> RefCell<Vec<Segment<String>>> {
    RefCell::new(Vec::new())
}

#[fixture]
fn built() -> RefCell<Option<BuildResult>> {
    RefCell::new(None)
}

#[fixture]
fn rolled() -> RefCell<Option<Result<DistanceMatrix<String>, SchemaError>>> {
    RefCell::new(None)
}

fn segment(from: &str, to: &str, distance: f64) -> Segment<String> {
    Segment::new(from.to_owned(), to.to_owned(), distance)
        .unwrap_or_else(|err| panic!("valid segment {from}-{to}: {err}"))
}

fn built_matrix(built: &RefCell<Option<BuildResult>>) -> DistanceMatrix<String> {
    match built.borrow().as_ref() {
        Some(Ok(matrix)) => matrix.clone(),
        Some(Err(err)) => panic!("matrix build failed: {err}"),
        None => panic!("matrix must be built first"),
    }
}

#[given("segments A-B 10, B-C 5 and C-D 2.5")]
fn corridor(#[from(segments)] segments: &RefCell<Vec<Segment<String>>>) {
    *segments.borrow_mut() = vec![
        segment("A", "B", 10.0),
        segment("B", "C", 5.0),
        segment("C", "D", 2.5),
    ];
}

#[given("segments A-B 4 and B-A 5")]
fn conflicting(#[from(segments)] segments: &RefCell<Vec<Segment<String>>>) {
    *segments.borrow_mut() = vec![segment("A", "B", 4.0), segment("B", "A", 5.0)];
}

#[when("I build the distance matrix")]
fn build(
    #[from(segments)] segments: &RefCell<Vec<Segment<String>>>,
    #[from(built)] built: &RefCell<Option<BuildResult>>,
) {
    *built.borrow_mut() = Some(build_distance_matrix(&segments.borrow()));
}

#[when("I unroll and roll the matrix")]
fn round_trip(
    #[from(built)] built: &RefCell<Option<BuildResult>>,
    #[from(rolled)] rolled: &RefCell<Option<Result<DistanceMatrix<String>, SchemaError>>>,
) {
    let matrix = built_matrix(built);
    *rolled.borrow_mut() = Some(roll(&unroll(&matrix)));
}

#[then("the distance from A to D is 17.5")]
fn a_to_d(#[from(built)] built: &RefCell<Option<BuildResult>>) {
    let matrix = built_matrix(built);
    assert_eq!(matrix.get(&"A".to_owned(), &"D".to_owned()), Some(17.5));
}

#[then("the matrix is symmetric with a zero diagonal")]
fn symmetric(#[from(built)] built: &RefCell<Option<BuildResult>>) {
    let matrix = built_matrix(built);
    for row in matrix.locations() {
        assert_eq!(matrix.get(row, row), Some(0.0), "diagonal at {row}");
        for col in matrix.locations() {
            assert_eq!(matrix.get(row, col), matrix.get(col, row), "{row}/{col}");
        }
    }
}

#[then("the build fails with a data conflict between B and A")]
fn conflict(#[from(built)] built: &RefCell<Option<BuildResult>>) {
    match built.borrow().as_ref() {
        Some(Err(DistanceMatrixError::DataConflict { from, to, .. })) => {
            assert_eq!((from.as_str(), to.as_str()), ("B", "A"));
        }
        other => panic!("expected a data conflict, got {other:?}"),
    }
}

#[then("the rolled matrix equals the built matrix")]
fn rolled_equals_built(
    #[from(built)] built: &RefCell<Option<BuildResult>>,
    #[from(rolled)] rolled: &RefCell<Option<Result<DistanceMatrix<String>, SchemaError>>>,
) {
    let matrix = built_matrix(built);
    match rolled.borrow().as_ref() {
        Some(Ok(again)) => assert_eq!(again, &matrix),
        other => panic!("expected a rolled matrix, got {other:?}"),
    }
}

#[scenario(path = "tests/features/distance_matrix.feature", index = 0)]
fn corridor_accumulates(
    segments: RefCell<Vec<Segment<String>>>,
    built: RefCell<Option<BuildResult>>,
    rolled: RefCell<Option<Result<DistanceMatrix<String>, SchemaError>>>,
) {
    let _ = (segments, built, rolled);
}

#[scenario(path = "tests/features/distance_matrix.feature", index = 1)]
fn conflicting_duplicates_fail(
    segments: RefCell<Vec<Segment<String>>>,
    built: RefCell<Option<BuildResult>>,
    rolled: RefCell<Option<Result<DistanceMatrix<String>, SchemaError>>>,
) {
    let _ = (segments, built, rolled);
}

#[scenario(path = "tests/features/distance_matrix.feature", index = 2)]
fn unroll_roll_round_trip(
    segments: RefCell<Vec<Segment<String>>>,
    built: RefCell<Option<BuildResult>>,
    rolled: RefCell<Option<Result<DistanceMatrix<String>, SchemaError>>>,
) {
    let _ = (segments, built, rolled);
}
