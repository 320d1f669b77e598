use subaward_reviewer::ReviewError;
use subaward_reviewer::extract::extract;
use subaward_reviewer::model::{Amount, CellValue, NAME_MISSING, Row, Subaward};
use subaward_reviewer::progress::NoProgress;

fn text(value: &str) -> CellValue {
    CellValue::from(value)
}

fn number(value: f64) -> CellValue {
    CellValue::from(value)
}

fn empty() -> CellValue {
    CellValue::Empty
}

fn scan(rows: &[Row]) -> Result<Vec<Subaward>, ReviewError> {
    extract(Some(rows), "budget.xlsx", &mut NoProgress)
}

fn header() -> Row {
    vec![text("Category"), text("Item"), empty(), text("Total")]
}

#[test]
fn reads_inline_and_separate_names() {
    let rows = vec![
        header(),
        vec![empty(), text("Subaward: Indiana"), empty(), number(100.0)],
        vec![empty(), text("Subaward:"), text("  Mayo "), number(250.5)],
    ];

    let subawards = scan(&rows).expect("subawards extracted");

    assert_eq!(
        subawards,
        vec![
            Subaward::new("Indiana", Amount::from_cents(10_000), "budget.xlsx"),
            Subaward::new("Mayo", Amount::from_cents(25_050), "budget.xlsx"),
        ]
    );
}

#[test]
fn third_column_name_wins_over_inline_text() {
    let rows = vec![
        header(),
        vec![empty(), text("Subaward: Purdue"), text("Florida"), number(1.0)],
    ];

    let subawards = scan(&rows).expect("subawards extracted");

    assert_eq!(subawards.len(), 1);
    assert_eq!(subawards[0].name, "Florida");
}

#[test]
fn markers_match_case_insensitively() {
    let rows = vec![
        vec![empty(), empty(), empty(), text("TOTAL")],
        vec![empty(), text("sUbAwArD:"), text("Mayo"), number(12.0)],
    ];

    let subawards = scan(&rows).expect("subawards extracted");

    assert_eq!(subawards.len(), 1);
    assert_eq!(subawards[0].amount, Amount::from_cents(1_200));
}

#[test]
fn inline_marker_is_only_stripped_in_its_exact_case() {
    let rows = vec![
        header(),
        vec![empty(), text("SUBAWARD: Purdue"), empty(), number(5.0)],
    ];

    let subawards = scan(&rows).expect("subawards extracted");

    assert_eq!(subawards[0].name, "SUBAWARD: Purdue");
}

#[test]
fn total_must_match_the_whole_cell() {
    let rows = vec![
        vec![empty(), text("Subaward Total"), empty(), text("Total")],
        vec![empty(), text("Subaward: Indiana"), empty(), number(7.0)],
    ];

    let error = scan(&rows[1..]).expect_err("no total column yet");
    assert!(matches!(error, ReviewError::MissingTotalColumn { row: 1, .. }));

    // "Subaward Total" lacks the colon, so the header row only sets the column.
    let subawards = scan(&rows).expect("subawards extracted");
    assert_eq!(subawards.len(), 1);
    assert_eq!(subawards[0].amount, Amount::from_cents(700));
}

#[test]
fn first_total_marker_fixes_the_amount_column() {
    let rows = vec![
        vec![empty(), empty(), text("Total"), text("Total")],
        vec![empty(), empty(), empty(), text("Total")],
        vec![empty(), text("Subaward: Mayo"), number(3.0), number(99.0)],
    ];

    let subawards = scan(&rows).expect("subawards extracted");

    assert_eq!(subawards[0].amount, Amount::from_cents(300));
}

#[test]
fn subaward_before_total_marker_fails() {
    let rows = vec![
        vec![empty(), text("Subaward: Indiana"), empty(), number(100.0)],
        header(),
    ];

    let error = scan(&rows).expect_err("amount column unknown");

    match error {
        ReviewError::MissingTotalColumn { file, row } => {
            assert_eq!(file, "budget.xlsx");
            assert_eq!(row, 1);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn blank_total_cell_defaults_to_zero() {
    let rows = vec![
        header(),
        vec![empty(), text("Subaward: Indiana"), empty(), empty()],
        vec![empty(), text("Subaward: Mayo"), empty(), text("")],
    ];

    let subawards = scan(&rows).expect("subawards extracted");

    assert!(
        subawards
            .iter()
            .all(|subaward| subaward.amount == Amount::ZERO)
    );
}

#[test]
fn unparseable_amount_fails_the_file() {
    let rows = vec![
        header(),
        vec![empty(), text("Subaward: Indiana"), empty(), text("$1,000.00")],
    ];

    let error = scan(&rows).expect_err("amount rejected");

    match error {
        ReviewError::InvalidAmount { row, value, .. } => {
            assert_eq!(row, 2);
            assert_eq!(value, "$1,000.00");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn text_amounts_with_grouping_are_accepted() {
    let rows = vec![
        header(),
        vec![empty(), text("Subaward: Purdue"), empty(), text(" 42,000.00 ")],
    ];

    let subawards = scan(&rows).expect("subawards extracted");

    assert_eq!(subawards[0].amount, Amount::from_cents(4_200_000));
}

#[test]
fn rows_without_a_name_get_the_sentinel() {
    let rows = vec![
        header(),
        vec![empty(), text("Subaward:"), empty(), number(10.0)],
        vec![empty(), text("Subaward:  "), text("   "), number(20.0)],
        vec![text("Subaward:"), empty(), empty(), number(30.0)],
    ];

    let subawards = scan(&rows).expect("subawards extracted");

    assert_eq!(subawards.len(), 3);
    assert!(subawards.iter().all(|subaward| subaward.name == NAME_MISSING));
    assert!(subawards.iter().all(Subaward::is_name_missing));
}

#[test]
fn only_text_cells_are_markers() {
    let rows = vec![
        vec![empty(), CellValue::Other("Total".into()), empty(), text("Total")],
        vec![
            empty(),
            CellValue::Other("Subaward: Fake".into()),
            empty(),
            number(1.0),
        ],
    ];

    let subawards = scan(&rows).expect("subawards extracted");

    assert!(subawards.is_empty());
}

#[test]
fn scanning_stops_at_the_first_subaward_marker_in_a_row() {
    let rows = vec![
        header(),
        vec![
            text("Subaward: Indiana"),
            text("Subaward: Mayo"),
            empty(),
            number(4.0),
        ],
    ];

    let subawards = scan(&rows).expect("subawards extracted");

    assert_eq!(subawards.len(), 1);
    assert_eq!(subawards[0].name, "Mayo");
}

#[test]
fn duplicate_names_are_not_merged_within_a_file() {
    let rows = vec![
        header(),
        vec![empty(), text("Subaward: Indiana"), empty(), number(1.0)],
        vec![empty(), text("Subaward: Indiana"), empty(), number(2.0)],
    ];

    let subawards = scan(&rows).expect("subawards extracted");

    assert_eq!(subawards.len(), 2);
}

#[test]
fn missing_rows_yield_nothing() {
    let subawards = extract(None, "budget.xlsx", &mut NoProgress).expect("no rows is fine");

    assert!(subawards.is_empty());
}

#[test]
fn extraction_is_repeatable() {
    let rows = vec![
        header(),
        vec![empty(), text("Subaward: Indiana"), empty(), number(100.0)],
        vec![empty(), text("Subaward:"), empty(), number(5.0)],
    ];

    assert_eq!(scan(&rows).unwrap(), scan(&rows).unwrap());
}

#[test]
fn boolean_names_read_like_the_sheet() {
    let rows = vec![
        header(),
        vec![empty(), text("Subaward:"), CellValue::Bool(true), number(1.0)],
        vec![empty(), text("Subaward:"), CellValue::Bool(false), number(2.0)],
    ];

    let subawards = scan(&rows).expect("subawards extracted");

    let names: Vec<&str> = subawards.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["True", "False"]);
}

#[test]
fn integer_amounts_stay_exact() {
    let rows = vec![
        header(),
        vec![
            empty(),
            text("Subaward: Indiana"),
            empty(),
            CellValue::from(9_007_199_254_740_993_i64),
        ],
    ];

    let subawards = scan(&rows).expect("subawards extracted");

    assert_eq!(
        subawards[0].amount,
        "9007199254740993".parse::<Amount>().expect("amount")
    );
    assert_eq!(subawards[0].amount.to_string(), "9007199254740993.00");
}
