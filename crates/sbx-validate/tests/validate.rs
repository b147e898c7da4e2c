use proptest::prelude::*;
use rust_xlsxwriter::Workbook;

use sbx_ingest::{Cell, Grid, SourceFile, decode};
use sbx_model::{ArtifactKind, BinaryMatrix};
use sbx_validate::{DomainError, DomainRule, ShapeError, ValidationError, validate};

fn string_grid(rows: Vec<Vec<String>>) -> Grid {
    Grid::from_rows(
        rows.into_iter()
            .map(|row| row.into_iter().map(Cell::Text).collect())
            .collect(),
    )
}

fn xlsx_grid(rows: &[Vec<u8>]) -> Grid {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            sheet
                .write_number(r as u32, c as u16, f64::from(*value))
                .expect("write cell");
        }
    }
    let bytes = workbook.save_to_buffer().expect("save workbook");
    decode(&SourceFile::new("matrix.xlsx", bytes)).expect("decode workbook")
}

fn binary_strings(rows: usize, cols: usize) -> Vec<Vec<String>> {
    (0..rows)
        .map(|r| (0..cols).map(|c| ((r + c) % 2).to_string()).collect())
        .collect()
}

#[test]
fn eight_by_eight_binary_strings_validate() {
    let rows = binary_strings(8, 8);
    let artifact = validate(&string_grid(rows.clone()), ArtifactKind::matrix()).expect("valid");
    let matrix = artifact.as_matrix().expect("matrix");

    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            assert_eq!(matrix.get(r, c).map(u32::from), value.parse::<u32>().ok());
        }
    }
}

#[test]
fn seven_rows_is_a_shape_error() {
    let err = validate(&string_grid(binary_strings(7, 8)), ArtifactKind::matrix()).unwrap_err();
    assert_eq!(
        err,
        ValidationError::Shape(ShapeError::RowCount {
            expected: 8,
            found: 7
        })
    );
    assert_eq!(err.to_string(), "expected 8 rows, found 7");
}

#[test]
fn bad_cell_is_pinpointed_one_indexed() {
    let mut rows = binary_strings(8, 8);
    rows[3][5] = "2".to_string();

    let err = validate(&string_grid(rows), ArtifactKind::matrix()).unwrap_err();
    assert_eq!(
        err,
        ValidationError::Domain(DomainError {
            row: 4,
            column: 6,
            value: "2".to_string(),
            rule: DomainRule::Binary,
        })
    );
}

#[test]
fn trailing_blank_rows_do_not_count() {
    let mut rows = binary_strings(8, 8);
    rows.push(vec![String::new(); 8]);
    let grid = Grid::from_rows(
        rows.into_iter()
            .map(|row| row.iter().map(|s| Cell::from_text(s)).collect())
            .collect(),
    );
    assert!(validate(&grid, ArtifactKind::matrix()).is_ok());
}

#[test]
fn long_workbook_row_is_named() {
    let mut rows = vec![vec![0u8; 8]; 8];
    rows[4].push(1);

    let err = validate(&xlsx_grid(&rows), ArtifactKind::matrix()).unwrap_err();
    assert_eq!(
        err,
        ValidationError::Shape(ShapeError::RowWidth {
            row: 5,
            expected: 8,
            found: 9
        })
    );
}

#[test]
fn short_workbook_row_is_named() {
    let mut rows = vec![vec![1u8; 8]; 8];
    rows[2].pop();

    let err = validate(&xlsx_grid(&rows), ArtifactKind::matrix()).unwrap_err();
    assert_eq!(
        err,
        ValidationError::Shape(ShapeError::RowWidth {
            row: 3,
            expected: 8,
            found: 7
        })
    );
}

#[test]
fn sixteen_by_sixteen_table_validates() {
    let rows: Vec<Vec<String>> = (0..16)
        .map(|r| (0..16).map(|c| (r * 16 + c).to_string()).collect())
        .collect();
    let artifact = validate(&string_grid(rows), ArtifactKind::table()).expect("valid");
    let table = artifact.as_table().expect("table");
    assert!(table.is_bijective());
    assert_eq!(table.fixed_points().len(), 256);
}

#[test]
fn table_out_of_range_names_raw_value() {
    let mut rows: Vec<Vec<String>> = vec![vec!["7".to_string(); 16]; 16];
    rows[15][0] = "256".to_string();

    let err = validate(&string_grid(rows), ArtifactKind::table()).unwrap_err();
    let ValidationError::Domain(domain) = err else {
        panic!("expected domain error, got {err:?}");
    };
    assert_eq!((domain.row, domain.column), (16, 1));
    assert_eq!(domain.value, "256");
    assert_eq!(domain.rule, DomainRule::Byte);
}

#[test]
fn duplicate_table_values_are_accepted() {
    let rows: Vec<Vec<String>> = vec![vec!["0".to_string(); 16]; 16];
    let artifact = validate(&string_grid(rows), ArtifactKind::table()).expect("valid");
    assert!(!artifact.as_table().expect("table").is_bijective());
}

#[test]
fn validation_is_deterministic() {
    let mut rows = binary_strings(8, 8);
    rows[0][0] = "x".to_string();
    let grid = string_grid(rows);

    let first = validate(&grid, ArtifactKind::matrix());
    let second = validate(&grid, ArtifactKind::matrix());
    assert_eq!(first, second);
}

proptest! {
    #[test]
    fn wrong_row_count_never_yields_artifact(rows in 0usize..20) {
        prop_assume!(rows != 8);
        let err = validate(&string_grid(binary_strings(rows, 8)), ArtifactKind::matrix())
            .unwrap_err();
        prop_assert_eq!(
            err,
            ValidationError::Shape(ShapeError::RowCount { expected: 8, found: rows })
        );
    }

    #[test]
    fn first_bad_cell_in_row_major_order_is_reported(
        bits in proptest::collection::vec(0u8..=1, 64),
        bad in proptest::collection::btree_set(0usize..64, 1..5),
        value in 2u32..1000,
    ) {
        let mut rows: Vec<Vec<String>> = bits
            .chunks(8)
            .map(|chunk| chunk.iter().map(u8::to_string).collect())
            .collect();
        for &index in &bad {
            rows[index / 8][index % 8] = value.to_string();
        }
        let first = *bad.iter().next().expect("non-empty");

        let err = validate(&string_grid(rows), ArtifactKind::matrix()).unwrap_err();
        prop_assert_eq!(
            err,
            ValidationError::Domain(DomainError {
                row: first / 8 + 1,
                column: first % 8 + 1,
                value: value.to_string(),
                rule: DomainRule::Binary,
            })
        );
    }

    #[test]
    fn validated_matrix_matches_input(bits in proptest::collection::vec(0u8..=1, 64)) {
        let rows: Vec<Vec<u8>> = bits.chunks(8).map(<[u8]>::to_vec).collect();
        let strings = rows
            .iter()
            .map(|row| row.iter().map(u8::to_string).collect())
            .collect();

        let artifact = validate(&string_grid(strings), ArtifactKind::matrix()).unwrap();
        prop_assert_eq!(artifact.as_matrix(), Some(&BinaryMatrix::new(rows).unwrap()));
    }
}
