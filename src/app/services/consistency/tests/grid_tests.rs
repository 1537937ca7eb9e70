//! Tests for grid locator checks

use super::*;
use crate::app::services::consistency::{GridProblem, check_grid};

#[test]
fn test_valid_locators() {
    for grid in ["FN42", "FN42AB", "JO62QM", "FN42AX12"] {
        assert_eq!(check_grid(grid), None, "grid {}", grid);
    }
}

#[test]
fn test_length_five_is_always_invalid() {
    assert_eq!(check_grid("FN42A"), Some(GridProblem::Malformed));
    assert_eq!(check_grid("JO62Q"), Some(GridProblem::Malformed));
}

#[test]
fn test_malformed_locators() {
    for grid in ["FN4", "FZ42", "FNX2", "FN4X", ""] {
        assert_eq!(check_grid(grid), Some(GridProblem::Malformed), "grid {}", grid);
    }
}

#[test]
fn test_subsquare_letters() {
    assert_eq!(check_grid("FN42YA"), Some(GridProblem::Subsquare));
    assert_eq!(check_grid("FN42AZ"), Some(GridProblem::Subsquare));
    assert_eq!(check_grid("FN4211"), Some(GridProblem::Subsquare));
}

#[test]
fn test_first_character_is_not_checked() {
    assert_eq!(check_grid("1N42"), None);
}

#[test]
fn test_grid_field_in_record() {
    let diagnostics = validate(&qso(&[("GRIDSQUARE", "fn42a")]));

    assert_eq!(
        messages_of(&diagnostics, DiagnosticKind::Compliance),
        vec!["'FN42A' is an invalid gridsquare"]
    );
}

#[test]
fn test_grid_lists_are_split() {
    let diagnostics = validate(&qso(&[("VUCC_GRIDS", "FN42,FN43:FN4")]));

    assert_eq!(messages(&diagnostics), vec!["'FN4' is an invalid gridsquare"]);
}

#[test]
fn test_my_station_grid() {
    let diagnostics = validate(&qso(&[("MY_GRIDSQUARE", "FN42YZ"), ("MY_VUCC_GRIDS", "FN42,FN52")]));

    assert_eq!(
        messages(&diagnostics),
        vec!["'FN42YZ' is an invalid gridsquare (subsquare)"]
    );
}
