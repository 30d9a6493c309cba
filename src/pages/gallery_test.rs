use super::*;

// =============================================================
// Filter
// =============================================================

#[test]
fn query_trims_search_and_clamps_page() {
    let filter = GalleryFilter { search: "  pizza ".to_owned(), status: None, page: 0 };
    let query = filter.query();
    assert_eq!(query.page, Some(1));
    assert_eq!(query.limit, Some(PAGE_SIZE));
    assert_eq!(query.search.as_deref(), Some("pizza"));
}

#[test]
fn query_drops_blank_search() {
    let filter = GalleryFilter { search: "   ".to_owned(), status: Some(GenerationStatus::Failed), page: 3 };
    let query = filter.query();
    assert_eq!(query.search, None);
    assert_eq!(query.status, Some(GenerationStatus::Failed));
    assert_eq!(query.page, Some(3));
}

#[test]
fn parse_status_filter_maps_known_values() {
    assert_eq!(parse_status_filter("completed"), Some(GenerationStatus::Completed));
    assert_eq!(parse_status_filter("all"), None);
    assert_eq!(parse_status_filter("pending"), None);
}

// =============================================================
// Selection
// =============================================================

#[test]
fn toggle_adds_then_removes() {
    let mut selection = Selection::default();
    selection.toggle(4);
    assert!(selection.contains(4));
    selection.toggle(4);
    assert!(selection.is_empty());
}

#[test]
fn toggle_all_selects_then_clears() {
    let mut selection = Selection::default();
    selection.toggle(2);
    selection.toggle_all(&[1, 2, 3]);
    assert_eq!(selection.ids(), vec![1, 2, 3]);
    selection.toggle_all(&[1, 2, 3]);
    assert!(selection.is_empty());
}

#[test]
fn toggle_all_with_nothing_visible_is_noop() {
    let mut selection = Selection::default();
    selection.toggle_all(&[]);
    assert!(selection.is_empty());
}

#[test]
fn removing_deleted_ids_keeps_failures_selected() {
    let mut selection = Selection::default();
    selection.toggle_all(&[1, 2, 3]);
    selection.remove(1);
    selection.remove(3);
    assert_eq!(selection.ids(), vec![2]);
    assert_eq!(selection.len(), 1);
}

#[test]
fn delete_summary_reports_each_side() {
    assert_eq!(delete_summary(2, 0), (Some("2 item(s) deleted".to_owned()), None));
    assert_eq!(
        delete_summary(1, 1),
        (Some("1 item(s) deleted".to_owned()), Some("1 item(s) could not be deleted".to_owned()))
    );
    assert_eq!(delete_summary(0, 0), (None, None));
}
