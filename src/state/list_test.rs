use super::*;

fn template(id: i64, name: &str) -> Template {
    Template { id, name: name.to_owned(), ..Template::default() }
}

#[test]
fn default_list_is_loading_and_empty() {
    let list: ListState<Template> = ListState::default();
    assert!(list.loading);
    assert!(list.is_empty());
    assert_eq!(list.error, None);
}

#[test]
fn load_clears_error_and_loading() {
    let mut list = ListState::default();
    list.fail("boom");
    list.load(vec![template(1, "Promo")]);
    assert!(!list.loading);
    assert_eq!(list.error, None);
    assert_eq!(list.items.len(), 1);
}

#[test]
fn fail_keeps_previous_items() {
    let mut list = ListState::default();
    list.load(vec![template(1, "Promo")]);
    list.fail("offline");
    assert_eq!(list.items.len(), 1);
    assert_eq!(list.error.as_deref(), Some("offline"));
}

#[test]
fn remove_reports_presence() {
    let mut list = ListState::default();
    list.load(vec![template(1, "A"), template(2, "B")]);
    assert!(list.remove(1));
    assert!(!list.remove(1));
    assert_eq!(list.items, vec![template(2, "B")]);
}

#[test]
fn upsert_replaces_in_place_or_prepends() {
    let mut list = ListState::default();
    list.load(vec![template(1, "A"), template(2, "B")]);
    list.upsert(template(2, "B2"));
    list.upsert(template(3, "C"));
    let names: Vec<_> = list.items.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["C", "A", "B2"]);
}

#[test]
fn update_touches_only_matching_item() {
    let mut list = ListState::default();
    list.load(vec![template(1, "A"), template(2, "B")]);
    list.update(2, |t| t.is_favorite = true);
    list.update(9, |t| t.is_favorite = true);
    assert!(!list.get(1).unwrap().is_favorite);
    assert!(list.get(2).unwrap().is_favorite);
}
