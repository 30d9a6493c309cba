use super::*;

#[test]
fn push_assigns_increasing_ids() {
    let mut notices = NoticeState::default();
    let a = notices.success("Saved");
    let b = notices.error("Failed");
    assert!(b > a);
    assert_eq!(notices.items.len(), 2);
    assert_eq!(notices.items[1].kind, NoticeKind::Error);
}

#[test]
fn dismiss_removes_only_that_notice() {
    let mut notices = NoticeState::default();
    let a = notices.success("one");
    let b = notices.success("two");
    notices.dismiss(a);
    notices.dismiss(a);
    assert_eq!(notices.items.len(), 1);
    assert_eq!(notices.items[0].id, b);
}

#[test]
fn ids_are_not_reused_after_dismiss() {
    let mut notices = NoticeState::default();
    let a = notices.success("one");
    notices.dismiss(a);
    assert_ne!(notices.success("two"), a);
}

#[test]
fn api_error_uses_user_message() {
    let mut notices = NoticeState::default();
    notices.api_error(&ApiError::Rejected { status: 400, message: "Number already linked".to_owned() });
    notices.api_error(&ApiError::Transport("dns".to_owned()));
    assert_eq!(notices.items[0].text, "Number already linked");
    assert_eq!(notices.items[1].text, "Could not reach the server. Check your connection.");
}
