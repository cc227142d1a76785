use app_api::{FrameScheduler, LayoutHost};
use core_types::{FlipId, Rectangle};
use layout::Viewport;
use page::{Page, PageError};
use std::sync::{Arc, Mutex};

const LIST: &str = r#"<html><head><style>
    body { margin: 0 }
    ul { margin: 0; padding: 0 }
    li { height: 40px }
    .tall { height: 80px }
</style></head><body><ul>
    <li data-elm-flip-id="one">One</li>
    <li data-elm-flip-id="two">Two</li>
    <li data-elm-flip-id="three">Three</li>
</ul></body></html>"#;

fn page() -> Page {
    Page::from_html(LIST, Viewport::default(), "data-elm-flip-id")
}

fn top_of(page: &Page, flip: &str) -> Option<f32> {
    let frame = page.committed();
    let element = frame.query_by_attribute("data-elm-flip-id", flip)?;
    Some(frame.offset_rect(element).top)
}

#[test]
fn initial_layout_is_committed_on_load() {
    let page = page();
    assert_eq!(top_of(&page, "one"), Some(0.0));
    assert_eq!(top_of(&page, "two"), Some(40.0));
    assert_eq!(top_of(&page, "three"), Some(80.0));
    assert!(!page.is_dirty());
}

#[test]
fn updates_are_not_visible_until_the_frame_commits() {
    let mut page = page();
    page.set_attribute(&FlipId::from("one"), "class", "tall").unwrap();
    assert!(page.is_dirty());
    assert_eq!(top_of(&page, "two"), Some(40.0));

    page.run_frame();
    assert!(!page.is_dirty());
    assert_eq!(top_of(&page, "two"), Some(80.0));
    assert_eq!(top_of(&page, "three"), Some(120.0));
}

#[test]
fn callbacks_run_after_commit_in_request_order() {
    let mut page = page();
    let seen: Arc<Mutex<Vec<(u8, Option<f32>)>>> = Arc::new(Mutex::new(Vec::new()));

    for tag in [1u8, 2] {
        let seen = Arc::clone(&seen);
        page.request_animation_frame(Box::new(move |host| {
            let two = host.query_by_attribute("data-elm-flip-id", "two");
            let top = two.map(|e| host.offset_rect(e).top);
            seen.lock().unwrap().push((tag, top));
        }));
    }
    page.set_attribute(&FlipId::from("one"), "style", "height: 10px").unwrap();
    assert_eq!(page.pending_callbacks(), 2);
    assert!(seen.lock().unwrap().is_empty());

    let frame = page.run_frame();
    assert_eq!(frame, 1);
    assert_eq!(page.pending_callbacks(), 0);
    assert_eq!(*seen.lock().unwrap(), vec![(1, Some(10.0)), (2, Some(10.0))]);

    // nothing queued: the next frame runs nothing
    page.run_frame();
    assert_eq!(seen.lock().unwrap().len(), 2);
}

#[test]
fn removing_an_element_from_layout_keeps_it_resolvable() {
    let mut page = page();
    page.set_attribute(&FlipId::from("two"), "style", "display: none").unwrap();
    page.run_frame();

    let frame = page.committed();
    let two = frame.query_by_attribute("data-elm-flip-id", "two").unwrap();
    assert_eq!(frame.offset_rect(two), Rectangle::ZERO);
    drop(frame);
    assert_eq!(top_of(&page, "three"), Some(40.0));
}

#[test]
fn unknown_update_target_is_an_error() {
    let mut page = page();
    let err = page
        .set_attribute(&FlipId::from("nope"), "class", "tall")
        .unwrap_err();
    assert_eq!(
        err,
        PageError::UnknownElement {
            attribute: "data-elm-flip-id".into(),
            id: "nope".into()
        }
    );
    assert_eq!(
        err.to_string(),
        r#"no element with data-elm-flip-id="nope""#
    );
    assert!(!page.is_dirty());
}

#[test]
fn committed_frame_ignores_a_replaced_document_until_the_frame() {
    let mut page = page();
    page.replace_document(
        r#"<body style="margin: 0"><div style="height: 300px"></div><div data-elm-flip-id="new" style="height: 50px"></div></body>"#,
    );

    let frame = page.committed();
    assert!(frame.query_by_attribute("data-elm-flip-id", "new").is_none());
    let two = frame.query_by_attribute("data-elm-flip-id", "two").unwrap();
    assert_eq!(frame.offset_rect(two).top, 40.0);
    drop(frame);

    page.run_frame();
    let frame = page.committed();
    let new = frame.query_by_attribute("data-elm-flip-id", "new").unwrap();
    assert_eq!(
        frame.offset_rect(new),
        Rectangle {
            left: 0.0,
            top: 300.0,
            height: 50.0,
            width: 800.0
        }
    );
    assert!(frame.query_by_attribute("data-elm-flip-id", "two").is_none());
}

#[test]
fn replace_document_and_viewport_changes_relayout() {
    let mut page = page();
    page.replace_document(
        r#"<body style="margin: 0"><div data-elm-flip-id="solo" style="margin-left: 25%"></div></body>"#,
    );
    page.set_viewport_width(300.0);
    page.run_frame();

    let frame = page.committed();
    let solo = frame.query_by_attribute("data-elm-flip-id", "solo").unwrap();
    let rect = frame.offset_rect(solo);
    // percentages are not supported, so the margin is ignored
    assert_eq!((rect.left, rect.width), (0.0, 300.0));
    assert_eq!(page.viewport().width, 300.0);
    assert!(frame.query_by_attribute("data-elm-flip-id", "one").is_none());
}
