use bus::{Bus, CoreCommand, CoreEvent};
use core_types::{FlipId, Measurement, Rectangle};
use layout::Viewport;
use page::Page;
use runtime_measure::{DEFAULT_FLIP_ATTRIBUTE, MeasureAdapter};

const DOC: &str = r#"<body style="margin: 0">
    <div style="height: 20px"></div>
    <div data-elm-flip-id="a" style="margin-left: 10px; width: 100px; height: 50px"></div>
    <div data-elm-flip-id="x" style="height: 5px"></div>
</body>"#;

fn results(evt: CoreEvent) -> Vec<Measurement> {
    let CoreEvent::GotBoundingClientRects { results, .. } = evt;
    results
}

fn ids(raw: &[&str]) -> Vec<FlipId> {
    raw.iter().map(|s| FlipId::from(*s)).collect()
}

fn setup() -> (Bus, MeasureAdapter, Page) {
    let bus = Bus::new();
    let adapter = MeasureAdapter::new(bus.host.evt_tx.clone());
    let page = Page::from_html(DOC, Viewport::default(), DEFAULT_FLIP_ATTRIBUTE);
    (bus, adapter, page)
}

#[test]
fn resolved_ids_are_measured_and_missing_ones_dropped() {
    let (bus, adapter, mut page) = setup();
    adapter.get_bounding_client_rects(1, ids(&["a", "b"]), &mut page);
    page.run_frame();

    assert_eq!(
        results(bus.app.try_recv().unwrap().unwrap()),
        vec![Measurement {
            id: "a".into(),
            rectangle: Rectangle {
                left: 10.0,
                top: 20.0,
                height: 50.0,
                width: 100.0
            }
        }]
    );
}

#[test]
fn nothing_is_sent_before_the_frame() {
    let (bus, adapter, mut page) = setup();
    adapter.get_bounding_client_rects(1, ids(&["a"]), &mut page);
    assert_eq!(bus.app.try_recv(), Ok(None));
    page.run_frame();
    assert!(bus.app.try_recv().unwrap().is_some());
}

#[test]
fn duplicates_and_empty_requests() {
    let (bus, adapter, mut page) = setup();
    adapter.get_bounding_client_rects(1, ids(&["x", "x"]), &mut page);
    adapter.get_bounding_client_rects(2, vec![], &mut page);
    page.run_frame();

    let first = results(bus.app.try_recv().unwrap().unwrap());
    assert_eq!(first.len(), 2);
    assert_eq!(first[0], first[1]);
    assert_eq!(results(bus.app.try_recv().unwrap().unwrap()), vec![]);
}

#[test]
fn repeated_request_without_layout_change_is_identical() {
    let (bus, adapter, mut page) = setup();
    adapter.get_bounding_client_rects(1, ids(&["a", "x"]), &mut page);
    page.run_frame();
    adapter.get_bounding_client_rects(2, ids(&["a", "x"]), &mut page);
    page.run_frame();

    let first = results(bus.app.try_recv().unwrap().unwrap());
    let second = results(bus.app.try_recv().unwrap().unwrap());
    assert_eq!(first, second);
}

#[test]
fn measurement_sees_updates_made_after_the_request() {
    let (bus, adapter, mut page) = setup();

    // The application requests measurements in the same turn it changes the view.
    adapter.get_bounding_client_rects(1, ids(&["x"]), &mut page);
    page.set_attribute(&"a".into(), "style", "height: 70px").unwrap();
    page.run_frame();

    let measured = results(bus.app.try_recv().unwrap().unwrap());
    assert_eq!(measured[0].rectangle.top, 90.0);
}

#[test]
fn handle_routes_only_measurement_commands() {
    let (bus, adapter, mut page) = setup();
    let request_id = bus.app.get_bounding_client_rects(ids(&["a"])).unwrap();
    let cmd = bus.host.cmd_rx.try_recv().unwrap();
    assert!(adapter.handle(cmd, &mut page).is_none());

    let passthrough = adapter.handle(CoreCommand::ReplaceDocument { html: String::new() }, &mut page);
    assert!(matches!(passthrough, Some(CoreCommand::ReplaceDocument { .. })));

    page.run_frame();
    let CoreEvent::GotBoundingClientRects { request_id: answered, .. } =
        bus.app.try_recv().unwrap().unwrap();
    assert_eq!(answered, request_id);
}
