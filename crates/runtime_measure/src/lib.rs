use std::sync::mpsc::Sender;

use app_api::{FrameScheduler, LayoutHost};
use bus::{CoreCommand, CoreEvent};
use core_types::{FlipId, Measurement, RequestId};

/// Attribute the application tags measurable elements with.
pub const DEFAULT_FLIP_ATTRIBUTE: &str = "data-elm-flip-id";

/// Answers `getBoundingClientRects` requests one frame later on `gotBoundingClientRects`.
///
/// Each request gets its own frame callback and its own response; nothing is shared or
/// coalesced between requests.
pub struct MeasureAdapter {
    attribute: String,
    evt_tx: Sender<CoreEvent>,
}

impl MeasureAdapter {
    pub fn new(evt_tx: Sender<CoreEvent>) -> Self {
        Self::with_attribute(DEFAULT_FLIP_ATTRIBUTE, evt_tx)
    }

    pub fn with_attribute(attribute: impl Into<String>, evt_tx: Sender<CoreEvent>) -> Self {
        Self {
            attribute: attribute.into(),
            evt_tx,
        }
    }

    /// Take a measurement command. Returns the command back if it is not one.
    pub fn handle(
        &self,
        cmd: CoreCommand,
        scheduler: &mut dyn FrameScheduler,
    ) -> Option<CoreCommand> {
        match cmd {
            CoreCommand::GetBoundingClientRects { request_id, ids } => {
                self.get_bounding_client_rects(request_id, ids, scheduler);
                None
            }
            other => Some(other),
        }
    }

    pub fn get_bounding_client_rects(
        &self,
        request_id: RequestId,
        ids: Vec<FlipId>,
        scheduler: &mut dyn FrameScheduler,
    ) {
        log::debug!(
            target: "flipprobe.measure",
            "getBoundingClientRects {:?}",
            ids.iter().map(FlipId::as_str).collect::<Vec<_>>()
        );

        let attribute = self.attribute.clone();
        let evt_tx = self.evt_tx.clone();
        scheduler.request_animation_frame(Box::new(move |host| {
            let results = measure(host, &attribute, &ids);
            log::trace!(
                target: "flipprobe.measure",
                "request {request_id}: {} of {} ids resolved",
                results.len(),
                ids.len()
            );
            let evt = CoreEvent::GotBoundingClientRects {
                request_id,
                results,
            };
            if evt_tx.send(evt).is_err() {
                log::warn!(
                    target: "flipprobe.measure",
                    "gotBoundingClientRects for request {request_id} dropped: application disconnected"
                );
            }
        }));
    }
}

/// Measure every id that resolves to an element, in request order. Unresolved ids are
/// skipped; duplicates are measured once per occurrence.
pub fn measure(host: &dyn LayoutHost, attribute: &str, ids: &[FlipId]) -> Vec<Measurement> {
    ids.iter()
        .filter_map(|id| {
            let element = host.query_by_attribute(attribute, id.as_str())?;
            Some(Measurement {
                id: id.clone(),
                rectangle: host.offset_rect(element),
            })
        })
        .collect()
}
