use core_types::{FlipId, Measurement, RequestId};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::time::Duration;

/// Inbound port name: application -> host.
pub const GET_BOUNDING_CLIENT_RECTS: &str = "getBoundingClientRects";
/// Outbound port name: host -> application.
pub const GOT_BOUNDING_CLIENT_RECTS: &str = "gotBoundingClientRects";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BusError {
    #[error("the host side of the bus is gone")]
    HostGone,
    #[error("the application side of the bus is gone")]
    AppGone,
}

#[derive(Clone, Debug, PartialEq)]
pub enum CoreCommand {
    // Measurement
    GetBoundingClientRects {
        request_id: RequestId,
        ids: Vec<FlipId>,
    },
    // Document updates from the application's render step
    SetAttribute {
        target: FlipId,
        name: String,
        value: String,
    },
    RemoveAttribute {
        target: FlipId,
        name: String,
    },
    ReplaceDocument {
        html: String,
    },
    SetViewportWidth {
        width: f32,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub enum CoreEvent {
    GotBoundingClientRects {
        request_id: RequestId,
        results: Vec<Measurement>,
    },
}

/// Application end: sends commands, receives events.
pub struct AppPorts {
    cmd_tx: Sender<CoreCommand>,
    evt_rx: Receiver<CoreEvent>,
    next_request: AtomicU64,
}

/// Host end: receives commands, sends events. `evt_tx` is cloneable for runtimes.
pub struct HostPorts {
    pub cmd_rx: Receiver<CoreCommand>,
    pub evt_tx: Sender<CoreEvent>,
}

pub struct Bus {
    pub app: AppPorts,
    pub host: HostPorts,
}

impl Bus {
    /// Create both channels at once, so neither side exists unwired.
    pub fn new() -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (evt_tx, evt_rx) = mpsc::channel();
        Bus {
            app: AppPorts {
                cmd_tx,
                evt_rx,
                next_request: AtomicU64::new(1),
            },
            host: HostPorts { cmd_rx, evt_tx },
        }
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}

impl AppPorts {
    /// Fire a `getBoundingClientRects` request. The answer arrives later as a
    /// `CoreEvent::GotBoundingClientRects` carrying the returned id.
    pub fn get_bounding_client_rects(&self, ids: Vec<FlipId>) -> Result<RequestId, BusError> {
        let request_id = self.next_request.fetch_add(1, Ordering::Relaxed);
        self.send(CoreCommand::GetBoundingClientRects { request_id, ids })?;
        Ok(request_id)
    }

    pub fn send(&self, cmd: CoreCommand) -> Result<(), BusError> {
        self.cmd_tx.send(cmd).map_err(|_| BusError::HostGone)
    }

    /// `Ok(None)` when nothing is queued.
    pub fn try_recv(&self) -> Result<Option<CoreEvent>, BusError> {
        match self.evt_rx.try_recv() {
            Ok(evt) => Ok(Some(evt)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(BusError::HostGone),
        }
    }

    /// `Ok(None)` on timeout.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Option<CoreEvent>, BusError> {
        match self.evt_rx.recv_timeout(timeout) {
            Ok(evt) => Ok(Some(evt)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(BusError::HostGone),
        }
    }

    /// Hand the two directions to separate threads. Dropping the sender is how the
    /// application tells the host it is done.
    pub fn split(self) -> (Sender<CoreCommand>, Receiver<CoreEvent>) {
        (self.cmd_tx, self.evt_rx)
    }
}

impl HostPorts {
    pub fn emit(&self, evt: CoreEvent) -> Result<(), BusError> {
        self.evt_tx.send(evt).map_err(|_| BusError::AppGone)
    }
}
