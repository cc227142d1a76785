use std::io::{BufRead, Write};
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use bus::{Bus, CoreCommand, CoreEvent, HostPorts};
use core_types::RequestId;
use page::Page;
use runtime_measure::MeasureAdapter;

use crate::config::HostConfig;
use crate::error::HostError;
use crate::wire::{Inbound, Outbound};

/// The host side of the bus: owns the page, ticks frames, and routes commands to either
/// the measurement adapter or the document.
pub struct HostRuntime {
    page: Page,
    adapter: MeasureAdapter,
    frame_interval: Duration,
}

impl HostRuntime {
    pub fn new(page: Page, adapter: MeasureAdapter, frame_interval: Duration) -> Self {
        Self {
            page,
            adapter,
            frame_interval,
        }
    }

    pub fn dispatch(&mut self, cmd: CoreCommand) {
        let Some(cmd) = self.adapter.handle(cmd, &mut self.page) else {
            return;
        };
        let result = match cmd {
            CoreCommand::SetAttribute {
                target,
                name,
                value,
            } => self.page.set_attribute(&target, &name, &value),
            CoreCommand::RemoveAttribute { target, name } => {
                self.page.remove_attribute(&target, &name)
            }
            CoreCommand::ReplaceDocument { html } => {
                self.page.replace_document(&html);
                Ok(())
            }
            CoreCommand::SetViewportWidth { width } => {
                self.page.set_viewport_width(width);
                Ok(())
            }
            // taken by the adapter above
            CoreCommand::GetBoundingClientRects { .. } => Ok(()),
        };
        if let Err(err) = result {
            log::warn!(target: "flipprobe.host", "update ignored: {err}");
        }
    }

    /// Handle commands and tick frames until the command channel closes, then run one
    /// last frame if callbacks are still waiting, so every request gets its response.
    pub fn run(mut self, cmd_rx: Receiver<CoreCommand>) -> Page {
        let mut next_frame = Instant::now() + self.frame_interval;
        loop {
            let now = Instant::now();
            if now >= next_frame {
                self.page.run_frame();
                next_frame = now + self.frame_interval;
                continue;
            }
            match cmd_rx.recv_timeout(next_frame - now) {
                Ok(cmd) => self.dispatch(cmd),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        if self.page.pending_callbacks() > 0 {
            self.page.run_frame();
        }
        log::info!(
            target: "flipprobe.host",
            "host runtime stopped after {} frames",
            self.page.frame_id()
        );
        self.page
    }
}

/// Spawn the host runtime on its own thread. It stops when every command sender is gone
/// and hands the page back through the join handle.
pub fn start_host_runtime(host: HostPorts, page: Page, config: &HostConfig) -> JoinHandle<Page> {
    let HostPorts { cmd_rx, evt_tx } = host;
    let adapter = MeasureAdapter::with_attribute(config.attribute.clone(), evt_tx);
    let runtime = HostRuntime::new(page, adapter, config.frame_interval());
    thread::spawn(move || runtime.run(cmd_rx))
}

/// Serve the ports over JSON lines: messages are read from `input` until EOF, responses
/// are written to `output` as they are produced. Returns once every response is written.
pub fn serve<R, W>(input: R, output: W, page: Page, config: &HostConfig) -> Result<Page, HostError>
where
    R: BufRead,
    W: Write + Send,
{
    let Bus { app, host } = Bus::new();
    let (cmd_tx, evt_rx) = app.split();
    let HostPorts { cmd_rx, evt_tx } = host;
    let adapter = MeasureAdapter::with_attribute(config.attribute.clone(), evt_tx);
    let runtime = HostRuntime::new(page, adapter, config.frame_interval());

    thread::scope(|scope| {
        let host_thread = scope.spawn(move || runtime.run(cmd_rx));
        let writer = scope.spawn(move || write_events(evt_rx, output));

        let read_result = read_commands(input, &cmd_tx);
        drop(cmd_tx);

        let page = host_thread.join().map_err(|_| HostError::RuntimePanicked)?;
        writer.join().map_err(|_| HostError::RuntimePanicked)??;
        read_result?;
        Ok(page)
    })
}

fn read_commands<R: BufRead>(mut input: R, cmd_tx: &Sender<CoreCommand>) -> Result<(), HostError> {
    let mut next_request: RequestId = 1;
    let mut buf = Vec::new();
    let mut line_no = 0usize;
    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;

        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line.trim(),
            Err(err) => {
                log::warn!(target: "flipprobe.wire", "line {line_no}: skipping line that is not UTF-8: {err}");
                continue;
            }
        };
        if line.is_empty() {
            continue;
        }
        let inbound = match Inbound::decode(line) {
            Ok(inbound) => inbound,
            Err(err) => {
                log::warn!(target: "flipprobe.wire", "line {line_no}: skipping malformed message: {err}");
                continue;
            }
        };
        let cmd = inbound.into_command(next_request);
        if matches!(cmd, CoreCommand::GetBoundingClientRects { .. }) {
            next_request += 1;
        }
        if cmd_tx.send(cmd).is_err() {
            log::warn!(target: "flipprobe.wire", "host runtime gone; ignoring remaining input");
            break;
        }
    }
    Ok(())
}

fn write_events<W: Write>(evt_rx: Receiver<CoreEvent>, mut output: W) -> Result<(), HostError> {
    for evt in evt_rx {
        let outbound = Outbound::from(evt);
        let line = outbound.encode().map_err(|source| HostError::Encode {
            port: outbound.port(),
            source,
        })?;
        writeln!(output, "{line}")?;
        output.flush()?;
    }
    Ok(())
}
