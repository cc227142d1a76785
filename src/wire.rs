//! JSON-lines form of the ports: one message object per line, tagged by `port`.
use bus::{CoreCommand, CoreEvent, GOT_BOUNDING_CLIENT_RECTS};
use core_types::{FlipId, Measurement, RequestId};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "port", rename_all = "camelCase")]
pub enum Inbound {
    GetBoundingClientRects { ids: Vec<FlipId> },
    SetAttribute { id: FlipId, name: String, value: String },
    RemoveAttribute { id: FlipId, name: String },
    ReplaceDocument { html: String },
    SetViewportWidth { width: f32 },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "port", rename_all = "camelCase")]
pub enum Outbound {
    GotBoundingClientRects { results: Vec<Measurement> },
}

impl Inbound {
    pub fn decode(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }

    /// `request_id` is only used by measurement requests.
    pub fn into_command(self, request_id: RequestId) -> CoreCommand {
        match self {
            Inbound::GetBoundingClientRects { ids } => {
                CoreCommand::GetBoundingClientRects { request_id, ids }
            }
            Inbound::SetAttribute { id, name, value } => CoreCommand::SetAttribute {
                target: id,
                name,
                value,
            },
            Inbound::RemoveAttribute { id, name } => CoreCommand::RemoveAttribute { target: id, name },
            Inbound::ReplaceDocument { html } => CoreCommand::ReplaceDocument { html },
            Inbound::SetViewportWidth { width } => CoreCommand::SetViewportWidth { width },
        }
    }
}

impl From<CoreEvent> for Outbound {
    fn from(evt: CoreEvent) -> Self {
        match evt {
            CoreEvent::GotBoundingClientRects { results, .. } => {
                Outbound::GotBoundingClientRects { results }
            }
        }
    }
}

impl Outbound {
    pub fn port(&self) -> &'static str {
        match self {
            Outbound::GotBoundingClientRects { .. } => GOT_BOUNDING_CLIENT_RECTS,
        }
    }

    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
