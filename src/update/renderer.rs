//! Renderer message handling
//!
//! The embedded renderer boots asynchronously after a panel's content is
//! set. Its one-time readiness signal releases every queued preview
//! request; everything else on the inbound wire is logged and ignored.

use crate::commands::Cmd;
use crate::messages::RendererMsg;
use crate::model::AppModel;

pub fn update_renderer(model: &mut AppModel, msg: RendererMsg) -> Option<Cmd> {
    match msg {
        RendererMsg::Ready { origin } => {
            if model.renderer_ready {
                // The process-wide flag is monotonic and the queue drains
                // only once. A later signal means one panel's renderer
                // booted fresh (e.g., rebuilt after hibernation), so hand
                // that panel its payload back.
                return if model.registry.contains(&origin) {
                    tracing::info!("Renderer re-signaled ready for {}, re-delivering", origin);
                    Some(Cmd::DeliverPreview { file: origin })
                } else {
                    tracing::debug!("Readiness signal from untracked panel {}", origin);
                    None
                };
            }

            model.renderer_ready = true;
            tracing::info!("Renderer ready (signaled from {})", origin);

            let queued = model.pending.drain();
            if queued.is_empty() {
                return None;
            }

            tracing::info!("Delivering {} queued preview(s)", queued.len());
            // One command per file: a failed delivery is logged by the
            // runtime and never blocks the remaining queued files.
            Some(Cmd::batch(
                queued
                    .into_iter()
                    .map(|file| Cmd::DeliverPreview { file })
                    .collect(),
            ))
        }
        RendererMsg::Unknown { origin, kind } => {
            tracing::warn!("Unrecognized message type \"{}\" from {}", kind, origin);
            None
        }
    }
}
