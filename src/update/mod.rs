//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod preview;
mod renderer;

use crate::commands::Cmd;
use crate::messages::{AppMsg, Msg};
use crate::model::AppModel;

pub use preview::update_preview;
pub use renderer::update_renderer;

/// Main update function - dispatches to sub-handlers
pub fn update(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    match msg {
        Msg::Preview(m) => preview::update_preview(model, m),
        Msg::Renderer(m) => renderer::update_renderer(model, m),
        Msg::App(AppMsg::Quit) => Some(Cmd::Quit),
    }
}
