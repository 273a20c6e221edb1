#![cfg(target_arch = "wasm32")]

use careerline_core::{Lightbox, TimelineConfig};
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, HtmlImageElement};

/// The page's modal overlay and its image.
pub struct LightboxSurface {
    modal: Option<HtmlElement>,
    image: Option<HtmlImageElement>,
}

impl LightboxSurface {
    pub fn locate(document: &Document, config: &TimelineConfig) -> Self {
        let modal = document
            .get_element_by_id(&config.modal_id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        let image = document
            .get_element_by_id(&config.modal_image_id)
            .and_then(|el| el.dyn_into::<HtmlImageElement>().ok());
        if modal.is_none() || image.is_none() {
            log::warn!(
                "lightbox elements `{}`/`{}` not found; previews are disabled",
                config.modal_id,
                config.modal_image_id
            );
        }
        Self { modal, image }
    }

    /// Mirrors `state` onto the overlay.
    pub fn apply(&self, state: &Lightbox) {
        let (Some(modal), Some(image)) = (&self.modal, &self.image) else {
            return;
        };
        if let Some(src) = state.source() {
            image.set_src(src);
        }
        let display = if state.is_visible() { "block" } else { "none" };
        if let Err(err) = modal.style().set_property("display", display) {
            log::warn!("could not update lightbox: {err:?}");
        }
    }
}
