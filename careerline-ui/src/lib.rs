//! Browser front end for the career timeline, compiled to WebAssembly.

pub mod chart_js;
pub mod logger;
pub mod startup;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod lightbox;
#[cfg(target_arch = "wasm32")]
mod loader;
#[cfg(target_arch = "wasm32")]
mod styles;

use careerline_core::TimelineConfig;
use serde::Deserialize;

/// Shown in the app mount when both documents load but hold no events.
pub const NO_DATA_MESSAGE: &str = "No timeline data available.";

/// Options accepted by `start_timeline`: any `TimelineConfig` field plus the
/// console log level.
#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct StartOptions {
    #[serde(flatten)]
    pub timeline: TimelineConfig,
    #[serde(default)]
    pub log_level: Option<String>,
}

#[cfg(target_arch = "wasm32")]
mod bootstrap {
    use std::rc::Rc;

    use careerline_core::{render_hero_charts, TimelineConfig, TimelineController};
    use serde_wasm_bindgen::from_value;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::spawn_local;
    use web_sys::{Document, Element};

    use crate::app::{TimelineApp, TimelineView, TimelineViewProps};
    use crate::chart_js::ChartJsAdapter;
    use crate::lightbox::LightboxSurface;
    use crate::startup::{startup_outcome, Startup};
    use crate::{loader, logger, styles, StartOptions, NO_DATA_MESSAGE};

    /// Starts the timeline once the page's DOM is ready.
    #[wasm_bindgen]
    pub fn start_timeline(options: Option<JsValue>) -> Result<(), JsValue> {
        console_error_panic_hook::set_once();

        let options: StartOptions = match options {
            Some(value) if !value.is_undefined() && !value.is_null() => from_value(value)
                .map_err(|err| JsValue::from_str(&format!("Could not read options: {err}")))?,
            _ => StartOptions::default(),
        };
        logger::init(logger::parse_level(options.log_level.as_deref()));

        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| JsValue::from_str("No document available"))?;

        let config = options.timeline;
        if document.ready_state() == "loading" {
            let on_ready = Closure::once_into_js(move || spawn_local(run(config)));
            document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())?;
        } else {
            spawn_local(run(config));
        }
        Ok(())
    }

    async fn run(config: TimelineConfig) {
        let Some(document) = web_sys::window().and_then(|window| window.document()) else {
            log::error!("no document to render into");
            return;
        };
        if let Err(err) = styles::ensure_styles(&document) {
            log::warn!("default styles not injected: {err:?}");
        }
        let Some(mount) = document.get_element_by_id(&config.app_mount) else {
            log::error!("app mount `{}` not found", config.app_mount);
            return;
        };

        let loaded = loader::load_timeline(&config).await;
        let records = match startup_outcome(loaded, &config) {
            Startup::Failed(message) => {
                show_message(&document, &mount, &message, true);
                return;
            }
            Startup::Empty => {
                show_message(&document, &mount, NO_DATA_MESSAGE, false);
                return;
            }
            Startup::Render(records) => records,
        };
        let Some(latest) = records.last() else {
            return;
        };

        let mut charts = ChartJsAdapter::new(document.clone());
        let hero = render_hero_charts(&mut charts, latest, &config);
        let lightbox = LightboxSurface::locate(&document, &config);
        let controller = TimelineController::new(records, config.clone());
        let app = Rc::new(TimelineApp::new(controller, charts, hero, lightbox));

        wire_lightbox_close(&document, &config, app.clone());
        yew::Renderer::<TimelineView>::with_root_and_props(mount, TimelineViewProps { app })
            .render();
    }

    fn wire_lightbox_close(document: &Document, config: &TimelineConfig, app: Rc<TimelineApp>) {
        let close = match document.query_selector(&config.modal_close_selector) {
            Ok(Some(close)) => close,
            Ok(None) => {
                log::warn!("lightbox close control `{}` not found", config.modal_close_selector);
                return;
            }
            Err(err) => {
                log::warn!("invalid lightbox close selector: {err:?}");
                return;
            }
        };

        let on_close = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
            app.close_lightbox();
        });
        if let Err(err) =
            close.add_event_listener_with_callback("click", on_close.as_ref().unchecked_ref())
        {
            log::warn!("lightbox close control not wired: {err:?}");
        }
        on_close.forget();
    }

    fn show_message(document: &Document, mount: &Element, text: &str, is_error: bool) {
        mount.set_inner_html("");
        let rendered = document.create_element("div").and_then(|message| {
            let class = if is_error {
                "timeline-message is-error"
            } else {
                "timeline-message"
            };
            message.set_class_name(class);
            message.set_text_content(Some(text));
            mount.append_child(&message)
        });
        if let Err(err) = rendered {
            log::error!("could not render message: {err:?}");
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use bootstrap::start_timeline;

#[cfg(not(target_arch = "wasm32"))]
pub fn start_timeline(_: Option<wasm_bindgen::JsValue>) -> Result<(), wasm_bindgen::JsValue> {
    Err(wasm_bindgen::JsValue::from_str(
        "careerline-ui only supports the wasm32 target",
    ))
}
