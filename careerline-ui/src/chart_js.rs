//! Chart.js configurations for the chart specs, and the browser adapter that
//! hands them to the library.

use careerline_core::{BarSpec, RadarSpec};
use serde_json::{json, Value};

/// Filled radar used by the hero skill chart.
pub fn radar_config(spec: &RadarSpec) -> Value {
    let colors = spec.palette.colors();
    json!({
        "type": "radar",
        "data": {
            "labels": spec.labels,
            "datasets": [{
                "label": spec.dataset_label,
                "data": spec.values,
                "fill": true,
                "backgroundColor": colors.fill,
                "borderColor": colors.border,
                "pointBackgroundColor": colors.border
            }]
        },
        "options": {
            "maintainAspectRatio": false,
            "scales": {
                "r": {
                    "suggestedMin": 0,
                    "suggestedMax": 100,
                    "grid": { "color": colors.grid }
                }
            }
        }
    })
}

/// Horizontal bar chart on a fixed 0..100 axis.
pub fn bar_config(spec: &BarSpec) -> Value {
    let colors = spec.palette.colors();
    json!({
        "type": "bar",
        "data": {
            "labels": spec.labels,
            "datasets": [{
                "label": spec.dataset_label,
                "data": spec.values,
                "backgroundColor": colors.fill,
                "borderColor": colors.border,
                "borderWidth": 1
            }]
        },
        "options": {
            "indexAxis": "y",
            "maintainAspectRatio": false,
            "scales": {
                "x": { "beginAtZero": true, "max": 100 }
            }
        }
    })
}

/// Per-item radar. Wrapped labels become arrays of lines, which Chart.js
/// draws as multi-line point labels.
pub fn item_radar_config(spec: &RadarSpec) -> Value {
    let colors = spec.palette.colors();
    let labels: Vec<Vec<&str>> = spec
        .labels
        .iter()
        .map(|label| label.split('\n').collect())
        .collect();
    let text_color = colors.text.unwrap_or("#666");

    json!({
        "type": "radar",
        "data": {
            "labels": labels,
            "datasets": [{
                "label": spec.dataset_label,
                "data": spec.values,
                "backgroundColor": colors.fill,
                "borderColor": colors.border,
                "pointBackgroundColor": colors.border,
                "fill": true
            }]
        },
        "options": {
            "maintainAspectRatio": false,
            "layout": {
                "padding": { "top": 30, "right": 30, "bottom": 30, "left": 30 }
            },
            "scales": {
                "r": {
                    "beginAtZero": true,
                    "max": 100,
                    "pointLabels": {
                        "font": { "size": 11, "lineHeight": 1.2 },
                        "color": text_color,
                        "padding": 18
                    },
                    "grid": { "color": colors.grid },
                    "angleLines": { "color": colors.grid },
                    "ticks": { "display": false }
                }
            },
            "plugins": {
                "legend": { "display": false }
            }
        }
    })
}

#[cfg(target_arch = "wasm32")]
pub use backend::{ChartHandle, ChartJsAdapter};

#[cfg(target_arch = "wasm32")]
mod backend {
    use careerline_core::{BarSpec, ChartAdapter, ChartError, RadarSpec};
    use serde::Serialize;
    use serde_json::Value;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use web_sys::{Document, HtmlCanvasElement};

    #[wasm_bindgen(inline_js = "
export function careerline_create_chart(canvas, config, percentTooltip) {
    if (typeof Chart === 'undefined') {
        throw new Error('Chart.js is not loaded');
    }
    if (percentTooltip) {
        config.options.plugins = config.options.plugins || {};
        config.options.plugins.tooltip = {
            callbacks: {
                label: (context) => context.dataset.label + ': ' + context.parsed.r + '%',
            },
        };
    }
    return new Chart(canvas.getContext('2d'), config);
}

export function careerline_destroy_chart(chart) {
    if (chart && typeof chart.destroy === 'function') {
        chart.destroy();
    }
}
")]
    extern "C" {
        #[wasm_bindgen(catch)]
        fn careerline_create_chart(
            canvas: &HtmlCanvasElement,
            config: &JsValue,
            percent_tooltip: bool,
        ) -> Result<JsValue, JsValue>;

        fn careerline_destroy_chart(chart: &JsValue);
    }

    /// A live Chart.js instance.
    #[derive(Debug)]
    pub struct ChartHandle(JsValue);

    /// Draws charts onto canvases looked up by element id.
    pub struct ChartJsAdapter {
        document: Document,
    }

    impl ChartJsAdapter {
        pub fn new(document: Document) -> Self {
            Self { document }
        }

        fn draw(
            &self,
            mount: &str,
            config: &Value,
            percent_tooltip: bool,
        ) -> Result<ChartHandle, ChartError> {
            let canvas = self
                .document
                .get_element_by_id(mount)
                .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
                .ok_or_else(|| ChartError::MissingMount(mount.to_string()))?;

            let backend_error = |message: String| ChartError::Backend {
                mount: mount.to_string(),
                message,
            };
            let js_config = config
                .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
                .map_err(|err| backend_error(err.to_string()))?;

            careerline_create_chart(&canvas, &js_config, percent_tooltip)
                .map(ChartHandle)
                .map_err(|err| backend_error(format!("{err:?}")))
        }
    }

    impl ChartAdapter for ChartJsAdapter {
        type Handle = ChartHandle;

        fn render_radar(&mut self, mount: &str, spec: &RadarSpec) -> Result<ChartHandle, ChartError> {
            self.draw(mount, &super::radar_config(spec), false)
        }

        fn render_bar(&mut self, mount: &str, spec: &BarSpec) -> Result<ChartHandle, ChartError> {
            self.draw(mount, &super::bar_config(spec), false)
        }

        fn render_item_radar(
            &mut self,
            mount: &str,
            spec: &RadarSpec,
        ) -> Result<ChartHandle, ChartError> {
            self.draw(mount, &super::item_radar_config(spec), true)
        }

        fn destroy(&mut self, handle: ChartHandle) {
            careerline_destroy_chart(&handle.0);
        }
    }
}
