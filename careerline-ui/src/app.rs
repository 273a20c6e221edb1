#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;
use std::rc::Rc;

use careerline_core::{
    ChartAdapter, ClickOutcome, ClickTarget, HeroCharts, ItemState, TimelineController,
    YearRecord,
};
use yew::prelude::*;

use crate::chart_js::{ChartHandle, ChartJsAdapter};
use crate::lightbox::LightboxSurface;

/// Everything the rendered timeline shares across callbacks.
pub struct TimelineApp {
    controller: RefCell<TimelineController<ChartHandle>>,
    charts: RefCell<ChartJsAdapter>,
    hero: RefCell<HeroCharts<ChartHandle>>,
    lightbox: LightboxSurface,
}

impl TimelineApp {
    pub fn new(
        controller: TimelineController<ChartHandle>,
        charts: ChartJsAdapter,
        hero: HeroCharts<ChartHandle>,
        lightbox: LightboxSurface,
    ) -> Self {
        Self {
            controller: RefCell::new(controller),
            charts: RefCell::new(charts),
            hero: RefCell::new(hero),
            lightbox,
        }
    }

    fn dispatch(&self, index: usize, target: ClickTarget) -> ClickOutcome {
        let outcome = self.controller.borrow_mut().handle_click(index, target);
        if let ClickOutcome::Preview(_) = outcome {
            self.lightbox.apply(self.controller.borrow().lightbox());
        }
        outcome
    }

    /// Creates the radar of the open item once its graph pane is on screen.
    fn draw_pending_chart(&self) {
        let mut controller = self.controller.borrow_mut();
        let Some(index) = controller.selected() else {
            return;
        };
        let mut charts = self.charts.borrow_mut();
        if let Err(err) = controller.ensure_chart(index, &mut *charts) {
            log::warn!("radar for timeline item {index} skipped: {err}");
        }
    }

    pub fn close_lightbox(&self) {
        let mut controller = self.controller.borrow_mut();
        controller.lightbox_mut().close();
        self.lightbox.apply(controller.lightbox());
    }

    fn release(&self) {
        let mut charts = self.charts.borrow_mut();
        self.controller.borrow_mut().release_charts(&mut *charts);

        let mut hero = self.hero.borrow_mut();
        for handle in [hero.skills.take(), hero.careers.take()].into_iter().flatten() {
            charts.destroy(handle);
        }
    }
}

#[derive(Properties)]
pub struct TimelineViewProps {
    pub app: Rc<TimelineApp>,
}

impl PartialEq for TimelineViewProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.app, &other.app)
    }
}

/// Snapshot of one item taken while rendering.
struct ItemView<'a> {
    index: usize,
    record: &'a YearRecord,
    state: ItemState,
    is_future: bool,
    toggle_label: &'static str,
    canvas_id: String,
}

#[function_component(TimelineView)]
pub fn timeline_view(props: &TimelineViewProps) -> Html {
    let trigger = use_force_update();

    {
        let app = props.app.clone();
        use_effect(move || {
            app.draw_pending_chart();
            || ()
        });
    }

    {
        let app = props.app.clone();
        use_effect_with((), move |_| move || app.release());
    }

    let dispatch = {
        let app = props.app.clone();
        Callback::from(move |(index, target): (usize, ClickTarget)| {
            match app.dispatch(index, target) {
                ClickOutcome::Ignored | ClickOutcome::Preview(_) => {}
                _ => trigger.force_update(),
            }
        })
    };

    let controller = props.app.controller.borrow();
    let items: Vec<ItemView> = controller
        .records()
        .iter()
        .enumerate()
        .map(|(index, record)| ItemView {
            index,
            record,
            state: controller.state(index),
            is_future: controller.era(index).is_some_and(|era| era.is_future()),
            toggle_label: controller.toggle_label(index),
            canvas_id: controller.config().item_chart_mount(index),
        })
        .collect();

    html! {
        <>
            { for items.iter().map(|item| render_item(item, &dispatch)) }
        </>
    }
}

fn click_handler(
    dispatch: &Callback<(usize, ClickTarget)>,
    index: usize,
    target: ClickTarget,
) -> Callback<MouseEvent> {
    let dispatch = dispatch.clone();
    Callback::from(move |event: MouseEvent| {
        event.stop_propagation();
        dispatch.emit((index, target.clone()));
    })
}

fn render_item(item: &ItemView, dispatch: &Callback<(usize, ClickTarget)>) -> Html {
    let index = item.index;
    let record = item.record;
    let is_open = item.state.is_open();
    let show_graph = item.state == ItemState::OpenGraph;

    let control_display = |shown: &str| {
        if is_open {
            format!("display: {shown};")
        } else {
            "display: none;".to_string()
        }
    };
    let pane_display = |visible: bool| {
        if visible {
            "display: block;"
        } else {
            "display: none;"
        }
    };

    html! {
        <div
            class={classes!(
                "timeline-item",
                item.is_future.then_some("future-mode"),
                is_open.then_some("active")
            )}
            onclick={click_handler(dispatch, index, ClickTarget::Body)}
        >
            <div class="year-header" onclick={click_handler(dispatch, index, ClickTarget::Header)}>
                <div class="year-bubble" onclick={click_handler(dispatch, index, ClickTarget::YearBubble)}>
                    { record.year.clone() }
                </div>
                <button
                    class="toggle-stats-btn"
                    data-index={index.to_string()}
                    style={control_display("flex")}
                    onclick={click_handler(dispatch, index, ClickTarget::StatsToggle)}
                >
                    { item.toggle_label }
                </button>
            </div>
            <div class="item-content">
                <div class="content-header" onclick={click_handler(dispatch, index, ClickTarget::ContentHeader)}>
                    <h3>{ record.title.clone() }</h3>
                    <button
                        class="close-accordion-btn"
                        data-index={index.to_string()}
                        style={control_display("block")}
                        onclick={click_handler(dispatch, index, ClickTarget::CloseControl)}
                    >
                        { "✕" }
                    </button>
                </div>
                <div class="text-view" id={format!("text-view-{index}")} style={pane_display(!show_graph)}>
                    <p>{ record.description.clone() }</p>
                    <div class="ai-note">
                        <strong>{ "AI Analysis:" }</strong>
                        { " " }
                        { record.ai_summary.clone() }
                    </div>
                    <div class="gallery-thumbs">
                        {
                            for record.images.iter().map(|src| html! {
                                <img
                                    src={src.clone()}
                                    class="thumb"
                                    onclick={click_handler(dispatch, index, ClickTarget::Thumbnail(src.clone()))}
                                />
                            })
                        }
                    </div>
                </div>
                <div class="graph-view" id={format!("graph-view-{index}")} style={pane_display(show_graph)}>
                    <canvas id={item.canvas_id.clone()}></canvas>
                </div>
            </div>
        </div>
    }
}
