//! Accordion state for the rendered timeline items.
//!
//! At most one item is open at a time. The open item is tracked as a single
//! `selected` index and every open goes through [`TimelineController::open`],
//! which closes the previous selection first. Each open item shows either its
//! text pane or its graph pane; the graph pane's radar is created the first
//! time it becomes visible and is kept for the rest of the session.

use crate::chart::{ChartAdapter, RadarSpec};
use crate::{ChartError, Era, Lightbox, TimelineConfig, YearRecord};

/// Label of the stats toggle while the text pane is shown.
pub const SHOW_STATS_LABEL: &str = "📊 Stats";
/// Label of the stats toggle while the graph pane is shown.
pub const SHOW_TEXT_LABEL: &str = "📝 Text";

/// Visible state of one timeline item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemState {
    Closed,
    OpenText,
    OpenGraph,
}

impl ItemState {
    pub fn is_open(self) -> bool {
        !matches!(self, ItemState::Closed)
    }
}

/// Region of an item that received a click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickTarget {
    YearBubble,
    StatsToggle,
    CloseControl,
    Thumbnail(String),
    Header,
    ContentHeader,
    Body,
}

/// What a click changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    Opened(usize),
    Closed(usize),
    ShowGraph(usize),
    ShowText(usize),
    Preview(String),
    Ignored,
}

#[derive(Debug)]
struct ItemView<H> {
    era: Era,
    is_graph_view: bool,
    chart: Option<H>,
}

/// Owns the merged records and the per-item view state.
#[derive(Debug)]
pub struct TimelineController<H> {
    config: TimelineConfig,
    records: Vec<YearRecord>,
    items: Vec<ItemView<H>>,
    selected: Option<usize>,
    lightbox: Lightbox,
}

impl<H> TimelineController<H> {
    pub fn new(records: Vec<YearRecord>, config: TimelineConfig) -> Self {
        let len = records.len();
        let items = (0..len)
            .map(|index| ItemView {
                era: Era::for_position(index, len),
                is_graph_view: false,
                chart: None,
            })
            .collect();
        Self {
            config,
            records,
            items,
            selected: None,
            lightbox: Lightbox::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    pub fn records(&self) -> &[YearRecord] {
        &self.records
    }

    /// Index of the open item, if any.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn era(&self, index: usize) -> Option<Era> {
        self.items.get(index).map(|item| item.era)
    }

    pub fn state(&self, index: usize) -> ItemState {
        match self.items.get(index) {
            Some(item) if self.selected == Some(index) => {
                if item.is_graph_view {
                    ItemState::OpenGraph
                } else {
                    ItemState::OpenText
                }
            }
            _ => ItemState::Closed,
        }
    }

    pub fn is_open(&self, index: usize) -> bool {
        self.state(index).is_open()
    }

    pub fn has_chart(&self, index: usize) -> bool {
        self.items
            .get(index)
            .is_some_and(|item| item.chart.is_some())
    }

    #[cfg(test)]
    pub(crate) fn chart_count(&self) -> usize {
        self.items.iter().filter(|item| item.chart.is_some()).count()
    }

    /// Text of the item's stats toggle.
    pub fn toggle_label(&self, index: usize) -> &'static str {
        match self.state(index) {
            ItemState::OpenGraph => SHOW_TEXT_LABEL,
            _ => SHOW_STATS_LABEL,
        }
    }

    pub fn lightbox(&self) -> &Lightbox {
        &self.lightbox
    }

    pub fn lightbox_mut(&mut self) -> &mut Lightbox {
        &mut self.lightbox
    }

    /// Routes a click on item `index` to its transition.
    ///
    /// Thumbnails open the lightbox. Header, content header and body clicks
    /// never open or close the item.
    pub fn handle_click(&mut self, index: usize, target: ClickTarget) -> ClickOutcome {
        if index >= self.items.len() {
            return ClickOutcome::Ignored;
        }
        match target {
            ClickTarget::YearBubble => {
                if self.is_open(index) {
                    self.close(index);
                    ClickOutcome::Closed(index)
                } else {
                    self.open(index);
                    ClickOutcome::Opened(index)
                }
            }
            ClickTarget::CloseControl => {
                if self.close(index) {
                    ClickOutcome::Closed(index)
                } else {
                    ClickOutcome::Ignored
                }
            }
            ClickTarget::StatsToggle => match self.toggle_stats(index) {
                ItemState::OpenGraph => ClickOutcome::ShowGraph(index),
                _ => ClickOutcome::ShowText(index),
            },
            ClickTarget::Thumbnail(src) => {
                self.lightbox.open(src.clone());
                ClickOutcome::Preview(src)
            }
            ClickTarget::Header | ClickTarget::ContentHeader | ClickTarget::Body => {
                ClickOutcome::Ignored
            }
        }
    }

    /// Opens `index` in its text pane, closing the open item first.
    pub fn open(&mut self, index: usize) {
        if index >= self.items.len() {
            return;
        }
        if let Some(previous) = self.selected {
            if previous != index {
                self.close(previous);
            }
        }
        debug_assert!(self.selected.is_none() || self.selected == Some(index));

        self.items[index].is_graph_view = false;
        self.selected = Some(index);
        log::debug!("opened timeline item {index}");
    }

    /// Closes `index` if it is open and resets it to the text pane.
    ///
    /// Returns `false` when the item was already closed.
    pub fn close(&mut self, index: usize) -> bool {
        if self.selected != Some(index) {
            return false;
        }
        if let Some(item) = self.items.get_mut(index) {
            item.is_graph_view = false;
        }
        self.selected = None;
        log::debug!("closed timeline item {index}");
        true
    }

    /// Flips between text and graph panes, opening a closed item first so a
    /// single toggle on a closed item lands on the graph pane.
    pub fn toggle_stats(&mut self, index: usize) -> ItemState {
        if index >= self.items.len() {
            return ItemState::Closed;
        }
        if !self.is_open(index) {
            self.open(index);
        }
        let item = &mut self.items[index];
        item.is_graph_view = !item.is_graph_view;
        self.state(index)
    }

    /// Creates the radar of `index` if its graph pane is showing and it has
    /// no chart yet. Returns whether a chart was created.
    ///
    /// Charts are never recreated: once an item has a handle, later graph
    /// toggles reuse it.
    pub fn ensure_chart<A>(&mut self, index: usize, adapter: &mut A) -> Result<bool, ChartError>
    where
        A: ChartAdapter<Handle = H>,
    {
        if self.state(index) != ItemState::OpenGraph || self.has_chart(index) {
            return Ok(false);
        }
        let era = self.items[index].era;
        let spec = RadarSpec::item_matches(&self.records[index], era, &self.config);
        let mount = self.config.item_chart_mount(index);

        let handle = adapter.render_item_radar(&mount, &spec)?;
        self.items[index].chart = Some(handle);
        log::debug!("created radar for timeline item {index} on `{mount}`");
        Ok(true)
    }

    /// Destroys every chart created so far.
    pub fn release_charts<A>(&mut self, adapter: &mut A)
    where
        A: ChartAdapter<Handle = H>,
    {
        for item in &mut self.items {
            if let Some(handle) = item.chart.take() {
                adapter.destroy(handle);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::testing::RecordingAdapter;
    use crate::{CareerMatch, SkillMatrix, NO_ANALYSIS_PLACEHOLDER};

    fn records(count: usize) -> Vec<YearRecord> {
        (0..count)
            .map(|i| YearRecord {
                year: (2018 + i).to_string(),
                title: format!("Year {i}"),
                description: String::new(),
                images: vec![format!("img/{i}.png")],
                skills: SkillMatrix::new(),
                matches: vec![CareerMatch {
                    role: "Engineer".to_string(),
                    match_percentage: 70.0,
                }],
                ai_summary: NO_ANALYSIS_PLACEHOLDER.to_string(),
            })
            .collect()
    }

    fn controller(count: usize) -> TimelineController<usize> {
        TimelineController::new(records(count), TimelineConfig::default())
    }

    fn open_items(ctl: &TimelineController<usize>) -> Vec<usize> {
        (0..ctl.len()).filter(|&i| ctl.is_open(i)).collect()
    }

    #[test]
    fn starts_with_everything_closed() {
        let ctl = controller(3);
        assert_eq!(ctl.selected(), None);
        assert!(open_items(&ctl).is_empty());
        assert_eq!(ctl.toggle_label(0), SHOW_STATS_LABEL);
    }

    #[test]
    fn opening_another_item_closes_the_first() {
        let mut ctl = controller(3);

        assert_eq!(ctl.handle_click(0, ClickTarget::YearBubble), ClickOutcome::Opened(0));
        ctl.handle_click(0, ClickTarget::StatsToggle);
        assert_eq!(ctl.state(0), ItemState::OpenGraph);

        assert_eq!(ctl.handle_click(2, ClickTarget::YearBubble), ClickOutcome::Opened(2));
        assert_eq!(ctl.state(0), ItemState::Closed);
        assert_eq!(ctl.state(2), ItemState::OpenText);
        assert_eq!(ctl.toggle_label(0), SHOW_STATS_LABEL);
        assert_eq!(open_items(&ctl), vec![2]);
    }

    #[test]
    fn year_bubble_on_open_item_closes_it() {
        let mut ctl = controller(2);
        ctl.handle_click(1, ClickTarget::YearBubble);
        assert_eq!(ctl.handle_click(1, ClickTarget::YearBubble), ClickOutcome::Closed(1));
        assert_eq!(ctl.state(1), ItemState::Closed);
        assert_eq!(ctl.selected(), None);
    }

    #[test]
    fn stats_toggle_on_closed_item_goes_straight_to_graph() {
        let mut ctl = controller(3);
        ctl.open(0);

        assert_eq!(ctl.handle_click(1, ClickTarget::StatsToggle), ClickOutcome::ShowGraph(1));
        assert_eq!(ctl.state(1), ItemState::OpenGraph);
        assert_eq!(ctl.state(0), ItemState::Closed);
        assert_eq!(ctl.toggle_label(1), SHOW_TEXT_LABEL);
    }

    #[test]
    fn stats_toggle_flips_between_panes() {
        let mut ctl = controller(1);
        ctl.open(0);
        assert_eq!(ctl.toggle_stats(0), ItemState::OpenGraph);
        assert_eq!(ctl.toggle_stats(0), ItemState::OpenText);
        assert_eq!(ctl.toggle_stats(0), ItemState::OpenGraph);
    }

    #[test]
    fn reopening_always_lands_on_text() {
        let mut ctl = controller(2);
        ctl.handle_click(0, ClickTarget::StatsToggle);
        assert_eq!(ctl.state(0), ItemState::OpenGraph);

        ctl.handle_click(0, ClickTarget::CloseControl);
        assert_eq!(ctl.state(0), ItemState::Closed);

        ctl.handle_click(0, ClickTarget::YearBubble);
        assert_eq!(ctl.state(0), ItemState::OpenText);
    }

    #[test]
    fn close_control_only_affects_its_own_item() {
        let mut ctl = controller(2);
        ctl.open(0);
        assert_eq!(ctl.handle_click(1, ClickTarget::CloseControl), ClickOutcome::Ignored);
        assert_eq!(ctl.state(0), ItemState::OpenText);
    }

    #[test]
    fn excluded_regions_never_toggle() {
        let mut ctl = controller(2);
        for target in [ClickTarget::Header, ClickTarget::ContentHeader, ClickTarget::Body] {
            assert_eq!(ctl.handle_click(0, target.clone()), ClickOutcome::Ignored);
            assert_eq!(ctl.state(0), ItemState::Closed);
        }

        ctl.open(1);
        assert_eq!(ctl.handle_click(1, ClickTarget::Body), ClickOutcome::Ignored);
        assert_eq!(ctl.state(1), ItemState::OpenText);
    }

    #[test]
    fn thumbnail_opens_lightbox_without_touching_accordion() {
        let mut ctl = controller(2);
        let outcome = ctl.handle_click(1, ClickTarget::Thumbnail("img/1.png".to_string()));

        assert_eq!(outcome, ClickOutcome::Preview("img/1.png".to_string()));
        assert_eq!(ctl.state(1), ItemState::Closed);
        assert!(ctl.lightbox().is_visible());
        assert_eq!(ctl.lightbox().source(), Some("img/1.png"));
    }

    #[test]
    fn out_of_range_clicks_are_ignored() {
        let mut ctl = controller(2);
        assert_eq!(ctl.handle_click(5, ClickTarget::YearBubble), ClickOutcome::Ignored);
        assert_eq!(ctl.toggle_stats(5), ItemState::Closed);
        assert_eq!(ctl.selected(), None);
    }

    #[test]
    fn chart_is_created_once_per_item() {
        let mut ctl = controller(3);
        let mut adapter = RecordingAdapter::default();

        for _ in 0..4 {
            ctl.handle_click(1, ClickTarget::StatsToggle);
            ctl.ensure_chart(1, &mut adapter).unwrap();
        }
        ctl.handle_click(1, ClickTarget::CloseControl);
        ctl.handle_click(1, ClickTarget::StatsToggle);
        assert!(!ctl.ensure_chart(1, &mut adapter).unwrap());

        assert_eq!(adapter.count("item_radar"), 1);
        assert_eq!(adapter.calls[0].1, "chart-1");
        assert!(ctl.has_chart(1));
        assert_eq!(ctl.chart_count(), 1);
    }

    #[test]
    fn chart_waits_for_the_graph_pane() {
        let mut ctl = controller(2);
        let mut adapter = RecordingAdapter::default();

        ctl.open(0);
        assert!(!ctl.ensure_chart(0, &mut adapter).unwrap());
        assert!(!ctl.has_chart(0));

        ctl.toggle_stats(0);
        assert!(ctl.ensure_chart(0, &mut adapter).unwrap());
    }

    #[test]
    fn failed_chart_is_not_recorded() {
        let mut ctl = controller(1);
        let mut adapter = RecordingAdapter::with_missing("chart-0");

        ctl.toggle_stats(0);
        assert_eq!(
            ctl.ensure_chart(0, &mut adapter),
            Err(ChartError::MissingMount("chart-0".to_string()))
        );
        assert!(!ctl.has_chart(0));
        assert_eq!(ctl.state(0), ItemState::OpenGraph);
    }

    #[test]
    fn later_items_use_the_future_era() {
        let ctl = controller(4);
        let eras: Vec<Era> = (0..4).filter_map(|i| ctl.era(i)).collect();
        assert_eq!(eras, vec![Era::Past, Era::Past, Era::Past, Era::Future]);
    }

    #[test]
    fn release_destroys_every_chart() {
        let mut ctl = controller(3);
        let mut adapter = RecordingAdapter::default();
        for index in [0, 2] {
            ctl.toggle_stats(index);
            ctl.ensure_chart(index, &mut adapter).unwrap();
        }

        ctl.release_charts(&mut adapter);
        assert_eq!(adapter.destroyed, vec![1, 2]);
        assert_eq!(ctl.chart_count(), 0);
    }
}
