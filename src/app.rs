use crate::api::{CountrySource, FetchError};
use crate::country::{Country, CountryFilter, SortOrder, collate};
use crate::pagination::{PageSelector, page_window};

pub const DEFAULT_ITEMS_PER_PAGE: usize = 56;

/// Everything a control in the UI can ask the directory to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Sort,
    Filter(CountryFilter),
    Paginate(usize),
}

/// How many card rows and columns fit on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CardViewport {
    pub columns: usize,
    pub rows: usize,
}

/// Main application state.
pub struct App {
    pub should_quit: bool,
    pub show_help: bool,
    pub loading: bool,

    // Fetched once, never mutated afterwards
    pub all_items: Vec<Country>,
    // Filtered (and possibly sorted) view of all_items
    pub visible_items: Vec<Country>,

    pub current_page: usize,
    pub items_per_page: usize,
    pub sort_order: SortOrder,

    // Card grid scrolling, in rows
    pub card_scroll: usize,
    pub viewport: CardViewport,

    pub status_msg: String,
}

impl App {
    pub fn new(items_per_page: usize) -> Self {
        Self {
            should_quit: false,
            show_help: false,
            loading: true,

            all_items: Vec::new(),
            visible_items: Vec::new(),

            current_page: 1,
            items_per_page,
            sort_order: SortOrder::Ascending,

            card_scroll: 0,
            viewport: CardViewport::default(),

            status_msg: "Loading countries...".to_string(),
        }
    }

    /// Initial data load.
    pub async fn init(&mut self, source: &dyn CountrySource) {
        let result = source.fetch_all().await;
        self.finish_fetch(result);
    }

    /// Apply the outcome of the one and only fetch. Failures are logged and
    /// otherwise ignored, leaving the directory empty.
    pub fn finish_fetch(&mut self, result: Result<Vec<Country>, FetchError>) {
        self.loading = false;
        match result {
            Ok(countries) => {
                tracing::info!(count = countries.len(), "country data loaded");
                self.status_msg = format!("{} loaded", country_count(countries.len()));
                self.visible_items = countries.clone();
                self.all_items = countries;
            }
            Err(e) => {
                tracing::error!(error = %e, "error fetching country data");
                self.status_msg.clear();
            }
        }
    }

    /// Route a control activation to its handler.
    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Sort => self.sort(),
            Action::Filter(filter) => self.filter(filter),
            Action::Paginate(page) => self.paginate(page),
        }
    }

    /// Sort the visible list by name in the current direction, then flip it.
    pub fn sort(&mut self) {
        let order = self.sort_order;
        let mut sorted = self.visible_items.clone();
        sorted.sort_by(|a, b| collate(&a.name, &b.name));
        if order == SortOrder::Descending {
            sorted.reverse();
        }
        self.visible_items = sorted;
        self.sort_order = order.toggled();
        self.card_scroll = 0;
        tracing::debug!(?order, "sorted visible countries");
    }

    /// Re-derive the visible list from the full list. Any earlier sort is
    /// discarded.
    pub fn filter(&mut self, filter: CountryFilter) {
        self.visible_items = self
            .all_items
            .iter()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect();
        self.current_page = 1;
        self.card_scroll = 0;
        let count = country_count(self.visible_items.len());
        self.status_msg = format!("{}: {count}", filter.label());
        tracing::debug!(?filter, count = self.visible_items.len(), "filtered countries");
    }

    /// Jump to a 1-based page. Not validated against the page count.
    pub fn paginate(&mut self, page: usize) {
        self.current_page = page;
        self.card_scroll = 0;
        tracing::debug!(page, "changed page");
    }

    /// Countries shown on the current page.
    pub fn page_window(&self) -> &[Country] {
        page_window(&self.visible_items, self.current_page, self.items_per_page)
    }

    pub fn page_selector(&self) -> PageSelector {
        PageSelector {
            items_per_page: self.items_per_page,
            total_items: self.visible_items.len(),
            current_page: self.current_page,
        }
    }

    /// Step to the neighbouring page button, staying on existing pages.
    pub fn next_page(&mut self) {
        let pages = self.page_selector().page_count();
        if self.current_page < pages {
            self.paginate(self.current_page + 1);
        }
    }

    pub fn prev_page(&mut self) {
        let pages = self.page_selector().page_count();
        if pages == 0 {
            return;
        }
        if self.current_page > pages {
            self.paginate(pages);
        } else if self.current_page > 1 {
            self.paginate(self.current_page - 1);
        }
    }

    pub fn first_page(&mut self) {
        if self.page_selector().page_count() > 0 {
            self.paginate(1);
        }
    }

    pub fn last_page(&mut self) {
        let pages = self.page_selector().page_count();
        if pages > 0 {
            self.paginate(pages);
        }
    }

    /// Update the card grid geometry after a resize or relayout.
    pub fn update_viewport(&mut self, viewport: CardViewport) {
        self.viewport = viewport;
        self.card_scroll = self.card_scroll.min(self.max_card_scroll());
    }

    fn max_card_scroll(&self) -> usize {
        let columns = self.viewport.columns.max(1);
        let total_rows = self.page_window().len().div_ceil(columns);
        total_rows.saturating_sub(self.viewport.rows)
    }

    pub fn scroll_down(&mut self) {
        self.card_scroll = (self.card_scroll + 1).min(self.max_card_scroll());
    }

    pub fn scroll_up(&mut self) {
        self.card_scroll = self.card_scroll.saturating_sub(1);
    }

    pub fn scroll_page_down(&mut self) {
        let step = self.viewport.rows.max(1);
        self.card_scroll = (self.card_scroll + step).min(self.max_card_scroll());
    }

    pub fn scroll_page_up(&mut self) {
        let step = self.viewport.rows.max(1);
        self.card_scroll = self.card_scroll.saturating_sub(step);
    }
}

fn country_count(n: usize) -> String {
    if n == 1 {
        "1 country".to_string()
    } else {
        format!("{n} countries")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::country::fixture;

    struct StaticSource(Vec<Country>);

    #[async_trait::async_trait]
    impl CountrySource for StaticSource {
        async fn fetch_all(&self) -> Result<Vec<Country>, FetchError> {
            Ok(self.0.clone())
        }
    }

    struct RejectingSource;

    #[async_trait::async_trait]
    impl CountrySource for RejectingSource {
        async fn fetch_all(&self) -> Result<Vec<Country>, FetchError> {
            Err(FetchError::Status {
                status: 500,
                body: "boom".to_string(),
            })
        }
    }

    fn loaded(countries: Vec<Country>) -> App {
        let mut app = App::new(DEFAULT_ITEMS_PER_PAGE);
        app.finish_fetch(Ok(countries));
        app
    }

    fn names(items: &[Country]) -> Vec<&str> {
        items.iter().map(|c| c.name.as_str()).collect()
    }

    fn numbered(count: usize) -> Vec<Country> {
        (0..count)
            .map(|i| fixture(&format!("Country {i:03}"), "Europe", i as f64))
            .collect()
    }

    #[tokio::test]
    async fn test_init_populates_both_lists() {
        let mut app = App::new(DEFAULT_ITEMS_PER_PAGE);
        let source = StaticSource(vec![fixture("Chad", "Africa", 1_284_000.0)]);
        app.init(&source).await;
        assert!(!app.loading);
        assert_eq!(names(&app.all_items), vec!["Chad"]);
        assert_eq!(names(&app.visible_items), vec!["Chad"]);
        assert_eq!(app.status_msg, "1 country loaded");
    }

    #[tokio::test]
    async fn test_fetch_failure_leaves_directory_empty() {
        let mut app = App::new(DEFAULT_ITEMS_PER_PAGE);
        app.init(&RejectingSource).await;
        assert!(!app.loading);
        assert!(app.all_items.is_empty());
        assert!(app.visible_items.is_empty());
        assert!(app.page_selector().buttons().is_empty());
        assert!(app.page_window().is_empty());
        assert!(app.status_msg.is_empty());
    }

    #[test]
    fn test_sort_toggles_direction() {
        let mut app = loaded(vec![
            fixture("Brazil", "Americas", 1.0),
            fixture("Chile", "Americas", 1.0),
            fixture("Angola", "Africa", 1.0),
        ]);
        assert_eq!(app.sort_order.label(), "Sort Ascending");

        app.sort();
        assert_eq!(names(&app.visible_items), vec!["Angola", "Brazil", "Chile"]);
        assert_eq!(app.sort_order, SortOrder::Descending);
        let once = app.visible_items.clone();

        app.sort();
        assert_eq!(names(&app.visible_items), vec!["Chile", "Brazil", "Angola"]);
        let mut twice = app.visible_items.clone();
        twice.reverse();
        assert_eq!(twice, once);

        app.sort();
        assert_eq!(app.visible_items, once);
    }

    #[test]
    fn test_sort_does_not_touch_all_items() {
        let mut app = loaded(vec![fixture("B", "Europe", 1.0), fixture("A", "Europe", 1.0)]);
        app.sort();
        assert_eq!(names(&app.all_items), vec!["B", "A"]);
    }

    #[test]
    fn test_filter_smaller_than_lithuania() {
        let mut app = loaded(vec![
            fixture("A", "Europe", 100.0),
            fixture("B", "Europe", 70_000.0),
            fixture("C", "Europe", 65_299.0),
        ]);
        app.filter(CountryFilter::SmallerThanLithuania);
        assert_eq!(names(&app.visible_items), vec!["A", "C"]);
    }

    #[test]
    fn test_filter_oceania() {
        let mut app = loaded(vec![fixture("A", "Europe", 1.0), fixture("B", "Oceania", 1.0)]);
        app.dispatch(Action::Filter(CountryFilter::OceaniaRegion));
        assert_eq!(names(&app.visible_items), vec!["B"]);
    }

    #[test]
    fn test_status_counts_countries() {
        let mut app = loaded(vec![
            fixture("Fiji", "Oceania", 18_272.0),
            fixture("Malta", "Europe", 316.0),
        ]);
        assert_eq!(app.status_msg, "2 countries loaded");
        app.filter(CountryFilter::OceaniaRegion);
        assert_eq!(app.status_msg, "Oceania Region: 1 country");
        app.finish_fetch(Ok(Vec::new()));
        assert_eq!(app.status_msg, "0 countries loaded");
    }

    #[test]
    fn test_filter_resets_page() {
        let mut app = loaded(numbered(200));
        for filter in CountryFilter::ALL {
            app.paginate(3);
            app.filter(filter);
            assert_eq!(app.current_page, 1);
        }
    }

    #[test]
    fn test_filter_discards_prior_sort() {
        let mut app = loaded(vec![
            fixture("C", "Oceania", 1.0),
            fixture("A", "Oceania", 1.0),
            fixture("B", "Europe", 1.0),
        ]);
        app.sort();
        app.sort();
        assert_eq!(names(&app.visible_items), vec!["C", "B", "A"]);

        app.filter(CountryFilter::OceaniaRegion);
        assert_eq!(names(&app.visible_items), vec!["C", "A"]);
        // The toggle keeps its position across filters.
        assert_eq!(app.sort_order, SortOrder::Ascending);
    }

    #[test]
    fn test_filter_reads_full_list_not_visible() {
        let mut app = loaded(vec![
            fixture("Fiji", "Oceania", 18_272.0),
            fixture("Malta", "Europe", 316.0),
        ]);
        app.filter(CountryFilter::OceaniaRegion);
        app.filter(CountryFilter::SmallerThanLithuania);
        assert_eq!(names(&app.visible_items), vec!["Fiji", "Malta"]);
    }

    #[test]
    fn test_pages_of_120() {
        let mut app = loaded(numbered(120));
        assert_eq!(app.page_selector().page_count(), 3);

        app.dispatch(Action::Paginate(2));
        let window = app.page_window();
        assert_eq!(window.len(), 56);
        assert_eq!(window[0].name, "Country 056");
        assert_eq!(window[55].name, "Country 111");
    }

    #[test]
    fn test_paginate_out_of_range_is_permissive() {
        let mut app = loaded(numbered(10));
        app.paginate(7);
        assert_eq!(app.current_page, 7);
        assert!(app.page_window().is_empty());
        assert!(app.page_selector().buttons().iter().all(|b| !b.active));
    }

    #[test]
    fn test_page_stepping_stays_on_buttons() {
        let mut app = loaded(numbered(120));
        app.prev_page();
        assert_eq!(app.current_page, 1);
        app.next_page();
        app.next_page();
        app.next_page();
        assert_eq!(app.current_page, 3);
        app.first_page();
        assert_eq!(app.current_page, 1);
        app.last_page();
        assert_eq!(app.current_page, 3);

        app.paginate(9);
        app.prev_page();
        assert_eq!(app.current_page, 3);
    }

    #[test]
    fn test_page_stepping_on_empty_directory() {
        let mut app = loaded(Vec::new());
        app.next_page();
        app.prev_page();
        app.last_page();
        assert_eq!(app.current_page, 1);
    }

    #[test]
    fn test_card_scroll_is_clamped() {
        let mut app = loaded(numbered(120));
        app.update_viewport(CardViewport { columns: 4, rows: 5 });
        // 56 cards in 4 columns = 14 rows, 5 visible
        app.scroll_page_down();
        app.scroll_page_down();
        app.scroll_page_down();
        assert_eq!(app.card_scroll, 9);
        app.scroll_down();
        assert_eq!(app.card_scroll, 9);
        app.scroll_up();
        assert_eq!(app.card_scroll, 8);

        app.paginate(2);
        assert_eq!(app.card_scroll, 0);
        app.scroll_page_up();
        assert_eq!(app.card_scroll, 0);
    }
}
