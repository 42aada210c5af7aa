use crate::app::Action;

/// Number of pages needed for `total_items`.
pub fn page_count(items_per_page: usize, total_items: usize) -> usize {
    if items_per_page == 0 {
        return 0;
    }
    total_items.div_ceil(items_per_page)
}

/// The slice of `items` shown on 1-based `page`. Out-of-range pages,
/// including page 0, give an empty window.
pub fn page_window<T>(items: &[T], page: usize, items_per_page: usize) -> &[T] {
    let Some(start) = page
        .checked_sub(1)
        .and_then(|p| p.checked_mul(items_per_page))
    else {
        return &[];
    };
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(items_per_page).min(items.len());
    &items[start..end]
}

/// One numbered page control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageButton {
    pub page: usize,
    pub active: bool,
}

impl PageButton {
    pub fn label(&self) -> String {
        format!(" {} ", self.page)
    }

    /// What activating this button asks the directory to do.
    pub fn action(&self) -> Action {
        Action::Paginate(self.page)
    }
}

/// Inputs of the page selector. Holds no state of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSelector {
    pub items_per_page: usize,
    pub total_items: usize,
    pub current_page: usize,
}

impl PageSelector {
    pub fn page_count(&self) -> usize {
        page_count(self.items_per_page, self.total_items)
    }

    pub fn buttons(&self) -> Vec<PageButton> {
        (1..=self.page_count())
            .map(|page| PageButton {
                page,
                active: page == self.current_page,
            })
            .collect()
    }
}
