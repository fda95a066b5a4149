//! Pagination Controller - Page index and size.
//!
//! Navigation is stored as requested. Clamping happens at read time:
//! [`PaginationController::page`] slices against the current filtered length
//! and, when the requested page lies past the end of a non-empty result,
//! falls back to the last page. The clamp is idempotent and is not written
//! back unless [`PaginationController::clamp`] is called explicitly.

use std::ops::Range;
use std::rc::Rc;

use crate::reactive::{Observable, Unsubscribe};
use crate::types::PaginationState;

/// The slice of the filtered sequence to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    /// Page index after clamping.
    pub page_index: usize,
    pub page_size: usize,
    /// Indices into the filtered sequence; always within `0..filtered_len`.
    pub range: Range<usize>,
}

/// Index of the page to show for `state` over `filtered_len` items.
pub fn effective_page_index(state: PaginationState, filtered_len: usize) -> usize {
    let size = state.page_size.max(1);
    let start = state.page_index.saturating_mul(size);
    if filtered_len > 0 && start >= filtered_len {
        (filtered_len - 1) / size
    } else {
        state.page_index
    }
}

/// Visible window for `state` over `filtered_len` items.
pub fn page_window(state: PaginationState, filtered_len: usize) -> PageWindow {
    let size = state.page_size.max(1);
    let index = effective_page_index(state, filtered_len);
    let start = index.saturating_mul(size).min(filtered_len);
    let end = start.saturating_add(size).min(filtered_len);
    PageWindow {
        page_index: index,
        page_size: size,
        range: start..end,
    }
}

/// Shared handle to the pagination state.
#[derive(Clone, Default)]
pub struct PaginationController {
    state: Observable<PaginationState>,
}

impl PaginationController {
    pub fn new(page_size: usize) -> Self {
        Self {
            state: Observable::new(PaginationState {
                page_index: 0,
                page_size: page_size.max(1),
            }),
        }
    }

    /// Current requested state. Tracked when read inside a `derived`.
    pub fn state(&self) -> PaginationState {
        *self.state.get()
    }

    pub fn subscribe(&self, listener: impl Fn(&Rc<PaginationState>) + 'static) -> Unsubscribe {
        self.state.subscribe(listener)
    }

    pub(crate) fn observable(&self) -> &Observable<PaginationState> {
        &self.state
    }

    /// User navigation. Stored as given; a zero size becomes 1.
    pub fn on_page_change(&self, page_index: usize, page_size: usize) {
        self.state.set(PaginationState {
            page_index,
            page_size: page_size.max(1),
        });
    }

    pub fn first_page(&self) {
        let size = self.state.peek().page_size;
        self.on_page_change(0, size);
    }

    /// Window for `filtered_len` items, clamped but not stored.
    pub fn page(&self, filtered_len: usize) -> PageWindow {
        page_window(*self.state.peek(), filtered_len)
    }

    /// Store the clamped index. Returns whether anything changed.
    pub fn clamp(&self, filtered_len: usize) -> bool {
        let current = *self.state.peek();
        let index = effective_page_index(current, filtered_len);
        if index == current.page_index {
            return false;
        }
        self.on_page_change(index, current.page_size);
        true
    }
}

// =============================================================================
// Tests
// =============================================================================
