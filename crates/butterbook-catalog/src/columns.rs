//! Visible-column windowing for the collapsible store comparison table.

/// The slice of store columns to render plus how many are hidden.
///
/// When collapsed, `visible.len() + overflow_count` equals the total; when
/// expanded, `overflow_count` is zero.
#[derive(Debug, PartialEq)]
pub struct VisibleColumns<'a, T> {
    pub visible: &'a [T],
    pub overflow_count: usize,
    pub expanded: bool,
}

impl<T> VisibleColumns<'_, T> {
    #[must_use]
    pub fn total(&self) -> usize {
        self.visible.len() + self.overflow_count
    }

    #[must_use]
    pub fn has_overflow(&self) -> bool {
        self.overflow_count > 0
    }
}

/// Computes the visible window over `all`.
///
/// Expanded shows everything. Collapsed shows the first `max_columns`
/// entries (all of them if there are fewer) and counts the rest as
/// overflow. `max_columns == 0` is allowed and hides everything.
#[must_use]
pub fn compute_visible<T>(all: &[T], max_columns: usize, expanded: bool) -> VisibleColumns<'_, T> {
    if expanded {
        return VisibleColumns {
            visible: all,
            overflow_count: 0,
            expanded: true,
        };
    }

    let shown = max_columns.min(all.len());
    VisibleColumns {
        visible: &all[..shown],
        overflow_count: all.len() - shown,
        expanded: false,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnState {
    Collapsed,
    Expanded,
}

/// Collapsed/expanded toggle for a comparison table. Starts collapsed.
#[derive(Debug, Clone, Copy)]
pub struct ColumnWindow {
    max_columns: usize,
    state: ColumnState,
}

impl ColumnWindow {
    #[must_use]
    pub fn new(max_columns: usize) -> Self {
        Self {
            max_columns,
            state: ColumnState::Collapsed,
        }
    }

    #[must_use]
    pub fn state(&self) -> ColumnState {
        self.state
    }

    #[must_use]
    pub fn is_expanded(&self) -> bool {
        self.state == ColumnState::Expanded
    }

    /// Flips between collapsed and expanded and returns the new state.
    pub fn toggle(&mut self) -> ColumnState {
        self.state = match self.state {
            ColumnState::Collapsed => ColumnState::Expanded,
            ColumnState::Expanded => ColumnState::Collapsed,
        };
        self.state
    }

    pub fn expand(&mut self) {
        self.state = ColumnState::Expanded;
    }

    pub fn collapse(&mut self) {
        self.state = ColumnState::Collapsed;
    }

    #[must_use]
    pub fn view<'a, T>(&self, all: &'a [T]) -> VisibleColumns<'a, T> {
        compute_visible(all, self.max_columns, self.is_expanded())
    }
}
