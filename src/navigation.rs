use crate::models::{Direction, NavigationBounds};
use crate::store::TaskStore;
use crate::week::week_start_at;
use chrono::NaiveDate;

/// The furthest the user may browse ahead of the current week.
pub const MAX_FORWARD_WEEKS: i64 = 4;

/// Forward is a fixed ceiling. Backward only opens onto a week that already
/// holds at least one task, so empty past weeks can never be created.
pub fn navigation_at(today: NaiveDate, offset: i64, store: &TaskStore) -> NavigationBounds {
    let previous_start = week_start_at(today, offset.saturating_sub(1));
    NavigationBounds {
        can_go_back: store.has_week(previous_start),
        can_go_forward: offset < MAX_FORWARD_WEEKS,
    }
}

/// Returns the offset after a navigation request; disallowed moves keep it.
pub fn navigate_at(today: NaiveDate, offset: i64, direction: Direction, store: &TaskStore) -> i64 {
    let bounds = navigation_at(today, offset, store);
    match direction {
        Direction::Back if bounds.can_go_back => offset.saturating_sub(1),
        Direction::Forward if bounds.can_go_forward => offset.saturating_add(1),
        Direction::Today => 0,
        _ => offset,
    }
}
