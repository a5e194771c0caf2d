//! Which options are still selectable under the current selection.

use serde::Serialize;

use crate::domain::Dimension;

use super::{AvailabilityIndex, FilterSelection};

/// Whether `candidate` in `target` should be rendered disabled.
///
/// A candidate is disabled when any of the other two dimensions has an
/// active selection whose entry does not list the candidate. A selected id
/// that is missing from the index disables everything it constrains.
pub fn is_disabled(
    index: &AvailabilityIndex,
    selection: &FilterSelection,
    target: Dimension,
    candidate: &str,
) -> bool {
    target
        .others()
        .into_iter()
        .any(|constraint| excludes(index, selection, constraint, candidate))
}

/// Whether the selection in `constraint` rules `candidate` out.
fn excludes(
    index: &AvailabilityIndex,
    selection: &FilterSelection,
    constraint: Dimension,
    candidate: &str,
) -> bool {
    let Some(selected) = selection.get(constraint) else {
        return false;
    };

    match index.entry(constraint, selected) {
        Some(entry) => !entry.is_available(candidate),
        // Stale selection: fail closed.
        None => true,
    }
}

/// One option of a dimension as the presentation layer sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionState {
    /// Raw id, used as the form value.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Rendered but not choosable.
    pub disabled: bool,

    /// Currently selected.
    pub selected: bool,
}

/// Every option of `target`, sorted by display name, with disabled and
/// selected flags for the current selection.
pub fn resolve_options(
    index: &AvailabilityIndex,
    selection: &FilterSelection,
    target: Dimension,
) -> Vec<OptionState> {
    let selected = selection.get(target);

    let mut options: Vec<OptionState> = index
        .options(target)
        .iter()
        .map(|(id, entry)| OptionState {
            id: id.clone(),
            name: entry.name().to_string(),
            disabled: is_disabled(index, selection, target, id),
            selected: selected == Some(id.as_str()),
        })
        .collect();

    options.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
    options
}
