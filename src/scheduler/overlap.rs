use crate::predict::PassWindow;

/// Whether `other` competes with the `selected` window.
///
/// `other` overlaps when it starts earlier and is still up at the selected
/// rise (or outlasts it), or when it starts during the selected window and
/// outlasts it. A window lying strictly inside the selected one does not
/// count.
pub fn overlaps(other: &PassWindow, selected: &PassWindow) -> bool {
    if other.rise < selected.rise {
        // partial (happens before) or full overlap
        other.set > selected.rise || other.set > selected.set
    } else {
        // partial overlap, happens after
        other.rise < selected.set && other.set > selected.set
    }
}
