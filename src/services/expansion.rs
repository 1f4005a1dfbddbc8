// Timeline expansion
// Presses the page's "show more" action until none is left, with a hard cap.

use tracing::{debug, info, warn};

/// Label of the timeline's "show more activities" button.
pub const SHOW_MORE_LABEL: &str = "הצגת פעילויות נוספות";

/// Something that can reveal more paginated timeline content.
pub trait ExpansionSource {
    /// Triggers one "show more" action. Returns `false` when none was available.
    fn click_show_more(&mut self) -> bool;
}

/// Result of one expansion run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpansionOutcome {
    pub clicks: u32,
    /// `true` when the attempt cap stopped the loop while actions were still available.
    pub exhausted: bool,
}

/// Expands the timeline until no "show more" action remains or
/// `max_attempts` clicks have been made.
pub fn expand_all<S: ExpansionSource + ?Sized>(source: &mut S, max_attempts: u32) -> ExpansionOutcome {
    let mut clicks = 0;
    while clicks < max_attempts {
        if !source.click_show_more() {
            if clicks == 0 {
                debug!("No 'show more' action found");
            }
            info!(clicks, "Timeline fully expanded");
            return ExpansionOutcome {
                clicks,
                exhausted: false,
            };
        }
        clicks += 1;
        debug!(clicks, "Clicked 'show more'");
    }
    warn!(max_attempts, "Stopped expanding timeline at attempt cap");
    ExpansionOutcome {
        clicks,
        exhausted: true,
    }
}
