use crate::core::Settlement;

use super::checkpoint::Checkpoint;
use super::popup::PopupRequest;
use super::state::TutorialState;

/// Evaluates every checkpoint once per game tick and issues a pop-up for each
/// one whose predicate holds for the first time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TutorialController {
    state: TutorialState,
}

impl TutorialController {
    pub fn new(state: TutorialState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &TutorialState {
        &self.state
    }

    pub fn replace_state(&mut self, state: TutorialState) {
        self.state = state;
    }

    /// Returns the display requests raised this tick, in checkpoint order.
    ///
    /// The latch is set in the same step that creates the request, so a
    /// checkpoint can never produce a second request.
    pub fn tick(&mut self, settlement: &Settlement) -> Vec<PopupRequest> {
        let mut requests = Vec::new();
        for checkpoint in Checkpoint::ALL {
            if self.state.is_shown(checkpoint) || !checkpoint.is_met(settlement) {
                continue;
            }
            if self.state.mark_shown(checkpoint) {
                log::info!("tutorial checkpoint {} reached", checkpoint.canonical_name());
                requests.push(checkpoint.popup());
            }
        }
        requests
    }
}
