use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// One page of a story sequence and the label of the button that
/// acknowledges it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryStep {
    pub text: String,
    pub button: String,
}

/// A finite sequence of story pages with a cursor. The cursor only moves
/// when the player acknowledges the current page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Narrative {
    pub source: String,
    pub steps: Vec<StoryStep>,
    #[serde(default)]
    pub cursor: usize,
}

impl Narrative {
    pub fn new(source: impl Into<String>, steps: Vec<StoryStep>) -> Self {
        Self {
            source: source.into(),
            steps,
            cursor: 0,
        }
    }

    pub fn current(&self) -> Option<&StoryStep> {
        self.steps.get(self.cursor)
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.steps.len()
    }

    fn advance(&mut self) {
        if !self.is_finished() {
            self.cursor += 1;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoryAdvance {
    /// The same sequence moved on to its next page.
    Next,
    /// The acknowledged page was the last of its sequence.
    Finished,
    /// Nothing was on screen.
    Idle,
}

/// Story sequences waiting to be read, shown one at a time in the order
/// their upgrades were bought.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoryQueue(VecDeque<Narrative>);

impl StoryQueue {
    pub fn push(&mut self, narrative: Narrative) {
        if narrative.is_finished() {
            return;
        }
        self.0.push_back(narrative);
    }

    pub fn current(&self) -> Option<&StoryStep> {
        self.0.front().and_then(Narrative::current)
    }

    pub fn active(&self) -> Option<&Narrative> {
        self.0.front()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn acknowledge(&mut self) -> StoryAdvance {
        let Some(narrative) = self.0.front_mut() else {
            return StoryAdvance::Idle;
        };
        narrative.advance();
        if narrative.is_finished() {
            self.0.pop_front();
            StoryAdvance::Finished
        } else {
            StoryAdvance::Next
        }
    }
}
