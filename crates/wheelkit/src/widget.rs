//! The interactive wheel widget: a private working copy of a [`Wheel`]
//! wired to the drag state machine, the value animator and the inline
//! label-editing state.
//!
//! The widget never touches the caller's wheel. `set_wheel` clones the
//! input, every gesture and edit mutates the clone, and the host reads the
//! result back through [`WheelWidget::wheel`] when it wants to commit.

use crate::animate::{DEFAULT_DURATION, ValueAnimation};
use crate::drag::{DragAction, DragController};
use crate::geometry::{Point, WheelLayout};
use crate::wheel::{ValidationError, Wheel};
use std::time::Instant;
use thiserror::Error;

/// Longest accepted title or item name, in characters.
pub const MAX_LABEL_LEN: usize = 20;

/// Label validation failures. Always recoverable: the previous label text
/// stays in place and the kind is surfaced to the user.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LabelError {
    #[error("the text cannot be empty")]
    Empty,
    #[error("the text cannot exceed {MAX_LABEL_LEN} characters")]
    ExceedsMax,
}

/// Which label the inline editor currently targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    Title,
    Item(usize),
}

/// Notifications for the host, returned from the widget's entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelEvent {
    ItemSelected(usize),
    ValueChanged { index: usize, value: u8 },
    AnimationFinished,
}

#[derive(Debug, Clone, Copy)]
pub struct WidgetOptions {
    pub draggable: bool,
    pub editable: bool,
    pub show_labels: bool,
}

impl Default for WidgetOptions {
    fn default() -> Self {
        Self {
            draggable: true,
            editable: false,
            show_labels: true,
        }
    }
}

pub struct WheelWidget {
    wheel: Wheel,
    drag: DragController,
    animation: Option<(ValueAnimation, Instant)>,
    editable: bool,
    show_labels: bool,
    editing: Option<EditTarget>,
    /// Survives pointer release so the item's label can still be edited.
    last_clicked: Option<usize>,
}

impl WheelWidget {
    pub fn new(initial: &Wheel, options: WidgetOptions) -> Self {
        Self {
            wheel: initial.clone(),
            drag: DragController::new(options.draggable),
            animation: None,
            editable: options.editable,
            show_labels: options.show_labels,
            editing: None,
            last_clicked: None,
        }
    }

    /// Replaces the working copy with a clone of `wheel`, cancelling any
    /// running animation, gesture or edit.
    pub fn set_wheel(&mut self, wheel: &Wheel) {
        self.wheel = wheel.clone();
        self.animation = None;
        self.drag.reset();
        self.editing = None;
        self.last_clicked = None;
    }

    /// The working copy. Callers wanting isolation from further widget
    /// mutation must clone it.
    pub fn wheel(&self) -> &Wheel {
        &self.wheel
    }

    pub fn set_draggable(&mut self, draggable: bool) {
        self.drag.set_draggable(draggable);
    }

    pub fn set_editable(&mut self, editable: bool) {
        self.editable = editable;
        if !editable {
            self.editing = None;
        }
    }

    pub fn set_show_labels(&mut self, show: bool) {
        self.show_labels = show;
        if !show {
            self.editing = None;
        }
    }

    pub fn show_labels(&self) -> bool {
        self.show_labels
    }

    /// Item currently held by the pointer, drawn dimmed by the renderer.
    pub fn selected(&self) -> Option<usize> {
        self.drag.selected()
    }

    /// Item most recently selected, even after the pointer was released.
    pub fn last_clicked(&self) -> Option<usize> {
        self.last_clicked
    }

    // Pointer entry points
    // ====================================================================

    /// A pointer press interrupts any running animation and starts a
    /// selection or drag.
    pub fn pointer_pressed(&mut self, p: Point, layout: &WheelLayout) -> Vec<WheelEvent> {
        self.cancel_animation();
        let action = self.drag.pointer_pressed(p, layout, &self.wheel);
        if let Some(index) = action.selected {
            self.last_clicked = Some(index);
        }
        Self::events_from(action)
    }

    pub fn pointer_dragged(&mut self, p: Point, layout: &WheelLayout) -> Vec<WheelEvent> {
        let action = self.drag.pointer_dragged(p, layout, &mut self.wheel);
        Self::events_from(action)
    }

    pub fn pointer_released(&mut self, p: Point, layout: &WheelLayout) -> Vec<WheelEvent> {
        let action = self.drag.pointer_released(p, layout, &mut self.wheel);
        Self::events_from(action)
    }

    fn events_from(action: DragAction) -> Vec<WheelEvent> {
        let mut events = Vec::new();
        if let Some(index) = action.selected {
            events.push(WheelEvent::ItemSelected(index));
        }
        if let Some((index, value)) = action.value_changed {
            events.push(WheelEvent::ValueChanged { index, value });
        }
        events
    }

    // Animation
    // ====================================================================

    /// Starts animating the working copy's values toward `target` over the
    /// default duration. A target identical to the current values completes
    /// immediately. A previously running animation is replaced.
    pub fn animate_to(
        &mut self,
        target: &Wheel,
        now: Instant,
    ) -> Result<Vec<WheelEvent>, ValidationError> {
        let animation = ValueAnimation::new(&self.wheel, target, DEFAULT_DURATION)?;
        if animation.is_noop() {
            self.animation = None;
            return Ok(vec![WheelEvent::AnimationFinished]);
        }
        self.animation = Some((animation, now));
        Ok(Vec::new())
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Drops the running animation, synchronously. Items keep whatever value
    /// the last applied frame gave them; no completion event follows.
    pub fn cancel_animation(&mut self) {
        self.animation = None;
    }

    /// Advances the animation to `now`, applying the sampled values to the
    /// working copy. Emits `AnimationFinished` exactly once, on the frame
    /// that reaches the full duration.
    pub fn tick(&mut self, now: Instant) -> Vec<WheelEvent> {
        let Some((animation, started)) = &self.animation else {
            return Vec::new();
        };
        let (values, finished) = animation.values_at(now.duration_since(*started));
        for (index, value) in values.into_iter().enumerate() {
            if let Some(item) = self.wheel.item_mut(index) {
                item.set_value(value)
                    .expect("interpolated values stay within the endpoints");
            }
        }
        if finished {
            self.animation = None;
            return vec![WheelEvent::AnimationFinished];
        }
        Vec::new()
    }

    /// Resets every item to the default value, dropping any animation.
    pub fn reset_values(&mut self) {
        self.cancel_animation();
        self.wheel.reset_values();
    }

    // Inline label editing
    // ====================================================================

    /// Starts editing the wheel title. Returns the current title text to
    /// pre-fill the editor, or `None` when editing is not available.
    pub fn begin_title_edit(&mut self) -> Option<String> {
        if !(self.editable && self.show_labels) {
            return None;
        }
        self.editing = Some(EditTarget::Title);
        Some(self.wheel.title().to_string())
    }

    /// Starts editing the name of the most recently clicked item.
    pub fn begin_item_edit(&mut self) -> Option<String> {
        if !(self.editable && self.show_labels) {
            return None;
        }
        let index = self.last_clicked?;
        let name = self.wheel.item(index)?.name().to_string();
        self.editing = Some(EditTarget::Item(index));
        Some(name)
    }

    pub fn editing(&self) -> Option<EditTarget> {
        self.editing
    }

    /// Ends the current edit with `input`. On success the trimmed text is
    /// committed into the title or item name; on failure nothing changes and
    /// the error kind is returned so the host can surface it. Either way the
    /// editor closes and the previous text remains visible after a failure.
    pub fn commit_edit(&mut self, input: &str) -> Result<(), LabelError> {
        let Some(target) = self.editing.take() else {
            return Ok(());
        };
        let text = validate_label(input)?;
        match target {
            EditTarget::Title => self.wheel.set_title(text),
            EditTarget::Item(index) => {
                if let Some(item) = self.wheel.item_mut(index) {
                    item.set_name(text);
                }
            }
        }
        Ok(())
    }

    /// Abandons the current edit, keeping the previous text.
    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }
}

/// Trims `input` and checks the label rules: over-length is reported before
/// emptiness so an over-long blank string reads as too long.
pub fn validate_label(input: &str) -> Result<String, LabelError> {
    if input.chars().count() > MAX_LABEL_LEN {
        return Err(LabelError::ExceedsMax);
    }
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(LabelError::Empty);
    }
    Ok(trimmed.to_string())
}
