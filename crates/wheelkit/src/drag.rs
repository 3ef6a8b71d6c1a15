//! Pointer state machine that turns drag gestures into item value updates.

use crate::geometry::{Point, WheelLayout, locate};
use crate::wheel::{MAX_VALUE, MIN_VALUE, Wheel};

/// Distance in value units the pointer must move away from the current value
/// before a drag step is applied. Keeps sub-unit pointer noise from
/// flickering the value while still tracking direction immediately.
const DRAG_DEADBAND: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// Pointer is down but dragging is disabled; only selection happens.
    Selecting,
    /// Pointer is down and moves update the selected item's value.
    Dragging,
}

/// What a pointer transition did, for the embedding shell to act on.
#[derive(Debug, Clone, Copy, Default)]
pub struct DragAction {
    pub redraw: bool,
    /// Item selected by this transition, if any.
    pub selected: Option<usize>,
    /// Item index and new value when the transition changed a value.
    pub value_changed: Option<(usize, u8)>,
}

#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
    selected: Option<usize>,
    draggable: bool,
}

impl DragController {
    pub fn new(draggable: bool) -> Self {
        Self {
            state: DragState::Idle,
            selected: None,
            draggable,
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    /// Index of the item currently held by the pointer.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn set_draggable(&mut self, draggable: bool) {
        self.draggable = draggable;
    }

    pub fn is_draggable(&self) -> bool {
        self.draggable
    }

    /// Pointer down: hit-test the wheel and select the item under the
    /// pointer. Enters `Dragging` when dragging is enabled, `Selecting`
    /// otherwise; the selected wedge is redrawn dimmed either way.
    pub fn pointer_pressed(&mut self, p: Point, layout: &WheelLayout, wheel: &Wheel) -> DragAction {
        self.selected = locate(p, layout.center, wheel.sectors());
        self.state = if self.draggable {
            DragState::Dragging
        } else {
            DragState::Selecting
        };
        log::trace!("pointer down, selected item {:?}", self.selected);
        DragAction {
            redraw: true,
            selected: self.selected,
            value_changed: None,
        }
    }

    /// Pointer move: while dragging, pull the selected item's value toward
    /// the pointer's distance from the center.
    pub fn pointer_dragged(
        &mut self,
        p: Point,
        layout: &WheelLayout,
        wheel: &mut Wheel,
    ) -> DragAction {
        if self.state != DragState::Dragging {
            return DragAction::default();
        }
        let value_changed = self.drag_value_to(p, layout, wheel);
        DragAction {
            redraw: value_changed.is_some(),
            selected: None,
            value_changed,
        }
    }

    /// Pointer up: apply the final drag delta, then clear the selection and
    /// return to `Idle`.
    pub fn pointer_released(
        &mut self,
        p: Point,
        layout: &WheelLayout,
        wheel: &mut Wheel,
    ) -> DragAction {
        let value_changed = if self.state == DragState::Dragging {
            self.drag_value_to(p, layout, wheel)
        } else {
            None
        };
        self.state = DragState::Idle;
        self.selected = None;
        DragAction {
            redraw: true,
            selected: None,
            value_changed,
        }
    }

    /// Abandon any in-progress gesture without touching values.
    pub fn reset(&mut self) {
        self.state = DragState::Idle;
        self.selected = None;
    }

    fn drag_value_to(
        &self,
        p: Point,
        layout: &WheelLayout,
        wheel: &mut Wheel,
    ) -> Option<(usize, u8)> {
        let index = self.selected?;
        let old = wheel.item(index)?.value();

        let diff = layout.pointer_value(p) - f64::from(old);
        if diff.abs() <= DRAG_DEADBAND {
            return None;
        }

        let stepped = f64::from(old) + diff.signum() * diff.abs().ceil();
        let new = stepped.clamp(f64::from(MIN_VALUE), f64::from(MAX_VALUE)) as u8;
        if new == old {
            return None;
        }

        wheel
            .item_mut(index)?
            .set_value(new)
            .expect("drag values are clamped into range");
        Some((index, new))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wheel::{Wheel, WheelItem};
    use palette::Srgba;

    fn wheel(values: &[u8]) -> Wheel {
        let items = values
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                WheelItem::with_value(format!("item {i}"), Srgba::new(0.5, 0.5, 0.5, 1.0), v)
                    .unwrap()
            })
            .collect();
        Wheel::new(Wheel::UNSAVED, "drag", items).unwrap()
    }

    // 220x220 bounds give a unit width of exactly 10 px around (110, 110).
    fn layout() -> WheelLayout {
        WheelLayout::from_bounds(220.0, 220.0)
    }

    // A point inside sector 0 (angles (0, 90]) at `units` from the center.
    fn in_sector_0(units: f64) -> Point {
        Point::new(110.0 + units * 10.0 * 0.6, 110.0 + units * 10.0 * 0.8)
    }

    #[test]
    fn press_selects_and_enters_dragging() {
        let mut wheel = wheel(&[5, 5, 5, 5]);
        let mut drag = DragController::new(true);

        let action = drag.pointer_pressed(in_sector_0(5.0), &layout(), &wheel);
        assert_eq!(action.selected, Some(0));
        assert_eq!(drag.state(), DragState::Dragging);

        let action = drag.pointer_dragged(in_sector_0(8.2), &layout(), &mut wheel);
        assert_eq!(action.value_changed, Some((0, 9)));
        assert_eq!(wheel.item(0).unwrap().value(), 9);
    }

    #[test]
    fn deadband_swallows_small_moves() {
        let mut wheel = wheel(&[5, 5]);
        let mut drag = DragController::new(true);
        drag.pointer_pressed(in_sector_0(5.0), &layout(), &wheel);

        let action = drag.pointer_dragged(in_sector_0(5.4), &layout(), &mut wheel);
        assert!(action.value_changed.is_none());
        assert_eq!(wheel.item(0).unwrap().value(), 5);
    }

    #[test]
    fn drag_clamps_at_the_outer_boundary() {
        let mut wheel = wheel(&[9, 9]);
        let mut drag = DragController::new(true);
        drag.pointer_pressed(in_sector_0(9.0), &layout(), &wheel);

        // way past ring 10
        let action = drag.pointer_dragged(in_sector_0(17.0), &layout(), &mut wheel);
        assert_eq!(action.value_changed, Some((0, 10)));

        // further outward: already clamped, nothing to report
        let action = drag.pointer_dragged(in_sector_0(18.0), &layout(), &mut wheel);
        assert!(action.value_changed.is_none());
        assert_eq!(wheel.item(0).unwrap().value(), 10);
    }

    #[test]
    fn drag_clamps_at_the_center() {
        let mut wheel = wheel(&[3, 3]);
        let mut drag = DragController::new(true);
        drag.pointer_pressed(in_sector_0(3.0), &layout(), &wheel);

        let action = drag.pointer_dragged(in_sector_0(0.1), &layout(), &mut wheel);
        assert_eq!(action.value_changed, Some((0, 1)));
        assert_eq!(wheel.item(0).unwrap().value(), 1);
    }

    #[test]
    fn non_draggable_presses_only_select() {
        let mut wheel = wheel(&[5, 5]);
        let mut drag = DragController::new(false);

        let action = drag.pointer_pressed(in_sector_0(5.0), &layout(), &wheel);
        assert_eq!(action.selected, Some(0));
        assert_eq!(drag.state(), DragState::Selecting);

        let action = drag.pointer_dragged(in_sector_0(9.0), &layout(), &mut wheel);
        assert!(action.value_changed.is_none());
        assert_eq!(wheel.item(0).unwrap().value(), 5);
    }

    #[test]
    fn release_applies_the_last_delta_and_clears() {
        let mut wheel = wheel(&[5, 5]);
        let mut drag = DragController::new(true);
        drag.pointer_pressed(in_sector_0(5.0), &layout(), &wheel);

        let action = drag.pointer_released(in_sector_0(2.0), &layout(), &mut wheel);
        assert_eq!(action.value_changed, Some((0, 2)));
        assert_eq!(drag.state(), DragState::Idle);
        assert_eq!(drag.selected(), None);
    }
}
