//! The five interactive state machines described in §4.3-4.6, §4.8-4.9:
//! move, resize, popup and rotate pointer grabs, plus the keyboard
//! switcher grab. Each plugs into smithay's [`PointerGrab`]/[`KeyboardGrab`]
//! traits and is installed on a [`smithay::input::pointer::PointerHandle`]
//! or [`smithay::input::keyboard::KeyboardHandle`] exactly like anvil
//! installs its own move/resize grabs.

pub mod move_grab;
pub mod popup_grab;
pub mod resize_grab;
pub mod rotate_grab;
pub mod switcher_grab;

pub use move_grab::MoveGrab;
pub use popup_grab::PopupGrab;
pub use resize_grab::ResizeGrab;
pub use rotate_grab::RotateGrab;
pub use switcher_grab::SwitcherGrab;

/// Every grab in this module forwards axis/frame/relative-motion/gesture
/// events untouched — only `motion`/`button`/`start_data` differ between
/// them. Spelling that passthrough out five times (as the trait's own
/// method count would demand) is pure duplication, so it is factored into
/// this macro instead; expand it inside each `impl PointerGrab<D> for ...`
/// block.
macro_rules! forward_pointer_grab_passthrough {
    ($data_ty:ty) => {
        fn relative_motion(
            &mut self,
            data: &mut $data_ty,
            handle: &mut smithay::input::pointer::PointerInnerHandle<'_, $data_ty>,
            focus: Option<(
                <$data_ty as smithay::input::SeatHandler>::PointerFocus,
                smithay::utils::Point<i32, smithay::utils::Logical>,
            )>,
            event: &smithay::input::pointer::RelativeMotionEvent,
        ) {
            handle.relative_motion(data, focus, event);
        }

        fn axis(
            &mut self,
            data: &mut $data_ty,
            handle: &mut smithay::input::pointer::PointerInnerHandle<'_, $data_ty>,
            details: smithay::input::pointer::AxisFrame,
        ) {
            handle.axis(data, details)
        }

        fn frame(
            &mut self,
            data: &mut $data_ty,
            handle: &mut smithay::input::pointer::PointerInnerHandle<'_, $data_ty>,
        ) {
            handle.frame(data);
        }

        fn gesture_swipe_begin(
            &mut self,
            data: &mut $data_ty,
            handle: &mut smithay::input::pointer::PointerInnerHandle<'_, $data_ty>,
            event: &smithay::input::pointer::GestureSwipeBeginEvent,
        ) {
            handle.gesture_swipe_begin(data, event);
        }

        fn gesture_swipe_update(
            &mut self,
            data: &mut $data_ty,
            handle: &mut smithay::input::pointer::PointerInnerHandle<'_, $data_ty>,
            event: &smithay::input::pointer::GestureSwipeUpdateEvent,
        ) {
            handle.gesture_swipe_update(data, event);
        }

        fn gesture_swipe_end(
            &mut self,
            data: &mut $data_ty,
            handle: &mut smithay::input::pointer::PointerInnerHandle<'_, $data_ty>,
            event: &smithay::input::pointer::GestureSwipeEndEvent,
        ) {
            handle.gesture_swipe_end(data, event);
        }

        fn gesture_pinch_begin(
            &mut self,
            data: &mut $data_ty,
            handle: &mut smithay::input::pointer::PointerInnerHandle<'_, $data_ty>,
            event: &smithay::input::pointer::GesturePinchBeginEvent,
        ) {
            handle.gesture_pinch_begin(data, event);
        }

        fn gesture_pinch_update(
            &mut self,
            data: &mut $data_ty,
            handle: &mut smithay::input::pointer::PointerInnerHandle<'_, $data_ty>,
            event: &smithay::input::pointer::GesturePinchUpdateEvent,
        ) {
            handle.gesture_pinch_update(data, event);
        }

        fn gesture_pinch_end(
            &mut self,
            data: &mut $data_ty,
            handle: &mut smithay::input::pointer::PointerInnerHandle<'_, $data_ty>,
            event: &smithay::input::pointer::GesturePinchEndEvent,
        ) {
            handle.gesture_pinch_end(data, event);
        }

        fn gesture_hold_begin(
            &mut self,
            data: &mut $data_ty,
            handle: &mut smithay::input::pointer::PointerInnerHandle<'_, $data_ty>,
            event: &smithay::input::pointer::GestureHoldBeginEvent,
        ) {
            handle.gesture_hold_begin(data, event);
        }

        fn gesture_hold_end(
            &mut self,
            data: &mut $data_ty,
            handle: &mut smithay::input::pointer::PointerInnerHandle<'_, $data_ty>,
            event: &smithay::input::pointer::GestureHoldEndEvent,
        ) {
            handle.gesture_hold_end(data, event);
        }
    };
}

pub(crate) use forward_pointer_grab_passthrough;
