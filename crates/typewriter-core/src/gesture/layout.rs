use std::time::Duration;

use tracing::{debug, info, trace};

use super::pointer::{ActivePointers, PointerEvent, PointerPhase};
use super::state::{DragState, GestureState, Padding, SavedState};
use crate::composer::{self, ComposedFrame, Geometry, PartMeasure, Renderer};
use crate::config::{AnimationConfig, RefreshConfig};
use crate::error::{Error, Result};
use crate::sequencer::{RefreshIndicator, Sequencer};
use crate::timeline::timing::scale_duration;
use crate::timeline::{Easing, RepeatPolicy, Timeline, TimelineEvent};

/// The scrollable view wrapped by a [`RefreshLayout`]
pub trait ContentView {
    fn padding(&self) -> Padding;

    fn set_padding(&mut self, padding: Padding);

    /// Whether the content can scroll further up; a drag is only claimed at the top
    fn can_scroll_up(&self) -> bool {
        false
    }
}

/// Host override for [`ContentView::can_scroll_up`]
pub type ScrollUpCallback<C> = Box<dyn Fn(Option<&C>) -> bool>;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Settle {
    /// Moving to the refresh offset
    ToTarget { from: f32, from_percent: f32 },
    /// Springing back to the resting offset
    ToStart { from: f32, from_percent: f32 },
}

/// Container that turns a vertical pull on its content into a refresh
///
/// The host feeds it pointer events, layout sizes and frame ticks, positions
/// the content at [`content_offset`](Self::content_offset), and draws the
/// indicator through [`draw`](Self::draw).
pub struct RefreshLayout<C> {
    config: RefreshConfig,
    total_drag_distance: f32,
    touch_slop: f32,
    sequencer: Sequencer,
    measure: Box<dyn PartMeasure>,
    content: Option<C>,
    /// Caller-set padding captured when the content was attached
    saved_padding: Padding,
    drag: DragState,
    pointers: ActivePointers,
    settle: Option<Settle>,
    settle_timeline: Timeline,
    enabled: bool,
    width: Option<f32>,
    /// A restored refresh waiting for the first layout
    pending_restore: bool,
    on_refresh: Option<Box<dyn FnMut()>>,
    scroll_up: Option<ScrollUpCallback<C>>,
}

impl<C: ContentView> RefreshLayout<C> {
    /// Wrap at most one content view
    pub fn new(
        refresh: RefreshConfig,
        animation: AnimationConfig,
        measure: Box<dyn PartMeasure>,
        children: Vec<C>,
    ) -> Result<Self> {
        if children.len() > 1 {
            return Err(Error::TooManyChildren(children.len()));
        }
        let content = children.into_iter().next();
        let saved_padding = content
            .as_ref()
            .map(|content| content.padding())
            .unwrap_or_default();

        let settle_timeline = Timeline::new(
            refresh.max_offset_animation(),
            0.0,
            1.0,
            RepeatPolicy::Once,
            Easing::new(refresh.settle_easing, refresh.decelerate_factor),
        );
        let sequencer = Sequencer::new(animation, measure.metrics());

        Ok(Self {
            total_drag_distance: refresh.total_drag_distance(),
            touch_slop: refresh.touch_slop(),
            config: refresh,
            sequencer,
            measure,
            content,
            saved_padding,
            drag: DragState::default(),
            pointers: ActivePointers::default(),
            settle: None,
            settle_timeline,
            enabled: true,
            width: None,
            pending_restore: false,
            on_refresh: None,
            scroll_up: None,
        })
    }

    /// Called once per refresh committed by a drag
    pub fn set_on_refresh_listener(&mut self, listener: impl FnMut() + 'static) {
        self.on_refresh = Some(Box::new(listener));
    }

    pub fn set_child_scroll_up_callback(
        &mut self,
        callback: impl Fn(Option<&C>) -> bool + 'static,
    ) {
        self.scroll_up = Some(Box::new(callback));
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn can_child_scroll_up(&self) -> bool {
        match &self.scroll_up {
            Some(callback) => callback(self.content.as_ref()),
            None => self
                .content
                .as_ref()
                .is_some_and(|content| content.can_scroll_up()),
        }
    }

    /// Report the container size; geometry is only computed for a positive width
    pub fn on_layout(&mut self, width: f32, height: f32) {
        if width <= 0.0 {
            trace!(width, "refresh layout: ignoring layout without width");
            return;
        }
        if self.width == Some(width) {
            return;
        }
        debug!(width, height, "refresh layout: geometry recomputed");
        self.width = Some(width);
        self.sequencer
            .set_bounds(Geometry::new(width, height, self.total_drag_distance));
        self.move_content_to(self.drag.current_offset_top);

        if std::mem::take(&mut self.pending_restore) {
            self.replay_refresh();
        }
    }

    /// Dispatch a pointer event: intercept until a drag is claimed, then track it
    ///
    /// Returns whether the layout consumed the event.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        self.pointers.track(&event);
        let consumed = if self.drag.is_being_dragged {
            self.on_touch(&event)
        } else {
            self.on_intercept_touch(&event)
        };
        self.pointers.release(&event);
        consumed
    }

    /// Whether the gesture should be claimed from the content
    fn on_intercept_touch(&mut self, event: &PointerEvent) -> bool {
        if !self.enabled
            || self.width.is_none()
            || self.drag.is_refreshing
            || self.can_child_scroll_up()
        {
            return false;
        }

        match event.phase {
            PointerPhase::Down => {
                self.finish_spring_back();
                self.move_content_to(0.0);
                self.drag.active_pointer = Some(event.id);
                self.drag.is_being_dragged = false;
                self.drag.initial_y = event.y;
            }
            PointerPhase::Move => {
                let Some(active) = self.drag.active_pointer else {
                    return false;
                };
                if event.id != active {
                    trace!(pointer = event.id.0, "refresh layout: untracked pointer");
                    return false;
                }
                let Some(y) = self.pointers.y_of(active) else {
                    return false;
                };
                if y - self.drag.initial_y > self.touch_slop && !self.drag.is_being_dragged {
                    self.drag.is_being_dragged = true;
                    debug!(pointer = active.0, "refresh layout: drag claimed");
                }
            }
            PointerPhase::Up | PointerPhase::Cancel => {
                self.drag.is_being_dragged = false;
                self.drag.active_pointer = None;
            }
            PointerPhase::SecondaryUp => self.on_secondary_pointer_up(event),
            PointerPhase::SecondaryDown => {}
        }

        self.drag.is_being_dragged
    }

    fn on_touch(&mut self, event: &PointerEvent) -> bool {
        match event.phase {
            PointerPhase::Move => {
                let Some(active) = self
                    .drag
                    .active_pointer
                    .filter(|active| self.pointers.contains(*active))
                else {
                    debug!("refresh layout: tracked pointer lost, ending drag");
                    self.end_gesture();
                    return false;
                };
                if event.id != active {
                    trace!(pointer = event.id.0, "refresh layout: untracked pointer");
                    return true;
                }
                self.drag_to(event.y)
            }
            PointerPhase::SecondaryDown => {
                self.drag.active_pointer = Some(event.id);
                true
            }
            PointerPhase::SecondaryUp => {
                self.on_secondary_pointer_up(event);
                true
            }
            PointerPhase::Up | PointerPhase::Cancel => {
                self.release(event);
                false
            }
            PointerPhase::Down => {
                self.end_gesture();
                self.on_intercept_touch(event)
            }
        }
    }

    fn drag_to(&mut self, y: f32) -> bool {
        let scroll_top = (y - self.drag.initial_y) * self.config.drag_rate;
        let percent = scroll_top / self.total_drag_distance;
        self.drag.current_drag_percent = percent;
        if percent < 0.0 {
            return false;
        }
        let bounded = percent.abs().min(1.0);
        self.sequencer.set_percent(percent, true);
        self.move_content_to(self.total_drag_distance * bounded);
        true
    }

    fn release(&mut self, event: &PointerEvent) {
        self.drag.is_being_dragged = false;
        let Some(active) = self.drag.active_pointer.take() else {
            return;
        };
        let y = if event.id == active {
            event.y
        } else {
            self.pointers.y_of(active).unwrap_or(event.y)
        };
        if self.drag.is_refreshing {
            return;
        }
        let overscroll = y - self.drag.initial_y;
        if overscroll > self.total_drag_distance {
            debug!(overscroll, "refresh layout: release commits");
            self.set_refreshing_with(true, true);
        } else {
            debug!(overscroll, "refresh layout: release springs back");
            self.drag.is_refreshing = false;
            self.animate_to_start();
        }
    }

    /// Abandon the drag without committing
    fn end_gesture(&mut self) {
        self.drag.is_being_dragged = false;
        self.drag.active_pointer = None;
        if self.drag.current_offset_top != 0.0 {
            self.animate_to_start();
        }
    }

    fn on_secondary_pointer_up(&mut self, event: &PointerEvent) {
        if self.drag.active_pointer == Some(event.id) {
            self.drag.active_pointer = self.pointers.other_than(event.id);
            trace!(
                pointer = ?self.drag.active_pointer,
                "refresh layout: retargeted to remaining pointer"
            );
        }
    }

    /// Start or stop the refresh without notifying the listener
    pub fn set_refreshing(&mut self, refreshing: bool) {
        self.set_refreshing_with(refreshing, false);
    }

    fn set_refreshing_with(&mut self, refreshing: bool, notify: bool) {
        if self.drag.is_refreshing == refreshing {
            return;
        }
        self.drag.is_refreshing = refreshing;

        if refreshing {
            info!(notify, "refresh started");
            if self.drag.is_being_dragged {
                debug!("refresh layout: drag ended by refresh");
            }
            self.drag.is_being_dragged = false;
            self.drag.active_pointer = None;
            self.sequencer.set_percent(1.0, true);
            self.settle = Some(Settle::ToTarget {
                from: self.drag.current_offset_top,
                from_percent: self.drag.current_drag_percent,
            });
            self.settle_timeline
                .set_duration(self.config.max_offset_animation());
            self.settle_timeline.start();
            self.sequencer.start();

            if notify {
                if let Some(listener) = self.on_refresh.as_mut() {
                    listener();
                }
            }
            self.restore_padding();
        } else {
            info!("refresh finished");
            self.animate_to_start();
        }
    }

    pub fn is_refreshing(&self) -> bool {
        self.drag.is_refreshing
    }

    fn animate_to_start(&mut self) {
        let from_percent = self.drag.current_drag_percent;
        let duration = scale_duration(self.config.max_offset_animation(), from_percent);
        self.settle = Some(Settle::ToStart {
            from: self.drag.current_offset_top,
            from_percent,
        });
        self.settle_timeline.set_duration(duration);
        self.settle_timeline.start();
        debug!(?duration, "refresh layout: returning to start");
    }

    /// Jump an in-flight spring-back to its end
    fn finish_spring_back(&mut self) {
        let Some(settle @ Settle::ToStart { .. }) = self.settle else {
            return;
        };
        debug!("refresh layout: spring-back cut short");
        self.settle_timeline.finish();
        self.apply_settle(settle, 1.0);
        self.on_settled(settle);
    }

    /// Advance the settle animation and the indicator by `dt`
    pub fn tick(&mut self, dt: Duration) {
        if let Some(settle) = self.settle {
            let skip =
                matches!(settle, Settle::ToTarget { .. }) && self.sequencer.is_skip_animation();
            let event = if skip {
                self.settle_timeline.finish()
            } else {
                self.settle_timeline.tick(dt)
            };
            self.apply_settle(settle, self.settle_timeline.value() as f32);
            if event == Some(TimelineEvent::Completed) || !self.settle_timeline.is_running() {
                self.on_settled(settle);
            }
        }
        self.sequencer.advance(dt);
    }

    fn apply_settle(&mut self, settle: Settle, t: f32) {
        match settle {
            Settle::ToTarget { from, from_percent } => {
                let target_top = from + (self.total_drag_distance - from) * t;
                let percent = from_percent - (from_percent - 1.0) * t;
                self.drag.current_drag_percent = percent;
                self.sequencer.set_percent(percent, false);
                self.move_content_to(target_top);
            }
            Settle::ToStart { from, from_percent } => {
                let target_top = from - from * t;
                let percent = from_percent * (1.0 - t);
                self.drag.current_drag_percent = percent;
                self.sequencer.set_percent(percent, true);
                let padding = self
                    .saved_padding
                    .with_bottom(self.saved_padding.bottom + target_top);
                if let Some(content) = self.content.as_mut() {
                    content.set_padding(padding);
                }
                self.move_content_to(target_top);
            }
        }
    }

    fn on_settled(&mut self, settle: Settle) {
        self.settle = None;
        match settle {
            Settle::ToTarget { .. } => {
                self.drag.current_drag_percent = 1.0;
                self.sequencer.set_percent(1.0, false);
                self.move_content_to(self.total_drag_distance);
                debug!("refresh layout: settled at refresh offset");
            }
            Settle::ToStart { .. } => {
                self.sequencer.stop();
                debug!("refresh layout: back at rest");
            }
        }
    }

    /// Move the content and keep the indicator glued above it
    fn move_content_to(&mut self, top: f32) {
        self.drag.current_offset_top = top;
        self.sequencer
            .set_offset_top(top - self.total_drag_distance);
    }

    fn restore_padding(&mut self) {
        let padding = self.saved_padding;
        if let Some(content) = self.content.as_mut() {
            content.set_padding(padding);
        }
    }

    pub fn save_state(&self) -> SavedState {
        SavedState {
            was_refreshing: self.drag.is_refreshing,
        }
    }

    /// Resume a saved refresh without replaying its animations
    ///
    /// Before the first layout the replay is deferred until the width is known.
    pub fn restore_state(&mut self, state: SavedState) {
        if !state.was_refreshing {
            return;
        }
        if self.width.is_some() {
            self.replay_refresh();
        } else {
            self.pending_restore = true;
        }
    }

    fn replay_refresh(&mut self) {
        if self.drag.is_refreshing {
            debug!("refresh layout: already refreshing, nothing to restore");
            return;
        }
        info!("restoring refresh without animation");
        self.sequencer.set_skip_animation(true);
        self.set_refreshing_with(true, false);
    }

    /// Compose the current frame without advancing the typing phase
    pub fn frame(&self) -> Option<ComposedFrame> {
        composer::compose(&self.sequencer, self.measure.as_ref())
    }

    /// Render one frame of the indicator
    pub fn draw(&mut self, renderer: &mut dyn Renderer) {
        self.sequencer.draw(self.measure.as_ref(), renderer);
    }

    /// Whether a settle animation or the indicator is still moving
    pub fn is_animating(&self) -> bool {
        self.settle.is_some() || self.sequencer.is_animating()
    }

    /// Returns and clears the redraw request; animations always want one
    pub fn take_redraw(&mut self) -> bool {
        let dirty = self.sequencer.take_dirty();
        dirty || self.is_animating()
    }

    pub fn gesture_state(&self) -> GestureState {
        if self.drag.is_being_dragged {
            return GestureState::Dragging;
        }
        match self.settle {
            Some(Settle::ToTarget { .. }) => GestureState::SettlingToTarget,
            Some(Settle::ToStart { .. }) => GestureState::Returning,
            None if self.drag.is_refreshing => GestureState::Refreshing,
            None => GestureState::Idle,
        }
    }

    /// Vertical offset of the content from its resting position
    pub fn content_offset(&self) -> f32 {
        self.drag.current_offset_top
    }

    pub fn total_drag_distance(&self) -> f32 {
        self.total_drag_distance
    }

    pub fn drag_state(&self) -> &DragState {
        &self.drag
    }

    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    pub fn content(&self) -> Option<&C> {
        self.content.as_ref()
    }

    pub fn content_mut(&mut self) -> Option<&mut C> {
        self.content.as_mut()
    }
}
