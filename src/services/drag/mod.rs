// Drag service
// Pointer gesture state machine for moving and resizing events on the time grid

pub mod move_event;
pub mod resize;

use chrono::NaiveDateTime;
use serde::Serialize;
use thiserror::Error;

use crate::models::event::{EventError, EventId, EventModel};
use crate::models::grid::{GridPosition, PointerPosition, TimeGridData};
use crate::models::settings::LayoutSettings;
use crate::models::ui::EventUIModel;
use crate::services::grid::position::GridPositionSource;

pub const DEFAULT_MIN_DRAG_DISTANCE: f64 = 3.0;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DragError {
    #[error("a drag gesture is already in progress")]
    SessionActive,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Escape,
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DragPhase {
    Idle,
    /// Pointer is down but has not moved past the threshold
    Init,
    Dragging,
    Canceled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DragKind {
    Move,
    Resize,
}

/// Grid state a gesture is evaluated against on each tick
#[derive(Clone, Copy, Debug)]
pub struct DragContext<'a> {
    pub grid: &'a TimeGridData,
    /// Placed UI models per grid column
    pub columns: &'a [Vec<EventUIModel>],
}

impl<'a> DragContext<'a> {
    pub fn new(grid: &'a TimeGridData, columns: &'a [Vec<EventUIModel>]) -> Self {
        Self { grid, columns }
    }
}

/// Tentative block drawn while dragging, in percent of the grid
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize)]
pub struct DragGuide {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DragPreview {
    pub kind: DragKind,
    pub guide: DragGuide,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// New times for an event, produced when a gesture commits
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EventChange {
    pub cid: EventId,
    pub id: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl EventChange {
    pub fn for_model(model: &EventModel, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            cid: model.cid(),
            id: model.id.clone(),
            start,
            end,
        }
    }

    /// The edited model; the original stays untouched
    pub fn apply(&self, model: &EventModel) -> Result<EventModel, EventError> {
        model.with_times(self.start, self.end)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DragOutcome {
    /// Released before crossing the drag threshold
    Click(EventId),
    Committed(EventChange),
    /// Released without a net change, or outside the grid
    NoChange,
    Canceled,
    /// No gesture was in progress
    Ignored,
}

/// Live state of one gesture
#[derive(Clone, Debug, PartialEq)]
pub struct DragSession {
    kind: DragKind,
    phase: DragPhase,
    snapshot: EventUIModel,
    init_pointer: PointerPosition,
    current_pointer: PointerPosition,
    init_position: Option<GridPosition>,
    current_position: Option<GridPosition>,
}

impl DragSession {
    pub fn kind(&self) -> DragKind {
        self.kind
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    pub fn snapshot(&self) -> &EventUIModel {
        &self.snapshot
    }

    pub fn init_pointer(&self) -> PointerPosition {
        self.init_pointer
    }

    pub fn current_pointer(&self) -> PointerPosition {
        self.current_pointer
    }

    pub fn init_position(&self) -> Option<GridPosition> {
        self.init_position
    }

    pub fn current_position(&self) -> Option<GridPosition> {
        self.current_position
    }

    fn exceeds_threshold(&self, min_distance: f64) -> bool {
        let dx = (self.current_pointer.x - self.init_pointer.x).abs();
        let dy = (self.current_pointer.y - self.init_pointer.y).abs();
        dx >= min_distance || dy >= min_distance
    }
}

/// Owns the single active [`DragSession`] and drives it from pointer and
/// keyboard input.
pub struct DragController<S: GridPositionSource> {
    source: S,
    min_distance: f64,
    session: Option<DragSession>,
}

impl<S: GridPositionSource> DragController<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            min_distance: DEFAULT_MIN_DRAG_DISTANCE,
            session: None,
        }
    }

    pub fn with_settings(source: S, settings: &LayoutSettings) -> Self {
        Self {
            min_distance: settings.min_drag_distance,
            ..Self::new(source)
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Swap the pointer mapping, e.g. after the container was resized
    pub fn set_source(&mut self, source: S) {
        self.source = source;
    }

    pub fn active(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn phase(&self) -> DragPhase {
        self.session.as_ref().map(DragSession::phase).unwrap_or(DragPhase::Idle)
    }

    /// Start a gesture on `snapshot`. Non-primary buttons are ignored.
    pub fn pointer_down(
        &mut self,
        kind: DragKind,
        snapshot: EventUIModel,
        button: PointerButton,
        pointer: PointerPosition,
    ) -> Result<(), DragError> {
        if self.session.is_some() {
            log::warn!("Ignoring {:?} gesture start: another gesture is active", kind);
            return Err(DragError::SessionActive);
        }

        if button != PointerButton::Primary {
            log::trace!("Ignoring {:?} button press", button);
            return Ok(());
        }

        let init_position = self.source.grid_position(pointer);
        log::trace!(
            "Drag init: {:?} event {:?} at {:?}",
            kind,
            snapshot.cid(),
            init_position
        );

        self.session = Some(DragSession {
            kind,
            phase: DragPhase::Init,
            snapshot,
            init_pointer: pointer,
            current_pointer: pointer,
            init_position,
            current_position: init_position,
        });

        Ok(())
    }

    /// Track the pointer; returns the guide to draw while dragging.
    pub fn pointer_move(&mut self, pointer: PointerPosition, context: &DragContext<'_>) -> Option<DragPreview> {
        let session = self.session.as_mut()?;
        session.current_pointer = pointer;

        let phase = session.phase;
        match phase {
            DragPhase::Init if session.exceeds_threshold(self.min_distance) => {
                log::trace!("Drag threshold crossed for {:?}", session.snapshot.cid());
                session.phase = DragPhase::Dragging;
            }
            DragPhase::Dragging => {}
            _ => return None,
        }

        session.current_position = self.source.grid_position(pointer);
        let current = session.current_position?;

        match session.kind {
            DragKind::Move => move_event::preview(&session.snapshot, session.init_position, current, context.grid),
            DragKind::Resize => resize::preview(&session.snapshot, current, context),
        }
    }

    /// Escape cancels the gesture; it stays canceled until the pointer is released.
    pub fn key_down(&mut self, key: Key) {
        if key != Key::Escape {
            return;
        }

        if let Some(session) = self.session.as_mut() {
            if matches!(session.phase, DragPhase::Init | DragPhase::Dragging) {
                log::debug!("Drag canceled for {:?}", session.snapshot.cid());
                session.phase = DragPhase::Canceled;
            }
        }
    }

    /// Finish the gesture and destroy the session.
    pub fn pointer_up(&mut self, pointer: PointerPosition, context: &DragContext<'_>) -> DragOutcome {
        let Some(session) = self.session.take() else {
            return DragOutcome::Ignored;
        };

        match session.phase {
            DragPhase::Idle => DragOutcome::Ignored,
            DragPhase::Init => DragOutcome::Click(session.snapshot.cid()),
            DragPhase::Canceled => DragOutcome::Canceled,
            DragPhase::Dragging => {
                let Some(current) = self.source.grid_position(pointer) else {
                    log::debug!("Drop outside the grid for {:?}", session.snapshot.cid());
                    return DragOutcome::NoChange;
                };

                let change = match session.kind {
                    DragKind::Move => move_event::commit(&session.snapshot, session.init_position, current, context.grid),
                    DragKind::Resize => resize::commit(&session.snapshot, current, context),
                };

                match change {
                    Some(change) => {
                        log::info!(
                            "Committed {:?} of event {:?}: {} - {}",
                            session.kind,
                            change.cid,
                            change.start,
                            change.end
                        );
                        DragOutcome::Committed(change)
                    }
                    None => DragOutcome::NoChange,
                }
            }
        }
    }

    /// Drop the session without producing an outcome
    pub fn cancel(&mut self) {
        self.session = None;
    }
}
