//! Pointer input delivered to the refresh layout

/// Identifier of one finger or mouse button for the length of a gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointerId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    /// First pointer went down
    Down,
    Move,
    /// Last pointer went up
    Up,
    Cancel,
    /// An additional pointer went down
    SecondaryDown,
    /// A pointer went up while others remain
    SecondaryUp,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub id: PointerId,
    pub phase: PointerPhase,
    pub x: f32,
    pub y: f32,
}

impl PointerEvent {
    pub fn new(id: u32, phase: PointerPhase, x: f32, y: f32) -> Self {
        Self {
            id: PointerId(id),
            phase,
            x,
            y,
        }
    }

    pub fn down(id: u32, y: f32) -> Self {
        Self::new(id, PointerPhase::Down, 0.0, y)
    }

    pub fn moved(id: u32, y: f32) -> Self {
        Self::new(id, PointerPhase::Move, 0.0, y)
    }

    pub fn up(id: u32, y: f32) -> Self {
        Self::new(id, PointerPhase::Up, 0.0, y)
    }
}

/// Pointers currently on the surface, in the order they went down
#[derive(Debug, Clone, Default)]
pub(crate) struct ActivePointers {
    pointers: Vec<(PointerId, f32)>,
}

impl ActivePointers {
    /// Update bookkeeping for an event before the gesture logic sees it
    pub fn track(&mut self, event: &PointerEvent) {
        match event.phase {
            PointerPhase::Down => {
                self.pointers.clear();
                self.pointers.push((event.id, event.y));
            }
            PointerPhase::SecondaryDown => {
                self.pointers.retain(|(id, _)| *id != event.id);
                self.pointers.push((event.id, event.y));
            }
            PointerPhase::Move => {
                if let Some(entry) = self.pointers.iter_mut().find(|(id, _)| *id == event.id) {
                    entry.1 = event.y;
                }
            }
            PointerPhase::Up | PointerPhase::Cancel | PointerPhase::SecondaryUp => {}
        }
    }

    /// Forget pointers that lifted; called after the gesture logic ran
    pub fn release(&mut self, event: &PointerEvent) {
        match event.phase {
            PointerPhase::Up | PointerPhase::Cancel => self.pointers.clear(),
            PointerPhase::SecondaryUp => self.pointers.retain(|(id, _)| *id != event.id),
            _ => {}
        }
    }

    pub fn y_of(&self, id: PointerId) -> Option<f32> {
        self.pointers
            .iter()
            .find(|(pointer, _)| *pointer == id)
            .map(|(_, y)| *y)
    }

    pub fn contains(&self, id: PointerId) -> bool {
        self.y_of(id).is_some()
    }

    /// A pointer other than `excluded`, preferring the earliest
    pub fn other_than(&self, excluded: PointerId) -> Option<PointerId> {
        self.pointers
            .iter()
            .map(|(id, _)| *id)
            .find(|id| *id != excluded)
    }
}
