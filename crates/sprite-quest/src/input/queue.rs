/// Input events the quest understands.
/// Pointer coordinates are stage-relative: (0, 0) is the stage centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A touch/click began at (x, y).
    PointerDown { x: f32, y: f32 },
    /// A touch/click ended at (x, y).
    PointerUp { x: f32, y: f32 },
    /// A touch/cursor moved to (x, y).
    PointerMove { x: f32, y: f32 },
    /// A control from the UI layer (buttons, number fields, answer choices).
    /// `kind` is one of the `CUSTOM_*` constants in `games`; `a`, `b`, `c`
    /// carry its arguments.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

impl InputEvent {
    /// A custom control with a single argument.
    pub fn custom(kind: u32, a: f32) -> Self {
        InputEvent::Custom { kind, a, b: 0.0, c: 0.0 }
    }

    /// A custom control with no arguments.
    pub fn control(kind: u32) -> Self {
        Self::custom(kind, 0.0)
    }
}

/// A queue of input events.
/// JS writes events into the queue; the session drains them each tick.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 10.0, y: 20.0 });
        q.push(InputEvent::control(4));
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn custom_helper_fills_first_argument() {
        match InputEvent::custom(7, 1.5) {
            InputEvent::Custom { kind, a, b, c } => {
                assert_eq!(kind, 7);
                assert_eq!(a, 1.5);
                assert_eq!(b, 0.0);
                assert_eq!(c, 0.0);
            }
            _ => panic!("Expected Custom event"),
        }
    }
}
