use egui::{Context, Event, Order, PointerButton, Pos2, Rect};

/// Pointer events in canvas-local coordinates, as consumed by
/// [`crate::Canvas::handle_event`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown { position: Pos2 },
    PointerMove { position: Pos2 },
    PointerUp { position: Pos2 },
    /// The gesture was interrupted (pointer left the window, focus lost)
    PointerCancel,
}

/// Translates raw egui input into canvas [`InputEvent`]s.
///
/// Only primary-button presses that land on the canvas start a gesture.
/// Once pressed, moves and the release are forwarded wherever they happen so
/// that the canvas can clamp them to its bounds.
#[derive(Debug)]
pub struct InputHandler {
    canvas_rect: Rect,
    pressed: bool,
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            canvas_rect,
            pressed: false,
        }
    }

    /// Update the canvas rectangle (e.g. if window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    pub fn canvas_rect(&self) -> Rect {
        self.canvas_rect
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Drain this frame's pointer events from `ctx`
    pub fn process_input(&mut self, ctx: &Context) -> Vec<InputEvent> {
        // Copy the events out first: `layer_id_at` locks the context again.
        let raw = ctx.input(|input| input.events.clone());
        self.translate(&raw, |pos| {
            ctx.layer_id_at(pos)
                .is_none_or(|layer| layer.order == Order::Background)
        })
    }

    /// Translate raw events in order.
    ///
    /// `on_canvas_layer` tells whether a press at a screen position reaches
    /// the canvas rather than a window floating above it.
    pub fn translate(
        &mut self,
        raw: &[Event],
        on_canvas_layer: impl Fn(Pos2) -> bool,
    ) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let origin = self.canvas_rect.min.to_vec2();
        let local = |pos: Pos2| pos - origin;

        for event in raw {
            match event {
                Event::PointerButton {
                    pos,
                    button: PointerButton::Primary,
                    pressed: true,
                    ..
                } => {
                    if !self.pressed && self.canvas_rect.contains(*pos) && on_canvas_layer(*pos) {
                        self.pressed = true;
                        events.push(InputEvent::PointerDown { position: local(*pos) });
                    }
                }
                Event::PointerButton {
                    pos,
                    button: PointerButton::Primary,
                    pressed: false,
                    ..
                } => {
                    if self.pressed {
                        self.pressed = false;
                        events.push(InputEvent::PointerUp { position: local(*pos) });
                    }
                }
                Event::PointerMoved(pos) if self.pressed => {
                    events.push(InputEvent::PointerMove { position: local(*pos) });
                }
                Event::PointerGone | Event::WindowFocused(false) if self.pressed => {
                    self.pressed = false;
                    events.push(InputEvent::PointerCancel);
                }
                _ => {}
            }
        }

        events
    }
}
