use crate::canvas::CanvasRaster;
use bitflags::bitflags;
use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use kezuri_core as scratch;
use scratch::{DisplayRect, Point, ScratchEvent, ScratchSurface, StrokeOutcome};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlCanvasElement, MouseEvent, TouchEvent};
use yew::Callback;

pub(crate) type CardSurface = ScratchSurface<CanvasRaster, Vec<ScratchEvent>>;
pub(crate) type SharedSurface = Rc<RefCell<CardSurface>>;

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq)]
    struct MouseButtons: u16 {
        const LEFT    = 1;
        const RIGHT   = 1 << 1;
        const MIDDLE  = 1 << 2;
        const BACK    = 1 << 3;
        const FORWARD = 1 << 4;
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum StrokeInput {
    Start(Point),
    Move(Point),
    End,
}

fn is_touch(event: &Event) -> bool {
    event.type_().starts_with("touch")
}

/// Client position of a mouse event, or of the first touch point of a touch event.
fn client_point(event: &Event) -> Option<Point> {
    if is_touch(event) {
        let touch = event.unchecked_ref::<TouchEvent>().touches().get(0)?;
        Some(Point::new(touch.client_x() as f32, touch.client_y() as f32))
    } else {
        let event = event.dyn_ref::<MouseEvent>()?;
        Some(Point::new(event.client_x() as f32, event.client_y() as f32))
    }
}

fn is_primary_press(event: &Event) -> bool {
    if is_touch(event) {
        return true;
    }
    event.dyn_ref::<MouseEvent>().is_some_and(|event| {
        MouseButtons::from_bits_truncate(event.buttons()).contains(MouseButtons::LEFT)
    })
}

fn display_rect(canvas: &HtmlCanvasElement) -> DisplayRect {
    let rect = canvas.get_bounding_client_rect();
    DisplayRect::new(
        rect.left() as f32,
        rect.top() as f32,
        rect.width() as f32,
        rect.height() as f32,
    )
}

/// Applies one input to the surface and forwards whatever the surface reported.
///
/// The recorded events are only emitted after the surface borrow is released, so handlers are free to use it.
pub(crate) fn apply_input(
    surface: &SharedSurface,
    input: StrokeInput,
    on_events: &Callback<Vec<ScratchEvent>>,
) -> StrokeOutcome {
    let (outcome, events) = {
        let Ok(mut surface) = surface.try_borrow_mut() else {
            log::warn!("surface busy, dropped {:?}", input);
            return StrokeOutcome::Ignored;
        };
        let outcome = match input {
            StrokeInput::Start(point) => surface.stroke_start(point),
            StrokeInput::Move(point) => surface.stroke_move(point),
            StrokeInput::End => surface.stroke_end(),
        };
        (outcome, std::mem::take(surface.observer_mut()))
    };

    if !events.is_empty() {
        on_events.emit(events);
    }
    outcome
}

/// Keeps the scratch listeners attached for as long as it lives.
pub(crate) struct StrokeListeners {
    _listeners: Vec<EventListener>,
}

impl StrokeListeners {
    pub(crate) fn install(
        canvas: &HtmlCanvasElement,
        surface: SharedSurface,
        on_events: Callback<Vec<ScratchEvent>>,
    ) -> Self {
        let mut listeners = Vec::new();

        for event_type in ["mousedown", "touchstart", "mousemove", "touchmove"] {
            let starts = matches!(event_type, "mousedown" | "touchstart");
            let canvas_for_event = canvas.clone();
            let surface = surface.clone();
            let on_events = on_events.clone();
            let listener = EventListener::new_with_options(
                canvas,
                event_type,
                EventListenerOptions {
                    phase: EventListenerPhase::Bubble,
                    passive: false,
                },
                move |event: &Event| {
                    if starts && !is_primary_press(event) {
                        return;
                    }
                    let Some(client) = client_point(event) else {
                        return;
                    };
                    let size = match surface.try_borrow() {
                        Ok(surface) => surface.size(),
                        Err(_) => return,
                    };
                    let point =
                        scratch::client_to_surface(client, display_rect(&canvas_for_event), size);
                    let input = if starts {
                        StrokeInput::Start(point)
                    } else {
                        StrokeInput::Move(point)
                    };
                    log::trace!("{}: {:?}", event_type, input);
                    if apply_input(&surface, input, &on_events).has_update() {
                        // keeps the page from scrolling and touches from turning into mouse events
                        event.prevent_default();
                    }
                },
            );
            listeners.push(listener);
        }

        // ending on the window catches strokes released outside the canvas
        let window = gloo::utils::window();
        for event_type in ["mouseup", "touchend", "touchcancel"] {
            let surface = surface.clone();
            let on_events = on_events.clone();
            let listener = EventListener::new(&window, event_type, move |_event: &Event| {
                apply_input(&surface, StrokeInput::End, &on_events);
            });
            listeners.push(listener);
        }

        Self {
            _listeners: listeners,
        }
    }
}

impl std::fmt::Debug for StrokeListeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrokeListeners")
            .field("count", &self._listeners.len())
            .finish()
    }
}
