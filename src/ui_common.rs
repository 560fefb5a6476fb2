// src/ui_common.rs

use std::{cell::RefCell, rc::Rc};

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{
    Document, Event, EventTarget, HtmlAnchorElement, HtmlCanvasElement, PointerEvent, TouchEvent,
    Window
};

use crate::{
    canvas::CanvasSurface,
    error::SigError,
    signature_core::{ChangeCallback, SignaturePad},
    style::SignatureStyle,
    surface::SurfaceSize
};

type SharedPad = Rc<RefCell<SignaturePad<CanvasSurface>>>;

/// One registered DOM listener; removed again on drop.
struct Listener {
    target:   EventTarget,
    event:    &'static str,
    callback: Closure<dyn FnMut(Event)>
}

impl Listener {
    fn attach(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static
    ) -> Result<Self, SigError> {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target
            .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
            .map_err(|_| SigError::OpFailed(format!("addEventListener({event})")))?;
        Ok(Self {
            target: target.clone(),
            event,
            callback
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self.target.remove_event_listener_with_callback(
            self.event,
            self.callback.as_ref().unchecked_ref()
        );
    }
}

/// Events that end a mouse/pen gesture.
const POINTER_RELEASE_EVENTS: [&str; 3] = ["pointerup", "pointerleave", "pointercancel"];
/// Events that end a touch gesture.
const TOUCH_RELEASE_EVENTS: [&str; 2] = ["touchend", "touchcancel"];

/// The bitmap is shown in the content box, so size comes from the client
/// area (border excluded) and falls back to `fallback` before layout.
fn content_size(client_width: i32, client_height: i32, fallback: (f64, f64)) -> (f64, f64) {
    if client_width > 0 && client_height > 0 {
        (f64::from(client_width), f64::from(client_height))
    } else {
        fallback
    }
}

/// Viewport position relative to the top-left of the content box.
fn content_local(client: (f64, f64), rect_origin: (f64, f64), border: (i32, i32)) -> (f64, f64) {
    (
        client.0 - rect_origin.0 - f64::from(border.0),
        client.1 - rect_origin.1 - f64::from(border.1)
    )
}

/// CSS content size of the canvas paired with the current device pixel
/// ratio.
fn measure(canvas: &HtmlCanvasElement, fallback: (f64, f64)) -> SurfaceSize {
    let (width, height) = content_size(canvas.client_width(), canvas.client_height(), fallback);
    let ratio = web_sys::window()
        .map(|w| w.device_pixel_ratio())
        .unwrap_or(1.0);
    SurfaceSize::new(width, height, ratio)
}

fn to_surface(canvas: &HtmlCanvasElement, client_x: i32, client_y: i32) -> (f64, f64) {
    let rect = canvas.get_bounding_client_rect();
    content_local(
        (f64::from(client_x), f64::from(client_y)),
        (rect.left(), rect.top()),
        (canvas.client_left(), canvas.client_top())
    )
}

fn pointer_position(canvas: &HtmlCanvasElement, e: &PointerEvent) -> (f64, f64) {
    to_surface(canvas, e.client_x(), e.client_y())
}

/// Position of the first active touch.
fn touch_position(canvas: &HtmlCanvasElement, e: &TouchEvent) -> Option<(f64, f64)> {
    let touch = e.touches().get(0)?;
    Some(to_surface(canvas, touch.client_x(), touch.client_y()))
}

/// Touch input arrives through the touch listeners; the pointer listeners
/// skip it so a finger never starts two strokes.
fn mouse_like(e: &Event) -> Option<&PointerEvent> {
    e.dyn_ref::<PointerEvent>()
        .filter(|pe| pe.pointer_type() != "touch")
}

/// RAII handle that owns the SignaturePad and its JS listeners.
/// On drop, listeners are removed.
pub struct SignatureHandle {
    pad:       SharedPad,
    filename:  String,
    listeners: Vec<Listener>
}

impl SignatureHandle {
    /// Initialize on a given canvas element.
    pub fn new(
        canvas: HtmlCanvasElement,
        style: &SignatureStyle,
        on_change: ChangeCallback
    ) -> Result<Self, SigError> {
        let window: Window = web_sys::window().ok_or(SigError::DomUnavailable)?;
        let fallback = style.fallback_size();
        let surface = CanvasSurface::new(canvas.clone(), measure(&canvas, fallback))?;
        let pad: SharedPad = Rc::new(RefCell::new(
            SignaturePad::new(surface, style.pen.clone()).with_on_change(on_change)
        ));

        let target: &EventTarget = canvas.as_ref();
        let mut listeners = Vec::with_capacity(10);

        // pointerdown
        let (c, p) = (canvas.clone(), Rc::clone(&pad));
        listeners.push(Listener::attach(target, "pointerdown", move |e: Event| {
            if let Some(pe) = mouse_like(&e) {
                pe.prevent_default();
                let (x, y) = pointer_position(&c, pe);
                p.borrow_mut().pointer_down(x, y);
            }
        })?);

        // pointermove
        let (c, p) = (canvas.clone(), Rc::clone(&pad));
        listeners.push(Listener::attach(target, "pointermove", move |e: Event| {
            if let Some(pe) = mouse_like(&e) {
                let (x, y) = pointer_position(&c, pe);
                p.borrow_mut().pointer_move(x, y);
            }
        })?);

        // pointerup / pointerleave / pointercancel
        for event in POINTER_RELEASE_EVENTS {
            let p = Rc::clone(&pad);
            listeners.push(Listener::attach(target, event, move |e: Event| {
                if mouse_like(&e).is_some() {
                    p.borrow_mut().pointer_up();
                }
            })?);
        }

        // touchstart
        let (c, p) = (canvas.clone(), Rc::clone(&pad));
        listeners.push(Listener::attach(target, "touchstart", move |e: Event| {
            e.prevent_default();
            if let Some((x, y)) = e.dyn_ref::<TouchEvent>().and_then(|te| touch_position(&c, te)) {
                p.borrow_mut().pointer_down(x, y);
            }
        })?);

        // touchmove
        let (c, p) = (canvas.clone(), Rc::clone(&pad));
        listeners.push(Listener::attach(target, "touchmove", move |e: Event| {
            e.prevent_default();
            if let Some((x, y)) = e.dyn_ref::<TouchEvent>().and_then(|te| touch_position(&c, te)) {
                p.borrow_mut().pointer_move(x, y);
            }
        })?);

        // touchend / touchcancel
        for event in TOUCH_RELEASE_EVENTS {
            let p = Rc::clone(&pad);
            listeners.push(Listener::attach(target, event, move |e: Event| {
                e.prevent_default();
                p.borrow_mut().pointer_up();
            })?);
        }

        // window resize
        let (c, p) = (canvas.clone(), Rc::clone(&pad));
        listeners.push(Listener::attach(window.as_ref(), "resize", move |_e: Event| {
            let size = measure(&c, fallback);
            if let Err(e) = p.borrow_mut().resize(size) {
                log::warn!("ignoring canvas resize: {e}");
            }
        })?);

        log::debug!("signature pad attached to canvas");

        Ok(Self {
            pad,
            filename: style.filename.clone(),
            listeners
        })
    }

    pub fn to_png_data_url(&self) -> Result<String, SigError> {
        self.pad.borrow().to_png_data_url()
    }

    pub fn has_content(&self) -> bool {
        self.pad.borrow().has_content()
    }

    pub fn clear(&self) {
        self.pad.borrow_mut().clear();
    }

    pub fn undo(&self) {
        self.pad.borrow_mut().undo();
    }

    /// Save the current signature as a PNG file.
    pub fn download(&self) -> Result<(), SigError> {
        let data_url = self.to_png_data_url()?;
        DomBindings::download_data_url(&data_url, &self.filename)
    }
}

impl Drop for SignatureHandle {
    fn drop(&mut self) {
        self.listeners.clear();
        log::debug!("signature pad detached");
    }
}

/// DOM helpers. Stateless. All state lives in `SignatureHandle`.
pub struct DomBindings;

impl DomBindings {
    fn document() -> Result<Document, SigError> {
        web_sys::window()
            .ok_or(SigError::DomUnavailable)?
            .document()
            .ok_or(SigError::DomUnavailable)
    }

    /// Initialize by canvas id and return a RAII handle.
    pub fn init_by_canvas_id(
        canvas_id: &str,
        style: &SignatureStyle,
        on_change: ChangeCallback
    ) -> Result<SignatureHandle, SigError> {
        let el = Self::document()?
            .get_element_by_id(canvas_id)
            .ok_or_else(|| SigError::ElementNotFound(canvas_id.to_string()))?;
        let canvas: HtmlCanvasElement = el
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| SigError::ElementNotFound(canvas_id.to_string()))?;

        SignatureHandle::new(canvas, style, on_change)
    }

    /// Trigger a client-side download of `data_url` as `filename` through a
    /// temporary `<a download>`.
    pub fn download_data_url(data_url: &str, filename: &str) -> Result<(), SigError> {
        let document = Self::document()?;
        let body = document.body().ok_or(SigError::DomUnavailable)?;

        let anchor: HtmlAnchorElement = document
            .create_element("a")
            .map_err(|_| SigError::OpFailed("createElement(a)".into()))?
            .dyn_into::<HtmlAnchorElement>()
            .map_err(|_| SigError::OpFailed("created element is not <a>".into()))?;
        anchor.set_href(data_url);
        anchor.set_download(filename);
        let _ = anchor.set_attribute("style", "display:none");

        body.append_child(&anchor)
            .map_err(|_| SigError::OpFailed("appendChild(a)".into()))?;
        anchor.click();
        anchor.remove();
        Ok(())
    }
}
