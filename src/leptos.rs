// src/leptos.rs
// feature = "leptos"

use std::{cell::RefCell, rc::Rc};

use leptos::{
    create_node_ref, create_rw_signal, html::Canvas, on_cleanup, view, IntoView, SignalGet,
    SignalSet
};
use web_sys::{HtmlCanvasElement, MouseEvent};

use crate::{
    signature_core::ChangeCallback,
    style::{label_text, SignatureStyle},
    ui_common::SignatureHandle
};

#[derive(Clone)]
pub struct LProps {
    /// Called with the PNG data URL after every change, `None` once empty.
    pub on_change: Rc<dyn Fn(Option<String>)>,
    pub label:     String,
    pub required:  bool,
    pub style:     SignatureStyle
}

pub fn signature_pad_leptos(props: LProps) -> impl IntoView {
    let canvas_ref = create_node_ref::<Canvas>();
    let handle: Rc<RefCell<Option<SignatureHandle>>> = Rc::new(RefCell::new(None));
    let has_content = create_rw_signal(false);
    let style = props.style.clone();

    {
        let handle = Rc::clone(&handle);
        let style = style.clone();
        let on_change = Rc::clone(&props.on_change);
        canvas_ref.on_load(move |el| {
            let canvas: &HtmlCanvasElement = &el;
            let notify: ChangeCallback = Box::new(move |value: Option<String>| {
                has_content.set(value.is_some());
                on_change(value);
            });
            match SignatureHandle::new(canvas.clone(), &style, notify) {
                Ok(h) => *handle.borrow_mut() = Some(h),
                Err(e) => log::warn!("signature pad unavailable: {e}")
            }
        });
    }

    {
        let handle = Rc::clone(&handle);
        on_cleanup(move || {
            handle.borrow_mut().take();
        });
    }

    let do_clear = {
        let handle = Rc::clone(&handle);
        move |_ev: MouseEvent| {
            if let Some(h) = handle.borrow().as_ref() {
                h.clear();
            }
        }
    };

    let do_undo = {
        let handle = Rc::clone(&handle);
        move |_ev: MouseEvent| {
            if let Some(h) = handle.borrow().as_ref() {
                h.undo();
            }
        }
    };

    let do_download = {
        let handle = Rc::clone(&handle);
        move |_ev: MouseEvent| {
            if let Some(h) = handle.borrow().as_ref() {
                if let Err(e) = h.download() {
                    log::warn!("signature download failed: {e}");
                }
            }
        }
    };

    let label = label_text(&props.label, props.required);
    let css = style.canvas_css();
    let width = style.width.to_string();
    let height = style.height.to_string();

    view! {
        <div class="signature-field">
            <label class="signature-field__label">{label}</label>
            <canvas
                node_ref=canvas_ref
                width=width
                height=height
                style=css
            />
            <div class="controls">
                <button type="button" on:click=do_clear>"Clear"</button>
                <button type="button" on:click=do_undo>"Undo"</button>
                <button type="button" on:click=do_download disabled=move || !has_content.get()>
                    "Download"
                </button>
            </div>
        </div>
    }
}
