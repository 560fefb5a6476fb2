// src/yew.rs
// feature = "yew"

use std::{cell::RefCell, rc::Rc};

use web_sys::{HtmlCanvasElement, MouseEvent};
use yew::{
    function_component, html, use_effect_with, use_mut_ref, use_node_ref, use_state, AttrValue,
    Callback, Html, Properties
};

use crate::{
    signature_core::ChangeCallback,
    style::{label_text, SignatureStyle},
    ui_common::SignatureHandle
};

/// Yew signature field: label, canvas and Clear / Undo / Download controls.
#[derive(Properties, PartialEq, Clone)]
pub struct SignatureProps {
    /// Called with the PNG data URL after every change, `None` once empty.
    pub on_change: Callback<Option<String>>,

    #[prop_or(AttrValue::from("Signature"))]
    pub label: AttrValue,

    /// Whether the surrounding form requires a signature.
    #[prop_or(false)]
    pub required: bool,

    /// Visual style of the signature canvas.
    #[prop_or_default]
    pub style: Option<SignatureStyle>
}

#[function_component(SignaturePadYew)]
pub fn signature_pad_yew(props: &SignatureProps) -> Html {
    let canvas_ref = use_node_ref();
    let handle: Rc<RefCell<Option<SignatureHandle>>> = use_mut_ref(|| None);
    let has_content = use_state(|| false);
    let style = props.style.clone().unwrap_or_default();

    // Latest parent callback; the pad itself is only built once.
    let on_change = use_mut_ref(|| props.on_change.clone());
    *on_change.borrow_mut() = props.on_change.clone();

    // Attach after mount, detach (drop listeners) on unmount
    {
        let canvas_ref = canvas_ref.clone();
        let handle = handle.clone();
        let has_content = has_content.clone();
        let style = style.clone();

        use_effect_with((), move |_| {
            if let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() {
                let notify: ChangeCallback = Box::new(move |value: Option<String>| {
                    has_content.set(value.is_some());
                    on_change.borrow().emit(value);
                });
                match SignatureHandle::new(canvas, &style, notify) {
                    Ok(h) => *handle.borrow_mut() = Some(h),
                    Err(e) => log::warn!("signature pad unavailable: {e}")
                }
            }
            move || {
                handle.borrow_mut().take();
            }
        });
    }

    let on_clear = {
        let handle = handle.clone();
        Callback::from(move |_e: MouseEvent| {
            if let Some(h) = handle.borrow().as_ref() {
                h.clear();
            }
        })
    };

    let on_undo = {
        let handle = handle.clone();
        Callback::from(move |_e: MouseEvent| {
            if let Some(h) = handle.borrow().as_ref() {
                h.undo();
            }
        })
    };

    let on_download = {
        let handle = handle.clone();
        Callback::from(move |_e: MouseEvent| {
            if let Some(h) = handle.borrow().as_ref() {
                if let Err(e) = h.download() {
                    log::warn!("signature download failed: {e}");
                }
            }
        })
    };

    html! {
        <div class="signature-field">
          <label class="signature-field__label">
            { label_text(&props.label, props.required) }
          </label>
          <canvas ref={canvas_ref}
                  width={style.width.to_string()}
                  height={style.height.to_string()}
                  style={style.canvas_css()}
          />
          <div class="controls">
            <button type="button" onclick={on_clear}>{"Clear"}</button>
            <button type="button" onclick={on_undo}>{"Undo"}</button>
            <button type="button"
                    onclick={on_download}
                    disabled={!*has_content}>
              {"Download"}
            </button>
          </div>
        </div>
    }
}
