use std::rc::Rc;

use leptos::*;
use signature_capture::{init_logging, signature_pad_leptos, LProps, SignatureStyle};

/// Leptos CSR form: the submit button unlocks once something is signed.
#[component]
fn App() -> impl IntoView {
    let signature = create_rw_signal(None::<String>);
    let submitted = create_rw_signal(false);

    let pad = signature_pad_leptos(LProps {
        on_change: Rc::new(move |value: Option<String>| {
            submitted.set(false);
            signature.set(value);
        }),
        label:     "Contractor signature".into(),
        required:  true,
        style:     SignatureStyle {
            border: "2px dashed #1c7ed6".into(),
            background: "#ffffff".into(),
            ..SignatureStyle::default()
        }
    });

    let on_submit = move |e: ev::SubmitEvent| {
        e.prevent_default();
        if signature.with(Option::is_some) {
            log::info!("contract signed");
            submitted.set(true);
        }
    };

    view! {
        <form on:submit=on_submit>
            {pad}
            <div class="submit">
                <button type="submit" disabled=move || signature.with(Option::is_none)>
                    "Sign contract"
                </button>
                <Show when=move || signature.with(Option::is_none)>
                    <span class="submit__hint">"Draw your signature to continue"</span>
                </Show>
            </div>
            <Show when=move || submitted.get()>
                <figure class="preview">
                    <img src=move || signature.get().unwrap_or_default() alt="Submitted signature"/>
                    <figcaption>"Submitted"</figcaption>
                </figure>
            </Show>
        </form>
    }
}

pub fn main() {
    init_logging(log::Level::Debug);
    mount_to_body(|| view! { <App/> });
}
