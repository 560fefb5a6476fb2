use signature_capture::{init_logging, SignaturePadYew, SignatureStyle};
use yew::prelude::*;

/// Contract form that only submits once the signer has drawn something.
#[function_component(App)]
fn app() -> Html {
    let signature = use_state(|| None::<String>);
    let submitted = use_state(|| false);

    // Keep the last value; the pad reports after every stroke, undo and clear
    let on_change = {
        let signature = signature.clone();
        let submitted = submitted.clone();
        Callback::from(move |value: Option<String>| {
            submitted.set(false);
            signature.set(value);
        })
    };

    let on_submit = {
        let signature = signature.clone();
        let submitted = submitted.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if signature.is_some() {
                log::info!("contract signed");
                submitted.set(true);
            }
        })
    };

    html! {
        <form onsubmit={on_submit}>
          <SignaturePadYew
            on_change={on_change}
            label={"Contractor signature"}
            required={true}
            style={Some(SignatureStyle {
                border: "2px dashed #2b8a3e".into(),
                background: "#ffffff".into(),
                ..SignatureStyle::default()
            })}
          />

          <div class="submit">
            <button type="submit" disabled={signature.is_none()}>{"Sign contract"}</button>
            {
              if signature.is_none() {
                html! { <span class="submit__hint">{"Draw your signature to continue"}</span> }
              } else {
                Html::default()
              }
            }
          </div>

          {
            match (*submitted, signature.as_ref()) {
              (true, Some(url)) => html! {
                <figure class="preview">
                  <img src={url.clone()} alt="Submitted signature" />
                  <figcaption>{"Submitted"}</figcaption>
                </figure>
              },
              _ => Html::default()
            }
          }
        </form>
    }
}

fn main() {
    init_logging(log::Level::Debug);
    if let Some(root) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id("app"))
    {
        yew::Renderer::<App>::with_root(root).render();
    } else {
        yew::Renderer::<App>::new().render();
    }
}
