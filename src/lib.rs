//! Freehand signature capture for Rust web frontends.
//!
//! [`SignaturePad`] holds the strokes and drives any [`Surface`]: the
//! browser `<canvas>` ([`CanvasSurface`]) or an in-memory pixmap
//! ([`RasterSurface`]). [`SignatureHandle`] wires a pad to DOM events; the
//! `yew` and `leptos` features add ready-made components.

mod canvas;
mod data_url;
mod error;
mod raster;
mod signature_core;
mod stroke;
mod style;
mod surface;
mod ui_common;

#[cfg(target_arch = "wasm32")]
mod logging;

#[cfg(feature = "yew")]
mod yew;

#[cfg(feature = "leptos")]
mod leptos;

pub use canvas::CanvasSurface;
pub use data_url::{decode_png as png_bytes_from_data_url, encode_png as png_data_url};
pub use error::SigError;
#[cfg(target_arch = "wasm32")]
pub use logging::init_logging;
pub use raster::RasterSurface;
pub use signature_core::{ChangeCallback, SignaturePad};
pub use stroke::{Point, Stroke, StrokeStore};
pub use style::{label_text, SignatureStyle, DEFAULT_FILENAME};
pub use surface::{PenStyle, Surface, SurfaceSize, DEFAULT_LINE_WIDTH, DEFAULT_PEN_COLOR};
pub use ui_common::{DomBindings, SignatureHandle};

#[cfg(feature = "leptos")]
pub use crate::leptos::{signature_pad_leptos, LProps};
#[cfg(feature = "yew")]
pub use crate::yew::{SignaturePadYew, SignatureProps};
