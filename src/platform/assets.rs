//! Sprite loading
//!
//! All images start loading at once; each one either resolves to a drawable
//! element or is left out. A missing sprite is never an error.

use std::collections::HashMap;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlImageElement;

use crate::renderer::SpriteKind;

/// Loaded sprites by kind
#[derive(Default)]
pub struct SpriteSheet {
    images: HashMap<SpriteKind, HtmlImageElement>,
}

impl SpriteSheet {
    pub fn get(&self, kind: SpriteKind) -> Option<&HtmlImageElement> {
        self.images.get(&kind)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// Start every image, then wait for each to settle
pub async fn load_sprites() -> SpriteSheet {
    let mut pending = Vec::with_capacity(SpriteKind::ALL.len());
    for kind in SpriteKind::ALL {
        match start_image(kind.path()) {
            Ok((image, promise)) => pending.push((kind, image, promise)),
            Err(_) => log::warn!("Could not create image for {}", kind.path()),
        }
    }

    let mut sheet = SpriteSheet::default();
    for (kind, image, promise) in pending {
        match JsFuture::from(promise).await {
            Ok(_) => {
                sheet.images.insert(kind, image);
            }
            Err(_) => log::warn!("Sprite {} failed to load", kind.path()),
        }
    }

    log::info!(
        "Loaded {}/{} sprites",
        sheet.len(),
        SpriteKind::ALL.len()
    );
    sheet
}

/// Create an image element and a promise settling on load/error
fn start_image(src: &str) -> Result<(HtmlImageElement, js_sys::Promise), JsValue> {
    let image = HtmlImageElement::new()?;
    let target = image.clone();
    let promise = js_sys::Promise::new(&mut |resolve, reject| {
        let onload = Closure::once_into_js(move || {
            let _ = resolve.call0(&JsValue::NULL);
        });
        let onerror = Closure::once_into_js(move || {
            let _ = reject.call0(&JsValue::NULL);
        });
        target.set_onload(Some(onload.unchecked_ref()));
        target.set_onerror(Some(onerror.unchecked_ref()));
    });
    image.set_src(src);
    Ok((image, promise))
}
