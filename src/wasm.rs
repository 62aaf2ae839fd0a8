//! WASM bindings for hosts without a filesystem.
//!
//! This is the browser-facing concrete binding of the transfer protocol:
//! bytes go in, a flattened model comes out. Models are backed by in-memory
//! block storage, so the storage descriptor is empty and all text stays
//! inline in the WASM heap.

use wasm_bindgen::prelude::*;

use crate::format::parse_plain_text;
use crate::model::TextModel;
use crate::storage::MemoryStorage;
use crate::transfer::{TextModelSnapshot, flatten};

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// A flattened text stream held for JavaScript.
///
/// Array accessors copy into fresh typed arrays — the snapshot is already a
/// by-value copy of the model, and handing JavaScript another copy keeps the
/// WASM-side memory free to go away at any time.
#[wasm_bindgen]
pub struct TransferredModel {
    snapshot: TextModelSnapshot,
}

#[wasm_bindgen]
impl TransferredModel {
    #[wasm_bindgen(getter)]
    pub fn id(&self) -> Option<String> {
        self.snapshot.id.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn language(&self) -> Option<String> {
        self.snapshot.language.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn paragraph_count(&self) -> i32 {
        self.snapshot.paragraph_count
    }

    pub fn start_entry_indices(&self) -> Vec<i32> {
        self.snapshot.start_entry_indices.clone()
    }

    pub fn start_entry_offsets(&self) -> Vec<i32> {
        self.snapshot.start_entry_offsets.clone()
    }

    pub fn paragraph_lengths(&self) -> Vec<i32> {
        self.snapshot.paragraph_lengths.clone()
    }

    pub fn text_sizes(&self) -> Vec<i32> {
        self.snapshot.text_sizes.clone()
    }

    pub fn kinds(&self) -> Vec<u8> {
        self.snapshot.kinds.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn block_count(&self) -> i32 {
        self.snapshot.storage.block_count
    }
}

/// Parse plain-text bytes and transfer the resulting model.
#[wasm_bindgen]
pub fn plain_text_to_model(data: &[u8]) -> Result<TransferredModel, JsValue> {
    let mut model = TextModel::new("", "", Box::new(MemoryStorage::default()));
    parse_plain_text(data, None, &mut model).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let snapshot = flatten(&mut model).map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(TransferredModel { snapshot })
}
