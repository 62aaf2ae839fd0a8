//! The transfer protocol: flattening native models into primitive snapshots.
//!
//! The encoder produces structure-of-arrays snapshots deliberately: five
//! parallel primitive arrays cross the boundary as five bulk copies, where a
//! list of paragraph records would cost one allocation per paragraph on both
//! sides. Do not "simplify" this into an array of structs.

mod encoder;
mod snapshot;

pub use encoder::{decode_book, encode_book, flatten};
pub use snapshot::{
    BookModelSnapshot, BookSnapshot, CoverImage, SeriesInfo, StorageDescriptor, TextModelSnapshot,
};
