//! Tag rewriting stages that run before the vendor rules.
//!
//! - **html**: unwrap `<img src="...">` pixel wrappers
//! - **decode**: percent-decode VAST wrapper URLs
//! - **macros**: canonicalize vendor macro placeholders

pub mod decode;
pub mod html;
pub mod macros;

pub use decode::{VAST_MARKER, decode_vast};
pub use html::unwrap_img;
pub use macros::{CANONICAL_CACHEBUSTER, MacroPattern, canonicalize_macros, macro_dialect};
