//! Reading and writing `PolyData` in mesh file formats.

#[cfg(feature = "stl-io")]
mod stl;

#[cfg(feature = "stl-io")]
pub use stl::{read_stl, read_stl_file, to_stl_ascii, to_stl_binary, write_stl_binary};
