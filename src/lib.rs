//! Interactive image viewport and crop-rectangle editor.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! editing session for one captured screenshot: fitting it to the drawable
//! surface, applying decoded pan/zoom gestures, letting the user drag a
//! resizable crop rectangle over it, and resolving that rectangle into exact
//! source-image pixels. The host JavaScript layer recognizes gestures, forwards
//! them to the engine, and acts on the returned [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`viewport`] | Pan/zoom transform controller, fit-to-view, boundary pass |
//! | [`crop`] | Crop rectangle editor and image-pixel resolution |
//! | [`hit`] | Edge/corner hit-testing and [`hit::DragMode`] |
//! | [`input`] | Decoded gesture types and the touch routing state machine |
//! | [`transform`] | General 2×3 affine matrix |
//! | [`geom`] | Points, sizes and rectangles |
//! | [`image`] | Source raster and the crop executor |
//! | [`overlay`] | Mask, grid and handle geometry for the renderer |
//! | [`render`] | Scene rendering to a `CanvasRenderingContext2d` |
//! | [`shared`] | Single-writer lock for multi-threaded hosts |
//! | [`config`] | Host-tunable limits and touch zones |
//! | [`consts`] | Shared numeric constants (zoom limits, minimum sizes, etc.) |

pub mod config;
pub mod consts;
pub mod crop;
pub mod engine;
pub mod geom;
pub mod hit;
pub mod image;
pub mod input;
pub mod overlay;
pub mod render;
pub mod shared;
pub mod transform;
pub mod viewport;
