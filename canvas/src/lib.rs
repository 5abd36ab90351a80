//! Spatial presentation editor engine.
//!
//! This crate compiles natively and to WebAssembly. It owns everything about the
//! editing canvas that does not need the network: the slide data model and its wire
//! format, the camera and viewport, geometry (snapping, guides, resize math), the
//! selection model, the pointer interaction state machine, and the display list the
//! renderer paints. The host layer wires DOM events to the engine and hands the
//! resulting [`engine::Action`]s to the sync client in the `relay` crate.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`doc`] | Presentations, slides, broadcast fields, patch types |
//! | [`camera`] | Pan/zoom camera and coordinate conversions |
//! | [`geometry`] | Snapping, alignment guides, resize math, fit zoom |
//! | [`selection`] | Single/toggle/range selection |
//! | [`viewport`] | Zoom/pan controller, fit algorithms, fullscreen lifecycle |
//! | [`input`] | Input event types and the interaction state machine |
//! | [`hit`] | Hit-testing against slides and resize handles |
//! | [`render`] | Display-list building and 2D canvas painting |
//! | [`consts`] | Shared numeric constants (zoom limits, minimum sizes, etc.) |

pub mod camera;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod geometry;
pub mod hit;
pub mod input;
pub mod render;
pub mod selection;
pub mod viewport;
