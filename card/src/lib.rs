//! Interaction and data layer for augmented-reality greeting cards.
//!
//! This crate is compiled to WebAssembly and runs in the browser next to the
//! page's 3-D scene. It owns the card's gesture handling: translating raw
//! pointer, touch, wheel and spatial-controller events into pose updates and
//! an open/close toggle, and animating the hinge once per frame. The host
//! JavaScript layer owns the scene graph and only wires DOM/XR events to the
//! controller and applies the resulting pose.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`controller`] | Card interaction controller and host [`controller::Action`]s |
//! | [`input`] | Input event union, input regimes, drag session and grab state |
//! | [`pose`] | Pose with clamped scale and animated open-amount |
//! | [`tap`] | Double-tap detector with duplicate rejection and cooldown |
//! | [`hit`] | Controller ray vs. card hit-testing |
//! | [`clock`] | Injectable millisecond clock |
//! | [`doc`] | Card fields and the renderer payload |
//! | [`drafts`] | Local named-draft list over key-value storage |
//! | [`renderer`] | Embedded external renderer service and message bridge |
//! | [`wasm`] | JavaScript bindings |
//! | [`consts`] | Shared numeric constants (scale limits, tap windows, etc.) |

pub mod clock;
pub mod consts;
pub mod controller;
pub mod doc;
pub mod drafts;
pub mod hit;
pub mod input;
pub mod pose;
pub mod renderer;
pub mod tap;
pub mod wasm;
