//! Map surface boundary, gesture handling, and overlay synchronization.

pub mod gestures;
pub mod surface;
pub mod sync;

pub use gestures::{PressTracker, DEFAULT_HOLD};
pub use surface::{
    HeadlessMapSurface, LineStyle, MapEvent, MapSurface, MarkerBinding, OverlayId, OverlayRequest,
};
pub use sync::RenderSynchronizer;
