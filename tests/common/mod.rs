//! Shared test doubles for integration tests.

use routesketch::map::surface::{MapSurface, OverlayId, OverlayRequest};

/// One call observed at the surface boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    Create { route_id: String, overlay: OverlayId },
    Remove { overlay: OverlayId },
}

/// Map surface that records the exact order of create/remove calls.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    next_id: u64,
    pub calls: Vec<SurfaceCall>,
    pub live: Vec<(OverlayId, OverlayRequest)>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_route_ids(&self) -> Vec<String> {
        self.live.iter().map(|(_, request)| request.route_id.clone()).collect()
    }

    pub fn creates(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, SurfaceCall::Create { .. }))
            .count()
    }
}

impl MapSurface for RecordingSurface {
    fn create_overlay(&mut self, request: OverlayRequest) -> OverlayId {
        self.next_id += 1;
        let id = OverlayId(self.next_id);
        self.calls.push(SurfaceCall::Create { route_id: request.route_id.clone(), overlay: id });
        self.live.push((id, request));
        id
    }

    fn remove_overlay(&mut self, overlay: OverlayId) {
        self.calls.push(SurfaceCall::Remove { overlay });
        self.live.retain(|(id, _)| *id != overlay);
    }
}
