use serde::{Deserialize, Serialize};

use driftwood_core::geom::Rect;
use driftwood_core::layer::ZLayer;

use crate::actor::{ActorId, ActorKind};

/// What the renderer needs to draw one actor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderItem {
    pub id: ActorId,
    pub kind: ActorKind,
    pub sprite: String,
    pub rect: Rect,
    pub state: String,
    /// Visible frame, already wrapped to the state's frame count.
    pub frame: usize,
    pub flip_x: bool,
    pub flip_y: bool,
    pub z: ZLayer,
}

/// Draw list for one tick, back to front.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub elapsed: f64,
    /// Point the camera should follow (the player's hitbox center).
    pub focus: (f32, f32),
    pub items: Vec<RenderItem>,
}

impl RenderFrame {
    /// Sort by z-layer, keeping spawn order within a layer.
    pub fn sort(&mut self) {
        self.items.sort_by_key(|item| (item.z, item.id));
    }

    pub fn encode(&self) -> Result<Vec<u8>, rmp_serde::encode::Error> {
        rmp_serde::to_vec(self)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, rmp_serde::decode::Error> {
        rmp_serde::from_slice(bytes).inspect_err(|e| {
            tracing::debug!(error = %e, len = bytes.len(), "Failed to decode render frame");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u32, z: ZLayer) -> RenderItem {
        RenderItem {
            id: ActorId(id),
            kind: ActorKind::Decoration,
            sprite: "candle".into(),
            rect: Rect::new(0.0, 0.0, 10.0, 10.0),
            state: "default".into(),
            frame: 0,
            flip_x: false,
            flip_y: false,
            z,
        }
    }

    #[test]
    fn sorted_back_to_front() {
        let mut frame = RenderFrame {
            items: vec![item(1, ZLayer::Fg), item(3, ZLayer::Main), item(2, ZLayer::Main)],
            ..Default::default()
        };
        frame.sort();
        let order: Vec<u32> = frame.items.iter().map(|i| i.id.0).collect();
        assert_eq!(order, vec![2, 3, 1]);
    }

    #[test]
    fn msgpack_roundtrip() {
        let frame = RenderFrame {
            elapsed: 1.5,
            focus: (10.0, 20.0),
            items: vec![item(1, ZLayer::BgDetails)],
        };
        let bytes = frame.encode().unwrap();
        assert_eq!(RenderFrame::decode(&bytes).unwrap(), frame);
    }

    #[test]
    fn garbage_fails_to_decode() {
        assert!(RenderFrame::decode(&[0xc1, 0x00, 0x13]).is_err());
    }
}
