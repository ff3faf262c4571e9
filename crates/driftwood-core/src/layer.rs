use serde::{Deserialize, Serialize};

/// Draw-order tag handed to the renderer. Variants are listed back to front.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ZLayer {
    Bg,
    Clouds,
    BgTiles,
    Path,
    BgDetails,
    #[default]
    Main,
    Water,
    Fg,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draw_order() {
        assert!(ZLayer::Bg < ZLayer::BgTiles);
        assert!(ZLayer::BgDetails < ZLayer::Main);
        assert!(ZLayer::Main < ZLayer::Fg);
    }
}
