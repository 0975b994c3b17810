use std::sync::Arc;
use crate::{FilterMode, Texture};

/// How a geom blends with what is behind it.
#[derive(Copy, Clone, Eq, PartialEq, Default, Debug)]
pub enum Transparency {
    #[default]
    None,
    Alpha,
}

/// Texture and blending state a geom is rendered with.
#[derive(Clone, Debug)]
pub struct RenderState {
    pub texture: Arc<Texture>,
    pub mag_filter: FilterMode,
    pub transparency: Transparency,
}

impl RenderState {

    /// State that samples the texture given, with alpha blending when the texture has an alpha channel.
    pub fn make(texture: Arc<Texture>, mag_filter: FilterMode) -> Self {
        let transparency = match texture.has_alpha() {
            true => Transparency::Alpha,
            false => Transparency::None,
        };
        Self { texture, mag_filter, transparency }
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;
    use crate::testing::{rgb_png, rgba_png};
    use crate::{FilterMode, RenderState, Texture, Transparency};

    #[test]
    fn transparency_follows_alpha() {
        let opaque = Arc::new(Texture::from_bytes(&rgb_png(1, 1), "a.png").unwrap());
        let state = RenderState::make(opaque, FilterMode::Nearest);
        assert_eq!(Transparency::None, state.transparency);
        assert_eq!(FilterMode::Nearest, state.mag_filter);

        let translucent = Arc::new(Texture::from_bytes(&rgba_png(1, 1), "b.png").unwrap());
        let state = RenderState::make(translucent, FilterMode::Linear);
        assert_eq!(Transparency::Alpha, state.transparency);
    }
}
