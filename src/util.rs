use fxhash::FxHashMap;
use glam::Vec2;

/**
 * Hash map with a fast non-cryptographically secure hash function.
 */
pub type HashMap<K, V> = FxHashMap<K, V>;

/**
 * Hash map whose hash function is only suitable for small int types.
 * Outputs the original integer when used.
 */
pub type IntMap<K, V> = identity_hash::IntMap<K, V>;


/// Basic rectangle primitive.
#[derive(Copy, Clone, PartialEq, Default, Debug)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// Rectangle spanning left..right and bottom..top.
    pub fn from_frame(left: f32, right: f32, bottom: f32, top: f32) -> Self {
        Self::new(left, bottom, right - left, top - bottom)
    }

    pub fn left(&self) -> f32 { self.origin.x }
    pub fn right(&self) -> f32 { self.origin.x + self.size.x }
    pub fn bottom(&self) -> f32 { self.origin.y }
    pub fn top(&self) -> f32 { self.origin.y + self.size.y }
}
