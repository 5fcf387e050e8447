use crate::models::Vec2;

/// Represents a square region in 2D space.
///
/// Each `Quad` has a center position (cx, cy) and a half-size, which is half the length
/// of one side of the square. Children are indexed by quadrant `(x >= cx) + 2 * (y >= cy)`:
///
/// | quadrant | region       |
/// |----------|--------------|
/// | 0        | bottom-left  |
/// | 1        | bottom-right |
/// | 2        | top-left     |
/// | 3        | top-right    |
///
/// # Examples
///
/// ```
/// use rs_treecode::tree::Quad;
///
/// // The unit square [0, 1)²
/// let quad = Quad::unit();
///
/// assert!(quad.contains(0.5, 0.5));
/// assert!(!quad.contains(1.0, 0.5)); // upper bound is exclusive
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quad {
    pub cx: f32,        // center x-coordinate
    pub cy: f32,        // center y-coordinate
    pub half_size: f32, // half the length of one side
}

impl Quad {
    /// The square `[0, side)²`.
    pub fn from_side(side: f32) -> Self {
        let h = side * 0.5;
        Quad { cx: h, cy: h, half_size: h }
    }

    pub fn unit() -> Self {
        Quad::from_side(1.0)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.cx, self.cy)
    }

    /// Full side length of the square.
    pub fn size(&self) -> f32 {
        self.half_size * 2.0
    }

    /// Returns true if the point (x, y) is inside this quad.
    ///
    /// The quad's boundary is inclusive on the lower bounds and exclusive on the upper bounds,
    /// matching the `>=` test of [`Quad::quadrant_of`].
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.cx - self.half_size &&
            x <  self.cx + self.half_size &&
            y >= self.cy - self.half_size &&
            y <  self.cy + self.half_size
    }

    pub fn contains_point(&self, p: Vec2) -> bool {
        self.contains(p.x, p.y)
    }

    /// Quadrant index of `p` relative to this quad's center.
    ///
    /// Points outside the quad still map to the nearest edge quadrant.
    ///
    /// ```
    /// use rs_treecode::models::Vec2;
    /// use rs_treecode::tree::Quad;
    ///
    /// let quad = Quad::unit();
    /// assert_eq!(quad.quadrant_of(Vec2::new(0.25, 0.25)), 0);
    /// assert_eq!(quad.quadrant_of(Vec2::new(0.75, 0.25)), 1);
    /// assert_eq!(quad.quadrant_of(Vec2::new(0.25, 0.75)), 2);
    /// assert_eq!(quad.quadrant_of(Vec2::new(0.5, 0.5)), 3);
    /// ```
    #[inline]
    pub fn quadrant_of(&self, p: Vec2) -> usize {
        (p.x >= self.cx) as usize + 2 * (p.y >= self.cy) as usize
    }

    /// The child square for `quadrant`.
    #[inline]
    pub fn child(&self, quadrant: usize) -> Quad {
        let hs = self.half_size / 2.0;
        let dx = if quadrant & 1 == 1 { hs } else { -hs };
        let dy = if quadrant & 2 == 2 { hs } else { -hs };
        Quad { cx: self.cx + dx, cy: self.cy + dy, half_size: hs }
    }

    /// Subdivides the quad into its four children, in quadrant order.
    ///
    /// ```
    /// use rs_treecode::tree::Quad;
    ///
    /// let [bl, br, tl, tr] = Quad::unit().subdivide();
    /// assert_eq!((bl.cx, bl.cy), (0.25, 0.25));
    /// assert_eq!((br.cx, br.cy), (0.75, 0.25));
    /// assert_eq!((tl.cx, tl.cy), (0.25, 0.75));
    /// assert_eq!((tr.cx, tr.cy), (0.75, 0.75));
    /// assert_eq!(tr.half_size, 0.25);
    /// ```
    pub fn subdivide(&self) -> [Quad; 4] {
        [self.child(0), self.child(1), self.child(2), self.child(3)]
    }
}
