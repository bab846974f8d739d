//! Region of interest and the inset scan rectangle.

use super::error::NettingError;

/// Axis-aligned pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub left: usize,
    pub top: usize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    pub fn new(left: usize, top: usize, width: usize, height: usize) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// The whole image.
    pub fn full(width: usize, height: usize) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Exclusive right edge, saturating at `usize::MAX`.
    pub fn right(&self) -> usize {
        self.left.saturating_add(self.width)
    }

    /// Exclusive bottom edge, saturating at `usize::MAX`.
    pub fn bottom(&self) -> usize {
        self.top.saturating_add(self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.left && x < self.right() && y >= self.top && y < self.bottom()
    }

    /// Check that the rectangle lies inside a `width` x `height` image.
    pub fn check_within(&self, width: usize, height: usize) -> Result<(), NettingError> {
        let inside = match (
            self.left.checked_add(self.width),
            self.top.checked_add(self.height),
        ) {
            (Some(right), Some(bottom)) => right <= width && bottom <= height,
            _ => false,
        };
        if !inside {
            return Err(NettingError::RegionOutOfBounds {
                left: self.left,
                top: self.top,
                width: self.width,
                height: self.height,
                image_width: width,
                image_height: height,
            });
        }
        Ok(())
    }
}

/// Sub-rectangle of `roi` whose pixels keep every ray sample in bounds.
///
/// Rows are `[max(top, radius), min(bottom, height - radius))`, columns are
/// `[left + radius, right - radius)`. Ray offsets never exceed `radius - 1`
/// in either direction, so this margin is sufficient. The result is empty
/// when the region is too small for the radius.
///
/// `roi` must lie inside the image, so columns need no clamping.
pub fn scan_rect(roi: &Rect, image_height: usize, radius: usize) -> Rect {
    let top = roi.top.max(radius);
    let bottom = roi.bottom().min(image_height.saturating_sub(radius));
    let left = roi.left + radius;
    let right = roi.right().saturating_sub(radius);

    if top >= bottom || left >= right {
        return Rect::new(left.min(right), top.min(bottom), 0, 0);
    }
    Rect::new(left, top, right - left, bottom - top)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_image_inset_by_radius() {
        let rect = scan_rect(&Rect::full(100, 80), 80, 10);
        assert_eq!(rect, Rect::new(10, 10, 80, 60));
    }

    #[test]
    fn test_interior_roi_inset_on_all_sides() {
        let roi = Rect::new(20, 30, 40, 20);
        let rect = scan_rect(&roi, 100, 5);
        assert_eq!(rect, Rect::new(25, 35, 30, 10));
    }

    #[test]
    fn test_top_clamped_to_radius_only() {
        // A tile starting mid-image keeps its own top row.
        let roi = Rect::new(0, 40, 100, 20);
        let rect = scan_rect(&roi, 100, 10);
        assert_eq!(rect.top, 40);
        assert_eq!(rect.bottom(), 60);
    }

    #[test]
    fn test_bottom_clamped_to_image() {
        let roi = Rect::new(0, 80, 100, 20);
        let rect = scan_rect(&roi, 100, 10);
        assert_eq!(rect.top, 80);
        assert_eq!(rect.bottom(), 90);
    }

    #[test]
    fn test_small_roi_is_empty() {
        let roi = Rect::new(10, 10, 7, 30);
        assert!(scan_rect(&roi, 100, 4).is_empty());
        let roi = Rect::new(10, 10, 30, 8);
        assert!(scan_rect(&roi, 100, 4).is_empty());
    }

    #[test]
    fn test_radius_larger_than_image() {
        assert!(scan_rect(&Rect::full(5, 5), 5, 50).is_empty());
    }

    #[test]
    fn test_check_within() {
        assert!(Rect::new(0, 0, 10, 10).check_within(10, 10).is_ok());
        assert!(Rect::new(1, 0, 10, 10).check_within(10, 10).is_err());
        assert!(Rect::new(0, 5, 10, 6).check_within(10, 10).is_err());
    }

    #[test]
    fn test_check_within_rejects_overflowing_region() {
        let err = Rect::new(usize::MAX, 0, 2, 2).check_within(10, 10).unwrap_err();
        assert!(matches!(err, NettingError::RegionOutOfBounds { left: usize::MAX, .. }));
        assert!(Rect::new(0, usize::MAX - 1, 1, 5).check_within(10, 10).is_err());
        assert!(Rect::new(3, 3, usize::MAX, 1).check_within(10, 10).is_err());
    }

    #[test]
    fn test_edges_saturate() {
        let rect = Rect::new(usize::MAX, 1, 2, usize::MAX);
        assert_eq!(rect.right(), usize::MAX);
        assert_eq!(rect.bottom(), usize::MAX);
        assert!(!rect.contains(0, 0));
    }

    #[test]
    fn test_contains() {
        let rect = Rect::new(2, 3, 4, 5);
        assert!(rect.contains(2, 3));
        assert!(rect.contains(5, 7));
        assert!(!rect.contains(6, 7));
        assert!(!rect.contains(5, 8));
    }
}
