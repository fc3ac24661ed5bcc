use serde::Serialize;

/// Rectangle in pixel coordinates, half-open: `x1..x2` by `y1..y2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Region {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
}

impl Region {
    pub fn width(&self) -> u32 {
        self.x2.saturating_sub(self.x1)
    }

    pub fn height(&self) -> u32 {
        self.y2.saturating_sub(self.y1)
    }

    pub fn area(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.area() == 0
    }

    /// Clip to an image of the given size.
    pub fn clamp(&self, width: u32, height: u32) -> Region {
        Region {
            x1: self.x1.min(width),
            y1: self.y1.min(height),
            x2: self.x2.min(width),
            y2: self.y2.min(height),
        }
    }
}

/// Crop box expressed in whole percent of the image width and height.
#[derive(Debug, Clone, Copy)]
struct CropRatios {
    left: u32,
    top: u32,
    right: u32,
    bottom: u32,
}

impl CropRatios {
    fn apply(&self, width: u32, height: u32) -> Region {
        Region {
            x1: scale(width, self.left),
            y1: scale(height, self.top),
            x2: scale(width, self.right),
            y2: scale(height, self.bottom),
        }
    }
}

const FACE: CropRatios = CropRatios { left: 25, top: 25, right: 75, bottom: 75 };
const HAIR: CropRatios = CropRatios { left: 10, top: 5, right: 90, bottom: 35 };
const EYES: CropRatios = CropRatios { left: 30, top: 30, right: 70, bottom: 50 };

// floor(dim * percent / 100) without going through floats
fn scale(dim: u32, percent: u32) -> u32 {
    (dim as u64 * percent as u64 / 100) as u32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FaceRegions {
    pub face: Region,
    pub hair: Region,
    pub eyes: Region,
}

/// Compute the face, hair and eye sample boxes for an image of `width` x `height`.
pub fn extract(width: u32, height: u32) -> FaceRegions {
    FaceRegions {
        face: FACE.apply(width, height),
        hair: HAIR.apply(width, height),
        eyes: EYES.apply(width, height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_200x200() {
        let regions = extract(200, 200);

        assert_eq!(regions.face, Region { x1: 50, y1: 50, x2: 150, y2: 150 });
        assert_eq!(regions.hair, Region { x1: 20, y1: 10, x2: 180, y2: 70 });
        assert_eq!(regions.eyes, Region { x1: 60, y1: 60, x2: 140, y2: 100 });
    }

    #[test]
    fn test_boundaries_truncate() {
        // 0.25 * 10 = 2.5, 0.75 * 10 = 7.5, 0.05 * 10 = 0.5, 0.35 * 10 = 3.5
        let regions = extract(10, 10);

        assert_eq!(regions.face, Region { x1: 2, y1: 2, x2: 7, y2: 7 });
        assert_eq!(regions.hair, Region { x1: 1, y1: 0, x2: 9, y2: 3 });
        assert_eq!(regions.eyes, Region { x1: 3, y1: 3, x2: 7, y2: 5 });
    }

    #[test]
    fn test_regions_contained_with_positive_area() {
        for width in 4..=64 {
            for height in 4..=64 {
                let regions = extract(width, height);
                for region in [regions.face, regions.hair, regions.eyes] {
                    assert!(region.x2 <= width && region.y2 <= height, "{width}x{height}: {region:?}");
                    assert!(region.x1 < region.x2 && region.y1 < region.y2, "{width}x{height}: {region:?}");
                    assert!(!region.is_empty());
                }
            }
        }
    }

    #[test]
    fn test_degenerate_image_yields_empty_regions() {
        let regions = extract(1, 1);
        assert!(regions.face.is_empty());
        assert!(regions.hair.is_empty());
        assert!(regions.eyes.is_empty());

        let regions = extract(0, 0);
        assert_eq!(regions.face.area(), 0);
    }

    #[test]
    fn test_clamp() {
        let region = Region { x1: 5, y1: 5, x2: 50, y2: 50 };
        assert_eq!(region.clamp(20, 10), Region { x1: 5, y1: 5, x2: 20, y2: 10 });
        assert!(region.clamp(4, 4).is_empty());
    }
}
