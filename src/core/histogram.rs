use crate::core::region::Region;
use image::RgbImage;
use std::collections::HashMap;

pub type Rgb = [u8; 3];

/// Occurrence count of each distinct color inside a region.
#[derive(Debug, Clone, Default)]
pub struct ColorHistogram {
    counts: HashMap<Rgb, u32>,
}

impl ColorHistogram {
    /// Count the colors of `region`. Once `max_colors` distinct colors are
    /// tracked, pixels of colors not yet seen are skipped.
    pub fn from_region(image: &RgbImage, region: Region, max_colors: usize) -> Self {
        let region = region.clamp(image.width(), image.height());
        let mut counts: HashMap<Rgb, u32> = HashMap::new();

        for y in region.y1..region.y2 {
            for x in region.x1..region.x2 {
                let key = image.get_pixel(x, y).0;
                if let Some(count) = counts.get_mut(&key) {
                    *count += 1;
                } else if counts.len() < max_colors {
                    counts.insert(key, 1);
                }
            }
        }

        Self { counts }
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn distinct_colors(&self) -> usize {
        self.counts.len()
    }

    pub fn count(&self, color: Rgb) -> u32 {
        self.counts.get(&color).copied().unwrap_or(0)
    }

    /// Entries by count descending, then by color value.
    pub fn sorted(&self) -> Vec<(Rgb, u32)> {
        let mut entries: Vec<(Rgb, u32)> = self.counts.iter().map(|(c, n)| (*c, *n)).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        entries
    }

    /// Colors seen more than `min_count` times, or the `top_k` most frequent
    /// colors when none clears that bar.
    pub fn dominant_colors(&self, min_count: u32, top_k: usize) -> Vec<Rgb> {
        let sorted = self.sorted();
        let frequent: Vec<Rgb> = sorted
            .iter()
            .filter(|(_, count)| *count > min_count)
            .map(|(color, _)| *color)
            .collect();

        if !frequent.is_empty() {
            return frequent;
        }

        sorted.into_iter().take(top_k).map(|(color, _)| color).collect()
    }
}
