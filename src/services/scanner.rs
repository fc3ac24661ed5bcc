use crate::services::analysis::{AnalysisReport, ColorAnalysisService};
use indicatif::ProgressBar;
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Invalid path: {path}")]
    InvalidPath { path: String },

    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub recursive: bool,
    pub max_depth: Option<usize>,
    pub supported_formats: Vec<String>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            recursive: true,
            max_depth: None,
            supported_formats: ["jpg", "jpeg", "png", "gif", "bmp", "tiff", "tif", "webp"]
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }
}

/// One line of a batch report.
#[derive(Debug, Clone, Serialize)]
pub struct BatchRecord {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<AnalysisReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub struct ScannerService {
    options: ScanOptions,
}

impl ScannerService {
    pub fn new(options: ScanOptions) -> Self {
        Self { options }
    }

    fn is_supported(&self, path: &Path) -> bool {
        path.extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .is_some_and(|ext| self.options.supported_formats.contains(&ext))
    }

    /// Walk `dir` and return the image files in it, sorted by path.
    pub fn discover(&self, dir: &Path) -> Result<Vec<PathBuf>, ScanError> {
        if !dir.is_dir() {
            return Err(ScanError::InvalidPath {
                path: dir.display().to_string(),
            });
        }

        let mut walker = WalkDir::new(dir).sort_by_file_name();
        if !self.options.recursive {
            walker = walker.max_depth(1);
        } else if let Some(max_depth) = self.options.max_depth {
            walker = walker.max_depth(max_depth);
        }

        let mut images = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() > 0 => {
                    log::warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
                Err(e) => return Err(e.into()),
            };
            if entry.file_type().is_file() && self.is_supported(entry.path()) {
                images.push(entry.into_path());
            }
        }

        log::debug!("Found {} image(s) under {}", images.len(), dir.display());
        Ok(images)
    }

    /// Analyze every file in parallel. Records come back in input order.
    pub fn analyze_all(
        &self,
        service: &ColorAnalysisService,
        paths: &[PathBuf],
        progress: &ProgressBar,
    ) -> Vec<BatchRecord> {
        paths
            .par_iter()
            .map(|path| {
                let record = match service.analyze_file(path) {
                    Ok(report) => BatchRecord {
                        path: path.to_string_lossy().into_owned(),
                        report: Some(report),
                        error: None,
                    },
                    Err(e) => {
                        log::warn!("Failed to read {}: {}", path.display(), e);
                        BatchRecord {
                            path: path.to_string_lossy().into_owned(),
                            report: None,
                            error: Some(e.to_string()),
                        }
                    }
                };
                progress.inc(1);
                record
            })
            .collect()
    }
}

impl Default for ScannerService {
    fn default() -> Self {
        Self::new(ScanOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::ColorType;
    use crate::core::classifier::ClassificationMethod;
    use image::{Rgb, RgbImage};
    use std::fs;
    use tempfile::TempDir;

    fn write_png(path: &Path, color: [u8; 3]) {
        RgbImage::from_pixel(40, 40, Rgb(color)).save(path).unwrap();
    }

    #[test]
    fn test_discover_filters_by_extension() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir(root.join("nested")).unwrap();

        write_png(&root.join("a.png"), [120, 120, 120]);
        write_png(&root.join("nested/b.PNG"), [120, 120, 120]);
        fs::write(root.join("notes.txt"), "not an image").unwrap();

        let scanner = ScannerService::default();
        let images = scanner.discover(root).unwrap();

        assert_eq!(images.len(), 2);
        assert!(images.iter().all(|p| p.extension().is_some()));
        assert!(!images.iter().any(|p| p.ends_with("notes.txt")));
    }

    #[test]
    fn test_non_recursive_scan() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir(root.join("nested")).unwrap();
        write_png(&root.join("top.png"), [1, 2, 3]);
        write_png(&root.join("nested/deep.png"), [1, 2, 3]);

        let scanner = ScannerService::new(ScanOptions {
            recursive: false,
            ..ScanOptions::default()
        });
        let images = scanner.discover(root).unwrap();

        assert_eq!(images, vec![root.join("top.png")]);
    }

    #[test]
    fn test_missing_directory() {
        let scanner = ScannerService::default();
        let result = scanner.discover(Path::new("/definitely/not/a/dir"));
        assert!(matches!(result, Err(ScanError::InvalidPath { .. })));
    }

    #[test]
    fn test_analyze_all_keeps_order_and_tolerates_bad_files() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write_png(&root.join("1.png"), [120, 120, 120]);
        fs::write(root.join("2.jpg"), b"corrupt").unwrap();
        write_png(&root.join("3.png"), [120, 120, 120]);

        let scanner = ScannerService::default();
        let service = ColorAnalysisService::default();
        let paths = scanner.discover(root).unwrap();
        let progress = ProgressBar::hidden();

        let records = scanner.analyze_all(&service, &paths, &progress);

        assert_eq!(records.len(), 3);
        assert!(records[0].path.ends_with("1.png"));
        assert!(records[2].path.ends_with("3.png"));
        assert_eq!(progress.position(), 3);

        let first = records[0].report.as_ref().unwrap();
        assert_eq!(first.color_type_id, ColorType::NeutralSummer);

        let corrupt = records[1].report.as_ref().unwrap();
        assert_eq!(corrupt.method, ClassificationMethod::Random);
    }

    #[test]
    fn test_record_serializes_as_one_line() {
        let record = BatchRecord {
            path: "missing.png".to_string(),
            report: None,
            error: Some("No such file".to_string()),
        };
        let line = serde_json::to_string(&record).unwrap();
        assert_eq!(line, r#"{"path":"missing.png","error":"No such file"}"#);
    }
}
