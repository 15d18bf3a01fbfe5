pub mod height_checker;
pub mod image_classifier;
pub mod image_extractor;
pub mod pdf_extractor;

pub use height_checker::HeightChecker;
pub use image_classifier::{classify_presence, ImageClassifier, Presence};
pub use image_extractor::ImageExtractor;
pub use pdf_extractor::extract_pdf_images;
