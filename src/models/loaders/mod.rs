pub mod stem_pairs;

pub use stem_pairs::{pair_file_names, scan_stem_pairs};
