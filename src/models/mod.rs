pub mod loaders;
pub mod outcome;
pub mod probe;
pub mod report;

pub use loaders::{pair_file_names, scan_stem_pairs};
pub use outcome::{MissingReason, StemFindings, StemOutcome, TallImage};
pub use probe::{ContainerProbe, ImageProbe};
pub use report::RunReport;
