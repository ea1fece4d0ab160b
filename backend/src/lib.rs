//! Line, region and character statistics for ALTO and PAGE XML corpora.

pub mod types;
pub mod error;
pub mod logger;
pub mod encoding;
pub mod xml_tree;
pub mod counter;
pub mod normalize;
pub mod labels;
pub mod parsers;
pub mod aggregator;
pub mod corpus;

pub use aggregator::{Aggregation, Aggregator};
pub use counter::FrequencyMap;
pub use error::HumgError;
pub use labels::UNKNOWN_SEGMENT_TYPE;
pub use parsers::{LayoutParser, SegmentCounts};
pub use types::{Dialect, NormalizationForm, RunConfig};
