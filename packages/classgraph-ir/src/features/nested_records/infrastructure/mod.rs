mod normalizer;

pub use normalizer::{DecodedUnit, NormalizeOutcome, RecordNormalizer};
