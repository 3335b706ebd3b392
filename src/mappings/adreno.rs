//! Qualcomm Adreno series classification
//!
//! KGSL reports the GPU as a decimal product number (e.g. 640 for Adreno 640).

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Generation, GpuVendor};

/// Adreno hardware series with distinct counter selector tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdrenoSeries {
    /// Adreno 6xx (and the 702, which shares its register layout)
    A6xx,
    /// Adreno 5xx
    A5xx,
    /// Not a series this library can sample
    Unknown,
}

/// Classify a KGSL `gpu_id` into an Adreno series
///
/// Predicates are evaluated in declaration order; the first match wins.
pub fn classify_adreno(gpu_id: u32) -> AdrenoSeries {
    if (600..700).contains(&gpu_id) || gpu_id == 702 {
        return AdrenoSeries::A6xx;
    }
    if (500..600).contains(&gpu_id) {
        return AdrenoSeries::A5xx;
    }
    AdrenoSeries::Unknown
}

impl Generation for AdrenoSeries {
    const VENDOR: GpuVendor = GpuVendor::Adreno;

    fn classify(hardware_id: u32) -> Self {
        classify_adreno(hardware_id)
    }

    fn is_known(&self) -> bool {
        *self != AdrenoSeries::Unknown
    }
}

impl fmt::Display for AdrenoSeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdrenoSeries::A6xx => write!(f, "Adreno A6xx"),
            AdrenoSeries::A5xx => write!(f, "Adreno A5xx"),
            AdrenoSeries::Unknown => write!(f, "unknown Adreno"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(600, AdrenoSeries::A6xx)]
    #[case(610, AdrenoSeries::A6xx)]
    #[case(640, AdrenoSeries::A6xx)]
    #[case(699, AdrenoSeries::A6xx)]
    #[case(702, AdrenoSeries::A6xx)]
    #[case(0x205, AdrenoSeries::A5xx)]
    #[case(500, AdrenoSeries::A5xx)]
    #[case(599, AdrenoSeries::A5xx)]
    #[case(0x999, AdrenoSeries::Unknown)]
    #[case(700, AdrenoSeries::Unknown)]
    #[case(701, AdrenoSeries::Unknown)]
    #[case(499, AdrenoSeries::Unknown)]
    #[case(0, AdrenoSeries::Unknown)]
    fn test_classify_adreno(#[case] gpu_id: u32, #[case] expected: AdrenoSeries) {
        assert_eq!(classify_adreno(gpu_id), expected);
    }

    #[test]
    fn test_classification_is_total_and_deterministic() {
        for gpu_id in 0..2048u32 {
            let first = AdrenoSeries::classify(gpu_id);
            assert_eq!(first, AdrenoSeries::classify(gpu_id));
            let in_known_range = (500..700).contains(&gpu_id) || gpu_id == 702;
            assert_eq!(first.is_known(), in_known_range, "gpu_id {gpu_id}");
        }
    }
}
