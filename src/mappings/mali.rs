//! ARM Mali counter layout database

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Generation, GpuVendor};

/// Hardware counter block layout of a Mali GPU
///
/// Named after the internal product codename that introduced the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaliLayout {
    /// Mali-T820
    T82x,
    /// Mali-T830
    T83x,
    /// Mali-T860
    T86x,
    /// Mali-T880
    T88x,
    /// Mali-G71
    Tmix,
    /// Mali-G72
    Thex,
    /// Mali-G51
    Tsix,
    /// Mali-G76
    Tnox,
    /// Mali-G52
    Tgox,
    /// Mali-G31
    Tdvx,
    /// Mali-G77
    Ttrx,
    /// Mali-G57
    Tnax,
    /// Mali-G68
    Totx,
    /// Mali-G78 and Mali-G78AE
    Tbox,
    /// No known layout
    Unknown,
}

/// Architecture family grouping layouts that share counter numbering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaliFamily {
    /// Mali-T8xx
    Midgard,
    /// Mali-G31 through Mali-G76
    Bifrost,
    /// Mali-G57 and later
    Valhall,
}

/// One masked-comparison rule of the layout table
#[derive(Debug, Clone, Copy)]
pub struct LayoutRule {
    /// Expected value after masking
    pub id: u16,
    /// Mask applied to the product id before comparison
    pub id_mask: u16,
    /// Layout selected on match
    pub layout: MaliLayout,
}

/// Layout rules in evaluation order; the first matching rule wins
pub const MALI_LAYOUT_RULES: &[LayoutRule] = &[
    // Valhall
    LayoutRule { id: 0x9005, id_mask: 0xF00F, layout: MaliLayout::Tbox },
    LayoutRule { id: 0x9002, id_mask: 0xF00F, layout: MaliLayout::Tbox },
    LayoutRule { id: 0x9004, id_mask: 0xF00F, layout: MaliLayout::Totx },
    LayoutRule { id: 0x9000, id_mask: 0xF00F, layout: MaliLayout::Ttrx },
    LayoutRule { id: 0x9003, id_mask: 0xF00F, layout: MaliLayout::Tnax },
    LayoutRule { id: 0x9001, id_mask: 0xF00F, layout: MaliLayout::Tnax },

    // Bifrost
    LayoutRule { id: 0x7001, id_mask: 0xF00F, layout: MaliLayout::Tnox },
    LayoutRule { id: 0x7002, id_mask: 0xF00F, layout: MaliLayout::Tgox },
    LayoutRule { id: 0x7000, id_mask: 0xF00F, layout: MaliLayout::Tsix },
    LayoutRule { id: 0x7003, id_mask: 0xF00F, layout: MaliLayout::Tdvx },
    LayoutRule { id: 0x6001, id_mask: 0xF00F, layout: MaliLayout::Thex },
    LayoutRule { id: 0x6000, id_mask: 0xF00F, layout: MaliLayout::Tmix },

    // Midgard, exact product ids only
    LayoutRule { id: 0x0880, id_mask: 0xFFFF, layout: MaliLayout::T88x },
    LayoutRule { id: 0x0860, id_mask: 0xFFFF, layout: MaliLayout::T86x },
    LayoutRule { id: 0x0830, id_mask: 0xFFFF, layout: MaliLayout::T83x },
    LayoutRule { id: 0x0820, id_mask: 0xFFFF, layout: MaliLayout::T82x },
];

/// Map a 16-bit Mali product id to its counter layout
pub fn classify_mali(product_id: u16) -> MaliLayout {
    MALI_LAYOUT_RULES
        .iter()
        .find(|rule| product_id & rule.id_mask == rule.id)
        .map(|rule| rule.layout)
        .unwrap_or(MaliLayout::Unknown)
}

impl MaliLayout {
    /// Architecture family of this layout, `None` for [`MaliLayout::Unknown`]
    pub fn family(self) -> Option<MaliFamily> {
        match self {
            MaliLayout::T82x | MaliLayout::T83x | MaliLayout::T86x | MaliLayout::T88x => {
                Some(MaliFamily::Midgard)
            }
            MaliLayout::Tmix
            | MaliLayout::Thex
            | MaliLayout::Tsix
            | MaliLayout::Tnox
            | MaliLayout::Tgox
            | MaliLayout::Tdvx => Some(MaliFamily::Bifrost),
            MaliLayout::Ttrx | MaliLayout::Tnax | MaliLayout::Totx | MaliLayout::Tbox => {
                Some(MaliFamily::Valhall)
            }
            MaliLayout::Unknown => None,
        }
    }

    /// Marketing name of the products using this layout
    pub fn product_name(self) -> &'static str {
        match self {
            MaliLayout::T82x => "Mali-T820",
            MaliLayout::T83x => "Mali-T830",
            MaliLayout::T86x => "Mali-T860",
            MaliLayout::T88x => "Mali-T880",
            MaliLayout::Tmix => "Mali-G71",
            MaliLayout::Thex => "Mali-G72",
            MaliLayout::Tsix => "Mali-G51",
            MaliLayout::Tnox => "Mali-G76",
            MaliLayout::Tgox => "Mali-G52",
            MaliLayout::Tdvx => "Mali-G31",
            MaliLayout::Ttrx => "Mali-G77",
            MaliLayout::Tnax => "Mali-G57",
            MaliLayout::Totx => "Mali-G68",
            MaliLayout::Tbox => "Mali-G78",
            MaliLayout::Unknown => "Unknown Mali",
        }
    }
}

impl Generation for MaliLayout {
    const VENDOR: GpuVendor = GpuVendor::Mali;

    fn classify(hardware_id: u32) -> Self {
        classify_mali((hardware_id & 0xFFFF) as u16)
    }

    fn is_known(&self) -> bool {
        *self != MaliLayout::Unknown
    }
}

impl fmt::Display for MaliLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaliLayout::Unknown => write!(f, "unknown Mali layout"),
            layout => write!(f, "{} ({:?} layout)", layout.product_name(), layout),
        }
    }
}

impl fmt::Display for MaliFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaliFamily::Midgard => write!(f, "Midgard"),
            MaliFamily::Bifrost => write!(f, "Bifrost"),
            MaliFamily::Valhall => write!(f, "Valhall"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0x9005, MaliLayout::Tbox)]
    #[case(0x9002, MaliLayout::Tbox)]
    #[case(0x9004, MaliLayout::Totx)]
    #[case(0x9000, MaliLayout::Ttrx)]
    #[case(0x9093, MaliLayout::Tnax)]
    #[case(0x9001, MaliLayout::Tnax)]
    #[case(0x7211, MaliLayout::Tnox)]
    #[case(0x7002, MaliLayout::Tgox)]
    #[case(0x7000, MaliLayout::Tsix)]
    #[case(0x7003, MaliLayout::Tdvx)]
    #[case(0x6001, MaliLayout::Thex)]
    #[case(0x6000, MaliLayout::Tmix)]
    #[case(0x0880, MaliLayout::T88x)]
    #[case(0x0860, MaliLayout::T86x)]
    #[case(0x0830, MaliLayout::T83x)]
    #[case(0x0820, MaliLayout::T82x)]
    #[case(0x0881, MaliLayout::Unknown)]
    #[case(0xa002, MaliLayout::Unknown)]
    #[case(0x0000, MaliLayout::Unknown)]
    fn test_classify_mali(#[case] product_id: u16, #[case] expected: MaliLayout) {
        assert_eq!(classify_mali(product_id), expected);
    }

    #[test]
    fn test_g78_variants_share_layout() {
        assert_eq!(classify_mali(0x9005), classify_mali(0x9002));
        assert_ne!(classify_mali(0x0880), classify_mali(0x9005));
        // Midgard ids only match exactly, not under the Bifrost/Valhall mask
        assert_eq!(classify_mali(0x0880 | 0x0100), MaliLayout::Unknown);
    }

    #[test]
    fn test_at_most_one_rule_matches_every_id() {
        for product_id in 0..=u16::MAX {
            let matches = MALI_LAYOUT_RULES
                .iter()
                .filter(|rule| product_id & rule.id_mask == rule.id)
                .count();
            assert!(matches <= 1, "product id {product_id:#06x} matched {matches} rules");
        }
    }

    #[test]
    fn test_families() {
        assert_eq!(MaliLayout::T88x.family(), Some(MaliFamily::Midgard));
        assert_eq!(MaliLayout::Tmix.family(), Some(MaliFamily::Bifrost));
        assert_eq!(MaliLayout::Tbox.family(), Some(MaliFamily::Valhall));
        assert_eq!(MaliLayout::Unknown.family(), None);
    }

    #[test]
    fn test_generation_uses_low_half_word() {
        assert_eq!(MaliLayout::classify(0x0002_9002), MaliLayout::Tbox);
        assert!(!MaliLayout::classify(0x0999).is_known());
    }
}
