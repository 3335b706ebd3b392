//! Logical counter identifiers and their hardware encoding
//!
//! A logical counter id packs its hardware group in the bits above
//! [`GROUP_SHIFT`]; only the per-generation selector needs a table lookup.

pub mod adreno;
pub mod mali;

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{HpcError, HpcResult};
use crate::mappings::Generation;

pub use adreno::{A6xxCounter, AdrenoCounter};
pub use mali::{MaliBifrostCounter, MaliCounter, MaliValhallCounter};

/// Shift separating the group from the in-group index of a logical id
pub const GROUP_SHIFT: u32 = 8;
/// Mask extracting the in-group index of a logical id
pub const SELECTOR_MASK: u32 = (1 << GROUP_SHIFT) - 1;

/// Hardware address of a counter within a generation's register layout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CounterSlot {
    /// Counter group (KGSL perfcounter group or Mali counter block)
    pub group_id: u32,
    /// Countable selector within the group
    pub selector: u32,
}

impl CounterSlot {
    /// Create a slot from its group and selector
    pub const fn new(group_id: u32, selector: u32) -> Self {
        Self { group_id, selector }
    }

    /// Split a packed `(group << 8) | selector` value
    pub const fn from_packed(packed: u32) -> Self {
        Self::new(group_of(packed), packed & SELECTOR_MASK)
    }
}

impl fmt::Display for CounterSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}:{}", self.group_id, self.selector)
    }
}

/// Group id carried in the high bits of a logical counter id
pub const fn group_of(raw: u32) -> u32 {
    raw >> GROUP_SHIFT
}

/// A caller-facing counter request that can be encoded for a generation
pub trait Counter: Copy + fmt::Debug + Send + Sync + 'static {
    /// Classification whose generations this counter knows how to encode
    type Generation: Generation;

    /// Hardware name of the counter
    fn name(&self) -> Cow<'static, str>;

    /// Resolve the hardware slot of this counter on `generation`
    ///
    /// Fails with [`HpcError::UnsupportedCounter`] when the generation has no
    /// entry for the counter; never returns a made-up slot.
    fn encode(self, generation: Self::Generation) -> HpcResult<CounterSlot>;
}

pub(crate) fn unsupported<C: Counter>(counter: &C, generation: C::Generation) -> HpcError {
    HpcError::UnsupportedCounter {
        counter: counter.name().into_owned(),
        generation: generation.to_string(),
    }
}

/// Encode every counter in caller order, stopping at the first unsupported one
pub fn encode_all<C: Counter>(counters: &[C], generation: C::Generation) -> HpcResult<Vec<CounterSlot>> {
    counters.iter().map(|counter| counter.encode(generation)).collect()
}

/// Declare a counter enum backed by a static table
///
/// Each entry is `Variant = "HARDWARE_NAME", raw_id;` and generates the enum
/// plus `ALL`, `raw`, `from_raw`, `hardware_name` and `FromStr`.
macro_rules! counter_table {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $variant:ident = $hw_name:literal, $raw:expr; )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[repr(u32)]
        #[allow(missing_docs)]
        pub enum $name {
            $( $variant = $raw, )*
        }

        impl $name {
            /// Every counter of this table, in table order
            pub const ALL: &'static [$name] = &[ $( $name::$variant, )* ];

            /// Packed logical id of the counter
            pub const fn raw(self) -> u32 {
                self as u32
            }

            /// Look a counter up by its packed logical id
            pub fn from_raw(raw: u32) -> Option<Self> {
                Self::ALL.iter().copied().find(|counter| counter.raw() == raw)
            }

            /// Upper-case hardware name of the counter
            pub fn hardware_name(self) -> &'static str {
                match self {
                    $( $name::$variant => $hw_name, )*
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::HpcError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|counter| counter.hardware_name().eq_ignore_ascii_case(s))
                    .ok_or_else(|| {
                        $crate::error::HpcError::InvalidParameter(format!(
                            "unknown {} counter: {}",
                            stringify!($name),
                            s
                        ))
                    })
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.hardware_name())
            }
        }
    };
}

pub(crate) use counter_table;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_from_packed() {
        assert_eq!(CounterSlot::from_packed(0x0A05), CounterSlot::new(0x0A, 5));
        assert_eq!(CounterSlot::from_packed(0x1A1D), CounterSlot::new(0x1A, 29));
        assert_eq!(group_of(0x0203), 2);
    }

    #[test]
    fn test_slot_display() {
        assert_eq!(CounterSlot::new(0x19, 7).to_string(), "0x19:7");
    }
}
