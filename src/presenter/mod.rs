// Presenter module: plain-text rendering of the normalized records.

pub mod share;

pub use share::ShareMessage;

use crate::model::{CategoryGroup, Personality};
use crate::utils::to_kebab_case;
use std::fmt;

/// Grouped listing, one section per category in display order.
pub struct Listing<'a, 'b>(pub &'a [CategoryGroup<'b>]);

impl fmt::Display for Listing<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, group) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "== {} (#{}) ==", group.category, to_kebab_case(&group.category))?;
            for p in &group.items {
                writeln!(f, "  #{:<4}{} ({})", p.rank, p.name, p.role)?;
            }
        }
        Ok(())
    }
}

/// Detail view of a single record.
pub struct Detail<'a>(pub &'a Personality);

impl fmt::Display for Detail<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.0;
        writeln!(f, "#{} • {}", p.rank, p.sector)?;
        writeln!(f, "{}", p.name)?;
        writeln!(f, "{}", p.role)?;
        writeln!(f, "Image: {}", p.image)?;
        writeln!(f)?;
        writeln!(f, "\"{}\"", p.impact)?;
        writeln!(f)?;
        writeln!(f, "{}", p.bio)?;
        writeln!(f)?;
        writeln!(f, "Key achievements:")?;
        for a in &p.achievements {
            writeln!(f, "  - {}", a)?;
        }
        Ok(())
    }
}

pub fn find_by_rank(records: &[Personality], rank: u32) -> Option<&Personality> {
    records.iter().find(|p| p.rank == rank)
}
