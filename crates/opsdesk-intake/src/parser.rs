// SPDX-FileCopyrightText: 2026 Opsdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Positional comma parser for the task seed message.
//!
//! One free-text line maps to up to four fields: title, category, country
//! code, project, in that fixed order. The parser never validates field
//! contents and never trims individual parts; validation happens at final
//! assembly in the engine.

/// Raw seed fields extracted from a single chat message.
///
/// Missing trailing fields are empty strings, never absent, so callers can
/// test emptiness uniformly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskSeed {
    pub title: String,
    pub category: String,
    pub country_code: String,
    pub project: String,
}

/// Parse one line of free text into the four positional seed fields.
///
/// Splits on `,` in encounter order, keeps the first four parts exactly as
/// written (including surrounding whitespace), pads missing trailing fields
/// with empty strings, and silently discards parts beyond the fourth. A
/// trimmed-empty input yields four empty fields.
pub fn parse_seed(input: &str) -> TaskSeed {
    if input.trim().is_empty() {
        return TaskSeed::default();
    }

    let mut parts = input.split(',');
    let mut next = || parts.next().unwrap_or("").to_string();
    TaskSeed {
        title: next(),
        category: next(),
        country_code: next(),
        project: next(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn full_seed_maps_positionally() {
        let seed = parse_seed("Fix bug,dev,AE,alpha");
        assert_eq!(seed.title, "Fix bug");
        assert_eq!(seed.category, "dev");
        assert_eq!(seed.country_code, "AE");
        assert_eq!(seed.project, "alpha");
    }

    #[test]
    fn missing_trailing_fields_pad_with_empty() {
        let seed = parse_seed("Fix bug,dev,AE");
        assert_eq!(seed.title, "Fix bug");
        assert_eq!(seed.category, "dev");
        assert_eq!(seed.country_code, "AE");
        assert_eq!(seed.project, "");
    }

    #[test]
    fn title_only() {
        let seed = parse_seed("Just a title");
        assert_eq!(seed.title, "Just a title");
        assert_eq!(seed.category, "");
    }

    #[test]
    fn extra_segments_are_discarded() {
        let seed = parse_seed("a,b,c,d,e,f");
        assert_eq!(
            seed,
            TaskSeed {
                title: "a".to_string(),
                category: "b".to_string(),
                country_code: "c".to_string(),
                project: "d".to_string(),
            }
        );
    }

    #[test]
    fn parts_are_not_trimmed() {
        let seed = parse_seed("Ship release, dev, AE, alpha");
        assert_eq!(seed.title, "Ship release");
        assert_eq!(seed.category, " dev");
        assert_eq!(seed.country_code, " AE");
        assert_eq!(seed.project, " alpha");
    }

    #[test]
    fn empty_input_yields_four_empty_fields() {
        assert_eq!(parse_seed(""), TaskSeed::default());
        assert_eq!(parse_seed("   "), TaskSeed::default());
    }

    #[test]
    fn all_commas_yields_four_empty_fields() {
        assert_eq!(parse_seed(",,,,,"), TaskSeed::default());
    }

    #[test]
    fn lone_comma_gives_empty_first_two_positions() {
        let seed = parse_seed("x,");
        assert_eq!(seed.title, "x");
        assert_eq!(seed.category, "");
        // A leading comma leaves the title empty; it is not "fixed".
        let seed = parse_seed(",dev");
        assert_eq!(seed.title, "");
        assert_eq!(seed.category, "dev");
    }

    proptest! {
        // Every input maps to exactly four positional fields: the first four
        // comma-separated parts verbatim, padded with empty strings.
        #[test]
        fn always_exactly_four_fields(input in ".*") {
            let seed = parse_seed(&input);
            if input.trim().is_empty() {
                prop_assert_eq!(seed, TaskSeed::default());
            } else {
                let parts: Vec<&str> = input.split(',').collect();
                let part = |i: usize| parts.get(i).copied().unwrap_or("");
                prop_assert_eq!(seed.title, part(0));
                prop_assert_eq!(seed.category, part(1));
                prop_assert_eq!(seed.country_code, part(2));
                prop_assert_eq!(seed.project, part(3));
            }
        }
    }
}
