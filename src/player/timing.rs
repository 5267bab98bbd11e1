//! Timing - turns a symbol sequence into absolute tone events
//!
//! All spacing is a whole number of units:
//!
//! | element            | units |
//! |--------------------|-------|
//! | dot                | 1     |
//! | dash               | 3     |
//! | gap inside letter  | 1     |
//! | gap between letters| 3     |
//! | word separator `/` | 7     |

use std::time::Duration;

use super::options::{PlayOptions, UnmappedSymbol};
use crate::audio::ToneEvent;
use crate::codec::{DASH, DOT, WORD_SEPARATOR};

pub const DOT_UNITS: u32 = 1;
pub const DASH_UNITS: u32 = 3;
pub const SYMBOL_GAP_UNITS: u32 = 1;
pub const LETTER_GAP_UNITS: u32 = 3;
pub const WORD_GAP_UNITS: u32 = 7;

/// Tone events for one sequence plus its total length
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeline {
    /// Events in strictly increasing start order
    pub events: Vec<ToneEvent>,
    /// Time from `start` to the end of the last element
    pub elapsed: Duration,
}

/// Lay out `sequence` on the clock beginning at `start`.
///
/// Empty tokens from repeated spaces are ignored. There is no gap before a
/// `/` and none after the last token.
pub fn plan(sequence: &str, options: &PlayOptions, start: Duration) -> Timeline {
    let tokens: Vec<&str> = sequence.split(' ').filter(|t| !t.is_empty()).collect();
    let mut events = Vec::new();
    let mut t = start;

    for (i, token) in tokens.iter().enumerate() {
        if *token == WORD_SEPARATOR {
            t += options.units(WORD_GAP_UNITS);
            continue;
        }

        let symbols: Vec<char> = token.chars().collect();
        for (j, &symbol) in symbols.iter().enumerate() {
            let length = match symbol {
                DOT => options.units(DOT_UNITS),
                DASH => options.units(DASH_UNITS),
                _ => match options.unmapped_policy() {
                    UnmappedSymbol::Skip => Duration::ZERO,
                    UnmappedSymbol::Rest => options.units(DASH_UNITS),
                },
            };

            if symbol == DOT || symbol == DASH {
                events.push(ToneEvent::new(options.frequency(), t, length));
            }
            t += length;

            if j + 1 < symbols.len() {
                t += options.units(SYMBOL_GAP_UNITS);
            }
        }

        if let Some(next) = tokens.get(i + 1) {
            if *next != WORD_SEPARATOR {
                t += options.units(LETTER_GAP_UNITS);
            }
        }
    }

    Timeline {
        events,
        elapsed: t - start,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn options(unit: u32) -> PlayOptions {
        PlayOptions::new(unit, 700).unwrap()
    }

    fn starts(timeline: &Timeline) -> Vec<u64> {
        timeline
            .events
            .iter()
            .map(|e| e.start.as_millis() as u64)
            .collect()
    }

    #[test]
    fn test_sos_layout() {
        let timeline = plan("... --- ...", &options(10), Duration::ZERO);
        assert_eq!(
            starts(&timeline),
            vec![0, 20, 40, 80, 120, 160, 220, 240, 260]
        );
        let lengths: Vec<u64> = timeline
            .events
            .iter()
            .map(|e| e.duration.as_millis() as u64)
            .collect();
        assert_eq!(lengths, vec![10, 10, 10, 30, 30, 30, 10, 10, 10]);
        assert_eq!(timeline.elapsed, ms(270));
    }

    #[test]
    fn test_total_without_separator_has_no_trailing_gap() {
        // "-.-- .-" = Y A
        // Y: 3+1+1+1+3+1+3 = 13, gap 3, A: 1+1+3 = 5
        let timeline = plan("-.-- .-", &options(1), Duration::ZERO);
        assert_eq!(timeline.elapsed, ms(21));
        assert_eq!(timeline.events.len(), 6);
    }

    #[test]
    fn test_word_separator_is_seven_units_of_silence() {
        let alone = plan("/", &options(10), Duration::ZERO);
        assert!(alone.events.is_empty());
        assert_eq!(alone.elapsed, ms(70));

        let words = plan(". / .", &options(10), Duration::ZERO);
        assert_eq!(starts(&words), vec![0, 80]);
        assert_eq!(words.elapsed, ms(90));
    }

    #[test]
    fn test_separator_adds_exactly_seven_units() {
        let opts = options(20);
        let joined = plan("... ---", &opts, Duration::ZERO);
        let split = plan("... / ---", &opts, Duration::ZERO);
        // A letter gap (3) is replaced by a word gap (7)
        assert_eq!(split.elapsed - joined.elapsed, opts.units(4));
        assert_eq!(split.events.len(), joined.events.len());
    }

    #[test]
    fn test_offsets_from_start() {
        let start = Duration::from_secs(5);
        let timeline = plan(".-", &options(50), start);
        assert_eq!(timeline.events[0].start, start);
        assert_eq!(timeline.events[1].start, start + ms(100));
        assert_eq!(timeline.elapsed, ms(250));
    }

    #[test]
    fn test_events_strictly_increasing() {
        let sequence = crate::codec::encode("HELLO WORLD 73");
        let timeline = plan(&sequence, &options(80), Duration::ZERO);
        for pair in timeline.events.windows(2) {
            assert!(pair[0].start < pair[1].start);
            assert!(pair[0].end() < pair[1].start);
        }
    }

    #[test]
    fn test_extra_spaces_are_ignored() {
        let opts = options(10);
        assert_eq!(
            plan("  ...   ---  ", &opts, Duration::ZERO),
            plan("... ---", &opts, Duration::ZERO)
        );
    }

    #[test]
    fn test_empty_sequence() {
        let timeline = plan("", &options(10), Duration::ZERO);
        assert!(timeline.events.is_empty());
        assert_eq!(timeline.elapsed, Duration::ZERO);
    }

    #[test]
    fn test_frequency_carried_to_events() {
        let opts = PlayOptions::new(10, 523).unwrap();
        let timeline = plan(". -", &opts, Duration::ZERO);
        assert!(timeline.events.iter().all(|e| e.frequency == 523));
    }

    #[test]
    fn test_unmapped_symbols_skip() {
        let timeline = plan(".x.", &options(10), Duration::ZERO);
        // dot, gap, x (nothing), gap, dot
        assert_eq!(starts(&timeline), vec![0, 30]);
        assert_eq!(timeline.elapsed, ms(40));

        // A pass-through token still gets letter gaps around it
        let token = plan(". # .", &options(10), Duration::ZERO);
        assert_eq!(starts(&token), vec![0, 70]);
    }

    #[test]
    fn test_unmapped_symbols_rest() {
        let opts = options(10).unmapped(UnmappedSymbol::Rest);
        let timeline = plan(".x.", &opts, Duration::ZERO);
        assert_eq!(starts(&timeline), vec![0, 60]);
        assert_eq!(timeline.elapsed, ms(70));
    }
}
