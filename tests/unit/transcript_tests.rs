/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/8/26
******************************************************************************/

use turnwise::{Emission, RunId, RunReport, Symbol, TranscriptError, run_report};

#[cfg(test)]
mod tests {
    use super::*;

    fn canonical_report(n: u64) -> RunReport {
        let mut emissions = Vec::with_capacity((n * 2) as usize);
        for k in 1..=n {
            emissions.push(Emission::new(2 * k - 1, Symbol::Zero));
            emissions.push(Emission::new(2 * k, Symbol::Value(k)));
        }
        RunReport::new(RunId::new(), n, emissions)
    }

    // --- verify ---

    #[test]
    fn test_verify_accepts_canonical_transcript() {
        assert!(canonical_report(10).verify().is_ok());
        assert!(canonical_report(0).verify().is_ok());
    }

    #[test]
    fn test_verify_rejects_truncated_transcript() {
        let mut report = canonical_report(10);
        report.emissions.pop();

        assert_eq!(
            report.verify(),
            Err(TranscriptError::LengthMismatch {
                expected: 20,
                found: 19
            })
        );
    }

    #[test]
    fn test_verify_rejects_index_gap() {
        let mut report = canonical_report(5);
        report.emissions[3].index = 9;

        assert_eq!(
            report.verify(),
            Err(TranscriptError::IndexGap {
                expected: 4,
                found: 9
            })
        );
    }

    #[test]
    fn test_verify_rejects_misplaced_zero() {
        let mut report = canonical_report(5);
        report.emissions[2].symbol = Symbol::Value(7);

        assert_eq!(
            report.verify(),
            Err(TranscriptError::MisplacedZero { index: 3, found: 7 })
        );
    }

    #[test]
    fn test_verify_rejects_wrong_value() {
        let mut report = canonical_report(5);
        report.emissions[5].symbol = Symbol::Value(99);

        assert_eq!(
            report.verify(),
            Err(TranscriptError::WrongValue {
                index: 6,
                expected: 3,
                found: 99
            })
        );
    }

    // --- serialization ---

    #[test]
    fn test_report_json_round_trip() {
        let report = run_report(5).unwrap();
        let json = report.to_json().unwrap();

        let restored: RunReport = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.run_id, report.run_id);
        assert_eq!(restored.bound, report.bound);
        assert_eq!(restored.emissions, report.emissions);
        assert!(restored.verify().is_ok());
    }

    // --- display ---

    #[test]
    fn test_symbol_display() {
        assert_eq!(Symbol::Zero.to_string(), "0");
        assert_eq!(Symbol::Value(12).to_string(), "12");
        assert_eq!(Symbol::Zero.value(), 0);
        assert_eq!(Symbol::Value(12).value(), 12);
    }

    #[test]
    fn test_as_string_concatenates_digits() {
        assert_eq!(canonical_report(3).as_string(), "010203");
        assert_eq!(canonical_report(0).as_string(), "");
    }
}
