/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/8/26
******************************************************************************/

use turnwise::{Symbol, run_report, run_sequence, run_sequence_channel};

#[cfg(test)]
mod tests {
    use super::*;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .try_init();
    }

    // --- run_sequence scenarios ---

    #[test]
    fn test_run_sequence_scenarios() {
        init_tracing();

        let cases: &[(u64, &[u64])] = &[
            (0, &[]),
            (1, &[0, 1]),
            (5, &[0, 1, 0, 2, 0, 3, 0, 4, 0, 5]),
        ];

        for (n, expected) in cases {
            let values: Vec<u64> = run_sequence(*n)
                .unwrap()
                .iter()
                .map(Symbol::value)
                .collect();
            assert_eq!(&values, expected, "bound {n}");
        }
    }

    #[test]
    fn test_run_sequence_deterministic_across_runs() {
        init_tracing();

        let first = run_sequence(200).unwrap();
        for _ in 0..10 {
            assert_eq!(run_sequence(200).unwrap(), first);
        }
    }

    // --- report surface ---

    #[test]
    fn test_report_carries_bound_and_run_id() {
        let a = run_report(3).unwrap();
        let b = run_report(3).unwrap();
        assert_eq!(a.bound, 3);
        assert_ne!(a.run_id, b.run_id);
        assert_eq!(a.symbols(), b.symbols());
    }

    // --- channel variant parity ---

    #[tokio::test]
    async fn test_channel_variant_matches_threaded_variant() {
        init_tracing();

        let threaded = run_report(64).unwrap();
        let channelled = run_sequence_channel(64).await.unwrap();
        assert_eq!(threaded.symbols(), channelled.symbols());
        assert_eq!(threaded.as_string(), channelled.as_string());
    }
}
