/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/8/26
******************************************************************************/

//! Tests for external cancellation of in-flight runs.

#[cfg(test)]
mod tests {
    use crate::rendezvous::emission::{Emission, Symbol};
    use crate::rendezvous::run::{RunError, SequenceDriver};
    use std::time::Duration;

    /// Asserts that `emissions` form a strict prefix of the canonical
    /// interleaving (indices contiguous, zeros at odd positions, value `k`
    /// at position `2k`). Cancelled transcripts may end after either role.
    fn assert_canonical_prefix(emissions: &[Emission]) {
        for (i, emission) in emissions.iter().enumerate() {
            let index = i as u64 + 1;
            assert_eq!(emission.index, index);
            if index % 2 == 1 {
                assert_eq!(emission.symbol, Symbol::Zero);
            } else {
                assert_eq!(emission.symbol, Symbol::Value(index / 2));
            }
        }
    }

    #[test]
    fn test_cancel_before_run_emits_nothing() {
        let driver = SequenceDriver::new(1_000);
        driver.cancel_handle().cancel();

        match driver.run() {
            Err(RunError::Cancelled { emitted }) => assert!(emitted.is_empty()),
            other => panic!("expected cancelled run, got {other:?}"),
        }
    }

    #[test]
    fn test_cancel_mid_run_yields_canonical_prefix() {
        // Bound far beyond anything emittable in the test window; the run
        // can only end through cancellation.
        let driver = SequenceDriver::new(u64::MAX / 2);
        let cancel = driver.cancel_handle();

        let runner = std::thread::spawn(move || driver.run());

        std::thread::sleep(Duration::from_millis(20));
        cancel.cancel();

        match runner.join().unwrap() {
            Err(RunError::Cancelled { emitted }) => assert_canonical_prefix(&emitted),
            other => panic!("expected cancelled run, got {other:?}"),
        }
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let driver = SequenceDriver::new(u64::MAX / 2);
        let cancel = driver.cancel_handle();

        let runner = std::thread::spawn(move || driver.run());

        std::thread::sleep(Duration::from_millis(5));
        cancel.cancel();
        cancel.cancel();
        cancel.clone().cancel();

        assert!(matches!(
            runner.join().unwrap(),
            Err(RunError::Cancelled { .. })
        ));
    }

    #[test]
    fn test_cancelled_error_reports_emission_count() {
        let driver = SequenceDriver::new(1_000);
        driver.cancel_handle().cancel();

        let err = driver.run().unwrap_err();
        assert_eq!(err.to_string(), "run cancelled after 0 emissions");
    }
}
