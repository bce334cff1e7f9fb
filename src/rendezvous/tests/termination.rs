/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/8/26
******************************************************************************/

//! Tests for clean termination of all three actors.

#[cfg(test)]
mod tests {
    use crate::rendezvous::actor::Role;
    use crate::rendezvous::emission::Symbol;
    use crate::rendezvous::monitor::{TurnMonitor, TurnVerdict};
    use crate::rendezvous::run::run_report;

    #[test]
    fn test_no_emission_past_bound() {
        // Odd and even bounds exercise both termination paths: the final
        // value is emitted by a different parity role in each case.
        for n in [4, 5] {
            let report = run_report(n).unwrap();
            assert_eq!(report.emissions.len() as u64, 2 * n);
            assert_eq!(report.emissions.last().unwrap().symbol, Symbol::Value(n));
        }
    }

    #[test]
    fn test_all_waits_finish_for_zero_bound() {
        let monitor = TurnMonitor::new(0);
        assert_eq!(monitor.wait_zero_turn(), TurnVerdict::Finished);
        assert_eq!(monitor.wait_odd_turn(), TurnVerdict::Finished);
        assert_eq!(monitor.wait_even_turn(), TurnVerdict::Finished);
        assert!(monitor.take_emissions().is_empty());
    }

    #[test]
    fn test_waits_finish_after_last_commit() {
        // Drive n = 1 by hand: zero emits, odd emits 1, and every
        // subsequent wait observes termination without blocking.
        let monitor = TurnMonitor::new(1);

        assert_eq!(monitor.wait_zero_turn(), TurnVerdict::Proceed);
        monitor.commit_zero();

        assert_eq!(monitor.wait_odd_turn(), TurnVerdict::Proceed);
        monitor.commit_value(Role::Odd);

        assert_eq!(monitor.wait_zero_turn(), TurnVerdict::Finished);
        assert_eq!(monitor.wait_odd_turn(), TurnVerdict::Finished);
        assert_eq!(monitor.wait_even_turn(), TurnVerdict::Finished);

        let emissions = monitor.take_emissions();
        assert_eq!(emissions.len(), 2);
        assert_eq!(emissions[0].symbol, Symbol::Zero);
        assert_eq!(emissions[1].symbol, Symbol::Value(1));
    }

    #[test]
    fn test_state_after_completed_run() {
        let monitor = TurnMonitor::new(2);

        monitor.wait_zero_turn();
        monitor.commit_zero();
        monitor.wait_odd_turn();
        monitor.commit_value(Role::Odd);
        monitor.wait_zero_turn();
        monitor.commit_zero();
        monitor.wait_even_turn();
        monitor.commit_value(Role::Even);

        let state = monitor.state();
        assert_eq!(state.position, 3);
        assert!(state.zero_turn);
        assert!(!state.cancelled);
    }

    #[test]
    fn test_parity_wait_blocks_on_wrong_parity() {
        // After zero's commit at position 1 only the odd predicate holds;
        // the even actor must keep waiting, so its wait cannot return
        // Proceed here. Verified indirectly through full runs; this checks
        // the predicate helper directly.
        assert!(Role::Odd.matches_position(1));
        assert!(!Role::Even.matches_position(1));
        assert!(Role::Even.matches_position(2));
        assert!(!Role::Zero.matches_position(1));
        assert_eq!(Role::of_position(1), Role::Odd);
        assert_eq!(Role::of_position(2), Role::Even);
    }
}
