//! Property tests for the ledger, schedule and dosage invariants.

use proptest::prelude::*;

use poolguard_core::{
    Category, DosageCalculator, DosageConstants, EditMode, Frequency, InventoryItem,
    InventoryLedger, Measurement, ScheduledTask, TaskSchedule, Unit, WaterState,
};

fn ledger_from(pairs: &[(f64, f64)]) -> InventoryLedger {
    InventoryLedger::new(
        pairs
            .iter()
            .enumerate()
            .map(|(i, &(quantity, target_quantity))| InventoryItem {
                id: i.to_string(),
                name: format!("item-{i}"),
                quantity,
                target_quantity,
                unit: Unit::Count,
            })
            .collect(),
    )
}

fn schedule_of(n: usize) -> TaskSchedule {
    TaskSchedule::new(
        (0..n)
            .map(|i| ScheduledTask {
                id: format!("t{i}"),
                description: format!("task {i}"),
                frequency: Frequency::Weekly,
                category: Category::Cleaning,
                completed: i % 2 == 0,
            })
            .collect(),
    )
}

// ── Inventory ledger ──────────────────────────────────────────

proptest! {
    /// No sequence of adjustments drives a quantity or target negative.
    #[test]
    fn adjustments_never_go_negative(
        start in 0.0f64..100.0,
        deltas in proptest::collection::vec(-50.0f64..50.0, 1..40),
    ) {
        let mut ledger = ledger_from(&[(start, start)]);
        for delta in deltas {
            let q = ledger.adjust_quantity("0", delta).map(|i| i.quantity);
            let t = ledger.adjust_target("0", delta).map(|i| i.target_quantity);
            prop_assert!(q.is_some_and(|q| q >= 0.0));
            prop_assert!(t.is_some_and(|t| t >= 0.0));
        }
    }

    /// Shortages are exactly the under-target items, in ledger order.
    #[test]
    fn shortages_are_an_ordered_filter(
        pairs in proptest::collection::vec((0.0f64..20.0, 0.0f64..20.0), 0..20),
    ) {
        let ledger = ledger_from(&pairs);
        let expected: Vec<String> = pairs
            .iter()
            .enumerate()
            .filter(|(_, (q, t))| q < t)
            .map(|(i, _)| i.to_string())
            .collect();
        let actual: Vec<String> = ledger.shortages().iter().map(|i| i.id.clone()).collect();
        prop_assert_eq!(actual, expected);
    }

    /// Adjusting an unknown id changes nothing.
    #[test]
    fn unknown_ids_leave_ledger_untouched(delta in -10.0f64..10.0) {
        let mut ledger = ledger_from(&[(5.0, 10.0), (1.0, 3.0)]);
        let before = ledger.clone();
        prop_assert!(ledger.adjust_quantity("missing", delta).is_none());
        prop_assert_eq!(ledger, before);
    }
}

// ── Task schedule ─────────────────────────────────────────────

proptest! {
    /// Toggling twice restores the starting flag.
    #[test]
    fn toggle_is_an_involution(n in 1usize..12, pick in 0usize..12) {
        let mut schedule = schedule_of(n);
        let id = format!("t{}", pick % n);
        let before = schedule.clone();

        prop_assert!(schedule.toggle_completed(&id, EditMode::Normal).is_some());
        prop_assert!(schedule.toggle_completed(&id, EditMode::Normal).is_some());
        prop_assert_eq!(schedule, before);
    }

    /// Nothing toggles while configuring.
    #[test]
    fn configuring_never_toggles(n in 1usize..12, pick in 0usize..12) {
        let mut schedule = schedule_of(n);
        let before = schedule.clone();
        let id = format!("t{}", pick % n);
        prop_assert_eq!(schedule.toggle_completed(&id, EditMode::Configuring), None);
        prop_assert_eq!(schedule, before);
    }

    /// Whitespace-only descriptions never add a task.
    #[test]
    fn blank_descriptions_are_rejected(blank in "[ \t\n]{0,8}", n in 0usize..6) {
        let mut schedule = schedule_of(n);
        prop_assert!(schedule.add_task(&blank, Frequency::Daily, Category::Chemical).is_none());
        prop_assert_eq!(schedule.len(), n);
    }
}

// ── Dosage ────────────────────────────────────────────────────

proptest! {
    /// Acid dose is zero at or below target and strictly grows with the gap above it.
    #[test]
    fn ph_down_is_monotonic(
        target in 6.5f64..8.5,
        a in 6.5f64..8.5,
        b in 6.5f64..8.5,
    ) {
        let calc = DosageCalculator::default();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(calc.ph_down_dose(lo, target) <= calc.ph_down_dose(hi, target));
        if lo <= target {
            prop_assert!(calc.ph_down_dose(lo, target) == 0.0);
        }
        // Strictly increasing above target.
        if lo > target && hi - lo > 1e-9 {
            prop_assert!(calc.ph_down_dose(lo, target) < calc.ph_down_dose(hi, target));
        }
    }

    /// Shock doses scale linearly with pool volume.
    #[test]
    fn shock_doses_scale_with_volume(volume in 1.0f64..500.0) {
        let calc = DosageCalculator::new(DosageConstants {
            pool_volume_m3: volume,
            ..DosageConstants::default()
        });
        prop_assert!((calc.chlorine_shock_dose() - volume * 20.0).abs() < 1e-9);
        prop_assert!((calc.algaecide_shock_dose() - volume * 20.0).abs() < 1e-9);
    }

    /// Any input reading ends up inside the instrument ranges.
    #[test]
    fn measurements_are_always_in_range(ph in -100.0f64..100.0, cl in -100.0f64..100.0) {
        let m = Measurement::new(ph, cl, WaterState::Clear);
        prop_assert!((6.5..=8.5).contains(&m.ph));
        prop_assert!((0.0..=5.0).contains(&m.chlorine));
    }
}
