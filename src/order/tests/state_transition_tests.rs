//! Unit tests for order lifecycle transitions.

use super::support::{demo_driver, minute, new_order};
use crate::order::domain::{
    OrderDomainError, OrderOperation, OrderStatus, PersistedOrderData, TaxiOrder, TimeInfo,
};
use eyre::{bail, ensure};
use rstest::{fixture, rstest};

/// Starting points reachable through the public lifecycle.
#[derive(Debug, Clone, Copy)]
enum Stage {
    WaitingForDriver,
    WaitingCarArrival,
    InProgress,
    Finished,
    CanceledWithoutDriver,
    CanceledWithDriver,
}

fn order_at(stage: Stage) -> Result<TaxiOrder, OrderDomainError> {
    let mut order = new_order();
    match stage {
        Stage::WaitingForDriver => {}
        Stage::WaitingCarArrival => order.assign_driver(demo_driver(), minute(1))?,
        Stage::InProgress => {
            order.assign_driver(demo_driver(), minute(1))?;
            order.start_ride(minute(2))?;
        }
        Stage::Finished => {
            order.assign_driver(demo_driver(), minute(1))?;
            order.start_ride(minute(2))?;
            order.finish_ride(minute(3))?;
        }
        Stage::CanceledWithoutDriver => order.cancel(minute(1))?,
        Stage::CanceledWithDriver => {
            order.assign_driver(demo_driver(), minute(1))?;
            order.cancel(minute(2))?;
        }
    }
    Ok(order)
}

fn expect_invalid_state(
    result: Result<(), OrderDomainError>,
    operation: OrderOperation,
    order: &TaxiOrder,
) -> eyre::Result<()> {
    let expected = Err(OrderDomainError::InvalidState {
        order_id: order.id(),
        operation,
        status: order.status(),
    });
    if result != expected {
        bail!("expected {expected:?}, got {result:?}");
    }
    Ok(())
}

#[fixture]
fn waiting_order() -> TaxiOrder {
    new_order()
}

#[rstest]
fn new_order_waits_for_driver(waiting_order: TaxiOrder) {
    assert_eq!(waiting_order.status(), OrderStatus::WaitingForDriver);
    assert!(waiting_order.driver().is_none());
    assert_eq!(waiting_order.time_info(), &TimeInfo::new(minute(0)));
}

#[rstest]
#[case(Stage::WaitingForDriver, true)]
#[case(Stage::WaitingCarArrival, false)]
#[case(Stage::InProgress, false)]
#[case(Stage::Finished, false)]
#[case(Stage::CanceledWithoutDriver, false)]
#[case(Stage::CanceledWithDriver, false)]
fn assign_driver_requires_waiting_for_driver(
    #[case] stage: Stage,
    #[case] allowed: bool,
) -> eyre::Result<()> {
    let mut order = order_at(stage)?;
    let before = order.clone();

    let result = order.assign_driver(demo_driver(), minute(10));

    if allowed {
        ensure!(result.is_ok(), "expected success, got {result:?}");
        ensure!(order.status() == OrderStatus::WaitingCarArrival);
        ensure!(order.driver() == Some(&demo_driver()));
        ensure!(*order.time_info().driver_assignment_time() == Some(minute(10)));
    } else {
        expect_invalid_state(result, OrderOperation::AssignDriver, &before)?;
        ensure!(order == before, "rejected assignment mutated the order");
    }
    Ok(())
}

#[rstest]
#[case(Stage::WaitingForDriver, false)]
#[case(Stage::WaitingCarArrival, true)]
#[case(Stage::InProgress, false)]
#[case(Stage::Finished, true)]
#[case(Stage::CanceledWithoutDriver, false)]
#[case(Stage::CanceledWithDriver, true)]
fn unassign_driver_requires_driver_outside_waiting_and_ride(
    #[case] stage: Stage,
    #[case] allowed: bool,
) -> eyre::Result<()> {
    let mut order = order_at(stage)?;
    let before = order.clone();

    let result = order.unassign_driver();

    if allowed {
        ensure!(result.is_ok(), "expected success, got {result:?}");
        ensure!(order.status() == OrderStatus::WaitingForDriver);
        ensure!(order.driver().is_none());
    } else {
        expect_invalid_state(result, OrderOperation::UnassignDriver, &before)?;
        ensure!(order == before, "rejected unassignment mutated the order");
    }
    Ok(())
}

#[rstest]
#[case(Stage::WaitingForDriver, false)]
#[case(Stage::WaitingCarArrival, true)]
#[case(Stage::InProgress, false)]
#[case(Stage::Finished, false)]
#[case(Stage::CanceledWithoutDriver, false)]
#[case(Stage::CanceledWithDriver, false)]
fn start_ride_requires_waiting_car_arrival(
    #[case] stage: Stage,
    #[case] allowed: bool,
) -> eyre::Result<()> {
    let mut order = order_at(stage)?;
    let before = order.clone();

    let result = order.start_ride(minute(10));

    if allowed {
        ensure!(result.is_ok(), "expected success, got {result:?}");
        ensure!(order.status() == OrderStatus::InProgress);
        ensure!(*order.time_info().start_ride_time() == Some(minute(10)));
    } else {
        expect_invalid_state(result, OrderOperation::StartRide, &before)?;
        ensure!(order == before, "rejected start mutated the order");
    }
    Ok(())
}

#[rstest]
#[case(Stage::WaitingForDriver, false)]
#[case(Stage::WaitingCarArrival, false)]
#[case(Stage::InProgress, true)]
#[case(Stage::Finished, false)]
#[case(Stage::CanceledWithoutDriver, false)]
#[case(Stage::CanceledWithDriver, false)]
fn finish_ride_requires_in_progress(
    #[case] stage: Stage,
    #[case] allowed: bool,
) -> eyre::Result<()> {
    let mut order = order_at(stage)?;
    let before = order.clone();

    let result = order.finish_ride(minute(10));

    if allowed {
        ensure!(result.is_ok(), "expected success, got {result:?}");
        ensure!(order.status() == OrderStatus::Finished);
        ensure!(*order.time_info().finish_ride_time() == Some(minute(10)));
    } else {
        expect_invalid_state(result, OrderOperation::FinishRide, &before)?;
        ensure!(order == before, "rejected finish mutated the order");
    }
    Ok(())
}

#[rstest]
#[case(Stage::WaitingForDriver, true)]
#[case(Stage::WaitingCarArrival, true)]
#[case(Stage::InProgress, false)]
#[case(Stage::Finished, true)]
#[case(Stage::CanceledWithoutDriver, true)]
#[case(Stage::CanceledWithDriver, true)]
fn cancel_is_rejected_only_in_progress(
    #[case] stage: Stage,
    #[case] allowed: bool,
) -> eyre::Result<()> {
    let mut order = order_at(stage)?;
    let before = order.clone();

    let result = order.cancel(minute(10));

    if allowed {
        ensure!(result.is_ok(), "expected success, got {result:?}");
        ensure!(order.status() == OrderStatus::Canceled);
        ensure!(*order.time_info().cancel_time() == Some(minute(10)));
    } else {
        expect_invalid_state(result, OrderOperation::Cancel, &before)?;
        ensure!(order == before, "rejected cancel mutated the order");
    }
    Ok(())
}

#[rstest]
#[case(OrderStatus::WaitingForDriver)]
#[case(OrderStatus::WaitingCarArrival)]
#[case(OrderStatus::InProgress)]
#[case(OrderStatus::Finished)]
#[case(OrderStatus::Canceled)]
fn ride_transitions_require_a_driver_in_every_status(#[case] status: OrderStatus) {
    let mut order = TaxiOrder::from_persisted(PersistedOrderData {
        driver: None,
        status,
        ..persisted(&new_order())
    });

    assert!(matches!(
        order.start_ride(minute(10)),
        Err(OrderDomainError::InvalidState { .. })
    ));
    assert!(matches!(
        order.finish_ride(minute(10)),
        Err(OrderDomainError::InvalidState { .. })
    ));
    assert_eq!(order.status(), status);
}

#[rstest]
fn assign_and_unassign_pair_is_repeatable(mut waiting_order: TaxiOrder) -> eyre::Result<()> {
    for round in 0..3 {
        waiting_order.assign_driver(demo_driver(), minute(round))?;
        waiting_order.unassign_driver()?;

        ensure!(waiting_order.status() == OrderStatus::WaitingForDriver);
        ensure!(waiting_order.driver().is_none());
    }
    Ok(())
}

#[rstest]
fn reassignment_restamps_assignment_time(mut waiting_order: TaxiOrder) -> eyre::Result<()> {
    waiting_order.assign_driver(demo_driver(), minute(1))?;
    waiting_order.unassign_driver()?;
    waiting_order.assign_driver(demo_driver(), minute(5))?;

    ensure!(*waiting_order.time_info().driver_assignment_time() == Some(minute(5)));
    Ok(())
}

#[rstest]
fn full_ride_records_every_timestamp(mut waiting_order: TaxiOrder) -> eyre::Result<()> {
    waiting_order.assign_driver(demo_driver(), minute(1))?;
    waiting_order.start_ride(minute(2))?;
    waiting_order.finish_ride(minute(3))?;

    let times = waiting_order.time_info();
    ensure!(*times.creation_time() == minute(0));
    ensure!(*times.driver_assignment_time() == Some(minute(1)));
    ensure!(*times.start_ride_time() == Some(minute(2)));
    ensure!(*times.finish_ride_time() == Some(minute(3)));
    ensure!(times.cancel_time().is_none());
    ensure!(waiting_order.status().is_terminal());
    Ok(())
}

#[rstest]
fn repeated_cancel_restamps_cancel_time(mut waiting_order: TaxiOrder) -> eyre::Result<()> {
    waiting_order.cancel(minute(1))?;
    waiting_order.cancel(minute(4))?;

    ensure!(waiting_order.status() == OrderStatus::Canceled);
    ensure!(*waiting_order.time_info().cancel_time() == Some(minute(4)));
    Ok(())
}

#[rstest]
fn canceled_order_cannot_start_ride(mut waiting_order: TaxiOrder) -> eyre::Result<()> {
    waiting_order.cancel(minute(1))?;

    let result = waiting_order.start_ride(minute(2));

    expect_invalid_state(result, OrderOperation::StartRide, &waiting_order)?;
    Ok(())
}

#[rstest]
fn destination_updates_in_every_stage() -> eyre::Result<()> {
    for stage in [
        Stage::WaitingForDriver,
        Stage::WaitingCarArrival,
        Stage::InProgress,
        Stage::Finished,
        Stage::CanceledWithDriver,
    ] {
        let mut order = order_at(stage)?;
        let destination = crate::order::domain::Address::new("Park Ave", "7");

        order.update_destination(destination.clone());

        ensure!(order.destination() == &destination, "stage {stage:?}");
    }
    Ok(())
}

fn persisted(order: &TaxiOrder) -> PersistedOrderData {
    PersistedOrderData {
        id: order.id(),
        client_name: order.client_name().clone(),
        start: order.start().clone(),
        destination: order.destination().clone(),
        driver: order.driver().cloned(),
        status: order.status(),
        time_info: order.time_info().clone(),
    }
}
