//! Cooperative scheduler
//!
//! One 1 ms [`Ticker`] feeds a [`TaskTimer`]; each raised tier runs its
//! components in a fixed order:
//!
//! - 1 ms: bus transactor, then display driver
//! - 10 ms: command dispatcher, buzzer, stepper
//! - 100 ms: heartbeat LED
//! - 1000 ms: error view

use defmt::*;
use embassy_time::{Duration, Ticker};

use panel_core::command::Devices;
use panel_core::scheduler::{TaskTimer, Tier};

use crate::board::Panel;
use crate::channels::{SERIAL, TX_KICK};

/// Base tick in milliseconds
pub const TICK_INTERVAL_MS: u64 = 1;

#[embassy_executor::task]
pub async fn scheduler_task(mut panel: Panel) {
    info!("Scheduler task started");

    let mut timer = TaskTimer::new();
    let mut ticker = Ticker::every(Duration::from_millis(TICK_INTERVAL_MS));

    loop {
        ticker.next().await;
        timer.tick();

        if timer.take(Tier::Ms1) {
            run_1ms(&mut panel);
        }
        if timer.take(Tier::Ms10) {
            run_10ms(&mut panel);
        }
        if timer.take(Tier::Ms100) {
            panel.heartbeat.run();
        }
        if timer.take(Tier::Ms1000) {
            run_1000ms(&mut panel);
        }
    }
}

/// Advance the bus by one step and let the display queue its next transfer
fn run_1ms(panel: &mut Panel) {
    panel.bus.run(&mut panel.i2c, &mut panel.errors);
    panel
        .display
        .run(&mut panel.bus, &mut panel.display_power, &mut panel.errors);

    let state = panel.display.state();
    if state != panel.display_state {
        trace!("Display {} -> {}", panel.display_state, state);
        panel.display_state = state;
    }
}

/// Handle at most one host command, then tick the slow actuators
fn run_10ms(panel: &mut Panel) {
    let mut devices = Devices {
        leds: &mut panel.leds,
        buzzer: &mut panel.buzzer,
        lcd: &mut panel.lcd,
        motor: &mut panel.motor,
        display: &mut panel.display,
        bus: &mut panel.bus,
    };
    let dispatcher = &mut panel.dispatcher;
    let kick = SERIAL.lock(|link| dispatcher.run(&mut link.borrow_mut(), &mut devices));

    if let Some(outcome) = panel.dispatcher.take_outcome() {
        match outcome.command {
            Some(command) => debug!("{} -> {}", command, outcome.response),
            None => warn!("Packet rejected: {}", outcome.response),
        }
    }

    if kick {
        trace!("TX kick");
        TX_KICK.signal(());
    }

    panel.buzzer.run();
    panel.motor.run();
}

/// Show logged faults on the LCD and mirror it to the debug log
fn run_1000ms(panel: &mut Panel) {
    if !panel.errors.is_empty() {
        debug!(
            "Error log: {} records, {} dropped",
            panel.errors.len(),
            panel.errors.dropped()
        );
        for record in panel.errors.iter() {
            debug!("  {}", record);
        }
        panel.error_view.run(&panel.errors, &mut panel.lcd);
    }

    if panel.lcd.take_dirty() {
        info!("LCD |{}|", panel.lcd.line_str(0));
        info!("LCD |{}|", panel.lcd.line_str(1));
    }
}
