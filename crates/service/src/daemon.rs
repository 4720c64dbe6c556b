//! Daemon lifecycle: the event loop, the timers, and shutdown.

use anyhow::{Context, Result};
use parking_lot::Mutex;
use rumqttc::{Event, Packet};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::interval;
use tracing::{info, warn};

use umc_config::Config;
use umc_safety::SafetySupervisor;

use crate::controller::Controller;
use crate::mqtt::{self, StatusPublisher};
use crate::status::{ConnectionState, StatusSnapshot};

/// Ramp tick period while acceleration is enabled.
const CONTROL_TICK: Duration = Duration::from_millis(100);

/// Runs the daemon until a shutdown signal arrives.
///
/// One `parking_lot::Mutex<Controller>` is the single exclusion boundary:
/// the receive path, the heartbeat checker, and the ramp tick all lock it,
/// and every HAL call happens under it. The lock is never held across an
/// await; publications copy a [`StatusSnapshot`] out first.
///
/// # Errors
///
/// Returns an error for a fatal actuation failure (a backend whose `stop`
/// fails) or an unrecoverable setup failure. Transport errors are retried
/// in place.
pub async fn run(config: Config) -> Result<()> {
    let backend = config.backend_kind()?.create();
    let supervisor = Arc::new(SafetySupervisor::new(config.safety_config()));

    let controller = Controller::new(
        backend,
        config.calibration_profile(),
        config.motor_settings,
        Arc::clone(&supervisor),
    )
    .context("failed to zero motor output at startup")?;
    let controller = Arc::new(Mutex::new(controller));

    let (client, mut eventloop) = mqtt::connect(&config.mqtt);
    let publisher = StatusPublisher::new(client.clone(), config.mqtt.topics.status.clone());
    let command_topic = config.mqtt.topics.command.clone();

    let mut check_tick = interval(supervisor.config().check_interval());
    let mut control_tick = interval(CONTROL_TICK);
    let mut keepalive_tick = interval(config.mqtt.heartbeat_timeout() / 2);

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    info!(
        broker = %config.mqtt.broker,
        port = config.mqtt.port,
        command_topic = %command_topic,
        "daemon running"
    );

    loop {
        tokio::select! {
            event = eventloop.poll() => match event {
                Ok(Event::Incoming(Packet::ConnAck(_))) => {
                    info!("connected to broker");
                    mqtt::subscribe_commands(&client, &command_topic).await;
                    let snapshot = {
                        let mut ctl = controller.lock();
                        ctl.set_connection(ConnectionState::Connected);
                        ctl.snapshot(Instant::now())
                    };
                    publisher.publish(&snapshot).await;
                }
                Ok(Event::Incoming(Packet::Publish(publish))) => {
                    if let Some(snapshot) = handle_payload(&controller, &publish.payload)? {
                        publisher.publish(&snapshot).await;
                    }
                }
                Ok(_) => {}
                Err(err) => {
                    warn!(%err, "mqtt event loop error, retrying");
                    controller.lock().set_connection(ConnectionState::Disconnected);
                    tokio::time::sleep(Duration::from_secs(1)).await;
                }
            },

            _ = check_tick.tick() => {
                let snapshot = {
                    let mut ctl = controller.lock();
                    ctl.tick_check(Instant::now())
                        .context("forced stop failed after heartbeat trip")?
                        .map(|_| ctl.snapshot(Instant::now()))
                };
                if let Some(snapshot) = snapshot {
                    publisher.publish(&snapshot).await;
                }
            }

            _ = control_tick.tick() => {
                let snapshot = {
                    let mut ctl = controller.lock();
                    if ctl.tick_control().context("forced stop failed after drive fault")? {
                        Some(ctl.snapshot(Instant::now()))
                    } else {
                        None
                    }
                };
                if let Some(snapshot) = snapshot {
                    publisher.publish(&snapshot).await;
                }
            }

            _ = keepalive_tick.tick() => {
                let snapshot = controller.lock().snapshot(Instant::now());
                publisher.publish(&snapshot).await;
            }

            _ = &mut shutdown => {
                info!("shutdown signal received");
                controller.lock().shutdown();
                if let Err(err) = client.disconnect().await {
                    warn!(%err, "mqtt disconnect failed");
                }
                break;
            }
        }
    }

    info!("daemon stopped");
    Ok(())
}

/// Resolves when SIGINT or SIGTERM arrives.
///
/// systemd stops services with SIGTERM, so both signals must route through
/// the stop-then-release shutdown path rather than the default disposition,
/// which would leave the backend's enables asserted.
#[cfg(unix)]
pub async fn shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let interrupt = tokio::signal::ctrl_c();
    match signal(SignalKind::terminate()) {
        Ok(mut terminate) => {
            tokio::select! {
                result = interrupt => {
                    if let Err(err) = result {
                        warn!(%err, "SIGINT handler failed");
                    }
                }
                _ = terminate.recv() => {}
            }
        }
        Err(err) => {
            warn!(%err, "could not install SIGTERM handler");
            if let Err(err) = interrupt.await {
                warn!(%err, "SIGINT handler failed");
            }
        }
    }
}

/// Resolves when ctrl-c arrives.
#[cfg(not(unix))]
pub async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(%err, "shutdown signal handler failed");
    }
}

/// Decodes and dispatches one inbound payload under the controller lock.
///
/// Returns the snapshot to publish, or `None` when the payload was dropped
/// (a malformed payload mutates nothing and does not refresh the
/// heartbeat; it surfaces as `last_error` in the next publication).
fn handle_payload(
    controller: &Mutex<Controller>,
    payload: &[u8],
) -> Result<Option<StatusSnapshot>> {
    let now = Instant::now();
    let mut ctl = controller.lock();
    match umc_protocol::decode(payload) {
        Ok(command) => {
            ctl.handle_command(command, now)
                .context("fatal actuation failure")?;
            Ok(Some(ctl.snapshot(now)))
        }
        Err(err) => {
            warn!(%err, "dropping undecodable command payload");
            ctl.note_decode_error(err.to_string());
            Ok(None)
        }
    }
}
