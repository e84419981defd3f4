use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use nlu_wait::kernel::source::NluSensor;
use nlu_wait::kernel::speech::ImmediateSpeechActuator;
use nlu_wait::kernel::time::MonotonicClock;
use nlu_wait::{Reactor, RunOutcome, TaskEnvironment, TaskOptions, Understanding, WaitConfig};

/// `nlu-wait intents='greet;bye' timeout=5000`
///
/// Each stdin line is one understanding: `<intent> [text...]`.
#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")?;

    let options = TaskOptions::from_pairs(std::env::args().skip(1))?;
    let config = WaitConfig::from_options(&options)?;
    let exits: Vec<String> = config.declared_exits().iter().map(|e| e.to_string()).collect();
    tracing::info!("exits: {}", exits.join(", "));

    let sensor = NluSensor::new(&config.sensor_key);
    let env = TaskEnvironment::new()
        .with_sensor(sensor.clone())
        .with_actuator(Arc::new(ImmediateSpeechActuator));
    let mut task = env.build_with(config)?;

    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let (intent, text) = line.split_once(' ').unwrap_or((line, ""));
            let delivered = sensor.publish(Understanding::new(intent, "en").with_text(text.trim()));
            tracing::debug!("'{}' delivered to {} listener(s)", intent, delivered);
        }
    });

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    let reactor = Reactor::new(MonotonicClock::new(), cancel);
    match reactor.run(&mut task).await {
        RunOutcome::Exited(signal) => {
            if let Some(status) = signal.status() {
                println!("{}", status);
            }
            if let Some(u) = env.nlu_slot.get() {
                println!("{}", serde_json::to_string(&u)?);
            }
        }
        RunOutcome::Cancelled => println!("cancelled"),
    }
    Ok(())
}
