use std::time::Duration;

use tokio_util::sync::CancellationToken;

use nlu_wait::kernel::source::NluSensor;
use nlu_wait::kernel::time::{Clock, MonotonicClock};
use nlu_wait::{
    ExitSignal, Reactor, RunOutcome, TaskEnvironment, TaskOptions, TaskState, Understanding,
    WaitTask,
};

fn setup(options: TaskOptions) -> (NluSensor, TaskEnvironment, WaitTask) {
    let sensor = NluSensor::new("NLUSensor");
    let env = TaskEnvironment::new().with_sensor(sensor.clone());
    let task = env.build_task(&options).expect("valid options");
    (sensor, env, task)
}

#[tokio::test(start_paused = true)]
async fn test_times_out_at_deadline() {
    let options = TaskOptions::new().with("intents", "greet").with("timeout", "100");
    let (_sensor, _env, mut task) = setup(options);

    let reactor = Reactor::new(MonotonicClock::new(), CancellationToken::new());
    let outcome = reactor.run(&mut task).await;

    assert_eq!(outcome, RunOutcome::Exited(ExitSignal::TimedOut));
    let elapsed = reactor.clock().now_ms();
    assert!(elapsed >= 100, "timed out early at {} ms", elapsed);
    assert!(elapsed < 100 + 2 * 50, "timed out late at {} ms", elapsed);

    let snap = task.telemetry.snapshot();
    assert_eq!(snap.timeouts, 1);
    assert!(snap.loops >= 2);
}

#[tokio::test(start_paused = true)]
async fn test_matches_delivery_from_another_task() {
    let options = TaskOptions::new().with("intents", "greet;bye").with("timeout", "10000");
    let (sensor, env, mut task) = setup(options);

    let producer = sensor.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(320)).await;
        producer.publish(Understanding::new("bye", "en").with_text("see you"));
    });

    let reactor = Reactor::new(MonotonicClock::new(), CancellationToken::new());
    let outcome = reactor.run(&mut task).await;

    assert_eq!(outcome, RunOutcome::Exited(ExitSignal::Matched("bye".into())));
    assert_eq!(env.nlu_slot.get().unwrap().text, "see you");
    assert_eq!(sensor.listener_count(), 0);
    assert_eq!(task.state(), TaskState::Completed);
}

#[tokio::test(start_paused = true)]
async fn test_cancellation_detaches() {
    let options = TaskOptions::new().with("any", "true");
    let (sensor, _env, mut task) = setup(options);

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(1_000)).await;
        trigger.cancel();
    });

    let reactor = Reactor::new(MonotonicClock::new(), cancel);
    let outcome = reactor.run(&mut task).await;

    assert_eq!(outcome, RunOutcome::Cancelled);
    assert_eq!(task.state(), TaskState::Completed);
    assert_eq!(sensor.listener_count(), 0);
    assert_eq!(task.exit(), None);
}

#[tokio::test]
async fn test_cancelled_before_start() {
    let options = TaskOptions::new().with("any", "true");
    let (sensor, _env, mut task) = setup(options);

    let cancel = CancellationToken::new();
    cancel.cancel();
    let outcome = Reactor::new(MonotonicClock::new(), cancel).run(&mut task).await;

    assert_eq!(outcome, RunOutcome::Cancelled);
    assert_eq!(task.state(), TaskState::Completed);
    assert_eq!(sensor.listener_count(), 0);
}
