use std::thread;

use nlu_wait::kernel::error::SourceError;
use nlu_wait::kernel::event::Understanding;
use nlu_wait::kernel::source::{NluSensor, UnderstandingSource};

#[test]
fn test_drain_returns_arrival_order_and_clears() {
    let sensor = NluSensor::new("NLUSensor");
    let mut listener = sensor.listener();
    listener.attach().unwrap();

    assert!(!listener.has_pending());
    assert!(listener.drain_all().is_empty());

    sensor.publish(Understanding::new("a", "en"));
    sensor.publish(Understanding::new("b", "en"));
    sensor.publish(Understanding::new("c", "de"));
    assert!(listener.has_pending());

    let intents: Vec<String> = listener.drain_all().into_iter().map(|u| u.intent).collect();
    assert_eq!(intents, vec!["a", "b", "c"]);
    assert!(!listener.has_pending());
    assert!(listener.drain_all().is_empty());
}

#[test]
fn test_detach_is_idempotent_and_stops_delivery() {
    let sensor = NluSensor::new("NLUSensor");
    let mut listener = sensor.listener();

    // Never attached.
    listener.detach();
    assert!(!listener.is_attached());

    listener.attach().unwrap();
    assert_eq!(sensor.listener_count(), 1);

    listener.detach();
    listener.detach();
    assert_eq!(sensor.listener_count(), 0);

    assert_eq!(sensor.publish(Understanding::new("late", "en")), 0);
    assert!(!listener.has_pending());
}

#[test]
fn test_attach_twice_keeps_one_subscription() {
    let sensor = NluSensor::new("NLUSensor");
    let mut listener = sensor.listener();
    listener.attach().unwrap();
    listener.attach().unwrap();
    assert_eq!(sensor.listener_count(), 1);
}

#[test]
fn test_unavailable_sensor_refuses_attach() {
    let sensor = NluSensor::new("Mic");
    sensor.set_available(false);
    let mut listener = sensor.listener();

    assert_eq!(listener.attach(), Err(SourceError::Unavailable("Mic".into())));
    assert!(!listener.is_attached());
    sensor.publish(Understanding::new("greet", "en"));
    assert!(!listener.has_pending());
}

#[test]
fn test_dropping_listener_detaches() {
    let sensor = NluSensor::new("NLUSensor");
    {
        let mut listener = sensor.listener();
        listener.attach().unwrap();
        assert_eq!(sensor.listener_count(), 1);
    }
    assert_eq!(sensor.listener_count(), 0);
}

#[test]
fn test_listeners_are_independent() {
    let sensor = NluSensor::new("NLUSensor");
    let mut first = sensor.listener();
    let mut second = sensor.listener();
    first.attach().unwrap();
    second.attach().unwrap();

    assert_eq!(sensor.publish(Understanding::new("greet", "en")), 2);
    assert_eq!(first.drain_all().len(), 1);
    assert!(second.has_pending(), "draining one listener must not drain another");
}

#[test]
fn test_concurrent_deliveries_are_all_buffered() {
    let sensor = NluSensor::new("NLUSensor");
    let mut listener = sensor.listener();
    listener.attach().unwrap();

    let producers: Vec<_> = (0..4)
        .map(|n| {
            let sensor = sensor.clone();
            thread::spawn(move || {
                for i in 0..250 {
                    sensor.publish(Understanding::new(&format!("p{}-{}", n, i), "en"));
                }
            })
        })
        .collect();

    for producer in producers {
        producer.join().unwrap();
    }
    assert_eq!(listener.drain_all().len(), 1000);
}
