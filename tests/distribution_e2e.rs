use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::json;

use livefeed::transport::{DISCONNECT, LOG_CHAT, LOG_EVENT, LOG_STATS};
use livefeed::{BridgePump, CallbackSet, DomainEvent, FeedConfig, FeedRuntime, LocalBridge};

fn runtime(bridge: &LocalBridge) -> FeedRuntime {
    FeedRuntime::new(FeedConfig::default(), Arc::new(bridge.clone())).unwrap()
}

#[derive(Default)]
struct Recorder {
    chats: AtomicUsize,
    others: AtomicUsize,
    stats: AtomicUsize,
}

impl Recorder {
    fn callbacks(self: &Arc<Self>) -> CallbackSet {
        let (c, o, s) = (Arc::clone(self), Arc::clone(self), Arc::clone(self));
        CallbackSet::new(
            move |_| {
                c.chats.fetch_add(1, Ordering::SeqCst);
            },
            move |_| {
                o.others.fetch_add(1, Ordering::SeqCst);
            },
            move |_| {
                s.stats.fetch_add(1, Ordering::SeqCst);
            },
        )
    }

    fn total(&self) -> usize {
        self.chats.load(Ordering::SeqCst) + self.others.load(Ordering::SeqCst) + self.stats.load(Ordering::SeqCst)
    }
}

#[test]
fn get_instance_is_a_singleton() {
    let bridge = LocalBridge::new();
    let runtime = runtime(&bridge);
    let a = runtime.get_instance();
    let b = runtime.get_instance();
    assert!(Arc::ptr_eq(&a, &b));
}

#[test]
fn start_twice_subscribes_each_channel_once() {
    let bridge = LocalBridge::new();
    let runtime = runtime(&bridge);
    let dist = runtime.get_instance();

    dist.start().unwrap();
    runtime.get_instance().start().unwrap();

    for channel in [LOG_CHAT, LOG_EVENT, LOG_STATS, DISCONNECT] {
        assert_eq!(bridge.subscriber_count(channel), 1, "{channel}");
    }

    let rec = Arc::new(Recorder::default());
    dist.set_callbacks(Some(rec.callbacks()));
    bridge.emit(LOG_CHAT, Some(json!({"id": "c1", "comment": "once"})));
    assert_eq!(rec.chats.load(Ordering::SeqCst), 1);
}

#[test]
fn malformed_envelopes_reach_no_consumer() {
    let bridge = LocalBridge::new();
    let dist = runtime(&bridge).get_instance();
    dist.start().unwrap();
    let rec = Arc::new(Recorder::default());
    dist.set_callbacks(Some(rec.callbacks()));

    bridge.emit(LOG_EVENT, Some(json!({"type": "Chat"})));
    bridge.emit(LOG_EVENT, Some(json!({"type": "Chat", "payload": null})));
    bridge.emit(LOG_EVENT, Some(json!({"type": "Teleport", "payload": {}})));
    bridge.emit(LOG_EVENT, Some(json!({"type": "Gift", "payload": {"senderId": 5}})));
    bridge.emit(LOG_EVENT, Some(json!("not an envelope")));
    bridge.emit(LOG_EVENT, None);
    bridge.emit(LOG_CHAT, None);
    bridge.emit(LOG_CHAT, Some(json!({"comment": 42})));

    assert_eq!(rec.total(), 0);
    assert_eq!(dist.stats().dropped, 8);
}

#[test]
fn set_callbacks_mid_stream_switches_consumers() {
    let bridge = LocalBridge::new();
    let dist = runtime(&bridge).get_instance();
    dist.start().unwrap();

    let first = Arc::new(Recorder::default());
    let second = Arc::new(Recorder::default());

    dist.set_callbacks(Some(first.callbacks()));
    bridge.emit(LOG_CHAT, Some(json!({"id": "c1", "comment": "a"})));

    dist.set_callbacks(Some(second.callbacks()));
    bridge.emit(LOG_CHAT, Some(json!({"id": "c2", "comment": "b"})));

    dist.set_callbacks(None);
    bridge.emit(LOG_CHAT, Some(json!({"id": "c3", "comment": "c"})));

    assert_eq!(first.chats.load(Ordering::SeqCst), 1);
    assert_eq!(second.chats.load(Ordering::SeqCst), 1);
    assert_eq!(bridge.subscriber_count(LOG_CHAT), 1);
}

#[test]
fn consumer_may_replace_callbacks_while_dispatching() {
    let bridge = LocalBridge::new();
    let dist = runtime(&bridge).get_instance();
    dist.start().unwrap();

    let next = Arc::new(Recorder::default());
    let hits = Arc::new(AtomicUsize::new(0));

    let weak = Arc::downgrade(&dist);
    let (h, n) = (Arc::clone(&hits), Arc::clone(&next));
    dist.set_callbacks(Some(CallbackSet::new(
        move |_| {
            h.fetch_add(1, Ordering::SeqCst);
            if let Some(dist) = weak.upgrade() {
                dist.set_callbacks(Some(n.callbacks()));
            }
        },
        |_| {},
        |_| {},
    )));

    bridge.emit(LOG_CHAT, Some(json!({"id": "c1"})));
    bridge.emit(LOG_CHAT, Some(json!({"id": "c2"})));

    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert_eq!(next.chats.load(Ordering::SeqCst), 1);
}

#[test]
fn events_flow_into_reference_stores() {
    let bridge = LocalBridge::new();
    let runtime = runtime(&bridge);
    let stores = runtime.build_stores();
    let dist = runtime.get_instance();
    dist.set_callbacks(Some(stores.callbacks()));
    dist.start().unwrap();

    bridge.emit(
        LOG_CHAT,
        Some(json!({"id": "c1", "comment": "hello https://example.com", "user": {"id": "u1", "label": "Bob"}})),
    );
    bridge.emit(
        LOG_EVENT,
        Some(json!({"type": "Enter", "payload": {"id": "e1", "user": {"id": "u2", "label": "Ann"}}})),
    );
    bridge.emit(
        LOG_STATS,
        Some(json!({"type": "ChatPerMinute", "payload": {"timestamp": "2024-05-01T10:04:07Z", "count": 12}})),
    );

    let chats = stores.chat.chats();
    assert_eq!(chats.len(), 1);
    assert_eq!(chats[0].parts.len(), 3);

    let others = stores.other.events();
    assert_eq!(others.len(), 1);
    assert!(matches!(others[0], DomainEvent::Enter(_)));

    let cpm = stores.stats.chats_per_minute();
    assert_eq!(cpm.data[0].time_label, "4:7");
    assert_eq!(cpm.data[0].count, 12);
}

#[test]
fn failed_start_leaves_distributor_idle() {
    let bridge = LocalBridge::new();
    bridge.reject_channel(DISCONNECT, "no such channel");
    let dist = runtime(&bridge).get_instance();

    let err = dist.start().unwrap_err();
    assert!(err.is_transport());
    assert!(!dist.is_listening());
    for channel in [LOG_CHAT, LOG_EVENT, LOG_STATS] {
        assert_eq!(bridge.subscriber_count(channel), 0, "{channel}");
    }
}

#[test]
fn direct_subscription_is_disposable() {
    let bridge = LocalBridge::new();
    let dist = runtime(&bridge).get_instance();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let s = Arc::clone(&seen);

    let sub = dist
        .subscribe("custom", move |msg| {
            s.lock().unwrap().push(msg.payload.clone());
        })
        .unwrap();
    bridge.emit("custom", Some(json!(1)));
    sub.unsubscribe();
    sub.unsubscribe();
    bridge.emit("custom", Some(json!(2)));

    assert_eq!(*seen.lock().unwrap(), vec![Some(json!(1))]);
}

#[test]
fn pump_feeds_distributor_in_order() {
    let bridge = LocalBridge::new();
    let runtime = runtime(&bridge);
    let stores = runtime.build_stores();
    let dist = runtime.get_instance();
    dist.set_callbacks(Some(stores.callbacks()));
    dist.start().unwrap();

    let pump = BridgePump::spawn(bridge.clone(), runtime.config().bridge.queue_capacity).unwrap();
    for i in 0..20 {
        pump.push(LOG_CHAT, Some(json!({"id": format!("c{i}"), "comment": "x"})))
            .unwrap();
    }
    pump.shutdown();

    let ids: Vec<String> = stores
        .chat
        .chats()
        .iter()
        .map(|c| c.event.id.as_str().to_string())
        .collect();
    let expected: Vec<String> = (0..20).map(|i| format!("c{i}")).collect();
    assert_eq!(ids, expected);
    assert_eq!(dist.stats().chats, 20);
}
