use std::collections::HashMap;
use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use serde_json::json;

use livefeed::store::EmojiTable;
use livefeed::transport::{LOG_CHAT, LOG_EVENT};
use livefeed::{
    decode_event, ChatEvent, FeedConfig, FeedRuntime, LocalBridge, MessageProcessor, OtherEventRouter,
    TrackedIdentities, User,
};

fn bench_decode_gift(c: &mut Criterion) {
    let envelope = json!({
        "type": "Gift",
        "payload": {"id": "g1", "senderId": "u2", "senderLabel": "Ann", "giftType": "Subscription", "giftCode": "3"}
    });
    c.bench_function("dispatch/decode_gift", |b| {
        b.iter(|| decode_event(LOG_EVENT, Some(black_box(&envelope))).unwrap());
    });
}

fn bench_should_process(c: &mut Criterion) {
    let tracked: TrackedIdentities = (0..256).map(|i| format!("user{i}")).collect();
    let router = OtherEventRouter::new(tracked);
    let chat = ChatEvent::new("e1", User::new("user200", "n"), "hello");
    c.bench_function("dispatch/should_process_tracked", |b| {
        b.iter(|| router.should_process(black_box(&chat)));
    });
}

fn bench_end_to_end_chat(c: &mut Criterion) {
    let bridge = LocalBridge::new();
    let runtime = FeedRuntime::new(FeedConfig::default(), Arc::new(bridge.clone())).unwrap();
    let stores = runtime.build_stores();
    let dist = runtime.get_instance();
    dist.set_callbacks(Some(stores.callbacks()));
    dist.start().unwrap();

    let chat = json!({
        "id": "c1",
        "comment": "gg see https://example.com",
        "user": {"id": "u1", "label": "Bob", "status": {"isManager": true}}
    });

    let mut group = c.benchmark_group("dispatch");
    group.throughput(Throughput::Elements(1));
    group.bench_function("chat_to_stores", |b| {
        b.iter(|| bridge.emit(LOG_CHAT, Some(chat.clone())));
    });
    group.finish();
}

fn bench_message_parts(c: &mut Criterion) {
    let images: HashMap<String, String> = (0..64)
        .map(|i| (format!("emo{i}"), format!("https://img/{i}.png")))
        .collect();
    let processor = MessageProcessor::with_emoji(EmojiTable::new(images).unwrap());
    let chat = ChatEvent::new("c", User::new("u", "U"), "hey /emo3/ and /emo42/ look https://example.com");
    c.bench_function("dispatch/message_parts_emoji", |b| {
        b.iter(|| processor.process(black_box(&chat)));
    });
}

criterion_group!(
    benches,
    bench_decode_gift,
    bench_should_process,
    bench_end_to_end_chat,
    bench_message_parts
);
criterion_main!(benches);
