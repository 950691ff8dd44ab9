use core::hint::black_box;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use uniqid::message::{self, MessageKind};
use uniqid::{AgentAddress, EndpointSelector, IdComposer, SeededRandom, ThreadRandom, TimeSource, UniqueId};

struct FixedTime(u64);

impl TimeSource for FixedTime {
    fn current_seconds(&self) -> u64 {
        self.0
    }
}

const OPS: u64 = 4096;

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");
    group.throughput(Throughput::Elements(OPS));

    group.bench_function(format!("encode/{OPS}"), |b| {
        b.iter(|| {
            for echo in 0..OPS as u32 {
                black_box(message::encode(MessageKind::RequestUniqId, echo, 7, 1_710_493_200));
            }
        });
    });

    let buf = message::encode(MessageKind::ResponseLabelAndSeq, 1, 42, 123_456);
    group.bench_function(format!("decode/{OPS}"), |b| {
        b.iter(|| {
            for _ in 0..OPS {
                black_box(message::decode(black_box(&buf)).ok());
            }
        });
    });
    group.finish();
}

fn bench_compose(c: &mut Criterion) {
    let mut group = c.benchmark_group("compose");
    group.throughput(Throughput::Elements(OPS));

    group.bench_function(format!("from_fields/{OPS}"), |b| {
        b.iter(|| {
            for seq in 0..OPS as u32 {
                black_box(UniqueId::from_fields(7, 42, 2024, 3, 15, 9, seq));
            }
        });
    });

    // Includes the local time zone lookup.
    let composer = IdComposer::new(FixedTime(1_710_493_200));
    group.bench_function(format!("composer/{OPS}"), |b| {
        b.iter(|| {
            for seq in 0..OPS as u32 {
                black_box(composer.compose(7, 42, 0, seq).ok());
            }
        });
    });
    group.finish();
}

fn bench_selector(c: &mut Criterion) {
    let agents = AgentAddress::parse_list("10.0.0.1:1,10.0.0.2:1,10.0.0.3:1,10.0.0.4:1").unwrap();
    let mut group = c.benchmark_group("selector");
    group.throughput(Throughput::Elements(OPS));

    let thread_rng = EndpointSelector::new(agents.clone(), ThreadRandom).unwrap();
    group.bench_function(format!("thread_random/{OPS}"), |b| {
        b.iter(|| {
            for _ in 0..OPS {
                black_box(thread_rng.pick());
            }
        });
    });

    let seeded = EndpointSelector::new(agents, SeededRandom::new(1)).unwrap();
    group.bench_function(format!("seeded/{OPS}"), |b| {
        b.iter(|| {
            for _ in 0..OPS {
                black_box(seeded.pick());
            }
        });
    });
    group.finish();
}

criterion_group!(benches, bench_codec, bench_compose, bench_selector);
criterion_main!(benches);
