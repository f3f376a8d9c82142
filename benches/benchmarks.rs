//! Performance benchmarks for snapdiff

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use serde_json::{Value, json};
use snapdiff::compare_snapshots;
use snapdiff::object_diff::generate_diff;
use snapdiff::test_utils::SnapshotPair;
use snapdiff::text_diff::diff_lines;

fn device_facts(seed: u64, interfaces: usize) -> Value {
    let ifaces: Vec<Value> = (0..interfaces)
        .map(|i| {
            json!({
                "name": format!("eth{}", i),
                "mtu": if i as u64 % 7 == seed % 7 { 9000 } else { 1500 },
                "enabled": i % 3 != 0,
                "__counters": {"rx": seed * i as u64, "tx": seed + i as u64},
            })
        })
        .collect();
    json!({
        "hostname": "r1",
        "version": format!("17.{}", seed % 4),
        "interfaces": ifaces,
        "__collected_at": seed,
    })
}

fn config_lines(seed: usize, count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            if i % 50 == seed % 50 {
                format!("interface eth{} mtu 9000\n", i)
            } else {
                format!("interface eth{} mtu 1500\n", i)
            }
        })
        .collect()
}

fn bench_text_diff(c: &mut Criterion) {
    let a = config_lines(1, 2_000);
    let b = config_lines(2, 2_000);
    let a: Vec<&str> = a.iter().map(String::as_str).collect();
    let b: Vec<&str> = b.iter().map(String::as_str).collect();

    c.bench_function("diff_lines_2000", |bench| {
        bench.iter(|| diff_lines(black_box(&a), black_box(&b)))
    });
}

fn bench_object_diff(c: &mut Criterion) {
    let a = device_facts(1, 500);
    let b = device_facts(2, 500);

    c.bench_function("generate_diff_500_interfaces", |bench| {
        bench.iter(|| generate_diff(black_box(&a), black_box(&b), false))
    });
}

fn bench_compare_snapshots(c: &mut Criterion) {
    let pair = SnapshotPair::new();
    for site in 0..10 {
        for device in 0..10 {
            let dir = format!("site{}/r{}", site, device);
            let seed = (site * 10 + device) as u64;
            pair.add_a(&format!("{}/facts.json", dir), &device_facts(seed, 20).to_string());
            pair.add_b(&format!("{}/facts.json", dir), &device_facts(seed + 1, 20).to_string());
            pair.add_a(&format!("{}/running.cfg", dir), &config_lines(device, 200).concat());
            pair.add_b(&format!("{}/running.cfg", dir), &config_lines(device + 1, 200).concat());
        }
    }

    c.bench_function("compare_snapshots_100_devices", |bench| {
        bench.iter(|| compare_snapshots(black_box(pair.a()), black_box(pair.b()), false, false))
    });
}

criterion_group!(
    benches,
    bench_text_diff,
    bench_object_diff,
    bench_compare_snapshots
);
criterion_main!(benches);
