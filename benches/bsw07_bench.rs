use criterion::{criterion_group, BenchmarkId, Criterion, SamplingMode, Throughput};

use abe_bench::drivers::{ATTRIBUTE_COUNTS, PLAINTEXT, REPEATS};
use abe_bench::utils::policy::{attribute_names, flat_policy, Gate};
use rabe::schemes::bsw;
use rabe::utils::policy::pest::PolicyLanguage;

pub fn setup_bench(c: &mut Criterion) {
    c.bench_function("bsw07_setup", |b| b.iter(bsw::setup));
}

pub fn keygen_bench(c: &mut Criterion) {
    let (pk, msk) = bsw::setup();

    let mut group = c.benchmark_group("bsw07_keygen_attributes");
    group.sampling_mode(SamplingMode::Flat);
    for &count in ATTRIBUTE_COUNTS.iter() {
        let attributes = attribute_names(count);
        let refs: Vec<&str> = attributes.iter().map(|attribute| attribute.as_str()).collect();

        //sanity check
        assert!(bsw::keygen(&pk, &msk, &refs).is_some());

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &refs, |b, refs| {
            b.iter(|| bsw::keygen(&pk, &msk, refs))
        });
    }
    group.finish();
}

pub fn encryption_bench(c: &mut Criterion) {
    let (pk, _) = bsw::setup();
    let plaintext = PLAINTEXT.as_bytes().to_vec();

    for &gate in &[Gate::And, Gate::Or] {
        let mut group =
            c.benchmark_group(format!("bsw07_{}_encryption_attributes", gate.keyword()));
        group.sampling_mode(SamplingMode::Flat);
        for &count in ATTRIBUTE_COUNTS.iter() {
            let policy = flat_policy(gate, &attribute_names(count));

            //sanity check
            assert!(bsw::encrypt(&pk, &policy, PolicyLanguage::HumanPolicy, &plaintext).is_ok());

            group.throughput(Throughput::Elements(count as u64));
            group.bench_with_input(BenchmarkId::from_parameter(count), &policy, |b, policy| {
                b.iter(|| bsw::encrypt(&pk, policy, PolicyLanguage::HumanPolicy, &plaintext))
            });
        }
        group.finish();
    }
}

pub fn decryption_bench(c: &mut Criterion) {
    let (pk, msk) = bsw::setup();
    let plaintext = PLAINTEXT.as_bytes().to_vec();

    for &gate in &[Gate::And, Gate::Or] {
        let mut group =
            c.benchmark_group(format!("bsw07_{}_decryption_attributes", gate.keyword()));
        group.sampling_mode(SamplingMode::Flat);
        for &count in ATTRIBUTE_COUNTS.iter() {
            let attributes = attribute_names(count);
            let policy = flat_policy(gate, &attributes);
            let ct = bsw::encrypt(&pk, &policy, PolicyLanguage::HumanPolicy, &plaintext).unwrap();

            let holders = match gate {
                Gate::And => attributes,
                Gate::Or => vec![format!("attribute{}", count - 1)],
            };
            let refs: Vec<&str> = holders.iter().map(|attribute| attribute.as_str()).collect();
            let sk = bsw::keygen(&pk, &msk, &refs).unwrap();

            //sanity check
            assert!(bsw::decrypt(&sk, &ct).is_ok());

            group.throughput(Throughput::Elements(count as u64));
            group.bench_with_input(BenchmarkId::from_parameter(count), &ct, |b, ct| {
                b.iter(|| bsw::decrypt(&sk, ct))
            });
        }
        group.finish();
    }
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(REPEATS);
    targets = setup_bench, keygen_bench, encryption_bench, decryption_bench
}
