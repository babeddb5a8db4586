//! Sweeps for the BSW07 CP-ABE scheme (`rabe::schemes::bsw`).

use rabe::schemes::bsw;
use rabe::utils::policy::pest::PolicyLanguage;

use crate::error::BenchError;
use crate::utils::policy::{attribute_names, flat_policy, Gate};
use crate::utils::tools;

use super::{record, Settings, PLAINTEXT, SETUP_ROW};

/// Timing results.
pub const PERF_FILE: &str = "rabe_bsw07.csv";
/// Ciphertext and user key sizes.
pub const SIZE_FILE: &str = "rabe_bsw07_ct.csv";

/// Runs the BSW07 timing sweeps, plus the storage sweeps if enabled.
pub fn benchmark(settings: &Settings) -> Result<(), BenchError> {
    let perf = settings.out_dir.join(PERF_FILE);
    let plaintext = PLAINTEXT.as_bytes().to_vec();
    let (pk, msk) = bsw::setup();

    println!("bsw07: setup");
    let seconds = tools::measure(settings.repeats, || {
        bsw::setup();
    });
    record(&perf, SETUP_ROW, "setup", seconds)?;

    println!("bsw07: keygen");
    for &count in &settings.attribute_counts {
        let attributes = attribute_names(count);
        let refs: Vec<&str> = attributes.iter().map(|attribute| attribute.as_str()).collect();
        let seconds = tools::measure(settings.repeats, || {
            bsw::keygen(&pk, &msk, &refs).unwrap();
        });
        record(&perf, &count.to_string(), "keygen", seconds)?;
    }

    println!("bsw07: delegate");
    for &count in &settings.attribute_counts {
        let attributes = attribute_names(count);
        let refs: Vec<&str> = attributes.iter().map(|attribute| attribute.as_str()).collect();
        let sk = bsw::keygen(&pk, &msk, &refs).unwrap();
        let seconds = tools::measure(settings.repeats, || {
            bsw::delegate(&pk, &sk, &refs).unwrap();
        });
        record(&perf, &count.to_string(), "delegate", seconds)?;
    }

    for &gate in &[Gate::And, Gate::Or] {
        println!("bsw07: {} encrypt", gate.keyword());
        for &count in &settings.attribute_counts {
            let policy = flat_policy(gate, &attribute_names(count));
            let seconds = tools::measure(settings.repeats, || {
                bsw::encrypt(&pk, &policy, PolicyLanguage::HumanPolicy, &plaintext).unwrap();
            });
            record(&perf, &count.to_string(), &format!("{} encrypt", gate.keyword()), seconds)?;
        }

        println!("bsw07: {} decrypt", gate.keyword());
        for &count in &settings.attribute_counts {
            let attributes = attribute_names(count);
            let policy = flat_policy(gate, &attributes);
            let ct = bsw::encrypt(&pk, &policy, PolicyLanguage::HumanPolicy, &plaintext).unwrap();
            // an or gate is already satisfied by the last attribute alone
            let holders = match gate {
                Gate::And => attributes,
                Gate::Or => vec![format!("attribute{}", count - 1)],
            };
            let refs: Vec<&str> = holders.iter().map(|attribute| attribute.as_str()).collect();
            let sk = bsw::keygen(&pk, &msk, &refs).unwrap();
            let seconds = tools::measure(settings.repeats, || {
                bsw::decrypt(&sk, &ct).unwrap();
            });
            record(&perf, &count.to_string(), &format!("{} decrypt", gate.keyword()), seconds)?;
        }
    }

    if settings.with_sizes {
        sizes(settings, &pk, &msk)?;
    }
    Ok(())
}

/// Serialized user key sizes plus single (whole payload through the scheme)
/// and hybrid (scheme-wrapped key + AES-GCM payload) ciphertext sizes.
fn sizes(
    settings: &Settings,
    pk: &bsw::CpAbePublicKey,
    msk: &bsw::CpAbeMasterKey,
) -> Result<(), BenchError> {
    let path = settings.out_dir.join(SIZE_FILE);

    println!("bsw07: key sizes");
    for &count in &settings.attribute_counts {
        let attributes = attribute_names(count);
        let refs: Vec<&str> = attributes.iter().map(|attribute| attribute.as_str()).collect();
        let sk = bsw::keygen(pk, msk, &refs).unwrap();
        record(&path, &count.to_string(), "key", tools::serialized_size(&sk)?)?;
    }

    println!("bsw07: ciphertext sizes");
    for step in 0..settings.size_steps {
        let content = tools::random_bytes(1 << step);
        for &count in &settings.attribute_counts {
            let policy = flat_policy(Gate::And, &attribute_names(count));

            let single = bsw::encrypt(pk, &policy, PolicyLanguage::HumanPolicy, &content).unwrap();

            let key = tools::random_key();
            let wrapped =
                bsw::encrypt(pk, &policy, PolicyLanguage::HumanPolicy, &key.to_vec()).unwrap();
            let bulk = tools::encrypt_aes(&key, &content)?;

            record(
                &path,
                &count.to_string(),
                &format!("single {}", 1usize << step),
                tools::serialized_size(&single)?,
            )?;
            record(
                &path,
                &count.to_string(),
                &format!("hybrid {}", 1usize << step),
                tools::serialized_size(&wrapped)? + bulk.len(),
            )?;
        }
    }
    Ok(())
}
