//! Sweeps for the FAME CP-ABE scheme of Agrawal and Chase
//! (`rabe::schemes::ac17`).

use rabe::schemes::ac17;
use rabe::utils::policy::pest::PolicyLanguage;

use crate::error::BenchError;
use crate::utils::policy::{attribute_names, flat_policy, Gate};
use crate::utils::tools;

use super::{record, Settings, PLAINTEXT, SETUP_ROW};

/// Timing results.
pub const PERF_FILE: &str = "rabe_fame.csv";
/// Ciphertext and user key sizes.
pub const SIZE_FILE: &str = "rabe_fame_ct.csv";

/// Runs the FAME timing sweeps, plus the storage sweeps if enabled.
pub fn benchmark(settings: &Settings) -> Result<(), BenchError> {
    let perf = settings.out_dir.join(PERF_FILE);
    let plaintext = PLAINTEXT.as_bytes().to_vec();
    let (pk, msk) = ac17::setup();

    println!("fame: setup");
    let seconds = tools::measure(settings.repeats, || {
        ac17::setup();
    });
    record(&perf, SETUP_ROW, "setup", seconds)?;

    println!("fame: keygen");
    for &count in &settings.attribute_counts {
        let attributes = attribute_names(count);
        let refs: Vec<&str> = attributes.iter().map(|attribute| attribute.as_str()).collect();
        let seconds = tools::measure(settings.repeats, || {
            ac17::cp_keygen(&msk, &refs).unwrap();
        });
        record(&perf, &count.to_string(), "keygen", seconds)?;
    }

    for &gate in &[Gate::And, Gate::Or] {
        println!("fame: {} encrypt", gate.keyword());
        for &count in &settings.attribute_counts {
            let policy = flat_policy(gate, &attribute_names(count));
            let seconds = tools::measure(settings.repeats, || {
                ac17::cp_encrypt(&pk, &policy, &plaintext, PolicyLanguage::HumanPolicy).unwrap();
            });
            record(&perf, &count.to_string(), &format!("{} encrypt", gate.keyword()), seconds)?;
        }

        println!("fame: {} decrypt", gate.keyword());
        for &count in &settings.attribute_counts {
            let attributes = attribute_names(count);
            let policy = flat_policy(gate, &attributes);
            let ct = ac17::cp_encrypt(&pk, &policy, &plaintext, PolicyLanguage::HumanPolicy).unwrap();
            // an or gate is already satisfied by the last attribute alone
            let holders = match gate {
                Gate::And => attributes,
                Gate::Or => vec![format!("attribute{}", count - 1)],
            };
            let refs: Vec<&str> = holders.iter().map(|attribute| attribute.as_str()).collect();
            let sk = ac17::cp_keygen(&msk, &refs).unwrap();
            let seconds = tools::measure(settings.repeats, || {
                ac17::cp_decrypt(&sk, &ct).unwrap();
            });
            record(&perf, &count.to_string(), &format!("{} decrypt", gate.keyword()), seconds)?;
        }
    }

    if settings.with_sizes {
        sizes(settings, &pk, &msk)?;
    }
    Ok(())
}

/// Serialized user key sizes plus single and hybrid ciphertext sizes, as in
/// the BSW07 driver.
fn sizes(
    settings: &Settings,
    pk: &ac17::Ac17PublicKey,
    msk: &ac17::Ac17MasterKey,
) -> Result<(), BenchError> {
    let path = settings.out_dir.join(SIZE_FILE);

    println!("fame: key sizes");
    for &count in &settings.attribute_counts {
        let attributes = attribute_names(count);
        let refs: Vec<&str> = attributes.iter().map(|attribute| attribute.as_str()).collect();
        let sk = ac17::cp_keygen(msk, &refs).unwrap();
        record(&path, &count.to_string(), "key", tools::serialized_size(&sk)?)?;
    }

    println!("fame: ciphertext sizes");
    for step in 0..settings.size_steps {
        let content = tools::random_bytes(1 << step);
        for &count in &settings.attribute_counts {
            let policy = flat_policy(Gate::And, &attribute_names(count));

            let single =
                ac17::cp_encrypt(pk, &policy, &content, PolicyLanguage::HumanPolicy).unwrap();

            let key = tools::random_key();
            let wrapped =
                ac17::cp_encrypt(pk, &policy, &key.to_vec(), PolicyLanguage::HumanPolicy).unwrap();
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::Table;
    use std::fs;

    #[test]
    fn tiny_sweep_produces_the_advertised_tables() {
        let dir = std::env::temp_dir().join(format!("abe_bench_fame_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let _ = fs::remove_file(dir.join(PERF_FILE));
        let _ = fs::remove_file(dir.join(SIZE_FILE));

        let settings = Settings {
            attribute_counts: vec![1, 2],
            repeats: 1,
            out_dir: dir.clone(),
            with_sizes: true,
            size_steps: 1,
        };
        benchmark(&settings).unwrap();

        let perf = Table::load(&dir.join(PERF_FILE)).unwrap();
        for column in &["setup", "keygen", "and encrypt", "or decrypt"] {
            assert!(perf.headers().contains(&column.to_string()), "missing {}", column);
        }

        let sizes = Table::load(&dir.join(SIZE_FILE)).unwrap();
        assert!(sizes.get("1", "single 1").unwrap().parse::<u64>().unwrap() > 0);
    }
}
