//! Sweeps for the BDABE distributed scheme (`rabe::schemes::bdabe`).
//!
//! The cross-authority shapes are already covered by the MKE08 driver; this
//! one sticks to the single-authority sweeps.

use rabe::schemes::bdabe::{self, BdabePublicAttributeKey, BdabeSecretAuthorityKey};
use rabe::utils::policy::pest::PolicyLanguage;

use crate::error::BenchError;
use crate::utils::policy::{authority_attribute_names, flat_policy, Gate};
use crate::utils::tools;

use super::{record, Settings, PLAINTEXT, SETUP_ROW};

/// Timing results.
pub const PERF_FILE: &str = "rabe_bdabe.csv";
/// Ciphertext and user key sizes.
pub const SIZE_FILE: &str = "rabe_bdabe_ct.csv";

/// Runs the BDABE timing sweeps, plus the storage sweeps if enabled.
pub fn benchmark(settings: &Settings) -> Result<(), BenchError> {
    let perf = settings.out_dir.join(PERF_FILE);
    let plaintext = PLAINTEXT.as_bytes().to_vec();
    let authority_name = String::from("auth0");
    let user_name = String::from("user");
    let (pk, msk) = bdabe::setup();

    println!("bdabe: setup");
    let seconds = tools::measure(settings.repeats, || {
        bdabe::setup();
    });
    record(&perf, SETUP_ROW, "setup", seconds)?;

    println!("bdabe: auth setup");
    let seconds = tools::measure(settings.repeats, || {
        bdabe::authgen(&pk, &msk, &authority_name);
    });
    record(&perf, SETUP_ROW, "auth setup", seconds)?;

    let authority = bdabe::authgen(&pk, &msk, &authority_name);

    println!("bdabe: keygen");
    for &count in &settings.attribute_counts {
        let attributes = authority_attribute_names("auth0", count);
        let user = bdabe::keygen(&pk, &authority, &user_name);
        let seconds = tools::measure(settings.repeats, || {
            for attribute in &attributes {
                bdabe::request_attribute_sk(&user.pk, &authority, attribute).unwrap();
            }
        });
        record(&perf, &count.to_string(), "keygen", seconds)?;
    }

    for &gate in &[Gate::And, Gate::Or] {
        println!("bdabe: {} encrypt", gate.keyword());
        for &count in &settings.attribute_counts {
            let attributes = authority_attribute_names("auth0", count);
            let policy = flat_policy(gate, &attributes);
            let attr_pks = issue_attribute_pks(&pk, &authority, &attributes);
            let refs: Vec<&BdabePublicAttributeKey> = attr_pks.iter().collect();
            let seconds = tools::measure(settings.repeats, || {
                bdabe::encrypt(&pk, &refs, &policy, PolicyLanguage::HumanPolicy, &plaintext)
                    .unwrap();
            });
            record(&perf, &count.to_string(), &format!("{} encrypt", gate.keyword()), seconds)?;
        }

        println!("bdabe: {} decrypt", gate.keyword());
        for &count in &settings.attribute_counts {
            let attributes = authority_attribute_names("auth0", count);
            let policy = flat_policy(gate, &attributes);
            let attr_pks = issue_attribute_pks(&pk, &authority, &attributes);
            let refs: Vec<&BdabePublicAttributeKey> = attr_pks.iter().collect();
            let ct = bdabe::encrypt(&pk, &refs, &policy, PolicyLanguage::HumanPolicy, &plaintext)
                .unwrap();
            // an or gate is already satisfied by the last attribute alone
            let holders = match gate {
                Gate::And => attributes,
                Gate::Or => vec![format!("auth0::attribute{}", count - 1)],
            };
            let mut user = bdabe::keygen(&pk, &authority, &user_name);
            for attribute in &holders {
                user.sk_a
                    .push(bdabe::request_attribute_sk(&user.pk, &authority, attribute).unwrap());
            }
            let seconds = tools::measure(settings.repeats, || {
                bdabe::decrypt(&user, &ct).unwrap();
            });
            record(&perf, &count.to_string(), &format!("{} decrypt", gate.keyword()), seconds)?;
        }
    }

    if settings.with_sizes {
        sizes(settings, &pk, &authority)?;
    }
    Ok(())
}

/// Serialized user key sizes plus single and hybrid ciphertext sizes under a
/// single-authority conjunction.
fn sizes(
    settings: &Settings,
    pk: &bdabe::BdabePublicKey,
    authority: &BdabeSecretAuthorityKey,
) -> Result<(), BenchError> {
    let path = settings.out_dir.join(SIZE_FILE);
    let user_name = String::from("user");

    println!("bdabe: key sizes");
    for &count in &settings.attribute_counts {
        let mut user = bdabe::keygen(pk, authority, &user_name);
        for attribute in authority_attribute_names("auth0", count) {
            user.sk_a
                .push(bdabe::request_attribute_sk(&user.pk, authority, &attribute).unwrap());
        }
        record(&path, &count.to_string(), "key", tools::serialized_size(&user)?)?;
    }

    println!("bdabe: ciphertext sizes");
    for step in 0..settings.size_steps {
        let content = tools::random_bytes(1 << step);
        for &count in &settings.attribute_counts {
            let attributes = authority_attribute_names("auth0", count);
            let policy = flat_policy(Gate::And, &attributes);
            let attr_pks = issue_attribute_pks(pk, authority, &attributes);
            let refs: Vec<&BdabePublicAttributeKey> = attr_pks.iter().collect();

            let single = bdabe::encrypt(pk, &refs, &policy, PolicyLanguage::HumanPolicy, &content)
                .unwrap();

            let key = tools::random_key();
            let wrapped =
                bdabe::encrypt(pk, &refs, &policy, PolicyLanguage::HumanPolicy, &key.to_vec())
                    .unwrap();
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

/// Public attribute keys for `attributes`, all issued by `authority`.
fn issue_attribute_pks(
    pk: &bdabe::BdabePublicKey,
    authority: &BdabeSecretAuthorityKey,
    attributes: &[String],
) -> Vec<BdabePublicAttributeKey> {
    attributes
        .iter()
        .map(|attribute| bdabe::request_attribute_pk(pk, authority, attribute).unwrap())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::Table;
    use std::fs;

    #[test]
    fn tiny_sweep_produces_the_advertised_tables() {
        let dir = std::env::temp_dir().join(format!("abe_bench_bdabe_{}", std::process::id()));
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
        for column in &["setup", "auth setup", "keygen", "or encrypt", "and decrypt"] {
            assert!(perf.headers().contains(&column.to_string()), "missing {}", column);
        }

        let sizes = Table::load(&dir.join(SIZE_FILE)).unwrap();
        assert!(sizes.get("1", "hybrid 1").unwrap().parse::<u64>().unwrap() > 0);
    }
}
