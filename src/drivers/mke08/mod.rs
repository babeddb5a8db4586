//! Sweeps for the MKE08 multi-authority scheme (`rabe::schemes::mke08`).
//!
//! Besides the single-authority sweeps shared with the CP-ABE drivers, this
//! driver measures the cross-authority shapes: policies spanning one
//! attribute from each of `n` distinct authorities, and the merging of
//! attribute keys issued by independent authorities into one user key
//! (recorded under composite `"n x n"` row keys).

use rabe::schemes::mke08::{self, Mke08PublicAttributeKey, Mke08SecretAuthorityKey};
use rabe::utils::policy::pest::PolicyLanguage;

use crate::error::BenchError;
use crate::utils::policy::{authority_attribute_names, cross_authority_policy, flat_policy, Gate};
use crate::utils::tools;

use super::{record, Settings, PLAINTEXT, SETUP_ROW};

/// Timing results.
pub const PERF_FILE: &str = "rabe_mke08.csv";
/// Ciphertext and user key sizes.
pub const SIZE_FILE: &str = "rabe_mke08_ct.csv";

/// Runs the MKE08 timing sweeps, plus the storage sweeps if enabled.
pub fn benchmark(settings: &Settings) -> Result<(), BenchError> {
    let perf = settings.out_dir.join(PERF_FILE);
    let plaintext = PLAINTEXT.as_bytes().to_vec();
    let (pk, msk) = mke08::setup();

    println!("mke08: setup");
    let seconds = tools::measure(settings.repeats, || {
        mke08::setup();
    });
    record(&perf, SETUP_ROW, "setup", seconds)?;

    println!("mke08: auth setup");
    let seconds = tools::measure(settings.repeats, || {
        mke08::authgen("auth0");
    });
    record(&perf, SETUP_ROW, "auth setup", seconds)?;

    println!("mke08: keygen");
    let authority = mke08::authgen("auth0");
    for &count in &settings.attribute_counts {
        let attributes = authority_attribute_names("auth0", count);
        let user = mke08::keygen(&pk, &msk, "user");
        let seconds = tools::measure(settings.repeats, || {
            for attribute in &attributes {
                mke08::request_authority_sk(&user.pk, attribute, &authority).unwrap();
            }
        });
        record(&perf, &count.to_string(), "keygen", seconds)?;
    }

    for &gate in &[Gate::And, Gate::Or] {
        println!("mke08: {} encrypt", gate.keyword());
        for &count in &settings.attribute_counts {
            let attributes = authority_attribute_names("auth0", count);
            let policy = flat_policy(gate, &attributes);
            let attr_pks = issue_attribute_pks(&pk, &authority, &attributes);
            let refs: Vec<&Mke08PublicAttributeKey> = attr_pks.iter().collect();
            let seconds = tools::measure(settings.repeats, || {
                mke08::encrypt(&pk, &refs, &policy, PolicyLanguage::HumanPolicy, &plaintext)
                    .unwrap();
            });
            record(&perf, &count.to_string(), &format!("{} encrypt", gate.keyword()), seconds)?;
        }

        println!("mke08: {} decrypt", gate.keyword());
        for &count in &settings.attribute_counts {
            let attributes = authority_attribute_names("auth0", count);
            let policy = flat_policy(gate, &attributes);
            let attr_pks = issue_attribute_pks(&pk, &authority, &attributes);
            let refs: Vec<&Mke08PublicAttributeKey> = attr_pks.iter().collect();
            let ct = mke08::encrypt(&pk, &refs, &policy, PolicyLanguage::HumanPolicy, &plaintext)
                .unwrap();
            // an or gate is already satisfied by the last attribute alone
            let holders = match gate {
                Gate::And => attributes,
                Gate::Or => vec![format!("auth0::attribute{}", count - 1)],
            };
            let mut user = mke08::keygen(&pk, &msk, "user");
            for attribute in &holders {
                user.sk_a
                    .push(mke08::request_authority_sk(&user.pk, attribute, &authority).unwrap());
            }
            let seconds = tools::measure(settings.repeats, || {
                mke08::decrypt(&user, &ct).unwrap();
            });
            record(&perf, &count.to_string(), &format!("{} decrypt", gate.keyword()), seconds)?;
        }
    }

    complex_sweeps(settings, &perf, &pk, &msk, &plaintext)?;
    merging_sweep(settings, &perf, &pk, &msk)?;

    if settings.with_sizes {
        sizes(settings, &pk, &msk, &authority)?;
    }
    Ok(())
}

/// Policies spanning one attribute from each of `count` distinct authorities.
fn complex_sweeps(
    settings: &Settings,
    perf: &std::path::Path,
    pk: &mke08::Mke08PublicKey,
    msk: &mke08::Mke08MasterKey,
    plaintext: &[u8],
) -> Result<(), BenchError> {
    for &gate in &[Gate::And, Gate::Or] {
        println!("mke08: complex {} encrypt", gate.keyword());
        for &count in &settings.attribute_counts {
            let authorities = issue_authorities(count);
            let policy = cross_authority_policy(gate, count);
            let attr_pks = cross_authority_pks(pk, &authorities);
            let refs: Vec<&Mke08PublicAttributeKey> = attr_pks.iter().collect();
            let seconds = tools::measure(settings.repeats, || {
                mke08::encrypt(pk, &refs, &policy, PolicyLanguage::HumanPolicy, plaintext)
                    .unwrap();
            });
            record(
                perf,
                &count.to_string(),
                &format!("complex {} encrypt", gate.keyword()),
                seconds,
            )?;
        }

        println!("mke08: complex {} decrypt", gate.keyword());
        for &count in &settings.attribute_counts {
            let authorities = issue_authorities(count);
            let policy = cross_authority_policy(gate, count);
            let attr_pks = cross_authority_pks(pk, &authorities);
            let refs: Vec<&Mke08PublicAttributeKey> = attr_pks.iter().collect();
            let ct = mke08::encrypt(pk, &refs, &policy, PolicyLanguage::HumanPolicy, plaintext)
                .unwrap();
            let mut user = mke08::keygen(pk, msk, "user");
            match gate {
                // every authority has to contribute its attribute key
                Gate::And => {
                    for (position, authority) in authorities.iter().enumerate() {
                        let attribute = format!("auth{}::attribute0", position);
                        user.sk_a.push(
                            mke08::request_authority_sk(&user.pk, &attribute, authority).unwrap(),
                        );
                    }
                }
                // the last authority alone satisfies the disjunction
                Gate::Or => {
                    let attribute = format!("auth{}::attribute0", count - 1);
                    user.sk_a.push(
                        mke08::request_authority_sk(&user.pk, &attribute, &authorities[count - 1])
                            .unwrap(),
                    );
                }
            }
            let seconds = tools::measure(settings.repeats, || {
                mke08::decrypt(&user, &ct).unwrap();
            });
            record(
                perf,
                &count.to_string(),
                &format!("complex {} decrypt", gate.keyword()),
                seconds,
            )?;
        }
    }
    Ok(())
}

/// Merging the attribute keys of two authorities, `count` attributes each,
/// into one user key. Recorded under the composite row key `"count x count"`.
fn merging_sweep(
    settings: &Settings,
    perf: &std::path::Path,
    pk: &mke08::Mke08PublicKey,
    msk: &mke08::Mke08MasterKey,
) -> Result<(), BenchError> {
    println!("mke08: key merging");
    for &count in &settings.attribute_counts {
        let user = mke08::keygen(pk, msk, "user");
        let mut issued = Vec::new();
        for name in &["auth0", "auth1"] {
            let authority = mke08::authgen(name);
            for attribute in authority_attribute_names(name, count) {
                issued
                    .push(mke08::request_authority_sk(&user.pk, &attribute, &authority).unwrap());
            }
        }
        let seconds = tools::measure(settings.repeats, || {
            let mut merged = user.clone();
            merged.sk_a.extend(issued.iter().cloned());
        });
        record(perf, &format!("{} x {}", count, count), "key merging", seconds)?;
    }
    Ok(())
}

/// Serialized user key sizes plus single and hybrid ciphertext sizes under a
/// single-authority conjunction.
fn sizes(
    settings: &Settings,
    pk: &mke08::Mke08PublicKey,
    msk: &mke08::Mke08MasterKey,
    authority: &Mke08SecretAuthorityKey,
) -> Result<(), BenchError> {
    let path = settings.out_dir.join(SIZE_FILE);

    println!("mke08: key sizes");
    for &count in &settings.attribute_counts {
        let mut user = mke08::keygen(pk, msk, "user");
        for attribute in authority_attribute_names("auth0", count) {
            user.sk_a
                .push(mke08::request_authority_sk(&user.pk, &attribute, authority).unwrap());
        }
        record(&path, &count.to_string(), "key", tools::serialized_size(&user)?)?;
    }

    println!("mke08: ciphertext sizes");
    for step in 0..settings.size_steps {
        let content = tools::random_bytes(1 << step);
        for &count in &settings.attribute_counts {
            let attributes = authority_attribute_names("auth0", count);
            let policy = flat_policy(Gate::And, &attributes);
            let attr_pks = issue_attribute_pks(pk, authority, &attributes);
            let refs: Vec<&Mke08PublicAttributeKey> = attr_pks.iter().collect();

            let single = mke08::encrypt(pk, &refs, &policy, PolicyLanguage::HumanPolicy, &content)
                .unwrap();

            let key = tools::random_key();
            let wrapped =
                mke08::encrypt(pk, &refs, &policy, PolicyLanguage::HumanPolicy, &key.to_vec())
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

fn issue_authorities(count: usize) -> Vec<Mke08SecretAuthorityKey> {
    (0..count)
        .map(|position| mke08::authgen(&format!("auth{}", position)))
        .collect()
}

/// Public attribute keys for `attributes`, all issued by `authority`.
fn issue_attribute_pks(
    pk: &mke08::Mke08PublicKey,
    authority: &Mke08SecretAuthorityKey,
    attributes: &[String],
) -> Vec<Mke08PublicAttributeKey> {
    attributes
        .iter()
        .map(|attribute| mke08::request_authority_pk(pk, attribute, authority).unwrap())
        .collect()
}

/// Public keys for `attribute0` of every authority.
fn cross_authority_pks(
    pk: &mke08::Mke08PublicKey,
    authorities: &[Mke08SecretAuthorityKey],
) -> Vec<Mke08PublicAttributeKey> {
    authorities
        .iter()
        .enumerate()
        .map(|(position, authority)| {
            let attribute = format!("auth{}::attribute0", position);
            mke08::request_authority_pk(pk, &attribute, authority).unwrap()
        })
        .collect()
}
