//! Measurement helpers shared by the benchmark drivers: wall clock timing,
//! serialized object sizes and the AES-256-GCM side of hybrid encryption.

use std::time::Instant;

use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use rand::RngCore;
use serde::Serialize;

use crate::error::BenchError;

/// AES-GCM nonce length in bytes, prepended to every ciphertext.
const NONCE_LEN: usize = 12;

/// Mean wall clock seconds of one call to `op`, measured over `repeats`
/// consecutive calls.
pub fn measure<F: FnMut()>(repeats: usize, mut op: F) -> f64 {
    let repeats = repeats.max(1);
    let timer = Instant::now();
    for _ in 0..repeats {
        op();
    }
    timer.elapsed().as_secs_f64() / repeats as f64
}

/// Serialized size of a scheme object in bytes, in the same packed CBOR
/// encoding keys and ciphertexts are written to disk in.
pub fn serialized_size<T: Serialize>(object: &T) -> Result<usize, BenchError> {
    Ok(serde_cbor::ser::to_vec_packed(object)?.len())
}

/// `len` random payload bytes.
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut data = vec![0u8; len];
    rand::thread_rng().fill_bytes(&mut data);
    data
}

/// A random 256 bit symmetric key.
pub fn random_key() -> [u8; 32] {
    let mut key = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut key);
    key
}

/// Encrypts `plaintext` under `key` with AES-256-GCM. The nonce is fresh
/// per call and prepended to the returned ciphertext.
pub fn encrypt_aes(key: &[u8; 32], plaintext: &[u8]) -> Result<Vec<u8>, BenchError> {
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
    let mut output = nonce.to_vec();
    output.extend(cipher.encrypt(&nonce, plaintext)?);
    Ok(output)
}

/// Counterpart of [`encrypt_aes`]: splits off the nonce and decrypts.
pub fn decrypt_aes(key: &[u8; 32], data: &[u8]) -> Result<Vec<u8>, BenchError> {
    if data.len() < NONCE_LEN {
        return Err(BenchError::new("ciphertext too short to carry a nonce"));
    }
    let (nonce, ciphertext) = data.split_at(NONCE_LEN);
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));
    Ok(cipher.decrypt(Nonce::from_slice(nonce), ciphertext)?)
}
