use hex_literal::hex;
use passphrase2pgp::armor;
use passphrase2pgp::crypto::kdf;
use passphrase2pgp::packet::{EncryptionSubkey, SigningKey, UserId};
use passphrase2pgp::types::Timestamp;
use passphrase2pgp::{Certificate, KeyParamsBuilder};
use pretty_assertions::assert_eq;

const PASSPHRASE: &[u8] = b"correct horse battery staple";
const USER_ID: &str = "Example User <user@example.org>";

/// Argon2id output for `PASSPHRASE` and `USER_ID` at difficulty 1.
const SEED: [u8; 64] = hex!(
    "16d0b08eda6bb5ab79f8f38d0ea6a8610153bd3a779cd0c74ab851ec5d429d72"
    "695faca6a2a08a012ef148e0d790d2524db1dc6433bd0968bca516b75d29fd1c"
);

fn certificate() -> Certificate {
    let created = Timestamp::from_secs(0);
    let key = SigningKey::from_seed(SEED[..32].try_into().unwrap(), created).unwrap();
    let subkey = EncryptionSubkey::from_seed(SEED[32..].try_into().unwrap(), created).unwrap();

    Certificate::new(key, UserId::new(USER_ID), Some(subkey))
}

fn fixture(name: &str) -> Vec<u8> {
    std::fs::read(format!("tests/fixtures/{name}")).unwrap()
}

#[test]
fn key_material() {
    let _ = pretty_env_logger::try_init();

    let cert = certificate();
    assert_eq!(
        cert.key().public_key(),
        hex!("dd99def429b6b2241052747b6faffc5b79142bdcba99d31054cf3bb6b89fd2bd")
    );
    assert_eq!(
        cert.key().fingerprint().as_bytes(),
        &hex!("54e7a9c90f979de6a16e302ec41ebad9a3793d10")[..]
    );
    assert_eq!(
        format!("{:X}", cert.key().fingerprint()),
        "54E7A9C90F979DE6A16E302EC41EBAD9A3793D10"
    );
    assert_eq!(cert.key().key_id().to_bytes(), hex!("c41ebad9a3793d10"));
    assert_eq!(
        cert.subkey().unwrap().public_key(),
        hex!("81b6a8ca1ef6e179d24e93ffe5b92b0f0b18d33f9402fb51e30fb78dd8904b08")
    );
}

#[test]
fn secret_stream() {
    let _ = pretty_env_logger::try_init();

    assert_eq!(certificate().secret_bytes().unwrap(), fixture("sec.pgp"));
}

#[test]
fn public_stream() {
    let _ = pretty_env_logger::try_init();

    let cert = certificate();
    let without_subkey = Certificate::new(cert.key().clone(), cert.user_id().clone(), None);
    assert_eq!(without_subkey.public_bytes().unwrap(), fixture("pub.pgp"));

    // the subkey binding is the same in both streams
    let mut expected = fixture("pub.pgp");
    expected.extend(cert.subkey().unwrap().public_packet().unwrap());
    expected.extend(&fixture("sec.pgp")[0x13d..]);
    assert_eq!(cert.public_bytes().unwrap(), expected);
}

#[test]
fn armored_public_key() {
    let _ = pretty_env_logger::try_init();

    let cert = Certificate::new(certificate().key().clone(), UserId::new(USER_ID), None);
    let armored = armor::to_armored_string(&cert.public_bytes().unwrap()).unwrap();
    let expected = String::from_utf8(fixture("pub.asc")).unwrap();
    assert_eq!(armored, expected);
}

#[test]
fn detached_signature() {
    let _ = pretty_env_logger::try_init();

    let sig = certificate().sign(&fixture("hello.txt")[..]).unwrap();
    assert_eq!(sig, fixture("hello.sig"));

    let armored = armor::to_armored_string(&sig).unwrap();
    assert!(armored.starts_with("-----BEGIN PGP SIGNATURE-----\n\n"));
}

#[test]
#[ignore = "full cost key derivation is slow in debug builds"]
fn full_derivation() {
    let _ = pretty_env_logger::try_init();

    let seed = kdf::derive(PASSPHRASE, USER_ID.as_bytes(), 1).unwrap();
    assert_eq!(*seed.to_bytes(), SEED);

    let cert = KeyParamsBuilder::default()
        .user_id(USER_ID)
        .passphrase(PASSPHRASE.to_vec())
        .subkey(true)
        .build()
        .unwrap()
        .generate()
        .unwrap();
    assert_eq!(cert.secret_bytes().unwrap(), fixture("sec.pgp"));
}
